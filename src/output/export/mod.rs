//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a new
//! format is a new file.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! The fixed-width text report lives in [`crate::output::report`]: it is the
//! program's own record of a run and is read back for the final graphs, whereas
//! exports are meant for external tools.
//!
//! # Usage example
//!
//! ```rust,no_run
//! use decay_rs::output::export::{CsvExporter, Exporter};
//! use decay_rs::physics::DecayParameters;
//! use decay_rs::solver::SimulationRunner;
//!
//! let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 0.01, 100.0);
//! let run = SimulationRunner::euler().run(&params)?;
//!
//! let exporter = CsvExporter::default();
//!
//! // Full export (all time steps)
//! exporter.export_run(&run, None, "chain.csv")?;
//!
//! // Downsampled export to 500 points
//! exporter.export_run(&run, Some(500), "chain_light.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvError, CsvExporter, CsvMetadata};

use crate::solver::Run;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so the caller can
/// react to the precise failure without downcasting a `Box<dyn Error>`.
///
/// # Parameter `n_points`
///
/// - `None`: exports all time steps
/// - `Some(n)`: uniformly downsamples to `n` points with [`Run::downsample`],
///   always keeping the first and last points
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports one run.
    ///
    /// The file holds the time, the analytical and numerical counts of A, B
    /// and C, and the numerical total.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - `run` contains no points
    fn export_run(&self, run: &Run, n_points: Option<usize>, path: &str) -> Result<(), Self::Error>;
}
