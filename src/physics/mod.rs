//! Physics of the decay chain
//!
//! This module holds WHAT is simulated: the parameters of an A → B → C chain,
//! the species counts, and the closed-form solution.
//!
//! # Architecture
//!
//! Physics is **separate from numerics**:
//! - `physics` provides the parameters and the exact solution
//! - `solver` provides the Euler integrator and the simulation loops
//!
//! # Example
//!
//! ```rust
//! use decay_rs::physics::{AnalyticalSolver, DecayParameters};
//!
//! let params = DecayParameters::new(1.0, 0.5, 100.0, 0.0, 0.0, 0.01, 10.0);
//! params.validate()?;
//!
//! let solver = AnalyticalSolver::new();
//! let counts = solver.evaluate(&params, 2.0)?;
//! let peak = solver.find_analytical_peak(&params)?;
//!
//! assert!(counts.b <= peak.value);
//! # Ok::<(), decay_rs::DecayError>(())
//! ```

pub mod params;
pub mod analytical;

pub use params::{DecayParameters, PeakKind, PeakRecord, SpeciesCounts};
pub use analytical::AnalyticalSolver;
