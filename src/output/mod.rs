//! Output of simulation results
//!
//! - **Report**: the fixed-width text file written after every run, and its reader
//! - **Naming**: numbering of `outputN.txt` / `imageN.png`
//! - **Visualization**: PNG/SVG graphs using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── report.rs           ← outputN.txt writer and reader
//! ├── naming.rs           ← first unused output number
//! ├── visualization/      ← Graphs
//! │   ├── config.rs
//! │   ├── chart.rs
//! │   ├── reference.rs
//! │   └── comparison.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! None of this is needed to run a simulation: the solvers produce a
//! [`Run`](crate::solver::Run) and the functions here only read it.

pub mod report;
pub mod naming;
pub mod visualization;
pub mod export;

pub use report::{read_report, read_report_header, write_report, ReportData};
pub use naming::{next_output_number, reference_image_path, report_path};

pub use visualization::{
    make_final_graphs,
    plot_n_b_comparison,
    plot_numerical,
    plot_peak_time_vs_inverse_time_step,
    plot_reference_graph,
    PlotConfig,
};

pub use export::{CsvConfig, CsvExporter, Exporter};
