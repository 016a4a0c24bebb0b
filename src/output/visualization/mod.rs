//! Visualization of decay chain runs
//!
//! This module draws graphs with the `plotters` library. A `.svg` path gives a
//! vector image, any other extension a PNG.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **chart**: Curve rendering shared by every graph
//! - **reference**: Per-run graph of all counts, numerical and analytical
//! - **comparison**: Final graphs comparing saved reports
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use decay_rs::output::visualization::plot_reference_graph;
//! use decay_rs::physics::DecayParameters;
//! use decay_rs::solver::SimulationRunner;
//!
//! let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 0.5, 100.0);
//! let run = SimulationRunner::euler().run(&params)?;
//!
//! plot_reference_graph(&run, Path::new("image0.png"), None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # When to Use Which Function
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Counts of one run vs time | `plot_reference_graph` |
//! | N_B at three time steps | `plot_n_b_comparison` |
//! | Numerical solution of a report | `plot_numerical` |
//! | Peak time convergence | `plot_peak_time_vs_inverse_time_step` |
//! | All three final graphs | `make_final_graphs` |

pub mod config;
pub mod chart;
pub mod reference;
pub mod comparison;

pub use config::{PlotConfig, NO_TITLE};
pub use chart::{render_curves, Curve};
pub use reference::{plot_reference_graph, MAX_REFERENCE_POINTS};
pub use comparison::{
    draw_final_graphs,
    make_final_graphs,
    plot_n_b_comparison,
    plot_numerical,
    plot_peak_time_vs_inverse_time_step,
    prompt_final_graphs,
};
