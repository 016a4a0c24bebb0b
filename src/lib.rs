//! decay-rs: Three-Species Radioactive Decay Chain Simulation
//!
//! Simulates the chain A → B → C with two solvers side by side: the closed-form
//! solution of the linear decay equations, and a fixed-step forward Euler
//! integration. Runs are repeated with a halved time step until the numerical
//! solution stops changing by more than a fraction of the total atom count.
//!
//! # Architecture
//!
//! decay-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - [`physics`] defines the chain (parameters, counts, closed-form solution)
//!    - [`solver`] provides the numerical method, the runner and the refinement loop
//!
//! 2. **I/O at the edges**
//!    - [`config`] turns `input.txt` / `settings.txt` into validated records
//!    - [`output`] writes reports, graphs and CSV files from finished runs
//!
//! # Quick Start
//!
//! ```rust
//! use decay_rs::prelude::*;
//!
//! # fn main() -> Result<(), DecayError> {
//! // 1. Describe the chain: λ_A, λ_B (1/s), N_A0, N_B0, N_C0, Δt, t_final (s)
//! let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 1.0, 100.0);
//!
//! // 2. Halve Δt until successive runs agree within 0.05 % of the total
//! let config = SolverConfiguration::repeated(0.0005);
//! let report = ConvergenceLoop::euler(config).iterate(&params)?;
//!
//! // 3. Access results
//! let run = &report.run;
//! println!("Δt = {} s after {} runs", run.time_step(), report.iterations);
//! println!("Max N(B): {} at t = {} s", run.numerical_peak.value, run.numerical_peak.time);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Decay parameters and the closed-form solution
//! - [`solver`]: Euler integration, simulation runs and convergence
//! - [`config`]: Input and settings files
//! - [`output`]: Reports, graphs and CSV export
//! - [`error`]: Crate error type

pub mod error;

// Core modules
pub mod physics;
pub mod solver;

// I/O
pub mod config;
pub mod output;

pub use error::DecayError;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use decay_rs::prelude::*;
    //! ```
    pub use crate::error::DecayError;
    pub use crate::physics::{AnalyticalSolver,
                             DecayParameters,
                             PeakKind,
                             PeakRecord,
                             SpeciesCounts};
    pub use crate::solver::{ConvergenceLoop,
                            ConvergenceReport,
                            EulerIntegrator,
                            NumericalIntegrator,
                            Run,
                            SimulationPoint,
                            SimulationRunner,
                            SolverConfiguration};
}
