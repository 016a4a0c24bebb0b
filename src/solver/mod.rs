//! Numerical solvers
//!
//! This module advances the decay chain in time and compares runs.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Parameters** (`DecayParameters`, in `physics`) - WHAT to solve
//! 2. **Configuration** (`SolverConfiguration`) - HOW to refine
//!    - repeat flag, significance threshold, optional iteration ceiling
//! 3. **Integrator** (`NumericalIntegrator` trait) - the numerical method
//!
//! # Module Organization
//!
//! - **`traits`**: `NumericalIntegrator`, `SolverConfiguration`
//! - **`methods`**: `EulerIntegrator`
//! - **`result`**: `SimulationPoint`, `Run`
//! - **`runner`**: `SimulationRunner` - both solvers in lockstep over one run
//! - **`convergence`**: `ConvergenceLoop` - halve Δt until runs agree
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────────────┐
//! │ DecayParameters  │
//! └────────┬─────────┘
//!          │
//! ┌────────▼──────────┐      ┌──────────────────┐
//! │ ConvergenceLoop   │◄─────┤ SolverConfig     │
//! └────────┬──────────┘      └──────────────────┘
//!          │ Δt, Δt/2, Δt/4 ...
//! ┌────────▼──────────┐
//! │ SimulationRunner  │──► AnalyticalSolver (per t)
//! │                   │──► EulerIntegrator  (per step)
//! └────────┬──────────┘
//!          │
//! ┌────────▼──────────┐
//! │ Run               │  points + 2 peaks
//! └───────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use decay_rs::physics::DecayParameters;
//! use decay_rs::solver::{ConvergenceLoop, SolverConfiguration};
//!
//! let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 1.0, 50.0);
//! let report = ConvergenceLoop::euler(SolverConfiguration::repeated(0.0005)).iterate(&params)?;
//!
//! println!("Converged at Δt = {} s after {} runs", report.run.time_step(), report.iterations);
//! # Ok::<(), decay_rs::DecayError>(())
//! ```
//!
//! # Error Handling
//!
//! Invalid parameters abort before the first step ([`DecayError`](crate::DecayError)).
//! Negative counts from an oversized Δt are not an error: they are computed, reported,
//! and announced by a `warn!` log record.

mod traits;
mod methods;
mod result;
mod runner;
mod convergence;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{NumericalIntegrator, SolverConfiguration};

pub use methods::EulerIntegrator;
pub use result::{Run, SimulationPoint};
pub use runner::{find_numerical_peak, SimulationRunner};
pub use convergence::{differs_significantly, ConvergenceLoop, ConvergenceReport, Refinement};
