//! Mock integrators for testing
//!
//! These integrators have known error behaviour, making them useful for
//! validating the runner and the convergence loop independently of Euler.

use decay_rs::physics::{AnalyticalSolver, DecayParameters, SpeciesCounts};
use decay_rs::solver::NumericalIntegrator;

// =================================================================================================
// Exact step: closed-form propagation over one Δt
// =================================================================================================

/// Advances the counts with the closed-form solution, restarted from the previous point
///
/// Has no truncation error, so the numerical columns match the analytical ones up to
/// rounding and every refinement agrees with the previous run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactStepIntegrator;

impl NumericalIntegrator for ExactStepIntegrator {
    fn step(&self, params: &DecayParameters, previous: &SpeciesCounts) -> SpeciesCounts {
        let restarted = DecayParameters {
            initial_a: previous.a,
            initial_b: previous.b,
            initial_c: previous.c,
            ..*params
        };

        // Parameters reaching the integrator are already validated
        AnalyticalSolver::new()
            .evaluate(&restarted, params.time_step)
            .unwrap_or(*previous)
    }

    fn name(&self) -> &str {
        "Exact Step"
    }
}
