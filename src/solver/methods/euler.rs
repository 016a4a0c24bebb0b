//! Forward Euler step for the decay chain
//!
//! # Mathematical Background
//!
//! The explicit Euler scheme advances the counts using the decay rates evaluated at the
//! start of the step:
//!
//! ```text
//! decay_A = Δt·λ_A·N_A(t)
//! decay_B = Δt·λ_B·N_B(t)
//!
//! N_A(t + Δt) = N_A(t) - decay_A
//! N_B(t + Δt) = N_B(t) + decay_A - decay_B
//! N_C(t + Δt) = N_C(t) + decay_B
//! ```
//!
//! Atoms only move between species, so the total is conserved up to rounding.
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate (global error ~ O(Δt))
//! - **Stability**: Conditionally stable. When Δt·λ > 1 a species loses more atoms than
//!   it holds and its count goes negative. This is computed as-is, never corrected.
//! - **Cost**: 2 multiplications per species per step

use crate::physics::{DecayParameters, SpeciesCounts};
use crate::solver::NumericalIntegrator;

/// Forward Euler integrator
///
/// # Example
///
/// ```rust
/// use decay_rs::solver::{EulerIntegrator, NumericalIntegrator};
///
/// let solver = EulerIntegrator::new();
/// assert_eq!(solver.name(), "Forward Euler");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerIntegrator;

impl EulerIntegrator {
    /// Create a new Forward Euler integrator
    pub fn new() -> Self {
        Self
    }
}

impl NumericalIntegrator for EulerIntegrator {
    fn step(&self, params: &DecayParameters, previous: &SpeciesCounts) -> SpeciesCounts {
        let decay_a = params.time_step * params.lambda_a * previous.a;
        let decay_b = params.time_step * params.lambda_b * previous.b;

        SpeciesCounts {
            a: previous.a - decay_a,
            b: previous.b + decay_a - decay_b,
            c: previous.c + decay_b,
        }
    }

    fn name(&self) -> &str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
