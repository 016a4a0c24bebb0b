//! Closed-form solution of the A → B → C decay chain
//!
//! # Mathematical Background
//!
//! The chain obeys the linear system
//!
//! ```text
//! dN_A/dt = -λ_A·N_A
//! dN_B/dt =  λ_A·N_A - λ_B·N_B
//! dN_C/dt =  λ_B·N_B
//! ```
//!
//! whose solution for λ_A ≠ λ_B is
//!
//! ```text
//! N_A(t) = N_A0·e^(-λ_A·t)
//! N_B(t) = N_B0·e^(-λ_B·t) + λ_A·N_A0·(e^(-λ_A·t) - e^(-λ_B·t)) / (λ_B - λ_A)
//! N_C(t) = N_C0 + N_B0·(1 - e^(-λ_B·t))
//!        + N_A0·(λ_B·(1 - e^(-λ_A·t)) - λ_A·(1 - e^(-λ_B·t))) / (λ_B - λ_A)
//! ```
//!
//! Every value is computed directly from t, so analytical results never accumulate
//! error from one time point to the next.

use crate::error::DecayError;
use crate::physics::params::{DecayParameters, PeakRecord, SpeciesCounts};

/// Analytical solver for the three-species chain
///
/// Stateless: every method is a pure function of the parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticalSolver;

impl AnalyticalSolver {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate N_A, N_B and N_C at time `t`
    ///
    /// # Errors
    ///
    /// [`DecayError::EqualDecayConstants`] when λ_A = λ_B.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decay_rs::physics::{AnalyticalSolver, DecayParameters};
    ///
    /// let params = DecayParameters::new(1.0, 0.5, 100.0, 0.0, 0.0, 0.1, 10.0);
    /// let counts = AnalyticalSolver::new().evaluate(&params, 0.0).unwrap();
    /// assert_eq!(counts.a, 100.0);
    /// ```
    pub fn evaluate(&self, params: &DecayParameters, t: f64) -> Result<SpeciesCounts, DecayError> {
        let DecayParameters {
            lambda_a,
            lambda_b,
            initial_a,
            initial_b,
            initial_c,
            ..
        } = *params;

        if lambda_a == lambda_b {
            return Err(DecayError::EqualDecayConstants(lambda_a));
        }

        let decay_a = (-lambda_a * t).exp();
        let decay_b = (-lambda_b * t).exp();
        let spread = lambda_b - lambda_a;

        let a = initial_a * decay_a;
        let b = initial_b * decay_b + (lambda_a * initial_a) * (decay_a - decay_b) / spread;
        let c = initial_c
            + initial_b * (1.0 - decay_b)
            + initial_a * (lambda_b * (1.0 - decay_a) - lambda_a * (1.0 - decay_b)) / spread;

        Ok(SpeciesCounts::new(a, b, c))
    }

    /// Locate the maximum of N_B by solving dN_B/dt = 0
    ///
    /// ```text
    /// t* = 1/(λ_B - λ_A) · ln[ (N_B0·λ_B - λ_A·λ_B·N_A0/(λ_B - λ_A)) / (-λ_A²·N_A0/(λ_B - λ_A)) ]
    /// ```
    ///
    /// Only a stationary point after t = 0 is a peak. When N_B is already falling at
    /// t = 0 the stationary point lies in the past (or does not exist), whichever rate is
    /// larger.
    ///
    /// # Errors
    ///
    /// - [`DecayError::EqualDecayConstants`] when λ_A = λ_B
    /// - [`DecayError::NoInteriorPeak`] when the logarithm argument is not a positive
    ///   number (for example N_A0 = 0, where B only decays) or t* ≤ 0
    pub fn find_analytical_peak(&self, params: &DecayParameters) -> Result<PeakRecord, DecayError> {
        let DecayParameters {
            lambda_a,
            lambda_b,
            initial_a,
            initial_b,
            ..
        } = *params;

        if lambda_a == lambda_b {
            return Err(DecayError::EqualDecayConstants(lambda_a));
        }

        let spread = lambda_b - lambda_a;
        let numerator = initial_b * lambda_b - lambda_a * lambda_b * initial_a / spread;
        let denominator = -lambda_a.powi(2) * initial_a / spread;
        let argument = numerator / denominator;

        // NaN (0/0) fails this test as well
        if !(argument > 0.0 && argument.is_finite()) {
            return Err(DecayError::NoInteriorPeak { argument });
        }

        let time = argument.ln() / spread;
        if time <= 0.0 {
            return Err(DecayError::NoInteriorPeak { argument });
        }

        let counts = self.evaluate(params, time)?;

        Ok(PeakRecord::interior(counts.b, time))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
