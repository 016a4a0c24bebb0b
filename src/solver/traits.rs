//! Numerical solver traits and configuration
//!
//! # Design Philosophy
//!
//! - `NumericalIntegrator` is the seam between the simulation loop and the
//!   time-stepping scheme: the loop never knows which formula advances the counts.
//! - `SolverConfiguration` carries the controls of the convergence loop
//!   (repeat flag, significance threshold, optional iteration ceiling).

use crate::error::DecayError;
use crate::physics::{DecayParameters, SpeciesCounts};

// =================================================================================================
// Numerical Integrator
// =================================================================================================

/// A fixed-step time integrator for the decay chain
///
/// # Contract
///
/// `step` advances the counts by exactly one `params.time_step`. It depends only on the
/// previous counts, so successive calls chain strictly sequentially.
///
/// # Example
///
/// ```rust
/// use decay_rs::physics::DecayParameters;
/// use decay_rs::solver::{EulerIntegrator, NumericalIntegrator};
///
/// let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 1.0, 10.0);
/// let next = EulerIntegrator::new().step(&params, &params.initial_counts());
///
/// assert_eq!(next.a, 900.0);
/// assert_eq!(next.b, 100.0);
/// ```
pub trait NumericalIntegrator {
    /// Advance `previous` by one time step
    fn step(&self, params: &DecayParameters, previous: &SpeciesCounts) -> SpeciesCounts;

    /// Human-readable name of the scheme
    fn name(&self) -> &str;
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Controls of the convergence loop
///
/// # Examples
///
/// ```rust
/// use decay_rs::solver::SolverConfiguration;
///
/// // Single run
/// let config = SolverConfiguration::single();
///
/// // Halve Δt until no count moves by more than 0.05 % of the total
/// let config = SolverConfiguration::repeated(0.0005);
///
/// // Same, but never produce more than 12 runs
/// let config = SolverConfiguration::repeated(0.0005).with_max_iterations(12);
/// config.validate()?;
/// # Ok::<(), decay_rs::DecayError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Fraction of the total atom count below which two refinements are equivalent
    pub significance: f64,

    /// Re-run at halved Δt until convergence
    pub repeat: bool,

    /// Optional ceiling on the number of runs (`None`: unbounded)
    pub max_iterations: Option<usize>,
}

impl Default for SolverConfiguration {
    fn default() -> Self {
        Self {
            significance: 0.0005,
            repeat: false,
            max_iterations: None,
        }
    }
}

impl SolverConfiguration {
    pub fn new(significance: f64, repeat: bool) -> Self {
        Self {
            significance,
            repeat,
            max_iterations: None,
        }
    }

    /// One run, no refinement
    pub fn single() -> Self {
        Self::default()
    }

    /// Refine until successive runs agree within `significance`
    pub fn repeated(significance: f64) -> Self {
        Self::new(significance, true)
    }

    /// Builder pattern: set the iteration ceiling
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DecayError> {
        if !self.significance.is_finite() || self.significance < 0.0 {
            return Err(DecayError::InvalidParameter(format!(
                "significance must be a non-negative fraction, got {}",
                self.significance
            )));
        }

        if self.max_iterations == Some(0) {
            return Err(DecayError::InvalidParameter(
                "maximum iterations must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = SolverConfiguration::default();
        assert!(!config.repeat);
        assert_eq!(config.significance, 0.0005);
        assert!(config.max_iterations.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SolverConfiguration::repeated(0.01).with_max_iterations(5);
        assert!(config.repeat);
        assert_eq!(config.max_iterations, Some(5));
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(SolverConfiguration::repeated(-0.1).validate().is_err());
        assert!(SolverConfiguration::repeated(f64::NAN).validate().is_err());
        assert!(
            SolverConfiguration::repeated(0.01)
                .with_max_iterations(0)
                .validate()
                .is_err()
        );
    }
}
