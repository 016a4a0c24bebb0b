//! Time-step refinement until successive runs agree
//!
//! # Algorithm
//!
//! ```text
//! run_a = run(initial)
//! if !repeat: return run_a
//! loop:
//!     run_b = run(run_a.params with Δt / 2)
//!     if no point of run_a differs significantly from run_b: return run_b
//!     run_a = run_b
//! ```
//!
//! Point `i` of a run lies at the same time as point `2i` of the run at half the time
//! step. A difference is significant when any numerical count differs by more than
//! `significance × N_total(run_a, i)`.
//!
//! The loop is an explicit iteration holding only the previous run, so memory stays
//! bounded however tight the threshold is. A threshold that is never met loops forever
//! unless `max_iterations` is set.

use log::{debug, info, warn};

use crate::error::DecayError;
use crate::physics::{DecayParameters, PeakRecord};
use crate::solver::{EulerIntegrator, NumericalIntegrator, Run, SimulationRunner, SolverConfiguration};

/// Peaks of one refinement level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refinement {
    /// Δt of the run
    pub time_step: f64,

    pub analytical_peak: PeakRecord,

    pub numerical_peak: PeakRecord,
}

impl Refinement {
    fn of(run: &Run) -> Self {
        Self {
            time_step: run.time_step(),
            analytical_peak: run.analytical_peak,
            numerical_peak: run.numerical_peak,
        }
    }
}

/// Outcome of the convergence loop
#[derive(Debug, Clone)]
pub struct ConvergenceReport {
    /// The accepted run (the last one produced)
    pub run: Run,

    /// Number of runs produced, including the first
    pub iterations: usize,

    /// `false` only when the iteration ceiling stopped the loop
    pub converged: bool,

    /// Peaks of every run, coarsest first
    pub refinements: Vec<Refinement>,
}

/// Repeats a simulation at halved time steps until the results stabilise
///
/// # Example
///
/// ```rust
/// use decay_rs::physics::DecayParameters;
/// use decay_rs::solver::{ConvergenceLoop, SolverConfiguration};
///
/// let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 1.0, 50.0);
/// let report = ConvergenceLoop::euler(SolverConfiguration::repeated(0.005)).iterate(&params)?;
///
/// assert!(report.converged);
/// assert_eq!(report.iterations, 4);
/// assert_eq!(report.run.time_step(), 0.125);
/// # Ok::<(), decay_rs::DecayError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConvergenceLoop<I: NumericalIntegrator = EulerIntegrator> {
    runner: SimulationRunner<I>,
    config: SolverConfiguration,
}

impl ConvergenceLoop<EulerIntegrator> {
    pub fn euler(config: SolverConfiguration) -> Self {
        Self::new(SimulationRunner::euler(), config)
    }
}

impl<I: NumericalIntegrator> ConvergenceLoop<I> {
    pub fn new(runner: SimulationRunner<I>, config: SolverConfiguration) -> Self {
        Self { runner, config }
    }

    pub fn configuration(&self) -> &SolverConfiguration {
        &self.config
    }

    /// Name of the numerical scheme being refined
    pub fn integrator_name(&self) -> &str {
        self.runner.integrator_name()
    }

    /// Run the loop and return the accepted run
    pub fn iterate(&self, initial: &DecayParameters) -> Result<ConvergenceReport, DecayError> {
        self.iterate_with(initial, |_| Ok(()))
    }

    /// Run the loop, handing every completed run to `observer` before it is compared
    ///
    /// The observer is where reports and graphs are written. An observer error stops the
    /// loop and is returned.
    pub fn iterate_with<F>(
        &self,
        initial: &DecayParameters,
        mut observer: F,
    ) -> Result<ConvergenceReport, DecayError>
    where
        F: FnMut(&Run) -> Result<(), DecayError>,
    {
        self.config.validate()?;

        let mut previous = self.runner.run(initial)?;
        observer(&previous)?;

        let mut refinements = vec![Refinement::of(&previous)];
        let mut iterations = 1;

        if !self.config.repeat {
            return Ok(ConvergenceReport {
                run: previous,
                iterations,
                converged: true,
                refinements,
            });
        }

        loop {
            if let Some(ceiling) = self.config.max_iterations
                && iterations >= ceiling
            {
                warn!(
                    "Stopped after {} runs without convergence (Δt = {} s)",
                    iterations,
                    previous.time_step()
                );
                return Ok(ConvergenceReport {
                    run: previous,
                    iterations,
                    converged: false,
                    refinements,
                });
            }

            let params = previous.params.with_halved_time_step();
            let mut current = self.runner.run(&params)?;
            current.refinement = previous.refinement + 1;
            observer(&current)?;

            iterations += 1;
            refinements.push(Refinement::of(&current));

            if !differs_significantly(&previous, &current, self.config.significance) {
                info!(
                    "Converged after {} runs at Δt = {} s",
                    iterations,
                    current.time_step()
                );
                return Ok(ConvergenceReport {
                    run: current,
                    iterations,
                    converged: true,
                    refinements,
                });
            }

            previous = current;
        }
    }
}

/// `true` if any numerical count of `coarse` differs from `fine` by more than
/// `significance` times the coarse total at that point
///
/// `fine` must have half the time step of `coarse`: coarse point `i` is compared with
/// fine point `2i`. Coarse points without a counterpart are skipped. A NaN difference
/// counts as significant.
pub fn differs_significantly(coarse: &Run, fine: &Run, significance: f64) -> bool {
    for (i, point) in coarse.points.iter().enumerate() {
        let Some(matching) = fine.points.get(2 * i) else {
            break;
        };

        let threshold = point.numerical_total * significance;
        let difference = point.numerical.as_vector() - matching.numerical.as_vector();

        if difference.iter().any(|d| !(d.abs() <= threshold)) {
            debug!(
                "Significant change at t = {} s: difference {:?} exceeds {}",
                point.time,
                difference.as_slice(),
                threshold
            );
            return true;
        }
    }

    false
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::SpeciesCounts;
    use crate::solver::SimulationPoint;

    fn sample(time_step: f64) -> DecayParameters {
        DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, time_step, 50.0)
    }

    /// Run whose numerical counts are all `value` at every point
    fn flat_run(time_step: f64, n: usize, value: f64) -> Run {
        let params = DecayParameters::new(0.1, 0.05, value, value, value, time_step, 1.0);
        let counts = SpeciesCounts::new(value, value, value);
        let points = (0..n)
            .map(|i| SimulationPoint {
                time: i as f64 * time_step,
                analytical: counts,
                numerical: counts,
                numerical_total: counts.total(),
            })
            .collect();

        Run {
            params,
            points,
            analytical_peak: PeakRecord::at_start(&params),
            numerical_peak: PeakRecord::at_start(&params),
            refinement: 0,
        }
    }

    #[test]
    fn test_single_run_when_repeat_disabled() {
        let report = ConvergenceLoop::euler(SolverConfiguration::single())
            .iterate(&sample(1.0))
            .unwrap();

        assert_eq!(report.iterations, 1);
        assert!(report.converged);
        assert_eq!(report.run.time_step(), 1.0);
        assert_eq!(report.refinements.len(), 1);
    }

    #[test]
    fn test_accessors() {
        let config = SolverConfiguration::repeated(0.01).with_max_iterations(4);
        let convergence = ConvergenceLoop::euler(config.clone());

        assert_eq!(convergence.configuration(), &config);
        assert_eq!(convergence.integrator_name(), EulerIntegrator::new().name());
    }

    #[test]
    fn test_converges_with_halved_steps() {
        let report = ConvergenceLoop::euler(SolverConfiguration::repeated(0.0005))
            .iterate(&sample(1.0))
            .unwrap();

        assert!(report.converged);
        assert_eq!(report.iterations, 7);
        assert_eq!(report.run.time_step(), 1.0 / 64.0);
        assert_eq!(report.refinements.len(), 7);

        let steps: Vec<f64> = report.refinements.iter().map(|r| r.time_step).collect();
        assert!(steps.windows(2).all(|w| w[1] == w[0] / 2.0));
    }

    #[test]
    fn test_looser_threshold_stops_earlier() {
        let report = ConvergenceLoop::euler(SolverConfiguration::repeated(0.005))
            .iterate(&sample(1.0))
            .unwrap();

        assert_eq!(report.iterations, 4);
        assert_eq!(report.run.time_step(), 0.125);
    }

    #[test]
    fn test_iteration_ceiling() {
        let config = SolverConfiguration::repeated(0.0).with_max_iterations(3);
        let report = ConvergenceLoop::euler(config).iterate(&sample(1.0)).unwrap();

        assert!(!report.converged);
        assert_eq!(report.iterations, 3);
        assert_eq!(report.run.time_step(), 0.25);
    }

    #[test]
    fn test_observer_sees_every_run() {
        let mut seen = Vec::new();
        let report = ConvergenceLoop::euler(SolverConfiguration::repeated(0.005))
            .iterate_with(&sample(1.0), |run| {
                seen.push((run.time_step(), run.refinement));
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec![(1.0, 0), (0.5, 1), (0.25, 2), (0.125, 3)]);
        assert_eq!(seen.len(), report.iterations);
        assert_eq!(report.run.refinement, 3);
    }

    #[test]
    fn test_observer_error_stops_loop() {
        let result = ConvergenceLoop::euler(SolverConfiguration::repeated(0.005))
            .iterate_with(&sample(1.0), |_| Err(DecayError::InvalidParameter("stop".into())));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_initial_parameters() {
        let params = DecayParameters::new(0.1, 0.1, 1000.0, 0.0, 0.0, 1.0, 10.0);
        let err = ConvergenceLoop::euler(SolverConfiguration::repeated(0.005))
            .iterate(&params)
            .unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_small_differences_are_not_significant() {
        // Total 30 per point, threshold 0.3: 0.1 apart is within it
        let coarse = flat_run(1.0, 5, 10.0);
        let fine = flat_run(0.5, 9, 10.1);
        assert!(!differs_significantly(&coarse, &fine, 0.01));
    }

    #[test]
    fn test_one_point_over_threshold_is_significant() {
        let coarse = flat_run(1.0, 5, 10.0);
        let mut fine = flat_run(0.5, 9, 10.0);

        // Only fine point 6 (t = 3) moves; it matches coarse point 3
        fine.points[6].numerical.c += 0.5;
        assert!(differs_significantly(&coarse, &fine, 0.01));

        // An odd fine point has no coarse counterpart and is never compared
        let mut fine = flat_run(0.5, 9, 10.0);
        fine.points[5].numerical.a += 100.0;
        assert!(!differs_significantly(&coarse, &fine, 0.01));
    }

    #[test]
    fn test_nan_is_significant() {
        let coarse = flat_run(1.0, 3, 10.0);
        let mut fine = flat_run(0.5, 5, 10.0);
        fine.points[2].numerical.b = f64::NAN;
        assert!(differs_significantly(&coarse, &fine, 0.5));
    }
}
