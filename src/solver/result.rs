//! Simulation results
//!
//! A [`Run`] is one full execution at a fixed Δt: its parameters, one
//! [`SimulationPoint`] per time step, and the two N_B peaks. Once built it is an
//! immutable snapshot.

use crate::physics::{DecayParameters, PeakRecord, SpeciesCounts};

/// One row of output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationPoint {
    /// t = step · Δt (s)
    pub time: f64,

    /// Closed-form counts at `time`
    pub analytical: SpeciesCounts,

    /// Euler counts at `time`
    pub numerical: SpeciesCounts,

    /// N_A + N_B + N_C of the Euler counts
    pub numerical_total: f64,
}

impl SimulationPoint {
    /// Point at t = 0: both solutions equal the initial counts
    pub fn initial(params: &DecayParameters) -> Self {
        let counts = params.initial_counts();
        Self {
            time: 0.0,
            analytical: counts,
            numerical: counts,
            numerical_total: params.initial_total(),
        }
    }
}

/// One complete simulation at a fixed time step
#[derive(Debug, Clone)]
pub struct Run {
    /// Parameters of this run
    pub params: DecayParameters,

    /// Points indexed by step number 0..size
    pub points: Vec<SimulationPoint>,

    /// Peak of N_B from dN_B/dt = 0
    pub analytical_peak: PeakRecord,

    /// Largest numerical N_B sample
    pub numerical_peak: PeakRecord,

    /// Times Δt was halved from the input value (0 for the first run)
    pub refinement: usize,
}

impl Run {
    /// Number of time points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Δt of this run
    pub fn time_step(&self) -> f64 {
        self.params.time_step
    }

    /// Time column
    pub fn time_points(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Last point of the run
    pub fn final_point(&self) -> Option<&SimulationPoint> {
        self.points.last()
    }

    /// Evenly sampled subset of at most `max_points` points
    ///
    /// Index `j` of the result is `round(j·(n−1)/(max_points−1))`, so the first and last
    /// points are always included. Runs that already fit are returned whole.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decay_rs::physics::DecayParameters;
    /// use decay_rs::solver::SimulationRunner;
    ///
    /// let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 0.01, 100.0);
    /// let run = SimulationRunner::euler().run(&params)?;
    ///
    /// let sampled = run.downsample(400);
    /// assert_eq!(sampled.len(), 400);
    /// assert_eq!(sampled.last().unwrap().time, run.final_point().unwrap().time);
    /// # Ok::<(), decay_rs::DecayError>(())
    /// ```
    pub fn downsample(&self, max_points: usize) -> Vec<SimulationPoint> {
        let n = self.points.len();
        if n <= max_points || max_points < 2 {
            return self.points.clone();
        }

        let scale = (n - 1) as f64 / (max_points - 1) as f64;
        (0..max_points)
            .map(|j| self.points[(j as f64 * scale).round() as usize])
            .collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PeakRecord;

    fn synthetic_run(n: usize) -> Run {
        let params = DecayParameters::new(0.1, 0.05, 1.0, 0.0, 0.0, 1.0, (n - 1) as f64);
        let points = (0..n)
            .map(|i| SimulationPoint {
                time: i as f64,
                ..SimulationPoint::initial(&params)
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
    fn test_initial_point() {
        let params = DecayParameters::new(0.1, 0.05, 10.0, 20.0, 30.0, 1.0, 5.0);
        let point = SimulationPoint::initial(&params);

        assert_eq!(point.time, 0.0);
        assert_eq!(point.analytical, point.numerical);
        assert_eq!(point.numerical_total, 60.0);
    }

    #[test]
    fn test_downsample_short_run_unchanged() {
        let run = synthetic_run(10);
        assert_eq!(run.downsample(400).len(), 10);
    }

    #[test]
    fn test_downsample_includes_endpoints() {
        let run = synthetic_run(1001);
        let sampled = run.downsample(400);

        assert_eq!(sampled.len(), 400);
        assert_eq!(sampled[0].time, 0.0);
        assert_eq!(sampled[399].time, 1000.0);

        // Strictly increasing: no index is picked twice when n > max_points
        assert!(sampled.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_accessors() {
        let run = synthetic_run(5);
        assert_eq!(run.len(), 5);
        assert!(!run.is_empty());
        assert_eq!(run.time_step(), 1.0);
        assert_eq!(run.time_points(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(run.final_point().unwrap().time, 4.0);
    }
}
