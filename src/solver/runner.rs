//! Lockstep simulation of both solvers
//!
//! # Algorithm
//!
//! For a run with `size = floor(t_final/Δt) + 1` points:
//!
//! 1. Point 0 holds the initial counts for both solutions.
//! 2. For each step i = 1, 2, ..., size - 1:
//!    - analytical counts are evaluated directly at t = i·Δt
//!    - numerical counts are one Euler step from point i - 1
//! 3. The numerical peak is the largest N_B sample (first one on ties).
//! 4. The analytical peak solves dN_B/dt = 0.
//!
//! The asymmetry is deliberate: analytical values never accumulate error,
//! numerical values do.

use log::{info, warn};

use crate::error::DecayError;
use crate::physics::{AnalyticalSolver, DecayParameters, PeakKind, PeakRecord};
use crate::solver::{EulerIntegrator, NumericalIntegrator, Run, SimulationPoint};

/// Runs the analytical solver and a numerical integrator side by side
///
/// # Example
///
/// ```rust
/// use decay_rs::physics::DecayParameters;
/// use decay_rs::solver::SimulationRunner;
///
/// let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 1.0, 50.0);
/// let run = SimulationRunner::euler().run(&params)?;
///
/// assert_eq!(run.len(), 51);
/// assert_eq!(run.numerical_peak.time, 13.0);
/// # Ok::<(), decay_rs::DecayError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationRunner<I: NumericalIntegrator = EulerIntegrator> {
    analytical: AnalyticalSolver,
    integrator: I,
}

impl SimulationRunner<EulerIntegrator> {
    /// Runner using the forward Euler scheme
    pub fn euler() -> Self {
        Self::new(EulerIntegrator::new())
    }
}

impl<I: NumericalIntegrator> SimulationRunner<I> {
    pub fn new(integrator: I) -> Self {
        Self {
            analytical: AnalyticalSolver::new(),
            integrator,
        }
    }

    /// Name of the numerical scheme
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    /// Simulate from t = 0 to t_final at `params.time_step`
    ///
    /// # Errors
    ///
    /// Any validation error of `params`. A missing interior maximum of N_B is **not** an
    /// error: the analytical peak falls back to N_B0 at t = 0 with
    /// [`PeakKind::Boundary`](crate::physics::PeakKind::Boundary).
    pub fn run(&self, params: &DecayParameters) -> Result<Run, DecayError> {
        // ====== Step 1: Validation ======

        params.validate()?;

        if params.stiffness() > 1.0 {
            warn!(
                "Δt·λ = {:.3} exceeds 1 at Δt = {} s: {} counts may become negative",
                params.stiffness(),
                params.time_step,
                self.integrator.name()
            );
        }

        // ====== Step 2: Setup ======

        let size = params.size();
        let mut points = Vec::with_capacity(size);
        points.push(SimulationPoint::initial(params));

        // ====== Step 3: Lockstep integration ======

        for step in 1..size {
            // Time from the index, not by accumulating Δt
            let time = step as f64 * params.time_step;

            let analytical = self.analytical.evaluate(params, time)?;
            let numerical = self.integrator.step(params, &points[step - 1].numerical);

            points.push(SimulationPoint {
                time,
                analytical,
                numerical,
                numerical_total: numerical.total(),
            });
        }

        // ====== Step 4: Peaks ======

        let numerical_peak = find_numerical_peak(&points)
            .unwrap_or_else(|| PeakRecord::at_start(params));

        let analytical_peak = match self.analytical.find_analytical_peak(params) {
            Ok(peak) => peak,
            Err(DecayError::NoInteriorPeak { argument }) => {
                warn!(
                    "N(B) has no maximum after t = 0 (log argument {}); reporting N(B0) at t = 0",
                    argument
                );
                PeakRecord::at_start(params)
            }
            Err(other) => return Err(other),
        };

        info!(
            "{} run at Δt = {} s: {} points, analytical max N(B) {} at t = {} s, numerical {} at t = {} s",
            self.integrator.name(),
            params.time_step,
            points.len(),
            analytical_peak.value,
            analytical_peak.time,
            numerical_peak.value,
            numerical_peak.time
        );

        Ok(Run {
            params: *params,
            points,
            analytical_peak,
            numerical_peak,
            refinement: 0,
        })
    }
}

/// Point with the largest numerical N_B
///
/// Ties keep the earliest point. A maximum at the first point is a
/// [`PeakKind::Boundary`] peak. Returns `None` for an empty slice.
pub fn find_numerical_peak(points: &[SimulationPoint]) -> Option<PeakRecord> {
    let mut best: Option<(usize, &SimulationPoint)> = None;

    for (index, point) in points.iter().enumerate() {
        match best {
            Some((_, current)) if point.numerical.b <= current.numerical.b => {}
            _ => best = Some((index, point)),
        }
    }

    best.map(|(index, p)| PeakRecord {
        value: p.numerical.b,
        time: p.time,
        kind: if index == 0 { PeakKind::Boundary } else { PeakKind::Interior },
    })
}

// =================================================================================================
// Tests
// =================================================================================================
