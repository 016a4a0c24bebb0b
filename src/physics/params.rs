//! Decay chain parameters and species counts
//!
//! This module defines the two value types shared by every solver:
//! - `DecayParameters`: the immutable description of one run
//! - `SpeciesCounts`: the atom counts of A, B and C at one instant

use nalgebra::Vector3;

use crate::error::DecayError;

// =================================================================================================
// Species Counts
// =================================================================================================

/// Atom counts of the three species at one instant
///
/// Replaces positional `(N_A, N_B, N_C)` tuples with named fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeciesCounts {
    /// N_A (atoms)
    pub a: f64,

    /// N_B (atoms)
    pub b: f64,

    /// N_C (atoms)
    pub c: f64,
}

impl SpeciesCounts {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// N_A + N_B + N_C
    pub fn total(&self) -> f64 {
        self.a + self.b + self.c
    }

    /// Counts as a column vector `[N_A, N_B, N_C]`
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// `true` if any count is below zero
    ///
    /// Only the Euler scheme can produce this, when Δt·λ exceeds 1.
    pub fn has_negative(&self) -> bool {
        self.a < 0.0 || self.b < 0.0 || self.c < 0.0
    }
}

impl From<Vector3<f64>> for SpeciesCounts {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

// =================================================================================================
// Decay Parameters
// =================================================================================================

/// Parameters of one A → B → C simulation run
///
/// Created once from the input file (or derived from a previous run by halving the time
/// step) and read-only afterwards.
///
/// # Example
///
/// ```rust
/// use decay_rs::physics::DecayParameters;
///
/// let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 1.0, 50.0);
/// params.validate().unwrap();
///
/// assert_eq!(params.size(), 51);
/// assert_eq!(params.with_halved_time_step().time_step, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayParameters {
    /// λ_A (s⁻¹)
    pub lambda_a: f64,

    /// λ_B (s⁻¹)
    pub lambda_b: f64,

    /// N_A at t = 0
    pub initial_a: f64,

    /// N_B at t = 0
    pub initial_b: f64,

    /// N_C at t = 0
    pub initial_c: f64,

    /// Δt (s)
    pub time_step: f64,

    /// t_final (s)
    pub final_time: f64,
}

impl DecayParameters {
    pub fn new(
        lambda_a: f64,
        lambda_b: f64,
        initial_a: f64,
        initial_b: f64,
        initial_c: f64,
        time_step: f64,
        final_time: f64,
    ) -> Self {
        Self {
            lambda_a,
            lambda_b,
            initial_a,
            initial_b,
            initial_c,
            time_step,
            final_time,
        }
    }

    /// Check that every field is in its valid range
    ///
    /// # Errors
    ///
    /// - [`DecayError::EqualDecayConstants`] when λ_A = λ_B
    /// - [`DecayError::InvalidParameter`] for any other out-of-range field
    pub fn validate(&self) -> Result<(), DecayError> {
        for (name, lambda) in [("A", self.lambda_a), ("B", self.lambda_b)] {
            if !lambda.is_finite() || lambda <= 0.0 {
                return Err(DecayError::InvalidParameter(format!(
                    "decay constant of {} must be positive, got {}",
                    name, lambda
                )));
            }
        }

        if self.lambda_a == self.lambda_b {
            return Err(DecayError::EqualDecayConstants(self.lambda_a));
        }

        for (name, count) in [
            ("A", self.initial_a),
            ("B", self.initial_b),
            ("C", self.initial_c),
        ] {
            if !count.is_finite() || count < 0.0 {
                return Err(DecayError::InvalidParameter(format!(
                    "initial count of {} must be non-negative, got {}",
                    name, count
                )));
            }
        }

        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(DecayError::InvalidParameter(format!(
                "time delta must be positive, got {}",
                self.time_step
            )));
        }

        if !self.final_time.is_finite() || self.final_time < self.time_step {
            return Err(DecayError::InvalidParameter(format!(
                "final time ({}) must be at least the time delta ({})",
                self.final_time, self.time_step
            )));
        }

        Ok(())
    }

    /// Counts at t = 0
    pub fn initial_counts(&self) -> SpeciesCounts {
        SpeciesCounts::new(self.initial_a, self.initial_b, self.initial_c)
    }

    /// N_A0 + N_B0 + N_C0
    pub fn initial_total(&self) -> f64 {
        self.initial_a + self.initial_b + self.initial_c
    }

    /// Number of time points: floor(t_final / Δt) + 1
    pub fn size(&self) -> usize {
        (self.final_time / self.time_step).floor() as usize + 1
    }

    /// Same parameters with Δt halved
    pub fn with_halved_time_step(&self) -> Self {
        Self {
            time_step: self.time_step / 2.0,
            ..*self
        }
    }

    /// Largest of Δt·λ_A and Δt·λ_B
    ///
    /// Above 1 the Euler step removes more atoms than a species holds.
    pub fn stiffness(&self) -> f64 {
        self.time_step * self.lambda_a.max(self.lambda_b)
    }
}

// =================================================================================================
// Peak Record
// =================================================================================================

/// How a peak of N_B was located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakKind {
    /// Solution of dN_B/dt = 0, or the largest sample of a numerical run
    Interior,

    /// N_B has no interior maximum; the record holds N_B0 at t = 0
    Boundary,
}

/// Maximum of N_B: its value and the time it occurs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakRecord {
    /// N_B at the peak (atoms)
    pub value: f64,

    /// Time of the peak (s)
    pub time: f64,

    pub kind: PeakKind,
}

impl PeakRecord {
    pub fn interior(value: f64, time: f64) -> Self {
        Self {
            value,
            time,
            kind: PeakKind::Interior,
        }
    }

    /// "No peak": N_B0 at t = 0
    pub fn at_start(params: &DecayParameters) -> Self {
        Self {
            value: params.initial_b,
            time: 0.0,
            kind: PeakKind::Boundary,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
