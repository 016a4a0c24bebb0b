//! Error types
//!
//! Every fallible operation of the crate returns [`DecayError`]. The variants fall into
//! two families:
//!
//! - **Domain errors**: the mathematics is undefined for the given parameters
//!   (equal decay constants, no interior maximum of N_B).
//! - **Configuration errors**: an input or settings file is malformed, or a validated
//!   record holds an out-of-range value.
//!
//! All configuration errors are detected before a simulation starts and abort it.
//! Numerical instability of the Euler scheme is *not* an error.

use thiserror::Error;

/// Crate-level error
#[derive(Debug, Error)]
pub enum DecayError {
    /// λ_A = λ_B: the closed-form solution divides by λ_B − λ_A
    #[error("decay constants of A and B must differ (both are {0} /s)")]
    EqualDecayConstants(f64),

    /// dN_B/dt = 0 has no solution after t = 0
    #[error("N(B) has no maximum after t = 0 (logarithm argument is {argument})")]
    NoInteriorPeak { argument: f64 },

    /// A parameter is outside its valid range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A line of a key-value file could not be parsed
    #[error("Error in line {line} of {source_name}.txt, {message}")]
    Config {
        source_name: String,
        line: usize,
        message: String,
    },

    /// A required entry is absent from a key-value file
    #[error("{source_name}.txt is missing the \"{key}\" entry")]
    MissingEntry { source_name: String, key: String },

    /// A report file could not be read back
    #[error("malformed report {path}: {message}")]
    Report { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecayError {
    /// Build a [`DecayError::Config`] for `line` of the file named `source_name`
    pub fn config(source_name: &str, line: usize, message: impl Into<String>) -> Self {
        Self::Config {
            source_name: source_name.to_string(),
            line,
            message: message.into(),
        }
    }

    /// `true` when the mathematics is undefined for the parameters
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            DecayError::EqualDecayConstants(_) | DecayError::NoInteriorPeak { .. }
        )
    }

    /// `true` for malformed or out-of-range configuration
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            DecayError::InvalidParameter(_)
                | DecayError::Config { .. }
                | DecayError::MissingEntry { .. }
        )
    }
}
