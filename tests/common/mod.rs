//! Common utilities for integration tests

pub mod mock_integrators;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_integrators::ExactStepIntegrator;
pub use test_helpers::{
    fast_chain,
    max_numerical_error,
    relative_error,
    standard_chain,
    write_session,
    INPUT_TEXT,
    SETTINGS_TEXT,
};
