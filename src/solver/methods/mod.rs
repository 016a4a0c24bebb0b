//! Numerical methods for advancing the decay chain
//!
//! This module contains concrete implementations of the
//! [`NumericalIntegrator`](crate::solver::NumericalIntegrator) trait.
//!
//! # Available Methods
//!
//! - **[`EulerIntegrator`]**: Forward Euler method
//!   - Order: First-order O(Δt)
//!   - Cost: 1 rate evaluation per step
//!   - Halving Δt roughly halves the error, which is what the convergence loop relies on

pub mod euler;

pub use euler::EulerIntegrator;
