//! Helper functions for integration tests

use std::fs;
use std::path::Path;

use decay_rs::physics::DecayParameters;
use decay_rs::solver::Run;

/// Chain used throughout the documentation: λ_A = 0.1 /s, λ_B = 0.05 /s, 1000 atoms of A
pub fn standard_chain(time_step: f64, final_time: f64) -> DecayParameters {
    DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, time_step, final_time)
}

/// Fast chain: λ_A = 1 /s, λ_B = 0.5 /s, 100 atoms of A
pub fn fast_chain(time_step: f64, final_time: f64) -> DecayParameters {
    DecayParameters::new(1.0, 0.5, 100.0, 0.0, 0.0, time_step, final_time)
}

/// Largest |numerical − analytical| over every species and point of `run`
pub fn max_numerical_error(run: &Run) -> f64 {
    run.points
        .iter()
        .map(|p| (p.numerical.as_vector() - p.analytical.as_vector()).amax())
        .fold(0.0, f64::max)
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// `input.txt` describing the standard chain over 50 s with Δt = 1 s
pub const INPUT_TEXT: &str = "\
# Standard chain
Decay Rate A = half-life, 6.931471805599453, s
Decay Rate B = decay constant, 3, m
Initial Count A = 1000,
Initial Count B = 0,
Initial Count C = 0,
Time Delta = 1, s
Final Time = 50, s
";

/// `settings.txt` with refinement at 0.5 % and no graphs
pub const SETTINGS_TEXT: &str = "\
Run Main = True
Generate Reference Graphs = False
Run Multiple = True
Percent of Total = 0.5, %
Plot = False
User Input for Plotting = False
Image 1 Name = NB_vs_t
Image 2 Name = numerical
Image 3 Name = peak_vs_dt
Coarse Data Number = 0
Medium Data Number = 1
Fine Data Number = 2
Data Numbers = 0, 1, 2, 3
";

/// Write `input.txt` and `settings.txt` into `dir`
pub fn write_session(dir: &Path, input: &str, settings: &str) {
    fs::write(dir.join("input.txt"), input).unwrap();
    fs::write(dir.join("settings.txt"), settings).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
