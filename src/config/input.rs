//! Input file: the seven decay chain parameters
//!
//! ```text
//! Decay Rate A = half-life, 10, s
//! Decay Rate B = mean lifetime, 20, s
//! Initial Count A = 1000,
//! Initial Count B = 0,
//! Initial Count C = 0,
//! Time Delta = 1, s
//! Final Time = 100, s
//! ```
//!
//! A decay rate is given as `half-life`, `decay constant` or `mean lifetime`, each
//! followed by a value and a time unit. Counts take an optional `mol` unit.

use std::f64::consts::LN_2;
use std::path::Path;

use crate::config::reader::{Entry, KeyValueFile};
use crate::error::DecayError;
use crate::physics::DecayParameters;

const SOURCE: &str = "input";

const DECAY_RATE_A: &str = "Decay Rate A";
const DECAY_RATE_B: &str = "Decay Rate B";
const INITIAL_COUNT_A: &str = "Initial Count A";
const INITIAL_COUNT_B: &str = "Initial Count B";
const INITIAL_COUNT_C: &str = "Initial Count C";
const TIME_DELTA: &str = "Time Delta";
const FINAL_TIME: &str = "Final Time";

const KNOWN: [&str; 7] = [
    DECAY_RATE_A,
    DECAY_RATE_B,
    INITIAL_COUNT_A,
    INITIAL_COUNT_B,
    INITIAL_COUNT_C,
    TIME_DELTA,
    FINAL_TIME,
];

/// Read and validate the input file at `path`
pub fn read_input(path: &Path) -> Result<DecayParameters, DecayError> {
    let file = KeyValueFile::load(path, SOURCE, &[])?;
    parse_input(&file)
}

/// Build validated parameters from an already parsed input file
pub fn parse_input(file: &KeyValueFile) -> Result<DecayParameters, DecayError> {
    file.reject_unknown(&KNOWN)?;

    let params = DecayParameters {
        lambda_a: decay_constant(file, file.require(DECAY_RATE_A, Some(3))?)?,
        lambda_b: decay_constant(file, file.require(DECAY_RATE_B, Some(3))?)?,
        initial_a: count(file, file.require(INITIAL_COUNT_A, Some(2))?)?,
        initial_b: count(file, file.require(INITIAL_COUNT_B, Some(2))?)?,
        initial_c: count(file, file.require(INITIAL_COUNT_C, Some(2))?)?,
        time_step: time(file, file.require(TIME_DELTA, Some(2))?)?,
        final_time: time(file, file.require(FINAL_TIME, Some(2))?)?,
    };

    params.validate()?;
    Ok(params)
}

/// λ in s⁻¹ from `kind, value, unit`
fn decay_constant(file: &KeyValueFile, entry: &Entry) -> Result<f64, DecayError> {
    let value = file.float(entry, 1)?;
    let unit = file.time_unit(entry, 2)?.seconds();

    match entry.args[0].as_str() {
        "half-life" => Ok(LN_2 / value / unit),
        "decayconstant" => Ok(value / unit),
        "meanlifetime" => Ok(1.0 / value / unit),
        _ => Err(file.error(
            entry,
            "expected \"half-life\", \"decay constant\", or \"mean lifetime\" as the first argument",
        )),
    }
}

fn count(file: &KeyValueFile, entry: &Entry) -> Result<f64, DecayError> {
    Ok(file.float(entry, 0)? * file.count_unit(entry, 1)?.atoms())
}

/// Time in seconds from `value, unit`
fn time(file: &KeyValueFile, entry: &Entry) -> Result<f64, DecayError> {
    Ok(file.float(entry, 0)? * file.time_unit(entry, 1)?.seconds())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::AVOGADRO;
    use approx::assert_relative_eq;

    const INPUT: &str = "\
# Chain used in the reference graphs
Decay Rate A = half-life, 6.931471805599453, s
Decay Rate B = Decay Constant, 3, m
Initial Count A = 1000,
Initial Count B = 0.5, mol
Initial Count C = 0,
Time Delta = 1, s
Final Time = 2, m
";

    fn parse(text: &str) -> Result<DecayParameters, DecayError> {
        parse_input(&KeyValueFile::parse(text, SOURCE, &[])?)
    }

    #[test]
    fn test_parse_input() {
        let params = parse(INPUT).unwrap();

        assert_relative_eq!(params.lambda_a, 0.1, max_relative = 1e-12);
        assert_eq!(params.lambda_b, 0.05);
        assert_eq!(params.initial_a, 1000.0);
        assert_eq!(params.initial_b, 0.5 * AVOGADRO);
        assert_eq!(params.initial_c, 0.0);
        assert_eq!(params.time_step, 1.0);
        assert_eq!(params.final_time, 120.0);
    }

    #[test]
    fn test_mean_lifetime() {
        let text = INPUT.replace("Decay Constant, 3, m", "mean lifetime, 2, h");
        let params = parse(&text).unwrap();
        assert_eq!(params.lambda_b, 1.0 / 2.0 / 3600.0);
    }

    #[test]
    fn test_unknown_rate_kind() {
        let text = INPUT.replace("half-life", "lifetime");
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, DecayError::Config { line: 2, .. }));
    }

    #[test]
    fn test_bad_unit_and_count() {
        let text = INPUT.replace("Time Delta = 1, s", "Time Delta = 1, sec");
        assert!(matches!(parse(&text).unwrap_err(), DecayError::Config { line: 7, .. }));

        let text = INPUT.replace("Initial Count A = 1000,", "Initial Count A = 1000");
        assert!(matches!(parse(&text).unwrap_err(), DecayError::Config { line: 4, .. }));
    }

    #[test]
    fn test_missing_entry() {
        let text = INPUT.replace("Final Time = 2, m\n", "");
        assert!(matches!(parse(&text).unwrap_err(), DecayError::MissingEntry { .. }));
    }

    #[test]
    fn test_equal_rates_rejected_before_simulation() {
        let text = INPUT.replace("half-life, 6.931471805599453, s", "decay constant, 3, m");
        assert!(parse(&text).unwrap_err().is_domain());
    }
}
