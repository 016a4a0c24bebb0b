//! Fixed-width text report of one run
//!
//! Every completed run is written to `outputN.txt`:
//!
//! ```text
//! Input Data
//! ----------
//!
//! Decay Rate A = 0.1 /s
//! ...
//! Final Time = 50 s
//!
//!
//! Output Data
//! -----------
//!
//! Max N(B)
//! --------
//! Analytical : 500.0 at t = 13.862943611198906 s
//! Numerical  : 518.3110008932103 at t = 13 s
//!
//! Time                      Analytical                                             Numerical
//! (s)          N (A)     |    N (B)     |    N (C)              N (A)     |    N (B)     |    N (C)     |  N (total)
//! ----     --------------|--------------|--------------     --------------|--------------|--------------|--------------
//!    0     1000          |0             |0                  1000          |0             |0             |1000
//! ```
//!
//! Counts in the table are written with nine significant digits in the `%G`
//! style (`1.23456789E+23`, trailing zeros dropped). Header values use the
//! shortest representation that reads back to the same `f64`.
//!
//! [`read_report`] parses the same layout back into a [`ReportData`], which is
//! what the final comparison graphs are drawn from.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::DecayError;
use crate::physics::{DecayParameters, PeakKind, PeakRecord, SpeciesCounts};
use crate::solver::{Run, SimulationPoint};

/// Width of every count column
const COUNT_WIDTH: usize = 14;

/// Gap between the time column and each solution block
const GAP: &str = "     ";

/// Significant digits of tabulated counts
const SIGNIFICANT_DIGITS: usize = 9;

/// Line (1-based) of the first table row
const FIRST_ROW_LINE: usize = 24;

/// Contents of a report file read back from disk
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub params: DecayParameters,
    pub analytical_peak: PeakRecord,
    pub numerical_peak: PeakRecord,

    /// Table rows; empty when read with [`read_report_header`]
    pub points: Vec<SimulationPoint>,
}

impl ReportData {
    pub fn time_step(&self) -> f64 {
        self.params.time_step
    }
}

impl From<&Run> for ReportData {
    fn from(run: &Run) -> Self {
        Self {
            params: run.params,
            analytical_peak: run.analytical_peak,
            numerical_peak: run.numerical_peak,
            points: run.points.clone(),
        }
    }
}

// =================================================================================================
// Writer
// =================================================================================================

/// Write the report of `run` to `path`, replacing any existing file
pub fn write_report(run: &Run, path: &Path) -> Result<(), DecayError> {
    fs::write(path, render_report(run))?;
    Ok(())
}

/// Report text of `run`
pub fn render_report(run: &Run) -> String {
    let params = &run.params;
    // Halving always leaves a fractional Δt, even 2 s → 1.0 s
    let whole = run.refinement == 0 && params.time_step.fract() == 0.0;
    let width = time_width(params, whole);
    let mut out = String::new();

    // `fmt::Write` for `String` cannot fail
    let _ = write!(
        out,
        "Input Data\n----------\n\n\
         Decay Rate A = {} /s\n\
         Decay Rate B = {} /s\n\
         Initial Count A = {}\n\
         Initial Count B = {}\n\
         Initial Count C = {}\n\
         Time Delta = {} s\n\
         Final Time = {} s\n\n\n",
        format_shortest(params.lambda_a),
        format_shortest(params.lambda_b),
        format_shortest(params.initial_a),
        format_shortest(params.initial_b),
        format_shortest(params.initial_c),
        format_time(params.time_step, whole),
        format_time(params.final_time, params.final_time.fract() == 0.0),
    );

    let _ = write!(
        out,
        "Output Data\n-----------\n\n\
         Max N(B)\n--------\n\
         Analytical : {} at t = {} s\n\
         Numerical  : {} at t = {} s\n\n",
        format_shortest(run.analytical_peak.value),
        format_shortest(run.analytical_peak.time),
        format_shortest(run.numerical_peak.value),
        format_time(run.numerical_peak.time, whole),
    );

    let _ = writeln!(
        out,
        "{:^width$}{GAP}{:^44}   {:^59}",
        "Time", "Analytical", "Numerical"
    );
    let _ = writeln!(
        out,
        "{:^width$}{GAP}{a:^14}|{b:^14}|{c:^14}{GAP}{a:^14}|{b:^14}|{c:^14}|{t:^14}",
        "(s)",
        a = "N (A)",
        b = "N (B)",
        c = "N (C)",
        t = "N (total)",
    );

    let dashes = "-".repeat(COUNT_WIDTH);
    let _ = writeln!(
        out,
        "{}{GAP}{d}|{d}|{d}{GAP}{d}|{d}|{d}|{d}",
        "-".repeat(width),
        d = dashes,
    );

    for point in &run.points {
        let g = |v: f64| format_general(v, SIGNIFICANT_DIGITS);
        let _ = writeln!(
            out,
            "{:>width$}{GAP}{:<14}|{:<14}|{:<14}{GAP}{:<14}|{:<14}|{:<14}|{:<14}",
            format_time(point.time, whole),
            g(point.analytical.a),
            g(point.analytical.b),
            g(point.analytical.c),
            g(point.numerical.a),
            g(point.numerical.b),
            g(point.numerical.c),
            g(point.numerical_total),
        );
    }

    out
}

/// Width of the time column
///
/// Whole times need the integer digits of t_final. Fractional times need the written
/// length of Δt plus those digits. Never narrower than the `Time` header.
fn time_width(params: &DecayParameters, whole: bool) -> usize {
    let width = if whole {
        integer_digits(params.final_time)
    } else {
        format_shortest(params.time_step).len() + integer_digits(params.final_time)
    };
    width.max(4)
}

fn integer_digits(value: f64) -> usize {
    if value >= 1.0 {
        value.log10().floor() as usize + 1
    } else {
        0
    }
}

/// Times are written as integers while Δt is the whole input value
fn format_time(time: f64, whole: bool) -> String {
    if whole && time.fract() == 0.0 {
        format!("{}", time)
    } else {
        format_shortest(time)
    }
}

/// Shortest round-trip representation, always with a decimal point or an exponent
///
/// Values below 1e-4 or from 1e16 upwards use an exponent (`6.0221408e+23`).
pub fn format_shortest(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value).to_lowercase();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        let text = format!("{}", value);
        if text.contains('.') { text } else { format!("{}.0", text) }
    } else {
        let text = format!("{:e}", value);
        match text.split_once('e') {
            Some((mantissa, exponent)) => with_exponent(mantissa, exponent, 'e'),
            None => text,
        }
    }
}

/// `%G` style: `precision` significant digits, trailing zeros removed
///
/// Fixed notation is used while the decimal exponent lies in `-4..precision`,
/// otherwise `d.dddE+XX`.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);

    // Rounding to `precision` digits may carry into the next decade (9.99… → 1.00E+01)
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exp) = exponent.parse::<i32>() else {
        return scientific;
    };

    if (-4..precision as i32).contains(&exp) {
        let decimals = (precision as i32 - 1 - exp) as usize;
        strip_zeros(&format!("{:.*}", decimals, value)).to_string()
    } else {
        with_exponent(strip_zeros(mantissa), exponent, 'E')
    }
}

/// `1.5`, `"-7"` → `1.5E-07`
fn with_exponent(mantissa: &str, exponent: &str, marker: char) -> String {
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}{}{}{:0>2}", mantissa, marker, sign, digits)
}

fn strip_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

// =================================================================================================
// Reader
// =================================================================================================

/// Read a report written by [`write_report`]
pub fn read_report(path: &Path) -> Result<ReportData, DecayError> {
    let text = fs::read_to_string(path)?;
    parse_report(&text, &path.display().to_string(), true)
}

/// Read only the input data and peaks of a report
pub fn read_report_header(path: &Path) -> Result<ReportData, DecayError> {
    let text = fs::read_to_string(path)?;
    parse_report(&text, &path.display().to_string(), false)
}

/// Parse report text; `path` only labels errors
pub fn parse_report(text: &str, path: &str, with_points: bool) -> Result<ReportData, DecayError> {
    let lines: Vec<&str> = text.lines().collect();
    let malformed = |line: usize, message: &str| DecayError::Report {
        path: path.to_string(),
        message: format!("line {}: {}", line, message),
    };
    let line_at = |line: usize| lines.get(line - 1).copied().ok_or_else(|| malformed(line, "missing"));

    // Lines 4 to 10: `Name = value unit`
    let mut inputs = [0.0; 7];
    for (offset, input) in inputs.iter_mut().enumerate() {
        let line = 4 + offset;
        let value = line_at(line)?
            .split_once(" = ")
            .map(|(_, value)| value.trim_end_matches(" /s").trim_end_matches(" s"))
            .ok_or_else(|| malformed(line, "expected \"Name = value\""))?;
        *input = parse_number(value).ok_or_else(|| malformed(line, "expected a number"))?;
    }
    let [lambda_a, lambda_b, initial_a, initial_b, initial_c, time_step, final_time] = inputs;
    let params = DecayParameters::new(lambda_a, lambda_b, initial_a, initial_b, initial_c, time_step, final_time);

    let peak = |line: usize| -> Result<PeakRecord, DecayError> {
        let (value, time) = line_at(line)?
            .split_once(" : ")
            .and_then(|(_, rest)| rest.split_once(" at t = "))
            .ok_or_else(|| malformed(line, "expected \"{value} at t = {time} s\""))?;

        let value = parse_number(value).ok_or_else(|| malformed(line, "expected a peak value"))?;
        let time = parse_number(time.trim_end_matches(" s")).ok_or_else(|| malformed(line, "expected a peak time"))?;

        let kind = if time == 0.0 && value == initial_b {
            PeakKind::Boundary
        } else {
            PeakKind::Interior
        };
        Ok(PeakRecord { value, time, kind })
    };
    let analytical_peak = peak(18)?;
    let numerical_peak = peak(19)?;

    let mut points = Vec::new();
    if with_points {
        for (index, row) in lines.iter().enumerate().skip(FIRST_ROW_LINE - 1) {
            if row.trim().is_empty() {
                continue;
            }
            points.push(parse_row(row).ok_or_else(|| malformed(index + 1, "expected 8 numeric columns"))?);
        }
    }

    Ok(ReportData {
        params,
        analytical_peak,
        numerical_peak,
        points,
    })
}

fn parse_row(row: &str) -> Option<SimulationPoint> {
    let row = row.replace('|', " ");
    let values = row
        .split_whitespace()
        .map(parse_number)
        .collect::<Option<Vec<f64>>>()?;

    let [time, aa, ab, ac, na, nb, nc, total] = values.as_slice() else {
        return None;
    };

    Some(SimulationPoint {
        time: *time,
        analytical: SpeciesCounts::new(*aa, *ab, *ac),
        numerical: SpeciesCounts::new(*na, *nb, *nc),
        numerical_total: *total,
    })
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SimulationRunner;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    fn sample_run(time_step: f64) -> Run {
        let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, time_step, 20.0);
        SimulationRunner::euler().run(&params).unwrap()
    }

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(1000.0, 9), "1000");
        assert_eq!(format_general(0.5, 9), "0.5");
        assert_eq!(format_general(904.837418035959, 9), "904.837418");
        assert_eq!(format_general(123456789.4, 9), "123456789");
        assert_eq!(format_general(1234567890.0, 9), "1.23456789E+09");
        assert_eq!(format_general(6.0221408e23, 9), "6.0221408E+23");
        assert_eq!(format_general(0.0001, 9), "0.0001");
        assert_eq!(format_general(0.00001234, 9), "1.234E-05");
        assert_eq!(format_general(-1000.0, 9), "-1000");
        assert_eq!(format_general(999999999.7, 9), "1E+09");
        assert_eq!(format_general(0.0, 9), "0");
        assert_eq!(format_general(f64::NAN, 9), "NAN");
    }

    #[test]
    fn test_format_shortest() {
        assert_eq!(format_shortest(1000.0), "1000.0");
        assert_eq!(format_shortest(0.1), "0.1");
        assert_eq!(format_shortest(0.0), "0.0");
        assert_eq!(format_shortest(3.0110704e23), "3.0110704e+23");
        assert_eq!(format_shortest(1e-5), "1e-05");
        assert_eq!(format_shortest(-2.5), "-2.5");
    }

    #[test]
    fn test_time_width() {
        let mut params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 1.0, 100.0);
        assert_eq!(time_width(&params, true), 4);

        // "1.0" plus three digits of 100
        assert_eq!(time_width(&params, false), 6);

        params.final_time = 123_456.0;
        assert_eq!(time_width(&params, true), 6);

        // "0.25" plus three digits of 100
        params.time_step = 0.25;
        params.final_time = 100.0;
        assert_eq!(time_width(&params, false), 7);

        params.final_time = 0.5;
        assert_eq!(time_width(&params, false), 4);
    }

    #[test]
    fn test_render_layout() {
        let run = sample_run(1.0);
        let text = render_report(&run);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Input Data");
        assert_eq!(lines[3], "Decay Rate A = 0.1 /s");
        assert_eq!(lines[5], "Initial Count A = 1000.0");
        assert_eq!(lines[8], "Time Delta = 1 s");
        assert_eq!(lines[9], "Final Time = 20 s");
        assert_eq!(lines[12], "Output Data");
        assert!(lines[17].starts_with("Analytical : "));
        assert!(lines[18].starts_with("Numerical  : "));
        assert!(lines[18].ends_with(" at t = 13 s"));

        assert_eq!(lines[22], "----     --------------|--------------|--------------     --------------|--------------|--------------|--------------");
        assert_eq!(
            lines[23],
            "   0     1000          |0             |0                  1000          |0             |0             |1000          "
        );
        assert_eq!(lines.len(), 23 + run.len());
    }

    #[test]
    fn test_fractional_time_column() {
        let text = render_report(&sample_run(0.5));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[8], "Time Delta = 0.5 s");
        assert!(lines[23].starts_with("  0.0     "));
        assert!(lines[24].starts_with("  0.5     "));
    }

    #[test]
    fn test_halved_whole_time_step_is_written_fractional() {
        let mut run = sample_run(1.0);
        run.refinement = 1;
        let text = render_report(&run);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[8], "Time Delta = 1.0 s");
        assert_eq!(lines[9], "Final Time = 20 s");
        assert!(lines[18].ends_with(" at t = 13.0 s"));
        assert_eq!(lines[20].len(), 5 + 5 + 44 + 3 + 59);
        assert!(lines[23].starts_with("  0.0     "));
        assert!(lines[36].starts_with(" 13.0     "));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output0.txt");
        let run = sample_run(0.5);

        write_report(&run, &path).unwrap();
        let data = read_report(&path).unwrap();

        assert_eq!(data.params, run.params);
        assert_eq!(data.points.len(), run.len());
        assert_eq!(data.numerical_peak.time, run.numerical_peak.time);
        assert_relative_eq!(data.analytical_peak.value, run.analytical_peak.value, max_relative = 1e-15);

        for (read, original) in data.points.iter().zip(&run.points) {
            assert_eq!(read.time, original.time);
            assert_relative_eq!(read.numerical.b, original.numerical.b, max_relative = 1e-8);
            assert_relative_eq!(read.analytical.c, original.analytical.c, max_relative = 1e-8, epsilon = 1e-12);
        }

        let header = read_report_header(&path).unwrap();
        assert!(header.points.is_empty());
        assert_eq!(header.time_step(), 0.5);
    }

    #[test]
    fn test_boundary_peak_read_back() {
        let params = DecayParameters::new(0.1, 0.05, 0.0, 500.0, 0.0, 1.0, 10.0);
        let run = SimulationRunner::euler().run(&params).unwrap();
        let data = parse_report(&render_report(&run), "output1.txt", false).unwrap();

        assert_eq!(data.analytical_peak.kind, PeakKind::Boundary);
        assert_eq!(data.analytical_peak.value, 500.0);
    }

    #[test]
    fn test_malformed_report() {
        let err = parse_report("Input Data\n", "output2.txt", true).unwrap_err();
        assert!(matches!(err, DecayError::Report { .. }));

        let mut text = render_report(&sample_run(1.0));
        text.push_str("   21     1|2|3\n");
        let err = parse_report(&text, "output3.txt", true).unwrap_err();
        assert!(err.to_string().contains("output3.txt"));
    }
}
