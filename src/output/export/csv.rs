//! CSV export of a decay chain run
//!
//! CSV files open in spreadsheets, pandas and most plotting tools.
//!
//! # Features
//!
//! - **Metadata support**: optional `#` header with the run parameters
//! - **Customizable**: delimiter, decimal separator, precision
//! - **Validation**: empty runs and non-finite times are rejected
//!
//! # Output
//!
//! ```csv
//! # Decay Chain Simulation Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Solver: Forward Euler
//! # Decay Rate A: 0.1 /s
//! # Decay Rate B: 0.05 /s
//! # Time Delta: 1 s
//! # Final Time: 100 s
//! # Time Steps: 101
//! #
//! Time (s),N_A analytical,N_B analytical,N_C analytical,N_A numerical,N_B numerical,N_C numerical,N_total numerical
//! 0.000000,1000.000000,0.000000,0.000000,1000.000000,0.000000,0.000000,1000.000000
//! ...
//! ```
//!
//! Negative counts from an unstable time step are exported as they are.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use thiserror::Error;

use super::Exporter;
use crate::solver::{Run, SimulationPoint};

const COLUMNS: [&str; 7] = [
    "N_A analytical",
    "N_B analytical",
    "N_C analytical",
    "N_A numerical",
    "N_B numerical",
    "N_C numerical",
    "N_total numerical",
];

// =============================================================================
// Errors
// =============================================================================

/// Failures of [`CsvExporter`]
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("Empty data: the run has no points")]
    EmptyRun,

    #[error("Invalid data: non-finite time {time} at row {row}")]
    InvalidTime { row: usize, time: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use decay_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the time column (default: "Time (s)")
    pub time_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time (s)".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    /// A delimiter equal to the decimal separator would make rows ambiguous
    pub fn validate(&self) -> Result<(), CsvError> {
        if self.delimiter == self.decimal_separator {
            return Err(CsvError::InvalidConfig(format!(
                "delimiter and decimal separator are both '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set appear in the header.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Solver name (e.g., "Forward Euler")
    pub solver_name: Option<String>,

    /// Decay constants λ_A, λ_B (1/s)
    pub decay_constants: Option<(f64, f64)>,

    /// Time step (s)
    pub time_step: Option<f64>,

    /// Final time (s)
    pub final_time: Option<f64>,

    /// Number of time points
    pub time_steps: Option<usize>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing `run`
    pub fn from_run(run: &Run, solver: &str) -> Self {
        Self {
            solver_name: Some(solver.to_string()),
            decay_constants: Some((run.params.lambda_a, run.params.lambda_b)),
            time_step: Some(run.params.time_step),
            final_time: Some(run.params.final_time),
            time_steps: Some(run.len()),
            ..Default::default()
        }
    }

    /// Add a `# key: value` header line
    pub fn add_custom(&mut self, key: &str, value: impl ToString) {
        self.custom.push((key.to_string(), value.to_string()));
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Write the CSV text of `points` to `out`
    pub fn write_points<W: Write>(&self, out: &mut W, points: &[SimulationPoint]) -> Result<(), CsvError> {
        let config = &self.config;
        config.validate()?;

        if points.is_empty() {
            return Err(CsvError::EmptyRun);
        }
        if let Some((row, point)) = points.iter().enumerate().find(|(_, p)| !p.time.is_finite()) {
            return Err(CsvError::InvalidTime { row, time: point.time });
        }

        // ============================= Write Metadata =========================

        if config.include_metadata
            && let Some(metadata) = &config.metadata
        {
            write_metadata_header(out, metadata)?;
        }

        // ============================= Write Header ===========================

        write!(out, "{}", config.time_header)?;
        for column in COLUMNS {
            write!(out, "{}{}", config.delimiter, column)?;
        }
        writeln!(out)?;

        // ============================= Write Data =============================

        for point in points {
            let values = [
                point.analytical.a,
                point.analytical.b,
                point.analytical.c,
                point.numerical.a,
                point.numerical.b,
                point.numerical.c,
                point.numerical_total,
            ];

            write!(out, "{}", format_number(point.time, config))?;
            for value in values {
                write!(out, "{}{}", config.delimiter, format_number(value, config))?;
            }
            writeln!(out)?;
        }

        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_run(&self, run: &Run, n_points: Option<usize>, path: &str) -> Result<(), CsvError> {
        if run.is_empty() {
            return Err(CsvError::EmptyRun);
        }

        let points = match n_points {
            Some(n) => run.downsample(n),
            None => run.points.clone(),
        };

        let mut file = BufWriter::new(File::create(path)?);
        self.write_points(&mut file, &points)?;
        file.flush()?;

        log::debug!("Exported {} of {} points to {}", points.len(), run.len(), path);
        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> io::Result<()> {
    writeln!(out, "# Decay Chain Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some((lambda_a, lambda_b)) = metadata.decay_constants {
        writeln!(out, "# Decay Rate A: {} /s", lambda_a)?;
        writeln!(out, "# Decay Rate B: {} /s", lambda_b)?;
    }
    if let Some(dt) = metadata.time_step {
        writeln!(out, "# Time Delta: {} s", dt)?;
    }
    if let Some(t_final) = metadata.final_time {
        writeln!(out, "# Final Time: {} s", t_final)?;
    }
    if let Some(steps) = metadata.time_steps {
        writeln!(out, "# Time Steps: {}", steps)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DecayParameters;
    use crate::solver::SimulationRunner;
    use std::fs;
    use tempfile::TempDir;

    fn sample_run() -> Run {
        let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 1.0, 100.0);
        SimulationRunner::euler().run(&params).unwrap()
    }

    fn to_string(exporter: &CsvExporter, points: &[SimulationPoint]) -> String {
        let mut buffer = Vec::new();
        exporter.write_points(&mut buffer, points).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_and_first_row() {
        let run = sample_run();
        let text = to_string(&CsvExporter::default(), &run.points);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + run.len());
        assert_eq!(
            lines[0],
            "Time (s),N_A analytical,N_B analytical,N_C analytical,N_A numerical,N_B numerical,N_C numerical,N_total numerical"
        );
        assert_eq!(
            lines[1],
            "0.000000,1000.000000,0.000000,0.000000,1000.000000,0.000000,0.000000,1000.000000"
        );
        assert!(lines[2].starts_with("1.000000,"));
        assert!(lines[2].contains(",900.000000,100.000000,0.000000,"));
    }

    #[test]
    fn test_european_format() {
        let run = sample_run();
        let exporter = CsvExporter::new(CsvConfig::european().precision(2));
        let text = to_string(&exporter, &run.points[..2]);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Time (s);N_A analytical;"));
        assert!(lines[2].starts_with("1,00;"));
        assert!(lines[2].contains(";900,00;100,00;0,00;"));
    }

    #[test]
    fn test_metadata_header() {
        let run = sample_run();
        let mut metadata = CsvMetadata::from_run(&run, "Forward Euler");
        metadata.add_custom("Runs", 3);
        metadata.add_custom("Converged", true);
        let config = CsvConfig::default().with_metadata(metadata);
        let text = to_string(&CsvExporter::new(config), &run.points);

        assert!(text.starts_with("# Decay Chain Simulation Data\n# Generated: "));
        assert!(text.contains("# Solver: Forward Euler\n"));
        assert!(text.contains("# Decay Rate B: 0.05 /s\n"));
        assert!(text.contains("# Time Steps: 101\n# Runs: 3\n# Converged: true\n"));
        assert!(text.contains("#\nTime (s),"));
    }

    #[test]
    fn test_export_downsampled_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chain.csv");
        let path = path.to_str().unwrap();
        let run = sample_run();

        CsvExporter::default().export_run(&run, Some(11), path).unwrap();

        let text = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[1].starts_with("0.000000,"));
        assert!(lines[11].starts_with("100.000000,"));
    }

    #[test]
    fn test_errors() {
        let exporter = CsvExporter::default();
        let mut buffer = Vec::new();
        assert!(matches!(exporter.write_points(&mut buffer, &[]), Err(CsvError::EmptyRun)));

        let mut points = sample_run().points;
        points[3].time = f64::NAN;
        assert!(matches!(
            exporter.write_points(&mut buffer, &points),
            Err(CsvError::InvalidTime { row: 3, .. })
        ));

        let bad = CsvExporter::new(CsvConfig::default().delimiter('.'));
        assert!(matches!(bad.write_points(&mut buffer, &points), Err(CsvError::InvalidConfig(_))));

        let missing_dir = CsvExporter::default().export_run(&sample_run(), None, "/nonexistent/dir/run.csv");
        assert!(matches!(missing_dir, Err(CsvError::Io(_))));
    }
}
