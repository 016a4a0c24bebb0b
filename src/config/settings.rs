//! Settings file: what to run and what to plot
//!
//! ```text
//! Run Main = True
//! Generate Reference Graphs = False
//! Run Multiple = True
//! Percent of Total = 0.05, %
//! Plot = False
//! User Input for Plotting = False
//! Image 1 Name = NB_vs_t
//! Image 2 Name = numerical
//! Image 3 Name = peak_vs_dt.png
//! Coarse Data Number = 0
//! Medium Data Number = 1
//! Fine Data Number = 2
//! Data Numbers = 0, 1, 2
//! # optional
//! Maximum Iterations = 20
//! ```

use std::path::Path;

use crate::config::reader::{Entry, KeyValueFile};
use crate::error::DecayError;
use crate::solver::SolverConfiguration;

const SOURCE: &str = "settings";

const RUN_MAIN: &str = "Run Main";
const GENERATE: &str = "Generate Reference Graphs";
const RUN_MULTIPLE: &str = "Run Multiple";
const PERCENT_OF_TOTAL: &str = "Percent of Total";
const PLOT: &str = "Plot";
const USER_INPUT: &str = "User Input for Plotting";
const IMAGE_NAMES: [&str; 3] = ["Image 1 Name", "Image 2 Name", "Image 3 Name"];
const COARSE: &str = "Coarse Data Number";
const MEDIUM: &str = "Medium Data Number";
const FINE: &str = "Fine Data Number";
const DATA_NUMBERS: &str = "Data Numbers";
const MAX_ITERATIONS: &str = "Maximum Iterations";

const KNOWN: [&str; 14] = [
    RUN_MAIN,
    GENERATE,
    RUN_MULTIPLE,
    PERCENT_OF_TOTAL,
    PLOT,
    USER_INPUT,
    IMAGE_NAMES[0],
    IMAGE_NAMES[1],
    IMAGE_NAMES[2],
    COARSE,
    MEDIUM,
    FINE,
    DATA_NUMBERS,
    MAX_ITERATIONS,
];

/// Which reports feed the three final graphs, and where the graphs go
#[derive(Debug, Clone, PartialEq)]
pub struct FinalGraphs {
    /// Prompt for report numbers and image names on stdin instead
    pub user_input: bool,

    /// Image stems (no `.png`): N_B vs t, numerical solution, peak time vs 1/Δt
    pub image_names: [String; 3],

    /// Report numbers of the coarse, medium and fine N_B curves
    pub coarse: usize,
    pub medium: usize,
    pub fine: usize,

    /// Report number of the numerical solution graph (the fine report in settings files)
    pub numerical: usize,

    /// Report numbers for the peak-time graph
    pub data_numbers: Vec<usize>,
}

/// Contents of the settings file
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Run the simulation
    pub run_main: bool,

    /// Write a reference graph next to every report
    pub generate_reference_graphs: bool,

    /// Refine Δt until successive runs agree
    pub run_multiple: bool,

    /// Significance threshold as a fraction of the total count
    pub significance: f64,

    /// Draw the final graphs from existing reports
    pub plot: bool,

    pub final_graphs: FinalGraphs,

    /// Optional ceiling on the number of runs
    pub max_iterations: Option<usize>,
}

impl Settings {
    /// Convergence loop controls derived from these settings
    pub fn solver_configuration(&self) -> SolverConfiguration {
        SolverConfiguration {
            significance: self.significance,
            repeat: self.run_multiple,
            max_iterations: self.max_iterations,
        }
    }
}

/// Read the settings file at `path`
pub fn read_settings(path: &Path) -> Result<Settings, DecayError> {
    let file = KeyValueFile::load(path, SOURCE, &IMAGE_NAMES)?;
    parse_settings(&file)
}

/// Build settings from an already parsed file
///
/// The file must be parsed with the image names as case-preserving entries.
pub fn parse_settings(file: &KeyValueFile) -> Result<Settings, DecayError> {
    file.reject_unknown(&KNOWN)?;

    let truth = |name: &str| -> Result<bool, DecayError> { file.truth(file.require(name, Some(1))?) };
    let number = |name: &str| -> Result<usize, DecayError> { file.digits(file.require(name, Some(1))?, 0) };

    let percent = file.require(PERCENT_OF_TOTAL, Some(2))?;
    let significance = file.float(percent, 0)? * file.ratio_unit(percent, 1)?.factor();
    if !significance.is_finite() || significance < 0.0 {
        return Err(file.error(percent, "expected a non-negative ratio"));
    }

    let image_names = [
        image_name(file.require(IMAGE_NAMES[0], Some(1))?),
        image_name(file.require(IMAGE_NAMES[1], Some(1))?),
        image_name(file.require(IMAGE_NAMES[2], Some(1))?),
    ];

    let data_numbers = file.require(DATA_NUMBERS, None)?;
    let data_numbers = (0..data_numbers.args.len())
        .map(|i| file.digits(data_numbers, i))
        .collect::<Result<Vec<_>, _>>()?;

    let max_iterations = match file.get(MAX_ITERATIONS) {
        Some(_) => Some(number(MAX_ITERATIONS)?),
        None => None,
    };

    let fine = number(FINE)?;
    let settings = Settings {
        run_main: truth(RUN_MAIN)?,
        generate_reference_graphs: truth(GENERATE)?,
        run_multiple: truth(RUN_MULTIPLE)?,
        significance,
        plot: truth(PLOT)?,
        final_graphs: FinalGraphs {
            user_input: truth(USER_INPUT)?,
            image_names,
            coarse: number(COARSE)?,
            medium: number(MEDIUM)?,
            fine,
            numerical: fine,
            data_numbers,
        },
        max_iterations,
    };

    settings.solver_configuration().validate()?;
    Ok(settings)
}

/// File stem with any `.png` extension removed
fn image_name(entry: &Entry) -> String {
    let name = &entry.args[0];
    name.strip_suffix(".png").unwrap_or(name).to_string()
}

// =================================================================================================
// Tests
// =================================================================================================
