//! Final graphs drawn from saved reports
//!
//! Three graphs compare runs at different time steps:
//!
//! 1. **N_B vs t**: numerical N_B of a coarse, a medium and a fine run, plus the
//!    analytical N_B of the fine run
//! 2. **Numerical solution**: numerical N_A, N_B, N_C and total of the fine run
//! 3. **Peak time vs 1/Δt**: time of the numerical N_B maximum of several runs
//!
//! The runs are identified by report number (`outputN.txt`). They come from the
//! settings file, or from stdin when user input is enabled.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use super::chart::{render_curves, Curve};
use super::config::{PlotConfig, NO_TITLE};
use crate::config::FinalGraphs;
use crate::output::naming::report_path;
use crate::output::report::{read_report, read_report_header, ReportData};
use crate::solver::SimulationPoint;

// =================================================================================================
// Curves
// =================================================================================================

fn numerical_b(report: &ReportData) -> Vec<(f64, f64)> {
    report.points.iter().map(|p| (p.time, p.numerical.b)).collect()
}

/// Coarse, medium and fine numerical N_B, then the fine analytical N_B
pub fn n_b_comparison_curves(coarse: &ReportData, medium: &ReportData, fine: &ReportData) -> Vec<Curve> {
    vec![
        Curve::solid("Coarse", numerical_b(coarse), GREEN),
        Curve::solid("Medium", numerical_b(medium), BLUE),
        Curve::solid("Fine", numerical_b(fine), RED),
        Curve::solid(
            "Analytical",
            fine.points.iter().map(|p| (p.time, p.analytical.b)).collect(),
            BLACK,
        ),
    ]
}

/// Numerical N_A, N_B, N_C and total of one report
pub fn numerical_curves(report: &ReportData, config: &PlotConfig) -> Vec<Curve> {
    let columns: [(&str, fn(&SimulationPoint) -> f64); 4] = [
        ("N_A", |p| p.numerical.a),
        ("N_B", |p| p.numerical.b),
        ("N_C", |p| p.numerical.c),
        ("N_T", |p| p.numerical_total),
    ];

    columns
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            Curve::solid(
                *label,
                report.points.iter().map(|p| (p.time, value(p))).collect(),
                config.get_species_color(index),
            )
        })
        .collect()
}

/// `(1/Δt, time of the numerical N_B maximum)` per report, by increasing 1/Δt
pub fn peak_time_points(reports: &[ReportData]) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = reports
        .iter()
        .map(|r| (1.0 / r.time_step(), r.numerical_peak.time))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}

// =================================================================================================
// Graphs
// =================================================================================================

/// Plot numerical N_B of three reports against the fine analytical solution
pub fn plot_n_b_comparison(
    coarse: &ReportData,
    medium: &ReportData,
    fine: &ReportData,
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::time_series("N_B vs t");
    let config = config.unwrap_or(&default_config);

    render_curves(&n_b_comparison_curves(coarse, medium, fine), output_path, config)
}

/// Plot the numerical solution stored in one report
pub fn plot_numerical(report: &ReportData, output_path: &Path, config: Option<&PlotConfig>) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::time_series(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    render_curves(&numerical_curves(report, config), output_path, config)
}

/// Plot the numerical peak time of each report against 1/Δt
pub fn plot_peak_time_vs_inverse_time_step(
    reports: &[ReportData],
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if reports.is_empty() {
        return Err("Empty data: no reports given for the peak time graph".into());
    }

    let default_config = PlotConfig::peak_time(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let curve = Curve::solid("Numerical", peak_time_points(reports), config.get_species_color(0));
    render_curves(&[curve], output_path, config)
}

// =================================================================================================
// Final graphs
// =================================================================================================

/// Draw the three final graphs into `dir`
///
/// Reports are read from `dir/outputN.txt` and images are written to
/// `dir/{name}.png`. When `graphs.user_input` is set, the report numbers and image
/// names are asked for on stdin first. Returns the paths of the written images.
pub fn make_final_graphs(graphs: &FinalGraphs, dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if graphs.user_input {
        let stdin = io::stdin();
        let answers = prompt_final_graphs(&mut stdin.lock(), &mut io::stdout())?;
        draw_final_graphs(&answers, dir)
    } else {
        draw_final_graphs(graphs, dir)
    }
}

/// Draw the final graphs described by `graphs`, ignoring its `user_input` flag
pub fn draw_final_graphs(graphs: &FinalGraphs, dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let read = |number: usize| read_report(&report_path(dir, number));
    let image = |name: &str| dir.join(format!("{}.png", name));
    let [n_b_name, numerical_name, peak_name] = &graphs.image_names;

    let n_b_path = image(n_b_name);
    plot_n_b_comparison(
        &read(graphs.coarse)?,
        &read(graphs.medium)?,
        &read(graphs.fine)?,
        &n_b_path,
        None,
    )?;
    log::info!("Saved {}", n_b_path.display());

    let numerical_path = image(numerical_name);
    plot_numerical(&read(graphs.numerical)?, &numerical_path, None)?;
    log::info!("Saved {}", numerical_path.display());

    let reports = graphs
        .data_numbers
        .iter()
        .map(|&number| read_report_header(&report_path(dir, number)))
        .collect::<Result<Vec<_>, _>>()?;
    let peak_path = image(peak_name);
    plot_peak_time_vs_inverse_time_step(&reports, &peak_path, None)?;
    log::info!("Saved {}", peak_path.display());

    Ok(vec![n_b_path, numerical_path, peak_path])
}

/// Ask for the report numbers and image names of the final graphs
pub fn prompt_final_graphs<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<FinalGraphs, Box<dyn Error>> {
    let mut ask = |question: &str| -> Result<String, Box<dyn Error>> {
        write!(output, "{}", question)?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Err("Unexpected end of input".into());
        }
        Ok(answer.split_whitespace().collect())
    };

    let coarse = parse_number(&ask("N_B vs t\nGive the number of the output file to be used as the coarse line: ")?)?;
    let medium = parse_number(&ask("Give the number of the output file to be used as the medium line: ")?)?;
    let fine = parse_number(&ask("Give the number of the output file to be used as the fine line: ")?)?;
    let n_b_name = ask("Give the name that the image file should be saved as (excluding the extension): ")?;

    let numerical = parse_number(&ask(
        "\nNumerical Solution\nGive the number of the output file to be used for the numerical solution: ",
    )?)?;
    let numerical_name = ask("Give the name that the image file should be saved as (excluding the extension): ")?;

    let list = ask("\nmax N_B vs Delta t\nGive a list of output files to be used as a comma separated list of output file numbers: ")?;
    let data_numbers = parse_number_list(&list)?;
    let peak_name = ask("Give the name that the image file should be saved as (excluding the extension): ")?;

    let strip = |name: String| name.strip_suffix(".png").map(str::to_string).unwrap_or(name);

    Ok(FinalGraphs {
        user_input: false,
        image_names: [strip(n_b_name), strip(numerical_name), strip(peak_name)],
        coarse,
        medium,
        fine,
        numerical,
        data_numbers,
    })
}

fn parse_number(text: &str) -> Result<usize, Box<dyn Error>> {
    text.parse::<usize>()
        .map_err(|_| format!("Expected an output file number, got \"{}\"", text).into())
}

/// `"[0, 1, 2]"` or `"0,1,2"`
fn parse_number_list(text: &str) -> Result<Vec<usize>, Box<dyn Error>> {
    let compact: String = text.split_whitespace().collect();
    let inner = compact.strip_prefix('[').unwrap_or(&compact);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner.split(',').map(parse_number).collect()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DecayParameters;
    use crate::solver::SimulationRunner;
    use std::io::Cursor;

    fn report(time_step: f64) -> ReportData {
        let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, time_step, 40.0);
        ReportData::from(&SimulationRunner::euler().run(&params).unwrap())
    }

    #[test]
    fn test_n_b_comparison_curves() {
        let (coarse, medium, fine) = (report(1.0), report(0.5), report(0.25));
        let curves = n_b_comparison_curves(&coarse, &medium, &fine);

        let labels: Vec<&str> = curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Coarse", "Medium", "Fine", "Analytical"]);
        assert_eq!(curves[0].points.len(), 41);
        assert_eq!(curves[2].points.len(), 161);
        assert_eq!(curves[3].points.len(), 161);
        assert_eq!(curves[3].points[4].1, fine.points[4].analytical.b);
    }

    #[test]
    fn test_numerical_curves() {
        let data = report(1.0);
        let curves = numerical_curves(&data, &PlotConfig::default());

        assert_eq!(curves.len(), 4);
        assert_eq!(curves[3].label, "N_T");
        assert_eq!(curves[1].points[1], (1.0, 100.0));
    }

    #[test]
    fn test_peak_time_points_sorted() {
        let reports = [report(0.25), report(1.0), report(0.5)];
        let points = peak_time_points(&reports);

        let x: Vec<f64> = points.iter().map(|p| p.0).collect();
        assert_eq!(x, [1.0, 2.0, 4.0]);
        assert_eq!(points[0].1, reports[1].numerical_peak.time);
    }

    #[test]
    fn test_prompt_final_graphs() {
        let answers = "0\n 1 \n2\nNB_vs_t\n3\nnumerical.png\n[0, 1, 2, 5]\npeak\n";
        let mut output = Vec::new();
        let graphs = prompt_final_graphs(&mut Cursor::new(answers), &mut output).unwrap();

        assert!(!graphs.user_input);
        assert_eq!((graphs.coarse, graphs.medium, graphs.fine), (0, 1, 2));
        assert_eq!(graphs.numerical, 3);
        assert_eq!(graphs.image_names, ["NB_vs_t", "numerical", "peak"].map(String::from));
        assert_eq!(graphs.data_numbers, vec![0, 1, 2, 5]);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.starts_with("N_B vs t\n"));
    }

    #[test]
    fn test_prompt_rejects_bad_input() {
        let mut output = Vec::new();
        assert!(prompt_final_graphs(&mut Cursor::new("zero\n"), &mut output).is_err());
        assert!(prompt_final_graphs(&mut Cursor::new("0\n1\n"), &mut output).is_err());
    }

    #[test]
    fn test_missing_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let graphs = FinalGraphs {
            user_input: false,
            image_names: ["a", "b", "c"].map(String::from),
            coarse: 0,
            medium: 1,
            fine: 2,
            numerical: 2,
            data_numbers: vec![0],
        };
        assert!(draw_final_graphs(&graphs, dir.path()).is_err());
    }
}
