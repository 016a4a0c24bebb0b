use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

use decay_rs::config::{read_input, read_settings, Settings};
use decay_rs::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
use decay_rs::output::{
    make_final_graphs, next_output_number, plot_reference_graph, reference_image_path, report_path, write_report,
};
use decay_rs::solver::{ConvergenceLoop, ConvergenceReport};

#[derive(Debug, Parser)]
#[command(name = "decay-sim")]
#[command(about = "Simulate the radioactive decay chain A -> B -> C, analytically and with forward Euler")]
struct Cli {
    /// Directory holding the input and settings files; reports and images are written here
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Settings file, relative to --dir
    #[arg(long, default_value = "settings.txt")]
    settings: PathBuf,

    /// Input file, relative to --dir
    #[arg(long, default_value = "input.txt")]
    input: PathBuf,

    /// Stop refining after this many runs (overrides the settings file)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Also export the accepted run as outputN.csv
    #[arg(long, default_value_t = false)]
    csv: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Warnings and errors only
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("failed to initialise logging")
}

/// Run the convergence loop, writing a report (and optionally a graph) per run
fn run_simulation(cli: &Cli, settings: &Settings) -> Result<()> {
    let dir = cli.dir.as_path();
    let input_path = dir.join(&cli.input);
    let params = read_input(&input_path).with_context(|| format!("failed to read {}", input_path.display()))?;

    let mut config = settings.solver_configuration();
    if cli.max_iterations.is_some() {
        config.max_iterations = cli.max_iterations;
    }

    let convergence = ConvergenceLoop::euler(config);
    let config = convergence.configuration();
    info!(
        "{}: Δt = {} s, t_final = {} s, repeat = {}, significance = {}, max runs = {}",
        convergence.integrator_name(),
        params.time_step,
        params.final_time,
        config.repeat,
        config.significance,
        config.max_iterations.map_or_else(|| "unbounded".to_string(), |n| n.to_string())
    );

    let mut accepted_number = 0;
    let report = convergence.iterate_with(&params, |run| {
        let number = next_output_number(dir)?;
        let path = report_path(dir, number);
        write_report(run, &path)?;
        info!("Wrote {} (Δt = {} s, {} points)", path.display(), run.time_step(), run.len());

        if settings.generate_reference_graphs {
            let image = reference_image_path(dir, number);
            if let Err(e) = plot_reference_graph(run, &image, None) {
                warn!("Could not draw {}: {}", image.display(), e);
            }
        }

        accepted_number = number;
        Ok(())
    })?;

    summarize(&report);

    if cli.csv {
        export_csv(dir, accepted_number, &convergence, &report)?;
    }

    Ok(())
}

fn summarize(report: &ConvergenceReport) {
    for refinement in &report.refinements {
        info!(
            "Δt = {:<12} analytical max N(B) = {:<22} at t = {:<20} numerical max N(B) = {:<22} at t = {}",
            refinement.time_step,
            refinement.analytical_peak.value,
            refinement.analytical_peak.time,
            refinement.numerical_peak.value,
            refinement.numerical_peak.time,
        );
    }

    if !report.converged {
        warn!(
            "Accepted run at Δt = {} s did not meet the significance threshold",
            report.run.time_step()
        );
    }
}

fn export_csv(dir: &Path, number: usize, convergence: &ConvergenceLoop, report: &ConvergenceReport) -> Result<()> {
    let path = dir.join(format!("output{}.csv", number));
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow!("non UTF-8 path {}", path.display()))?;

    let mut metadata = CsvMetadata::from_run(&report.run, convergence.integrator_name());
    metadata.add_custom("Significance", convergence.configuration().significance);
    metadata.add_custom("Runs", report.iterations);
    metadata.add_custom("Converged", report.converged);
    let exporter = CsvExporter::new(CsvConfig::default().with_metadata(metadata));
    exporter
        .export_run(&report.run, None, path_str)
        .with_context(|| format!("failed to export {}", path.display()))?;

    info!("Exported {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let settings_path = cli.dir.join(&cli.settings);
    let settings =
        read_settings(&settings_path).with_context(|| format!("failed to read {}", settings_path.display()))?;

    if settings.run_main {
        run_simulation(&cli, &settings)?;
    }

    if settings.plot {
        let images = make_final_graphs(&settings.final_graphs, &cli.dir)
            .map_err(|e| anyhow!("failed to draw the final graphs: {}", e))?;
        info!("Drew {} final graphs", images.len());
    }

    Ok(())
}
