//! Reference graph of a single run
//!
//! Drawn after each run when reference graphs are enabled: numerical counts of
//! A, B and C as solid lines, the analytical counts as dashed lines of the same
//! color, and the numerical total in black.
//!
//! Long runs are thinned to [`MAX_REFERENCE_POINTS`] evenly spaced points, always
//! keeping the first and last.

use std::error::Error;
use std::path::Path;

use super::chart::{render_curves, Curve};
use super::config::PlotConfig;
use crate::physics::SpeciesCounts;
use crate::solver::{Run, SimulationPoint};

/// Largest number of points drawn per curve
pub const MAX_REFERENCE_POINTS: usize = 400;

/// Curves of the reference graph of `run`
pub fn reference_curves(run: &Run, config: &PlotConfig) -> Vec<Curve> {
    let points = run.downsample(MAX_REFERENCE_POINTS);

    let series = |count: fn(&SpeciesCounts) -> f64, numerical: bool| -> Vec<(f64, f64)> {
        points
            .iter()
            .map(|p| {
                let counts = if numerical { &p.numerical } else { &p.analytical };
                (p.time, count(counts))
            })
            .collect()
    };

    let species: [(&str, fn(&SpeciesCounts) -> f64); 3] =
        [("N_A", |c| c.a), ("N_B", |c| c.b), ("N_C", |c| c.c)];

    let mut curves = Vec::with_capacity(7);
    for (index, (name, count)) in species.into_iter().enumerate() {
        let color = config.get_species_color(index);
        curves.push(Curve::solid(format!("{} (Numerical)", name), series(count, true), color));
        curves.push(Curve::dashed(format!("{} (Analytical)", name), series(count, false), color));
    }

    curves.push(Curve::solid(
        "N_total (Numerical)",
        points.iter().map(|p: &SimulationPoint| (p.time, p.numerical_total)).collect(),
        config.get_species_color(3),
    ));

    curves
}

/// Plot the reference graph of `run` to `output_path` (.png or .svg)
///
/// Without a `config` the title is `Δt = {Δt} s`.
pub fn plot_reference_graph(
    run: &Run,
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::reference(run.time_step());
    let config = config.unwrap_or(&default_config);

    render_curves(&reference_curves(run, config), output_path, config)?;

    log::debug!("Reference graph written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DecayParameters;
    use crate::solver::SimulationRunner;
    use tempfile::TempDir;

    fn long_run() -> Run {
        let params = DecayParameters::new(0.1, 0.05, 1000.0, 0.0, 0.0, 0.01, 50.0);
        SimulationRunner::euler().run(&params).unwrap()
    }

    #[test]
    fn test_reference_curves() {
        let run = long_run();
        let curves = reference_curves(&run, &PlotConfig::default());

        assert_eq!(curves.len(), 7);
        assert_eq!(curves[0].label, "N_A (Numerical)");
        assert!(!curves[0].dashed);
        assert_eq!(curves[3].label, "N_B (Analytical)");
        assert!(curves[3].dashed);
        assert_eq!(curves[2].color, curves[3].color);

        for curve in &curves {
            assert_eq!(curve.points.len(), MAX_REFERENCE_POINTS);
            assert_eq!(curve.points[0].0, 0.0);
            assert_eq!(curve.points[MAX_REFERENCE_POINTS - 1].0, run.points[run.len() - 1].time);
        }

        // Total starts at the initial count
        assert_eq!(curves[6].points[0].1, 1000.0);
    }

    #[test]
    #[ignore = "needs a system font for the caption"]
    fn test_plot_reference_graph_svg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image0.svg");

        plot_reference_graph(&long_run(), &path, None).unwrap();
        assert!(path.exists());
    }
}
