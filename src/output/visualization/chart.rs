//! Line chart rendering shared by every graph
//!
//! Each graph is a list of [`Curve`]s drawn on one pair of axes. The image
//! format follows the file extension: `.svg` gives a vector image, anything
//! else a PNG.

use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::config::PlotConfig;

/// Segments per dash (and per gap) of a dashed curve
const DASH_SEGMENTS: usize = 4;

/// One labelled polyline
#[derive(Debug, Clone)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub dashed: bool,
}

impl Curve {
    pub fn solid(label: impl Into<String>, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        Self {
            label: label.into(),
            points,
            color,
            dashed: false,
        }
    }

    pub fn dashed(label: impl Into<String>, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        Self {
            dashed: true,
            ..Self::solid(label, points, color)
        }
    }
}

/// Axis ranges covering every finite point, with a 5 % margin on y
///
/// Negative counts are kept visible. Returns `None` when no point is finite.
pub(crate) fn axis_ranges(curves: &[Curve]) -> Option<((f64, f64), (f64, f64))> {
    let finite = curves
        .iter()
        .flat_map(|c| c.points.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite());

    let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y_range = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in finite {
        x_range = (x_range.0.min(x), x_range.1.max(x));
        y_range = (y_range.0.min(y), y_range.1.max(y));
    }
    if x_range.0 > x_range.1 {
        return None;
    }

    let widen = |(lo, hi): (f64, f64), margin: f64| {
        let span = hi - lo;
        if span > 0.0 {
            (lo - margin * span, hi + margin * span)
        } else {
            let pad = if lo == 0.0 { 1.0 } else { 0.5 * lo.abs() };
            (lo - pad, hi + pad)
        }
    };

    Some((widen(x_range, 0.0), widen(y_range, 0.05)))
}

/// Render `curves` to `output_path`
pub fn render_curves(curves: &[Curve], output_path: &Path, config: &PlotConfig) -> Result<(), Box<dyn Error>> {
    let (x_range, y_range) = axis_ranges(curves).ok_or("Nothing to plot: no finite data points")?;

    let ext = output_path.extension().and_then(|s| s.to_str()).unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            render_impl(backend, curves, config, x_range, y_range)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            render_impl(backend, curves, config, x_range, y_range)
        }
    }
}

fn render_impl<DB: DrawingBackend>(
    backend: DB,
    curves: &[Curve],
    config: &PlotConfig,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    let y_formatter = |y: &f64| format!("{:.3e}", y);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .y_label_formatter(&y_formatter);

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    for curve in curves {
        let color = curve.color;
        let style = ShapeStyle::from(&color).stroke_width(config.line_width);

        let annotation = if curve.dashed {
            // Every other run of DASH_SEGMENTS segments is left out
            chart.draw_series(
                curve
                    .points
                    .windows(2)
                    .enumerate()
                    .filter(|(i, _)| (i / DASH_SEGMENTS) % 2 == 0)
                    .map(|(_, pair)| PathElement::new(vec![pair[0], pair[1]], style)),
            )?
        } else {
            chart.draw_series(LineSeries::new(curve.points.iter().copied(), style))?
        };

        annotation
            .label(curve.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
