//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `species_colors`: Optional colors for A, B, C and the total, in that order
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust
/// use decay_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::reference(0.5);
/// config.width = 1920;
/// config.height = 1080;
/// config.species_colors = Some(vec![MAGENTA, CYAN, BLUE, BLACK]);
/// assert_eq!(config.title, "Δt = 0.5 s");
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "Time (s)")
    pub xlabel: String,

    /// Y-axis label (default: "N (atoms)")
    pub ylabel: String,

    /// Optional colors, one per curve family
    ///
    /// If None, uses default palette: [RED, GREEN, BLUE, BLACK, MAGENTA, ...]
    pub species_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "Time (s)".to_string(),
            ylabel: "N (atoms)".to_string(),
            species_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config of the per-run reference graph, titled with the time step
    pub fn reference(time_step: f64) -> Self {
        Self {
            title: format!("Δt = {} s", time_step),
            ..Self::default()
        }
    }

    /// Config of a counts-vs-time graph with optional custom title
    ///
    /// Final graphs are rendered larger than the per-run reference graphs.
    ///
    /// ```rust
    /// use decay_rs::output::visualization::{PlotConfig, NO_TITLE};
    ///
    /// assert_eq!(PlotConfig::time_series("N_B vs t").title, "N_B vs t");
    /// assert_eq!(PlotConfig::time_series(NO_TITLE).title, "N vs t");
    /// ```
    pub fn time_series(title: impl IntoOptionalTitle) -> Self {
        Self {
            width: 1600,
            height: 1200,
            title: title.into_optional_title().unwrap_or_else(|| "N vs t".to_string()),
            ..Self::default()
        }
    }

    /// Config of the peak time vs 1/Δt graph
    pub fn peak_time(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Inverse Time Delta (1/s)".to_string(),
            ylabel: "Time (s)".to_string(),
            ..Self::time_series(
                title
                    .into_optional_title()
                    .unwrap_or_else(|| "Time of N_B max vs 1/Δt".to_string()),
            )
        }
    }

    /// Get color for curve family at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_species_color(&self, species_index: usize) -> RGBColor {
        if let Some(colors) = &self.species_colors
            && let Some(color) = colors.get(species_index)
        {
            return *color;
        }

        let default_colors = [
            RED,
            GREEN,
            BLUE,
            BLACK,
            MAGENTA,
            CYAN,
            RGBColor(255, 165, 0), // Orange
            RGBColor(128, 0, 128), // Purple
        ];

        default_colors[species_index % default_colors.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
