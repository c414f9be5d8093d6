//! Configuration types for the presentation adapters.
//!
//! Both configs follow the same builder shape: start from `new()` (the
//! defaults) and chain `with_*` calls.
//!
//! - [`TableConfig`] - text table rendering
//! - [`ChartConfig`] - stacked bar chart rendering
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::{ChartConfig, TableConfig};
//!
//! let table = TableConfig::new().with_totals(false);
//! let chart = ChartConfig::new()
//!     .with_size(1280, 720)
//!     .with_title("Trip planning");
//! assert!(!table.show_totals);
//! assert_eq!(chart.width, 1280);
//! ```

use serde::{Deserialize, Serialize};

/// Matplotlib's `Set1` qualitative palette, as RGB triples.
pub const SET1_PALETTE: &[(u8, u8, u8)] = &[
    (228, 26, 28),
    (55, 126, 184),
    (77, 175, 74),
    (152, 78, 163),
    (255, 127, 0),
    (255, 255, 51),
    (166, 86, 40),
    (247, 129, 191),
    (153, 153, 153),
];

/// Configuration for the text table renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Append a `Total` column and a totals row (default: true)
    pub show_totals: bool,

    /// Minimum width of every count column, in terminal cells (default: 5)
    pub min_column_width: usize,

    /// Header of the period column; the granularity name when `None`
    pub period_header: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            show_totals: true,
            min_column_width: 5,
            period_header: None,
        }
    }
}

impl TableConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the totals column and row.
    #[must_use]
    pub fn with_totals(mut self, enabled: bool) -> Self {
        self.show_totals = enabled;
        self
    }

    /// Sets the minimum count column width.
    #[must_use]
    pub fn with_min_column_width(mut self, width: usize) -> Self {
        self.min_column_width = width;
        self
    }

    /// Overrides the period column header.
    #[must_use]
    pub fn with_period_header(mut self, header: impl Into<String>) -> Self {
        self.period_header = Some(header.into());
        self
    }
}

/// Configuration for the SVG stacked bar chart.
///
/// Defaults give a 1000x600 chart with vertical x labels and the `Set1`
/// palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Image width in pixels (default: 1000)
    pub width: u32,

    /// Image height in pixels (default: 600)
    pub height: u32,

    /// Chart title; `Message Count by <Granularity>` when `None`
    pub title: Option<String>,

    /// Draw the x-axis labels vertically (default: true)
    pub rotate_labels: bool,

    /// Series colors as RGB, cycled when there are more participants than colors
    pub palette: Vec<(u8, u8, u8)>,

    /// Draw the participant legend (default: true)
    pub show_legend: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            title: None,
            rotate_labels: true,
            palette: SET1_PALETTE.to_vec(),
            show_legend: true,
        }
    }
}

impl ChartConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the image size in pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets a custom title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Draws the x-axis labels vertically or horizontally.
    ///
    /// Horizontal labels need more room, so fewer periods get a label.
    #[must_use]
    pub fn with_rotated_labels(mut self, enabled: bool) -> Self {
        self.rotate_labels = enabled;
        self
    }

    /// Replaces the series palette. An empty palette keeps the default.
    #[must_use]
    pub fn with_palette<I>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = (u8, u8, u8)>,
    {
        let palette: Vec<(u8, u8, u8)> = colors.into_iter().collect();
        if !palette.is_empty() {
            self.palette = palette;
        }
        self
    }

    /// Enables or disables the legend.
    #[must_use]
    pub fn with_legend(mut self, enabled: bool) -> Self {
        self.show_legend = enabled;
        self
    }

    /// Color for series `index`.
    pub fn color(&self, index: usize) -> (u8, u8, u8) {
        if self.palette.is_empty() {
            return SET1_PALETTE[index % SET1_PALETTE.len()];
        }
        self.palette[index % self.palette.len()]
    }
}
