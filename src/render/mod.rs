//! Presentation adapters for [`AggregationTable`](crate::core::AggregationTable).
//!
//! - [`table`] - aligned plain-text table for terminals
//! - [`chart`] - stacked bar chart as an SVG document

pub mod chart;
pub mod table;

pub use chart::{render_svg, write_svg};
pub use table::render_table;
