//! # Chatstat
//!
//! Message activity statistics for WhatsApp chat exports.
//!
//! ## Overview
//!
//! Chatstat reads a WhatsApp `.txt` export (or the `.zip` WhatsApp produces
//! when media is attached), extracts who wrote when, and counts messages per
//! participant by day, ISO week or month. Every period from the first
//! message up to today gets a row, including quiet ones.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstat::prelude::*;
//! use chrono::Local;
//!
//! fn main() -> Result<()> {
//!     let records = ChatParser::new().parse("WhatsApp Chat with Alice.zip".as_ref())?;
//!     let table = aggregate(&records, Granularity::Weekly, Local::now().naive_local())?;
//!
//!     print!("{}", render_table(&table, &TableConfig::new()));
//!     write_svg(&table, "activity.svg".as_ref(), &ChartConfig::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`archive`] — reading `.txt` / `.zip` exports into lines
//! - [`parser`] — [`ChatParser`](parser::ChatParser), lines to [`MessageRecord`]s
//! - [`core`] — bucketing and aggregation
//!   - [`core::period`] — [`Granularity`](core::Granularity), [`BucketKey`](core::BucketKey), [`full_range`](core::full_range)
//!   - [`core::aggregate`] — [`AggregationTable`](core::AggregationTable), [`aggregate`](core::aggregate())
//! - [`render`] — text table and SVG stacked bar chart
//! - [`config`] — [`TableConfig`](config::TableConfig), [`ChartConfig`](config::ChartConfig)
//! - [`session`] — caller-owned "currently loaded chat" state
//! - [`error`] — [`ChatstatError`], [`Result`]
//! - [`prelude`] — Convenient re-exports

pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parser;
pub mod render;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatError, Result};
pub use message::MessageRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRecord;

    // Error types
    pub use crate::error::{ChatstatError, Result};

    // Reading and extraction
    pub use crate::archive::read_lines;
    pub use crate::parser::{ChatParser, ExtractStats, extract};

    // Bucketing and aggregation
    pub use crate::core::{
        AggregationTable, BucketKey, Granularity, aggregate, bucket_key, full_range,
    };

    // Rendering
    pub use crate::config::{ChartConfig, TableConfig};
    pub use crate::render::{render_svg, render_table, write_svg};

    // State
    pub use crate::session::{LoadedChat, Session};
}
