//! Core aggregation logic for chatstat.
//!
//! This module contains:
//! - [`period`] - Granularity, bucket keys and gap-free bucket ranges
//! - [`aggregate`] - Dense per-period, per-participant message counts
//!
//! Everything here is pure: callers pass the records and the current time
//! in and get a fresh table back.
//!
//! # Quick Start
//!
//! ```rust
//! use chatstat::core::{Granularity, aggregate};
//! use chatstat::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let table = aggregate(&[MessageRecord::new(ts, "Alice")], Granularity::Monthly, ts)?;
//! assert_eq!(table.total(), 1);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

pub mod aggregate;
pub mod period;

// Re-export main types for convenience
pub use aggregate::{AggregationTable, aggregate};
pub use period::{BucketKey, Granularity, bucket_key, full_range};
