//! Dense message-count tables.
//!
//! [`aggregate`] turns a list of [`MessageRecord`]s into an
//! [`AggregationTable`]: one row per bucket from the first message up to
//! "now", one column per participant, every cell filled (zero when nobody
//! wrote in that period).
//!
//! # Example
//!
//! ```rust
//! use chatstat::core::aggregate::aggregate;
//! use chatstat::core::period::Granularity;
//! use chatstat::parser::ChatParser;
//! use chrono::NaiveDate;
//!
//! let records = ChatParser::new().parse_str(
//!     "01/01/2024, 09:00 - Alice: hi\n\
//!      01/01/2024, 09:05 - Bob: hello\n\
//!      02/01/2024, 10:00 - Alice: again",
//! )?;
//! let now = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//! let table = aggregate(&records, Granularity::Daily, now)?;
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.participants(), ["Alice", "Bob"]);
//! assert_eq!(table.row(1), [1, 0]);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::period::{BucketKey, Granularity, bucket_key, full_range};
use crate::MessageRecord;
use crate::error::{ChatstatError, Result};

/// Message counts per (period, participant).
///
/// Rows follow the bucket range chronologically; columns follow the order in
/// which participants first appear in the records. Counts are stored
/// row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationTable {
    granularity: Granularity,
    periods: Vec<BucketKey>,
    participants: Vec<String>,
    counts: Vec<u64>,
}

impl AggregationTable {
    /// The bucket size used for rows.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Row keys in chronological order.
    pub fn periods(&self) -> &[BucketKey] {
        &self.periods
    }

    /// Column names in first-appearance order.
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn row_count(&self) -> usize {
        self.periods.len()
    }

    pub fn column_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Counts for row `index`, one per participant.
    ///
    /// # Panics
    ///
    /// Panics if `index >= row_count()`.
    pub fn row(&self, index: usize) -> &[u64] {
        let width = self.column_count();
        &self.counts[index * width..(index + 1) * width]
    }

    /// Iterates over `(period, counts)` pairs in chronological order.
    pub fn rows(&self) -> impl Iterator<Item = (&BucketKey, &[u64])> + '_ {
        self.periods
            .iter()
            .enumerate()
            .map(move |(i, period)| (period, self.row(i)))
    }

    /// Count for one cell, or `None` if the period or participant is not in
    /// the table.
    pub fn count(&self, period: &BucketKey, participant: &str) -> Option<u64> {
        let row = self.periods.binary_search(period).ok()?;
        let col = self.participants.iter().position(|p| p == participant)?;
        Some(self.counts[row * self.column_count() + col])
    }

    /// Total messages per participant, in column order.
    pub fn participant_totals(&self) -> Vec<u64> {
        let mut totals = vec![0; self.column_count()];
        for (_, row) in self.rows() {
            for (total, count) in totals.iter_mut().zip(row) {
                *total += count;
            }
        }
        totals
    }

    /// Total messages per period, in row order.
    pub fn period_totals(&self) -> Vec<u64> {
        self.rows().map(|(_, row)| row.iter().sum()).collect()
    }

    /// Largest period total (the tallest stacked bar).
    pub fn max_period_total(&self) -> u64 {
        self.period_totals().into_iter().max().unwrap_or(0)
    }

    /// Sum of all cells.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Builds the dense count table for `records`.
///
/// The row range runs from the bucket of the earliest record to the bucket
/// of `now`. Records dated after `now` extend the range so that every record
/// is counted.
///
/// # Errors
///
/// Returns [`ChatstatError::EmptyDataset`] if `records` is empty.
pub fn aggregate(
    records: &[MessageRecord],
    granularity: Granularity,
    now: NaiveDateTime,
) -> Result<AggregationTable> {
    let (Some(min), Some(max)) = (
        records.iter().map(MessageRecord::timestamp).min(),
        records.iter().map(MessageRecord::timestamp).max(),
    ) else {
        return Err(ChatstatError::EmptyDataset);
    };

    let periods = full_range(min, now.max(max), granularity);

    let mut participants: Vec<String> = Vec::new();
    let mut column_of: HashMap<&str, usize> = HashMap::new();
    for record in records {
        column_of.entry(record.participant()).or_insert_with(|| {
            participants.push(record.participant().to_owned());
            participants.len() - 1
        });
    }

    let row_of: HashMap<BucketKey, usize> = periods
        .iter()
        .enumerate()
        .map(|(i, period)| (*period, i))
        .collect();

    let width = participants.len();
    let mut counts = vec![0u64; periods.len() * width];
    for record in records {
        let key = bucket_key(record.timestamp(), granularity);
        if let (Some(row), Some(col)) = (row_of.get(&key), column_of.get(record.participant())) {
            counts[row * width + col] += 1;
        }
    }

    debug!(
        granularity = granularity.as_str(),
        periods = periods.len(),
        participants = width,
        records = records.len(),
        "aggregated message counts"
    );

    Ok(AggregationTable {
        granularity,
        periods,
        participants,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn rec(y: i32, m: u32, d: u32, who: &str) -> MessageRecord {
        MessageRecord::new(at(y, m, d, 9), who)
    }

    #[test]
    fn test_empty_records() {
        let err = aggregate(&[], Granularity::Weekly, at(2024, 1, 1, 0)).unwrap_err();
        assert!(err.is_empty_dataset());
    }

    #[test]
    fn test_daily_scenario() {
        let records = vec![
            rec(2024, 1, 1, "Alice"),
            rec(2024, 1, 1, "Bob"),
            rec(2024, 1, 2, "Alice"),
        ];
        let table = aggregate(&records, Granularity::Daily, at(2024, 1, 3, 0)).unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.participants(), ["Alice", "Bob"]);
        assert_eq!(table.row(0), [1, 1]);
        assert_eq!(table.row(1), [1, 0]);
        assert_eq!(table.row(2), [0, 0]);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_column_order_is_first_appearance() {
        let records = vec![
            rec(2024, 1, 1, "Zoe"),
            rec(2024, 1, 1, "Adam"),
            rec(2024, 1, 1, "Zoe"),
            rec(2024, 1, 1, "Mia"),
        ];
        let table = aggregate(&records, Granularity::Monthly, at(2024, 1, 31, 0)).unwrap();
        assert_eq!(table.participants(), ["Zoe", "Adam", "Mia"]);
        assert_eq!(table.row(0), [2, 1, 1]);
    }

    #[test]
    fn test_weekly_gap_filled() {
        let records = vec![rec(2024, 1, 2, "Alice"), rec(2024, 1, 23, "Bob")];
        let table = aggregate(&records, Granularity::Weekly, at(2024, 1, 24, 0)).unwrap();

        assert_eq!(table.row_count(), 4);
        assert_eq!(table.period_totals(), vec![1, 0, 0, 1]);
        assert_eq!(table.participant_totals(), vec![1, 1]);
    }

    #[test]
    fn test_count_lookup() {
        let records = vec![rec(2024, 3, 5, "Alice"), rec(2024, 3, 6, "Alice")];
        let table = aggregate(&records, Granularity::Monthly, at(2024, 4, 1, 0)).unwrap();
        let march = table.periods()[0];
        let april = table.periods()[1];

        assert_eq!(table.count(&march, "Alice"), Some(2));
        assert_eq!(table.count(&april, "Alice"), Some(0));
        assert_eq!(table.count(&march, "Nobody"), None);
    }

    #[test]
    fn test_records_after_now_are_counted() {
        let records = vec![rec(2024, 1, 1, "Alice"), rec(2024, 1, 10, "Bob")];
        let table = aggregate(&records, Granularity::Daily, at(2024, 1, 5, 0)).unwrap();

        assert_eq!(table.row_count(), 10);
        assert_eq!(table.total(), 2);
    }

    #[test]
    fn test_unsorted_records() {
        let records = vec![rec(2024, 2, 1, "Bob"), rec(2024, 1, 1, "Alice")];
        let table = aggregate(&records, Granularity::Monthly, at(2024, 2, 2, 0)).unwrap();

        assert_eq!(table.participants(), ["Bob", "Alice"]);
        assert_eq!(table.row(0), [0, 1]);
        assert_eq!(table.row(1), [1, 0]);
    }

    #[test]
    fn test_max_period_total() {
        let records = vec![
            rec(2024, 1, 1, "Alice"),
            rec(2024, 1, 2, "Alice"),
            rec(2024, 1, 2, "Bob"),
        ];
        let table = aggregate(&records, Granularity::Daily, at(2024, 1, 2, 0)).unwrap();
        assert_eq!(table.max_period_total(), 2);
    }

    #[test]
    fn test_idempotent() {
        let records = vec![rec(2024, 1, 1, "Alice"), rec(2024, 1, 9, "Bob")];
        let now = at(2024, 2, 1, 0);
        let first = aggregate(&records, Granularity::Weekly, now).unwrap();
        let second = aggregate(&records, Granularity::Weekly, now).unwrap();
        assert_eq!(first, second);
    }
}
