//! Calendar buckets for aggregation.
//!
//! A [`BucketKey`] names one day, one ISO week (Monday to Sunday) or one
//! calendar month. [`bucket_key`] maps a timestamp to its bucket and
//! [`full_range`] lists every bucket between two instants with no gaps.
//!
//! # Example
//!
//! ```rust
//! use chatstat::core::period::{Granularity, bucket_key, full_range};
//! use chrono::NaiveDate;
//!
//! let first = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let now = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap().and_hms_opt(8, 0, 0).unwrap();
//!
//! let key = bucket_key(first, Granularity::Weekly);
//! assert_eq!(key.label(), "2024-01-01/2024-01-07");
//!
//! let range = full_range(first, now, Granularity::Weekly);
//! assert_eq!(range.len(), 3);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Bucket size for aggregation.
///
/// Defaults to [`Weekly`](Granularity::Weekly).
///
/// ```rust
/// use chatstat::core::period::Granularity;
/// use std::str::FromStr;
///
/// assert_eq!(Granularity::from_str("monthly").unwrap(), Granularity::Monthly);
/// assert_eq!(Granularity::from_str("d").unwrap(), Granularity::Daily);
/// assert_eq!(Granularity::default(), Granularity::Weekly);
/// assert_eq!(Granularity::Weekly.to_string(), "Weekly");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar date
    #[serde(alias = "day", alias = "d")]
    Daily,

    /// One bucket per ISO week, starting Monday
    #[default]
    #[serde(alias = "week", alias = "w")]
    Weekly,

    /// One bucket per calendar month
    #[serde(alias = "month", alias = "m")]
    Monthly,
}

impl Granularity {
    /// Returns all granularity names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "daily", "day", "d", "weekly", "week", "w", "monthly", "month", "m",
        ]
    }

    /// Returns all granularities, finest first.
    pub fn all() -> &'static [Granularity] {
        &[Granularity::Daily, Granularity::Weekly, Granularity::Monthly]
    }

    /// Lowercase command name (`daily`, `weekly`, `monthly`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }

    /// First date of the bucket containing `date`.
    fn start_of(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => date,
            Granularity::Weekly => {
                date - Days::new(u64::from(date.weekday().num_days_from_monday()))
            }
            Granularity::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// Start of the bucket after the one starting at `start`.
    fn step(self, start: NaiveDate) -> NaiveDate {
        let next = match self {
            Granularity::Daily => start.checked_add_days(Days::new(1)),
            Granularity::Weekly => start.checked_add_days(Days::new(7)),
            Granularity::Monthly => start.checked_add_months(Months::new(1)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "Daily"),
            Granularity::Weekly => write!(f, "Weekly"),
            Granularity::Monthly => write!(f, "Monthly"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Granularity::Daily),
            "weekly" | "week" | "w" => Ok(Granularity::Weekly),
            "monthly" | "month" | "m" => Ok(Granularity::Monthly),
            _ => Err(format!(
                "Unknown analysis mode: '{}'. Expected one of: {}",
                s,
                Granularity::all_names().join(", ")
            )),
        }
    }
}

/// Canonical identifier of one day, week or month.
///
/// Keys compare by their start date, so a range of keys of the same
/// granularity sorts chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketKey {
    start: NaiveDate,
    granularity: Granularity,
}

impl BucketKey {
    /// Returns the bucket of `granularity` that contains `date`.
    pub fn containing(date: NaiveDate, granularity: Granularity) -> Self {
        Self {
            start: granularity.start_of(date),
            granularity,
        }
    }

    /// First date in the bucket (the date, the week's Monday, or the 1st).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date in the bucket.
    pub fn end(&self) -> NaiveDate {
        self.granularity
            .step(self.start)
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The bucket immediately after this one.
    pub fn next(&self) -> Self {
        Self {
            start: self.granularity.step(self.start),
            granularity: self.granularity,
        }
    }

    /// Returns `true` if `date` falls inside this bucket.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.granularity.start_of(date) == self.start
    }

    /// Human-readable label.
    ///
    /// - daily: `2024-01-15`
    /// - weekly: `2024-01-15/2024-01-21`
    /// - monthly: `2024-01`
    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Daily => self.start.format("%Y-%m-%d").to_string(),
            Granularity::Weekly => format!(
                "{}/{}",
                self.start.format("%Y-%m-%d"),
                self.end().format("%Y-%m-%d")
            ),
            Granularity::Monthly => self.start.format("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Returns the bucket containing `timestamp`.
pub fn bucket_key(timestamp: NaiveDateTime, granularity: Granularity) -> BucketKey {
    BucketKey::containing(timestamp.date(), granularity)
}

/// Every bucket from the one containing `min_timestamp` through the one
/// containing `now`, inclusive and in order.
///
/// The result is never empty: if `now` falls before `min_timestamp`'s bucket,
/// only that bucket is returned.
pub fn full_range(
    min_timestamp: NaiveDateTime,
    now: NaiveDateTime,
    granularity: Granularity,
) -> Vec<BucketKey> {
    let first = bucket_key(min_timestamp, granularity);
    let last = bucket_key(now, granularity);

    let mut range = vec![first];
    let mut current = first;
    while current < last {
        let next = current.next();
        // NaiveDate::MAX saturation; stop instead of looping forever
        if next.start <= current.start {
            break;
        }
        range.push(next);
        current = next;
    }
    range
}
