//! The message record extracted from a chat export.
//!
//! A [`MessageRecord`] is the only thing the aggregation pipeline needs from a
//! chat line: when the message was sent and who sent it. Message text is not
//! kept.
//!
//! # Example
//!
//! ```
//! use chatstat::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(10, 30, 0)
//!     .unwrap();
//! let record = MessageRecord::new(ts, "Alice");
//!
//! assert_eq!(record.participant(), "Alice");
//! assert_eq!(record.date(), ts.date());
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One extracted `(timestamp, participant)` pair.
///
/// Records are immutable once created. The participant label is kept
/// verbatim, so `"Alice"` and `"alice "` are different participants.
///
/// # Serialization
///
/// ```
/// use chatstat::MessageRecord;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let record = MessageRecord::new(ts, "Bob");
/// let json = serde_json::to_string(&record)?;
///
/// assert!(json.contains("\"participant\":\"Bob\""));
/// assert!(json.contains("2024-01-01T09:00:00"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRecord {
    timestamp: NaiveDateTime,
    participant: String,
}

impl MessageRecord {
    /// Creates a record from a timestamp and participant label.
    pub fn new(timestamp: NaiveDateTime, participant: impl Into<String>) -> Self {
        Self {
            timestamp,
            participant: participant.into(),
        }
    }

    /// When the message was sent (minute precision).
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Calendar date the message was sent on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// The sender, exactly as written in the export.
    pub fn participant(&self) -> &str {
        &self.participant
    }
}
