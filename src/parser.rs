//! WhatsApp TXT export parser.
//!
//! Extracts one [`MessageRecord`] per chat line of the form
//!
//! ```text
//! 15/01/2024, 10:30 - Alice: Message text
//! ```
//!
//! Day and month may have one or two digits; the year always has four digits
//! and the time is 24-hour `HH:MM`. Lines that do not start with that
//! timestamp, that lack the `" - "` separator, or that lack a `"Participant: "`
//! prefix are skipped. This drops system notices ("Alice joined") and the
//! continuation lines of multi-line messages.
//!
//! # Example
//!
//! ```rust
//! use chatstat::parser::ChatParser;
//!
//! let parser = ChatParser::new();
//! let records = parser.parse_str(
//!     "01/01/2024, 09:00 - Alice: hi\n\
//!      01/01/2024, 09:05 - Bob: hello\n\
//!      and a second line",
//! )?;
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].participant(), "Bob");
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::MessageRecord;
use crate::archive;
use crate::error::{ChatstatError, Result};

/// Timestamp prefix every chat line starts with, e.g. `1/9/2024, 07:45`.
const LINE_PATTERN: &str = r"^\d{1,2}/\d{1,2}/\d{4}, \d{2}:\d{2}";

/// chrono format for the text before the `" - "` separator.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M";

const SEPARATOR: &str = " - ";
const PARTICIPANT_MARKER: &str = ": ";

static LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINE_PATTERN).expect("line pattern is a valid regex"));

/// Counters describing what [`ChatParser::extract_with_stats`] did with each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Total lines inspected
    pub lines: usize,
    /// Records emitted
    pub records: usize,
    /// Lines not starting with a chat timestamp
    pub not_a_message: usize,
    /// Timestamped lines without the `" - "` separator
    pub missing_separator: usize,
    /// Timestamped lines without a `"Participant: "` prefix
    pub missing_participant: usize,
}

impl ExtractStats {
    /// Number of lines that did not produce a record.
    pub fn skipped(&self) -> usize {
        self.not_a_message + self.missing_separator + self.missing_participant
    }
}

/// What a single line turned into.
enum LineOutcome<'a> {
    Record { date_str: &'a str, participant: &'a str },
    NotAMessage,
    MissingSeparator,
    MissingParticipant,
}

fn classify<'a>(regex: &Regex, line: &'a str) -> LineOutcome<'a> {
    if !regex.is_match(line) {
        return LineOutcome::NotAMessage;
    }
    let Some((date_str, message)) = line.split_once(SEPARATOR) else {
        return LineOutcome::MissingSeparator;
    };
    let Some((participant, _text)) = message.split_once(PARTICIPANT_MARKER) else {
        return LineOutcome::MissingParticipant;
    };
    LineOutcome::Record {
        date_str,
        participant,
    }
}

/// Parses a `DD/MM/YYYY, HH:MM` timestamp.
///
/// `line` is the 1-based line number reported on failure.
pub fn parse_timestamp(date_str: &str, line: usize) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(date_str, TIMESTAMP_FORMAT).map_err(|source| {
        ChatstatError::TimestampParse {
            line,
            input: date_str.to_owned(),
            source,
        }
    })
}

/// Parser for WhatsApp TXT exports (`DD/MM/YYYY, HH:MM - Sender: Message`).
///
/// The parser is stateless apart from its compiled line pattern and can be
/// reused across files.
///
/// # Example
///
/// ```rust,no_run
/// use chatstat::parser::ChatParser;
///
/// let parser = ChatParser::new();
/// let records = parser.parse("WhatsApp Chat.zip".as_ref())?;
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChatParser {
    regex: Regex,
}

impl ChatParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self {
            regex: LINE_REGEX.clone(),
        }
    }

    /// Reads `path` (`.txt` or `.zip`) and extracts its message records.
    pub fn parse(&self, path: &Path) -> Result<Vec<MessageRecord>> {
        let lines = archive::read_lines(path)?;
        self.extract(&lines)
    }

    /// Extracts message records from in-memory export text.
    pub fn parse_str(&self, content: &str) -> Result<Vec<MessageRecord>> {
        self.extract(&archive::split_lines(content))
    }

    /// Extracts message records from lines, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::TimestampParse`] if a line has the shape of a
    /// chat message but its date or time is out of range (for example
    /// `31/02/2024, 10:00`).
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<MessageRecord>> {
        self.extract_with_stats(lines).map(|(records, _)| records)
    }

    /// Like [`extract`](Self::extract), also returning per-line counters.
    pub fn extract_with_stats<S: AsRef<str>>(
        &self,
        lines: &[S],
    ) -> Result<(Vec<MessageRecord>, ExtractStats)> {
        let mut records = Vec::new();
        let mut stats = ExtractStats {
            lines: lines.len(),
            ..ExtractStats::default()
        };

        for (index, line) in lines.iter().enumerate() {
            match classify(&self.regex, line.as_ref()) {
                LineOutcome::Record {
                    date_str,
                    participant,
                } => {
                    let timestamp = parse_timestamp(date_str, index + 1)?;
                    records.push(MessageRecord::new(timestamp, participant));
                }
                LineOutcome::NotAMessage => stats.not_a_message += 1,
                LineOutcome::MissingSeparator => stats.missing_separator += 1,
                LineOutcome::MissingParticipant => stats.missing_participant += 1,
            }
        }

        stats.records = records.len();
        debug!(
            lines = stats.lines,
            records = stats.records,
            not_a_message = stats.not_a_message,
            missing_separator = stats.missing_separator,
            missing_participant = stats.missing_participant,
            "extracted chat records"
        );

        Ok((records, stats))
    }
}

impl Default for ChatParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts message records from lines with a default [`ChatParser`].
pub fn extract<S: AsRef<str>>(lines: &[S]) -> Result<Vec<MessageRecord>> {
    ChatParser::new().extract(lines)
}
