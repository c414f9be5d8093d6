//! Caller-owned analysis state.
//!
//! The pipeline functions are pure. A [`Session`] is what a front end (the
//! CLI, or a GUI) holds between user actions: the currently loaded chat and
//! the selected granularity. Loading a new file replaces the previous chat.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatstat::core::Granularity;
//! use chatstat::session::Session;
//! use chrono::Local;
//!
//! let mut session = Session::new();
//! session.load("WhatsApp Chat.zip".as_ref())?;
//! session.set_granularity(Granularity::Monthly);
//!
//! let table = session.analyze(Local::now().naive_local())?;
//! println!("{} months", table.row_count());
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use crate::MessageRecord;
use crate::core::{AggregationTable, Granularity, aggregate};
use crate::error::{ChatstatError, Result};
use crate::parser::ChatParser;

/// A chat that has been parsed into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedChat {
    source: PathBuf,
    records: Vec<MessageRecord>,
}

impl LoadedChat {
    pub fn new(source: impl Into<PathBuf>, records: Vec<MessageRecord>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    /// The file the records came from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }
}

/// The currently loaded chat plus the selected analysis mode.
#[derive(Debug, Default)]
pub struct Session {
    parser: ChatParser,
    loaded: Option<LoadedChat>,
    granularity: Granularity,
}

impl Session {
    /// Creates an empty session with weekly granularity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `path` and makes it the current chat.
    ///
    /// On error the previously loaded chat, if any, stays loaded.
    pub fn load(&mut self, path: &Path) -> Result<&LoadedChat> {
        let records = self.parser.parse(path)?;
        info!(path = %path.display(), records = records.len(), "chat loaded");
        Ok(self.loaded.insert(LoadedChat::new(path, records)))
    }

    /// Makes already-parsed records the current chat.
    pub fn replace(&mut self, chat: LoadedChat) {
        self.loaded = Some(chat);
    }

    /// Drops the current chat.
    pub fn clear(&mut self) {
        self.loaded = None;
    }

    pub fn loaded(&self) -> Option<&LoadedChat> {
        self.loaded.as_ref()
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    /// Aggregates the current chat at the current granularity.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::EmptyDataset`] when nothing is loaded or the
    /// loaded chat has no records.
    pub fn analyze(&self, now: NaiveDateTime) -> Result<AggregationTable> {
        let chat = self.loaded.as_ref().ok_or(ChatstatError::EmptyDataset)?;
        aggregate(chat.records(), self.granularity, now)
    }
}
