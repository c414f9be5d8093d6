//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Mode`] - Analysis mode selector, converted into [`Granularity`]

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::Granularity;

/// Count WhatsApp messages per participant by day, week or month.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstat \"WhatsApp Chat with Alice.txt\"
    chatstat export.zip --mode monthly
    chatstat export.zip -m d --chart activity.svg
    chatstat chat.txt --mode daily --now 2024-01-03")]
pub struct Args {
    /// Path to the chat export (.txt or .zip)
    pub input: PathBuf,

    /// Bucket size for counting messages
    #[arg(short, long, value_enum, default_value = "weekly")]
    pub mode: Mode,

    /// Write a stacked bar chart (SVG) to this file
    #[arg(short, long, value_name = "FILE")]
    pub chart: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today instead of the system clock
    #[arg(long, value_name = "DATE", value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,

    /// Hide the totals column and row
    #[arg(long)]
    pub no_totals: bool,

    /// Chart title (defaults to "Message Count by <Mode>")
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parses `--now` as the last minute of the given day.
fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{value}': {e} (expected YYYY-MM-DD)"))?;
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
    Ok(date.and_time(end_of_day))
}

/// Analysis modes accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One row per day
    #[value(alias = "d")]
    Daily,

    /// One row per week, Monday to Sunday (default)
    #[default]
    #[value(alias = "w")]
    Weekly,

    /// One row per calendar month
    #[value(alias = "m")]
    Monthly,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Granularity::from(*self))
    }
}

impl From<Mode> for Granularity {
    fn from(mode: Mode) -> Granularity {
        match mode {
            Mode::Daily => Granularity::Daily,
            Mode::Weekly => Granularity::Weekly,
            Mode::Monthly => Granularity::Monthly,
        }
    }
}
