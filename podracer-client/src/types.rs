//! Core types for the podracer client library
//!
//! This module defines the wire types exchanged with the race server and the
//! error type used throughout the client. The server is the single source of
//! truth: the client never computes race progress itself, it only holds the
//! most recent snapshot returned by a poll.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Track-progress value at which the server considers a racer finished.
///
/// This is the server's track-length convention, not something the client
/// derives. It must be kept in sync with the server.
pub const FINISH_LINE_SEGMENT: u32 = 201;

/// Errors that can occur while talking to the race server
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status {status} for {url}")]
    Api { status: u16, url: String },

    #[error("A track and a racer must be selected before creating a race")]
    MissingSelection,

    #[error("No active race")]
    NoActiveRace,
}

/// A selectable race track
///
/// Read-only, fetched from the server. The `name` field is the server's
/// internal identifier (e.g. "Track 3"); friendly names come from the
/// display-name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track identifier used in race creation
    #[serde(alias = "ID")]
    pub id: u64,
    /// Server-internal track name (e.g. "Track 3")
    #[serde(alias = "Name")]
    pub name: String,
}

/// A selectable racer (car + driver)
///
/// Read-only, fetched from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Racer {
    /// Racer identifier used in race creation
    #[serde(alias = "ID")]
    pub id: u64,
    /// Server-internal driver name (e.g. "Racer 2")
    #[serde(alias = "DriverName")]
    pub driver_name: String,
    /// Top speed stat
    #[serde(alias = "TopSpeed")]
    pub top_speed: u32,
    /// Acceleration stat
    #[serde(alias = "Acceleration")]
    pub acceleration: u32,
    /// Handling stat
    #[serde(alias = "Handling")]
    pub handling: u32,
}

/// Race status as reported by the server
///
/// Any status string the client does not know is mapped to `Unknown`; the
/// polling loop treats it as "keep waiting", same as `NotStarted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RaceStatus {
    /// Race created but not yet started
    #[default]
    NotStarted,
    /// Race running, positions advancing
    InProgress,
    /// Race over, final positions assigned
    Finished,
    /// Unrecognized status string
    #[serde(other)]
    Unknown,
}

impl fmt::Display for RaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceStatus::NotStarted => write!(f, "not-started"),
            RaceStatus::InProgress => write!(f, "in-progress"),
            RaceStatus::Finished => write!(f, "finished"),
            RaceStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Per-racer progress record inside a race snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacerPosition {
    /// Racer identifier
    #[serde(alias = "ID")]
    pub id: u64,
    /// Server-internal driver name
    #[serde(alias = "DriverName")]
    pub driver_name: String,
    /// Authoritative track progress; `FINISH_LINE_SEGMENT` means done
    #[serde(default, alias = "Segment")]
    pub segment: u32,
    /// Final placement, assigned by the server once the racer finishes
    #[serde(default, alias = "FinalPosition")]
    pub final_position: Option<u32>,
}

impl RacerPosition {
    /// Completion percentage derived from the authoritative segment value
    pub fn progress_percent(&self) -> u32 {
        (self.segment as f64 / FINISH_LINE_SEGMENT as f64 * 100.0).round() as u32
    }
}

/// A race snapshot as returned by the server
///
/// The create endpoint serializes Go-style capitalized keys (`ID`, `Track`,
/// `Cars`) while the status endpoint uses lowercase (`status`, `positions`);
/// the aliases below accept both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    /// Race identifier as returned by the server. Note the off-by-one
    /// convention: subsequent start/accelerate/status calls must use this
    /// value minus one (see `Session::record_race`).
    #[serde(alias = "ID")]
    pub id: u64,
    /// Track the race runs on (present in the create response)
    #[serde(default, alias = "Track")]
    pub track: Option<Track>,
    /// Racers participating (present in the create response)
    #[serde(default, alias = "Cars")]
    pub cars: Vec<Racer>,
    /// Current race status
    #[serde(default, alias = "Status")]
    pub status: RaceStatus,
    /// Ordered per-racer progress records
    #[serde(default, alias = "Results", alias = "Positions")]
    pub positions: Vec<RacerPosition>,
}

impl Race {
    /// The identifier the start/accelerate/status endpoints expect for this
    /// race: the returned id minus one.
    pub fn handle(&self) -> u64 {
        self.id.saturating_sub(1)
    }
}
