//! Display-name mapping
//!
//! The server identifies racers and tracks by internal names ("Racer 2",
//! "Track 3"). This module maps those to friendly display names. The table
//! is data-driven so deployments can supply their own mapping from
//! configuration; a key absent from the table falls back to the raw server
//! name instead of rendering a hole in the UI.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from server-internal names to display names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameTable {
    /// Racer name mapping (e.g. "Racer 1" → "Amy")
    #[serde(default)]
    pub racers: HashMap<String, String>,
    /// Track name mapping (e.g. "Track 1" → "Plitvice Lakes")
    #[serde(default)]
    pub tracks: HashMap<String, String>,
}

impl Default for NameTable {
    fn default() -> Self {
        let racers = [
            ("Racer 1", "Amy"),
            ("Racer 2", "Sammy"),
            ("Racer 3", "Sailor"),
            ("Racer 4", "Loren"),
            ("Racer 5", "Nina"),
        ];
        let tracks = [
            ("Track 1", "Plitvice Lakes"),
            ("Track 2", "Yellowstone"),
            ("Track 3", "Glacier National Park"),
            ("Track 4", "Belluno Dolomites"),
            ("Track 5", "Wild Taiga"),
            ("Track 6", "Ordesa"),
        ];

        Self {
            racers: racers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            tracks: tracks
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl NameTable {
    /// Create the default table (the stock racer and track names)
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name for a racer; unknown keys fall back to the server name
    pub fn racer<'a>(&'a self, server_name: &'a str) -> &'a str {
        self.racers
            .get(server_name)
            .map(String::as_str)
            .unwrap_or(server_name)
    }

    /// Display name for a track; unknown keys fall back to the server name
    pub fn track<'a>(&'a self, server_name: &'a str) -> &'a str {
        self.tracks
            .get(server_name)
            .map(String::as_str)
            .unwrap_or(server_name)
    }

    /// Merge another table into this one, the other table winning on
    /// conflicts. Used to overlay configuration onto the defaults.
    pub fn merge(&mut self, other: NameTable) {
        self.racers.extend(other.racers);
        self.tracks.extend(other.tracks);
    }
}
