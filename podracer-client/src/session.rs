//! Client-local session state
//!
//! A session is the only state the client owns: the currently selected
//! track, the selected racer, and the handle of the active race. It lives
//! for the process lifetime and is never persisted. It is passed explicitly
//! into the handlers and the lifecycle controller rather than living in a
//! global.

use crate::types::{ClientError, Race, Result};

/// Selection and race-tracking state for one client run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    track_id: Option<u64>,
    player_id: Option<u64>,
    race_id: Option<u64>,
}

impl Session {
    /// Create a session with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a track, replacing any previous track selection
    pub fn select_track(&mut self, id: u64) {
        log::debug!("Selected track {}", id);
        self.track_id = Some(id);
    }

    /// Select a racer, replacing any previous racer selection
    pub fn select_racer(&mut self, id: u64) {
        log::debug!("Selected racer {}", id);
        self.player_id = Some(id);
    }

    /// Currently selected track, if any
    pub fn track_id(&self) -> Option<u64> {
        self.track_id
    }

    /// Currently selected racer, if any
    pub fn player_id(&self) -> Option<u64> {
        self.player_id
    }

    /// Both selections, or `MissingSelection` if either is unset
    pub fn validated(&self) -> Result<(u64, u64)> {
        match (self.player_id, self.track_id) {
            (Some(player_id), Some(track_id)) => Ok((player_id, track_id)),
            _ => Err(ClientError::MissingSelection),
        }
    }

    /// Store the handle of a freshly created race.
    ///
    /// The server returns an identifier one greater than the value its
    /// start/accelerate/status endpoints expect, so the stored handle is
    /// `race.id - 1`.
    pub fn record_race(&mut self, race: &Race) {
        let handle = race.handle();
        log::info!("Recording race: server id {}, handle {}", race.id, handle);
        self.race_id = Some(handle);
    }

    /// Handle of the active race, or `NoActiveRace` if none was recorded
    pub fn race_id(&self) -> Result<u64> {
        self.race_id.ok_or(ClientError::NoActiveRace)
    }

    /// Whether a race has been created in this session
    pub fn has_active_race(&self) -> bool {
        self.race_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RaceStatus;

    fn race_with_id(id: u64) -> Race {
        Race {
            id,
            track: None,
            cars: Vec::new(),
            status: RaceStatus::NotStarted,
            positions: Vec::new(),
        }
    }

    #[test]
    fn test_selection_replaces_previous() {
        let mut session = Session::new();
        session.select_track(1);
        session.select_track(3);
        session.select_racer(5);
        session.select_racer(2);

        assert_eq!(session.track_id(), Some(3));
        assert_eq!(session.player_id(), Some(2));
    }

    #[test]
    fn test_validated_requires_both_selections() {
        let mut session = Session::new();
        assert!(matches!(
            session.validated(),
            Err(ClientError::MissingSelection)
        ));

        session.select_track(3);
        assert!(matches!(
            session.validated(),
            Err(ClientError::MissingSelection)
        ));

        session.select_racer(2);
        assert_eq!(session.validated().unwrap(), (2, 3));
    }

    #[test]
    fn test_record_race_off_by_one() {
        let mut session = Session::new();

        for (server_id, expected_handle) in [(1, 0), (2, 1), (100, 99)] {
            session.record_race(&race_with_id(server_id));
            assert_eq!(session.race_id().unwrap(), expected_handle);
        }
    }

    #[test]
    fn test_race_id_without_race() {
        let session = Session::new();
        assert!(matches!(session.race_id(), Err(ClientError::NoActiveRace)));
        assert!(!session.has_active_race());
    }
}
