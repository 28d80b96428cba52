//! View rendering
//!
//! Pure functions mapping domain data to display strings. Nothing here
//! touches the terminal or the network; the application layer decides where
//! the strings go. Empty input collections render a "loading" placeholder
//! rather than an empty list.

use crate::names::NameTable;
use crate::types::{Racer, RacerPosition, Track};

/// Render the selectable track list
pub fn track_list(tracks: &[Track], names: &NameTable) -> String {
    if tracks.is_empty() {
        return "Loading tracks...\n".to_string();
    }

    let mut out = String::from("Tracks\n──────\n");
    for track in tracks {
        out.push_str(&format!("  [{}] {}\n", track.id, names.track(&track.name)));
    }
    out
}

/// Render the selectable racer list with stats
pub fn racer_list(racers: &[Racer], names: &NameTable) -> String {
    if racers.is_empty() {
        return "Loading racers...\n".to_string();
    }

    let mut out = String::from("Racers\n──────\n");
    for racer in racers {
        out.push_str(&format!(
            "  [{}] {} — top speed {}, acceleration {}, handling {}\n",
            racer.id,
            names.racer(&racer.driver_name),
            racer.top_speed,
            racer.acceleration,
            racer.handling,
        ));
    }
    out
}

/// Render a countdown value
pub fn countdown(value: u32) -> String {
    format!("Race starts in... {}\n", value)
}

/// Render the start view shown right after race creation
pub fn race_start(track_name: &str, countdown_from: u32, names: &NameTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("═══ Track: {} ═══\n\n", names.track(track_name)));
    out.push_str(&countdown(countdown_from));
    out.push_str("\nType `gas` as fast as you can to make your racer go faster!\n");
    out
}

/// Render the live leaderboard for an in-progress race
///
/// Rows are ordered by authoritative track progress, leader first.
pub fn progress(positions: &[RacerPosition], player_id: Option<u64>, names: &NameTable) -> String {
    let mut ordered: Vec<&RacerPosition> = positions.iter().collect();
    ordered.sort_by(|a, b| b.segment.cmp(&a.segment));

    let mut out = String::from("Leaderboard\n───────────\n");
    for (rank, position) in ordered.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {}{}  {}%\n",
            rank + 1,
            names.racer(&position.driver_name),
            you_marker(position, player_id),
            position.progress_percent(),
        ));
    }
    out
}

/// Render the final results view
///
/// Rows are ordered by the server-assigned final position; the winner gets
/// a callout line with their friendly name.
pub fn results(positions: &[RacerPosition], player_id: Option<u64>, names: &NameTable) -> String {
    let mut ordered: Vec<&RacerPosition> = positions.iter().collect();
    ordered.sort_by_key(|p| p.final_position.unwrap_or(u32::MAX));

    let mut out = String::from("═══ Race Results ═══\n");

    if let Some(winner) = ordered.iter().find(|p| p.final_position == Some(1)) {
        out.push_str(&format!("🏁 {} wins!\n", names.racer(&winner.driver_name)));
    }
    out.push('\n');

    for (rank, position) in ordered.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {}{}\n",
            rank + 1,
            names.racer(&position.driver_name),
            you_marker(position, player_id),
        ));
    }

    out.push_str("\nRun again to start a new race.\n");
    out
}

fn you_marker(position: &RacerPosition, player_id: Option<u64>) -> &'static str {
    if Some(position.id) == player_id {
        " (you)"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(id: u64, name: &str, segment: u32, final_position: Option<u32>) -> RacerPosition {
        RacerPosition {
            id,
            driver_name: name.to_string(),
            segment,
            final_position,
        }
    }

    #[test]
    fn test_empty_lists_render_placeholder() {
        let names = NameTable::new();
        assert_eq!(track_list(&[], &names), "Loading tracks...\n");
        assert_eq!(racer_list(&[], &names), "Loading racers...\n");
    }

    #[test]
    fn test_track_list_uses_friendly_names() {
        let names = NameTable::new();
        let tracks = vec![Track {
            id: 3,
            name: "Track 3".to_string(),
        }];

        let view = track_list(&tracks, &names);
        assert!(view.contains("[3] Glacier National Park"));
    }

    #[test]
    fn test_progress_ordered_by_segment() {
        let names = NameTable::new();
        let positions = vec![
            position(1, "Racer 1", 50, None),
            position(2, "Racer 2", 120, None),
        ];

        let view = progress(&positions, Some(1), &names);
        let sammy = view.find("Sammy").unwrap();
        let amy = view.find("Amy").unwrap();
        assert!(sammy < amy, "leader must come first:\n{}", view);
        assert!(view.contains("Amy (you)"));
        // 120 / 201 ≈ 60%
        assert!(view.contains("60%"));
    }

    #[test]
    fn test_results_orders_by_final_position_and_names_winner() {
        let names = NameTable::new();
        let positions = vec![
            position(2, "Racer 2", 201, Some(2)),
            position(1, "Racer 1", 201, Some(1)),
        ];

        let view = results(&positions, Some(2), &names);
        assert!(view.contains("🏁 Amy wins!"));
        let first = view.find("1. Amy").unwrap();
        let second = view.find("2. Sammy (you)").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_unknown_driver_renders_server_name() {
        let names = NameTable::new();
        let positions = vec![position(9, "Racer 9", 201, Some(1))];

        let view = results(&positions, None, &names);
        assert!(view.contains("🏁 Racer 9 wins!"));
    }
}
