//! Race report generation
//!
//! Writes a plain-text summary of a finished race: when it ran, where, who
//! won, and the final standings.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use podracer_client::{NameTable, RacerPosition};
use std::fs;
use std::path::Path;

/// Write a race report to `path`
pub fn write_race_report(
    path: &Path,
    track_name: Option<&str>,
    positions: &[RacerPosition],
    player_id: Option<u64>,
    names: &NameTable,
) -> Result<()> {
    let report = render_report(Utc::now(), track_name, positions, player_id, names);
    fs::write(path, report).with_context(|| format!("Failed to write report: {:?}", path))?;

    log::info!("Race report written to {:?}", path);
    Ok(())
}

fn render_report(
    generated_at: DateTime<Utc>,
    track_name: Option<&str>,
    positions: &[RacerPosition],
    player_id: Option<u64>,
    names: &NameTable,
) -> String {
    let mut out = String::new();
    out.push_str("═══════════════════════════════════════════════\n");
    out.push_str("  Podracer — Race Report\n");
    out.push_str("═══════════════════════════════════════════════\n\n");
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(track) = track_name {
        out.push_str(&format!("Track:     {}\n", names.track(track)));
    }

    let mut ordered: Vec<&RacerPosition> = positions.iter().collect();
    ordered.sort_by_key(|p| p.final_position.unwrap_or(u32::MAX));

    if let Some(winner) = ordered.iter().find(|p| p.final_position == Some(1)) {
        out.push_str(&format!("Winner:    {}\n", names.racer(&winner.driver_name)));
    }

    out.push_str("\nFinal standings:\n");
    for (rank, position) in ordered.iter().enumerate() {
        let you = if Some(position.id) == player_id {
            " (you)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {}. {}{}\n",
            rank + 1,
            names.racer(&position.driver_name),
            you,
        ));
    }

    out
}
