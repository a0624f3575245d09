//! Command script replay.
//!
//! A script is a JSON array of engine commands, e.g.
//! `[{ "command": "addItem", "trackId": "videoTrack", "item": { "id": "a" } }]`.

use std::path::Path;

use anyhow::{Context, Result};
use cutline_engine::{Timeline, TimelineCommand};
use tracing::{info, warn};

/// Outcome counts of one replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize,
}

pub fn load(path: &Path) -> Result<Vec<TimelineCommand>> {
    let data = std::fs::read(path)
        .with_context(|| format!("reading command script {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("parsing command script {}", path.display()))
}

/// Run every command in order. A rejected command is logged and skipped;
/// the engine stays usable, so the rest of the script still runs.
pub fn replay(timeline: &mut Timeline, commands: Vec<TimelineCommand>) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for (index, command) in commands.into_iter().enumerate() {
        match timeline.execute(command) {
            Ok(()) => summary.applied += 1,
            Err(e) => {
                warn!(index, error = %e, "script command rejected");
                summary.rejected += 1;
            }
        }
    }
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        "script replayed"
    );
    summary
}
