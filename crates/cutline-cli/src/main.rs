//! Cutline - headless timeline host
//!
//! Loads (or creates) a project, replays a command script against the
//! engine, optionally runs the playback clock in real time, and saves.

mod script;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cutline_core::format_timecode;
use cutline_engine::{EngineConfig, EventKind, FrameOutcome, Timeline, TimelineEvent, TimelineOptions};
use cutline_timeline::{Project, ProjectFile};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Display refresh the host simulates while playing.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "cutline")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project file to open; created from the default layout if missing
    project: Option<PathBuf>,

    /// JSON command script to replay
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Engine config (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Play in real time for this many seconds after the script
    #[arg(long, value_name = "SECONDS")]
    play: Option<f64>,

    /// Save here instead of over the project file
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    info!("Cutline starting...");

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let project = match &args.project {
        Some(path) if path.exists() => ProjectFile::load_from_file(path)
            .with_context(|| format!("loading project {}", path.display()))?
            .project,
        _ => Project::default(),
    };

    let mut timeline = Timeline::new(TimelineOptions::new().config(config));
    timeline.on(EventKind::PlayStateChange, |event| {
        if let TimelineEvent::PlayStateChange(playing) = event {
            debug!(playing, "play state changed");
        }
    });
    timeline.load_project(project);

    if let Some(path) = &args.script {
        let commands = script::load(path)?;
        script::replay(&mut timeline, commands);
    }

    if let Some(seconds) = args.play {
        play_for(&mut timeline, Duration::from_secs_f64(seconds.max(0.0))).await;
    }

    let items: usize = timeline.tracks().iter().map(|t| t.item_count()).sum();
    info!(
        tracks = timeline.tracks().len(),
        items,
        duration = %format_timecode(timeline.duration()),
        cursor = %format_timecode(timeline.current_time()),
        "timeline ready"
    );

    if let Some(path) = args.out.as_ref().or(args.project.as_ref()) {
        ProjectFile::new(timeline.to_project())
            .save_to_file(path)
            .with_context(|| format!("saving project {}", path.display()))?;
    }

    Ok(())
}

/// Drive the playback clock from a fixed-rate interval until `limit` elapses
/// or the timeline reaches its end.
async fn play_for(timeline: &mut Timeline, limit: Duration) {
    if !timeline.play() {
        return;
    }
    let started = tokio::time::Instant::now();
    let mut interval = tokio::time::interval(FRAME_INTERVAL);
    while started.elapsed() < limit {
        interval.tick().await;
        if let FrameOutcome::Finished(_) | FrameOutcome::Stale = timeline.tick() {
            break;
        }
    }
    timeline.pause();
}
