//! Engine configuration and construction options.

use std::fmt;
use std::path::Path;

use cutline_core::{defaults, CutlineError, Result};
use cutline_timeline::Track;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::playback::{Clock, FrameScheduler, ManualScheduler, SystemClock};

/// Feature flags and tunables. Every field has a default, so a partial JSON
/// file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub snap_to_grid: bool,
    /// Seconds
    pub grid_size: f64,
    pub history_enabled: bool,
    pub history_depth: usize,
    /// Seconds
    pub min_item_duration: f64,
    /// Seconds
    pub default_item_duration: f64,
    /// Seconds added past overrunning content
    pub auto_extend_margin: f64,
    pub zoom_factor: f64,
    pub playback_rate: f64,
    /// Seconds per seek
    pub seek_step: f64,
    /// Seconds per seek with Shift held
    pub seek_step_large: f64,
    /// Pixels reserved for track labels when fitting to view
    pub label_width: f64,
    /// Pixels at each item edge that grab a resize handle
    pub handle_width: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            grid_size: defaults::GRID_SIZE,
            history_enabled: true,
            history_depth: defaults::HISTORY_DEPTH,
            min_item_duration: defaults::MIN_ITEM_DURATION,
            default_item_duration: defaults::ITEM_DURATION,
            auto_extend_margin: defaults::AUTO_EXTEND_MARGIN,
            zoom_factor: defaults::ZOOM_FACTOR,
            playback_rate: 1.0,
            seek_step: 1.0,
            seek_step_large: 5.0,
            label_width: defaults::LABEL_WIDTH,
            handle_width: 6.0,
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let config: Self = serde_json::from_slice(&data)
            .map_err(|e| CutlineError::Serialization(format!("Invalid config: {}", e)))?;
        Ok(config.validated())
    }

    /// Replace out-of-range values with their defaults.
    pub fn validated(mut self) -> Self {
        let fallback = Self::default();
        fix_positive("grid_size", &mut self.grid_size, fallback.grid_size);
        fix_positive("min_item_duration", &mut self.min_item_duration, fallback.min_item_duration);
        fix_positive(
            "default_item_duration",
            &mut self.default_item_duration,
            fallback.default_item_duration,
        );
        fix_positive("playback_rate", &mut self.playback_rate, fallback.playback_rate);
        fix_positive("seek_step", &mut self.seek_step, fallback.seek_step);
        fix_positive("seek_step_large", &mut self.seek_step_large, fallback.seek_step_large);
        if self.zoom_factor <= 1.0 || !self.zoom_factor.is_finite() {
            warn!(value = self.zoom_factor, "zoom_factor must exceed 1, using default");
            self.zoom_factor = fallback.zoom_factor;
        }
        if self.auto_extend_margin < 0.0 || !self.auto_extend_margin.is_finite() {
            warn!(value = self.auto_extend_margin, "auto_extend_margin must be >= 0, using default");
            self.auto_extend_margin = fallback.auto_extend_margin;
        }
        if self.label_width < 0.0 || !self.label_width.is_finite() {
            self.label_width = fallback.label_width;
        }
        if self.handle_width < 0.0 || !self.handle_width.is_finite() {
            self.handle_width = fallback.handle_width;
        }
        if self.history_depth == 0 {
            self.history_depth = fallback.history_depth;
        }
        self
    }
}

fn fix_positive(name: &str, value: &mut f64, fallback: f64) {
    if *value <= 0.0 || !value.is_finite() {
        warn!(field = name, value = *value, "must be positive, using default");
        *value = fallback;
    }
}

type Callback = Box<dyn FnMut()>;

/// Optional host callbacks, invoked alongside the event bus.
#[derive(Default)]
pub(crate) struct Callbacks {
    pub(crate) on_change: Option<Callback>,
    pub(crate) on_play: Option<Callback>,
    pub(crate) on_pause: Option<Callback>,
    pub(crate) on_time_update: Option<Callback>,
}

impl Callbacks {
    pub(crate) fn change(&mut self) {
        if let Some(cb) = self.on_change.as_mut() {
            cb();
        }
    }

    pub(crate) fn play(&mut self) {
        if let Some(cb) = self.on_play.as_mut() {
            cb();
        }
    }

    pub(crate) fn pause(&mut self) {
        if let Some(cb) = self.on_pause.as_mut() {
            cb();
        }
    }

    pub(crate) fn time_update(&mut self) {
        if let Some(cb) = self.on_time_update.as_mut() {
            cb();
        }
    }
}

/// Everything needed to construct a [`crate::Timeline`].
pub struct TimelineOptions {
    pub tracks: Vec<Track>,
    /// Nominal length in seconds
    pub duration: f64,
    /// Pixels per second
    pub scale: f64,
    pub config: EngineConfig,
    pub(crate) callbacks: Callbacks,
    pub(crate) scheduler: Box<dyn FrameScheduler>,
    pub(crate) clock: Box<dyn Clock>,
}

impl TimelineOptions {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            duration: defaults::TIMELINE_DURATION,
            scale: defaults::SCALE,
            config: EngineConfig::default(),
            callbacks: Callbacks::default(),
            scheduler: Box::new(ManualScheduler::new()),
            clock: Box::new(SystemClock::new()),
        }
    }

    pub fn tracks(mut self, tracks: Vec<Track>) -> Self {
        self.tracks = tracks;
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_change(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_change = Some(Box::new(f));
        self
    }

    pub fn on_play(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_play = Some(Box::new(f));
        self
    }

    pub fn on_pause(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_pause = Some(Box::new(f));
        self
    }

    pub fn on_time_update(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_time_update = Some(Box::new(f));
        self
    }

    /// Replace the frame source (defaults to [`ManualScheduler`]).
    pub fn scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    /// Replace the wall clock (defaults to [`SystemClock`]).
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineOptions")
            .field("tracks", &self.tracks.len())
            .field("duration", &self.duration)
            .field("scale", &self.scale)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
