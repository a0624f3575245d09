//! Time helpers for the timeline.
//!
//! Timeline positions are plain `f64` seconds. Scale (pixels per second) is a
//! presentation concern and never stored in the model.

use serde::{Deserialize, Serialize};

/// Quantize `time` to the nearest multiple of `grid_size`.
///
/// A non-positive or non-finite grid leaves the value unchanged. Snapping an
/// already aligned value returns it unchanged.
#[inline]
pub fn snap_to_grid(time: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return time;
    }
    (time / grid_size).round() * grid_size
}

/// Clamp `time` into `[0, max]`.
#[inline]
pub fn clamp_time(time: f64, max: f64) -> f64 {
    time.max(0.0).min(max.max(0.0))
}

/// Format seconds as `m:ss`, the way the ruler labels marks.
pub fn format_timecode(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// A span of timeline time, `[start, start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: f64,
    pub duration: f64,
}

impl TimeSpan {
    #[inline]
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// End time (exclusive).
    #[inline]
    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    /// Half-open containment: `start <= time < end`.
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time < self.end()
    }

    /// Open containment: `start < time < end`. Valid split points satisfy this.
    #[inline]
    pub fn strictly_contains(self, time: f64) -> bool {
        time > self.start && time < self.end()
    }
}
