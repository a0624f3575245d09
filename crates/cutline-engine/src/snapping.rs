//! Grid snapping for timeline interactions.

use cutline_core::{defaults, snap_to_grid};

/// Quantizes dragged times to a fixed grid when enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnap {
    pub enabled: bool,
    /// Grid interval in seconds (non-positive disables snapping).
    pub grid_size: f64,
}

impl GridSnap {
    pub fn new(enabled: bool, grid_size: f64) -> Self {
        Self { enabled, grid_size }
    }

    fn active(&self) -> bool {
        self.enabled && self.grid_size > 0.0 && self.grid_size.is_finite()
    }

    /// Snap a time position. Returns it unchanged when snapping is off.
    pub fn snap_time(&self, time: f64) -> f64 {
        if !self.active() {
            return time;
        }
        snap_to_grid(time, self.grid_size)
    }

    /// Snap a duration, never below one grid step.
    pub fn snap_duration(&self, duration: f64) -> f64 {
        if !self.active() {
            return duration;
        }
        snap_to_grid(duration, self.grid_size).max(self.grid_size)
    }
}

impl Default for GridSnap {
    fn default() -> Self {
        Self::new(true, defaults::GRID_SIZE)
    }
}
