//! Cutline Core - Foundation types for the timeline engine
//!
//! This crate provides the types shared by every Cutline crate:
//! - Error taxonomy (invalid operation, not found, serialization)
//! - Time helpers (grid snapping, spans, timecode labels)
//! - Engine-wide default constants

pub mod error;
pub mod seconds;

pub use error::{CutlineError, Result};
pub use seconds::{clamp_time, format_timecode, snap_to_grid, TimeSpan};

/// Default tunables
pub mod defaults {
    /// Nominal timeline length when none is given (seconds)
    pub const TIMELINE_DURATION: f64 = 60.0;

    /// Pixels per second
    pub const SCALE: f64 = 10.0;

    /// Grid interval for snapping (seconds)
    pub const GRID_SIZE: f64 = 0.5;

    /// Shortest span an item may be resized to (seconds)
    pub const MIN_ITEM_DURATION: f64 = 0.1;

    /// Duration given to items added without one (seconds)
    pub const ITEM_DURATION: f64 = 5.0;

    /// Headroom added past an item's end when it overruns the timeline (seconds)
    pub const AUTO_EXTEND_MARGIN: f64 = 10.0;

    /// Multiplier applied by zoom in / divisor applied by zoom out
    pub const ZOOM_FACTOR: f64 = 1.2;

    /// Maximum number of undo steps retained
    pub const HISTORY_DEPTH: usize = 200;

    /// Width of the track label column subtracted by fit-to-view (pixels)
    pub const LABEL_WIDTH: f64 = 100.0;
}
