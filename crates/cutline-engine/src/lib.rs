//! Cutline Engine - The timeline editing engine
//!
//! A single-threaded engine that owns one timeline and exposes it through an
//! explicit command API:
//! - Pointer drag state machine (move, resize) with grid snapping
//! - Split, delete, copy/paste and upsert edits, all checkpointed
//! - Linear undo/redo
//! - A playback clock driven by host frame callbacks
//! - A synchronous per-engine event bus
//! - Keyboard shortcuts and a serializable command vocabulary

pub mod command;
pub mod config;
pub mod events;
pub mod interaction;
pub mod keymap;
pub mod playback;
pub mod snapping;
pub mod timeline;

pub use command::TimelineCommand;
pub use config::{EngineConfig, TimelineOptions};
pub use events::{EventBus, EventKind, SubscriptionId, TimelineEvent};
pub use interaction::{hit_test, DragMode, DragState, HitZone};
pub use keymap::{Key, Keymap, Modifiers, Shortcut};
pub use playback::{
    Clock, FrameHandle, FrameOutcome, FrameScheduler, ManualClock, ManualScheduler,
    PlaybackClock, SystemClock,
};
pub use snapping::GridSnap;
pub use timeline::Timeline;
