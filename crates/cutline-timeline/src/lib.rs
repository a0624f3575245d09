//! Cutline Timeline - Timeline data model
//!
//! Implements the model the editing engine mutates:
//! - Tracks holding time-positioned items (overlap permitted)
//! - Edit primitives (split, remove, paste, upsert, update)
//! - Snapshot history for linear undo/redo
//! - Project persistence with versioning and lenient load

pub mod edit;
pub mod history;
pub mod item;
pub mod project;
pub mod serialization;
pub mod track;

pub use edit::{extended_duration, Upsert};
pub use history::{History, Snapshot};
pub use item::{Item, ItemPatch, ItemProps};
pub use project::{MediaAsset, MediaKind, Project};
pub use serialization::{ProjectFile, CURRENT_VERSION};
pub use track::{content_end, find_item, find_item_mut, find_track, find_track_mut, Track, TrackKind};
