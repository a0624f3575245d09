//! Project and media library types.

use cutline_core::defaults;
use serde::{Deserialize, Serialize};

use crate::track::{Track, TrackKind};

fn default_project_name() -> String {
    "Untitled Project".to_string()
}

fn default_duration() -> f64 {
    defaults::TIMELINE_DURATION
}

/// Kind of imported media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaKind {
    #[default]
    Video,
    Audio,
    Image,
}

/// An entry in the media library. Decoding and import live outside the
/// engine; the library is carried through save/load untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub url: String,
    /// Source length in seconds (images use a fixed still duration)
    #[serde(default)]
    pub duration: f64,
}

/// Persisted project: everything the save/load collaborator round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "default_project_name")]
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub media_library: Vec<MediaAsset>,
}

impl Project {
    /// Create a new project with the standard video, audio and subtitle tracks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Self::default_tracks(),
            duration: defaults::TIMELINE_DURATION,
            media_library: Vec::new(),
        }
    }

    /// The track layout a fresh project starts with.
    pub fn default_tracks() -> Vec<Track> {
        vec![
            Track::new("videoTrack", "Video", TrackKind::Video),
            Track::new("audioTrack", "Audio", TrackKind::Audio),
            Track::new("subtitleTrack", "Subtitles", TrackKind::Subtitle),
        ]
    }

    /// Repair loosely-formed data instead of rejecting it.
    ///
    /// A missing name or non-positive duration falls back to defaults, item
    /// back-references are re-stamped from their owning track, and items with
    /// a non-positive duration get the default item duration.
    pub fn sanitize(&mut self) {
        if self.name.trim().is_empty() {
            self.name = default_project_name();
        }
        if self.duration <= 0.0 || !self.duration.is_finite() {
            self.duration = defaults::TIMELINE_DURATION;
        }
        for track in &mut self.tracks {
            track.relink_items();
            for item in &mut track.items {
                if item.duration <= 0.0 || !item.duration.is_finite() {
                    item.duration = defaults::ITEM_DURATION;
                }
                if item.start_time < 0.0 || !item.start_time.is_finite() {
                    item.start_time = 0.0;
                }
            }
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(default_project_name())
    }
}
