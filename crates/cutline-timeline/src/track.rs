//! Track types for the timeline.

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Kind of track. Kept separately from the track id so behavior never has to
/// be derived from an identifier string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackKind {
    #[default]
    Video,
    Audio,
    Subtitle,
    DigitalHuman,
    /// Any kind this build does not know about.
    #[serde(other)]
    Other,
}

/// A named lane holding items in insertion order (not time order).
///
/// Items on one track may overlap; the last inserted one draws on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique, stable track ID
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: TrackKind,
    /// Default color for items added to this track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Track {
    /// Create an empty track.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            color: None,
            items: Vec::new(),
        }
    }

    /// Append an item, stamping it with this track's id and kind.
    pub fn push_item(&mut self, item: Item) {
        let item = self.adopt(item);
        self.items.push(item);
    }

    /// Insert an item at the given index (clamped to the end).
    pub fn insert_item(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        let item = self.adopt(item);
        self.items.insert(index, item);
    }

    fn adopt(&self, mut item: Item) -> Item {
        item.track_id = self.id.clone();
        item.kind = self.kind;
        item
    }

    /// Remove an item by id. Returns the removed item.
    pub fn remove_item(&mut self, id: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Find an item by id. Returns (index, &Item).
    pub fn find_item(&self, id: &str) -> Option<(usize, &Item)> {
        self.items.iter().enumerate().find(|(_, item)| item.id == id)
    }

    /// Find an item mutably by id.
    pub fn find_item_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// The topmost (last inserted) item covering `time`.
    pub fn item_at_time(&self, time: f64) -> Option<&Item> {
        self.items.iter().rev().find(|item| item.span().contains(time))
    }

    /// Latest end time over all items, or zero for an empty track.
    pub fn end_time(&self) -> f64 {
        self.items
            .iter()
            .map(Item::end_time)
            .fold(0.0, f64::max)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Re-stamp every item's back-reference from this track. Used after
    /// loading data written by older builds.
    pub fn relink_items(&mut self) {
        for item in &mut self.items {
            item.track_id = self.id.clone();
            item.kind = self.kind;
        }
    }
}

// ── Lookups over a track list ───────────────────────────────────

/// Find a track by id.
pub fn find_track<'a>(tracks: &'a [Track], id: &str) -> Option<&'a Track> {
    tracks.iter().find(|track| track.id == id)
}

/// Find a track mutably by id.
pub fn find_track_mut<'a>(tracks: &'a mut [Track], id: &str) -> Option<&'a mut Track> {
    tracks.iter_mut().find(|track| track.id == id)
}

/// Find an item anywhere in the timeline. Returns its track and the item.
pub fn find_item<'a>(tracks: &'a [Track], id: &str) -> Option<(&'a Track, &'a Item)> {
    tracks
        .iter()
        .find_map(|track| track.find_item(id).map(|(_, item)| (track, item)))
}

/// Find an item mutably anywhere in the timeline.
pub fn find_item_mut<'a>(tracks: &'a mut [Track], id: &str) -> Option<&'a mut Item> {
    tracks.iter_mut().find_map(|track| track.find_item_mut(id))
}

/// Latest end time over every track.
pub fn content_end(tracks: &[Track]) -> f64 {
    tracks.iter().map(Track::end_time).fold(0.0, f64::max)
}
