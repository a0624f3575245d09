//! Item types for the timeline.

use cutline_core::{defaults, TimeSpan};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::track::TrackKind;

fn default_item_duration() -> f64 {
    defaults::ITEM_DURATION
}

/// Kind-specific fields of an item. Which ones are meaningful depends on the
/// owning track's kind; all are optional plain data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemProps {
    /// Playback volume, 0.0..=1.0 (video, audio)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
    /// Playback speed multiplier (video)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fade_in: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fade_out: bool,
    /// Subtitle text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Subtitle size step, 1..=5
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u8>,
    /// Media library asset this item plays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Free-form collaborator data
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

/// A time-positioned unit of content on exactly one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique across the whole timeline
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Owning track (back-reference, not ownership)
    #[serde(default)]
    pub track_id: String,
    /// Copied from the owning track on insertion
    #[serde(default)]
    pub kind: TrackKind,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default = "default_item_duration")]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub props: ItemProps,
}

impl Item {
    /// Create an item at time zero with the default duration.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            track_id: String::new(),
            kind: TrackKind::default(),
            start_time: 0.0,
            duration: defaults::ITEM_DURATION,
            color: None,
            props: ItemProps::default(),
        }
    }

    /// Builder: place the item at `start` for `duration` seconds.
    pub fn at(mut self, start: f64, duration: f64) -> Self {
        self.start_time = start;
        self.duration = duration;
        self
    }

    /// The span this item covers on the timeline.
    #[inline]
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start_time, self.duration)
    }

    /// End time (exclusive).
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// A partial item: every field optional.
///
/// Used both to build new items (missing fields take defaults) and to merge
/// into existing ones (present fields overwrite, absent fields are kept).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
    pub color: Option<String>,
    pub volume: Option<f32>,
    pub speed: Option<f64>,
    pub fade_in: Option<bool>,
    pub fade_out: Option<bool>,
    pub text: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<u8>,
    pub media_id: Option<String>,
    pub media_url: Option<String>,
    pub data: Option<Map<String, Value>>,
}

impl ItemPatch {
    /// Patch carrying only an id and a placement.
    pub fn placed(id: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            id: Some(id.into()),
            start_time: Some(start),
            duration: Some(duration),
            ..Default::default()
        }
    }

    /// Shallow overwrite: every present field replaces the item's value.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(start) = self.start_time {
            item.start_time = start.max(0.0);
        }
        if let Some(duration) = self.duration {
            item.duration = duration;
        }
        if let Some(color) = &self.color {
            item.color = Some(color.clone());
        }
        let props = &mut item.props;
        if let Some(volume) = self.volume {
            props.volume = Some(volume);
        }
        if let Some(speed) = self.speed {
            props.speed = Some(speed);
        }
        if let Some(fade_in) = self.fade_in {
            props.fade_in = fade_in;
        }
        if let Some(fade_out) = self.fade_out {
            props.fade_out = fade_out;
        }
        if let Some(text) = &self.text {
            props.text = Some(text.clone());
        }
        if let Some(font) = &self.font {
            props.font = Some(font.clone());
        }
        if let Some(size) = self.font_size {
            props.font_size = Some(size);
        }
        if let Some(media_id) = &self.media_id {
            props.media_id = Some(media_id.clone());
        }
        if let Some(media_url) = &self.media_url {
            props.media_url = Some(media_url.clone());
        }
        if let Some(data) = &self.data {
            props.data = data.clone();
        }
    }

    /// Build a fresh item, filling gaps from the defaults.
    ///
    /// `id` is used when the patch carries none. A negative start is pulled
    /// back to zero; a missing or non-positive duration becomes
    /// `default_duration`.
    pub fn into_item(self, id: String, default_duration: f64) -> Item {
        let mut item = Item::new(self.id.clone().unwrap_or(id), "Item");
        item.duration = default_duration;
        self.apply_to(&mut item);
        if item.duration <= 0.0 || !item.duration.is_finite() {
            item.duration = default_duration;
        }
        item
    }
}
