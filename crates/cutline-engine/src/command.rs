//! Serializable command vocabulary.
//!
//! Every input layer (keymap, context menu, scripted host, tests) drives the
//! engine through these, via [`crate::Timeline::execute`].

use cutline_timeline::ItemPatch;
use serde::{Deserialize, Serialize};

use crate::interaction::HitZone;

/// One engine command. JSON form is internally tagged:
/// `{ "command": "addItem", "trackId": "videoTrack", "item": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TimelineCommand {
    SelectItem { id: String },
    ClearSelection,
    SetCurrentTime { time: f64 },
    SeekForward { seconds: f64 },
    SeekBackward { seconds: f64 },
    SetScale { scale: f64 },
    SetDuration { duration: f64 },
    AddItem { track_id: String, item: ItemPatch },
    UpdateItem { id: String, patch: ItemPatch },
    ResizeItem { id: String, duration: f64 },
    Cut,
    Delete,
    Copy,
    Paste,
    Undo,
    Redo,
    Play,
    Pause,
    TogglePlayback,
    SetPlaybackRate { rate: f64 },
    ZoomIn,
    ZoomOut,
    /// Fit the whole timeline into a container this many pixels wide, or
    /// into the last known viewport width when omitted.
    FitToView {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
    },
    SetSnapToGrid { enabled: bool },
    SetGridSize { size: f64 },
    PointerDown { item_id: String, zone: HitZone, x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    CancelDrag,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_commands() {
        let script = r#"[
            { "command": "addItem", "trackId": "videoTrack",
              "item": { "id": "a", "startTime": 10, "duration": 20 } },
            { "command": "selectItem", "id": "a" },
            { "command": "setCurrentTime", "time": 15 },
            { "command": "cut" },
            { "command": "pointerDown", "itemId": "a_2", "zone": "leftHandle", "x": 150 }
        ]"#;
        let commands: Vec<TimelineCommand> = serde_json::from_str(script).unwrap();

        assert_eq!(commands.len(), 5);
        match &commands[0] {
            TimelineCommand::AddItem { track_id, item } => {
                assert_eq!(track_id, "videoTrack");
                assert_eq!(item.start_time, Some(10.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(commands[3], TimelineCommand::Cut);
        assert_eq!(
            commands[4],
            TimelineCommand::PointerDown {
                item_id: "a_2".into(),
                zone: HitZone::LeftHandle,
                x: 150.0
            }
        );
    }

    #[test]
    fn test_serialize_unit_variant() {
        let json = serde_json::to_string(&TimelineCommand::TogglePlayback).unwrap();
        assert_eq!(json, r#"{"command":"togglePlayback"}"#);
    }
}
