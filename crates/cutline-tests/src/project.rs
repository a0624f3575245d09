//! Integration tests for project persistence through the engine.

use cutline_engine::Timeline;
use cutline_timeline::{ItemPatch, MediaAsset, MediaKind, Project, ProjectFile, TrackKind};

fn edited_timeline() -> Timeline {
    let mut timeline = Timeline::with_default_tracks();
    timeline.set_project_name("Round Trip");
    timeline.add_media(MediaAsset {
        id: "m1".into(),
        name: "beach.mp4".into(),
        kind: MediaKind::Video,
        url: "/uploads/beach.mp4".into(),
        duration: 42.0,
    });
    timeline
        .add_item(
            "videoTrack",
            ItemPatch {
                media_id: Some("m1".into()),
                volume: Some(0.8),
                ..ItemPatch::placed("v1", 0.0, 42.0)
            },
        )
        .unwrap();
    timeline
        .add_item(
            "subtitleTrack",
            ItemPatch {
                text: Some("Hello".into()),
                font_size: Some(3),
                ..ItemPatch::placed("s1", 2.0, 3.0)
            },
        )
        .unwrap();
    timeline
}

#[test]
fn engine_project_survives_json_round_trip() {
    let timeline = edited_timeline();
    let json = ProjectFile::new(timeline.to_project()).to_json().unwrap();

    let loaded = ProjectFile::from_json(&json).unwrap();
    let mut reopened = Timeline::with_default_tracks();
    reopened.load_project(loaded.project);

    assert_eq!(reopened.to_project(), timeline.to_project());
    let subtitle = reopened.item("s1").unwrap();
    assert_eq!(subtitle.kind, TrackKind::Subtitle);
    assert_eq!(subtitle.props.text.as_deref(), Some("Hello"));
    assert_eq!(reopened.media_library()[0].id, "m1");
}

#[test]
fn saved_layout_uses_wire_names() {
    let timeline = edited_timeline();
    let json = ProjectFile::new(timeline.to_project()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();

    assert_eq!(value["name"], "Round Trip");
    assert_eq!(value["mediaLibrary"][0]["type"], "video");
    let video = &value["tracks"][0];
    assert_eq!(video["type"], "video");
    assert_eq!(video["items"][0]["trackId"], "videoTrack");
    assert_eq!(video["items"][0]["startTime"], 0.0);
    assert_eq!(video["items"][0]["mediaId"], "m1");
}

#[test]
fn lenient_load_fills_defaults() {
    let json = br#"{
        "tracks": [
            { "id": "videoTrack", "type": "video",
              "items": [ { "id": "x", "startTime": 50, "duration": 30 } ] },
            { "id": "avatarTrack", "type": "digitalHuman" },
            { "id": "fxTrack", "type": "sparkles" }
        ],
        "duration": null
    }"#;
    let file = ProjectFile::from_json(json).unwrap();

    let mut timeline = Timeline::with_default_tracks();
    timeline.load_project(file.project);

    assert_eq!(timeline.project_name(), "Untitled Project");
    assert_eq!(timeline.tracks()[1].kind, TrackKind::DigitalHuman);
    assert_eq!(timeline.tracks()[2].kind, TrackKind::Other);
    assert_eq!(timeline.item("x").unwrap().track_id, "videoTrack");
    // Content past the default 60s is kept and the timeline grows around it
    assert_eq!(timeline.duration(), 90.0);
    assert_eq!(timeline.current_time(), 0.0);
}

#[test]
fn save_and_load_file() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let path = tmp.path().join("project.json");

    let timeline = edited_timeline();
    ProjectFile::new(timeline.to_project())
        .save_to_file(&path)
        .unwrap();
    let loaded = ProjectFile::load_from_file(&path).unwrap();
    assert_eq!(loaded.project, timeline.to_project());
}

#[test]
fn load_replaces_history() {
    let mut timeline = edited_timeline();
    assert!(timeline.can_undo());
    timeline.load_project(Project::new("Fresh"));
    assert!(!timeline.can_undo());
    assert!(!timeline.undo());
    assert_eq!(timeline.project_name(), "Fresh");
}
