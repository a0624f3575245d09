//! Integration tests for the editing engine.
//!
//! Drives `cutline-engine` end to end and checks the resulting
//! `cutline-timeline` model.

use std::cell::RefCell;
use std::rc::Rc;

use cutline_core::CutlineError;
use cutline_engine::{
    EngineConfig, EventKind, FrameOutcome, HitZone, Key, Keymap, ManualClock, ManualScheduler,
    Modifiers, Timeline, TimelineCommand, TimelineEvent, TimelineOptions,
};
use cutline_timeline::{ItemPatch, Project, Track, TrackKind};

// ── Helpers ────────────────────────────────────────────────────

fn empty_video_timeline() -> Timeline {
    Timeline::new(
        TimelineOptions::new()
            .tracks(vec![Track::new("videoTrack", "Video", TrackKind::Video)])
            .duration(60.0),
    )
}

fn timeline_with_clock(clock: ManualClock) -> Timeline {
    Timeline::new(
        TimelineOptions::new()
            .tracks(Project::default_tracks())
            .clock(clock)
            .scheduler(ManualScheduler::new()),
    )
}

fn event_log(timeline: &mut Timeline) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let sink = Rc::clone(&log);
        timeline.on(kind, move |event: &TimelineEvent<'_>| {
            sink.borrow_mut().push(event.kind().to_string());
        });
    }
    log
}

// ── Edit scenarios ─────────────────────────────────────────────

#[test]
fn add_select_and_cut_at_cursor() {
    let mut timeline = empty_video_timeline();
    let item = timeline
        .add_item("videoTrack", ItemPatch::placed("a", 10.0, 20.0))
        .unwrap();
    assert_eq!(item.span().end(), 30.0);
    assert_eq!(timeline.track("videoTrack").unwrap().item_count(), 1);

    timeline.select_item_by_id("a").unwrap();
    timeline.set_current_time(15.0).unwrap();
    timeline.cut_selected_item().unwrap();

    let items = &timeline.track("videoTrack").unwrap().items;
    let spans: Vec<_> = items
        .iter()
        .map(|i| (i.id.as_str(), i.start_time, i.end_time()))
        .collect();
    assert_eq!(spans, [("a_1", 10.0, 15.0), ("a_2", 15.0, 30.0)]);
    assert_eq!(timeline.selected_item().unwrap().id, "a_2");
}

#[test]
fn copy_then_paste_at_forty() {
    let mut timeline = empty_video_timeline();
    timeline
        .add_item("videoTrack", ItemPatch::placed("clip", 10.0, 5.0))
        .unwrap();
    timeline.select_item_by_id("clip").unwrap();
    timeline.copy_selected_item().unwrap();
    timeline.set_current_time(40.0).unwrap();

    let id = timeline.paste_item().unwrap();
    let pasted = timeline.item(&id).unwrap();
    assert_ne!(pasted.id, "clip");
    assert_eq!(pasted.start_time, 40.0);
    assert_eq!(pasted.duration, 5.0);
    assert_eq!(pasted.track_id, "videoTrack");
}

#[test]
fn rejected_edits_leave_engine_usable() {
    let mut timeline = empty_video_timeline();
    timeline
        .add_item("videoTrack", ItemPatch::placed("a", 0.0, 5.0))
        .unwrap();
    let before = timeline.to_project();
    let depth = timeline.history_index();

    assert!(matches!(
        timeline.cut_selected_item(),
        Err(CutlineError::InvalidOperation(_))
    ));
    assert!(timeline.select_item_by_id("missing").unwrap_err().is_not_found());
    assert!(timeline.paste_item().is_err());
    timeline.select_item_by_id("a").unwrap();
    timeline.set_current_time(30.0).unwrap();
    assert!(timeline.cut_selected_item().is_err());

    assert_eq!(timeline.to_project(), before);
    assert_eq!(timeline.history_index(), depth);

    // Still editable afterwards
    timeline.set_current_time(2.0).unwrap();
    assert!(timeline.cut_selected_item().is_ok());
}

#[test]
fn auto_extend_on_add_and_paste() {
    let mut timeline = empty_video_timeline();
    timeline
        .add_item("videoTrack", ItemPatch::placed("a", 58.0, 4.0))
        .unwrap();
    assert_eq!(timeline.duration(), 72.0);

    timeline.select_item_by_id("a").unwrap();
    timeline.copy_selected_item().unwrap();
    timeline.set_current_time(70.0).unwrap();
    timeline.paste_item().unwrap();
    assert_eq!(timeline.duration(), 84.0);
}

// ── History ────────────────────────────────────────────────────

#[test]
fn undo_redo_across_mixed_edits() {
    let mut timeline = empty_video_timeline();
    timeline
        .add_item("videoTrack", ItemPatch::placed("a", 10.0, 20.0))
        .unwrap();
    timeline.select_item_by_id("a").unwrap();
    timeline.set_current_time(12.0).unwrap();
    timeline.cut_selected_item().unwrap();
    timeline.delete_selected_item().unwrap();
    timeline.set_duration(90.0).unwrap();
    let after = timeline.to_project();
    assert_eq!(timeline.history_index(), 4);

    while timeline.undo() {}
    assert_eq!(timeline.history_index(), 0);
    assert!(timeline.tracks()[0].items.is_empty());
    assert_eq!(timeline.duration(), 60.0);

    while timeline.redo() {}
    assert_eq!(timeline.to_project(), after);
}

#[test]
fn drag_is_one_undo_step() {
    let mut timeline = empty_video_timeline();
    timeline
        .add_item("videoTrack", ItemPatch::placed("a", 10.0, 5.0))
        .unwrap();

    for command in [
        TimelineCommand::PointerDown {
            item_id: "a".into(),
            zone: HitZone::Body,
            x: 100.0,
        },
        TimelineCommand::PointerMove { x: 150.0 },
        TimelineCommand::PointerMove { x: 200.0 },
        TimelineCommand::PointerMove { x: 260.0 },
        TimelineCommand::PointerUp,
    ] {
        timeline.execute(command).unwrap();
    }
    assert_eq!(timeline.item("a").unwrap().start_time, 26.0);

    assert!(timeline.undo());
    assert_eq!(timeline.item("a").unwrap().start_time, 10.0);
    assert!(timeline.undo());
    assert!(timeline.item("a").is_none());
}

// ── Events ─────────────────────────────────────────────────────

#[test]
fn events_fire_in_order() {
    let mut timeline = empty_video_timeline();
    let log = event_log(&mut timeline);

    timeline
        .add_item("videoTrack", ItemPatch::placed("a", 0.0, 5.0))
        .unwrap();
    timeline.pointer_down("a", HitZone::RightHandle, 50.0).unwrap();
    timeline.pointer_move(80.0);
    timeline.pointer_up();
    timeline.set_current_time(1.0).unwrap();

    assert_eq!(
        *log.borrow(),
        ["tracksUpdated", "selectionChange", "trackChanged", "timeChange"]
    );
}

#[test]
fn separate_engines_do_not_share_listeners() {
    let mut first = empty_video_timeline();
    let mut second = empty_video_timeline();
    let log = event_log(&mut first);

    second.set_current_time(5.0).unwrap();
    assert!(log.borrow().is_empty());
    first.set_current_time(5.0).unwrap();
    assert_eq!(log.borrow().len(), 1);
}

// ── Playback ───────────────────────────────────────────────────

#[test]
fn playback_clamps_at_end() {
    let clock = ManualClock::new(10_000.0);
    let mut timeline = timeline_with_clock(clock.clone());
    let duration = timeline.duration();

    timeline.set_current_time(duration - 0.01).unwrap();
    timeline.play();
    clock.advance(1_000.0);

    assert!(matches!(timeline.tick(), FrameOutcome::Finished(_)));
    assert_eq!(timeline.current_time(), duration);
    assert!(!timeline.is_playing());
}

#[test]
fn playback_follows_wall_clock() {
    let clock = ManualClock::new(0.0);
    let mut timeline = timeline_with_clock(clock.clone());
    timeline.play();

    for _ in 0..60 {
        clock.advance(16.0);
        timeline.tick();
    }
    assert!((timeline.current_time() - 0.96).abs() < 1e-9);
    assert!(timeline.is_playing());

    timeline.pause();
    assert!(timeline.pending_frame().is_none());
}

// ── Keyboard ───────────────────────────────────────────────────

#[test]
fn keymap_drives_engine() {
    let mut timeline = empty_video_timeline();
    let keymap = Keymap::from_config(&EngineConfig::default());
    timeline
        .add_item("videoTrack", ItemPatch::placed("a", 0.0, 5.0))
        .unwrap();
    timeline.select_item_by_id("a").unwrap();

    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    let presses = [
        (ctrl, Key::char('c')),
        (Modifiers::SHIFT, Key::ArrowRight),
        (Modifiers::NONE, Key::ArrowRight),
        (ctrl, Key::char('v')),
    ];
    for (modifiers, key) in presses {
        let command = keymap.resolve(modifiers, key).cloned().unwrap();
        timeline.execute(command).unwrap();
    }

    assert_eq!(timeline.current_time(), 6.0);
    assert_eq!(timeline.selected_item().unwrap().start_time, 6.0);
    assert_eq!(timeline.track("videoTrack").unwrap().item_count(), 2);

    let undo = keymap.resolve(ctrl, Key::char('z')).cloned().unwrap();
    timeline.execute(undo).unwrap();
    assert_eq!(timeline.track("videoTrack").unwrap().item_count(), 1);
}
