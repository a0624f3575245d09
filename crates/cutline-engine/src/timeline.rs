//! The timeline engine.
//!
//! One [`Timeline`] exclusively owns its tracks and items. Every mutation goes
//! through the methods here so history stays consistent: each edit captures a
//! snapshot first, applies a primitive from `cutline_timeline` (which leaves
//! the model untouched on error), and only then records the checkpoint. A
//! rejected command therefore never consumes a history entry.

use std::fmt;

use cutline_core::{clamp_time, CutlineError, Result};
use cutline_timeline::edit::{self, Upsert};
use cutline_timeline::{
    content_end, extended_duration, find_item, find_item_mut, find_track, History, Item,
    ItemPatch, MediaAsset, Project, Snapshot, Track,
};
use tracing::{debug, info, trace, warn};

use crate::command::TimelineCommand;
use crate::config::{Callbacks, EngineConfig, TimelineOptions};
use crate::events::{EventBus, EventKind, SubscriptionId, TimelineEvent};
use crate::interaction::{hit_test, DragState, HitZone};
use crate::playback::{Clock, FrameHandle, FrameOutcome, FrameScheduler, PlaybackClock};
use crate::snapping::GridSnap;

/// Log a rejected command and pass the error through.
fn rejected(op: &'static str) -> impl FnOnce(CutlineError) -> CutlineError {
    move |err| {
        warn!(op, %err, "command rejected");
        err
    }
}

fn require_positive(what: &str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(CutlineError::InvalidParameter(format!(
            "{what} must be positive, got {value}"
        )))
    }
}

fn require_finite(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CutlineError::InvalidParameter(format!(
            "{what} must be finite, got {value}"
        )))
    }
}

/// Timeline editing engine.
pub struct Timeline {
    tracks: Vec<Track>,
    duration: f64,
    current_time: f64,
    /// Pixels per second
    scale: f64,
    selected: Option<String>,
    clipboard: Option<Item>,
    drag: Option<DragState>,
    history: History,
    config: EngineConfig,
    snap: GridSnap,
    /// Last container width handed to `fit_to_view`
    viewport_width: Option<f64>,
    project_name: String,
    media_library: Vec<MediaAsset>,
    playback: PlaybackClock,
    scheduler: Box<dyn FrameScheduler>,
    clock: Box<dyn Clock>,
    bus: EventBus,
    callbacks: Callbacks,
}

impl Timeline {
    pub fn new(options: TimelineOptions) -> Self {
        let TimelineOptions {
            mut tracks,
            duration,
            scale,
            config,
            callbacks,
            scheduler,
            clock,
        } = options;
        let config = config.validated();

        let duration = require_positive("duration", duration).unwrap_or_else(|err| {
            warn!(%err, "using default timeline duration");
            cutline_core::defaults::TIMELINE_DURATION
        });
        let scale = require_positive("scale", scale).unwrap_or_else(|err| {
            warn!(%err, "using default scale");
            cutline_core::defaults::SCALE
        });
        for track in &mut tracks {
            track.relink_items();
        }
        let duration = extended_duration(duration, content_end(&tracks), config.auto_extend_margin);

        Self {
            tracks,
            duration,
            current_time: 0.0,
            scale,
            selected: None,
            clipboard: None,
            drag: None,
            history: History::new(config.history_depth),
            snap: GridSnap::new(config.snap_to_grid, config.grid_size),
            viewport_width: None,
            project_name: Project::default().name,
            media_library: Vec::new(),
            playback: PlaybackClock::new(config.playback_rate),
            config,
            scheduler,
            clock,
            bus: EventBus::new(),
            callbacks,
        }
    }

    /// Engine over a fresh project's default tracks.
    pub fn with_default_tracks() -> Self {
        Self::new(TimelineOptions::new().tracks(Project::default_tracks()))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        find_track(&self.tracks, id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        find_item(&self.tracks, id).map(|(_, item)| item)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected.as_deref().and_then(|id| self.item(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clipboard(&self) -> Option<&Item> {
        self.clipboard.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback.rate()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.config.history_enabled && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.config.history_enabled && self.history.can_redo()
    }

    /// Number of steps that can be undone.
    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The frame callback the host owes the engine while playing.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.playback.pending()
    }

    /// Topmost item on `track_id` covering `time`.
    pub fn item_at(&self, track_id: &str, time: f64) -> Option<&Item> {
        self.track(track_id)?.item_at_time(time)
    }

    /// Topmost item covering `time` on each track, in track order.
    pub fn items_at(&self, time: f64) -> Vec<&Item> {
        self.tracks
            .iter()
            .filter_map(|track| track.item_at_time(time))
            .collect()
    }

    /// Which item (and which part of it) sits under pixel `x` on a track.
    pub fn pick(&self, track_id: &str, x: f64) -> Option<(&Item, HitZone)> {
        let track = self.track(track_id)?;
        track.items.iter().rev().find_map(|item| {
            hit_test(item.span(), self.scale, x, self.config.handle_width).map(|zone| (item, zone))
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn media_library(&self) -> &[MediaAsset] {
        &self.media_library
    }

    // ── Subscription ────────────────────────────────────────────

    /// Subscribe to one kind of event.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&TimelineEvent<'_>) + 'static,
    {
        self.bus.on(kind, listener)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.bus.off(id)
    }

    // ── Notification helpers ────────────────────────────────────

    fn notify_tracks(&mut self) {
        self.bus.emit(&TimelineEvent::TracksUpdated(&self.tracks));
        self.callbacks.change();
    }

    fn notify_selection(&mut self) {
        let item = self
            .selected
            .as_deref()
            .and_then(|id| find_item(&self.tracks, id))
            .map(|(_, item)| item);
        self.bus.emit(&TimelineEvent::SelectionChange(item));
        self.callbacks.change();
    }

    fn notify_time(&mut self) {
        self.bus.emit(&TimelineEvent::TimeChange(self.current_time));
        self.callbacks.time_update();
    }

    // ── History plumbing ────────────────────────────────────────

    fn capture(&self) -> Option<Snapshot> {
        self.config
            .history_enabled
            .then(|| Snapshot::capture(&self.tracks, self.duration))
    }

    fn commit(&mut self, before: Option<Snapshot>) {
        if let Some(snapshot) = before {
            self.history.checkpoint(snapshot);
        }
    }

    /// Grow the duration so content ending at `end` is not truncated.
    fn extend_to(&mut self, end: f64) {
        let grown = extended_duration(self.duration, end, self.config.auto_extend_margin);
        if grown != self.duration {
            debug!(from = self.duration, to = grown, "timeline auto-extended");
            self.duration = grown;
        }
    }

    /// Swap in a restored snapshot and repair everything that may now point
    /// at state that no longer exists.
    fn restore(&mut self, snapshot: Snapshot) {
        self.tracks = snapshot.tracks;
        self.duration = snapshot.duration;
        self.drag = None;

        let clamped = clamp_time(self.current_time, self.duration);
        let time_moved = clamped != self.current_time;
        self.current_time = clamped;
        if self.playback.is_playing() {
            self.playback.rebase(self.clock.now_ms(), clamped);
        }

        let stale = self
            .selected
            .as_deref()
            .is_some_and(|id| find_item(&self.tracks, id).is_none());
        if stale {
            self.selected = None;
        }

        self.notify_tracks();
        if stale {
            self.notify_selection();
        }
        if time_moved {
            self.notify_time();
        }
    }

    // ── Selection ───────────────────────────────────────────────

    /// Select `item`, which must belong to this timeline.
    pub fn select_item(&mut self, item: &Item) -> Result<()> {
        self.select_item_by_id(&item.id)
    }

    pub fn select_item_by_id(&mut self, id: &str) -> Result<()> {
        if self.item(id).is_none() {
            return Err(CutlineError::ItemNotFound(id.to_string())).map_err(rejected("select"));
        }
        self.selected = Some(id.to_string());
        self.notify_selection();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.notify_selection();
        }
    }

    // ── Time & view ─────────────────────────────────────────────

    /// Move the cursor, clamped to `[0, duration]`.
    pub fn set_current_time(&mut self, time: f64) -> Result<()> {
        let time = require_finite("time", time).map_err(rejected("set_current_time"))?;
        self.current_time = clamp_time(time, self.duration);
        if self.playback.is_playing() {
            self.playback.rebase(self.clock.now_ms(), self.current_time);
        }
        self.notify_time();
        Ok(())
    }

    pub fn seek_forward(&mut self, seconds: f64) -> Result<()> {
        self.set_current_time(self.current_time + seconds)
    }

    pub fn seek_backward(&mut self, seconds: f64) -> Result<()> {
        self.set_current_time(self.current_time - seconds)
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        self.scale = require_positive("scale", scale).map_err(rejected("set_scale"))?;
        Ok(())
    }

    /// Set the nominal length. Checkpointed; the cursor is pulled back inside.
    pub fn set_duration(&mut self, duration: f64) -> Result<()> {
        let duration = require_positive("duration", duration).map_err(rejected("set_duration"))?;
        let before = self.capture();
        self.duration = duration;
        self.commit(before);
        debug!(duration, "duration set");

        let clamped = clamp_time(self.current_time, duration);
        if clamped != self.current_time {
            self.current_time = clamped;
            self.notify_time();
        }
        self.callbacks.change();
        Ok(())
    }

    pub fn zoom_in(&mut self) {
        self.scale *= self.config.zoom_factor;
    }

    pub fn zoom_out(&mut self) {
        self.scale /= self.config.zoom_factor;
    }

    /// Remember the host's container width for later fits.
    pub fn set_viewport_width(&mut self, width: f64) -> Result<()> {
        self.viewport_width =
            Some(require_positive("viewport width", width).map_err(rejected("set_viewport_width"))?);
        Ok(())
    }

    /// Scale so the whole duration fits `width` pixels, less the label column.
    /// Without a width, the last known viewport width is used.
    pub fn fit_to_view(&mut self, width: Option<f64>) -> Result<()> {
        let width = match width.or(self.viewport_width) {
            Some(width) => width,
            None => {
                return Err(CutlineError::invalid("no viewport width known"))
                    .map_err(rejected("fit_to_view"))
            }
        };
        let usable = require_positive("visible width", width - self.config.label_width)
            .map_err(rejected("fit_to_view"))?;
        self.viewport_width = Some(width);
        self.scale = usable / self.duration;
        Ok(())
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.config.snap_to_grid = enabled;
        self.snap.enabled = enabled;
    }

    pub fn set_grid_size(&mut self, size: f64) -> Result<()> {
        let size = require_positive("grid size", size).map_err(rejected("set_grid_size"))?;
        self.config.grid_size = size;
        self.snap.grid_size = size;
        Ok(())
    }

    // ── Edits ───────────────────────────────────────────────────

    /// Replace the whole track list.
    pub fn update_tracks(&mut self, mut tracks: Vec<Track>) {
        let before = self.capture();
        for track in &mut tracks {
            track.relink_items();
        }
        self.tracks = tracks;
        self.commit(before);
        self.drag = None;
        self.extend_to(content_end(&self.tracks));

        let stale = self
            .selected
            .as_deref()
            .is_some_and(|id| find_item(&self.tracks, id).is_none());
        if stale {
            self.selected = None;
        }
        debug!(tracks = self.tracks.len(), "tracks replaced");
        self.notify_tracks();
        if stale {
            self.notify_selection();
        }
    }

    /// Insert an item on `track_id`, or merge into the existing item with the
    /// patch's id.
    pub fn add_item(&mut self, track_id: &str, patch: ItemPatch) -> Result<Item> {
        let before = self.capture();
        let (item, outcome) = edit::upsert_item(
            &mut self.tracks,
            track_id,
            patch,
            self.config.default_item_duration,
        )
        .map_err(rejected("add_item"))?;
        self.commit(before);
        self.extend_to(item.end_time());

        match outcome {
            Upsert::Inserted => debug!(item = %item.id, track = track_id, "item added"),
            Upsert::Updated => debug!(item = %item.id, track = track_id, "item merged"),
        }
        self.notify_tracks();
        Ok(item)
    }

    /// Overwrite any subset of an item's fields.
    pub fn update_item(&mut self, id: &str, patch: &ItemPatch) -> Result<Item> {
        let before = self.capture();
        let item = edit::update_item(&mut self.tracks, id, patch).map_err(rejected("update_item"))?;
        self.commit(before);
        self.extend_to(item.end_time());
        debug!(item = id, "item updated");
        self.notify_tracks();
        Ok(item)
    }

    /// Set an item's duration, snapped to the grid when snapping is on.
    pub fn resize_item(&mut self, id: &str, duration: f64) -> Result<Item> {
        let duration = require_positive("duration", duration).map_err(rejected("resize_item"))?;
        let duration = self
            .snap
            .snap_duration(duration)
            .max(self.config.min_item_duration);
        let patch = ItemPatch {
            duration: Some(duration),
            ..Default::default()
        };
        self.update_item(id, &patch)
    }

    /// Split the selected item at the cursor. The second half becomes selected;
    /// its id is returned.
    pub fn cut_selected_item(&mut self) -> Result<String> {
        let id = self
            .selected
            .clone()
            .ok_or_else(|| CutlineError::invalid("no item selected"))
            .map_err(rejected("cut"))?;
        let before = self.capture();
        let second = edit::split_item(&mut self.tracks, &id, self.current_time)
            .map_err(rejected("cut"))?;
        self.commit(before);

        debug!(item = %id, at = self.current_time, "item split");
        self.selected = Some(second.clone());
        self.notify_tracks();
        self.notify_selection();
        Ok(second)
    }

    /// Remove the selected item and clear the selection.
    pub fn delete_selected_item(&mut self) -> Result<Item> {
        let id = self
            .selected
            .clone()
            .ok_or_else(|| CutlineError::invalid("no item selected"))
            .map_err(rejected("delete"))?;
        let before = self.capture();
        let removed = edit::remove_item(&mut self.tracks, &id).map_err(rejected("delete"))?;
        self.commit(before);

        debug!(item = %id, "item deleted");
        self.selected = None;
        if self.drag.as_ref().is_some_and(|drag| drag.item_id == id) {
            self.drag = None;
        }
        self.notify_tracks();
        self.notify_selection();
        Ok(removed)
    }

    /// Put a copy of the selected item on the clipboard.
    pub fn copy_selected_item(&mut self) -> Result<()> {
        let item = self
            .selected_item()
            .cloned()
            .ok_or_else(|| CutlineError::invalid("no item selected"))
            .map_err(rejected("copy"))?;
        debug!(item = %item.id, "item copied");
        self.clipboard = Some(item);
        Ok(())
    }

    /// Insert the clipboard item at the cursor and select it. The clipboard
    /// is kept, so pasting again inserts another copy.
    pub fn paste_item(&mut self) -> Result<String> {
        let source = self
            .clipboard
            .clone()
            .ok_or_else(|| CutlineError::invalid("clipboard is empty"))
            .map_err(rejected("paste"))?;
        let before = self.capture();
        let id = edit::paste_item(&mut self.tracks, &source, self.current_time)
            .map_err(rejected("paste"))?;
        self.commit(before);
        self.extend_to(self.current_time.max(0.0) + source.duration);

        debug!(item = %id, at = self.current_time, "item pasted");
        self.selected = Some(id.clone());
        self.notify_tracks();
        self.notify_selection();
        Ok(id)
    }

    // ── History ─────────────────────────────────────────────────

    /// Step back one edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.config.history_enabled {
            return false;
        }
        let current = Snapshot::capture(&self.tracks, self.duration);
        match self.history.undo(current) {
            Some(previous) => {
                debug!(index = self.history.index(), "undo");
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone edit. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.config.history_enabled {
            return false;
        }
        let current = Snapshot::capture(&self.tracks, self.duration);
        match self.history.redo(current) {
            Some(next) => {
                debug!(index = self.history.index(), "redo");
                self.restore(next);
                true
            }
            None => false,
        }
    }

    // ── Playback ────────────────────────────────────────────────

    /// Start playing from the cursor. Returns false if already playing.
    pub fn play(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !self
            .playback
            .start(now, self.current_time, &mut *self.scheduler)
        {
            return false;
        }
        info!(from = self.current_time, rate = self.playback.rate(), "playback started");
        self.bus.emit(&TimelineEvent::PlayStateChange(true));
        self.callbacks.play();
        true
    }

    /// Stop playing. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if !self.playback.stop(&mut *self.scheduler) {
            return false;
        }
        info!(at = self.current_time, "playback stopped");
        self.bus.emit(&TimelineEvent::PlayStateChange(false));
        self.callbacks.pause();
        true
    }

    pub fn toggle_playback(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn set_playback_rate(&mut self, rate: f64) -> Result<()> {
        let rate = require_positive("playback rate", rate).map_err(rejected("set_playback_rate"))?;
        let now = self.clock.now_ms();
        self.playback.set_rate(rate, now, self.current_time);
        self.config.playback_rate = rate;
        Ok(())
    }

    /// Deliver the display frame `handle`, fired at `timestamp_ms` on the
    /// engine's clock.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp_ms: f64) -> FrameOutcome {
        let outcome =
            self.playback
                .on_frame(handle, timestamp_ms, self.duration, &mut *self.scheduler);
        match outcome {
            FrameOutcome::Stale => {}
            FrameOutcome::Advanced(position) => {
                trace!(position, "frame");
                self.current_time = position;
                self.notify_time();
            }
            FrameOutcome::Finished(end) => {
                self.current_time = end;
                self.notify_time();
                self.pause();
            }
        }
        outcome
    }

    /// Deliver the pending frame, timestamped now.
    pub fn tick(&mut self) -> FrameOutcome {
        match self.playback.pending() {
            Some(handle) => {
                let now = self.clock.now_ms();
                self.on_frame(handle, now)
            }
            None => FrameOutcome::Stale,
        }
    }

    // ── Pointer interaction ─────────────────────────────────────

    /// Press on an item: select it and start a move or resize gesture.
    pub fn pointer_down(&mut self, item_id: &str, zone: HitZone, x: f64) -> Result<()> {
        if self.drag.is_some() {
            self.pointer_up();
        }
        let drag = self
            .item(item_id)
            .map(|item| DragState::begin(item, zone, x))
            .ok_or_else(|| CutlineError::ItemNotFound(item_id.to_string()))
            .map_err(rejected("pointer_down"))?;
        self.select_item_by_id(item_id)?;
        trace!(item = item_id, mode = ?drag.mode, x, "drag started");
        self.drag = Some(drag);
        Ok(())
    }

    /// Pointer moved during a gesture. Returns true if the item changed.
    ///
    /// The first change records a history checkpoint for the whole gesture;
    /// a press and release without movement leaves history untouched.
    pub fn pointer_move(&mut self, x: f64) -> bool {
        let Some(drag) = self.drag.as_ref() else {
            return false;
        };
        let (start, duration) =
            drag.placement(x, self.scale, &self.snap, self.config.min_item_duration);
        let item_id = drag.item_id.clone();
        let needs_checkpoint = !drag.checkpointed;

        let unchanged = match self.item(&item_id) {
            Some(item) => item.start_time == start && item.duration == duration,
            None => {
                warn!(item = %item_id, "dragged item vanished");
                self.drag = None;
                return false;
            }
        };
        if unchanged {
            return false;
        }

        if needs_checkpoint {
            let before = self.capture();
            self.commit(before);
            if let Some(drag) = self.drag.as_mut() {
                drag.checkpointed = true;
            }
        }
        if let Some(item) = find_item_mut(&mut self.tracks, &item_id) {
            item.start_time = start;
            item.duration = duration;
        }
        true
    }

    /// Release: end the gesture and publish the committed change once.
    pub fn pointer_up(&mut self) -> Option<Item> {
        let drag = self.drag.take()?;
        let item = self.item(&drag.item_id).cloned()?;
        if drag.checkpointed {
            self.extend_to(item.end_time());
            debug!(
                item = %item.id,
                start = item.start_time,
                duration = item.duration,
                "drag committed"
            );
        }
        self.bus.emit(&TimelineEvent::TrackChanged(&item));
        self.callbacks.change();
        Some(item)
    }

    /// Abort the gesture, putting the item back where it started and
    /// dropping the gesture's history entry. Returns false when idle.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if !drag.checkpointed {
            return true;
        }
        let (start, duration) = drag.origin();
        if let Some(item) = find_item_mut(&mut self.tracks, &drag.item_id) {
            item.start_time = start;
            item.duration = duration;
        }
        if self.config.history_enabled {
            self.history.discard_last();
        }
        debug!(item = %drag.item_id, "drag cancelled");
        self.notify_tracks();
        true
    }

    // ── Projects ────────────────────────────────────────────────

    /// Replace the whole model with a loaded project. History, selection and
    /// any gesture are dropped; playback stops.
    pub fn load_project(&mut self, mut project: Project) {
        project.sanitize();
        self.pause();

        let had_selection = self.selected.take().is_some();
        self.drag = None;
        self.history.clear();
        self.project_name = project.name;
        self.media_library = project.media_library;
        self.tracks = project.tracks;
        self.duration = extended_duration(
            project.duration,
            content_end(&self.tracks),
            self.config.auto_extend_margin,
        );
        self.current_time = 0.0;
        info!(
            name = %self.project_name,
            tracks = self.tracks.len(),
            duration = self.duration,
            "project loaded"
        );

        self.notify_tracks();
        if had_selection {
            self.notify_selection();
        }
        self.notify_time();
    }

    /// The persisted layout of the current model.
    pub fn to_project(&self) -> Project {
        Project {
            name: self.project_name.clone(),
            tracks: self.tracks.clone(),
            duration: self.duration,
            media_library: self.media_library.clone(),
        }
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    /// Add or replace a media library entry (matched by id).
    pub fn add_media(&mut self, asset: MediaAsset) {
        match self.media_library.iter_mut().find(|m| m.id == asset.id) {
            Some(existing) => *existing = asset,
            None => self.media_library.push(asset),
        }
    }

    // ── Command dispatch ────────────────────────────────────────

    /// Run one command. Query-style results (pasted id, removed item) are
    /// dropped; call the methods directly to get them.
    pub fn execute(&mut self, command: TimelineCommand) -> Result<()> {
        trace!(?command, "execute");
        match command {
            TimelineCommand::SelectItem { id } => self.select_item_by_id(&id)?,
            TimelineCommand::ClearSelection => self.clear_selection(),
            TimelineCommand::SetCurrentTime { time } => self.set_current_time(time)?,
            TimelineCommand::SeekForward { seconds } => self.seek_forward(seconds)?,
            TimelineCommand::SeekBackward { seconds } => self.seek_backward(seconds)?,
            TimelineCommand::SetScale { scale } => self.set_scale(scale)?,
            TimelineCommand::SetDuration { duration } => self.set_duration(duration)?,
            TimelineCommand::AddItem { track_id, item } => {
                self.add_item(&track_id, item)?;
            }
            TimelineCommand::UpdateItem { id, patch } => {
                self.update_item(&id, &patch)?;
            }
            TimelineCommand::ResizeItem { id, duration } => {
                self.resize_item(&id, duration)?;
            }
            TimelineCommand::Cut => {
                self.cut_selected_item()?;
            }
            TimelineCommand::Delete => {
                self.delete_selected_item()?;
            }
            TimelineCommand::Copy => self.copy_selected_item()?,
            TimelineCommand::Paste => {
                self.paste_item()?;
            }
            TimelineCommand::Undo => {
                self.undo();
            }
            TimelineCommand::Redo => {
                self.redo();
            }
            TimelineCommand::Play => {
                self.play();
            }
            TimelineCommand::Pause => {
                self.pause();
            }
            TimelineCommand::TogglePlayback => self.toggle_playback(),
            TimelineCommand::SetPlaybackRate { rate } => self.set_playback_rate(rate)?,
            TimelineCommand::ZoomIn => self.zoom_in(),
            TimelineCommand::ZoomOut => self.zoom_out(),
            TimelineCommand::FitToView { width } => self.fit_to_view(width)?,
            TimelineCommand::SetSnapToGrid { enabled } => self.set_snap_to_grid(enabled),
            TimelineCommand::SetGridSize { size } => self.set_grid_size(size)?,
            TimelineCommand::PointerDown { item_id, zone, x } => {
                self.pointer_down(&item_id, zone, x)?
            }
            TimelineCommand::PointerMove { x } => {
                self.pointer_move(x);
            }
            TimelineCommand::PointerUp => {
                self.pointer_up();
            }
            TimelineCommand::CancelDrag => {
                self.cancel_drag();
            }
        }
        Ok(())
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(TimelineOptions::default())
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("tracks", &self.tracks.len())
            .field("duration", &self.duration)
            .field("current_time", &self.current_time)
            .field("scale", &self.scale)
            .field("selected", &self.selected)
            .field("playing", &self.playback.is_playing())
            .field("history", &self.history)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
