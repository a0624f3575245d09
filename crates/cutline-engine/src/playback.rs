//! Playback clock.
//!
//! While playing, the host delivers one frame callback per display frame.
//! Each frame recomputes the position from the wall-clock time elapsed since
//! playback started (scaled by the playback rate) rather than accumulating
//! per-frame deltas, so a dropped frame never skews the cursor.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Token identifying one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Source of display-frame callbacks (the host's animation-frame API).
pub trait FrameScheduler {
    /// Ask for one callback on the next display frame.
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a pending request.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Wall clock in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Scheduler for hosts that poll the engine themselves.
///
/// Requests are only recorded; the host reads [`crate::Timeline::pending_frame`]
/// and calls back into the engine when its frame arrives.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    outstanding: Option<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outstanding(&self) -> Option<FrameHandle> {
        self.outstanding
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.outstanding = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
        }
    }
}

/// Monotonic clock measured from its creation.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// copy and give the other to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Result of delivering one frame to the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Not playing, or the frame was not the one pending; nothing happens.
    Stale,
    /// Playback continues at this position; the next frame is requested.
    Advanced(f64),
    /// The end was reached; playback must stop at this position.
    Finished(f64),
}

/// Playback state: the anchor the position is computed from and the pending
/// frame request, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    rate: f64,
    playing: bool,
    anchor_wall_ms: f64,
    anchor_position: f64,
    pending: Option<FrameHandle>,
}

impl PlaybackClock {
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            playing: false,
            anchor_wall_ms: 0.0,
            anchor_position: 0.0,
            pending: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Start playing from `position`. Returns false if already playing.
    pub fn start(
        &mut self,
        now_ms: f64,
        position: f64,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        if self.playing {
            return false;
        }
        self.playing = true;
        self.rebase(now_ms, position);
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Stop and withdraw the pending frame. Returns false if already stopped.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if !self.playing {
            return false;
        }
        self.playing = false;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        true
    }

    /// Re-anchor so that `position` corresponds to `now_ms`. Used on seek and
    /// rate change during playback.
    pub fn rebase(&mut self, now_ms: f64, position: f64) {
        self.anchor_wall_ms = now_ms;
        self.anchor_position = position;
    }

    /// Change the rate, keeping the current position continuous.
    pub fn set_rate(&mut self, rate: f64, now_ms: f64, position: f64) {
        if self.playing {
            self.rebase(now_ms, position);
        }
        self.rate = rate;
    }

    /// Position at wall time `now_ms`, before clamping.
    pub fn position_at(&self, now_ms: f64) -> f64 {
        let elapsed = (now_ms - self.anchor_wall_ms) / 1000.0 * self.rate;
        self.anchor_position + elapsed
    }

    /// Deliver the frame `handle` fired at `timestamp_ms`.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
        duration: f64,
        scheduler: &mut dyn FrameScheduler,
    ) -> FrameOutcome {
        if !self.playing || self.pending != Some(handle) {
            return FrameOutcome::Stale;
        }
        self.pending = None;

        let position = self.position_at(timestamp_ms).max(0.0);
        if position >= duration {
            return FrameOutcome::Finished(duration);
        }
        self.pending = Some(scheduler.request_frame());
        FrameOutcome::Advanced(position)
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}
