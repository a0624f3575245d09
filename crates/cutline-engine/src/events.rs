//! Synchronous in-process publish/subscribe.
//!
//! Listeners run on the caller's stack, in subscription order, before the
//! triggering command returns. Each engine owns its own bus.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use cutline_timeline::{Item, Track};
use smallvec::SmallVec;

/// The events a timeline publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TimeChange,
    SelectionChange,
    TracksUpdated,
    PlayStateChange,
    TrackChanged,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::TimeChange,
        EventKind::SelectionChange,
        EventKind::TracksUpdated,
        EventKind::PlayStateChange,
        EventKind::TrackChanged,
    ];

    /// Wire name used by hosts that subscribe by string.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::TimeChange => "timeChange",
            EventKind::SelectionChange => "selectionChange",
            EventKind::TracksUpdated => "tracksUpdated",
            EventKind::PlayStateChange => "playStateChange",
            EventKind::TrackChanged => "trackChanged",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = cutline_core::CutlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| cutline_core::CutlineError::InvalidParameter(format!("unknown event {s}")))
    }
}

/// An event with a borrowed view of the data that changed.
#[derive(Debug, Clone, Copy)]
pub enum TimelineEvent<'a> {
    /// The time cursor moved.
    TimeChange(f64),
    /// The selection changed; `None` when cleared.
    SelectionChange(Option<&'a Item>),
    /// The track list changed as a whole (edit, undo/redo, bulk replace).
    TracksUpdated(&'a [Track]),
    /// Playback started (`true`) or stopped (`false`).
    PlayStateChange(bool),
    /// A drag gesture on this item was committed.
    TrackChanged(&'a Item),
}

impl TimelineEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            TimelineEvent::TimeChange(_) => EventKind::TimeChange,
            TimelineEvent::SelectionChange(_) => EventKind::SelectionChange,
            TimelineEvent::TracksUpdated(_) => EventKind::TracksUpdated,
            TimelineEvent::PlayStateChange(_) => EventKind::PlayStateChange,
            TimelineEvent::TrackChanged(_) => EventKind::TrackChanged,
        }
    }
}

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TimelineEvent<'_>)>;

/// Per-engine listener registry.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: HashMap<EventKind, SmallVec<[(SubscriptionId, Listener); 2]>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one kind of event.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&TimelineEvent<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(pos) = listeners.iter().position(|(sid, _)| *sid == id) {
                listeners.remove(pos);
                return true;
            }
        }
        false
    }

    /// Deliver an event to every listener of its kind, in subscription order.
    pub fn emit(&mut self, event: &TimelineEvent<'_>) {
        if let Some(listeners) = self.listeners.get_mut(&event.kind()) {
            for (_, listener) in listeners.iter_mut() {
                listener(event);
            }
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, |l| l.len())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self
            .listeners
            .iter()
            .map(|(kind, l)| (kind.name(), l.len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}
