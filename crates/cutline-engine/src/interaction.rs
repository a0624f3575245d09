//! Pointer drag state machine for moving and resizing items.
//!
//! Idle is `None`; a pointer-down produces a [`DragState`] and every
//! subsequent pointer-move asks it for the item's new placement, always
//! computed from the values recorded at pointer-down so rounding never
//! accumulates across moves.

use cutline_core::TimeSpan;
use cutline_timeline::Item;
use serde::{Deserialize, Serialize};

use crate::snapping::GridSnap;

/// Where on an item the pointer went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HitZone {
    Body,
    LeftHandle,
    RightHandle,
}

/// What a drag does to its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Shift the item in time, keeping its duration.
    Move,
    /// Move the start, keeping the end fixed.
    ResizeLeft,
    /// Move the end, keeping the start fixed.
    ResizeRight,
}

impl From<HitZone> for DragMode {
    fn from(zone: HitZone) -> Self {
        match zone {
            HitZone::Body => DragMode::Move,
            HitZone::LeftHandle => DragMode::ResizeLeft,
            HitZone::RightHandle => DragMode::ResizeRight,
        }
    }
}

/// Active drag state.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub item_id: String,
    pub mode: DragMode,
    /// Pointer x (pixels) at pointer-down
    pub start_x: f64,
    pub start_time: f64,
    pub start_duration: f64,
    /// Set once the gesture has changed the model and recorded history.
    pub checkpointed: bool,
}

impl DragState {
    /// Record the drag origin for `item`.
    pub fn begin(item: &Item, zone: HitZone, pointer_x: f64) -> Self {
        Self {
            item_id: item.id.clone(),
            mode: zone.into(),
            start_x: pointer_x,
            start_time: item.start_time,
            start_duration: item.duration,
            checkpointed: false,
        }
    }

    /// Pointer travel converted to seconds.
    pub fn delta_time(&self, pointer_x: f64, scale: f64) -> f64 {
        (pointer_x - self.start_x) / scale
    }

    /// New `(start_time, duration)` for the item with the pointer at `pointer_x`.
    ///
    /// Only moves snap to the grid. A left-handle drag keeps the end time
    /// fixed; both resize modes keep at least `min_duration`.
    pub fn placement(
        &self,
        pointer_x: f64,
        scale: f64,
        snap: &GridSnap,
        min_duration: f64,
    ) -> (f64, f64) {
        let delta = self.delta_time(pointer_x, scale);
        match self.mode {
            DragMode::Move => {
                let start = snap.snap_time((self.start_time + delta).max(0.0));
                (start, self.start_duration)
            }
            DragMode::ResizeRight => {
                let duration = (self.start_duration + delta).max(min_duration);
                (self.start_time, duration)
            }
            DragMode::ResizeLeft => {
                let clamped = delta.min(self.start_duration - min_duration);
                let start = (self.start_time + clamped).max(0.0);
                let duration = self.start_duration - (start - self.start_time);
                (start, duration)
            }
        }
    }

    /// The placement recorded at pointer-down.
    pub fn origin(&self) -> (f64, f64) {
        (self.start_time, self.start_duration)
    }
}

/// Hit test an x position (pixels from the track origin) against an item's
/// resize handles.
///
/// Returns `None` when `x` is outside the item.
pub fn hit_test(span: TimeSpan, scale: f64, x: f64, handle_width: f64) -> Option<HitZone> {
    let left = span.start * scale;
    let right = span.end() * scale;
    if x < left || x > right {
        return None;
    }
    if x <= left + handle_width {
        Some(HitZone::LeftHandle)
    } else if x >= right - handle_width {
        Some(HitZone::RightHandle)
    } else {
        Some(HitZone::Body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_test_item() -> Item {
        Item::new("a", "test").at(10.0, 5.0)
    }

    const SCALE: f64 = 10.0;

    #[test]
    fn test_move_snaps() {
        let drag = DragState::begin(&make_test_item(), HitZone::Body, 100.0);
        // +23px = +2.3s → 12.3 → snapped to 12.5
        let (start, duration) = drag.placement(123.0, SCALE, &GridSnap::default(), 0.1);
        assert_eq!(start, 12.5);
        assert_eq!(duration, 5.0);
    }

    #[test]
    fn test_move_without_snap_clamps_at_zero() {
        let drag = DragState::begin(&make_test_item(), HitZone::Body, 100.0);
        let off = GridSnap::new(false, 0.5);
        let (start, _) = drag.placement(-500.0, SCALE, &off, 0.1);
        assert_eq!(start, 0.0);
        let (start, _) = drag.placement(123.0, SCALE, &off, 0.1);
        assert!((start - 12.3).abs() < 1e-9);
    }

    #[test]
    fn test_resize_right() {
        let drag = DragState::begin(&make_test_item(), HitZone::RightHandle, 150.0);
        let (start, duration) = drag.placement(170.0, SCALE, &GridSnap::default(), 0.1);
        assert_eq!(start, 10.0);
        assert!((duration - 7.0).abs() < 1e-9);

        // Dragging far left bottoms out at the minimum duration
        let (_, duration) = drag.placement(0.0, SCALE, &GridSnap::default(), 0.1);
        assert_eq!(duration, 0.1);
    }

    #[test]
    fn test_resize_left() {
        let drag = DragState::begin(&make_test_item(), HitZone::LeftHandle, 100.0);
        let (start, duration) = drag.placement(120.0, SCALE, &GridSnap::default(), 0.1);
        assert!((start - 12.0).abs() < 1e-9);
        assert!((duration - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_left_clamps() {
        let drag = DragState::begin(&make_test_item(), HitZone::LeftHandle, 100.0);
        // Past the end: start stops min_duration before the end
        let (start, duration) = drag.placement(400.0, SCALE, &GridSnap::default(), 0.1);
        assert!((start - 14.9).abs() < 1e-9);
        assert!((duration - 0.1).abs() < 1e-9);

        // Past zero: start stops at zero and the item grows
        let (start, duration) = drag.placement(-400.0, SCALE, &GridSnap::default(), 0.1);
        assert_eq!(start, 0.0);
        assert_eq!(duration, 15.0);
    }

    #[test]
    fn test_hit_test_zones() {
        let span = TimeSpan::new(10.0, 20.0); // 100px..300px
        assert_eq!(hit_test(span, SCALE, 102.0, 6.0), Some(HitZone::LeftHandle));
        assert_eq!(hit_test(span, SCALE, 298.0, 6.0), Some(HitZone::RightHandle));
        assert_eq!(hit_test(span, SCALE, 200.0, 6.0), Some(HitZone::Body));
        assert_eq!(hit_test(span, SCALE, 50.0, 6.0), None);
    }

    proptest! {
        #[test]
        fn left_resize_keeps_end(
            start in 0.0f64..100.0,
            duration in 0.1f64..50.0,
            pointer in -5000.0f64..5000.0,
        ) {
            let item = Item::new("p", "p").at(start, duration);
            let drag = DragState::begin(&item, HitZone::LeftHandle, 0.0);
            let (new_start, new_duration) = drag.placement(pointer, SCALE, &GridSnap::default(), 0.1);
            prop_assert!(new_start >= 0.0);
            prop_assert!(((new_start + new_duration) - (start + duration)).abs() < 1e-9);
        }
    }
}
