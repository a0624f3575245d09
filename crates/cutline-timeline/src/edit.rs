//! Edit primitives on the track list.
//!
//! Each function validates its preconditions before touching anything, so a
//! returned error always means the tracks are unchanged. History and
//! selection are the engine's business, not handled here.

use cutline_core::{CutlineError, Result};
use uuid::Uuid;

use crate::item::{Item, ItemPatch};
use crate::track::{find_item, find_item_mut, find_track_mut, Track};

/// What [`upsert_item`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// Duration needed so that content ending at `end` is never truncated.
///
/// Grows to `end + margin` only when `end` overruns `duration`; never shrinks.
pub fn extended_duration(duration: f64, end: f64, margin: f64) -> f64 {
    if end > duration {
        end + margin
    } else {
        duration
    }
}

/// Split an item at absolute time `at`.
///
/// The item is replaced in place by `<id>_1` covering `[start, at)` and
/// `<id>_2` covering `[at, end)`; both keep every other field. When either
/// suffix is already taken the next free numbers are used instead. Returns
/// the id of the second half.
pub fn split_item(tracks: &mut [Track], item_id: &str, at: f64) -> Result<String> {
    let (track_id, original) = match find_item(tracks, item_id) {
        Some((track, item)) => (track.id.clone(), item.clone()),
        None => return Err(CutlineError::ItemNotFound(item_id.to_string())),
    };
    if !original.span().strictly_contains(at) {
        return Err(CutlineError::invalid(format!(
            "split point {at} is outside item {item_id} [{}, {})",
            original.start_time,
            original.end_time()
        )));
    }
    let end = original.end_time();
    let first_id = free_suffixed_id(tracks, &original.id, 1);
    let second_id = free_suffixed_id(tracks, &original.id, next_suffix(&first_id));

    let mut first = original.clone();
    first.id = first_id;
    first.duration = at - original.start_time;

    let mut second = original;
    second.id = second_id;
    second.start_time = at;
    second.duration = end - at;
    let second_id = second.id.clone();

    let track = find_track_mut(tracks, &track_id)
        .ok_or_else(|| CutlineError::TrackNotFound(track_id.clone()))?;
    let index = track
        .find_item(item_id)
        .map(|(index, _)| index)
        .ok_or_else(|| CutlineError::ItemNotFound(item_id.to_string()))?;

    track.items.remove(index);
    track.insert_item(index, first);
    track.insert_item(index + 1, second);
    Ok(second_id)
}

/// First `<base>_<n>` with `n >= from` that no item on any track uses.
fn free_suffixed_id(tracks: &[Track], base: &str, from: u32) -> String {
    (from..)
        .map(|n| format!("{base}_{n}"))
        .find(|id| find_item(tracks, id).is_none())
        .unwrap_or_else(|| format!("{base}_{}", Uuid::new_v4().simple()))
}

fn next_suffix(id: &str) -> u32 {
    id.rsplit('_')
        .next()
        .and_then(|n| n.parse::<u32>().ok())
        .map_or(2, |n| n + 1)
}

/// Reject a duration that would break `duration > 0`.
fn check_duration(patch: &ItemPatch) -> Result<()> {
    match patch.duration {
        Some(duration) if duration <= 0.0 || !duration.is_finite() => Err(
            CutlineError::InvalidParameter(format!("duration must be positive, got {duration}")),
        ),
        _ => Ok(()),
    }
}

/// Remove an item from whichever track holds it.
pub fn remove_item(tracks: &mut [Track], item_id: &str) -> Result<Item> {
    tracks
        .iter_mut()
        .find_map(|track| track.remove_item(item_id))
        .ok_or_else(|| CutlineError::ItemNotFound(item_id.to_string()))
}

/// Insert a copy of `source` at time `at` on the track it was copied from,
/// under a fresh unique id. Returns the new id.
pub fn paste_item(tracks: &mut [Track], source: &Item, at: f64) -> Result<String> {
    let track = find_track_mut(tracks, &source.track_id)
        .ok_or_else(|| CutlineError::TrackNotFound(source.track_id.clone()))?;
    let mut pasted = source.clone();
    pasted.id = format!("{}_copy_{}", source.id, Uuid::new_v4().simple());
    pasted.start_time = at.max(0.0);
    let id = pasted.id.clone();
    track.push_item(pasted);
    Ok(id)
}

/// Insert a new item on `track_id`, or merge into an existing one with the
/// same id (present fields overwrite, absent fields are kept).
///
/// New items take `default_duration` and start at zero unless specified, and
/// inherit the track's color. Ids are unique across the whole timeline, so
/// an id already living on another track is rejected rather than duplicated.
/// Returns the resulting item.
pub fn upsert_item(
    tracks: &mut [Track],
    track_id: &str,
    patch: ItemPatch,
    default_duration: f64,
) -> Result<(Item, Upsert)> {
    check_duration(&patch)?;
    if let Some(id) = patch.id.as_deref() {
        if let Some((owner, _)) = find_item(tracks, id) {
            if owner.id != track_id {
                return Err(CutlineError::invalid(format!(
                    "item {id} already exists on track {}",
                    owner.id
                )));
            }
        }
    }
    let track = find_track_mut(tracks, track_id)
        .ok_or_else(|| CutlineError::TrackNotFound(track_id.to_string()))?;

    if let Some(existing) = patch.id.as_deref().and_then(|id| track.find_item_mut(id)) {
        patch.apply_to(existing);
        return Ok((existing.clone(), Upsert::Updated));
    }

    let fallback_id = format!("item_{}", Uuid::new_v4().simple());
    let mut item = patch.into_item(fallback_id, default_duration);
    if item.color.is_none() {
        item.color = track.color.clone();
    }
    track.push_item(item);
    let inserted = track
        .items
        .last()
        .cloned()
        .ok_or_else(|| CutlineError::ItemNotFound(track_id.to_string()))?;
    Ok((inserted, Upsert::Inserted))
}

/// Merge a patch into an existing item, wherever it lives.
///
/// Rejects a patch that would leave the item with a non-positive duration.
pub fn update_item(tracks: &mut [Track], item_id: &str, patch: &ItemPatch) -> Result<Item> {
    check_duration(patch)?;
    let item = find_item_mut(tracks, item_id)
        .ok_or_else(|| CutlineError::ItemNotFound(item_id.to_string()))?;
    patch.apply_to(item);
    Ok(item.clone())
}
