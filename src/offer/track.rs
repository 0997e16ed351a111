//! The circular offer track.
//!
//! Patches sit in a ring with a marker between two of them. Only the
//! patches immediately after the marker can be bought. When one is taken,
//! the marker moves to the slot the patch vacated, so the ring closes
//! around the gap.
//!
//! ```
//! use patchwork_engine::offer::OfferTrack;
//! use patchwork_engine::patches::Patch;
//!
//! let track = OfferTrack::new((1..=5).map(Patch::independent_reward).collect());
//! let window: Vec<usize> = track.window(3).iter().map(|slot| slot.track_index).collect();
//! assert_eq!(window, vec![1, 2, 3]);
//! ```

use im::Vector;
use serde::Serialize;
use smallvec::SmallVec;

use crate::patches::{Patch, PatchId};

/// Default number of purchasable patches after the marker.
pub const WINDOW_SIZE: usize = 3;

/// A patch visible in the purchase window, with its index on the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OfferSlot<'a> {
    pub track_index: usize,
    pub patch: &'a Patch,
}

/// Ordered ring of patches plus the marker index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OfferTrack {
    patches: Vector<Patch>,
    marker: usize,
}

impl OfferTrack {
    /// Create a track with the marker at 0.
    #[must_use]
    pub fn new(patches: Vector<Patch>) -> Self {
        Self { patches, marker: 0 }
    }

    /// Marker position (0 when the track is empty).
    #[must_use]
    pub fn marker(&self) -> usize {
        self.marker
    }

    /// Number of patches on the track.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Check if the track is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Patch at a track index.
    #[must_use]
    pub fn get(&self, track_index: usize) -> Option<&Patch> {
        self.patches.get(track_index)
    }

    /// Track index of a patch by id.
    #[must_use]
    pub fn position(&self, id: PatchId) -> Option<usize> {
        self.patches.iter().position(|p| p.id == id)
    }

    /// Iterate over patches in track order.
    pub fn iter(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter()
    }

    /// Up to `size` patches following the marker, wrapping around.
    ///
    /// Shorter than `size` when the track holds fewer patches; never lists
    /// the same patch twice.
    #[must_use]
    pub fn window(&self, size: usize) -> SmallVec<[OfferSlot<'_>; WINDOW_SIZE]> {
        let len = self.patches.len();
        (0..size.min(len))
            .map(|i| {
                let track_index = (self.marker + i + 1) % len;
                OfferSlot {
                    track_index,
                    patch: &self.patches[track_index],
                }
            })
            .collect()
    }

    /// Whether `track_index` is currently purchasable.
    #[must_use]
    pub fn in_window(&self, track_index: usize, size: usize) -> bool {
        self.window(size).iter().any(|slot| slot.track_index == track_index)
    }

    /// A new track with patch `id` removed, `bonus` appended if granted, and
    /// the marker re-anchored at `track_index`.
    #[must_use]
    pub fn acquire(&self, id: PatchId, track_index: usize, bonus: Option<Patch>) -> Self {
        let mut patches = self.patches.clone();
        patches.retain(|p| p.id != id);
        if let Some(bonus) = bonus {
            patches.push_back(bonus);
        }
        let marker = if patches.is_empty() {
            0
        } else {
            track_index % patches.len()
        };
        Self { patches, marker }
    }

    /// A new track with `patch` appended at the tail. The marker stays put.
    #[must_use]
    pub fn append(&self, patch: Patch) -> Self {
        let mut patches = self.patches.clone();
        patches.push_back(patch);
        Self {
            patches,
            marker: self.marker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patches::{Hue, PatchColor, Shape};

    fn patch(id: u32) -> Patch {
        Patch::new(PatchId::new(id), Shape::single(), 1, 1, 0, PatchColor::new(Hue::Red, 400))
    }

    fn track(ids: std::ops::RangeInclusive<u32>) -> OfferTrack {
        OfferTrack::new(ids.map(patch).collect())
    }

    fn window_ids(track: &OfferTrack) -> Vec<u32> {
        track.window(WINDOW_SIZE).iter().map(|s| s.patch.id.raw()).collect()
    }

    #[test]
    fn test_window_follows_marker() {
        let track = track(1..=6);

        assert_eq!(track.marker(), 0);
        assert_eq!(window_ids(&track), vec![2, 3, 4]);
        assert!(track.in_window(3, WINDOW_SIZE));
        assert!(!track.in_window(0, WINDOW_SIZE));
        assert!(!track.in_window(4, WINDOW_SIZE));
    }

    #[test]
    fn test_window_wraps() {
        let track = track(1..=5).acquire(PatchId::new(4), 3, None);

        // [1, 2, 3, 5], marker 3
        assert_eq!(track.marker(), 3);
        assert_eq!(window_ids(&track), vec![1, 2, 3]);
    }

    #[test]
    fn test_short_track_window() {
        let two = track(1..=2);
        assert_eq!(window_ids(&two), vec![2, 1]);

        let one = track(1..=1);
        assert_eq!(window_ids(&one), vec![1]);

        let empty = OfferTrack::default();
        assert!(empty.window(WINDOW_SIZE).is_empty());
        assert!(!empty.in_window(0, WINDOW_SIZE));
    }

    #[test]
    fn test_acquire_reanchors_marker() {
        let original = track(1..=6);
        let next = original.acquire(PatchId::new(3), 2, None);

        assert_eq!(original.len(), 6);
        assert_eq!(next.len(), 5);
        assert_eq!(next.marker(), 2);
        assert_eq!(next.position(PatchId::new(3)), None);
        // [1, 2, 4, 5, 6] with marker 2
        assert_eq!(window_ids(&next), vec![5, 6, 1]);
    }

    #[test]
    fn test_acquire_with_bonus_keeps_length() {
        let original = track(1..=4);
        let next = original.acquire(PatchId::new(2), 1, Some(Patch::independent_reward(26)));

        assert_eq!(next.len(), 4);
        assert_eq!(next.get(3).map(|p| p.id), Some(PatchId::reward(26)));
        assert_eq!(next.marker(), 1);
    }

    #[test]
    fn test_acquire_last_patch_resets_marker() {
        let next = track(1..=1).acquire(PatchId::new(1), 0, None);

        assert!(next.is_empty());
        assert_eq!(next.marker(), 0);
    }

    #[test]
    fn test_acquire_at_tail_wraps_marker() {
        let next = track(1..=4).acquire(PatchId::new(4), 3, None);

        assert_eq!(next.marker(), 0);
        assert_eq!(window_ids(&next), vec![2, 3, 1]);
    }

    #[test]
    fn test_append_keeps_marker() {
        let base = track(1..=5).acquire(PatchId::new(2), 1, None);
        let next = base.append(Patch::independent_reward(32));

        assert_eq!(next.marker(), base.marker());
        assert_eq!(next.len(), base.len() + 1);
        assert_eq!(next.iter().last().map(|p| p.id), Some(PatchId::reward(32)));
    }
}
