//! Working pools of schedulable time units.

use std::collections::HashSet;

use rand::Rng;

use crate::error::StoreError;
use crate::models::{PracticalPair, SlotId};
use crate::store::SlotRepository;

/// Practical pairs and free atomic slots for one generation run.
///
/// Drawing a unit removes it, so each unit is handed out at most once per
/// run. Pools are shared by population construction and mutation and are
/// only ever touched sequentially.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotPools {
    pairs: Vec<PracticalPair>,
    slots: Vec<SlotId>,
}

impl SlotPools {
    pub fn new(pairs: Vec<PracticalPair>, slots: Vec<SlotId>) -> Self {
        Self { pairs, slots }
    }

    /// Loads all pairs and every atomic slot that belongs to no pair,
    /// ordered by (day, start).
    pub fn load<S: SlotRepository + ?Sized>(repo: &S) -> Result<Self, StoreError> {
        let pairs = repo.practical_pairs()?;
        let paired: HashSet<SlotId> = pairs.iter().flat_map(|p| p.slots()).collect();
        let slots = repo
            .atomic_slots()?
            .into_iter()
            .map(|s| s.id)
            .filter(|id| !paired.contains(id))
            .collect();
        Ok(Self { pairs, slots })
    }

    pub fn pairs(&self) -> &[PracticalPair] {
        &self.pairs
    }

    pub fn slots(&self) -> &[SlotId] {
        &self.slots
    }

    #[inline]
    pub fn has_pairs(&self) -> bool {
        !self.pairs.is_empty()
    }

    #[inline]
    pub fn has_slots(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Moves every pair's slots into the single-slot pool and empties the
    /// pair pool. A slot shared by two sliding-scan pairs is added once.
    ///
    /// Returns the number of slots added.
    pub fn release_pairs(&mut self) -> usize {
        let mut known: HashSet<SlotId> = self.slots.iter().copied().collect();
        let before = self.slots.len();
        for pair in self.pairs.drain(..) {
            for slot in pair.slots() {
                if known.insert(slot) {
                    self.slots.push(slot);
                }
            }
        }
        self.slots.len() - before
    }

    /// Removes and returns a uniformly random pair.
    pub fn draw_pair<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PracticalPair> {
        if self.pairs.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.pairs.len());
        Some(self.pairs.remove(idx))
    }

    /// Removes and returns a uniformly random atomic slot.
    pub fn draw_slot<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SlotId> {
        if self.slots.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.slots.len());
        Some(self.slots.remove(idx))
    }
}
