//! Practical pair construction.

use std::collections::HashSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{PracticalPair, SlotId};
use crate::store::SlotRepository;

/// How adjacent slots are scanned when forming pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairScan {
    /// Skip past both slots of a formed pair. A slot belongs to at most one
    /// pair.
    #[default]
    Disjoint,
    /// Advance one slot at a time. A middle slot may end up in two pairs.
    Sliding,
}

/// Pair builder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Cap on pairs per day, existing pairs included.
    pub max_pairs_per_day: usize,
    pub scan: PairScan,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            max_pairs_per_day: 2,
            scan: PairScan::Disjoint,
        }
    }
}

/// Binds chronologically adjacent atomic slots of one day into pairs.
///
/// The scan runs in start-time order, so the earliest pairs of the day win
/// the cap. Non-adjacent slots are never paired.
#[derive(Debug, Clone, Default)]
pub struct PracticalPairBuilder {
    config: PairingConfig,
}

impl PracticalPairBuilder {
    pub fn new(config: PairingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PairingConfig {
        &self.config
    }

    /// Creates the missing pairs for `day` and returns them.
    pub fn build_for_day<S: SlotRepository + ?Sized>(
        &self,
        repo: &mut S,
        day: Weekday,
    ) -> Result<Vec<PracticalPair>, StoreError> {
        let slots = repo.atomic_slots_on(day)?;
        let day_ids: HashSet<SlotId> = slots.iter().map(|s| s.id).collect();

        let existing: Vec<PracticalPair> = repo
            .practical_pairs()?
            .into_iter()
            .filter(|p| day_ids.contains(&p.first))
            .collect();
        let mut count = existing.len();
        let mut used: HashSet<SlotId> = existing.iter().flat_map(|p| p.slots()).collect();

        let mut created = Vec::new();
        let mut i = 0;
        while i + 1 < slots.len() && count < self.config.max_pairs_per_day {
            let (a, b) = (&slots[i], &slots[i + 1]);
            if !a.abuts(b) {
                i += 1;
                continue;
            }

            match self.config.scan {
                PairScan::Disjoint => {
                    if used.contains(&a.id) || used.contains(&b.id) {
                        i += 1;
                        continue;
                    }
                    let pair = repo.create_pair(a.id, b.id)?;
                    used.extend(pair.slots());
                    created.push(pair);
                    count += 1;
                    i += 2;
                }
                PairScan::Sliding => {
                    if !repo.pair_exists(a.id, b.id)? {
                        created.push(repo.create_pair(a.id, b.id)?);
                        count += 1;
                    }
                    i += 1;
                }
            }
        }

        debug!(
            day = %day,
            created = created.len(),
            total = count,
            "Practical pairs built"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveTime;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn store_with(hours: &[(u32, u32)]) -> (MemoryStore, Vec<SlotId>) {
        let mut store = MemoryStore::new();
        let ids = hours
            .iter()
            .map(|&(s, e)| store.create_atomic_slot(Weekday::Mon, t(s), t(e)).unwrap().id)
            .collect();
        (store, ids)
    }

    fn pair_slots(pairs: &[PracticalPair]) -> Vec<(SlotId, SlotId)> {
        pairs.iter().map(|p| (p.first, p.second)).collect()
    }

    #[test]
    fn test_disjoint_morning() {
        let (mut store, ids) = store_with(&[(8, 9), (9, 10), (10, 11), (11, 12)]);
        let builder = PracticalPairBuilder::default();

        let pairs = builder.build_for_day(&mut store, Weekday::Mon).unwrap();
        assert_eq!(pair_slots(&pairs), vec![(ids[0], ids[1]), (ids[2], ids[3])]);
    }

    #[test]
    fn test_sliding_reuses_middle_slot() {
        let (mut store, ids) = store_with(&[(8, 9), (9, 10), (10, 11), (11, 12)]);
        let builder = PracticalPairBuilder::new(PairingConfig {
            max_pairs_per_day: 2,
            scan: PairScan::Sliding,
        });

        let pairs = builder.build_for_day(&mut store, Weekday::Mon).unwrap();
        assert_eq!(pair_slots(&pairs), vec![(ids[0], ids[1]), (ids[1], ids[2])]);
    }

    #[test]
    fn test_gap_not_paired() {
        let (mut store, ids) = store_with(&[(8, 9), (10, 11), (11, 12)]);
        let pairs = PracticalPairBuilder::default()
            .build_for_day(&mut store, Weekday::Mon)
            .unwrap();
        assert_eq!(pair_slots(&pairs), vec![(ids[1], ids[2])]);
    }

    #[test]
    fn test_cap_respected() {
        let (mut store, _) = store_with(&[(8, 9), (9, 10), (10, 11), (11, 12), (12, 13), (13, 14)]);
        let builder = PracticalPairBuilder::new(PairingConfig {
            max_pairs_per_day: 1,
            scan: PairScan::Disjoint,
        });
        assert_eq!(builder.build_for_day(&mut store, Weekday::Mon).unwrap().len(), 1);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let (mut store, _) = store_with(&[(8, 9), (9, 10), (10, 11), (11, 12)]);
        for scan in [PairScan::Disjoint, PairScan::Sliding] {
            let builder = PracticalPairBuilder::new(PairingConfig {
                max_pairs_per_day: 2,
                scan,
            });
            builder.build_for_day(&mut store, Weekday::Mon).unwrap();
        }
        let again = PracticalPairBuilder::default()
            .build_for_day(&mut store, Weekday::Mon)
            .unwrap();
        assert!(again.is_empty());
        assert_eq!(store.practical_pairs().unwrap().len(), 2);
    }

    #[test]
    fn test_other_days_untouched() {
        let (mut store, _) = store_with(&[(8, 9), (9, 10)]);
        let pairs = PracticalPairBuilder::default()
            .build_for_day(&mut store, Weekday::Tue)
            .unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_scan_serde() {
        let cfg: PairingConfig = toml::from_str("scan = \"sliding\"").unwrap();
        assert_eq!(cfg.scan, PairScan::Sliding);
        assert_eq!(cfg.max_pairs_per_day, 2);
    }
}
