//! Slot preparation: splitting, pairing and per-run pools.
//!
//! # Flow
//!
//! 1. [`TimeSlotSplitter`] cuts pending source windows into atomic slots
//! 2. [`PracticalPairBuilder`] binds adjacent slots of each touched day
//! 3. [`SlotPools`] hands out pairs and unpaired slots to the search

mod pairing;
mod pool;
mod splitter;

pub use pairing::{PairScan, PairingConfig, PracticalPairBuilder};
pub use pool::SlotPools;
pub use splitter::{SplitReport, TimeSlotSplitter};
