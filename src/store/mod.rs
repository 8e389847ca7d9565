//! Data-access boundary.
//!
//! The engine never owns entity persistence. It reads time windows, pairs
//! and subjects through these traits and writes timetable rows back.
//!
//! # Traits
//!
//! - [`SlotRepository`]: Declared windows, atomic slots and practical pairs
//! - [`SubjectSource`]: Subject records
//! - [`TimetableStore`]: Timetable rows (bulk clear + per-row create)
//!
//! [`Store`] is the blanket combination the generator requires.
//! [`MemoryStore`] implements all three in memory with JSON snapshots.

mod memory;

use chrono::{NaiveTime, Weekday};

use crate::error::StoreError;
use crate::models::{
    NewTimetableEntry, PracticalPair, SlotId, Subject, TimeWindow, TimetableEntry,
};

pub use memory::MemoryStore;

/// Access to time windows and practical pairs.
pub trait SlotRepository {
    /// Source windows (`derived == false`) not yet processed, ordered by
    /// (day, start).
    fn pending_windows(&self) -> Result<Vec<TimeWindow>, StoreError>;

    /// Atomic slots of one day, ordered by start time.
    fn atomic_slots_on(&self, day: Weekday) -> Result<Vec<TimeWindow>, StoreError>;

    /// All atomic slots, ordered by (day, start).
    fn atomic_slots(&self) -> Result<Vec<TimeWindow>, StoreError>;

    /// Stores a new atomic slot and returns it with its assigned id.
    fn create_atomic_slot(
        &mut self,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<TimeWindow, StoreError>;

    /// Marks a source window as split.
    fn mark_processed(&mut self, id: SlotId) -> Result<(), StoreError>;

    /// All practical pairs.
    fn practical_pairs(&self) -> Result<Vec<PracticalPair>, StoreError>;

    /// Whether a pair for exactly this slot combination exists.
    fn pair_exists(&self, first: SlotId, second: SlotId) -> Result<bool, StoreError>;

    /// Stores a new practical pair.
    fn create_pair(&mut self, first: SlotId, second: SlotId) -> Result<PracticalPair, StoreError>;
}

/// Read access to subject records.
pub trait SubjectSource {
    fn subjects(&self) -> Result<Vec<Subject>, StoreError>;
}

/// Timetable row persistence.
pub trait TimetableStore {
    /// Deletes every timetable row as one all-or-nothing step.
    ///
    /// Returns the number of rows removed.
    fn clear_timetable(&mut self) -> Result<usize, StoreError>;

    /// Creates one row.
    fn create_entry(&mut self, entry: NewTimetableEntry) -> Result<TimetableEntry, StoreError>;

    /// All stored rows.
    fn timetable(&self) -> Result<Vec<TimetableEntry>, StoreError>;
}

/// Everything a generation run needs from its backing store.
pub trait Store: SlotRepository + SubjectSource + TimetableStore {}

impl<T: SlotRepository + SubjectSource + TimetableStore> Store for T {}
