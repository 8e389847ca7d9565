//! In-memory store with JSON snapshots.

use std::path::Path;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::{SlotRepository, SubjectSource, TimetableStore};
use crate::error::StoreError;
use crate::models::{
    EntryId, NewTimetableEntry, PairId, PracticalPair, SlotId, Subject, TimeWindow,
    TimetableEntry,
};
use crate::validation::{self, ValidationError};

/// In-memory implementation of the data-access boundary.
///
/// Windows and atomic slots share one id space, as they share one table in
/// a relational backend. Records are validated on insert and on snapshot
/// load.
///
/// # Example
///
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use u_timetable::store::{MemoryStore, SlotRepository};
///
/// let mut store = MemoryStore::new();
/// let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// store.add_window(Weekday::Mon, t(8), t(12)).unwrap();
/// assert_eq!(store.pending_windows().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    windows: Vec<TimeWindow>,
    #[serde(default)]
    pairs: Vec<PracticalPair>,
    #[serde(default)]
    subjects: Vec<Subject>,
    #[serde(default)]
    timetable: Vec<TimetableEntry>,
    /// Upper bound on a subject's weekly hours.
    #[serde(default)]
    max_hours_per_week: Option<u32>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weekly-hours ceiling applied to subjects.
    pub fn with_max_hours_per_week(mut self, max: Option<u32>) -> Self {
        self.max_hours_per_week = max;
        self
    }

    /// Declares a source window.
    pub fn add_window(
        &mut self,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<SlotId, StoreError> {
        let window = TimeWindow::new(self.next_slot_id(), day, start, end)?;
        let id = window.id;
        self.windows.push(window);
        Ok(id)
    }

    /// Adds a subject after validating it.
    pub fn add_subject(&mut self, subject: Subject) -> Result<(), StoreError> {
        validation::validate_subject(&subject, self.max_hours_per_week)?;
        if self.subjects.iter().any(|s| s.code == subject.code) {
            return Err(ValidationError::DuplicateCode(subject.code).into());
        }
        self.subjects.push(subject);
        Ok(())
    }

    /// All windows, source and derived, in insertion order.
    pub fn windows(&self) -> &[TimeWindow] {
        &self.windows
    }

    /// Looks up a window by id.
    pub fn window(&self, id: SlotId) -> Option<&TimeWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Parses and validates a JSON snapshot.
    pub fn from_json_str(s: &str) -> Result<Self, StoreError> {
        let store: Self = serde_json::from_str(s)?;
        store.validate()?;
        Ok(store)
    }

    /// Loads a JSON snapshot from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serializes the store as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes a JSON snapshot to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Re-checks every window and subject, reporting the first violation.
    pub fn validate(&self) -> Result<(), StoreError> {
        for w in &self.windows {
            validation::validate_window(w)?;
        }
        match validation::validate_subjects(&self.subjects, self.max_hours_per_week) {
            Err(errors) => match errors.into_iter().next() {
                Some(first) => Err(first.into()),
                None => Ok(()),
            },
            Ok(()) => Ok(()),
        }
    }

    fn next_slot_id(&self) -> SlotId {
        SlotId(self.windows.iter().map(|w| w.id.0).max().map_or(1, |m| m + 1))
    }

    fn next_pair_id(&self) -> PairId {
        PairId(self.pairs.iter().map(|p| p.id.0).max().map_or(1, |m| m + 1))
    }

    fn next_entry_id(&self) -> EntryId {
        EntryId(self.timetable.iter().map(|e| e.id.0).max().map_or(1, |m| m + 1))
    }

    fn sorted(mut slots: Vec<TimeWindow>) -> Vec<TimeWindow> {
        slots.sort_by_key(|w| w.sort_key());
        slots
    }
}

impl SlotRepository for MemoryStore {
    fn pending_windows(&self) -> Result<Vec<TimeWindow>, StoreError> {
        Ok(Self::sorted(
            self.windows
                .iter()
                .filter(|w| !w.derived && !w.processed)
                .cloned()
                .collect(),
        ))
    }

    fn atomic_slots_on(&self, day: Weekday) -> Result<Vec<TimeWindow>, StoreError> {
        Ok(Self::sorted(
            self.windows
                .iter()
                .filter(|w| w.derived && w.day == day)
                .cloned()
                .collect(),
        ))
    }

    fn atomic_slots(&self) -> Result<Vec<TimeWindow>, StoreError> {
        Ok(Self::sorted(
            self.windows.iter().filter(|w| w.derived).cloned().collect(),
        ))
    }

    fn create_atomic_slot(
        &mut self,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<TimeWindow, StoreError> {
        let slot = TimeWindow::derived(self.next_slot_id(), day, start, end)?;
        validation::validate_window(&slot)?;
        self.windows.push(slot.clone());
        Ok(slot)
    }

    fn mark_processed(&mut self, id: SlotId) -> Result<(), StoreError> {
        let window = self
            .windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::NotFound {
                kind: "time window",
                id: id.get(),
            })?;
        window.processed = true;
        Ok(())
    }

    fn practical_pairs(&self) -> Result<Vec<PracticalPair>, StoreError> {
        Ok(self.pairs.clone())
    }

    fn pair_exists(&self, first: SlotId, second: SlotId) -> Result<bool, StoreError> {
        Ok(self
            .pairs
            .iter()
            .any(|p| p.first == first && p.second == second))
    }

    fn create_pair(&mut self, first: SlotId, second: SlotId) -> Result<PracticalPair, StoreError> {
        for id in [first, second] {
            if self.window(id).is_none() {
                return Err(StoreError::NotFound {
                    kind: "time slot",
                    id: id.get(),
                });
            }
        }
        let pair = PracticalPair::new(self.next_pair_id(), first, second);
        self.pairs.push(pair);
        Ok(pair)
    }
}

impl SubjectSource for MemoryStore {
    fn subjects(&self) -> Result<Vec<Subject>, StoreError> {
        Ok(self.subjects.clone())
    }
}

impl TimetableStore for MemoryStore {
    fn clear_timetable(&mut self) -> Result<usize, StoreError> {
        let removed = self.timetable.len();
        self.timetable.clear();
        Ok(removed)
    }

    fn create_entry(&mut self, entry: NewTimetableEntry) -> Result<TimetableEntry, StoreError> {
        let slot = self.window(entry.time_slot).ok_or(StoreError::NotFound {
            kind: "time slot",
            id: entry.time_slot.get(),
        })?;
        validation::validate_entry_slot(slot)?;
        let row = TimetableEntry::from_new(self.next_entry_id(), entry);
        self.timetable.push(row);
        Ok(row)
    }

    fn timetable(&self) -> Result<Vec<TimetableEntry>, StoreError> {
        Ok(self.timetable.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassType, ClassroomId, DepartmentId, SubjectId};

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_ids_shared_between_windows_and_slots() {
        let mut store = MemoryStore::new();
        let w = store.add_window(Weekday::Mon, t(8), t(10)).unwrap();
        let s = store.create_atomic_slot(Weekday::Mon, t(8), t(9)).unwrap();
        assert_eq!(w, SlotId(1));
        assert_eq!(s.id, SlotId(2));
        assert!(s.derived);
    }

    #[test]
    fn test_pending_excludes_processed_and_derived() {
        let mut store = MemoryStore::new();
        let a = store.add_window(Weekday::Tue, t(8), t(10)).unwrap();
        store.add_window(Weekday::Mon, t(13), t(15)).unwrap();
        store.create_atomic_slot(Weekday::Mon, t(8), t(9)).unwrap();
        store.mark_processed(a).unwrap();

        let pending = store.pending_windows().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].day, Weekday::Mon);
    }

    #[test]
    fn test_atomic_slots_sorted() {
        let mut store = MemoryStore::new();
        store.create_atomic_slot(Weekday::Wed, t(10), t(11)).unwrap();
        store.create_atomic_slot(Weekday::Mon, t(9), t(10)).unwrap();
        store.create_atomic_slot(Weekday::Mon, t(8), t(9)).unwrap();

        let keys: Vec<_> = store
            .atomic_slots()
            .unwrap()
            .iter()
            .map(|w| (w.day, w.start))
            .collect();
        assert_eq!(
            keys,
            vec![(Weekday::Mon, t(8)), (Weekday::Mon, t(9)), (Weekday::Wed, t(10))]
        );
    }

    #[test]
    fn test_oversized_slot_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.create_atomic_slot(Weekday::Mon, t(8), t(10)),
            Err(StoreError::Invalid(ValidationError::OversizedSlot(_)))
        ));
        assert!(store.atomic_slots().unwrap().is_empty());
    }

    #[test]
    fn test_mark_missing_window() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.mark_processed(SlotId(9)),
            Err(StoreError::NotFound { id: 9, .. })
        ));
    }

    #[test]
    fn test_subject_validation_on_insert() {
        let mut store = MemoryStore::new();
        let lab = Subject::new(SubjectId(1), "Lab", "BIO120", DepartmentId(1))
            .with_hours(3)
            .with_class_type(ClassType::Practical)
            .with_classroom(ClassroomId(2));
        assert!(matches!(
            store.add_subject(lab),
            Err(StoreError::Invalid(ValidationError::OddPracticalHours(_)))
        ));

        let theory = Subject::new(SubjectId(2), "Bio", "BIO101", DepartmentId(1));
        store.add_subject(theory.clone()).unwrap();
        assert!(matches!(
            store.add_subject(theory),
            Err(StoreError::Invalid(ValidationError::DuplicateCode(_)))
        ));
    }

    #[test]
    fn test_entry_requires_split_slot() {
        let mut store = MemoryStore::new();
        let source = store.add_window(Weekday::Mon, t(8), t(10)).unwrap();
        let slot = store.create_atomic_slot(Weekday::Mon, t(8), t(9)).unwrap();

        let bad = NewTimetableEntry::unassigned(DepartmentId(1), SubjectId(1), source);
        assert!(matches!(
            store.create_entry(bad),
            Err(StoreError::Invalid(ValidationError::UnsplitSlot(_)))
        ));

        let good = NewTimetableEntry::unassigned(DepartmentId(1), SubjectId(1), slot.id);
        let row = store.create_entry(good).unwrap();
        assert_eq!(row.id, EntryId(1));
        assert_eq!(row.faculty, None);
        assert_eq!(row.classroom, None);

        assert_eq!(store.clear_timetable().unwrap(), 1);
        assert!(store.timetable().unwrap().is_empty());
    }

    #[test]
    fn test_json_roundtrip_and_validation() {
        let mut store = MemoryStore::new();
        store.add_window(Weekday::Fri, t(9), t(12)).unwrap();
        store
            .add_subject(Subject::new(SubjectId(1), "Art", "ART100", DepartmentId(4)))
            .unwrap();

        let json = store.to_json_string().unwrap();
        let back = MemoryStore::from_json_str(&json).unwrap();
        assert_eq!(back.windows(), store.windows());
        assert_eq!(back.subjects().unwrap(), store.subjects().unwrap());

        let inverted = r#"{"windows":[{"id":1,"day":"Mon","start":"10:00:00","end":"09:00:00"}]}"#;
        assert!(matches!(
            MemoryStore::from_json_str(inverted),
            Err(StoreError::Invalid(ValidationError::InvertedWindow { .. }))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = MemoryStore::new();
        store.add_window(Weekday::Thu, t(14), t(16)).unwrap();
        store.save(&path).unwrap();

        let back = MemoryStore::load(&path).unwrap();
        assert_eq!(back.windows().len(), 1);
    }
}
