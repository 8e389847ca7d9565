//! Committing the winning candidate as timetable rows.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::ga::Candidate;
use crate::models::{NewTimetableEntry, SlotId, SubjectCatalog, SubjectId};
use crate::store::TimetableStore;

/// Persistence filters.
///
/// Turning both off writes every valid session unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistConfig {
    /// Write at most `hours_per_week` rows per subject. A pair session is
    /// written only if both of its hours still fit.
    pub enforce_weekly_hours: bool,
    /// Skip a session whose slot was already written in this commit.
    pub skip_double_booked: bool,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            enforce_weekly_hours: true,
            skip_double_booked: true,
        }
    }
}

/// Row counts of one commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PersistReport {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Writes a candidate through a [`TimetableStore`], one row per occupied
/// atomic slot, in session order.
///
/// A failing row is logged and counted; the remaining rows are still
/// attempted.
#[derive(Debug, Clone, Default)]
pub struct TimetablePersister {
    config: PersistConfig,
}

impl TimetablePersister {
    pub fn new(config: PersistConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PersistConfig {
        &self.config
    }

    pub fn commit<S: TimetableStore + ?Sized>(
        &self,
        store: &mut S,
        candidate: &Candidate,
        catalog: &SubjectCatalog,
    ) -> PersistReport {
        let mut report = PersistReport::default();
        let mut booked: HashSet<SlotId> = HashSet::new();
        let mut hours: HashMap<SubjectId, usize> = HashMap::new();

        for (subject_id, unit) in candidate.valid_sessions() {
            let slots: Vec<SlotId> = unit.slots().collect();

            let Some(subject) = catalog.get(subject_id) else {
                debug!(subject = %subject_id, "Skipping session with unknown subject");
                report.skipped += slots.len();
                continue;
            };

            if self.config.skip_double_booked && slots.iter().any(|s| booked.contains(s)) {
                debug!(subject = %subject, "Skipping double-booked session");
                report.skipped += slots.len();
                continue;
            }

            let used = hours.get(&subject_id).copied().unwrap_or(0);
            if self.config.enforce_weekly_hours
                && used + slots.len() > subject.hours_per_week as usize
            {
                debug!(subject = %subject, used, "Weekly hours reached");
                report.skipped += slots.len();
                continue;
            }

            for slot in slots {
                let row = NewTimetableEntry::unassigned(subject.department, subject_id, slot);
                match store.create_entry(row) {
                    Ok(_) => {
                        report.written += 1;
                        booked.insert(slot);
                        *hours.entry(subject_id).or_default() += 1;
                    }
                    Err(e) => {
                        error!(subject = %subject, slot = %slot, error = %e, "Error saving session");
                        report.failed += 1;
                    }
                }
            }
        }

        info!(
            written = report.written,
            skipped = report.skipped,
            failed = report.failed,
            "Timetable committed"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::ga::{Session, TimeUnit};
    use crate::models::{
        ClassType, ClassroomId, DepartmentId, EntryId, PairId, PracticalPair, Subject,
        TimetableEntry,
    };

    #[derive(Default)]
    struct Recorder {
        rows: Vec<NewTimetableEntry>,
        reject: Option<SlotId>,
    }

    impl TimetableStore for Recorder {
        fn clear_timetable(&mut self) -> Result<usize, StoreError> {
            Ok(std::mem::take(&mut self.rows).len())
        }

        fn create_entry(&mut self, entry: NewTimetableEntry) -> Result<TimetableEntry, StoreError> {
            if Some(entry.time_slot) == self.reject {
                return Err(StoreError::Backend("constraint violated".into()));
            }
            self.rows.push(entry);
            Ok(TimetableEntry::from_new(EntryId(self.rows.len() as u32), entry))
        }

        fn timetable(&self) -> Result<Vec<TimetableEntry>, StoreError> {
            Ok(Vec::new())
        }
    }

    const MATH: SubjectId = SubjectId(1);
    const LAB: SubjectId = SubjectId(2);

    fn catalog() -> SubjectCatalog {
        SubjectCatalog::new(vec![
            Subject::new(MATH, "Math", "MATH100", DepartmentId(4)).with_hours(2),
            Subject::new(LAB, "Lab", "LAB100", DepartmentId(5))
                .with_hours(2)
                .with_class_type(ClassType::Practical)
                .with_classroom(ClassroomId(1)),
        ])
    }

    fn single(subject: SubjectId, slot: u32) -> Session {
        Session::new(subject, TimeUnit::single(SlotId(slot)))
    }

    fn pair(first: u32) -> Session {
        Session::new(
            LAB,
            TimeUnit::pair(PracticalPair::new(PairId(first), SlotId(first), SlotId(first + 1))),
        )
    }

    #[test]
    fn test_pair_writes_two_rows() {
        let mut store = Recorder::default();
        let c = Candidate::new(vec![pair(10), Session::empty(), single(MATH, 3)]);
        let report = TimetablePersister::default().commit(&mut store, &c, &catalog());

        assert_eq!(report, PersistReport { written: 3, skipped: 0, failed: 0 });
        let slots: Vec<u32> = store.rows.iter().map(|r| r.time_slot.get()).collect();
        assert_eq!(slots, vec![10, 11, 3]);
        assert!(store.rows.iter().all(|r| r.faculty.is_none() && r.classroom.is_none()));
        assert_eq!(store.rows[0].department, DepartmentId(5));
    }

    #[test]
    fn test_weekly_hours_cap() {
        let mut store = Recorder::default();
        let c = Candidate::new(vec![
            single(MATH, 1),
            single(MATH, 2),
            single(MATH, 3),
            pair(10),
            pair(20),
        ]);
        let report = TimetablePersister::default().commit(&mut store, &c, &catalog());
        assert_eq!(report.written, 4);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_double_booking_skipped() {
        let mut store = Recorder::default();
        let c = Candidate::new(vec![pair(1), single(MATH, 2), single(MATH, 3)]);
        let report = TimetablePersister::default().commit(&mut store, &c, &catalog());
        assert_eq!(report, PersistReport { written: 3, skipped: 1, failed: 0 });
    }

    #[test]
    fn test_unfiltered_commit() {
        let mut store = Recorder::default();
        let c = Candidate::new(vec![single(MATH, 1), single(MATH, 1), single(MATH, 1)]);
        let persister = TimetablePersister::new(PersistConfig {
            enforce_weekly_hours: false,
            skip_double_booked: false,
        });
        assert_eq!(persister.commit(&mut store, &c, &catalog()).written, 3);
    }

    #[test]
    fn test_row_failure_does_not_abort() {
        let mut store = Recorder {
            reject: Some(SlotId(1)),
            ..Recorder::default()
        };
        let c = Candidate::new(vec![single(MATH, 1), single(MATH, 2)]);
        let report = TimetablePersister::default().commit(&mut store, &c, &catalog());
        assert_eq!(report, PersistReport { written: 1, skipped: 0, failed: 1 });
        assert_eq!(store.rows[0].time_slot, SlotId(2));
    }
}
