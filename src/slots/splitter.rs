//! Splitting declared windows into atomic slots.

use chrono::Weekday;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::pairing::PracticalPairBuilder;
use crate::error::StoreError;
use crate::models::{atomic_slot_length, day_order, TimeWindow};
use crate::store::SlotRepository;

/// Outcome of one splitting pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    /// Source windows consumed.
    pub windows: usize,
    /// Atomic slots created.
    pub created: usize,
    /// Days touched, Monday first.
    pub days: Vec<Weekday>,
    /// Practical pairs created for the touched days.
    pub pairs_created: usize,
}

/// Splits source windows into atomic slots of at most one hour.
///
/// The last slot of a window may be shorter than an hour. Existing slots
/// are never duplicated and new slots never overlap existing ones on the
/// same day. Once every window is split, each touched day is handed to the
/// pair builder exactly once.
#[derive(Debug, Clone, Default)]
pub struct TimeSlotSplitter {
    pairing: PracticalPairBuilder,
}

impl TimeSlotSplitter {
    pub fn new(pairing: PracticalPairBuilder) -> Self {
        Self { pairing }
    }

    /// Splits every window the repository still reports as pending.
    pub fn split_pending<S: SlotRepository + ?Sized>(
        &self,
        repo: &mut S,
    ) -> Result<SplitReport, StoreError> {
        let windows = repo.pending_windows()?;
        self.split_windows(repo, &windows)
    }

    /// Splits the given source windows. Derived windows are ignored.
    pub fn split_windows<S: SlotRepository + ?Sized>(
        &self,
        repo: &mut S,
        windows: &[TimeWindow],
    ) -> Result<SplitReport, StoreError> {
        let mut report = SplitReport::default();

        for window in windows.iter().filter(|w| !w.derived) {
            report.created += self.split_one(repo, window)?;
            repo.mark_processed(window.id)?;
            report.windows += 1;
            if !report.days.contains(&window.day) {
                report.days.push(window.day);
            }
        }

        report.days.sort_by_key(|d| day_order(*d));
        for &day in &report.days {
            report.pairs_created += self.pairing.build_for_day(repo, day)?.len();
        }

        if report.created == 0 {
            warn!(windows = report.windows, "No atomic slots created");
        } else {
            info!(
                windows = report.windows,
                created = report.created,
                pairs = report.pairs_created,
                "Time windows split"
            );
        }
        Ok(report)
    }

    fn split_one<S: SlotRepository + ?Sized>(
        &self,
        repo: &mut S,
        window: &TimeWindow,
    ) -> Result<usize, StoreError> {
        let mut existing = repo.atomic_slots_on(window.day)?;
        let mut created = 0;
        let mut cursor = window.start;

        while cursor < window.end {
            let (next, wrapped) = cursor.overflowing_add_signed(atomic_slot_length());
            let end = if wrapped != 0 || next > window.end {
                window.end
            } else {
                next
            };

            if existing.iter().any(|s| s.start == cursor && s.end == end) {
                debug!(day = %window.day, start = %cursor, "Atomic slot exists");
            } else if let Some(clash) = existing
                .iter()
                .find(|s| s.start < end && cursor < s.end)
            {
                warn!(
                    day = %window.day,
                    start = %cursor,
                    end = %end,
                    clash = %clash,
                    "Skipping slot overlapping an existing one"
                );
            } else {
                existing.push(repo.create_atomic_slot(window.day, cursor, end)?);
                created += 1;
            }
            cursor = end;
        }
        Ok(created)
    }
}
