//! Time windows, atomic slots and practical pairs.
//!
//! A declared (source) window is split into atomic slots of at most one
//! hour; atomic slots are the smallest unit the scheduler assigns.
//! Blocked or overlapping periods are not modelled here: the splitter
//! refuses to create overlapping atomic slots instead.

use std::fmt;

use chrono::{NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use super::ids::{PairId, SlotId};
use crate::validation::ValidationError;

/// Length of one atomic slot.
#[inline]
pub fn atomic_slot_length() -> TimeDelta {
    TimeDelta::hours(1)
}

/// Position of a day within the week, Monday first.
#[inline]
pub fn day_order(day: Weekday) -> u32 {
    day.num_days_from_monday()
}

/// A time interval `[start, end)` on one day of the week.
///
/// Source declarations have `derived == false`; the splitter marks them
/// `processed` once consumed. Atomic slots are windows the splitter
/// produced (`derived == true`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Record identifier.
    pub id: SlotId,
    /// Day of week.
    pub day: Weekday,
    /// Interval start (inclusive).
    pub start: NaiveTime,
    /// Interval end (exclusive).
    pub end: NaiveTime,
    /// Source window already split.
    #[serde(default)]
    pub processed: bool,
    /// Produced by splitting.
    #[serde(default)]
    pub derived: bool,
}

impl TimeWindow {
    /// Creates a source (declared) window.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvertedWindow`] unless `start < end`.
    pub fn new(
        id: SlotId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvertedWindow { day, start, end });
        }
        Ok(Self {
            id,
            day,
            start,
            end,
            processed: false,
            derived: false,
        })
    }

    /// Creates an atomic slot (a derived window).
    pub fn derived(
        id: SlotId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, ValidationError> {
        let mut w = Self::new(id, day, start, end)?;
        w.derived = true;
        Ok(w)
    }

    /// Duration of this window.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whether the window is at most one hour long.
    #[inline]
    pub fn is_atomic(&self) -> bool {
        self.duration() <= atomic_slot_length()
    }

    /// Whether two windows on the same day overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    /// Whether this window ends exactly where `next` begins, on the same day.
    pub fn abuts(&self, next: &Self) -> bool {
        self.day == next.day && self.end == next.start
    }

    /// Sort key: (day of week, start time).
    #[inline]
    pub fn sort_key(&self) -> (u32, NaiveTime) {
        (day_order(self.day), self.start)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Two chronologically adjacent atomic slots bound for a double-length
/// practical session.
///
/// Invariant (enforced by the pair builder): both slots are on the same day
/// and `first.end == second.start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PracticalPair {
    pub id: PairId,
    pub first: SlotId,
    pub second: SlotId,
}

impl PracticalPair {
    pub fn new(id: PairId, first: SlotId, second: SlotId) -> Self {
        Self { id, first, second }
    }

    /// Both member slots in chronological order.
    #[inline]
    pub fn slots(&self) -> [SlotId; 2] {
        [self.first, self.second]
    }
}

impl fmt::Display for PracticalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} + {})", self.id, self.first, self.second)
    }
}
