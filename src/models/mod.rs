//! Timetabling domain models.
//!
//! Records read from and written to the data-access boundary, plus the
//! indexed [`SubjectCatalog`] view the engine works against.
//!
//! # Time Model
//!
//! Days are `chrono::Weekday`; times of day are `chrono::NaiveTime`. A
//! [`TimeWindow`] is the half-open interval `[start, end)` on one day.

mod ids;
mod subject;
mod time;
mod timetable;

pub use ids::{ClassroomId, DepartmentId, EntryId, FacultyId, PairId, SlotId, SubjectId};
pub use subject::{ClassType, Subject, SubjectCatalog};
pub use time::{atomic_slot_length, day_order, PracticalPair, TimeWindow};
pub use timetable::{NewTimetableEntry, TimetableEntry};
