//! Persisted timetable rows.

use serde::{Deserialize, Serialize};

use super::ids::{ClassroomId, DepartmentId, EntryId, FacultyId, SlotId, SubjectId};

/// A timetable row to be created.
///
/// Faculty and classroom are left unset by the engine; only subject and
/// time slot are decided at this stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimetableEntry {
    pub department: DepartmentId,
    pub faculty: Option<FacultyId>,
    pub subject: SubjectId,
    pub classroom: Option<ClassroomId>,
    pub time_slot: SlotId,
}

impl NewTimetableEntry {
    /// A row with faculty and classroom unassigned.
    pub fn unassigned(department: DepartmentId, subject: SubjectId, time_slot: SlotId) -> Self {
        Self {
            department,
            faculty: None,
            subject,
            classroom: None,
            time_slot,
        }
    }
}

/// A stored timetable row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub id: EntryId,
    pub department: DepartmentId,
    pub faculty: Option<FacultyId>,
    pub subject: SubjectId,
    pub classroom: Option<ClassroomId>,
    pub time_slot: SlotId,
}

impl TimetableEntry {
    pub fn from_new(id: EntryId, new: NewTimetableEntry) -> Self {
        Self {
            id,
            department: new.department,
            faculty: new.faculty,
            subject: new.subject,
            classroom: new.classroom,
            time_slot: new.time_slot,
        }
    }
}
