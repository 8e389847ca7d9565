//! Record integrity rules.
//!
//! Checks applied by store implementations before a record is accepted:
//! - Time windows must satisfy `start < end`
//! - Atomic slots last at most one hour
//! - Subject codes are unique
//! - Practical subjects need an even number of weekly hours (whole pairs)
//!   and an assigned classroom
//! - Weekly hours must not exceed the configured maximum, if any
//! - Timetable rows may only reference split (derived) slots

use std::collections::HashSet;

use chrono::{NaiveTime, Weekday};
use thiserror::Error;

use crate::models::{ClassType, SlotId, Subject, TimeWindow};

/// Validation result over a batch of records.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A violated integrity rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start time {start} must be earlier than end time {end} ({day})")]
    InvertedWindow {
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("subject code '{0}' must be unique")]
    DuplicateCode(String),

    #[error("practical subject '{0}' must have an even number of hours per week")]
    OddPracticalHours(String),

    #[error("practical subject '{0}' must have an assigned classroom")]
    MissingClassroom(String),

    #[error("subject '{code}' cannot have more than {max} hours per week")]
    TooManyHours { code: String, max: u32 },

    #[error("{0} is an atomic slot longer than one hour")]
    OversizedSlot(SlotId),

    #[error("{0} is a declared window; timetable rows must use split slots")]
    UnsplitSlot(SlotId),
}

/// Validates a single subject in isolation (uniqueness is not checked).
pub fn validate_subject(
    subject: &Subject,
    max_hours_per_week: Option<u32>,
) -> Result<(), ValidationError> {
    if subject.class_type == Some(ClassType::Practical) {
        if subject.hours_per_week % 2 != 0 {
            return Err(ValidationError::OddPracticalHours(subject.code.clone()));
        }
        if subject.assigned_classroom.is_none() {
            return Err(ValidationError::MissingClassroom(subject.code.clone()));
        }
    }
    if let Some(max) = max_hours_per_week {
        if subject.hours_per_week > max {
            return Err(ValidationError::TooManyHours {
                code: subject.code.clone(),
                max,
            });
        }
    }
    Ok(())
}

/// Validates a batch of subjects.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_subjects(subjects: &[Subject], max_hours_per_week: Option<u32>) -> ValidationResult {
    let mut errors = Vec::new();
    let mut codes = HashSet::new();

    for s in subjects {
        if !codes.insert(s.code.as_str()) {
            errors.push(ValidationError::DuplicateCode(s.code.clone()));
        }
        if let Err(e) = validate_subject(s, max_hours_per_week) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a window's interval.
pub fn validate_window(window: &TimeWindow) -> Result<(), ValidationError> {
    if window.start >= window.end {
        return Err(ValidationError::InvertedWindow {
            day: window.day,
            start: window.start,
            end: window.end,
        });
    }
    if window.derived && !window.is_atomic() {
        return Err(ValidationError::OversizedSlot(window.id));
    }
    Ok(())
}

/// Checks that a timetable row may reference `window`.
pub fn validate_entry_slot(window: &TimeWindow) -> Result<(), ValidationError> {
    if !window.derived {
        return Err(ValidationError::UnsplitSlot(window.id));
    }
    Ok(())
}
