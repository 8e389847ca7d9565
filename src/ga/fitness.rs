//! Conflict scoring.
//!
//! # Penalties
//!
//! | Rule | Score |
//! |---|---|
//! | Session missing its subject or time unit | +10 |
//! | Subject unknown or without class type | +10 |
//! | Slot already used by an earlier session | +5 per slot |
//! | Theory subject with more than 3 sessions | +5 per such session |
//!
//! The first two rules short-circuit, so they never stack on one session.

use std::collections::{HashMap, HashSet};

use super::types::Candidate;
use crate::models::{ClassType, SubjectCatalog, SubjectId};

/// Penalty for an incomplete session or an unusable subject.
pub const INVALID_PENALTY: u32 = 10;

/// Penalty for a slot occupied twice, or an overloaded theory subject.
pub const CONFLICT_PENALTY: u32 = 5;

/// Sessions a theory subject may take before each one is penalized.
pub const THEORY_SESSION_LIMIT: usize = 3;

/// Scores a candidate. Lower is better; 0 is conflict-free.
///
/// # Complexity
/// O(n) in the number of sessions.
pub fn fitness_function(candidate: &Candidate, catalog: &SubjectCatalog) -> u32 {
    let mut per_subject: HashMap<SubjectId, usize> = HashMap::new();
    for (subject, _) in candidate.valid_sessions() {
        *per_subject.entry(subject).or_default() += 1;
    }

    let mut conflicts = 0u32;
    let mut used = HashSet::with_capacity(candidate.len());

    for session in &candidate.sessions {
        let (Some(subject), Some(unit)) = (session.subject, session.unit) else {
            conflicts += INVALID_PENALTY;
            continue;
        };
        let Some(class_type) = catalog.class_type_of(subject) else {
            conflicts += INVALID_PENALTY;
            continue;
        };

        for slot in unit.slots() {
            if !used.insert(slot) {
                conflicts += CONFLICT_PENALTY;
            }
        }

        if class_type == ClassType::Theory
            && per_subject.get(&subject).copied().unwrap_or(0) > THEORY_SESSION_LIMIT
        {
            conflicts += CONFLICT_PENALTY;
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::{Session, TimeUnit};
    use crate::models::{
        ClassroomId, DepartmentId, PairId, PracticalPair, SlotId, Subject,
    };

    const LAB: SubjectId = SubjectId(1);
    const MATH: SubjectId = SubjectId(2);
    const UNTYPED: SubjectId = SubjectId(3);
    const TALK: SubjectId = SubjectId(4);

    fn catalog() -> SubjectCatalog {
        SubjectCatalog::new(vec![
            Subject::new(LAB, "Lab", "LAB100", DepartmentId(1))
                .with_hours(2)
                .with_class_type(ClassType::Practical)
                .with_classroom(ClassroomId(1)),
            Subject::new(MATH, "Math", "MATH100", DepartmentId(1)).with_hours(5),
            Subject::new(UNTYPED, "Misc", "MISC100", DepartmentId(1)).without_class_type(),
            Subject::new(TALK, "Talk", "SEM100", DepartmentId(1))
                .with_class_type(ClassType::Seminar),
        ])
    }

    fn theory(subject: SubjectId, slot: u32) -> Session {
        Session::new(subject, TimeUnit::single(SlotId(slot)))
    }

    fn lab(first: u32, second: u32) -> Session {
        Session::new(
            LAB,
            TimeUnit::pair(PracticalPair::new(PairId(1), SlotId(first), SlotId(second))),
        )
    }

    #[test]
    fn test_conflict_free_scores_zero() {
        let c = Candidate::new(vec![lab(1, 2), theory(MATH, 3), theory(MATH, 4), theory(TALK, 5)]);
        assert_eq!(fitness_function(&c, &catalog()), 0);
    }

    #[test]
    fn test_null_session_scores_ten() {
        let c = Candidate::new(vec![Session::empty()]);
        assert_eq!(fitness_function(&c, &catalog()), 10);
    }

    #[test]
    fn test_untyped_and_unknown_subjects() {
        let c = Candidate::new(vec![theory(UNTYPED, 1), theory(SubjectId(99), 2)]);
        assert_eq!(fitness_function(&c, &catalog()), 20);
    }

    #[test]
    fn test_slot_reuse_is_additive() {
        // pair (s1, s2) then theory on s1 and on s2
        let c = Candidate::new(vec![lab(1, 2), theory(MATH, 1), theory(MATH, 2)]);
        assert_eq!(fitness_function(&c, &catalog()), 10);
    }

    #[test]
    fn test_theory_overload_per_session() {
        let c = Candidate::new((1..=5).map(|s| theory(MATH, s)).collect());
        assert_eq!(fitness_function(&c, &catalog()), 25);

        let three = Candidate::new((1..=3).map(|s| theory(MATH, s)).collect());
        assert_eq!(fitness_function(&three, &catalog()), 0);
    }

    #[test]
    fn test_overload_ignores_practical_and_seminar() {
        let mut sessions: Vec<Session> = (1..=4).map(|s| theory(TALK, s)).collect();
        sessions.extend((0..4).map(|i| lab(10 + 2 * i, 11 + 2 * i)));
        assert_eq!(fitness_function(&Candidate::new(sessions), &catalog()), 0);
    }

    #[test]
    fn test_empty_candidate() {
        assert_eq!(fitness_function(&Candidate::default(), &catalog()), 0);
    }
}
