//! Drawing random sessions from the shared pools.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::types::{Session, TimeUnit};
use crate::error::{GenerateError, Result};
use crate::models::SubjectCatalog;
use crate::slots::SlotPools;

/// Draws one session and removes its time unit from the pools.
///
/// Practical subjects are served first while pairs remain; theory subjects
/// then take single slots. Once neither combination is available the empty
/// session is returned, which is an expected terminal state.
///
/// # Errors
/// Returns a precondition error when the catalog has no subject with a
/// class type.
pub fn initialize_session<R: Rng + ?Sized>(
    catalog: &SubjectCatalog,
    pools: &mut SlotPools,
    rng: &mut R,
) -> Result<Session> {
    if catalog.valid().is_empty() {
        return Err(GenerateError::precondition("No valid subjects available."));
    }

    if pools.has_pairs() {
        if let Some(&subject) = catalog.practical().choose(rng) {
            if let Some(pair) = pools.draw_pair(rng) {
                return Ok(Session::new(subject, TimeUnit::pair(pair)));
            }
        }
    }

    if pools.has_slots() {
        if let Some(&subject) = catalog.theory().choose(rng) {
            if let Some(slot) = pools.draw_slot(rng) {
                return Ok(Session::new(subject, TimeUnit::single(slot)));
            }
        }
    }

    Ok(Session::empty())
}

/// Draws `count` sessions in order.
pub fn initialize_sessions<R: Rng + ?Sized>(
    catalog: &SubjectCatalog,
    pools: &mut SlotPools,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Session>> {
    (0..count)
        .map(|_| initialize_session(catalog, pools, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassType, ClassroomId, DepartmentId, PairId, PracticalPair, SlotId, Subject, SubjectId,
    };
    use crate::random::create_rng;

    fn catalog(practical: bool, theory: bool) -> SubjectCatalog {
        let mut subjects = Vec::new();
        if practical {
            subjects.push(
                Subject::new(SubjectId(1), "Lab", "LAB100", DepartmentId(1))
                    .with_hours(2)
                    .with_class_type(ClassType::Practical)
                    .with_classroom(ClassroomId(1)),
            );
        }
        if theory {
            subjects.push(Subject::new(SubjectId(2), "Logic", "PHIL101", DepartmentId(1)));
        }
        SubjectCatalog::new(subjects)
    }

    fn pools() -> SlotPools {
        SlotPools::new(
            vec![PracticalPair::new(PairId(1), SlotId(1), SlotId(2))],
            vec![SlotId(3)],
        )
    }

    #[test]
    fn test_pairs_first_then_slots_then_empty() {
        let cat = catalog(true, true);
        let mut pools = pools();
        let mut rng = create_rng(42);

        let first = initialize_session(&cat, &mut pools, &mut rng).unwrap();
        assert_eq!(first.subject, Some(SubjectId(1)));
        assert!(first.unit.is_some_and(|u| u.is_pair()));

        let second = initialize_session(&cat, &mut pools, &mut rng).unwrap();
        assert_eq!(second, Session::new(SubjectId(2), TimeUnit::single(SlotId(3))));

        let third = initialize_session(&cat, &mut pools, &mut rng).unwrap();
        assert_eq!(third, Session::empty());
    }

    #[test]
    fn test_pairs_untouched_without_practical_subjects() {
        let cat = catalog(false, true);
        let mut pools = pools();
        let mut rng = create_rng(42);

        let sessions = initialize_sessions(&cat, &mut pools, 3, &mut rng).unwrap();
        assert_eq!(sessions[0].unit, Some(TimeUnit::single(SlotId(3))));
        assert!(!sessions[1].is_valid());
        assert_eq!(pools.pairs().len(), 1);
    }

    #[test]
    fn test_no_valid_subjects() {
        let cat = SubjectCatalog::new(vec![
            Subject::new(SubjectId(5), "Untyped", "X1", DepartmentId(1)).without_class_type(),
        ]);
        let mut pools = pools();
        let mut rng = create_rng(42);

        let err = initialize_session(&cat, &mut pools, &mut rng).unwrap_err();
        assert_eq!(err.to_string(), "No valid subjects available.");
    }
}
