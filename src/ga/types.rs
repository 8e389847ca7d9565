//! Genome types for the timetable search.
//!
//! A [`Candidate`] is a fixed-length list of [`Session`]s. Each session binds
//! a subject to a [`TimeUnit`]: a single atomic slot for theory and seminar
//! subjects, a practical pair for practical ones.

use serde::Serialize;

use crate::models::{PracticalPair, SlotId, SubjectId};

/// A candidate solution that carries a cached fitness.
///
/// Lower fitness is better. Unevaluated individuals report `u32::MAX`,
/// so selection never prefers them over scored ones.
pub trait Individual: Clone + Send + Sync {
    /// Cached fitness, or `u32::MAX` when not evaluated.
    fn fitness(&self) -> u32;

    /// Whether a cached fitness is present.
    fn is_evaluated(&self) -> bool;

    /// Stores a freshly computed fitness.
    fn set_fitness(&mut self, fitness: u32);

    /// Drops the cached fitness after the genome changed.
    fn invalidate(&mut self);
}

/// The time a session occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimeUnit {
    /// One atomic slot.
    Single { slot: SlotId },
    /// Two adjacent atomic slots.
    Pair { pair: PracticalPair },
}

impl TimeUnit {
    pub fn single(slot: SlotId) -> Self {
        Self::Single { slot }
    }

    pub fn pair(pair: PracticalPair) -> Self {
        Self::Pair { pair }
    }

    /// Occupied slots in chronological order (one or two).
    pub fn slots(&self) -> impl Iterator<Item = SlotId> {
        let (first, second) = match *self {
            Self::Single { slot } => (slot, None),
            Self::Pair { pair } => (pair.first, Some(pair.second)),
        };
        std::iter::once(first).chain(second)
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Self::Pair { .. })
    }
}

/// One scheduled class: a subject bound to a time unit.
///
/// Either part may be missing. The empty session is what the factory hands
/// out once the pools are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub subject: Option<SubjectId>,
    pub unit: Option<TimeUnit>,
}

impl Session {
    pub fn new(subject: SubjectId, unit: TimeUnit) -> Self {
        Self {
            subject: Some(subject),
            unit: Some(unit),
        }
    }

    /// A session with neither subject nor time unit.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether both the subject and the time unit are present.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.subject.is_some() && self.unit.is_some()
    }
}

/// One full proposed timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub sessions: Vec<Session>,
    #[serde(skip)]
    fitness: Option<u32>,
}

impl Candidate {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self {
            sessions,
            fitness: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions with both subject and time unit.
    pub fn valid_sessions(&self) -> impl Iterator<Item = (SubjectId, &TimeUnit)> {
        self.sessions.iter().filter_map(|s| match (s.subject, &s.unit) {
            (Some(subject), Some(unit)) => Some((subject, unit)),
            _ => None,
        })
    }

    /// Cached fitness, if evaluated.
    pub fn cached_fitness(&self) -> Option<u32> {
        self.fitness
    }
}

impl Individual for Candidate {
    fn fitness(&self) -> u32 {
        self.fitness.unwrap_or(u32::MAX)
    }

    fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    fn set_fitness(&mut self, fitness: u32) {
        self.fitness = Some(fitness);
    }

    fn invalidate(&mut self) {
        self.fitness = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PairId;

    #[test]
    fn test_session_validity() {
        assert!(!Session::empty().is_valid());
        assert!(Session::new(SubjectId(1), TimeUnit::single(SlotId(2))).is_valid());
        let half = Session {
            subject: Some(SubjectId(1)),
            unit: None,
        };
        assert!(!half.is_valid());
    }

    #[test]
    fn test_unit_slots() {
        let pair = PracticalPair::new(PairId(1), SlotId(3), SlotId(4));
        let both: Vec<_> = TimeUnit::pair(pair).slots().collect();
        assert_eq!(both, vec![SlotId(3), SlotId(4)]);
        let one: Vec<_> = TimeUnit::single(SlotId(9)).slots().collect();
        assert_eq!(one, vec![SlotId(9)]);
        assert!(TimeUnit::pair(pair).is_pair());
    }

    #[test]
    fn test_fitness_cache() {
        let mut c = Candidate::new(vec![Session::empty()]);
        assert!(!c.is_evaluated());
        assert_eq!(c.fitness(), u32::MAX);
        c.set_fitness(10);
        assert_eq!(c.cached_fitness(), Some(10));
        c.invalidate();
        assert_eq!(c.cached_fitness(), None);
    }

    #[test]
    fn test_valid_sessions_skips_partial() {
        let c = Candidate::new(vec![
            Session::new(SubjectId(1), TimeUnit::single(SlotId(1))),
            Session::empty(),
            Session {
                subject: None,
                unit: Some(TimeUnit::single(SlotId(2))),
            },
        ]);
        assert_eq!(c.valid_sessions().count(), 1);
    }
}
