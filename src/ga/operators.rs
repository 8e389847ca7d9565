//! Genetic operators over session lists.
//!
//! # Crossover
//!
//! - [`two_point_crossover`]: swaps a middle segment between two candidates
//!
//! # Mutation
//!
//! - [`reassign_mutation`]: gives one session a new subject and, when the
//!   pools allow, a fresh time unit
//!
//! [`Operators`] bundles them with a fitness function for the engine.
//! Selection is configured separately through
//! [`GaConfig::selection`](super::GaConfig::selection).

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use tracing::{debug, trace};

use super::fitness::fitness_function;
use super::types::{Candidate, Individual, TimeUnit};
use crate::models::SubjectCatalog;
use crate::slots::SlotPools;

/// Scores a candidate (lower is better).
pub type EvaluateFn = fn(&Candidate, &SubjectCatalog) -> u32;

/// Recombines two candidates in place.
pub type CrossoverFn = fn(&mut Candidate, &mut Candidate, &mut dyn RngCore);

/// Perturbs one candidate in place, drawing from the shared pools.
/// Returns whether the genome changed.
pub type MutateFn = fn(&mut Candidate, &SubjectCatalog, &mut SlotPools, &mut dyn RngCore) -> bool;

/// The operator set an [`EvolutionEngine`](super::EvolutionEngine) runs with.
#[derive(Debug, Clone, Copy)]
pub struct Operators {
    pub evaluate: EvaluateFn,
    pub crossover: CrossoverFn,
    pub mutate: MutateFn,
}

impl Operators {
    /// Conflict scoring, two-point crossover and reassignment mutation.
    pub fn standard() -> Self {
        Self {
            evaluate: fitness_function,
            crossover: |a, b, rng| two_point_crossover(a, b, rng),
            mutate: |c, catalog, pools, rng| reassign_mutation(c, catalog, pools, rng),
        }
    }
}

impl Default for Operators {
    fn default() -> Self {
        Self::standard()
    }
}

/// Two-point crossover.
///
/// Picks `1 <= p1 <= len-2` and `p1 <= p2 <= len-1`, then swaps the
/// sessions in `[p1, p2)` between both candidates. Both cached fitnesses
/// are dropped. A no-op unless both candidates hold at least two sessions.
pub fn two_point_crossover<R: Rng + ?Sized>(a: &mut Candidate, b: &mut Candidate, rng: &mut R) {
    let len = a.len().min(b.len());
    if len < 2 {
        trace!("Skipping crossover: candidates too small");
        return;
    }

    let p1 = rng.random_range(1..=(len - 2).max(1));
    let p2 = rng.random_range(p1..=len - 1);
    a.sessions[p1..p2].swap_with_slice(&mut b.sessions[p1..p2]);

    a.invalidate();
    b.invalidate();
}

/// Reassignment mutation.
///
/// 1. Pick a random session; an invalid one is skipped, not retried
/// 2. Give it a uniformly random subject with a class type
/// 3. Practical subjects take a pair from the pool, all others a single
///    slot; the old time unit stays when the pool is empty
///
/// Drawn units are removed from the pool by index.
pub fn reassign_mutation<R: Rng + ?Sized>(
    candidate: &mut Candidate,
    catalog: &SubjectCatalog,
    pools: &mut SlotPools,
    rng: &mut R,
) -> bool {
    if candidate.is_empty() {
        return false;
    }

    let idx = rng.random_range(0..candidate.len());
    if !candidate.sessions[idx].is_valid() {
        debug!(index = idx, "Skipping invalid session during mutation");
        return false;
    }

    let Some(&subject) = catalog.valid().choose(rng) else {
        debug!("No valid subjects available for mutation");
        return false;
    };

    let unit = if catalog
        .get(subject)
        .is_some_and(|s| s.is_practical())
    {
        pools.draw_pair(rng).map(TimeUnit::pair)
    } else {
        pools.draw_slot(rng).map(TimeUnit::single)
    };

    let session = &mut candidate.sessions[idx];
    session.subject = Some(subject);
    match unit {
        Some(unit) => session.unit = Some(unit),
        None => trace!(index = idx, "Pool empty, keeping time unit"),
    }

    candidate.invalidate();
    true
}
