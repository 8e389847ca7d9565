//! Survivor selection.
//!
//! Both strategies minimize: lower fitness wins. Unevaluated candidates
//! compare as `u32::MAX`.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::Individual;

/// Selection strategy for building the offspring set.
///
/// # Examples
///
/// ```
/// use u_timetable::ga::Selection;
///
/// let sel = Selection::default();
/// assert_eq!(sel, Selection::Tournament(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Pick `k` individuals uniformly with replacement, keep the fittest.
    ///
    /// Ties keep the earliest drawn contender.
    Tournament(usize),

    /// Linear ranking: the best of `n` gets weight `n`, the worst weight 1.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects one index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng + ?Sized>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Rank => rank(population, rng),
        }
    }

    /// Selects `count` indices, one independent draw each.
    pub fn select_many<I: Individual, R: Rng + ?Sized>(
        &self,
        population: &[I],
        count: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        (0..count).map(|_| self.select(population, rng)).collect()
    }
}

fn tournament<I: Individual, R: Rng + ?Sized>(population: &[I], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

fn rank<I: Individual, R: Rng + ?Sized>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    // Stable sort keeps population order among equal fitness.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| population[i].fitness());

    let total = (n as u64) * (n as u64 + 1) / 2;
    let threshold = rng.random_range(0..total);
    let mut cumulative = 0u64;
    for (rank, &idx) in order.iter().enumerate() {
        cumulative += (n - rank) as u64;
        if cumulative > threshold {
            return idx;
        }
    }
    order[n - 1]
}
