//! Evolutionary loop execution.
//!
//! [`EvolutionEngine`] runs the full search:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::config::GaConfig;
use super::operators::{EvaluateFn, Operators};
use super::session::initialize_sessions;
use super::types::{Candidate, Individual};
use crate::error::{GenerateError, Result};
use crate::models::SubjectCatalog;
use crate::random::rng_from;
use crate::slots::SlotPools;

/// Result of one search.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionResult {
    /// Best candidate of the final population, or of the whole run when
    /// [`GaConfig::keep_best_ever`] is set.
    pub best: Candidate,

    /// Fitness of `best`.
    pub best_fitness: u32,

    /// Generations executed.
    pub generations: usize,

    /// Whether the run stopped on the no-progress limit.
    pub stagnated: bool,

    /// Best fitness of the population: initial population first, then one
    /// entry per generation.
    pub fitness_history: Vec<u32>,
}

/// Runs the genetic search over a subject catalog and shared slot pools.
///
/// The pools are drained by population construction and by mutation; they
/// are never refilled during a run.
///
/// # Usage
///
/// ```
/// use u_timetable::ga::{EvolutionEngine, GaConfig, Operators};
/// use u_timetable::models::{DepartmentId, SlotId, Subject, SubjectCatalog, SubjectId};
/// use u_timetable::slots::SlotPools;
///
/// let catalog = SubjectCatalog::new(vec![
///     Subject::new(SubjectId(1), "Logic", "PHIL101", DepartmentId(1)).with_hours(2),
/// ]);
/// let mut pools = SlotPools::new(vec![], (1..=6).map(SlotId).collect());
/// let config = GaConfig::default()
///     .with_population_size(4)
///     .with_sessions_per_candidate(2)
///     .with_generations(5)
///     .with_seed(42);
///
/// let engine = EvolutionEngine::new(config, Operators::default());
/// let result = engine.run(&catalog, &mut pools).unwrap();
/// assert!(result.generations <= 5);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    config: GaConfig,
    operators: Operators,
}

impl EvolutionEngine {
    pub fn new(config: GaConfig, operators: Operators) -> Self {
        Self { config, operators }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn operators(&self) -> &Operators {
        &self.operators
    }

    /// Runs the search with an RNG built from the configured seed.
    pub fn run(&self, catalog: &SubjectCatalog, pools: &mut SlotPools) -> Result<EvolutionResult> {
        let mut rng = rng_from(self.config.seed);
        self.run_with_rng(catalog, pools, &mut rng)
    }

    /// Runs the search with an injected random source.
    ///
    /// # Errors
    /// - [`GenerateError::Config`] if the configuration is invalid
    /// - [`GenerateError::Precondition`] if no subject has a class type or
    ///   the population comes out empty
    pub fn run_with_rng<R: Rng>(
        &self,
        catalog: &SubjectCatalog,
        pools: &mut SlotPools,
        rng: &mut R,
    ) -> Result<EvolutionResult> {
        let config = &self.config;
        config.validate()?;
        let crossover_rate = config.crossover_rate.clamp(0.0, 1.0);
        let mutation_rate = config.mutation_rate.clamp(0.0, 1.0);

        // 1. Initialize population from the shared pools
        let mut population = Vec::with_capacity(config.population_size);
        for _ in 0..config.population_size {
            let sessions = initialize_sessions(catalog, pools, config.sessions_per_candidate, rng)?;
            population.push(Candidate::new(sessions));
        }

        // 2. Evaluate
        evaluate_population(&mut population, self.operators.evaluate, catalog, config.parallel);

        if population.is_empty() {
            return Err(GenerateError::precondition("Population initialization failed."));
        }

        // 3. Optional best-ever copy, seeded from the initial population
        let mut elite = if config.keep_best_ever {
            find_best(&population).cloned()
        } else {
            None
        };
        let mut fitness_history = Vec::with_capacity(config.generations + 1);
        fitness_history.push(best_fitness_of(&population));

        // The first generation sets the no-progress baseline.
        let mut baseline: Option<u32> = None;
        let mut no_progress = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;

        // 4. Evolutionary loop
        for gen in 0..config.generations {
            let n = population.len();
            let mut offspring: Vec<Candidate> = config
                .selection
                .select_many(&population, n, rng)
                .into_iter()
                .map(|i| population[i].clone())
                .collect();

            for pair in offspring.chunks_exact_mut(2) {
                if rng.random_bool(crossover_rate) {
                    let (a, b) = pair.split_at_mut(1);
                    (self.operators.crossover)(&mut a[0], &mut b[0], rng);
                }
            }

            for child in offspring.iter_mut() {
                if rng.random_bool(mutation_rate) {
                    (self.operators.mutate)(child, catalog, pools, rng);
                }
            }

            evaluate_population(&mut offspring, self.operators.evaluate, catalog, config.parallel);
            population = offspring;
            generations = gen + 1;

            let gen_best = best_fitness_of(&population);
            fitness_history.push(gen_best);
            if let (Some(elite), Some(candidate)) = (elite.as_mut(), find_best(&population)) {
                if candidate.fitness() < elite.fitness() {
                    *elite = candidate.clone();
                }
            }

            match baseline {
                Some(b) if gen_best >= b => no_progress += 1,
                _ => {
                    baseline = Some(gen_best);
                    no_progress = 0;
                }
            }
            debug!(generation = generations, best = gen_best, "Generation complete");

            if config.max_no_progress > 0 && no_progress >= config.max_no_progress {
                warn!(
                    generations,
                    limit = config.max_no_progress,
                    "No improvement, terminating early"
                );
                stagnated = true;
                break;
            }
        }

        // 5. Terminal selection
        let best = match elite {
            Some(elite) => elite,
            None => find_best(&population)
                .ok_or_else(|| GenerateError::precondition("Population initialization failed."))?
                .clone(),
        };
        Ok(finish(best, generations, stagnated, fitness_history))
    }
}

fn finish(
    best: Candidate,
    generations: usize,
    stagnated: bool,
    fitness_history: Vec<u32>,
) -> EvolutionResult {
    let best_fitness = best.fitness();
    info!(best_fitness, generations, stagnated, "Search finished");
    EvolutionResult {
        best,
        best_fitness,
        generations,
        stagnated,
        fitness_history,
    }
}

fn best_fitness_of(population: &[Candidate]) -> u32 {
    find_best(population).map_or(u32::MAX, |c| c.fitness())
}

/// Evaluates every candidate without a cached fitness.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn evaluate_population(
    population: &mut [Candidate],
    evaluate: EvaluateFn,
    catalog: &SubjectCatalog,
    parallel: bool,
) {
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        population
            .par_iter_mut()
            .filter(|c| !c.is_evaluated())
            .for_each(|c| {
                let f = evaluate(c, catalog);
                c.set_fitness(f);
            });
        return;
    }

    for c in population.iter_mut().filter(|c| !c.is_evaluated()) {
        let f = evaluate(c, catalog);
        c.set_fitness(f);
    }
}

/// The candidate with the lowest fitness; the earliest wins ties.
fn find_best(population: &[Candidate]) -> Option<&Candidate> {
    population.iter().min_by_key(|c| c.fitness())
}
