//! GA configuration.
//!
//! [`GaConfig`] holds every parameter that controls the evolutionary loop.

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::error::ConfigError;

/// Configuration for the timetable search.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 300);
/// assert_eq!(config.sessions_per_candidate, 40);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_selection(Selection::Rank)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of candidates in the population.
    pub population_size: usize,

    /// Maximum number of generations.
    pub generations: usize,

    /// Selection strategy the engine builds each offspring set with.
    pub selection: Selection,

    /// Probability of crossing a consecutive offspring pair (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Consecutive generations without a strict improvement before stopping.
    ///
    /// Set to 0 to disable the early stop.
    pub max_no_progress: usize,

    /// Sessions drawn for each initial candidate.
    pub sessions_per_candidate: usize,

    /// Return the best candidate seen during the whole run, including the
    /// initial population, instead of the best of the final population.
    pub keep_best_ever: bool,

    /// Whether to evaluate candidates in parallel.
    ///
    /// Only honored when the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws the seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 300,
            selection: Selection::default(),
            crossover_rate: 0.9,
            mutation_rate: 0.3,
            max_no_progress: 10,
            sessions_per_candidate: 40,
            keep_best_ever: false,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover rate, clamped to [0, 1].
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the no-progress limit (0 to disable).
    pub fn with_max_no_progress(mut self, limit: usize) -> Self {
        self.max_no_progress = limit;
        self
    }

    pub fn with_sessions_per_candidate(mut self, n: usize) -> Self {
        self.sessions_per_candidate = n;
        self
    }

    pub fn with_keep_best_ever(mut self, keep: bool) -> Self {
        self.keep_best_ever = keep;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clamps both rates into [0, 1]. Used after deserialization.
    pub fn clamped(self) -> Self {
        let (cx, mx) = (self.crossover_rate, self.mutation_rate);
        self.with_crossover_rate(cx).with_mutation_rate(mx)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid(
                "population_size must be at least 1".into(),
            ));
        }
        if self.generations == 0 {
            return Err(ConfigError::Invalid("generations must be at least 1".into()));
        }
        if self.sessions_per_candidate == 0 {
            return Err(ConfigError::Invalid(
                "sessions_per_candidate must be at least 1".into(),
            ));
        }
        if self.selection == Selection::Tournament(0) {
            return Err(ConfigError::Invalid(
                "tournament size must be at least 1".into(),
            ));
        }
        if !self.crossover_rate.is_finite() || !self.mutation_rate.is_finite() {
            return Err(ConfigError::Invalid("rates must be finite".into()));
        }
        Ok(())
    }
}
