//! Run configuration.
//!
//! All tuning lives in one [`TimetableConfig`], loadable from TOML. Every
//! table and key is optional and falls back to its default.
//!
//! ```toml
//! max_hours_per_week = 8
//!
//! [ga]
//! population_size = 100
//! generations = 300
//! mutation_rate = 0.3
//! crossover_rate = 0.9
//! max_no_progress = 10
//! sessions_per_candidate = 40
//! keep_best_ever = false
//! selection = { tournament = 3 }
//!
//! [pairing]
//! max_pairs_per_day = 2
//! scan = "disjoint"
//!
//! [persist]
//! enforce_weekly_hours = true
//! skip_double_booked = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ga::GaConfig;
use crate::persist::PersistConfig;
use crate::slots::PairingConfig;

/// Complete configuration of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    pub ga: GaConfig,
    pub pairing: PairingConfig,
    pub persist: PersistConfig,
    /// Upper bound on a subject's weekly hours, enforced by stores.
    pub max_hours_per_week: Option<u32>,
}

impl TimetableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string. Rates are clamped to
    /// [0, 1].
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(s)?;
        config.ga = config.ga.clamped();
        config.validate()?;
        Ok(config)
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_pairing(mut self, pairing: PairingConfig) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn with_persist(mut self, persist: PersistConfig) -> Self {
        self.persist = persist;
        self
    }

    /// Sets the GA seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ga.validate()?;
        if self.max_hours_per_week == Some(0) {
            return Err(ConfigError::Invalid(
                "max_hours_per_week must be positive or unset".into(),
            ));
        }
        Ok(())
    }
}
