//! End-to-end generation run.
//!
//! [`TimetableGenerator::generate`] is the single public operation:
//!
//! 1. Validate the configuration
//! 2. Clear the existing timetable (all-or-nothing)
//! 3. Load subjects; stop if none has a class type
//! 4. Split pending windows and build practical pairs
//! 5. Load slot pools, check the remaining preconditions
//! 6. Run the genetic search
//! 7. Commit the best candidate row by row
//!
//! Without practical subjects, paired slots are released to the
//! single-slot pool so theory sessions can use them.
//!
//! Every failure is folded into a [`GenerationOutcome`] with an error
//! status; nothing panics or escapes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::TimetableConfig;
use crate::error::{GenerateError, Result};
use crate::ga::{EvolutionEngine, Operators};
use crate::models::SubjectCatalog;
use crate::persist::{PersistReport, TimetablePersister};
use crate::random::rng_from;
use crate::slots::{PracticalPairBuilder, SlotPools, SplitReport, TimeSlotSplitter};
use crate::store::Store;

/// Message reported by a successful run.
pub const SUCCESS_MESSAGE: &str = "Timetable generated successfully.";

const NO_SUBJECTS: &str = "No valid subjects available.";

/// Status of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// Structured result of [`TimetableGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub status: OutcomeStatus,
    pub message: String,
}

impl GenerationOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Error,
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Detailed statistics of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Timetable rows removed before the run.
    pub cleared: usize,
    pub split: SplitReport,
    pub best_fitness: u32,
    pub generations: usize,
    pub stagnated: bool,
    pub persisted: PersistReport,
}

/// Configured entry point for timetable generation.
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    config: TimetableConfig,
}

impl TimetableGenerator {
    pub fn new(config: TimetableConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Runs a full generation against `store`.
    pub fn generate<S: Store + ?Sized>(&self, store: &mut S) -> GenerationOutcome {
        info!("Starting timetable generation");
        match self.generate_with_report(store) {
            Ok(report) => {
                info!(
                    best_fitness = report.best_fitness,
                    generations = report.generations,
                    rows = report.persisted.written,
                    "Timetable generation completed"
                );
                GenerationOutcome::success(SUCCESS_MESSAGE)
            }
            Err(e) => {
                error!(error = %e, "Timetable generation failed");
                GenerationOutcome::error(e.to_string())
            }
        }
    }

    /// Like [`generate`](Self::generate), returning the detailed report.
    pub fn generate_with_report<S: Store + ?Sized>(&self, store: &mut S) -> Result<GenerationReport> {
        let mut rng = rng_from(self.config.ga.seed);
        self.generate_with_rng(store, &mut rng)
    }

    /// Runs with an injected random source.
    pub fn generate_with_rng<S: Store + ?Sized, R: Rng>(
        &self,
        store: &mut S,
        rng: &mut R,
    ) -> Result<GenerationReport> {
        self.config.validate()?;

        let cleared = store.clear_timetable()?;
        info!(cleared, "Cleared existing timetable entries");

        let catalog = SubjectCatalog::new(store.subjects()?);
        if catalog.valid().is_empty() {
            return Err(GenerateError::precondition(NO_SUBJECTS));
        }

        let splitter = TimeSlotSplitter::new(PracticalPairBuilder::new(self.config.pairing.clone()));
        let split = splitter.split_pending(store)?;

        let mut pools = SlotPools::load(store)?;
        if catalog.practical().is_empty() {
            let released = pools.release_pairs();
            if released > 0 {
                debug!(released, "No practical subjects, paired slots released");
            }
        }
        check_preconditions(&catalog, &pools)?;

        let engine = EvolutionEngine::new(self.config.ga.clone(), Operators::standard());
        let result = engine.run_with_rng(&catalog, &mut pools, rng)?;

        let persisted = TimetablePersister::new(self.config.persist.clone())
            .commit(store, &result.best, &catalog);

        Ok(GenerationReport {
            cleared,
            split,
            best_fitness: result.best_fitness,
            generations: result.generations,
            stagnated: result.stagnated,
            persisted,
        })
    }
}

/// Generates a timetable with the default configuration.
pub fn generate_timetable<S: Store + ?Sized>(store: &mut S) -> GenerationOutcome {
    TimetableGenerator::default().generate(store)
}

fn check_preconditions(catalog: &SubjectCatalog, pools: &SlotPools) -> Result<()> {
    if catalog.valid().is_empty() {
        return Err(GenerateError::precondition(NO_SUBJECTS));
    }
    if !catalog.practical().is_empty() && !pools.has_pairs() {
        return Err(GenerateError::precondition("No practical pairs available."));
    }
    let theory_starved = !catalog.theory().is_empty() && !pools.has_slots();
    if theory_starved || (!pools.has_pairs() && !pools.has_slots()) {
        return Err(GenerateError::precondition("No time slots available."));
    }
    Ok(())
}
