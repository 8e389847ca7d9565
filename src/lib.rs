//! Genetic-search timetable construction.
//!
//! Assigns subjects to time slots under hard constraints (no double-booking,
//! practical-session pairing, weekly workload caps) with a generational
//! genetic algorithm.
//!
//! # Pipeline
//!
//! 1. **`slots::splitter`**: Decomposes declared time windows into 1-hour
//!    atomic slots, idempotently.
//! 2. **`slots::pairing`**: Links chronologically adjacent atomic slots into
//!    practical pairs for double-length sessions.
//! 3. **`slots::pool`**: Exposes the unconsumed pairs and the unpaired
//!    singleton slots as mutable working sets for one run.
//! 4. **`ga`**: Session factory, fitness evaluation, crossover, mutation,
//!    tournament selection and the evolution engine.
//! 5. **`persist`**: Commits the winning candidate as timetable rows.
//! 6. **`generator`**: Orchestrates the whole run behind a single
//!    [`generate_timetable`] call returning a structured outcome.
//!
//! # Boundaries
//!
//! Entity persistence is a data-access boundary ([`store`]). The engine reads
//! subjects and slots from it and writes timetable rows to it.
//! [`store::MemoryStore`] is the bundled implementation.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

pub mod config;
pub mod error;
pub mod ga;
pub mod generator;
pub mod models;
pub mod persist;
pub mod random;
pub mod slots;
pub mod store;
pub mod validation;

pub use config::TimetableConfig;
pub use error::{ConfigError, GenerateError, StoreError};
pub use generator::{generate_timetable, GenerationOutcome, GenerationReport, OutcomeStatus, TimetableGenerator};
