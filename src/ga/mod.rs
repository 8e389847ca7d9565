//! Genetic search over timetable candidates.
//!
//! A candidate is a fixed-length list of sessions drawn from shared slot
//! pools. The engine evolves a population of candidates under a conflict
//! score and returns the best one seen.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, limits)
//! - [`Operators`]: Fitness, crossover and mutation functions
//! - [`Selection`]: Tournament or rank selection, set in [`GaConfig`]
//! - [`EvolutionEngine`]: Executes the evolutionary loop
//! - [`EvolutionResult`]: Best candidate with run statistics
//!
//! # Submodules
//!
//! - [`fitness`]: Conflict scoring
//! - [`operators`]: Two-point crossover and reassignment mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod fitness;
pub mod operators;
mod runner;
mod selection;
mod session;
mod types;

pub use config::GaConfig;
pub use fitness::fitness_function;
pub use operators::Operators;
pub use runner::{EvolutionEngine, EvolutionResult};
pub use selection::Selection;
pub use session::{initialize_session, initialize_sessions};
pub use types::{Candidate, Individual, Session, TimeUnit};
