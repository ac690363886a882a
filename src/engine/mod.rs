//! Evolution engine.
//!
//! Drives the generational search and exposes its configuration,
//! progress reporting and history.
//!
//! # Lifecycle
//!
//! | State | Action |
//! |-------|--------|
//! | Init | validate config and catalog, build the worker pool |
//! | Evaluate initial | random population, parallel evaluation |
//! | Generation ×G | select → vary → evaluate → replace → record → report |
//! | Terminate | after G generations or on cancellation |
//! | Extract | representatives, archive, history |
//!
//! Cancellation is checked at the top of every generation; a cancelled
//! run still returns the best of the last completed generation.

mod config;
mod evolution;
mod history;
mod progress;

pub use config::EngineConfig;
pub use evolution::{EvolutionEngine, EvolutionResult};
pub use history::{GenerationRecord, GenerationStats};
pub use progress::{CancellationToken, GenerationReport, ObserverError, ProgressObserver};
