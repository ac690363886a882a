//! Progress reporting and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::report::AllocationReport;

/// Error type observers may return. It is logged and discarded.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Snapshot passed to the observer once per generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Zero-based generation index.
    pub generation: usize,
    /// Allocation table of the balanced individual of this generation.
    pub allocation: AllocationReport,
    /// Makespan of that individual (hours).
    pub makespan: f64,
    /// Total cost of that individual.
    pub total_cost: f64,
}

/// Receives one report per completed generation.
///
/// Called synchronously on the thread running the engine. Errors and
/// panics are caught by the engine; they never abort the run.
///
/// Any `FnMut(&GenerationReport) -> Result<(), ObserverError>` closure
/// is an observer.
pub trait ProgressObserver {
    /// Handles one generation report.
    fn on_generation(&mut self, report: &GenerationReport) -> Result<(), ObserverError>;
}

impl<F> ProgressObserver for F
where
    F: FnMut(&GenerationReport) -> Result<(), ObserverError>,
{
    fn on_generation(&mut self, report: &GenerationReport) -> Result<(), ObserverError> {
        self(report)
    }
}

/// Cooperative cancellation flag shared between the engine and callers.
///
/// Checked at the top of every generation; clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_shared_between_clones() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());

        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let token = CancellationToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        let mut observer = |r: &GenerationReport| -> Result<(), ObserverError> {
            seen.push(r.generation);
            Ok(())
        };
        let report = GenerationReport {
            generation: 3,
            allocation: AllocationReport {
                rows: Vec::new(),
                workload: Vec::new(),
                makespan: 0.0,
                total_cost: 0.0,
            },
            makespan: 0.0,
            total_cost: 0.0,
        };
        observer.on_generation(&report).unwrap();
        assert_eq!(seen, vec![3]);
    }
}
