use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::params::Operation;

/// Execution events emitted by the engine.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted {
        operation: Operation,
        input_records: usize,
    },
    RunFinished {
        operation: Operation,
        output_records: usize,
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
    RunFailed {
        operation: String,
        error: String,
    },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// A simple stderr logger for execution events.
#[derive(Default)]
pub struct StdErrExecutionObserver;

impl ExecutionObserver for StdErrExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        eprintln!("{event:?}");
    }
}

/// Forwards execution events to `tracing`.
///
/// Finished runs log at `INFO`, failures at `WARN`, starts at `DEBUG`.
#[derive(Default)]
pub struct TracingExecutionObserver;

impl ExecutionObserver for TracingExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunStarted {
                operation,
                input_records,
            } => tracing::debug!(%operation, input_records, "run started"),
            ExecutionEvent::RunFinished {
                operation,
                output_records,
                elapsed,
                metrics,
            } => tracing::info!(%operation, output_records, ?elapsed, %metrics, "run finished"),
            ExecutionEvent::RunFailed { operation, error } => {
                tracing::warn!(%operation, %error, "run failed")
            }
        }
    }
}

/// Cumulative counters across every run of an engine.
///
/// Callers can snapshot these at any time.
pub struct ExecutionMetrics {
    runs: AtomicU64,
    failures: AtomicU64,
    records_in: AtomicU64,
    records_out: AtomicU64,
    last_elapsed_ns: AtomicU64,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self {
            runs: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            records_in: AtomicU64::new(0),
            records_out: AtomicU64::new(0),
            last_elapsed_ns: AtomicU64::new(0),
        }
    }

    pub fn begin_run(&self, input_records: usize) {
        let _ = self.runs.fetch_add(1, Ordering::SeqCst);
        let _ = self.records_in.fetch_add(input_records as u64, Ordering::SeqCst);
    }

    pub fn end_run(&self, output_records: usize, elapsed: Duration) {
        let _ = self.records_out.fetch_add(output_records as u64, Ordering::SeqCst);
        self.store_elapsed(elapsed);
    }

    pub fn fail_run(&self, elapsed: Duration) {
        let _ = self.failures.fetch_add(1, Ordering::SeqCst);
        self.store_elapsed(elapsed);
    }

    fn store_elapsed(&self, elapsed: Duration) {
        self.last_elapsed_ns
            .store(elapsed.as_nanos().min(u64::MAX as u128) as u64, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let runs = self.runs.load(Ordering::SeqCst);
        let last_elapsed = if runs > 0 {
            Some(Duration::from_nanos(self.last_elapsed_ns.load(Ordering::SeqCst)))
        } else {
            None
        };

        ExecutionMetricsSnapshot {
            runs,
            failures: self.failures.load(Ordering::SeqCst),
            records_in: self.records_in.load(Ordering::SeqCst),
            records_out: self.records_out.load(Ordering::SeqCst),
            last_elapsed,
        }
    }
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub runs: u64,
    pub failures: u64,
    pub records_in: u64,
    pub records_out: u64,
    pub last_elapsed: Option<Duration>,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "runs={}, failures={}, records_in={}, records_out={}, last_elapsed={:?}",
            self.runs, self.failures, self.records_in, self.records_out, self.last_elapsed
        )
    }
}
