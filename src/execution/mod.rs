//! Parallel column derivation with configurable resource limits.
//!
//! Per-row classification has no cross-row state, so the batch applier's loop
//! can run across worker threads as long as results stay aligned to the
//! original row order. This module provides:
//!
//! - Chunked, rayon-backed derivation of new per-row values
//! - Resource limits / throttling (in-flight chunk cap)
//! - Real-time metrics + observer hooks for monitoring

mod observer;
mod semaphore;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;

use crate::types::{DataSet, Value};

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver,
    StdErrExecutionObserver,
};

use semaphore::Semaphore;

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of rows per chunk.
    ///
    /// Chunking lets the engine bound working-set size and implement
    /// throttling.
    pub chunk_size: usize,
    /// Upper bound on concurrently executing chunks.
    ///
    /// This is an additional throttle on top of `num_threads`.
    pub max_in_flight_chunks: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            num_threads: Some(n),
            chunk_size: 4_096,
            max_in_flight_chunks: n.max(1),
        }
    }
}

/// A configurable engine for deriving new columns from a [`DataSet`] in
/// parallel.
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size == 0`, `max_in_flight_chunks == 0`, or
    /// `num_threads == Some(0)`.
    pub fn new(opts: ExecutionOptions) -> Self {
        assert!(opts.chunk_size > 0, "chunk_size must be > 0");
        assert!(
            opts.max_in_flight_chunks > 0,
            "max_in_flight_chunks must be > 0"
        );
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()
            .expect("failed to build rayon thread pool");

        Self {
            pool,
            opts: opts.clone(),
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        }
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run `deriver` over every row in parallel, returning one derived value
    /// list per row, aligned to the input row order.
    ///
    /// The deriver sees each row as a slice and produces the NEW values only
    /// (e.g. the two classification columns); it does not rebuild the row.
    /// The first error aborts the run and is returned; chunks already in
    /// flight finish but their output is discarded.
    pub fn derive_parallel<F, E>(&self, dataset: &DataSet, deriver: F) -> Result<Vec<Vec<Value>>, E>
    where
        F: Fn(&[Value]) -> Result<Vec<Value>, E> + Send + Sync,
        E: Send,
    {
        self.pool.install(|| self.derive_parallel_impl(dataset, &deriver))
    }

    fn derive_parallel_impl<E: Send>(
        &self,
        dataset: &DataSet,
        deriver: &(dyn Fn(&[Value]) -> Result<Vec<Value>, E> + Send + Sync),
    ) -> Result<Vec<Vec<Value>>, E> {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted);

        let sem = Semaphore::new(self.opts.max_in_flight_chunks);
        let chunk_ranges = chunk_ranges(dataset.row_count(), self.opts.chunk_size);

        let per_chunk: Result<Vec<Vec<Vec<Value>>>, E> = chunk_ranges
            .into_par_iter()
            .map(|range| {
                let waited = sem.acquire();
                if waited > Duration::ZERO {
                    self.metrics.on_throttle_wait(waited);
                    self.emit(ExecutionEvent::ThrottleWaited { duration: waited });
                }

                self.metrics.on_chunk_start();
                self.emit(ExecutionEvent::ChunkStarted {
                    start_row: range.start,
                    row_count: range.end - range.start,
                });

                let mut out = Vec::with_capacity(range.end - range.start);
                let mut result = Ok(());
                for row in &dataset.rows[range] {
                    self.metrics.on_row_processed();
                    match deriver(row.as_slice()) {
                        Ok(derived) => out.push(derived),
                        Err(e) => {
                            result = Err(e);
                            break;
                        }
                    }
                }

                self.emit(ExecutionEvent::ChunkFinished {
                    derived_rows: out.len(),
                });
                self.metrics.on_chunk_end();
                sem.release();
                result.map(|()| out)
            })
            .collect();

        let out = per_chunk.map(|chunks| chunks.into_iter().flatten().collect::<Vec<_>>());

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });

        out
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

fn chunk_ranges(row_count: usize, chunk_size: usize) -> Vec<std::ops::Range<usize>> {
    if row_count == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(row_count.div_ceil(chunk_size));
    let mut start = 0usize;
    while start < row_count {
        let end = (start + chunk_size).min(row_count);
        out.push(start..end);
        start = end;
    }
    out
}
