//! Parallel chunk dispatch.
//!
//! Bridges the sequential task channel into rayon's work-stealing pool:
//! one consumer thread drives `par_bridge()`, each chunk is processed by
//! whichever pool thread steals it, and results flow back over the result
//! channel. A chunk that panics is converted into a failed result so the
//! run keeps going.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use flume::{Receiver, Sender};
use rayon::iter::{ParallelBridge, ParallelIterator};

use crate::types::{ChunkResult, Task};

use super::worker::ChunkWorker;

/// Processes one chunk, converting a worker panic into a failed result.
pub fn run_guarded(worker: &ChunkWorker, task: Task) -> ChunkResult {
    catch_unwind(AssertUnwindSafe(|| worker.process_chunk(task))).unwrap_or_else(|_| {
        tracing::warn!(chunk_lo = task.lo, chunk_hi = task.hi, "chunk worker panicked");
        ChunkResult::failed(task.seq, task.hi - task.lo)
    })
}

/// Fans tasks out over the shared worker until the task channel closes.
pub struct Dispatcher {
    worker: Arc<ChunkWorker>,
}

impl Dispatcher {
    #[inline]
    pub fn new(worker: Arc<ChunkWorker>) -> Self {
        Self { worker }
    }

    /// Consumes tasks and emits one result per task.
    ///
    /// Send failures mean the collector has shut down, which only happens
    /// on teardown; they are ignored like any normal channel close.
    pub fn process(&self, tasks: &Receiver<Task>, results: Sender<ChunkResult>) {
        tasks.iter().par_bridge().for_each(|task| {
            let result = run_guarded(&self.worker, task);
            let _ = results.send(result);
        });
    }
}
