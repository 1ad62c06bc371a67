//! Per-chunk search loop.
//!
//! A [`ChunkWorker`] is built once per run and shared read-only across the
//! pool. Chunk processing is a tight CPU loop with no I/O: decode the index,
//! run the chain, score, keep what crosses the threshold.

use crate::enumerate::MixedRadix;
use crate::pipeline::executor::Executor;
use crate::score;
use crate::types::{ChunkResult, Hit, Payload, Task};

/// Immutable worker state: everything a chunk needs.
pub struct ChunkWorker {
    executor: Executor,
    space: MixedRadix,
    start: Payload,
    threshold: f64,
}

impl ChunkWorker {
    pub fn new(executor: Executor, space: MixedRadix, start: Payload, threshold: f64) -> Self {
        Self { executor, space, start, threshold }
    }

    /// Processes every index in `[task.lo, task.hi)`.
    ///
    /// Hits come back in ascending index order; the digit buffer is reused
    /// across the whole chunk.
    pub fn process_chunk(&self, task: Task) -> ChunkResult {
        let mut digits = Vec::with_capacity(self.space.len());
        let mut hits = Vec::new();

        for index in task.lo..task.hi {
            self.space.decode_into(index, &mut digits);
            let Some((payload, metadata)) = self.executor.run(&self.start, &digits) else {
                continue;
            };
            let score = score::score(payload.as_bytes());
            if score >= self.threshold {
                hits.push(Hit { score, index, metadata });
            }
        }

        ChunkResult::ok(task.seq, hits, task.hi - task.lo)
    }
}
