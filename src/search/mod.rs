//! Parallel search orchestration.
//!
//! The orchestrator owns the run: it shards the parameter index space into
//! fixed-size chunks, dispatches them, merges every chunk's hits, and ranks
//! the result. With `workers == 1` chunks run sequentially in-process; with
//! more, a bounded task channel feeds a dedicated rayon pool and results
//! come back over a result channel. Workers share the run state read-only
//! and never touch the terminal; progress lines are emitted here, from the
//! collecting side, as chunks complete.
//!
//! There is no early exit at `max_hits`: ranking is global, and a later
//! chunk may outrank everything found so far.

pub mod dispatch;
pub mod worker;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, ensure};
use flume::bounded;

use crate::dictionary::Dictionary;
use crate::enumerate::MixedRadix;
use crate::pipeline::executor::Executor;
use crate::pipeline::{Pipeline, space_size};
use crate::stage::bifid::Alphabet;
use crate::types::{ChunkResult, Hit, Payload, Task};

use self::dispatch::{Dispatcher, run_guarded};
use self::worker::ChunkWorker;

/// A fully specified run.
pub struct Search {
    pub pipeline: Pipeline,
    pub ciphertext: String,
    pub dictionary: Arc<Dictionary>,
    pub bifid_alphabet: Alphabet,
    pub threshold: f64,
    pub max_hits: usize,
    pub workers: usize,
    pub chunk_size: u64,
    pub progress_every: usize,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct Report {
    /// Hits ranked by descending score (ties broken by ascending index),
    /// truncated to `max_hits`.
    pub hits: Vec<Hit>,

    /// Total indices attempted across all chunks.
    pub attempts: u64,

    /// Hits found before truncation.
    pub hits_found: usize,

    /// Chunks that panicked and yielded no hits.
    pub failed_chunks: usize,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// The chunk plan: contiguous `[lo, hi)` tasks covering `[0, total)`
/// exactly once, in index order.
pub fn chunk_plan(total: u64, chunk_size: u64) -> impl Iterator<Item = Task> {
    let mut lo = 0;
    let mut seq = 0;
    std::iter::from_fn(move || {
        if lo >= total {
            return None;
        }
        let hi = lo.saturating_add(chunk_size).min(total);
        let task = Task { lo, hi, seq };
        lo = hi;
        seq += 1;
        Some(task)
    })
}

/// Incremental merge of chunk results plus progress accounting.
struct Collector {
    hits: Vec<Hit>,
    attempts: u64,
    hits_found: usize,
    failed_chunks: usize,
    done: usize,
    task_count: usize,
    progress_every: usize,
    started: Instant,
}

impl Collector {
    fn new(task_count: usize, progress_every: usize, started: Instant) -> Self {
        Self {
            hits: Vec::new(),
            attempts: 0,
            hits_found: 0,
            failed_chunks: 0,
            done: 0,
            task_count,
            progress_every,
            started,
        }
    }

    fn absorb(&mut self, result: ChunkResult) {
        self.done += 1;
        self.attempts += result.attempts;
        self.hits_found += result.hits.len();
        if result.failed {
            self.failed_chunks += 1;
        }
        self.hits.extend(result.hits);

        if self.progress_every > 0 && self.done % self.progress_every == 0 {
            let rate = self.attempts as f64 / self.started.elapsed().as_secs_f64().max(1e-9);
            println!(
                "[progress] tasks={}/{} attempts={} hits={} rate={:.0}/s",
                self.done, self.task_count, self.attempts, self.hits_found, rate
            );
        }
    }
}

impl Search {
    /// Runs the search to completion and returns the ranked report.
    ///
    /// # Errors
    ///
    /// Configuration errors (empty dictionary for a keyed pipeline,
    /// parameter-space overflow, zero chunk size) abort before any chunk is
    /// dispatched. Worker panics do not: their chunks are counted in
    /// [`Report::failed_chunks`] and the run completes.
    pub fn run(&self) -> Result<Report> {
        ensure!(self.chunk_size >= 1, "chunk_size must be at least 1");

        let radix = self.pipeline.radix_vector(self.dictionary.len())?;
        let total = space_size(&radix)?;
        let task_count = usize::try_from(total.div_ceil(self.chunk_size)).unwrap_or(usize::MAX);

        let worker = Arc::new(ChunkWorker::new(
            Executor::new(self.pipeline.clone(), Arc::clone(&self.dictionary), self.bifid_alphabet),
            MixedRadix::new(radix),
            Payload::Text(self.ciphertext.clone()),
            self.threshold,
        ));

        let started = Instant::now();
        let mut collector = Collector::new(task_count, self.progress_every, started);

        if self.workers <= 1 {
            for task in chunk_plan(total, self.chunk_size) {
                let result = run_guarded(&worker, task);
                collector.absorb(result);
            }
        } else {
            self.run_parallel(&worker, total, &mut collector)?;
        }

        let Collector { mut hits, attempts, hits_found, failed_chunks, .. } = collector;
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
        hits.truncate(self.max_hits);

        Ok(Report { hits, attempts, hits_found, failed_chunks, elapsed: started.elapsed() })
    }

    /// Fans chunks out over a dedicated pool of `workers` threads.
    ///
    /// Bounded channels cap the number of in-flight chunks, so peak memory
    /// stays proportional to the worker count.
    fn run_parallel(&self, worker: &Arc<ChunkWorker>, total: u64, collector: &mut Collector) -> Result<()> {
        let channel_size = self.workers * 2;
        let (task_tx, task_rx) = bounded(channel_size);
        let (result_tx, result_rx) = bounded(channel_size);

        let chunk_size = self.chunk_size;
        let producer = thread::spawn(move || {
            for task in chunk_plan(total, chunk_size) {
                // A send failure means the dispatcher is gone; stop quietly.
                if task_tx.send(task).is_err() {
                    break;
                }
            }
        });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .context("failed to build worker pool")?;
        let dispatcher = Dispatcher::new(Arc::clone(worker));
        let dispatch = thread::spawn(move || pool.install(|| dispatcher.process(&task_rx, result_tx)));

        // Collect until the dispatcher drops its result sender.
        for result in result_rx.iter() {
            collector.absorb(result);
        }

        producer.join().map_err(|_| anyhow!("task producer thread panicked"))?;
        dispatch.join().map_err(|_| anyhow!("dispatch thread panicked"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;

    fn caesar_search(workers: usize, chunk_size: u64) -> Search {
        Search {
            pipeline: Pipeline::parse("caesar").unwrap(),
            ciphertext: "KHOOR ZRUOG".to_owned(),
            dictionary: Arc::new(Dictionary::empty()),
            bifid_alphabet: Alphabet::Standard,
            threshold: 1.7,
            max_hits: 50,
            workers,
            chunk_size,
            progress_every: 1000,
        }
    }

    #[test]
    fn test_chunk_plan_covers_space_without_overlap() {
        for (total, chunk_size) in [(100u64, 7u64), (100, 100), (100, 1000), (1, 1), (0, 10)] {
            let tasks: Vec<Task> = chunk_plan(total, chunk_size).collect();
            let mut covered = 0;
            for (i, task) in tasks.iter().enumerate() {
                assert_eq!(task.seq, i);
                assert_eq!(task.lo, covered, "gap or overlap at task {i}");
                assert!(task.hi > task.lo);
                assert!(task.hi - task.lo <= chunk_size);
                covered = task.hi;
            }
            assert_eq!(covered, total);
        }
    }

    #[test]
    fn test_oversized_chunk_yields_one_task() {
        let tasks: Vec<Task> = chunk_plan(26, 10_000).collect();
        assert_eq!(tasks.len(), 1);
        assert_eq!((tasks[0].lo, tasks[0].hi), (0, 26));
    }

    #[test]
    fn test_sequential_run_finds_shift() {
        let report = caesar_search(1, 10).run().unwrap();
        assert_eq!(report.attempts, 26);
        assert_eq!(report.failed_chunks, 0);
        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.hits[0].index, 3);
    }

    #[test]
    fn test_determinism_across_worker_counts() {
        let mut search = caesar_search(1, 5);
        search.threshold = 0.0; // record all 26 outputs
        let sequential = search.run().unwrap();

        let mut search = caesar_search(4, 5);
        search.threshold = 0.0;
        let parallel = search.run().unwrap();

        let fmt = |report: &Report| {
            report
                .hits
                .iter()
                .map(|h| format!("{:.6} {} {}", h.score, h.index, h.metadata))
                .collect::<Vec<_>>()
        };
        assert_eq!(fmt(&sequential), fmt(&parallel));
        assert_eq!(sequential.attempts, parallel.attempts);
    }

    #[test]
    fn test_max_hits_zero_still_counts() {
        let mut search = caesar_search(1, 10);
        search.max_hits = 0;
        let report = search.run().unwrap();
        assert!(report.hits.is_empty());
        assert_eq!(report.hits_found, 1);
        assert_eq!(report.attempts, 26);
    }

    #[test]
    fn test_axis_free_pipeline_runs_once() {
        let search = Search {
            pipeline: Pipeline::parse("reverse").unwrap(),
            ciphertext: "DLROW OLLEH".to_owned(),
            ..caesar_search(1, 10_000)
        };
        let report = search.run().unwrap();
        assert_eq!(report.attempts, 1);
        assert_eq!(report.hits.len(), 1);
        assert!(report.hits[0].metadata.entries().is_empty());
    }

    #[test]
    fn test_empty_ciphertext_yields_no_hits() {
        let search = Search { ciphertext: String::new(), ..caesar_search(1, 10) };
        let report = search.run().unwrap();
        assert_eq!(report.attempts, 26);
        assert_eq!(report.hits_found, 0);
    }

    #[test]
    fn test_keyed_pipeline_with_empty_dictionary_errors() {
        let search = Search {
            pipeline: Pipeline::parse("caesar>xor").unwrap(),
            ..caesar_search(1, 10)
        };
        assert!(search.run().is_err());
    }
}
