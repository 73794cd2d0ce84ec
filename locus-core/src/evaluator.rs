//! Fork-join evaluation of candidates on a sized rayon pool.
//!
//! Each call builds a pool with the configured number of threads and runs
//! every task on it. A task that panics or produces NaN yields
//! `f64::INFINITY` for its candidate while the rest of the batch carries
//! on; nothing is cancelled early.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use geo::Coord;
use log::{debug, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

/// The outcome of scoring one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreResult {
    /// Candidate position.
    pub candidate: Coord<f64>,
    /// Index of the candidate in the evaluated slice.
    pub index: usize,
    /// Cost of the candidate; lower is better.
    pub score: f64,
}

/// Runs independent per-candidate tasks across a bounded set of threads.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use geo::Coord;
/// use locus_core::ParallelEvaluator;
///
/// let evaluator = ParallelEvaluator::new(NonZeroUsize::new(4).unwrap());
/// let candidates: Vec<_> = (0..10).map(|i| Coord { x: f64::from(i), y: 0.0 }).collect();
/// let best = evaluator
///     .minimum(&candidates, |_, c| (c.x - 6.0).abs())
///     .unwrap();
/// assert_eq!(best.index, 6);
/// assert_eq!(best.score, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelEvaluator {
    workers: NonZeroUsize,
}

impl Default for ParallelEvaluator {
    fn default() -> Self {
        Self::with_available_parallelism()
    }
}

impl ParallelEvaluator {
    /// Use exactly `workers` threads (fewer when there are fewer tasks).
    #[must_use]
    pub const fn new(workers: NonZeroUsize) -> Self {
        Self { workers }
    }

    /// Size the pool from [`std::thread::available_parallelism`], falling
    /// back to one thread.
    #[must_use]
    pub fn with_available_parallelism() -> Self {
        Self::new(thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    }

    /// Configured upper bound on worker threads.
    #[must_use]
    pub const fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    /// Run `task` for every index in `0..len`, returning results in index
    /// order.
    #[must_use]
    pub fn map<F>(&self, len: usize, task: F) -> Vec<f64>
    where
        F: Fn(usize) -> f64 + Sync,
    {
        self.run(len, &task)
    }

    /// Score every candidate and keep the lowest.
    ///
    /// `score` receives the candidate's index and position. Every candidate
    /// is scored before the minimum is taken, and only a strictly lower
    /// score replaces the current best. Which of several exactly equal
    /// candidates wins is not part of the contract.
    ///
    /// Returns `None` when no candidate has a finite score.
    #[must_use]
    pub fn minimum<F>(&self, candidates: &[Coord<f64>], score: F) -> Option<ScoreResult>
    where
        F: Fn(usize, Coord<f64>) -> f64 + Sync,
    {
        let task = |index: usize| {
            candidates
                .get(index)
                .map_or(f64::INFINITY, |&candidate| score(index, candidate))
        };
        let scores = self.run(candidates.len(), &task);
        candidates
            .iter()
            .zip(scores)
            .enumerate()
            .filter(|(_, (_, value))| value.is_finite())
            .fold(None, |best: Option<ScoreResult>, (index, (&candidate, value))| {
                match best {
                    Some(current) if current.score <= value => Some(current),
                    _ => Some(ScoreResult {
                        candidate,
                        index,
                        score: value,
                    }),
                }
            })
    }

    fn run<F>(&self, len: usize, task: &F) -> Vec<f64>
    where
        F: Fn(usize) -> f64 + Sync,
    {
        if len == 0 {
            return Vec::new();
        }
        let workers = self.workers.get().min(len);
        debug!("Evaluating {len} tasks on {workers} workers");
        let evaluate = || -> Vec<f64> {
            (0..len)
                .into_par_iter()
                .map(|index| guarded(task, index))
                .collect()
        };
        ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("locus-eval-{index}"))
            .build()
            .map_or_else(
                |err| {
                    warn!("Failed to build a {workers}-thread pool ({err}); using the global pool");
                    evaluate()
                },
                |pool| pool.install(evaluate),
            )
    }
}

/// Run one task, disqualifying panics and NaN results.
fn guarded<F>(task: &F, index: usize) -> f64
where
    F: Fn(usize) -> f64,
{
    match panic::catch_unwind(AssertUnwindSafe(|| task(index))) {
        Ok(value) if value.is_nan() => {
            warn!("Task {index} produced NaN; treating as +inf");
            f64::INFINITY
        }
        Ok(value) => value,
        Err(_) => {
            warn!("Task {index} panicked; treating as +inf");
            f64::INFINITY
        }
    }
}
