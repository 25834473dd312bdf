//! Partitioned search across worker threads.
//!
//! The index space is split by residue: worker `id` of `W` scans every
//! `comboIndex` with `comboIndex % W == id`. Workers score against their own
//! best and report candidates to the coordinator, which keeps the global
//! best and broadcasts each strict improvement back to every worker.
//!
//! # Example
//!
//! ```
//! use fairslot_config::{SearchConfig, SearchStrategy, WorkerCount};
//! use fairslot_solver::search::PartitionedSearch;
//!
//! let config = SearchConfig {
//!     strategy: SearchStrategy::Partitioned,
//!     worker_count: WorkerCount::Count(4),
//!     ..SearchConfig::default()
//! };
//! let phase = PartitionedSearch::from_config(&config);
//! assert_eq!(phase.worker_count(), 4);
//! ```

mod message;
mod worker;

use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{unbounded, Sender};
use tracing::{debug, info};

use fairslot_config::SearchConfig;
use fairslot_core::Result;

use self::message::{CoordinatorMessage, WorkerMessage};
use self::worker::SearchWorker;
use super::{Offer, SearchPhase, SearchScope};

/// Strided search over a fixed pool of scoped threads.
#[derive(Debug, Clone)]
pub struct PartitionedSearch {
    worker_count: usize,
    sync_interval: Duration,
}

impl PartitionedSearch {
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
            sync_interval: Duration::from_secs(5),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.worker_count.resolve()).with_sync_interval(config.sync_interval())
    }

    /// How often each worker reports its progress.
    pub fn with_sync_interval(mut self, sync_interval: Duration) -> Self {
        self.sync_interval = sync_interval;
        self
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}

impl SearchPhase for PartitionedSearch {
    fn search(&mut self, scope: &mut SearchScope<'_>) -> Result<()> {
        let problem = scope.problem();
        let start = scope.start_index();
        let remaining = problem.total_combinations() - start;
        let initial_best = scope.best_score();
        let progress_interval = scope.progress_interval();
        let worker_count = self.worker_count;

        let (results_tx, results) = unbounded::<WorkerMessage>();
        let mut inboxes: Vec<Sender<CoordinatorMessage>> = Vec::with_capacity(worker_count);
        let mut evaluated = vec![0u64; worker_count];
        let started = Instant::now();
        let mut last_report = started;

        thread::scope(|s| {
            for id in 0..worker_count {
                let (inbox_tx, inbox) = unbounded();
                let worker = SearchWorker::new(
                    id,
                    worker_count,
                    problem,
                    start,
                    initial_best,
                    self.sync_interval,
                    results_tx.clone(),
                    inbox,
                );
                let spawned = thread::Builder::new()
                    .name(format!("fairslot-worker-{id}"))
                    .spawn_scoped(s, move || worker.run());
                match spawned {
                    Ok(_) => inboxes.push(inbox_tx),
                    Err(err) => scope.record_failure(id, format!("spawn failed: {err}")),
                }
            }
            // the loop below ends once every worker has dropped its sender
            drop(results_tx);

            for message in results.iter() {
                match message {
                    WorkerMessage::Better {
                        combo_index,
                        indices,
                        score,
                        ..
                    } => {
                        if scope.offer(combo_index, &indices, score) == Offer::Improved {
                            for inbox in &inboxes {
                                let _ = inbox.send(CoordinatorMessage::UpdateBestScore(score));
                            }
                        }
                    }
                    WorkerMessage::Progress {
                        worker_id,
                        evaluated: count,
                    } => {
                        evaluated[worker_id] = count;
                    }
                    WorkerMessage::Complete {
                        worker_id,
                        evaluated: count,
                    } => {
                        evaluated[worker_id] = count;
                        debug!(event = "worker_complete", worker_id = worker_id, evaluated = count);
                    }
                    WorkerMessage::Failed { worker_id, message } => {
                        scope.record_failure(worker_id, message);
                    }
                }

                if last_report.elapsed() >= progress_interval {
                    last_report = Instant::now();
                    let done: u64 = evaluated.iter().sum();
                    info!(
                        event = "progress",
                        evaluated = done,
                        total = remaining,
                        workers = worker_count,
                        speed = (done as f64 / started.elapsed().as_secs_f64()) as u64,
                        score = scope.best_score(),
                    );
                }
            }
        });

        scope.stats_mut().record_combos(evaluated.iter().sum());
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "Partitioned"
    }
}
