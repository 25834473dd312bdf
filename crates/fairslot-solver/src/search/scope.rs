//! Shared state of a search run.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

use fairslot_config::SearchConfig;
use fairslot_core::{ComboIndex, Result};

use super::{BestCombo, SearchResult, WorkerFailure};
use crate::problem::PreparedProblem;
use crate::stats::SearchStats;

/// What happened to a candidate offered to the scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Strictly better than the best; it is the new best.
    Improved,
    /// Equal to the best; the earlier combination is kept.
    Tied,
    Rejected,
}

/// Best combination, statistics and failures of one run.
pub struct SearchScope<'a> {
    problem: &'a PreparedProblem,
    start_index: ComboIndex,
    progress_interval: Duration,
    sync_interval: Duration,
    best: Option<BestCombo>,
    stats: SearchStats,
    failures: Vec<WorkerFailure>,
    improvements: Option<UnboundedSender<BestCombo>>,
}

impl<'a> SearchScope<'a> {
    /// Resolves the resume and seed positions of `config`.
    ///
    /// A seed combination is scored in full and becomes the initial best.
    pub fn new(
        problem: &'a PreparedProblem,
        config: &SearchConfig,
        improvements: Option<UnboundedSender<BestCombo>>,
    ) -> Result<Self> {
        let codec = problem.codec();
        let start_index = match &config.start {
            Some(position) => codec.resolve(position)?,
            None => 0,
        };
        let best = match &config.best {
            Some(position) => {
                let combo_index = codec.resolve(position)?;
                let indices = codec.indices_from_combo_index(combo_index)?;
                let score = problem.full_score(&indices);
                Some(BestCombo {
                    combo_index,
                    indices,
                    score,
                })
            }
            None => None,
        };

        Ok(Self {
            problem,
            start_index,
            progress_interval: config.progress_interval(),
            sync_interval: config.sync_interval(),
            best,
            stats: SearchStats::default(),
            failures: Vec::new(),
            improvements,
        })
    }

    pub fn problem(&self) -> &'a PreparedProblem {
        self.problem
    }

    pub fn start_index(&self) -> ComboIndex {
        self.start_index
    }

    pub fn progress_interval(&self) -> Duration {
        self.progress_interval
    }

    pub fn sync_interval(&self) -> Duration {
        self.sync_interval
    }

    pub fn best(&self) -> Option<&BestCombo> {
        self.best.as_ref()
    }

    /// The best score so far, or `+∞` before the first candidate.
    pub fn best_score(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |b| b.score)
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    pub fn failures(&self) -> &[WorkerFailure] {
        &self.failures
    }

    pub(crate) fn start(&mut self) {
        self.stats.start();
    }

    /// Offers a fully scored candidate.
    pub fn offer(&mut self, combo_index: ComboIndex, indices: &[usize], score: f64) -> Offer {
        let best_score = self.best_score();
        if score < best_score {
            let best = BestCombo {
                combo_index,
                indices: indices.to_vec(),
                score,
            };
            self.stats.record_improvement();
            info!(
                event = "best_improved",
                combo_index = combo_index,
                combo = ?indices,
                score = score,
            );
            if let Some(sender) = &self.improvements {
                let _ = sender.send(best.clone());
            }
            self.best = Some(best);
            Offer::Improved
        } else if score == best_score {
            self.stats.record_tie();
            debug!(
                event = "best_tied",
                combo_index = combo_index,
                combo = ?indices,
                score = score,
            );
            Offer::Tied
        } else {
            Offer::Rejected
        }
    }

    /// Records a worker that stopped early.
    pub fn record_failure(&mut self, worker_id: usize, message: String) {
        error!(
            event = "worker_failed",
            worker_id = worker_id,
            message = %message,
        );
        self.failures.push(WorkerFailure { worker_id, message });
    }

    pub(crate) fn finish(mut self) -> SearchResult {
        self.stats.finish();
        self.failures.sort_by_key(|f| f.worker_id);
        SearchResult {
            best: self.best,
            stats: self.stats,
            start_index: self.start_index,
            total_combinations: self.problem.total_combinations(),
            failures: self.failures,
        }
    }
}

impl std::fmt::Debug for SearchScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchScope")
            .field("start_index", &self.start_index)
            .field("best", &self.best)
            .field("stats", &self.stats)
            .field("failures", &self.failures)
            .finish()
    }
}
