//! Combination search strategies.
//!
//! - [`ExhaustiveSearch`]: one thread walks the whole space in index order
//! - [`PartitionedSearch`]: worker threads each walk one residue class of
//!   the index space and share the best score through a coordinator
//!
//! Both run against a [`SearchScope`], which owns the best combination found
//! so far and the run statistics.

mod exhaustive;
mod partitioned;
mod scope;

use std::fmt::Debug;

use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use fairslot_config::{SearchConfig, SearchStrategy};
use fairslot_core::{ComboIndex, Result};

use crate::problem::PreparedProblem;
use crate::stats::SearchStats;

pub use exhaustive::ExhaustiveSearch;
pub use partitioned::PartitionedSearch;
pub use scope::{Offer, SearchScope};

/// A strategy for walking the combination space.
pub trait SearchPhase: Send + Debug {
    /// Walks the combinations from the scope's start index, offering
    /// candidates to the scope.
    fn search(&mut self, scope: &mut SearchScope<'_>) -> Result<()>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

/// A scored combination.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCombo {
    pub combo_index: ComboIndex,
    /// Option index per round.
    pub indices: Vec<usize>,
    pub score: f64,
}

/// A worker that stopped before finishing its share of the space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFailure {
    pub worker_id: usize,
    pub message: String,
}

/// Outcome of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Lowest-scoring combination, first found among equals.
    pub best: Option<BestCombo>,
    pub stats: SearchStats,
    pub start_index: ComboIndex,
    pub total_combinations: u64,
    pub failures: Vec<WorkerFailure>,
}

impl SearchResult {
    /// True if every combination from the start index was scored.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the configured strategy over `problem`.
///
/// Every strict improvement is also sent to `improvements` when given.
pub fn search(
    problem: &PreparedProblem,
    config: &SearchConfig,
    improvements: Option<UnboundedSender<BestCombo>>,
) -> Result<SearchResult> {
    let mut scope = SearchScope::new(problem, config, improvements)?;
    let mut phase: Box<dyn SearchPhase> = match config.strategy {
        SearchStrategy::Exhaustive => Box::new(ExhaustiveSearch::new()),
        SearchStrategy::Partitioned => Box::new(PartitionedSearch::from_config(config)),
    };

    info!(
        event = "search_start",
        strategy = phase.phase_type_name(),
        rounds = problem.round_count(),
        total = problem.total_combinations(),
        combo_index = scope.start_index(),
        score = scope.best_score(),
    );

    scope.start();
    phase.search(&mut scope)?;
    let result = scope.finish();

    info!(
        event = "search_end",
        strategy = phase.phase_type_name(),
        duration_ms = result.stats.elapsed().as_millis() as u64,
        evaluated = result.stats.combos_evaluated,
        speed = result.stats.combos_per_second() as u64,
        score = result.best.as_ref().map_or(f64::INFINITY, |b| b.score),
        complete = result.is_complete(),
    );
    Ok(result)
}

#[cfg(test)]
mod tests;
