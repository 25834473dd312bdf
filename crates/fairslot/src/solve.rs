//! Entry points that wire generation, preparation and search together.

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use fairslot_config::FairslotConfig;
use fairslot_core::{FairslotError, Matchup, OptionSet, Result};
use fairslot_scoring::ScoreBreakdown;
use fairslot_solver::{
    search, BestCombo, OptionRepository, PreparedProblem, RoundRobinPartitioner, SearchResult,
};

/// The best combination with its schedule and per-factor scores.
#[derive(Debug, Clone)]
pub struct ResolvedBest {
    pub combo: BestCombo,
    /// Matchups per round, in slot order.
    pub schedule: Vec<Vec<Matchup>>,
    pub breakdown: ScoreBreakdown,
}

/// Result of [`run_search`] or [`solve`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: SearchResult,
    pub best: Option<ResolvedBest>,
}

impl SearchOutcome {
    pub fn score(&self) -> Option<f64> {
        self.best.as_ref().map(|b| b.combo.score)
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_complete()
    }
}

fn checked(config: &FairslotConfig) -> Result<()> {
    #[cfg(feature = "console")]
    fairslot_console::init();

    config
        .validate()
        .map_err(|err| FairslotError::Config(err.to_string()))
}

/// Partitions the league into rounds and enumerates every valid lineup.
pub fn generate_options(config: &FairslotConfig) -> Result<OptionSet> {
    checked(config)?;
    let partitioner = RoundRobinPartitioner::from_config(&config.league);
    let rounds = partitioner.partition()?;
    debug!(rounds = rounds.len(), "league partitioned");
    OptionRepository::new(config.validation.clone(), partitioner.matchups()).build(&rounds)
}

/// Searches the combinations of `options` for the fairest schedule.
///
/// An incomplete search (a failed worker) is still returned; check
/// [`SearchOutcome::is_complete`].
pub fn run_search(options: OptionSet, config: &FairslotConfig) -> Result<SearchOutcome> {
    search_with(options, config, None)
}

/// Like [`run_search`], also sending every new best to `improvements`.
pub fn run_search_streaming(
    options: OptionSet,
    config: &FairslotConfig,
    improvements: UnboundedSender<BestCombo>,
) -> Result<SearchOutcome> {
    search_with(options, config, Some(improvements))
}

/// Generates options and searches them, failing if any worker failed.
///
/// # Example
///
/// ```
/// use fairslot::prelude::*;
///
/// let config = FairslotConfig::default()
///     .with_league(4, 1, 3)
///     .with_validation(ValidationConfig::permissive())
///     .with_pain(PainMultipliers {
///         total_slots_deviation: Some(1.0),
///         ..PainMultipliers::none()
///     });
///
/// let outcome = solve(&config).unwrap();
/// assert_eq!(outcome.score(), Some(0.0));
/// let best = outcome.best.unwrap();
/// assert_eq!(best.schedule.len(), 3);
/// ```
pub fn solve(config: &FairslotConfig) -> Result<SearchOutcome> {
    let options = generate_options(config)?;
    let outcome = run_search(options, config)?;
    if let Some(failure) = outcome.result.failures.first() {
        return Err(FairslotError::WorkerFailed {
            worker_id: failure.worker_id,
            message: failure.message.clone(),
        });
    }
    Ok(outcome)
}

fn search_with(
    options: OptionSet,
    config: &FairslotConfig,
    improvements: Option<UnboundedSender<BestCombo>>,
) -> Result<SearchOutcome> {
    checked(config)?;
    let problem = PreparedProblem::from_config(options, config)?;
    let result = search(&problem, &config.search, improvements)?;

    let best = match &result.best {
        Some(combo) => Some(ResolvedBest {
            combo: combo.clone(),
            schedule: problem.schedule(combo.combo_index)?,
            breakdown: problem.breakdown(combo.combo_index)?,
        }),
        None => None,
    };
    Ok(SearchOutcome { result, best })
}
