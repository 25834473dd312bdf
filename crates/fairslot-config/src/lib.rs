//! Configuration system for fairslot.
//!
//! Load league shape, validation rules, fairness weights and search settings
//! from TOML or YAML without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use fairslot_config::{FairslotConfig, SearchStrategy, WorkerCount};
//!
//! let config = FairslotConfig::from_toml_str(r#"
//!     [league]
//!     team_count = 8
//!     games_per_team_per_round = 3
//!     round_count = 6
//!
//!     [pain]
//!     double_bye_deviation = 20.0
//!
//!     [search]
//!     strategy = "partitioned"
//!     worker_count = { count = 4 }
//!     start = "1,204,000"
//! "#).unwrap();
//!
//! assert_eq!(config.league.games_per_round(), 12);
//! assert_eq!(config.pain.double_bye_deviation, Some(20.0));
//! // untouched weights keep their defaults
//! assert_eq!(config.pain.double_header_count, Some(0.1));
//! assert_eq!(config.search.strategy, SearchStrategy::Partitioned);
//! assert_eq!(config.search.worker_count, WorkerCount::Count(4));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use fairslot_config::FairslotConfig;
//!
//! let config = FairslotConfig::load("fairslot.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use fairslot_core::ComboPosition;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main fairslot configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FairslotConfig {
    /// League shape used to partition matchups into rounds.
    #[serde(default)]
    pub league: LeagueConfig,

    /// Structural rules every lineup must satisfy.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Thresholds used when computing per-option statistics.
    #[serde(default)]
    pub stats: StatsConfig,

    /// Fairness weights.
    #[serde(default)]
    pub pain: PainMultipliers,

    /// Combination search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

impl FairslotConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing YAML for `.yaml`/`.yml`
    /// and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, fails to parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the league shape.
    pub fn with_league(
        mut self,
        team_count: usize,
        games_per_team_per_round: usize,
        round_count: usize,
    ) -> Self {
        self.league = LeagueConfig {
            team_count,
            games_per_team_per_round,
            round_count,
        };
        self
    }

    /// Replaces the validation rules.
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// Replaces the fairness weights.
    pub fn with_pain(mut self, pain: PainMultipliers) -> Self {
        self.pain = pain;
        self
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.search.strategy = strategy;
        self
    }

    /// Sets the number of partitioned search workers.
    pub fn with_worker_count(mut self, worker_count: WorkerCount) -> Self {
        self.search.worker_count = worker_count;
        self
    }

    /// Resumes the search from `position`.
    pub fn with_start(mut self, position: ComboPosition) -> Self {
        self.search.start = Some(position);
        self
    }

    /// Seeds pruning with a known combination.
    pub fn with_best(mut self, position: ComboPosition) -> Self {
        self.search.best = Some(position);
        self
    }

    /// Checks semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.league.games_per_team_per_round == 0 {
            return Err(ConfigError::Invalid(
                "league.games_per_team_per_round must be at least 1".to_string(),
            ));
        }
        if self.league.round_count == 0 {
            return Err(ConfigError::Invalid(
                "league.round_count must be at least 1".to_string(),
            ));
        }
        if self.stats.early_late_slots == 0 {
            return Err(ConfigError::Invalid(
                "stats.early_late_slots must be at least 1".to_string(),
            ));
        }
        if self.stats.double_bye_idle_slots == 0 || self.stats.triple_bye_idle_slots == 0 {
            return Err(ConfigError::Invalid(
                "bye thresholds must be at least 1 idle slot".to_string(),
            ));
        }
        if let WorkerCount::Count(0) = self.search.worker_count {
            return Err(ConfigError::Invalid(
                "search.worker_count must be at least 1".to_string(),
            ));
        }
        self.pain.validate()
    }
}

/// League shape: how many teams meet how often per round.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LeagueConfig {
    /// Number of teams. Must be even for round-robin partitioning.
    pub team_count: usize,

    /// Rotation groups per round; each team plays this many games a round.
    pub games_per_team_per_round: usize,

    /// Number of rounds to schedule.
    pub round_count: usize,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            team_count: 6,
            games_per_team_per_round: 3,
            round_count: 6,
        }
    }
}

impl LeagueConfig {
    /// Matchups (slots) per round.
    pub fn games_per_round(&self) -> usize {
        self.games_per_team_per_round * self.team_count / 2
    }
}

/// Structural lineup rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ValidationConfig {
    /// Reject lineups where a team plays two consecutive slots.
    pub no_double_headers: bool,

    /// Reject lineups where a team plays three consecutive slots.
    pub no_triple_headers: bool,

    /// Maximum idle slots between two of a team's games.
    pub max_idle_slots: Option<usize>,

    /// Maximum slots from a team's first game to its last, inclusive.
    pub max_slot_span: Option<usize>,

    /// Maximum number of gaps of exactly `max_idle_slots` per team.
    pub max_gap_instance_count: Option<usize>,

    /// Log why each rejected lineup failed (at trace level).
    pub show_failure_reasons: bool,

    /// Seconds between per-round generation progress events.
    pub progress_interval_secs: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            no_double_headers: false,
            no_triple_headers: true,
            max_idle_slots: Some(2),
            max_slot_span: Some(6),
            max_gap_instance_count: None,
            show_failure_reasons: false,
            progress_interval_secs: 10,
        }
    }
}

impl ValidationConfig {
    /// Rules that accept every ordering.
    pub fn permissive() -> Self {
        Self {
            no_double_headers: false,
            no_triple_headers: false,
            max_idle_slots: None,
            max_slot_span: None,
            max_gap_instance_count: None,
            ..Self::default()
        }
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval_secs)
    }
}

/// Thresholds for per-option statistics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StatsConfig {
    /// Idle slots in one gap that count as a double bye.
    pub double_bye_idle_slots: usize,

    /// Idle slots in one gap that count as a triple bye.
    pub triple_bye_idle_slots: usize,

    /// Slots at each end of a round that count as early or late.
    pub early_late_slots: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            double_bye_idle_slots: 2,
            triple_bye_idle_slots: 3,
            early_late_slots: 2,
        }
    }
}

/// Weights of the fairness factors.
///
/// An absent (or zero) weight removes the factor from scoring entirely, and
/// its statistic is not computed unless another factor needs it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PainMultipliers {
    pub double_header_count: Option<f64>,
    pub double_header_deviation: Option<f64>,
    pub triple_header_count: Option<f64>,
    pub triple_header_deviation: Option<f64>,
    pub total_slot_count: Option<f64>,
    pub total_slots_deviation: Option<f64>,
    pub double_bye_count: Option<f64>,
    pub double_bye_deviation: Option<f64>,
    pub triple_bye_count: Option<f64>,
    pub triple_bye_deviation: Option<f64>,
    pub early_late_deviation: Option<f64>,

    /// Deviation across teams of each team's combined pain.
    pub uneven_team_unhappiness: Option<f64>,

    /// Per-stat weights of the combined pain; missing entries use the count weight.
    pub unhappiness: UnhappinessWeights,

    /// Penalty per meeting outside the expected range, per team pair.
    pub matchup_imbalance: Option<f64>,

    /// Expected meetings per team pair; derived from the schedule when absent.
    pub matchup_range: Option<MatchupRange>,
}

impl Default for PainMultipliers {
    fn default() -> Self {
        Self {
            double_header_count: Some(0.1),
            double_header_deviation: Some(0.5),
            triple_header_count: None,
            triple_header_deviation: None,
            total_slot_count: Some(0.1),
            total_slots_deviation: Some(0.2),
            double_bye_count: Some(1.5),
            double_bye_deviation: Some(15.0),
            triple_bye_count: None,
            triple_bye_deviation: None,
            early_late_deviation: Some(1.0),
            uneven_team_unhappiness: Some(50.0),
            unhappiness: UnhappinessWeights::default(),
            matchup_imbalance: None,
            matchup_range: None,
        }
    }
}

impl PainMultipliers {
    /// All factors disabled.
    pub fn none() -> Self {
        Self {
            double_header_count: None,
            double_header_deviation: None,
            total_slot_count: None,
            total_slots_deviation: None,
            double_bye_count: None,
            double_bye_deviation: None,
            early_late_deviation: None,
            uneven_team_unhappiness: None,
            ..Self::default()
        }
    }

    /// Returns the weight if it takes part in scoring.
    pub fn active(weight: Option<f64>) -> Option<f64> {
        weight.filter(|w| *w != 0.0)
    }

    fn all_weights(&self) -> [(&'static str, Option<f64>); 19] {
        [
            ("double_header_count", self.double_header_count),
            ("double_header_deviation", self.double_header_deviation),
            ("triple_header_count", self.triple_header_count),
            ("triple_header_deviation", self.triple_header_deviation),
            ("total_slot_count", self.total_slot_count),
            ("total_slots_deviation", self.total_slots_deviation),
            ("double_bye_count", self.double_bye_count),
            ("double_bye_deviation", self.double_bye_deviation),
            ("triple_bye_count", self.triple_bye_count),
            ("triple_bye_deviation", self.triple_bye_deviation),
            ("early_late_deviation", self.early_late_deviation),
            ("uneven_team_unhappiness", self.uneven_team_unhappiness),
            ("matchup_imbalance", self.matchup_imbalance),
            ("unhappiness.double_headers", self.unhappiness.double_headers),
            ("unhappiness.triple_headers", self.unhappiness.triple_headers),
            ("unhappiness.total_slots", self.unhappiness.total_slots),
            ("unhappiness.double_byes", self.unhappiness.double_byes),
            ("unhappiness.triple_byes", self.unhappiness.triple_byes),
            ("unhappiness.early_late", self.unhappiness.early_late),
        ]
    }

    /// Weights must be finite and non-negative so a partial score never
    /// exceeds the full score.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in self.all_weights() {
            if let Some(w) = weight {
                if !w.is_finite() || w < 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "pain.{name} must be a non-negative number, got {w}"
                    )));
                }
            }
        }
        if let Some(range) = &self.matchup_range {
            if range.min > range.max {
                return Err(ConfigError::Invalid(format!(
                    "pain.matchup_range min {} exceeds max {}",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

/// Per-stat weights inside the uneven-team-unhappiness composite.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct UnhappinessWeights {
    pub double_headers: Option<f64>,
    pub triple_headers: Option<f64>,
    pub total_slots: Option<f64>,
    pub double_byes: Option<f64>,
    pub triple_byes: Option<f64>,

    /// Applied to the early count and the late count separately.
    pub early_late: Option<f64>,
}

/// Inclusive range of expected meetings between any two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchupRange {
    pub min: u32,
    pub max: u32,
}

/// Combination search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    /// How the combination space is walked.
    pub strategy: SearchStrategy,

    /// Workers for the partitioned strategy.
    pub worker_count: WorkerCount,

    /// Resume from this combination instead of the first.
    pub start: Option<ComboPosition>,

    /// Known combination whose score seeds pruning.
    pub best: Option<ComboPosition>,

    /// Seconds between aggregated progress events.
    pub progress_interval_secs: u64,

    /// Milliseconds between worker progress reports.
    pub sync_interval_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            worker_count: WorkerCount::default(),
            start: None,
            best: None,
            progress_interval_secs: 10,
            sync_interval_ms: 5000,
        }
    }
}

impl SearchConfig {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval_secs)
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms)
    }
}

/// Search strategy over the combination space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Single-threaded odometer walk.
    #[default]
    Exhaustive,

    /// Strided walk split across worker threads.
    Partitioned,
}

/// Worker count for partitioned search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// One worker per available CPU.
    #[default]
    Auto,

    /// Specific number of workers.
    Count(usize),
}

impl WorkerCount {
    /// Resolves to a concrete worker count.
    pub fn resolve(&self) -> usize {
        match self {
            WorkerCount::Auto => std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1),
            WorkerCount::Count(n) => (*n).max(1),
        }
    }
}
