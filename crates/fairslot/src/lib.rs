//! fairslot - fair multi-round sports schedule search
//!
//! Splits a round-robin league into rounds, enumerates every valid slot
//! ordering of each round, then searches one ordering per round for the
//! combination that spreads headers, byes and early/late games most evenly.
//!
//! # Example
//!
//! ```rust
//! use fairslot::prelude::*;
//!
//! let config = FairslotConfig::from_toml_str(r#"
//!     [league]
//!     team_count = 4
//!     games_per_team_per_round = 1
//!     round_count = 3
//!
//!     [search]
//!     strategy = "partitioned"
//!     worker_count = { count = 2 }
//! "#).unwrap();
//!
//! let options = generate_options(&config).unwrap();
//! assert_eq!(options.option_counts(), vec![2, 2, 2]);
//!
//! let outcome = run_search(options, &config).unwrap();
//! assert!(outcome.is_complete());
//! assert_eq!(outcome.result.stats.combos_evaluated, 8);
//! ```

pub use fairslot_config::{
    ConfigError, FairslotConfig, LeagueConfig, MatchupRange, PainMultipliers, SearchConfig,
    SearchStrategy, StatsConfig, UnhappinessWeights, ValidationConfig, WorkerCount,
};
pub use fairslot_core::{
    ComboIndex, ComboPosition, FairslotError, Lineup, Matchup, OptionSet, Result, TeamId,
};
pub use fairslot_scoring::{Factor, ScoreBreakdown, StatKind};
pub use fairslot_solver::{BestCombo, SearchResult, SearchStats, WorkerFailure};

#[cfg(feature = "console")]
pub use fairslot_console as console;

mod solve;
pub use solve::{
    generate_options, run_search, run_search_streaming, solve, ResolvedBest, SearchOutcome,
};

pub mod prelude {
    pub use super::{
        generate_options, run_search, run_search_streaming, solve, ComboPosition,
        FairslotConfig, Matchup, OptionSet, PainMultipliers, SearchOutcome, SearchStrategy,
        ValidationConfig, WorkerCount,
    };
}
