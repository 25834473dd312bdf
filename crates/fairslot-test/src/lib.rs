//! Shared test utilities for fairslot crates.
//!
//! Provides small leagues whose option sets are cheap to enumerate, so
//! tests across crates can exercise the real pipeline on known inputs.
//!
//! # Example
//!
//! ```
//! use fairslot_test::league::four_team_single_game_rounds;
//!
//! let set = four_team_single_game_rounds();
//! assert_eq!(set.team_count(), 4);
//! assert_eq!(set.option_counts(), vec![2, 2, 2]);
//! ```

pub mod league;
pub mod pain;

pub use league::{
    all_orderings, four_team_double_rounds, four_team_single_game_rounds, lineup, random_combo,
    seeded_rng, FOUR_TEAM_ROTATION,
};
pub use pain::{every_factor, totals_only};
