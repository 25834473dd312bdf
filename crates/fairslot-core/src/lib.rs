//! fairslot Core - domain types for fair schedule search
//!
//! This crate provides the vocabulary shared by every other fairslot crate:
//! - Matchups and the stable global matchup ordering
//! - Lineups (one valid slot ordering of a round's matchups)
//! - Option sets (the persisted output of option generation)
//! - Combination positions used to resume or seed a search

pub mod domain;
pub mod error;

pub use domain::{
    ComboIndex, ComboPosition, Lineup, Matchup, MatchupIndex, OptionSet, Slot, TeamId, TeamSlots,
};
pub use error::{FairslotError, Result};
