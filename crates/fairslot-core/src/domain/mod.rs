//! Domain model for rounds, lineups and combinations.

mod combo;
mod lineup;
mod matchup;
mod option_set;

pub use combo::{ComboIndex, ComboPosition};
pub use lineup::{Lineup, Slot, TeamSlots};
pub use matchup::{Matchup, MatchupIndex, TeamId};
pub use option_set::OptionSet;
