//! Lineups: one slot ordering of a round's matchups.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::matchup::{Matchup, MatchupIndex, TeamId};

/// Slot position within a round.
pub type Slot = usize;

/// Ascending slot positions at which one team plays.
pub type TeamSlots = SmallVec<[Slot; 8]>;

/// One valid assignment of a round's matchups to slots.
///
/// `games[s]` is the matchup played in slot `s`. `slot_by_team[t]` lists the
/// slots team `t` plays in, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Lineup {
    games: Vec<MatchupIndex>,
    slot_by_team: Vec<TeamSlots>,
}

impl Lineup {
    pub fn new(games: Vec<MatchupIndex>, slot_by_team: Vec<TeamSlots>) -> Self {
        Self {
            games,
            slot_by_team,
        }
    }

    /// Builds a lineup from an ordering, deriving each team's slots.
    ///
    /// # Example
    ///
    /// ```
    /// use fairslot_core::{Lineup, Matchup};
    ///
    /// let games = Matchup::all_pairs(4);
    /// // (0,3) then (1,2) then (0,1)
    /// let lineup = Lineup::from_ordering(vec![2, 3, 0], &games, 4);
    /// assert_eq!(lineup.slots_for(0), Some(&[0, 2][..]));
    /// assert_eq!(lineup.slots_for(2), Some(&[1][..]));
    /// ```
    pub fn from_ordering(ordering: Vec<MatchupIndex>, games: &[Matchup], team_count: usize) -> Self {
        let mut slot_by_team: Vec<TeamSlots> = vec![TeamSlots::new(); team_count];
        for (slot, &index) in ordering.iter().enumerate() {
            let (a, b) = games[index].teams();
            slot_by_team[a].push(slot);
            slot_by_team[b].push(slot);
        }
        Self::new(ordering, slot_by_team)
    }

    pub fn games(&self) -> &[MatchupIndex] {
        &self.games
    }

    pub fn slot_count(&self) -> usize {
        self.games.len()
    }

    pub fn slot_by_team(&self) -> &[TeamSlots] {
        &self.slot_by_team
    }

    /// Slots played by `team`, or `None` if the lineup has no entry for it.
    pub fn slots_for(&self, team: TeamId) -> Option<&[Slot]> {
        self.slot_by_team.get(team).map(|slots| slots.as_slice())
    }

    /// True if `slot_by_team` lists exactly the slots `games` assigns to each
    /// of the `team_count` teams, ascending.
    ///
    /// # Example
    ///
    /// ```
    /// use fairslot_core::{Lineup, Matchup, TeamSlots};
    ///
    /// let games = Matchup::all_pairs(4);
    /// assert!(Lineup::from_ordering(vec![2, 3], &games, 4).slots_match_games(&games, 4));
    ///
    /// let swapped: Vec<TeamSlots> = vec![
    ///     TeamSlots::from_slice(&[0]),
    ///     TeamSlots::from_slice(&[1]),
    ///     TeamSlots::from_slice(&[0]),
    ///     TeamSlots::from_slice(&[1]),
    /// ];
    /// assert!(!Lineup::new(vec![2, 3], swapped).slots_match_games(&games, 4));
    /// ```
    pub fn slots_match_games(&self, games: &[Matchup], team_count: usize) -> bool {
        if self.slot_by_team.len() != team_count {
            return false;
        }
        let mut expected: Vec<TeamSlots> = vec![TeamSlots::new(); team_count];
        for (slot, &index) in self.games.iter().enumerate() {
            let Some(matchup) = games.get(index) else {
                return false;
            };
            let (a, b) = matchup.teams();
            if b >= team_count {
                return false;
            }
            expected[a].push(slot);
            expected[b].push(slot);
        }
        expected == self.slot_by_team
    }

    /// Returns the first team in `0..team_count` without slot data.
    pub fn first_missing_team(&self, team_count: usize) -> Option<TeamId> {
        (0..team_count).find(|&team| self.slots_for(team).map_or(true, |s| s.is_empty()))
    }
}
