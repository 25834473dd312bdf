//! The per-round option repository handed from generation to search.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::lineup::Lineup;
use super::matchup::Matchup;
use crate::error::{FairslotError, Result};

/// Global matchups plus the valid lineups of every round.
///
/// This is the persisted artifact of option generation. Team count is
/// derived from the matchup list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptionSet {
    games: Vec<Matchup>,
    options_by_round: Vec<Vec<Lineup>>,
}

impl OptionSet {
    pub fn new(games: Vec<Matchup>, options_by_round: Vec<Vec<Lineup>>) -> Self {
        Self {
            games,
            options_by_round,
        }
    }

    pub fn games(&self) -> &[Matchup] {
        &self.games
    }

    pub fn options_by_round(&self) -> &[Vec<Lineup>] {
        &self.options_by_round
    }

    /// One more than the highest team id in the matchup list.
    pub fn team_count(&self) -> usize {
        self.games.iter().map(|m| m.high() + 1).max().unwrap_or(0)
    }

    pub fn round_count(&self) -> usize {
        self.options_by_round.len()
    }

    pub fn option_counts(&self) -> Vec<usize> {
        self.options_by_round.iter().map(Vec::len).collect()
    }

    pub fn option(&self, round: usize, index: usize) -> Option<&Lineup> {
        self.options_by_round.get(round)?.get(index)
    }

    /// Checks that every round has options and every option covers every team
    /// with the slots its games imply.
    pub fn check_complete(&self) -> Result<()> {
        let team_count = self.team_count();
        if team_count == 0 {
            return Err(FairslotError::Config("option set has no games".to_string()));
        }
        if self.options_by_round.is_empty() {
            return Err(FairslotError::Config("option set has no rounds".to_string()));
        }
        for (round, options) in self.options_by_round.iter().enumerate() {
            if options.is_empty() {
                return Err(FairslotError::NoValidOptions { round });
            }
            for (option, lineup) in options.iter().enumerate() {
                if let Some(&bad) = lineup.games().iter().find(|&&g| g >= self.games.len()) {
                    return Err(FairslotError::Config(format!(
                        "option {option} in round {round} references unknown matchup {bad}"
                    )));
                }
                if let Some(team) = lineup.first_missing_team(team_count) {
                    return Err(FairslotError::MissingTeam {
                        round,
                        option,
                        team,
                    });
                }
                if !lineup.slots_match_games(&self.games, team_count) {
                    return Err(FairslotError::Config(format!(
                        "option {option} in round {round} has team slots that disagree with its games"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolves per-round option indices into the matchups played per slot.
    pub fn schedule(&self, indices: &[usize]) -> Result<Vec<Vec<Matchup>>> {
        if indices.len() != self.round_count() {
            return Err(FairslotError::ComboOutOfRange(format!(
                "expected {} round indices, got {}",
                self.round_count(),
                indices.len()
            )));
        }
        indices
            .iter()
            .enumerate()
            .map(|(round, &index)| {
                let lineup = self.option(round, index).ok_or_else(|| {
                    FairslotError::ComboOutOfRange(format!(
                        "round {round} has no option {index}"
                    ))
                })?;
                Ok(lineup.games().iter().map(|&g| self.games[g]).collect())
            })
            .collect()
    }
}
