//! Round-robin partitioning of matchups into rounds (circle method).

use fairslot_config::LeagueConfig;
use fairslot_core::{FairslotError, Matchup, MatchupIndex, Result};

/// Rotation groups of the circle method.
///
/// Team 0 stays fixed while the others rotate one position per group. Each
/// of the `team_count - 1` groups pairs every team once, and together they
/// cover every pair exactly once.
///
/// # Example
///
/// ```
/// use fairslot_solver::round_robin::rotation_groups;
///
/// let groups = rotation_groups(4).unwrap();
/// // (0,3) (1,2) | (0,2) (3,1) | (0,1) (2,3)
/// assert_eq!(groups, vec![vec![2, 3], vec![1, 4], vec![0, 5]]);
/// ```
pub fn rotation_groups(team_count: usize) -> Result<Vec<Vec<MatchupIndex>>> {
    if team_count < 2 {
        return Err(FairslotError::Config(format!(
            "round-robin needs at least two teams, got {team_count}"
        )));
    }
    if team_count % 2 != 0 {
        return Err(FairslotError::OddTeamCount(team_count));
    }

    let mut teams: Vec<usize> = (0..team_count).collect();
    let mut groups = Vec::with_capacity(team_count - 1);
    for _ in 0..team_count - 1 {
        let group = (0..team_count / 2)
            .map(|i| Matchup::pair_index(teams[i], teams[team_count - 1 - i], team_count))
            .collect();
        groups.push(group);
        teams[1..].rotate_right(1);
    }
    Ok(groups)
}

/// Splits the global matchup list into fixed rounds.
#[derive(Debug, Clone)]
pub struct RoundRobinPartitioner {
    team_count: usize,
    games_per_team_per_round: usize,
    round_count: usize,
}

impl RoundRobinPartitioner {
    pub fn new(team_count: usize, games_per_team_per_round: usize, round_count: usize) -> Self {
        Self {
            team_count,
            games_per_team_per_round,
            round_count,
        }
    }

    pub fn from_config(league: &LeagueConfig) -> Self {
        Self::new(
            league.team_count,
            league.games_per_team_per_round,
            league.round_count,
        )
    }

    /// The global matchup list; positions are matchup indices.
    pub fn matchups(&self) -> Vec<Matchup> {
        Matchup::all_pairs(self.team_count)
    }

    pub fn games_per_round(&self) -> usize {
        self.games_per_team_per_round * self.team_count / 2
    }

    /// Matchup indices of every round.
    ///
    /// Each round concatenates `games_per_team_per_round` consecutive rotation
    /// groups, continuing where the previous round stopped and wrapping
    /// around after the last group.
    pub fn partition(&self) -> Result<Vec<Vec<MatchupIndex>>> {
        if self.games_per_team_per_round == 0 {
            return Err(FairslotError::Config(
                "games per team per round must be at least 1".to_string(),
            ));
        }
        let groups = rotation_groups(self.team_count)?;
        let mut next = 0;
        let mut rounds = Vec::with_capacity(self.round_count);
        for _ in 0..self.round_count {
            let mut round = Vec::with_capacity(self.games_per_round());
            for _ in 0..self.games_per_team_per_round {
                round.extend_from_slice(&groups[next]);
                next = (next + 1) % groups.len();
            }
            rounds.push(round);
        }
        Ok(rounds)
    }
}
