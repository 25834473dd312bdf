//! Small leagues with hand-built option sets.
//!
//! With 4 teams the circle method gives three rotation groups:
//! `[(0,3),(1,2)]`, `[(0,2),(1,3)]` and `[(0,1),(2,3)]`, i.e. matchup
//! indices `[2,3]`, `[1,4]` and `[0,5]` of [`Matchup::all_pairs`].

use fairslot_core::{Lineup, Matchup, MatchupIndex, OptionSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Rotation groups of a 4-team league, as matchup indices.
pub const FOUR_TEAM_ROTATION: [[MatchupIndex; 2]; 3] = [[2, 3], [1, 4], [0, 5]];

/// Builds a lineup for `ordering`, deriving team count from `games`.
pub fn lineup(games: &[Matchup], ordering: &[MatchupIndex]) -> Lineup {
    let team_count = games.iter().map(|m| m.high() + 1).max().unwrap_or(0);
    Lineup::from_ordering(ordering.to_vec(), games, team_count)
}

/// Every ordering of `items`, by naive recursion.
pub fn all_orderings(items: &[usize]) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in all_orderings(&rest) {
            tail.insert(0, head);
            result.push(tail);
        }
    }
    result
}

/// 4 teams, 3 rounds, one game per team per round: both orderings of each
/// rotation group are valid options.
pub fn four_team_single_game_rounds() -> OptionSet {
    let games = Matchup::all_pairs(4);
    let options_by_round = FOUR_TEAM_ROTATION
        .iter()
        .map(|group| {
            all_orderings(group)
                .iter()
                .map(|ordering| lineup(&games, ordering))
                .collect()
        })
        .collect();
    OptionSet::new(games, options_by_round)
}

/// 4 teams, 3 rounds, two games per team per round, every ordering kept
/// (24 options per round, 13,824 combinations).
pub fn four_team_double_rounds() -> OptionSet {
    let games = Matchup::all_pairs(4);
    let [g0, g1, g2] = FOUR_TEAM_ROTATION;
    let rounds = [[g0, g1].concat(), [g2, g0].concat(), [g1, g2].concat()];
    let options_by_round = rounds
        .iter()
        .map(|round| {
            all_orderings(round)
                .iter()
                .map(|ordering| lineup(&games, ordering))
                .collect()
        })
        .collect();
    OptionSet::new(games, options_by_round)
}

/// Deterministic RNG for reproducible sampling in tests.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A uniformly random option-index vector for rounds with `counts` options.
pub fn random_combo<R: Rng>(rng: &mut R, counts: &[usize]) -> Vec<usize> {
    counts.iter().map(|&n| rng.random_range(0..n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_orderings_count() {
        assert_eq!(all_orderings(&[]).len(), 1);
        assert_eq!(all_orderings(&[7]).len(), 1);
        assert_eq!(all_orderings(&[1, 2, 3, 4]).len(), 24);
    }

    #[test]
    fn test_double_rounds_complete() {
        let set = four_team_double_rounds();
        assert_eq!(set.option_counts(), vec![24, 24, 24]);
        assert!(set.check_complete().is_ok());
    }

    #[test]
    fn test_random_combo_in_range() {
        let mut rng = seeded_rng(7);
        for _ in 0..100 {
            let combo = random_combo(&mut rng, &[3, 1, 5]);
            assert!(combo[0] < 3 && combo[1] == 0 && combo[2] < 5);
        }
    }
}
