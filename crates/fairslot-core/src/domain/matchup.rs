//! Matchups between two teams.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Team identifier in `[0, team_count)`.
pub type TeamId = usize;

/// Position of a matchup in the global matchup list.
pub type MatchupIndex = usize;

/// An unordered pair of teams that meet once.
///
/// The pair is stored normalized so that `low() < high()`.
///
/// # Example
///
/// ```
/// use fairslot_core::Matchup;
///
/// let m = Matchup::new(3, 1);
/// assert_eq!(m.teams(), (1, 3));
/// assert!(m.involves(3));
/// assert!(!m.involves(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "[TeamId; 2]", into = "[TeamId; 2]")
)]
pub struct Matchup {
    low: TeamId,
    high: TeamId,
}

impl Matchup {
    pub fn new(a: TeamId, b: TeamId) -> Self {
        debug_assert_ne!(a, b, "a team cannot play itself");
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> TeamId {
        self.low
    }

    pub fn high(&self) -> TeamId {
        self.high
    }

    pub fn teams(&self) -> (TeamId, TeamId) {
        (self.low, self.high)
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.low == team || self.high == team
    }

    /// Every pair of `team_count` teams, ordered `(0,1), (0,2), .., (1,2), ..`.
    pub fn all_pairs(team_count: usize) -> Vec<Matchup> {
        let mut pairs = Vec::with_capacity(team_count * team_count.saturating_sub(1) / 2);
        for low in 0..team_count {
            for high in (low + 1)..team_count {
                pairs.push(Matchup { low, high });
            }
        }
        pairs
    }

    /// Index of the pair `(a, b)` within [`Matchup::all_pairs`].
    pub fn pair_index(a: TeamId, b: TeamId, team_count: usize) -> MatchupIndex {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        low * team_count - low * (low + 1) / 2 + (high - low - 1)
    }
}

impl From<[TeamId; 2]> for Matchup {
    fn from(pair: [TeamId; 2]) -> Self {
        Matchup::new(pair[0], pair[1])
    }
}

impl From<Matchup> for [TeamId; 2] {
    fn from(m: Matchup) -> Self {
        [m.low, m.high]
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v {}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_pairs_order() {
        let pairs = Matchup::all_pairs(4);
        let teams: Vec<_> = pairs.iter().map(Matchup::teams).collect();
        assert_eq!(teams, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_pair_index_matches_all_pairs() {
        for n in [2, 4, 6, 8, 10] {
            for (i, m) in Matchup::all_pairs(n).iter().enumerate() {
                assert_eq!(Matchup::pair_index(m.low(), m.high(), n), i);
                assert_eq!(Matchup::pair_index(m.high(), m.low(), n), i);
            }
        }
    }

    #[test]
    fn test_normalized() {
        assert_eq!(Matchup::new(5, 2), Matchup::new(2, 5));
        assert!(Matchup::new(5, 2).involves(5));
        assert!(!Matchup::new(5, 2).involves(3));
        assert_eq!(Matchup::from([4, 0]).to_string(), "0 v 4");
    }
}
