//! Option generation: every valid lineup of every round.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, trace};

use fairslot_config::ValidationConfig;
use fairslot_core::{FairslotError, Lineup, Matchup, MatchupIndex, OptionSet, Result, TeamSlots};

use crate::permutation::{permutation_count, Permutations};
use crate::validator::LineupValidator;

// Permutations between clock checks.
const CLOCK_CHECK_MASK: u64 = (1 << 16) - 1;

/// Enumerates and validates the orderings of each round.
///
/// # Example
///
/// ```
/// use fairslot_config::ValidationConfig;
/// use fairslot_core::Matchup;
/// use fairslot_solver::repository::OptionRepository;
///
/// let games = Matchup::all_pairs(4);
/// let repository = OptionRepository::new(ValidationConfig::permissive(), games);
/// let set = repository.build(&[vec![2, 3], vec![1, 4]]).unwrap();
/// assert_eq!(set.option_counts(), vec![2, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct OptionRepository {
    validator: LineupValidator,
    games: Vec<Matchup>,
}

impl OptionRepository {
    pub fn new(rules: ValidationConfig, games: Vec<Matchup>) -> Self {
        Self {
            validator: LineupValidator::new(rules, &games),
            games,
        }
    }

    pub fn validator(&self) -> &LineupValidator {
        &self.validator
    }

    /// Generates the options of every round in parallel.
    pub fn build(&self, rounds: &[Vec<MatchupIndex>]) -> Result<OptionSet> {
        let started = Instant::now();
        let options_by_round = rounds
            .par_iter()
            .enumerate()
            .map(|(round, matchups)| self.round_options(round, matchups))
            .collect::<Result<Vec<_>>>()?;

        let set = OptionSet::new(self.games.clone(), options_by_round);
        info!(
            event = "options_generated",
            rounds = set.round_count(),
            options = set.option_counts().iter().sum::<usize>() as u64,
            duration_ms = started.elapsed().as_millis() as u64,
        );
        Ok(set)
    }

    /// Every valid lineup of one round, in enumeration order.
    pub fn round_options(&self, round: usize, matchups: &[MatchupIndex]) -> Result<Vec<Lineup>> {
        let team_count = self.validator.team_count();
        if let Some(&bad) = matchups.iter().find(|&&m| m >= self.games.len()) {
            return Err(FairslotError::Config(format!(
                "round {round} references unknown matchup {bad}"
            )));
        }
        if let Some(team) =
            (0..team_count).find(|&t| !matchups.iter().any(|&m| self.games[m].involves(t)))
        {
            return Err(FairslotError::Config(format!(
                "team {team} has no games in round {round}"
            )));
        }
        let total = permutation_count(matchups.len()).ok_or_else(|| {
            FairslotError::Overflow(format!(
                "round {round} has {} games; the ordering count exceeds u64",
                matchups.len()
            ))
        })?;

        let rules = self.validator.rules();
        let interval = rules.progress_interval();
        let show_failures = rules.show_failure_reasons;

        let started = Instant::now();
        let mut last_report = started;
        let mut checked = 0u64;
        let mut options = Vec::new();
        let mut slot_by_team: Vec<TeamSlots> = Vec::with_capacity(team_count);
        let mut permutations = Permutations::new(matchups.to_vec());

        while let Some(ordering) = permutations.advance() {
            checked += 1;
            match self.validator.validate_into(ordering, &mut slot_by_team) {
                Ok(()) => options.push(Lineup::new(ordering.to_vec(), slot_by_team.clone())),
                Err(rejection) if show_failures => {
                    trace!(
                        event = "lineup_rejected",
                        round = round,
                        ordering = ?ordering,
                        reason = %rejection,
                    );
                }
                Err(_) => {}
            }

            if checked & CLOCK_CHECK_MASK == 0 && last_report.elapsed() >= interval {
                last_report = Instant::now();
                let secs = started.elapsed().as_secs_f64();
                info!(
                    event = "round_progress",
                    round = round,
                    checked = checked,
                    total = total,
                    valid = options.len() as u64,
                    speed = (checked as f64 / secs) as u64,
                );
            }
        }

        info!(
            event = "round_options",
            round = round,
            checked = checked,
            valid = options.len() as u64,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        if options.is_empty() {
            return Err(FairslotError::NoValidOptions { round });
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round_robin::RoundRobinPartitioner;

    #[test]
    fn test_permissive_keeps_every_ordering() {
        let repository = OptionRepository::new(ValidationConfig::permissive(), Matchup::all_pairs(4));
        let options = repository.round_options(0, &[2, 3, 1, 4]).unwrap();
        assert_eq!(options.len(), 24);
        assert_eq!(options[0].games(), &[2, 3, 1, 4]);
        for option in &options {
            assert_eq!(option.slot_count(), 4);
            assert_eq!(option.first_missing_team(4), None);
        }
    }

    #[test]
    fn test_options_satisfy_rules() {
        let rules = ValidationConfig {
            no_triple_headers: true,
            ..ValidationConfig::permissive()
        };
        let repository = OptionRepository::new(rules, Matchup::all_pairs(4));
        let options = repository.round_options(0, &[2, 3, 1, 4, 0, 5]).unwrap();
        assert!(!options.is_empty());
        assert!(options.len() < 720);
        for option in &options {
            for slots in option.slot_by_team() {
                assert!(slots.windows(3).all(|w| w[2] > w[0] + 2));
            }
        }
    }

    #[test]
    fn test_alternating_rule_leaves_nothing_for_two_games() {
        // each team plays twice in four slots and every ordering puts some
        // team back to back
        let rules = ValidationConfig {
            no_double_headers: true,
            ..ValidationConfig::permissive()
        };
        let repository = OptionRepository::new(rules, Matchup::all_pairs(4));
        assert!(matches!(
            repository.round_options(0, &[2, 3, 1, 4]),
            Err(FairslotError::NoValidOptions { round: 0 })
        ));
    }

    #[test]
    fn test_no_valid_options() {
        let rules = ValidationConfig {
            max_slot_span: Some(1),
            ..ValidationConfig::permissive()
        };
        let repository = OptionRepository::new(rules, Matchup::all_pairs(4));
        assert!(matches!(
            repository.round_options(3, &[2, 3, 1, 4]),
            Err(FairslotError::NoValidOptions { round: 3 })
        ));
    }

    #[test]
    fn test_team_without_games_rejected() {
        let repository = OptionRepository::new(ValidationConfig::permissive(), Matchup::all_pairs(4));
        // (0,1) only
        assert!(matches!(
            repository.round_options(0, &[0]),
            Err(FairslotError::Config(_))
        ));
    }

    #[test]
    fn test_build_from_partition() {
        let partitioner = RoundRobinPartitioner::new(6, 1, 5);
        let rounds = partitioner.partition().unwrap();
        let repository =
            OptionRepository::new(ValidationConfig::default(), partitioner.matchups());
        let set = repository.build(&rounds).unwrap();
        assert_eq!(set.round_count(), 5);
        assert_eq!(set.option_counts(), vec![6; 5]);
        set.check_complete().unwrap();
    }
}
