//! Structural validation of one slot ordering.

use std::fmt;

use fairslot_config::ValidationConfig;
use fairslot_core::{Matchup, MatchupIndex, Slot, TeamId, TeamSlots};

/// Why a lineup was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    DoubleHeader,
    TripleHeader,
    IdleSlots { idle: usize, max: usize },
    SlotSpan { span: usize, max: usize },
    GapInstances { count: usize, gap: usize, max: usize },
}

/// A rejected ordering: the first team found breaking a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub team: TeamId,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let team = self.team;
        match self.reason {
            RejectReason::DoubleHeader => write!(f, "team {team} plays a double header"),
            RejectReason::TripleHeader => write!(f, "team {team} plays a triple header"),
            RejectReason::IdleSlots { idle, max } => {
                write!(f, "team {team} sits {idle} idle slots (max {max})")
            }
            RejectReason::SlotSpan { span, max } => {
                write!(f, "team {team} spans {span} slots (max {max})")
            }
            RejectReason::GapInstances { count, gap, max } => write!(
                f,
                "team {team} has {count} gaps of {gap} idle slots (max {max})"
            ),
        }
    }
}

/// Accepts or rejects orderings against [`ValidationConfig`] rules.
///
/// # Example
///
/// ```
/// use fairslot_config::ValidationConfig;
/// use fairslot_core::Matchup;
/// use fairslot_solver::validator::{LineupValidator, RejectReason};
///
/// let games = Matchup::all_pairs(4);
/// let rules = ValidationConfig {
///     max_idle_slots: Some(1),
///     ..ValidationConfig::permissive()
/// };
/// let validator = LineupValidator::new(rules, &games);
///
/// // (0,1) (2,3) (1,3) (0,2): team 0 sits out two slots
/// let rejection = validator.validate(&[0, 5, 4, 1]).unwrap_err();
/// assert_eq!(rejection.team, 0);
/// assert_eq!(rejection.reason, RejectReason::IdleSlots { idle: 2, max: 1 });
///
/// // (0,1) (0,2) (1,3) (2,3)
/// let slots = validator.validate(&[0, 1, 4, 5]).unwrap();
/// assert_eq!(slots[0].as_slice(), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct LineupValidator {
    rules: ValidationConfig,
    games: Vec<Matchup>,
    team_count: usize,
}

impl LineupValidator {
    pub fn new(rules: ValidationConfig, games: &[Matchup]) -> Self {
        let team_count = games.iter().map(|m| m.high() + 1).max().unwrap_or(0);
        Self {
            rules,
            games: games.to_vec(),
            team_count,
        }
    }

    pub fn rules(&self) -> &ValidationConfig {
        &self.rules
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Validates `ordering`, returning each team's slots on success.
    pub fn validate(&self, ordering: &[MatchupIndex]) -> Result<Vec<TeamSlots>, Rejection> {
        let mut slot_by_team = Vec::new();
        self.validate_into(ordering, &mut slot_by_team)?;
        Ok(slot_by_team)
    }

    /// Like [`validate`](Self::validate) but reuses `slot_by_team`.
    pub fn validate_into(
        &self,
        ordering: &[MatchupIndex],
        slot_by_team: &mut Vec<TeamSlots>,
    ) -> Result<(), Rejection> {
        slot_by_team.resize_with(self.team_count, TeamSlots::new);
        slot_by_team.iter_mut().for_each(|slots| slots.clear());
        for (slot, &index) in ordering.iter().enumerate() {
            let (a, b) = self.games[index].teams();
            slot_by_team[a].push(slot);
            slot_by_team[b].push(slot);
        }
        for (team, slots) in slot_by_team.iter().enumerate() {
            self.check_team(slots)
                .map_err(|reason| Rejection { team, reason })?;
        }
        Ok(())
    }

    /// Checks one team's ascending slots against every enabled rule.
    pub fn check_team(&self, slots: &[Slot]) -> Result<(), RejectReason> {
        let (Some(&first), Some(&last)) = (slots.first(), slots.last()) else {
            return Ok(());
        };
        let rules = &self.rules;

        if let Some(max) = rules.max_slot_span {
            let span = last - first + 1;
            if span > max {
                return Err(RejectReason::SlotSpan { span, max });
            }
        }

        let mut previous_gap = None;
        let mut max_gap_count = 0;
        for pair in slots.windows(2) {
            let gap = pair[1] - pair[0] - 1;
            if gap == 0 {
                if rules.no_double_headers {
                    return Err(RejectReason::DoubleHeader);
                }
                if rules.no_triple_headers && previous_gap == Some(0) {
                    return Err(RejectReason::TripleHeader);
                }
            }
            if let Some(max) = rules.max_idle_slots {
                if gap > max {
                    return Err(RejectReason::IdleSlots { idle: gap, max });
                }
                if gap == max {
                    max_gap_count += 1;
                }
            }
            previous_gap = Some(gap);
        }

        if let (Some(gap), Some(max)) = (rules.max_idle_slots, rules.max_gap_instance_count) {
            if max_gap_count > max {
                return Err(RejectReason::GapInstances {
                    count: max_gap_count,
                    gap,
                    max,
                });
            }
        }
        Ok(())
    }
}
