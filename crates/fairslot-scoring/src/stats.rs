//! Per-option fairness statistics.

use fairslot_config::StatsConfig;
use fairslot_core::{FairslotError, Lineup, Matchup, OptionSet, Result, Slot, TeamId};
use smallvec::SmallVec;

use crate::plan::{StatKind, StatPlan};

/// One value per team.
pub type PerTeam = SmallVec<[u32; 16]>;

/// Statistics of one option, computed once and shared by every combination
/// that uses the option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionStats {
    team_count: usize,
    per_team: [Option<PerTeam>; StatKind::COUNT],
    team_matchups: Vec<u32>,
}

impl OptionStats {
    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Per-team values of `kind`, or `None` if the plan skipped it.
    pub fn get(&self, kind: StatKind) -> Option<&[u32]> {
        self.per_team[kind.index()].as_deref()
    }

    /// Times `a` meets `b` in this option.
    pub fn meetings(&self, a: TeamId, b: TeamId) -> u32 {
        self.team_matchups[a * self.team_count + b]
    }

    /// Row-major `team_count x team_count` meeting matrix.
    pub fn team_matchups(&self) -> &[u32] {
        &self.team_matchups
    }
}

/// Computes [`OptionStats`] for the statistics a [`StatPlan`] requires.
#[derive(Debug, Clone)]
pub struct StatsEngine {
    plan: StatPlan,
    config: StatsConfig,
    games: Vec<Matchup>,
    team_count: usize,
}

impl StatsEngine {
    pub fn new(plan: StatPlan, config: StatsConfig, games: &[Matchup]) -> Self {
        let team_count = games.iter().map(|m| m.high() + 1).max().unwrap_or(0);
        Self {
            plan,
            config,
            games: games.to_vec(),
            team_count,
        }
    }

    pub fn plan(&self) -> &StatPlan {
        &self.plan
    }

    /// Computes the stats of option `option` in round `round`.
    pub fn compute(&self, round: usize, option: usize, lineup: &Lineup) -> Result<OptionStats> {
        let n = self.team_count;
        let slot_count = lineup.slot_count();
        let mut per_team: [Option<PerTeam>; StatKind::COUNT] = Default::default();
        for kind in StatKind::ALL {
            if self.plan.requires(kind) {
                per_team[kind.index()] = Some(PerTeam::from_elem(0, n));
            }
        }

        if let Some(team) = lineup.first_missing_team(n) {
            return Err(FairslotError::MissingTeam { round, option, team });
        }
        if !lineup.slots_match_games(&self.games, n) {
            return Err(FairslotError::Config(format!(
                "option {option} in round {round} has team slots that disagree with its games"
            )));
        }

        for (team, slots) in lineup.slot_by_team().iter().enumerate() {
            for kind in StatKind::ALL {
                if let Some(values) = per_team[kind.index()].as_mut() {
                    values[team] = self.team_stat(kind, slots, slot_count);
                }
            }
        }

        let mut team_matchups = vec![0; n * n];
        for &game in lineup.games() {
            let (a, b) = self.games[game].teams();
            team_matchups[a * n + b] += 1;
            team_matchups[b * n + a] += 1;
        }

        Ok(OptionStats {
            team_count: n,
            per_team,
            team_matchups,
        })
    }

    /// Computes stats for every option of every round.
    pub fn compute_all(&self, set: &OptionSet) -> Result<Vec<Vec<OptionStats>>> {
        set.options_by_round()
            .iter()
            .enumerate()
            .map(|(round, options)| {
                options
                    .iter()
                    .enumerate()
                    .map(|(option, lineup)| self.compute(round, option, lineup))
                    .collect()
            })
            .collect()
    }

    // `slots` is ascending and non-empty.
    fn team_stat(&self, kind: StatKind, slots: &[Slot], slot_count: usize) -> u32 {
        let first = slots[0];
        let last = slots[slots.len() - 1];
        let k = self.config.early_late_slots;
        let count = match kind {
            StatKind::DoubleHeaders => slots.windows(2).filter(|w| idle(w) == 0).count(),
            StatKind::TripleHeaders => slots
                .windows(3)
                .filter(|w| w[1] - w[0] == 1 && w[2] - w[1] == 1)
                .count(),
            StatKind::TotalSlots => last - first + 1,
            StatKind::DoubleByes => slots
                .windows(2)
                .filter(|w| idle(w) >= self.config.double_bye_idle_slots)
                .count(),
            StatKind::TripleByes => slots
                .windows(2)
                .filter(|w| idle(w) >= self.config.triple_bye_idle_slots)
                .count(),
            StatKind::Early => usize::from(first < k),
            StatKind::Late => usize::from(last + k >= slot_count),
        };
        count as u32
    }
}

// Idle slots between the two games of a window.
fn idle(pair: &[Slot]) -> usize {
    pair[1] - pair[0] - 1
}
