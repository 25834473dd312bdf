//! Combination scoring with early exit.

use std::fmt;

use fairslot_config::MatchupRange;

use crate::math::{stdev, sum};
use crate::plan::{StatKind, StatPlan};
use crate::stats::{OptionStats, PerTeam};

/// A scored fairness factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    /// Total of a per-team statistic.
    Count(StatKind),
    /// Spread of a per-team statistic across teams.
    Deviation(StatKind),
    EarlyLate,
    UnevenTeamUnhappiness,
    MatchupImbalance,
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Count(kind) => write!(f, "{}_count", kind.name()),
            Factor::Deviation(kind) => write!(f, "{}_deviation", kind.name()),
            Factor::EarlyLate => f.write_str("early_late_deviation"),
            Factor::UnevenTeamUnhappiness => f.write_str("uneven_team_unhappiness"),
            Factor::MatchupImbalance => f.write_str("matchup_imbalance"),
        }
    }
}

/// Full score of one combination, factor by factor.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Sub-score of every enabled factor, in evaluation order.
    pub components: Vec<(Factor, f64)>,
    pub total: f64,
    /// Per-team statistics summed over all rounds.
    pub per_team: Vec<(StatKind, Vec<u32>)>,
    /// Meetings between each pair of teams over all rounds.
    pub team_matchups: Vec<Vec<u32>>,
}

impl ScoreBreakdown {
    pub fn component(&self, factor: Factor) -> Option<f64> {
        self.components
            .iter()
            .find(|(f, _)| *f == factor)
            .map(|(_, score)| *score)
    }

    pub fn per_team(&self, kind: StatKind) -> Option<&[u32]> {
        self.per_team
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, values)| values.as_slice())
    }
}

// Order in which the count/deviation factors are folded in.
const HEADER_AND_BYE_STATS: [StatKind; 5] = [
    StatKind::DoubleHeaders,
    StatKind::TripleHeaders,
    StatKind::TotalSlots,
    StatKind::DoubleByes,
    StatKind::TripleByes,
];

/// Folds per-option statistics of a combination into one unfairness score.
///
/// Higher is worse. After each factor the running score is compared with
/// `stop_if_above`; once it is exceeded the partial score is returned.
/// Weights are non-negative, so a partial score exceeds the threshold only
/// when the full score does.
#[derive(Debug, Clone)]
pub struct ComboScorer {
    plan: StatPlan,
    team_count: usize,
    matchup_range: MatchupRange,
}

impl ComboScorer {
    /// Creates a scorer for combinations playing `games_per_combo` matchups
    /// in total.
    pub fn new(plan: StatPlan, team_count: usize, games_per_combo: usize) -> Self {
        let matchup_range = plan
            .matchup_range()
            .unwrap_or_else(|| expected_matchup_range(team_count, games_per_combo));
        Self {
            plan,
            team_count,
            matchup_range,
        }
    }

    pub fn plan(&self) -> &StatPlan {
        &self.plan
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn matchup_range(&self) -> MatchupRange {
        self.matchup_range
    }

    /// Scores `combo`, stopping early once the score exceeds `stop_if_above`.
    pub fn score(&self, combo: &[&OptionStats], stop_if_above: f64) -> f64 {
        let mut totals = Totals::new(combo, self.team_count);
        self.evaluate(&mut totals, stop_if_above, None)
    }

    /// Scores `combo` without early exit.
    pub fn full_score(&self, combo: &[&OptionStats]) -> f64 {
        self.score(combo, f64::INFINITY)
    }

    /// Scores `combo` without early exit and records every sub-score.
    pub fn breakdown(&self, combo: &[&OptionStats]) -> ScoreBreakdown {
        let mut totals = Totals::new(combo, self.team_count);
        let mut components = Vec::new();
        let total = self.evaluate(&mut totals, f64::INFINITY, Some(&mut components));

        let per_team = StatKind::ALL
            .into_iter()
            .filter(|&kind| self.plan.requires(kind))
            .map(|kind| (kind, totals.get(kind).to_vec()))
            .collect();

        let n = self.team_count;
        let team_matchups = (0..n)
            .map(|a| {
                (0..n)
                    .map(|b| combo.iter().map(|o| o.meetings(a, b)).sum())
                    .collect()
            })
            .collect();

        ScoreBreakdown {
            components,
            total,
            per_team,
            team_matchups,
        }
    }

    fn evaluate(
        &self,
        totals: &mut Totals<'_>,
        stop_if_above: f64,
        mut record: Option<&mut Vec<(Factor, f64)>>,
    ) -> f64 {
        let mut score = 0.0;
        let mut fold = |factor: Factor, value: f64, score: &mut f64| {
            *score += value;
            if let Some(log) = record.as_deref_mut() {
                log.push((factor, value));
            }
        };

        for kind in HEADER_AND_BYE_STATS {
            let count = self.plan.count_weight(kind);
            let deviation = self.plan.deviation_weight(kind);
            if count.is_none() && deviation.is_none() {
                continue;
            }
            let values = totals.get(kind);
            if let Some(w) = count {
                fold(Factor::Count(kind), sum(values) * w, &mut score);
                if score > stop_if_above {
                    return score;
                }
            }
            if let Some(w) = deviation {
                fold(Factor::Deviation(kind), stdev(values) * w, &mut score);
                if score > stop_if_above {
                    return score;
                }
            }
        }

        if let Some(w) = self.plan.early_late_deviation() {
            let early = stdev(totals.get(StatKind::Early)) * w / 2.0;
            let late = stdev(totals.get(StatKind::Late)) * w / 2.0;
            fold(Factor::EarlyLate, early + late, &mut score);
            if score > stop_if_above {
                return score;
            }
        }

        if let Some(w) = self.plan.unhappiness() {
            let mut pain: SmallPain = SmallPain::from_elem(0.0, self.team_count);
            for kind in StatKind::ALL {
                if let Some(kw) = self.plan.unhappiness_weight(kind) {
                    for (team, &v) in totals.get(kind).iter().enumerate() {
                        pain[team] += f64::from(v) * kw;
                    }
                }
            }
            fold(Factor::UnevenTeamUnhappiness, stdev(&pain) * w, &mut score);
            if score > stop_if_above {
                return score;
            }
        }

        if let Some(w) = self.plan.matchup_imbalance() {
            let imbalance = self.matchup_imbalance(totals.combo);
            fold(Factor::MatchupImbalance, imbalance as f64 * w, &mut score);
        }

        score
    }

    // Meetings outside the expected range, summed over all team pairs.
    fn matchup_imbalance(&self, combo: &[&OptionStats]) -> u32 {
        let MatchupRange { min, max } = self.matchup_range;
        let mut imbalance = 0;
        for a in 0..self.team_count {
            for b in (a + 1)..self.team_count {
                let met: u32 = combo.iter().map(|o| o.meetings(a, b)).sum();
                if met < min {
                    imbalance += min - met;
                } else if met > max {
                    imbalance += met - max;
                }
            }
        }
        imbalance
    }
}

type SmallPain = smallvec::SmallVec<[f64; 16]>;

/// `floor(T/P)..=ceil(T/P)` meetings for `T` games over `P` team pairs.
pub fn expected_matchup_range(team_count: usize, games_per_combo: usize) -> MatchupRange {
    let pairs = team_count * team_count.saturating_sub(1) / 2;
    if pairs == 0 {
        return MatchupRange { min: 0, max: 0 };
    }
    let min = games_per_combo / pairs;
    let max = games_per_combo.div_ceil(pairs);
    MatchupRange {
        min: min as u32,
        max: max as u32,
    }
}

// Lazily summed per-team statistics of one combination.
struct Totals<'a> {
    combo: &'a [&'a OptionStats],
    team_count: usize,
    cache: [Option<PerTeam>; StatKind::COUNT],
}

impl<'a> Totals<'a> {
    fn new(combo: &'a [&'a OptionStats], team_count: usize) -> Self {
        Self {
            combo,
            team_count,
            cache: Default::default(),
        }
    }

    fn get(&mut self, kind: StatKind) -> &PerTeam {
        let combo = self.combo;
        let n = self.team_count;
        self.cache[kind.index()].get_or_insert_with(|| {
            let mut total = PerTeam::from_elem(0, n);
            for option in combo {
                if let Some(values) = option.get(kind) {
                    for (team, &v) in values.iter().enumerate() {
                        total[team] += v;
                    }
                }
            }
            total
        })
    }
}

#[cfg(test)]
mod tests;
