//! Everything the search phases share read-only.

use fairslot_config::{FairslotConfig, PainMultipliers, StatsConfig};
use fairslot_core::{ComboIndex, Matchup, OptionSet, Result};
use fairslot_scoring::{ComboScorer, OptionStats, ScoreBreakdown, StatPlan, StatsEngine};

use crate::codec::ComboCodec;

/// An option set with precomputed stats, a scorer and a codec.
///
/// Built once before search; workers borrow it.
#[derive(Debug)]
pub struct PreparedProblem {
    options: OptionSet,
    stats: Vec<Vec<OptionStats>>,
    scorer: ComboScorer,
    codec: ComboCodec,
}

impl PreparedProblem {
    /// Checks the option set, computes every option's stats and sizes the
    /// combination space.
    pub fn new(options: OptionSet, stats_config: &StatsConfig, pain: &PainMultipliers) -> Result<Self> {
        options.check_complete()?;
        let plan = StatPlan::new(pain);
        let engine = StatsEngine::new(plan.clone(), stats_config.clone(), options.games());
        let stats = engine.compute_all(&options)?;
        let codec = ComboCodec::new(&options.option_counts())?;

        let games_per_combo = options
            .options_by_round()
            .iter()
            .filter_map(|round| round.first())
            .map(|lineup| lineup.slot_count())
            .sum();
        let scorer = ComboScorer::new(plan, options.team_count(), games_per_combo);

        Ok(Self {
            options,
            stats,
            scorer,
            codec,
        })
    }

    pub fn from_config(options: OptionSet, config: &FairslotConfig) -> Result<Self> {
        Self::new(options, &config.stats, &config.pain)
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn scorer(&self) -> &ComboScorer {
        &self.scorer
    }

    pub fn codec(&self) -> &ComboCodec {
        &self.codec
    }

    pub fn round_count(&self) -> usize {
        self.codec.round_count()
    }

    pub fn total_combinations(&self) -> u64 {
        self.codec.total_combinations()
    }

    /// Fills `combo` with the stats of the options named by `indices`.
    ///
    /// `indices` must come from the codec, so every index is in range.
    pub fn gather<'a>(&'a self, indices: &[usize], combo: &mut Vec<&'a OptionStats>) {
        combo.clear();
        combo.extend(
            indices
                .iter()
                .zip(&self.stats)
                .map(|(&index, round)| &round[index]),
        );
    }

    /// Scores the combination at `indices` with early exit above `stop_if_above`.
    pub fn score(&self, indices: &[usize], stop_if_above: f64) -> f64 {
        let mut combo = Vec::with_capacity(self.stats.len());
        self.gather(indices, &mut combo);
        self.scorer.score(&combo, stop_if_above)
    }

    pub fn full_score(&self, indices: &[usize]) -> f64 {
        self.score(indices, f64::INFINITY)
    }

    pub fn breakdown(&self, combo_index: ComboIndex) -> Result<ScoreBreakdown> {
        let indices = self.codec.indices_from_combo_index(combo_index)?;
        let mut combo = Vec::with_capacity(self.stats.len());
        self.gather(&indices, &mut combo);
        Ok(self.scorer.breakdown(&combo))
    }

    /// The matchups played per round and slot.
    pub fn schedule(&self, combo_index: ComboIndex) -> Result<Vec<Vec<Matchup>>> {
        let indices = self.codec.indices_from_combo_index(combo_index)?;
        self.options.schedule(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairslot_core::FairslotError;
    use fairslot_test::{four_team_double_rounds, totals_only};

    #[test]
    fn test_prepare_double_rounds() {
        let problem =
            PreparedProblem::new(four_team_double_rounds(), &StatsConfig::default(), &totals_only())
                .unwrap();
        assert_eq!(problem.round_count(), 3);
        assert_eq!(problem.total_combinations(), 24 * 24 * 24);

        let schedule = problem.schedule(0).unwrap();
        assert_eq!(schedule.len(), 3);
        assert!(schedule.iter().all(|round| round.len() == 4));

        let breakdown = problem.breakdown(0).unwrap();
        assert_eq!(breakdown.total, problem.full_score(&[0, 0, 0]));
    }

    #[test]
    fn test_incomplete_option_set_rejected() {
        let set = OptionSet::new(Matchup::all_pairs(4), vec![Vec::new()]);
        assert!(matches!(
            PreparedProblem::new(set, &StatsConfig::default(), &totals_only()),
            Err(FairslotError::NoValidOptions { round: 0 })
        ));
    }

    #[test]
    fn test_imported_lineup_with_unsorted_slots_rejected() {
        use fairslot_core::{Lineup, TeamSlots};

        let slots: Vec<TeamSlots> = [[2, 0], [0, 3], [1, 2], [1, 3]]
            .iter()
            .map(|s| TeamSlots::from_slice(s))
            .collect();
        let set = OptionSet::new(
            Matchup::all_pairs(4),
            vec![vec![Lineup::new(vec![0, 5, 1, 4], slots)]],
        );
        assert!(matches!(
            PreparedProblem::new(set, &StatsConfig::default(), &totals_only()),
            Err(FairslotError::Config(_))
        ));
    }
}
