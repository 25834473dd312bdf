//! Tests for combo scoring.

use super::*;
use crate::math::stdev;
use crate::stats::StatsEngine;
use fairslot_config::{PainMultipliers, StatsConfig};
use fairslot_core::OptionSet;
use fairslot_test::{
    every_factor, four_team_double_rounds, four_team_single_game_rounds, random_combo,
    seeded_rng, totals_only,
};

fn prepare(set: &OptionSet, pain: &PainMultipliers) -> (ComboScorer, Vec<Vec<OptionStats>>) {
    let plan = StatPlan::new(pain);
    let engine = StatsEngine::new(plan.clone(), StatsConfig::default(), set.games());
    let stats = engine.compute_all(set).unwrap();
    let games_per_combo = set
        .options_by_round()
        .iter()
        .map(|options| options[0].slot_count())
        .sum();
    let scorer = ComboScorer::new(plan, set.team_count(), games_per_combo);
    (scorer, stats)
}

fn pick<'a>(stats: &'a [Vec<OptionStats>], indices: &[usize]) -> Vec<&'a OptionStats> {
    indices
        .iter()
        .enumerate()
        .map(|(round, &i)| &stats[round][i])
        .collect()
}

// ============================================================================
// Early exit
// ============================================================================

mod early_exit {
    use super::*;

    #[test]
    fn test_pruned_decision_matches_full_score() {
        let set = four_team_double_rounds();
        let (scorer, stats) = prepare(&set, &every_factor());
        let mut rng = seeded_rng(42);

        for _ in 0..200 {
            let indices = random_combo(&mut rng, &set.option_counts());
            let combo = pick(&stats, &indices);
            let full = scorer.full_score(&combo);

            for stop in [0.0, full * 0.25, full * 0.5, full, full * 2.0] {
                let partial = scorer.score(&combo, stop);
                assert!(partial <= full, "partial {partial} above full {full}");
                assert_eq!(partial > stop, full > stop, "stop {stop}");
                if partial <= stop {
                    assert_eq!(partial, full);
                }
            }
        }
    }

    #[test]
    fn test_any_positive_score_exits_after_first_factor() {
        let set = four_team_double_rounds();
        let mut pain = PainMultipliers::none();
        pain.total_slot_count = Some(1.0);
        pain.double_bye_deviation = Some(100.0);
        let (scorer, stats) = prepare(&set, &pain);

        let combo = pick(&stats, &[0, 0, 0]);
        let partial = scorer.score(&combo, 0.0);
        let breakdown = scorer.breakdown(&combo);
        // total slot count is positive for every combo, so nothing after it runs
        assert_eq!(
            Some(partial),
            breakdown.component(Factor::Count(StatKind::TotalSlots))
        );
        assert!(partial > 0.0);
        assert!(partial <= breakdown.total);
    }
}

// ============================================================================
// Factors
// ============================================================================

mod factors {
    use super::*;

    #[test]
    fn test_single_game_rounds_are_perfectly_even() {
        let set = four_team_single_game_rounds();
        let (scorer, stats) = prepare(&set, &totals_only());
        for a in 0..2 {
            for b in 0..2 {
                for c in 0..2 {
                    let combo = pick(&stats, &[a, b, c]);
                    assert_eq!(scorer.full_score(&combo), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let set = four_team_double_rounds();
        let (scorer, stats) = prepare(&set, &every_factor());
        let mut rng = seeded_rng(9);
        for _ in 0..50 {
            let indices = random_combo(&mut rng, &set.option_counts());
            let combo = pick(&stats, &indices);
            let breakdown = scorer.breakdown(&combo);
            let summed: f64 = breakdown.components.iter().map(|(_, v)| v).sum();
            assert!((summed - breakdown.total).abs() < 1e-9);
            assert_eq!(breakdown.total, scorer.full_score(&combo));
            assert_eq!(breakdown.components.len(), 13);
        }
    }

    #[test]
    fn test_count_and_deviation_use_round_totals() {
        let set = four_team_double_rounds();
        let mut pain = PainMultipliers::none();
        pain.double_header_count = Some(2.0);
        pain.double_header_deviation = Some(3.0);
        let (scorer, stats) = prepare(&set, &pain);

        let indices = [5, 11, 17];
        let combo = pick(&stats, &indices);
        let mut totals = [0u32; 4];
        for option in &combo {
            for (team, v) in option
                .get(StatKind::DoubleHeaders)
                .unwrap()
                .iter()
                .enumerate()
            {
                totals[team] += v;
            }
        }
        let expected = totals.iter().sum::<u32>() as f64 * 2.0 + stdev(&totals) * 3.0;
        assert!((scorer.full_score(&combo) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unhappiness_pulls_in_disabled_stats() {
        let set = four_team_double_rounds();
        let mut pain = PainMultipliers::none();
        pain.uneven_team_unhappiness = Some(2.0);
        pain.unhappiness.total_slots = Some(1.0);
        let (scorer, stats) = prepare(&set, &pain);

        let combo = pick(&stats, &[1, 2, 3]);
        let breakdown = scorer.breakdown(&combo);
        let totals = breakdown.per_team(StatKind::TotalSlots).unwrap();
        let expected = stdev(totals) * 2.0;
        assert_eq!(breakdown.components.len(), 1);
        assert!((breakdown.total - expected).abs() < 1e-12);
    }

    #[test]
    fn test_matchup_balance() {
        // every pair meets exactly twice across the three double rounds
        let set = four_team_double_rounds();
        let mut pain = PainMultipliers::none();
        pain.matchup_imbalance = Some(5.0);
        let (scorer, stats) = prepare(&set, &pain);
        assert_eq!(scorer.matchup_range(), MatchupRange { min: 2, max: 2 });

        let combo = pick(&stats, &[0, 0, 0]);
        assert_eq!(scorer.full_score(&combo), 0.0);
        let breakdown = scorer.breakdown(&combo);
        assert_eq!(breakdown.team_matchups[0][1], 2);
        assert_eq!(breakdown.team_matchups[3][2], 2);
        assert_eq!(breakdown.team_matchups[1][1], 0);

        pain.matchup_range = Some(MatchupRange { min: 3, max: 4 });
        let (scorer, stats) = prepare(&set, &pain);
        let combo = pick(&stats, &[0, 0, 0]);
        // six pairs, each one meeting short
        assert_eq!(scorer.full_score(&combo), 30.0);
    }

    #[test]
    fn test_expected_range() {
        assert_eq!(
            expected_matchup_range(4, 12),
            MatchupRange { min: 2, max: 2 }
        );
        assert_eq!(
            expected_matchup_range(6, 54),
            MatchupRange { min: 3, max: 4 }
        );
        assert_eq!(expected_matchup_range(1, 0), MatchupRange { min: 0, max: 0 });
    }

    #[test]
    fn test_factor_names() {
        assert_eq!(
            Factor::Count(StatKind::DoubleByes).to_string(),
            "double_byes_count"
        );
        assert_eq!(
            Factor::Deviation(StatKind::TotalSlots).to_string(),
            "total_slots_deviation"
        );
        assert_eq!(
            Factor::UnevenTeamUnhappiness.to_string(),
            "uneven_team_unhappiness"
        );
    }
}
