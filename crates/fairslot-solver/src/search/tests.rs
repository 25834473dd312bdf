//! Tests for the search strategies.

use super::*;
use fairslot_config::{StatsConfig, WorkerCount};
use fairslot_core::ComboPosition;
use fairslot_test::{every_factor, four_team_double_rounds, four_team_single_game_rounds, totals_only};

fn double_rounds() -> PreparedProblem {
    PreparedProblem::new(four_team_double_rounds(), &StatsConfig::default(), &every_factor())
        .unwrap()
}

fn exhaustive() -> SearchConfig {
    SearchConfig::default()
}

fn partitioned(workers: usize) -> SearchConfig {
    SearchConfig {
        strategy: SearchStrategy::Partitioned,
        worker_count: WorkerCount::Count(workers),
        ..SearchConfig::default()
    }
}

// Lowest full score at or after `start`, first index among equals.
fn brute_force_best(problem: &PreparedProblem, start: u64) -> (u64, f64) {
    let codec = problem.codec();
    let mut best = (start, f64::INFINITY);
    for combo_index in start..codec.total_combinations() {
        let indices = codec.indices_from_combo_index(combo_index).unwrap();
        let score = problem.full_score(&indices);
        if score < best.1 {
            best = (combo_index, score);
        }
    }
    best
}

// ============================================================================
// Exhaustive
// ============================================================================

mod exhaustive_search {
    use super::*;

    #[test]
    fn test_single_game_rounds_are_even() {
        let problem = PreparedProblem::new(
            four_team_single_game_rounds(),
            &StatsConfig::default(),
            &totals_only(),
        )
        .unwrap();
        let result = search(&problem, &exhaustive(), None).unwrap();
        let best = result.best.clone().unwrap();
        assert_eq!(best.combo_index, 0);
        assert_eq!(best.score, 0.0);
        assert_eq!(result.stats.combos_evaluated, 8);
        assert_eq!(result.stats.improvements, 1);
        assert_eq!(result.stats.ties, 7);

        let breakdown = problem.breakdown(best.combo_index).unwrap();
        assert_eq!(breakdown.total, best.score);
    }

    #[test]
    fn test_matches_brute_force() {
        let problem = double_rounds();
        let (combo_index, score) = brute_force_best(&problem, 0);
        let result = search(&problem, &exhaustive(), None).unwrap();
        let best = result.best.clone().unwrap();
        assert_eq!(best.combo_index, combo_index);
        assert_eq!(best.score, score);
        assert_eq!(
            best.indices,
            problem.codec().indices_from_combo_index(combo_index).unwrap()
        );
        assert_eq!(result.stats.combos_evaluated, 24 * 24 * 24);
        assert!(result.is_complete());
    }

    #[test]
    fn test_resume_from_start() {
        let problem = double_rounds();
        let start = 5_000;
        let (combo_index, score) = brute_force_best(&problem, start);
        let config = SearchConfig {
            start: Some(ComboPosition::Index(start)),
            ..exhaustive()
        };
        let result = search(&problem, &config, None).unwrap();
        let best = result.best.clone().unwrap();
        assert!(best.combo_index >= start);
        assert_eq!(best.combo_index, combo_index);
        assert_eq!(best.score, score);
        assert_eq!(result.start_index, start);
        assert_eq!(result.stats.combos_evaluated, 24 * 24 * 24 - start);
    }

    #[test]
    fn test_seed_is_kept_when_nothing_beats_it() {
        let problem = double_rounds();
        let (optimum, score) = brute_force_best(&problem, 0);
        let seed = problem.codec().indices_from_combo_index(optimum).unwrap();
        let config = SearchConfig {
            best: Some(ComboPosition::Indices(seed.clone())),
            ..exhaustive()
        };
        let result = search(&problem, &config, None).unwrap();
        let best = result.best.clone().unwrap();
        assert_eq!(best.indices, seed);
        assert_eq!(best.score, score);
        assert_eq!(result.stats.improvements, 0);
    }

    #[test]
    fn test_start_out_of_range() {
        let problem = double_rounds();
        let config = SearchConfig {
            start: Some(ComboPosition::Index(24 * 24 * 24)),
            ..exhaustive()
        };
        assert!(matches!(
            search(&problem, &config, None),
            Err(fairslot_core::FairslotError::ComboOutOfRange(_))
        ));
    }
}

// ============================================================================
// Partitioned
// ============================================================================

mod partitioned_search {
    use super::*;

    #[test]
    fn test_single_worker_matches_exhaustive() {
        let problem = double_rounds();
        let serial = search(&problem, &exhaustive(), None).unwrap();
        let parallel = search(&problem, &partitioned(1), None).unwrap();
        assert_eq!(parallel.best, serial.best);
        assert_eq!(parallel.stats.combos_evaluated, serial.stats.combos_evaluated);
        assert_eq!(parallel.stats.improvements, serial.stats.improvements);
    }

    #[test]
    fn test_several_workers_find_optimal_score() {
        let problem = double_rounds();
        let (_, score) = brute_force_best(&problem, 0);
        for workers in [2, 3, 7] {
            let result = search(&problem, &partitioned(workers), None).unwrap();
            let best = result.best.clone().unwrap();
            assert_eq!(best.score, score, "{workers} workers");
            assert_eq!(problem.full_score(&best.indices), score);
            assert_eq!(result.stats.combos_evaluated, 24 * 24 * 24);
            assert!(result.is_complete());
        }
    }

    #[test]
    fn test_resume_covers_tail_only() {
        let problem = double_rounds();
        let start = 10_001;
        let (_, score) = brute_force_best(&problem, start);
        let config = SearchConfig {
            start: Some(ComboPosition::Index(start)),
            ..partitioned(4)
        };
        let result = search(&problem, &config, None).unwrap();
        let best = result.best.clone().unwrap();
        assert!(best.combo_index >= start);
        assert_eq!(best.score, score);
        assert_eq!(result.stats.combos_evaluated, 24 * 24 * 24 - start);
    }

    #[test]
    fn test_more_workers_than_combos() {
        let problem = PreparedProblem::new(
            four_team_single_game_rounds(),
            &StatsConfig::default(),
            &totals_only(),
        )
        .unwrap();
        let result = search(&problem, &partitioned(16), None).unwrap();
        assert_eq!(result.best.clone().unwrap().score, 0.0);
        assert_eq!(result.stats.combos_evaluated, 8);
        assert!(result.is_complete());
    }
}

// ============================================================================
// Streaming
// ============================================================================

mod streaming {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_improvements_stream_in_decreasing_order() {
        let problem = double_rounds();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = search(&problem, &exhaustive(), Some(tx)).unwrap();

        let mut streamed = Vec::new();
        while let Some(best) = rx.recv().await {
            streamed.push(best);
        }
        assert_eq!(streamed.len() as u64, result.stats.improvements);
        assert!(streamed.windows(2).all(|w| w[1].score < w[0].score));
        assert_eq!(streamed.last(), result.best.as_ref());
    }
}
