//! Single-threaded odometer walk.

use std::time::Instant;

use tracing::info;

use fairslot_core::Result;

use super::{SearchPhase, SearchScope};

// Combinations between clock checks.
const CLOCK_CHECK_MASK: u64 = (1 << 12) - 1;

/// Scores every combination from the start index upward.
///
/// The running best is the early-exit threshold, so most candidates stop
/// after a factor or two.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveSearch;

impl ExhaustiveSearch {
    pub fn new() -> Self {
        Self
    }
}

impl SearchPhase for ExhaustiveSearch {
    fn search(&mut self, scope: &mut SearchScope<'_>) -> Result<()> {
        let problem = scope.problem();
        let codec = problem.codec();
        let total = codec.total_combinations();
        let start = scope.start_index();
        let interval = scope.progress_interval();

        let mut indices = codec.indices_from_combo_index(start)?;
        let mut combo = Vec::with_capacity(codec.round_count());
        let mut combo_index = start;
        let mut evaluated = 0u64;
        let started = Instant::now();
        let mut last_report = started;

        loop {
            problem.gather(&indices, &mut combo);
            let best = scope.best_score();
            let score = problem.scorer().score(&combo, best);
            evaluated += 1;
            if score <= best {
                scope.offer(combo_index, &indices, score);
            }

            if evaluated & CLOCK_CHECK_MASK == 0 && last_report.elapsed() >= interval {
                last_report = Instant::now();
                info!(
                    event = "progress",
                    evaluated = evaluated,
                    total = total - start,
                    combo_index = combo_index,
                    speed = (evaluated as f64 / started.elapsed().as_secs_f64()) as u64,
                    score = scope.best_score(),
                );
            }

            if !codec.increment(&mut indices) {
                break;
            }
            combo_index += 1;
        }

        scope.stats_mut().record_combos(evaluated);
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "Exhaustive"
    }
}
