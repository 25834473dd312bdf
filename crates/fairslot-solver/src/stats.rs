//! Search statistics.

use std::time::{Duration, Instant};

/// Counters for one search run.
///
/// # Example
///
/// ```
/// use fairslot_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_combos(1_000);
/// stats.record_improvement();
/// stats.record_tie();
///
/// assert_eq!(stats.combos_evaluated, 1_000);
/// assert_eq!(stats.improvements, 1);
/// assert_eq!(stats.ties, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    start_time: Option<Instant>,
    elapsed: Option<Duration>,
    /// Combinations scored (pruned or not).
    pub combos_evaluated: u64,
    /// Strict improvements of the best score.
    pub improvements: u64,
    /// Candidates that equalled the best score.
    pub ties: u64,
}

impl SearchStats {
    /// Marks the start of searching.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed = None;
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed = Some(self.running_time());
    }

    /// Time since [`start`](Self::start), frozen once finished.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.running_time())
    }

    pub fn record_combos(&mut self, count: u64) {
        self.combos_evaluated += count;
    }

    pub fn record_improvement(&mut self) {
        self.improvements += 1;
    }

    pub fn record_tie(&mut self) {
        self.ties += 1;
    }

    pub fn combos_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.combos_evaluated as f64 / secs
        } else {
            0.0
        }
    }

    fn running_time(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstarted_is_zero() {
        let stats = SearchStats::default();
        assert_eq!(stats.elapsed(), Duration::ZERO);
        assert_eq!(stats.combos_per_second(), 0.0);
    }

    #[test]
    fn test_finish_freezes_elapsed() {
        let mut stats = SearchStats::default();
        stats.start();
        std::thread::sleep(Duration::from_millis(5));
        stats.finish();
        let frozen = stats.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(stats.elapsed(), frozen);
        assert!(frozen >= Duration::from_millis(5));
    }
}
