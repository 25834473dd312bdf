//! One strided scan of the combination space.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crossbeam::channel::{Receiver, Sender};

use fairslot_core::{ComboIndex, Result};

use super::message::{CoordinatorMessage, WorkerMessage};
use crate::problem::PreparedProblem;

// Combinations between inbox drains.
const SYNC_CHECK_MASK: u64 = (1 << 10) - 1;

/// Scans `combo_index % worker_count == id`, from the first such index at or
/// after `start`.
pub(crate) struct SearchWorker<'a> {
    id: usize,
    worker_count: usize,
    problem: &'a PreparedProblem,
    start: ComboIndex,
    best: f64,
    sync_interval: Duration,
    outbox: Sender<WorkerMessage>,
    inbox: Receiver<CoordinatorMessage>,
}

impl<'a> SearchWorker<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: usize,
        worker_count: usize,
        problem: &'a PreparedProblem,
        start: ComboIndex,
        best: f64,
        sync_interval: Duration,
        outbox: Sender<WorkerMessage>,
        inbox: Receiver<CoordinatorMessage>,
    ) -> Self {
        Self {
            id,
            worker_count,
            problem,
            start,
            best,
            sync_interval,
            outbox,
            inbox,
        }
    }

    /// First index of this worker's stride.
    pub(crate) fn first_index(&self) -> Option<ComboIndex> {
        let stride = self.worker_count as u64;
        let offset = (self.id as u64 + stride - self.start % stride) % stride;
        self.start.checked_add(offset)
    }

    /// Scans the stride and reports `Complete`, or `Failed` on an error or
    /// panic.
    pub(crate) fn run(mut self) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.scan()));
        let worker_id = self.id;
        let message = match outcome {
            Ok(Ok(evaluated)) => WorkerMessage::Complete {
                worker_id,
                evaluated,
            },
            Ok(Err(err)) => WorkerMessage::Failed {
                worker_id,
                message: err.to_string(),
            },
            Err(payload) => WorkerMessage::Failed {
                worker_id,
                message: panic_message(payload.as_ref()),
            },
        };
        let _ = self.outbox.send(message);
    }

    fn scan(&mut self) -> Result<u64> {
        let problem = self.problem;
        let codec = problem.codec();
        let total = codec.total_combinations();
        let stride = self.worker_count as u64;

        let mut indices = vec![0; codec.round_count()];
        let mut combo = Vec::with_capacity(codec.round_count());
        let mut evaluated = 0u64;
        let mut last_sync = Instant::now();

        let Some(mut combo_index) = self.first_index() else {
            return Ok(0);
        };
        while combo_index < total {
            codec.decode_into(combo_index, &mut indices)?;
            problem.gather(&indices, &mut combo);
            let score = problem.scorer().score(&combo, self.best);
            evaluated += 1;
            if score <= self.best {
                self.best = score;
                let _ = self.outbox.send(WorkerMessage::Better {
                    worker_id: self.id,
                    combo_index,
                    indices: indices.clone(),
                    score,
                });
            }

            if evaluated & SYNC_CHECK_MASK == 0 {
                self.drain_inbox();
                if last_sync.elapsed() >= self.sync_interval {
                    last_sync = Instant::now();
                    let _ = self.outbox.send(WorkerMessage::Progress {
                        worker_id: self.id,
                        evaluated,
                    });
                }
            }

            combo_index = match combo_index.checked_add(stride) {
                Some(next) => next,
                None => break,
            };
        }
        Ok(evaluated)
    }

    fn drain_inbox(&mut self) {
        while let Ok(CoordinatorMessage::UpdateBestScore(score)) = self.inbox.try_recv() {
            self.best = self.best.min(score);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::unbounded;
    use fairslot_config::StatsConfig;
    use fairslot_test::{four_team_single_game_rounds, totals_only};

    fn worker(problem: &PreparedProblem, id: usize, count: usize, start: u64) -> SearchWorker<'_> {
        let (outbox, _) = unbounded();
        let (_, inbox) = unbounded();
        SearchWorker::new(id, count, problem, start, f64::INFINITY, Duration::ZERO, outbox, inbox)
    }

    #[test]
    fn test_first_index_is_next_in_residue_class() {
        let problem = PreparedProblem::new(
            four_team_single_game_rounds(),
            &StatsConfig::default(),
            &totals_only(),
        )
        .unwrap();
        assert_eq!(worker(&problem, 0, 3, 0).first_index(), Some(0));
        assert_eq!(worker(&problem, 2, 3, 0).first_index(), Some(2));
        assert_eq!(worker(&problem, 0, 3, 4).first_index(), Some(6));
        assert_eq!(worker(&problem, 1, 3, 4).first_index(), Some(4));
        assert_eq!(worker(&problem, 2, 3, 4).first_index(), Some(5));
    }

    #[test]
    fn test_run_reports_every_strided_combo() {
        let problem = PreparedProblem::new(
            four_team_single_game_rounds(),
            &StatsConfig::default(),
            &totals_only(),
        )
        .unwrap();
        let (outbox, results) = unbounded();
        let (_inbox_tx, inbox) = unbounded();
        SearchWorker::new(1, 3, &problem, 0, f64::INFINITY, Duration::from_secs(60), outbox, inbox)
            .run();

        let messages: Vec<WorkerMessage> = results.try_iter().collect();
        // indices 1, 4 and 7 all score zero and are each reported
        let better: Vec<u64> = messages
            .iter()
            .filter_map(|m| match m {
                WorkerMessage::Better { combo_index, .. } => Some(*combo_index),
                _ => None,
            })
            .collect();
        assert_eq!(better, vec![1, 4, 7]);
        assert_eq!(
            messages.last(),
            Some(&WorkerMessage::Complete {
                worker_id: 1,
                evaluated: 3
            })
        );
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "panicked: boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bad index"));
        assert_eq!(panic_message(payload.as_ref()), "panicked: bad index");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(payload.as_ref()), "panicked");
    }
}
