//! Messages between the coordinator and search workers.

use fairslot_core::ComboIndex;

/// Worker to coordinator.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WorkerMessage {
    /// A candidate at or below the worker's local best.
    Better {
        worker_id: usize,
        combo_index: ComboIndex,
        indices: Vec<usize>,
        score: f64,
    },
    /// Combinations scored so far.
    Progress { worker_id: usize, evaluated: u64 },
    /// The worker's stride is exhausted.
    Complete { worker_id: usize, evaluated: u64 },
    Failed { worker_id: usize, message: String },
}

/// Coordinator to worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CoordinatorMessage {
    UpdateBestScore(f64),
}
