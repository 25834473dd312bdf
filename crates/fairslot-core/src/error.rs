//! Error types for fairslot

use thiserror::Error;

use crate::domain::TeamId;

/// Main error type for fairslot operations
#[derive(Debug, Error)]
pub enum FairslotError {
    /// Error in league or search configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Round-robin partitioning needs an even number of teams
    #[error("Round-robin partitioning requires an even team count, got {0}")]
    OddTeamCount(usize),

    /// A round admits no lineup under the validation rules
    #[error("Round {round} has no valid options under the validation rules")]
    NoValidOptions { round: usize },

    /// An option has no slot data for a team
    #[error("Option {option} in round {round} has no slots for team {team}")]
    MissingTeam {
        round: usize,
        option: usize,
        team: TeamId,
    },

    /// Combination arithmetic exceeded the index type
    #[error("Overflow: {0}")]
    Overflow(String),

    /// A combo index or index vector lies outside the combination space
    #[error("Combination out of range: {0}")]
    ComboOutOfRange(String),

    /// A search worker stopped before scanning its stride
    #[error("Worker {worker_id} failed: {message}")]
    WorkerFailed { worker_id: usize, message: String },
}

/// Result type alias for fairslot operations
pub type Result<T> = std::result::Result<T, FairslotError>;
