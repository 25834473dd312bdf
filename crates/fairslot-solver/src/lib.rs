//! fairslot Solver Engine
//!
//! This crate provides the two search stages:
//! - Round-robin partitioning of matchups into rounds
//! - Option generation (permutation enumeration plus lineup validation)
//! - Mixed-radix combination addressing
//! - Exhaustive and partitioned combination search
//! - Search statistics

pub mod codec;
pub mod permutation;
pub mod problem;
pub mod repository;
pub mod round_robin;
pub mod search;
pub mod stats;
pub mod validator;

pub use codec::ComboCodec;
pub use permutation::{permutation_count, Permutations};
pub use problem::PreparedProblem;
pub use repository::OptionRepository;
pub use round_robin::{rotation_groups, RoundRobinPartitioner};
pub use search::{
    search, BestCombo, ExhaustiveSearch, Offer, PartitionedSearch, SearchPhase, SearchResult,
    SearchScope, WorkerFailure,
};
pub use stats::SearchStats;
pub use validator::{LineupValidator, RejectReason, Rejection};
