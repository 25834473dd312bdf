//! Fairness statistics and early-exit combination scoring for fairslot.
//!
//! This crate provides:
//! - A stat plan deciding which per-team statistics are worth computing
//! - The stats engine that annotates every option once
//! - The combo scorer folding option stats into one unfairness score
//!
//! # Architecture
//!
//! Scores are plain `f64` where higher is worse. Every factor adds a
//! non-negative amount, so a running total can be compared against the best
//! score after each factor and abandoned as soon as it is exceeded.

pub mod math;
pub mod plan;
pub mod scorer;
pub mod stats;

pub use plan::{StatKind, StatPlan};
pub use scorer::{ComboScorer, Factor, ScoreBreakdown};
pub use stats::{OptionStats, PerTeam, StatsEngine};
