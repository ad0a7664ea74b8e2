//! Seat policies - automated bid and play decisions.
//!
//! This module provides:
//! - Policy trait for pluggable seat implementations
//! - RandomPolicy: uniformly random legal moves (seedable for tests)
//! - LadderPolicy: deterministic threshold bidder
//! - EstimatorPolicy: probability-driven bidder with an adaptive threshold
//! - Static factory registry for lookup by name

mod estimator;
mod ladder;
mod random;
mod registry;
mod trait_def;

pub use estimator::EstimatorPolicy;
pub use ladder::LadderPolicy;
pub use random::RandomPolicy;
pub use registry::{by_name, registered_policies, PolicyFactory};
pub use trait_def::{Policy, PolicyError};
