#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Engine for a Wizard-style sequential-bidding trick game.
//!
//! The [`domain`] module holds the deck, the rules, the round/game state
//! machine, trick resolution, scoring and the win-probability estimator;
//! [`ai`] holds the seat policies and their registry; [`errors`] the
//! engine error type. Everything is deterministic given the seeds fed to
//! dealing and to the seeded policies, and nothing here does IO.

pub mod ai;
pub mod domain;
pub mod errors;

// Re-exports for public API
pub use domain::{Card, CardId, CardIdAllocator, CardKind, GameState, Phase, PlayerId};
pub use errors::{EngineError, ValidationKind};
