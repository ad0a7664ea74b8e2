//! Random policy - makes random legal moves.
//!
//! This module provides [`RandomPolicy`], the reference implementation of
//! the [`Policy`](super::Policy) trait. It demonstrates the patterns a
//! policy implementation should follow:
//! - Thread-safe interior mutability using [`std::sync::Mutex`]
//! - Deterministic behavior via optional seeding
//! - Proper error handling without panics
//! - Use of the legal-set helpers on the decision contexts
//!
//! It also serves as the conformance baseline: a batch run where the
//! random policy trips a validation error is an engine bug, not a policy
//! bug.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{Policy, PolicyError};
use crate::domain::player_view::{BidContext, LeadContext, ResponseContext};
use crate::domain::Card;

/// Policy that makes uniformly random legal moves.
///
/// Bids land anywhere in `0..=hand size`; leads and responses are drawn
/// uniformly from the legal card set of the context.
pub struct RandomPolicy {
    /// Thread-safe random number generator.
    ///
    /// Wrapped in `Mutex` for interior mutability since `Policy` methods
    /// take `&self` but the RNG needs mutable access.
    rng: Mutex<StdRng>,
}

impl RandomPolicy {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    /// Create a new `RandomPolicy`.
    ///
    /// `Some(seed)` gives reproducible behavior for tests and seeded
    /// batches; `None` draws from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            StdRng::seed_from_u64(s)
        } else {
            StdRng::from_os_rng()
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn pick(&self, cards: &[Card], what: &str) -> Result<Card, PolicyError> {
        if cards.is_empty() {
            return Err(PolicyError::InvalidMove(format!("no legal {what} available")));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| PolicyError::Internal(format!("RNG lock poisoned: {e}")))?;
        cards
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| PolicyError::Internal(format!("failed to choose random {what}")))
    }
}

impl Policy for RandomPolicy {
    fn decide_bid(&self, ctx: &BidContext<'_>) -> Result<i32, PolicyError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| PolicyError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(rng.random_range(0..=ctx.hand.len() as i32))
    }

    fn decide_lead(&self, ctx: &LeadContext<'_>) -> Result<Card, PolicyError> {
        self.pick(&ctx.legal_cards(), "lead")
    }

    fn decide_response(&self, ctx: &ResponseContext<'_>) -> Result<Card, PolicyError> {
        self.pick(&ctx.legal_cards(), "response")
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
