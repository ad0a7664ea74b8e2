//! Policy trait definition.

use std::fmt;

use crate::domain::player_view::{BidContext, LeadContext, ResponseContext};
use crate::domain::Card;

/// Errors that can occur during policy decision-making.
#[derive(Debug)]
pub enum PolicyError {
    /// Policy encountered an internal error
    Internal(String),
    /// Policy could not produce a move from the given context
    InvalidMove(String),
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::Internal(msg) => write!(f, "policy internal error: {msg}"),
            PolicyError::InvalidMove(msg) => write!(f, "policy invalid move: {msg}"),
        }
    }
}

impl std::error::Error for PolicyError {}

/// Trait for seat policies.
///
/// Implementations receive the read-only context for the decision at hand
/// and must return a legal action. The policy is responsible for querying
/// the legal sets on the context; the caller validates the returned action
/// against the engine and treats a rejection as fatal for the run.
pub trait Policy: Send + Sync {
    /// Choose a bid for the round.
    ///
    /// Any value is accepted by the engine; sensible policies stay within
    /// `0..=hand size`.
    fn decide_bid(&self, ctx: &BidContext<'_>) -> Result<i32, PolicyError>;

    /// Choose the card to open the current trick with. Any card in hand
    /// is legal.
    fn decide_lead(&self, ctx: &LeadContext<'_>) -> Result<Card, PolicyError>;

    /// Choose the card to answer the current trick with.
    ///
    /// The card must come from `ctx.legal_cards()`.
    fn decide_response(&self, ctx: &ResponseContext<'_>) -> Result<Card, PolicyError>;

    /// Stable policy name for reporting.
    fn name(&self) -> &'static str;
}
