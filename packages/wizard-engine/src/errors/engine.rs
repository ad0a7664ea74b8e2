//! Engine-level error type used across the domain layer.
//!
//! Callers that drive whole simulations should wrap this in their own
//! error type; a `Validation` produced while acting on a policy's chosen
//! card or bid is evidence of a non-conformant policy and the run must
//! not continue past it.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds to distinguish rejected actions
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Action arrived in a phase that does not accept it
    PhaseMismatch,
    /// Action arrived from a seat whose turn it is not
    OutOfTurn,
    /// Played card is not in the acting player's hand
    CardNotInHand,
    /// Played card's kind is outside the legal response kinds
    ResponseKindNotLegal,
    /// Deal would need more cards than the deck holds
    InsufficientCards,
    /// Deal requested for a table with no seats
    NoPlayers,
    /// No rounds remain to be started
    RoundsExhausted,
    Other(String),
}

/// Central engine error type
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    /// Rejected action or rule violation
    Validation(ValidationKind, String),
    /// Internal state that should have been set was not
    Invariant(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            EngineError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            EngineError::Invariant(d) => write!(f, "invariant violated: {d}"),
        }
    }
}

impl Error for EngineError {}

impl EngineError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }
}
