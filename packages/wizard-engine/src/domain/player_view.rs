//! Read-only snapshots handed to policies at decision points.
//!
//! # For AI Developers
//!
//! A policy never touches [`GameState`] directly. At each decision point
//! the caller builds one of these contexts from the live state and hands
//! it over: [`BidContext`] when a bid is due, [`LeadContext`] when the
//! seat opens a trick and [`ResponseContext`] when it answers one.
//! Everything a decision may legitimately depend on is in the context
//! (own hand, trump, public bids, tricks taken, running totals, the
//! cards already out), and nothing in it reveals another seat's hand or
//! lets the policy mutate the game.

use super::cards_types::{Card, CardKind};
use super::rules::{hand_size_for_round, legal_cards, legal_response_kinds};
use super::state::{require_trick_no, require_trump, GameState, Phase, PlayerId, RoundRecord};
use crate::errors::engine::{EngineError, ValidationKind};

/// Decision context for a pending bid.
#[derive(Debug, Clone, Copy)]
pub struct BidContext<'a> {
    pub round_no: u8,
    pub total_rounds: u8,
    pub player_count: u8,
    /// Seat the context was built for.
    pub player: PlayerId,
    pub dealer: PlayerId,
    /// The seat's dealt hand, sorted.
    pub hand: &'a [Card],
    pub trump_card: Card,
    /// Bids submitted so far this round, by seat. Seats still to bid
    /// (this one included) are `None`.
    pub bids: &'a [Option<i32>],
    pub scores_total: &'a [i32],
    /// Completed rounds of the game, oldest first. Public record: every
    /// seat's bids, tricks taken and score deltas.
    pub history: &'a [RoundRecord],
    /// The full deck the round was dealt from.
    pub deck: &'a [Card],
}

/// Decision context for leading a trick.
#[derive(Debug, Clone, Copy)]
pub struct LeadContext<'a> {
    pub round_no: u8,
    pub total_rounds: u8,
    pub player_count: u8,
    pub player: PlayerId,
    pub dealer: PlayerId,
    pub hand: &'a [Card],
    pub trump_card: Card,
    /// All bids of the round, by seat. Complete once play has begun.
    pub bids: &'a [Option<i32>],
    /// Tricks taken so far this round, by seat.
    pub tricks_won: &'a [u8],
    pub scores_total: &'a [i32],
    /// Cards played out in earlier tricks of the round.
    pub used_cards: &'a [Card],
    pub deck: &'a [Card],
    /// Hand size every seat held when the current trick began.
    pub hand_size_at_trick_start: u8,
}

/// Decision context for answering a led trick.
#[derive(Debug, Clone, Copy)]
pub struct ResponseContext<'a> {
    pub round_no: u8,
    pub total_rounds: u8,
    pub player_count: u8,
    pub player: PlayerId,
    pub dealer: PlayerId,
    pub hand: &'a [Card],
    pub trump_card: Card,
    pub bids: &'a [Option<i32>],
    pub tricks_won: &'a [u8],
    pub scores_total: &'a [i32],
    pub used_cards: &'a [Card],
    pub deck: &'a [Card],
    pub hand_size_at_trick_start: u8,
    /// Card that opened the trick.
    pub lead: Card,
    /// Plays of the current trick so far, in play order.
    pub trick_plays: &'a [(PlayerId, Card)],
}

impl LeadContext<'_> {
    /// A leader may drop any card in hand.
    pub fn legal_cards(&self) -> Vec<Card> {
        self.hand.to_vec()
    }
}

impl ResponseContext<'_> {
    /// Kinds this seat may answer the lead with.
    pub fn legal_kinds(&self) -> Vec<CardKind> {
        legal_response_kinds(self.lead, self.hand)
    }

    /// Cards in hand that are legal to drop on this trick.
    pub fn legal_cards(&self) -> Vec<Card> {
        legal_cards(self.hand, Some(self.lead))
    }

    /// Cards already dropped in the trick, in play order.
    pub fn dropped_cards(&self) -> Vec<Card> {
        self.trick_plays.iter().map(|(_, c)| *c).collect()
    }
}

/// Build the bid view for `player`. The phase must be `Bidding`.
pub fn bid_context<'a>(
    state: &'a GameState,
    deck: &'a [Card],
    player: PlayerId,
) -> Result<BidContext<'a>, EngineError> {
    if state.phase != Phase::Bidding {
        return Err(EngineError::validation(
            ValidationKind::PhaseMismatch,
            format!("no bid is due in phase {:?}", state.phase),
        ));
    }
    Ok(BidContext {
        round_no: state.round_no,
        total_rounds: state.total_rounds,
        player_count: state.player_count,
        player,
        dealer: state.dealer,
        hand: hand_of(state, player)?,
        trump_card: require_trump(state, "bid_context")?,
        bids: &state.round.bids,
        scores_total: &state.scores_total,
        history: &state.history,
        deck,
    })
}

/// Build the lead view for `player`. The phase must be a trick with no
/// card led yet.
pub fn lead_context<'a>(
    state: &'a GameState,
    deck: &'a [Card],
    player: PlayerId,
) -> Result<LeadContext<'a>, EngineError> {
    let trick_no = require_trick_no(state, "lead_context")?;
    if state.round.trick_lead.is_some() {
        return Err(EngineError::validation(
            ValidationKind::PhaseMismatch,
            "trick already has a lead (lead_context)",
        ));
    }
    Ok(LeadContext {
        round_no: state.round_no,
        total_rounds: state.total_rounds,
        player_count: state.player_count,
        player,
        dealer: state.dealer,
        hand: hand_of(state, player)?,
        trump_card: require_trump(state, "lead_context")?,
        bids: &state.round.bids,
        tricks_won: &state.round.tricks_won,
        scores_total: &state.scores_total,
        used_cards: &state.round.used_cards,
        deck,
        hand_size_at_trick_start: hand_size_at_trick_start(state.round_no, trick_no),
    })
}

/// Build the response view for `player`. The phase must be a trick with a
/// lead already down.
pub fn response_context<'a>(
    state: &'a GameState,
    deck: &'a [Card],
    player: PlayerId,
) -> Result<ResponseContext<'a>, EngineError> {
    let trick_no = require_trick_no(state, "response_context")?;
    let Some(lead) = state.round.trick_lead else {
        return Err(EngineError::validation(
            ValidationKind::PhaseMismatch,
            "trick has no lead yet (response_context)",
        ));
    };
    Ok(ResponseContext {
        round_no: state.round_no,
        total_rounds: state.total_rounds,
        player_count: state.player_count,
        player,
        dealer: state.dealer,
        hand: hand_of(state, player)?,
        trump_card: require_trump(state, "response_context")?,
        bids: &state.round.bids,
        tricks_won: &state.round.tricks_won,
        scores_total: &state.scores_total,
        used_cards: &state.round.used_cards,
        deck,
        hand_size_at_trick_start: hand_size_at_trick_start(state.round_no, trick_no),
        lead,
        trick_plays: &state.round.trick_plays,
    })
}

fn hand_of(state: &GameState, player: PlayerId) -> Result<&[Card], EngineError> {
    state
        .hands
        .get(player as usize)
        .map(Vec::as_slice)
        .ok_or_else(|| {
            EngineError::validation(
                ValidationKind::Other("unknown seat".to_string()),
                format!("seat {player} of {}", state.player_count),
            )
        })
}

#[inline]
fn hand_size_at_trick_start(round_no: u8, trick_no: u8) -> u8 {
    hand_size_for_round(round_no).saturating_sub(trick_no.saturating_sub(1))
}
