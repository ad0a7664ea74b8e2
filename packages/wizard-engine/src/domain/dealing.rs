//! Deck construction and round dealing.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::cards_types::{
    Card, CardIdAllocator, CardKind, JESTER_RANK, MAX_SUITED_RANK, MIN_SUITED_RANK, WIZARD_RANK,
};
use super::rules::{self, DECK_SIZE};
use super::state::{dealer_for_round, round_start_seat, GameState, Phase, RoundState};
use crate::errors::engine::{EngineError, ValidationKind};

/// Build the full sixty-card deck, minting identities from `alloc`.
///
/// Deck order: the four suits rank 1..=13 each, then four wizards, then
/// four jesters.
pub fn full_deck(alloc: &mut CardIdAllocator) -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for kind in CardKind::SUITS {
        for rank in MIN_SUITED_RANK..=MAX_SUITED_RANK {
            deck.push(Card {
                id: alloc.allocate(),
                kind,
                rank,
            });
        }
    }
    for _ in 0..4 {
        deck.push(Card {
            id: alloc.allocate(),
            kind: CardKind::Wizard,
            rank: WIZARD_RANK,
        });
    }
    for _ in 0..4 {
        deck.push(Card {
            id: alloc.allocate(),
            kind: CardKind::Jester,
            rank: JESTER_RANK,
        });
    }
    deck
}

/// Find a deck card by face. Wizards and jesters have four identical
/// faces; the first in deck order is returned.
pub fn find_card(deck: &[Card], kind: CardKind, rank: u8) -> Option<Card> {
    deck.iter()
        .copied()
        .find(|c| c.kind == kind && c.rank == rank)
}

/// One round's deal: sorted hands by seat plus the turned-up trump card.
#[derive(Debug, Clone)]
pub struct Deal {
    pub hands: Vec<Vec<Card>>,
    pub trump: Card,
}

/// Shuffle a private copy of `deck` and deal `hand_size` cards to each of
/// `player_count` seats, then turn up the next undealt card as trump.
///
/// Drawing trump from the remainder keeps it disjoint from every hand.
/// The shared deck itself is never mutated.
pub fn deal_round(
    deck: &[Card],
    player_count: u8,
    hand_size: u8,
    seed: u64,
) -> Result<Deal, EngineError> {
    if player_count == 0 {
        return Err(EngineError::validation(
            ValidationKind::NoPlayers,
            "cannot deal to an empty table",
        ));
    }
    let needed = player_count as usize * hand_size as usize + 1;
    if needed > deck.len() {
        return Err(EngineError::validation(
            ValidationKind::InsufficientCards,
            format!("deal needs {needed} cards, deck holds {}", deck.len()),
        ));
    }

    let mut shuffled = deck.to_vec();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let mut draw = shuffled.into_iter();
    let mut hands: Vec<Vec<Card>> = Vec::with_capacity(player_count as usize);
    for _ in 0..player_count {
        let mut hand: Vec<Card> = draw.by_ref().take(hand_size as usize).collect();
        hand.sort();
        hands.push(hand);
    }
    let trump = draw
        .next()
        .ok_or_else(|| EngineError::invariant("deck exhausted before trump draw (deal_round)"))?;

    Ok(Deal { hands, trump })
}

/// Deal the current round into `state` and open bidding.
///
/// Sets hands, trump, the round's dealer, the first trick's leader (the
/// previous round's last-trick winner, or the dealer when none exists)
/// and puts the turn on the first bidder.
pub fn start_round(state: &mut GameState, deck: &[Card], seed: u64) -> Result<(), EngineError> {
    if state.phase != Phase::NotStarted {
        return Err(EngineError::validation(
            ValidationKind::PhaseMismatch,
            format!("cannot deal in phase {:?}", state.phase),
        ));
    }
    if state.round_no >= state.total_rounds {
        return Err(EngineError::validation(
            ValidationKind::RoundsExhausted,
            format!("round {} is past the last playable round", state.round_no),
        ));
    }

    let hand_size = rules::hand_size_for_round(state.round_no);
    let deal = deal_round(deck, state.player_count, hand_size, seed)?;

    state.dealer = dealer_for_round(state.round_no, state.player_count);
    state.hands = deal.hands;
    state.round = RoundState::empty(state.player_count);
    state.round.trump = Some(deal.trump);

    let leader = state
        .history
        .last()
        .and_then(|r| r.last_trick_winner)
        .unwrap_or(state.dealer);
    state.leader = Some(leader);
    state.turn = Some(round_start_seat(state.dealer, state.player_count));
    state.phase = Phase::Bidding;
    Ok(())
}
