use crate::domain::bidding::submit_bid;
use crate::domain::dealing::full_deck;
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::{init_round, take_cards};
use crate::domain::{Card, CardIdAllocator};
use crate::errors::engine::{EngineError, ValidationKind};

/// Round 1 table: seats 0..=3 hold one card each, trump is B7.
fn one_card_round(dealer: u8) -> GameState {
    let mut deck = full_deck(&mut CardIdAllocator::new());
    let cards = take_cards(&mut deck, &["B5", "R9", "G2", "Y11"]);
    let trump = take_cards(&mut deck, &["B7"])[0];
    let hands: Vec<Vec<Card>> = cards.into_iter().map(|c| vec![c]).collect();
    init_round(1, 15, hands, trump, dealer)
}

#[test]
fn bidding_starts_left_of_dealer_and_ends_on_dealer() {
    let mut state = one_card_round(2);
    assert_eq!(state.turn, Some(3));

    submit_bid(&mut state, 3, 1).expect("seat 3 opens");
    assert_eq!(state.turn, Some(0));
    submit_bid(&mut state, 0, 0).expect("seat 0 follows");
    submit_bid(&mut state, 1, 0).expect("seat 1 follows");
    assert_eq!(state.turn, Some(2), "dealer bids last");
    submit_bid(&mut state, 2, 1).expect("dealer closes");

    assert_eq!(state.round.bids, vec![Some(0), Some(0), Some(1), Some(1)]);
}

#[test]
fn final_bid_moves_to_first_trick_with_leader_on_turn() {
    let mut state = one_card_round(0);
    for seat in [1, 2, 3, 0] {
        submit_bid(&mut state, seat, 0).expect("bid accepted");
    }
    assert_eq!(state.phase, Phase::Trick { trick_no: 1 });
    // Round 1 has no previous winner, so the dealer leads.
    assert_eq!(state.turn, Some(0));
    assert_eq!(state.leader, Some(0));
}

#[test]
fn bid_out_of_turn_is_rejected() {
    let mut state = one_card_round(0);
    let err = submit_bid(&mut state, 0, 1).expect_err("dealer cannot open the bidding");
    assert!(matches!(
        err,
        EngineError::Validation(ValidationKind::OutOfTurn, _)
    ));
    assert_eq!(state.round.bids, vec![None; 4], "rejected bid leaves no trace");
}

#[test]
fn bid_outside_bidding_phase_is_rejected() {
    let mut state = one_card_round(0);
    for seat in [1, 2, 3, 0] {
        submit_bid(&mut state, seat, 0).expect("bid accepted");
    }
    let err = submit_bid(&mut state, 1, 0).expect_err("bidding is closed");
    assert!(matches!(
        err,
        EngineError::Validation(ValidationKind::PhaseMismatch, _)
    ));
}

#[test]
fn bids_are_not_clamped_to_hand_size() {
    let mut state = one_card_round(0);
    submit_bid(&mut state, 1, 99).expect("overbid accepted");
    submit_bid(&mut state, 2, -3).expect("negative bid accepted");
    assert_eq!(state.round.bids[1], Some(99));
    assert_eq!(state.round.bids[2], Some(-3));
}
