use crate::domain::dealing::{full_deck, start_round};
use crate::domain::state::{GameState, Phase, RoundRecord};
use crate::domain::CardIdAllocator;
use crate::errors::engine::{EngineError, ValidationKind};

#[test]
fn start_round_deals_and_opens_bidding_left_of_dealer() {
    let deck = full_deck(&mut CardIdAllocator::new());
    let mut state = GameState::new(4, 15);

    start_round(&mut state, &deck, 7).expect("round starts");

    assert_eq!(state.phase, Phase::Bidding);
    assert_eq!(state.round_no, 1);
    assert_eq!(state.dealer, 0);
    assert_eq!(state.turn, Some(1), "first bid left of dealer");
    assert_eq!(state.leader, Some(0), "dealer leads the first round");
    for hand in &state.hands {
        assert_eq!(hand.len(), 1);
    }
    let trump = state.round.trump.expect("trump drawn");
    assert!(state.hands.iter().flatten().all(|c| *c != trump));
}

#[test]
fn start_round_leader_comes_from_previous_rounds_last_trick() {
    let deck = full_deck(&mut CardIdAllocator::new());
    let mut state = GameState::new(4, 15);
    state.round_no = 2;
    state.history.push(RoundRecord {
        round_no: 1,
        hand_size: 1,
        dealer: 0,
        trump: deck[0],
        bids: vec![Some(0); 4],
        tricks_won: vec![0, 0, 0, 1],
        score_deltas: vec![20, 20, 20, -10],
        last_trick_winner: Some(3),
    });

    start_round(&mut state, &deck, 7).expect("round starts");

    assert_eq!(state.dealer, 1, "dealer rotates with the round number");
    assert_eq!(state.turn, Some(2), "first bid left of the new dealer");
    assert_eq!(state.leader, Some(3), "previous last-trick winner leads");
    for hand in &state.hands {
        assert_eq!(hand.len(), 2);
    }
}

#[test]
fn start_round_outside_not_started_is_rejected() {
    let deck = full_deck(&mut CardIdAllocator::new());
    let mut state = GameState::new(4, 15);
    start_round(&mut state, &deck, 7).expect("round starts");

    let err = start_round(&mut state, &deck, 8).expect_err("round already running");
    assert!(matches!(
        err,
        EngineError::Validation(ValidationKind::PhaseMismatch, _)
    ));
}

#[test]
fn start_round_past_final_round_is_rejected() {
    let deck = full_deck(&mut CardIdAllocator::new());
    let mut state = GameState::new(4, 15);
    state.round_no = 15;

    let err = start_round(&mut state, &deck, 7).expect_err("no round 15 in a 15-round game");
    assert!(matches!(
        err,
        EngineError::Validation(ValidationKind::RoundsExhausted, _)
    ));
}

#[test]
fn single_round_game_is_born_finished() {
    let deck = full_deck(&mut CardIdAllocator::new());
    let mut state = GameState::new(4, 1);

    assert_eq!(state.phase, Phase::Finished);
    let err = start_round(&mut state, &deck, 7).expect_err("finished game deals nothing");
    assert!(matches!(
        err,
        EngineError::Validation(ValidationKind::PhaseMismatch, _)
    ));
}
