//! End-to-end games driven through the public engine surface by the
//! bundled policies. These are the closest thing to a table of real
//! players the crate can test against itself.

use crate::ai::{by_name, Policy};
use crate::domain::bidding::submit_bid;
use crate::domain::dealing::{full_deck, start_round};
use crate::domain::player_view::{bid_context, lead_context, response_context};
use crate::domain::scoring::{apply_round_scoring, round_delta};
use crate::domain::seed_derivation::{derive_dealing_seed, derive_policy_seed};
use crate::domain::tricks::play_card;
use crate::domain::{default_total_rounds, CardIdAllocator, GameState, Phase};

type BoxedPolicy = Box<dyn Policy + Send + Sync>;

fn seeded_policies(names: &[&str], game_seed: u64) -> Vec<BoxedPolicy> {
    names
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            let factory = by_name(name).unwrap();
            (factory.make)(Some(derive_policy_seed(game_seed, seat as u8)))
        })
        .collect()
}

/// Drive a full game: deal, bid, play out every trick, score, repeat
/// until the state machine lands on `Finished`.
fn run_game(policies: &[BoxedPolicy], total_rounds: u8, game_seed: u64) -> GameState {
    let deck = full_deck(&mut CardIdAllocator::new());
    let mut state = GameState::new(policies.len() as u8, total_rounds);

    while state.phase != Phase::Finished {
        match state.phase {
            Phase::NotStarted => {
                let seed = derive_dealing_seed(game_seed, state.round_no);
                start_round(&mut state, &deck, seed).unwrap();
            }
            Phase::Bidding => {
                let seat = state.turn.unwrap();
                let ctx = bid_context(&state, &deck, seat).unwrap();
                let bid = policies[seat as usize].decide_bid(&ctx).unwrap();
                submit_bid(&mut state, seat, bid).unwrap();
            }
            Phase::Trick { .. } => {
                let seat = state.turn.unwrap();
                let card = if state.round.trick_lead.is_none() {
                    let ctx = lead_context(&state, &deck, seat).unwrap();
                    policies[seat as usize].decide_lead(&ctx).unwrap()
                } else {
                    let ctx = response_context(&state, &deck, seat).unwrap();
                    policies[seat as usize].decide_response(&ctx).unwrap()
                };
                play_card(&mut state, seat, card).unwrap();
            }
            Phase::Scoring => apply_round_scoring(&mut state).unwrap(),
            Phase::Finished => break,
        }
    }
    state
}

#[test]
fn random_policies_complete_a_seeded_game() {
    let policies = seeded_policies(&["random", "random", "random", "random"], 7);
    let state = run_game(&policies, 15, 7);

    assert_eq!(state.phase, Phase::Finished);
    // Rounds 1 through 14 are played; round 15 itself never is.
    assert_eq!(state.history.len(), 14);
    assert!(state.hands.iter().all(Vec::is_empty));

    for (i, record) in state.history.iter().enumerate() {
        assert_eq!(record.round_no, i as u8 + 1);
        assert_eq!(record.hand_size, record.round_no);
        let played: u8 = record.tricks_won.iter().sum();
        assert_eq!(played, record.round_no, "round {} tricks", record.round_no);
        for seat in 0..4usize {
            let bid = record.bids[seat].unwrap();
            assert_eq!(
                record.score_deltas[seat],
                round_delta(bid, record.tricks_won[seat]),
                "round {} seat {seat} delta",
                record.round_no
            );
        }
    }

    for seat in 0..4usize {
        let total: i32 = state.history.iter().map(|r| r.score_deltas[seat]).sum();
        assert_eq!(state.scores_total[seat], total);
    }
}

#[test]
fn game_is_deterministic_for_a_seed() {
    let first = run_game(&seeded_policies(&["random", "random", "random"], 42), 10, 42);
    let second = run_game(&seeded_policies(&["random", "random", "random"], 42), 10, 42);

    assert_eq!(first.scores_total, second.scores_total);
    assert_eq!(first.history.len(), second.history.len());
    for (a, b) in first.history.iter().zip(&second.history) {
        assert_eq!(a.trump, b.trump);
        assert_eq!(a.bids, b.bids);
        assert_eq!(a.tricks_won, b.tricks_won);
        assert_eq!(a.score_deltas, b.score_deltas);
        assert_eq!(a.last_trick_winner, b.last_trick_winner);
    }

    let third = run_game(&seeded_policies(&["random", "random", "random"], 43), 10, 43);
    let same_bids = first
        .history
        .iter()
        .zip(&third.history)
        .all(|(a, b)| a.bids == b.bids);
    assert!(!same_bids, "different seeds should not replay the same game");
}

#[test]
fn three_player_game_runs_the_sixty_card_default() {
    let total = default_total_rounds(3);
    assert_eq!(total, 20);

    let policies = seeded_policies(&["random", "random", "random"], 3);
    let state = run_game(&policies, total, 3);

    assert_eq!(state.phase, Phase::Finished);
    assert_eq!(state.history.len(), 19);
    // The biggest dealt round still fits the deck: 3 seats of 19 plus trump.
    let last = state.history.last().unwrap();
    assert_eq!(last.hand_size, 19);
}

#[test]
fn ladder_and_estimator_complete_games() {
    let policies = seeded_policies(&["ladder", "estimator", "ladder", "estimator"], 5);
    let state = run_game(&policies, 12, 5);

    assert_eq!(state.phase, Phase::Finished);
    assert_eq!(state.history.len(), 11);
    assert!(state.turn.is_none());
    assert!(state.leader.is_none());
    for record in &state.history {
        assert!(record.bids.iter().all(Option::is_some));
        let played: u8 = record.tricks_won.iter().sum();
        assert_eq!(played, record.round_no);
    }
}
