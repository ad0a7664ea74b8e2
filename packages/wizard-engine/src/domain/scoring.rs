//! Round scoring and game outcome.

use super::rules::hand_size_for_round;
use super::state::{require_trump, GameState, Phase, PlayerId, RoundRecord};
use crate::errors::engine::{EngineError, ValidationKind};

/// Score delta for one seat: hitting the bid pays a 20 base plus 10 per
/// trick bid, missing it costs 10 per trick of distance in either
/// direction.
#[inline]
pub fn round_delta(bid: i32, won: u8) -> i32 {
    let won = i32::from(won);
    if bid == won {
        20 + 10 * bid
    } else {
        -10 * (bid - won).abs()
    }
}

/// End-of-game outcome. A single top scorer wins; a shared top score is a
/// draw between the tied seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(PlayerId),
    Draw(Vec<PlayerId>),
}

/// Outcome for the given running totals, one entry per seat.
pub fn game_outcome(scores_total: &[i32]) -> GameOutcome {
    let Some(top) = scores_total.iter().copied().max() else {
        return GameOutcome::Draw(Vec::new());
    };
    let leaders: Vec<PlayerId> = scores_total
        .iter()
        .enumerate()
        .filter(|(_, score)| **score == top)
        .map(|(seat, _)| seat as PlayerId)
        .collect();
    match leaders.as_slice() {
        [single] => GameOutcome::Winner(*single),
        _ => GameOutcome::Draw(leaders),
    }
}

/// Score the finished round, then advance to the next round or end the
/// game.
///
/// Every seat's delta lands in the running totals and the full round goes
/// into the history. With rounds still to play the phase returns to
/// `NotStarted` for the next deal; otherwise it becomes `Finished`.
pub fn apply_round_scoring(state: &mut GameState) -> Result<(), EngineError> {
    if state.phase != Phase::Scoring {
        return Err(EngineError::validation(
            ValidationKind::PhaseMismatch,
            format!("cannot score in phase {:?}", state.phase),
        ));
    }

    let mut deltas = Vec::with_capacity(state.player_count as usize);
    for seat in 0..state.player_count {
        let bid = state.round.bids[seat as usize].ok_or_else(|| {
            EngineError::invariant(format!(
                "bid for seat {seat} must be set (apply_round_scoring)"
            ))
        })?;
        deltas.push(round_delta(bid, state.round.tricks_won[seat as usize]));
    }
    for (total, delta) in state.scores_total.iter_mut().zip(&deltas) {
        *total += delta;
    }

    let trump = require_trump(state, "apply_round_scoring")?;
    state.history.push(RoundRecord {
        round_no: state.round_no,
        hand_size: hand_size_for_round(state.round_no),
        dealer: state.dealer,
        trump,
        bids: state.round.bids.clone(),
        tricks_won: state.round.tricks_won.clone(),
        score_deltas: deltas,
        last_trick_winner: state.round.last_trick_winner,
    });

    state.turn = None;
    state.leader = None;
    // The game runs rounds 1..total_rounds; round total_rounds itself is
    // never dealt.
    if state.round_no + 1 < state.total_rounds {
        state.round_no += 1;
        state.phase = Phase::NotStarted;
    } else {
        state.phase = Phase::Finished;
    }
    Ok(())
}
