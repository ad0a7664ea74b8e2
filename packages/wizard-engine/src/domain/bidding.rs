//! Bid collection.

use super::state::{expected_bidder, require_leader, GameState, Phase, PlayerId};
use crate::errors::engine::{EngineError, ValidationKind};

/// Record `player`'s bid for the round.
///
/// Bids run in seat order starting after the dealer, so the dealer bids
/// last with every other bid on the table. The bid is recorded exactly as
/// given: nothing clamps it to the hand size, and a table-wide mismatch
/// with the round number is the scoring risk, not an error.
///
/// Once every seat has bid, the first trick opens with the turn on the
/// round's leader.
pub fn submit_bid(state: &mut GameState, player: PlayerId, bid: i32) -> Result<(), EngineError> {
    if state.phase != Phase::Bidding {
        return Err(EngineError::validation(
            ValidationKind::PhaseMismatch,
            format!("cannot bid in phase {:?}", state.phase),
        ));
    }

    let expected = expected_bidder(
        state.dealer,
        state.round.bids_submitted(),
        state.player_count,
    );
    if player != expected {
        return Err(EngineError::validation(
            ValidationKind::OutOfTurn,
            format!("bid from seat {player}, expected seat {expected}"),
        ));
    }

    state.round.bids[player as usize] = Some(bid);

    let submitted = state.round.bids_submitted();
    if submitted == state.player_count {
        let leader = require_leader(state, "submit_bid")?;
        state.turn = Some(leader);
        state.phase = Phase::Trick { trick_no: 1 };
    } else {
        state.turn = Some(expected_bidder(state.dealer, submitted, state.player_count));
    }
    Ok(())
}
