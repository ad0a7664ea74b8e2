//! Trick play and resolution.

use super::cards_types::{Card, CardKind};
use super::rules::legal_response_kinds;
use super::state::{next_player, require_trump, require_turn, GameState, Phase, PlayerId};
use crate::errors::engine::{EngineError, ValidationKind};

/// Outcome of one accepted play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayCardResult {
    /// The play completed a trick.
    pub trick_completed: bool,
    /// Winner of the completed trick.
    pub trick_winner: Option<PlayerId>,
    /// The round's tricks are done and the phase moved to scoring.
    pub round_completed: bool,
}

/// Winning play of a trick, by left-to-right fold over the plays.
///
/// The lead opens as provisional winner. A same-kind play takes over only
/// by out-ranking it. A different-kind play takes over only while the
/// provisional winner is not a wizard: always over a jester, or by being
/// a wizard, or by being trump. The guard on the provisional wizard means
/// the first wizard played wins the trick outright, later wizards
/// included.
pub fn winning_play(
    plays: &[(PlayerId, Card)],
    trump_kind: CardKind,
) -> Option<(PlayerId, Card)> {
    let mut it = plays.iter();
    let &(mut win_seat, mut win_card) = it.next()?;

    for &(seat, card) in it {
        let replaces = if card.kind == win_card.kind {
            card.rank > win_card.rank
        } else if win_card.kind != CardKind::Wizard {
            win_card.kind == CardKind::Jester
                || card.kind == CardKind::Wizard
                || card.kind == trump_kind
        } else {
            false
        };
        if replaces {
            win_seat = seat;
            win_card = card;
        }
    }
    Some((win_seat, win_card))
}

/// Validate and apply one play.
///
/// The card must come from the acting player's hand, and when responding
/// its kind must sit in the legal response kinds for the lead; a breach is
/// a validation error and means the acting policy broke its contract.
///
/// A leader's play becomes the trick's lead. The trick's last play
/// resolves the winner, who banks the trick and leads the next one; the
/// round's last trick moves the phase to scoring instead.
pub fn play_card(
    state: &mut GameState,
    player: PlayerId,
    card: Card,
) -> Result<PlayCardResult, EngineError> {
    let trick_no = match state.phase {
        Phase::Trick { trick_no } => trick_no,
        _ => {
            return Err(EngineError::validation(
                ValidationKind::PhaseMismatch,
                format!("cannot play a card in phase {:?}", state.phase),
            ))
        }
    };

    let turn = require_turn(state, "play_card")?;
    if player != turn {
        return Err(EngineError::validation(
            ValidationKind::OutOfTurn,
            format!("play from seat {player}, expected seat {turn}"),
        ));
    }

    let hand = &state.hands[player as usize];
    let Some(pos) = hand.iter().position(|c| *c == card) else {
        return Err(EngineError::validation(
            ValidationKind::CardNotInHand,
            format!("seat {player} does not hold {card}"),
        ));
    };

    if let Some(lead) = state.round.trick_lead {
        let kinds = legal_response_kinds(lead, hand);
        if !kinds.contains(&card.kind) {
            return Err(EngineError::validation(
                ValidationKind::ResponseKindNotLegal,
                format!("{card} is not a legal answer to a {lead} lead"),
            ));
        }
    }

    let card = state.hands[player as usize].remove(pos);
    if state.round.trick_lead.is_none() {
        state.round.trick_lead = Some(card);
    }
    state.round.trick_plays.push((player, card));

    if (state.round.trick_plays.len() as u8) < state.player_count {
        state.turn = Some(next_player(player, state.player_count));
        return Ok(PlayCardResult {
            trick_completed: false,
            trick_winner: None,
            round_completed: false,
        });
    }

    // Trick complete: resolve, bank, hand the lead to the winner.
    let trump = require_trump(state, "play_card")?;
    let (winner, _) = winning_play(&state.round.trick_plays, trump.kind)
        .ok_or_else(|| EngineError::invariant("completed trick has no plays (play_card)"))?;

    state.round.tricks_won[winner as usize] += 1;
    state.round.last_trick_winner = Some(winner);
    let played: Vec<Card> = state.round.trick_plays.drain(..).map(|(_, c)| c).collect();
    state.round.used_cards.extend(played);
    state.round.trick_lead = None;
    state.leader = Some(winner);

    let round_completed = trick_no >= state.round_no;
    if round_completed {
        state.turn = None;
        state.phase = Phase::Scoring;
    } else {
        state.turn = Some(winner);
        state.phase = Phase::Trick {
            trick_no: trick_no + 1,
        };
    }

    Ok(PlayCardResult {
        trick_completed: true,
        trick_winner: Some(winner),
        round_completed,
    })
}
