//! Ladder - a deterministic threshold bidder.
//!
//! Goals:
//! - Stay 100% legal using the contexts' legal-set helpers.
//! - Be deterministic (no RNG), and materially stronger than random play.
//!
//! Bidding:
//! - Earmark the hand cards that look like trick winners: wizards always,
//!   trump cards above rank 6 (any trump in round 1), and any non-jester
//!   card of rank 10 or higher. The bid is the earmarked count, and the
//!   earmarked cards are remembered for the round's play decisions.
//!
//! Play:
//! - Bid met: shed danger, preferring the strongest card that cannot win
//!   the current trick.
//! - Tricks still needed: key off the table pressure (round number minus
//!   the sum of all bids). On an under-bid table spare tricks must fall to
//!   someone, so play strong; on an over-bid table play weak; on a
//!   balanced table win with an earmarked card when one can and keep
//!   unearmarked kinds back otherwise.
//!
//! Determinism:
//! - No randomness used. The `seed` argument is accepted for factory
//!   uniformity and ignored.

use std::sync::Mutex;

use super::trait_def::{Policy, PolicyError};
use crate::domain::cards_logic::cards_that_beat;
use crate::domain::player_view::{BidContext, LeadContext, ResponseContext};
use crate::domain::rules::{bids_wins_coefficient, leading_card, strongest_card, weakest_card};
use crate::domain::{Card, CardKind};

/// Trump cards above this rank are earmarked as winners.
const TRUMP_RANK_FLOOR: u8 = 6;
/// Any non-jester card at or above this rank is earmarked as a winner.
const HIGH_RANK_FLOOR: u8 = 10;

/// Deterministic threshold bidder. See the module docs for the strategy.
pub struct LadderPolicy {
    /// Cards earmarked as winners at bid time, kept for the round.
    reserved: Mutex<Vec<Card>>,
}

impl LadderPolicy {
    pub const NAME: &'static str = "ladder";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(_seed: Option<u64>) -> Self {
        Self {
            reserved: Mutex::new(Vec::new()),
        }
    }

    fn reserved(&self) -> Result<Vec<Card>, PolicyError> {
        Ok(self
            .reserved
            .lock()
            .map_err(|e| PolicyError::Internal(format!("reserve lock poisoned: {e}")))?
            .clone())
    }
}

impl Policy for LadderPolicy {
    fn decide_bid(&self, ctx: &BidContext<'_>) -> Result<i32, PolicyError> {
        let earmarked = earmark_winners(ctx.hand, ctx.trump_card.kind, ctx.round_no);
        let bid = earmarked.len() as i32;
        let mut reserved = self
            .reserved
            .lock()
            .map_err(|e| PolicyError::Internal(format!("reserve lock poisoned: {e}")))?;
        *reserved = earmarked;
        Ok(bid)
    }

    fn decide_lead(&self, ctx: &LeadContext<'_>) -> Result<Card, PolicyError> {
        let reserved = self.reserved()?;
        let own_bid = own_bid(ctx.bids, ctx.player)?;
        let own_wins = own_wins(ctx.tricks_won, ctx.player)?;
        lead_choice(
            ctx.hand,
            &reserved,
            own_bid,
            own_wins,
            ctx.bids,
            ctx.round_no,
            ctx.trump_card.kind,
        )
        .ok_or_else(|| PolicyError::InvalidMove("no cards to lead".into()))
    }

    fn decide_response(&self, ctx: &ResponseContext<'_>) -> Result<Card, PolicyError> {
        let reserved = self.reserved()?;
        let own_bid = own_bid(ctx.bids, ctx.player)?;
        let own_wins = own_wins(ctx.tricks_won, ctx.player)?;
        let legal = ctx.legal_cards();
        let leading = current_leading_card(ctx)?;
        response_choice(
            &legal,
            &reserved,
            own_bid,
            own_wins,
            ctx.bids,
            ctx.round_no,
            ctx.trump_card.kind,
            leading,
        )
        .ok_or_else(|| PolicyError::InvalidMove("no legal response available".into()))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

// ---------- Shared selection logic (pure, deterministic) ----------
//
// The estimator policy reuses these for the decisions it does not refine.

pub(super) fn own_bid(bids: &[Option<i32>], player: u8) -> Result<i32, PolicyError> {
    bids.get(player as usize)
        .copied()
        .flatten()
        .ok_or_else(|| PolicyError::InvalidMove(format!("own bid for seat {player} not set")))
}

pub(super) fn own_wins(tricks_won: &[u8], player: u8) -> Result<u8, PolicyError> {
    tricks_won
        .get(player as usize)
        .copied()
        .ok_or_else(|| PolicyError::InvalidMove(format!("no tricks entry for seat {player}")))
}

/// Card currently winning the trick being answered.
pub(super) fn current_leading_card(ctx: &ResponseContext<'_>) -> Result<Card, PolicyError> {
    let dropped = ctx.dropped_cards();
    let Some((lead, responses)) = dropped.split_first() else {
        return Err(PolicyError::InvalidMove("trick has no plays to answer".into()));
    };
    Ok(leading_card(*lead, responses, ctx.trump_card.kind))
}

/// Hand cards worth a bid: wizards, strong trumps and high ranks.
pub(super) fn earmark_winners(hand: &[Card], trump_kind: CardKind, round_no: u8) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|c| is_probable_winner(*c, trump_kind, round_no))
        .collect()
}

fn is_probable_winner(card: Card, trump_kind: CardKind, round_no: u8) -> bool {
    if card.kind == CardKind::Wizard {
        return true;
    }
    if card.kind == trump_kind && (round_no == 1 || card.rank > TRUMP_RANK_FLOOR) {
        return true;
    }
    card.kind != CardKind::Jester && card.rank >= HIGH_RANK_FLOOR
}

/// Card to open a trick with.
pub(super) fn lead_choice(
    hand: &[Card],
    reserved: &[Card],
    own_bid: i32,
    own_wins: u8,
    bids: &[Option<i32>],
    round_no: u8,
    trump_kind: CardKind,
) -> Option<Card> {
    if own_bid <= i32::from(own_wins) {
        return weakest_card(hand, trump_kind);
    }
    let pressure = bids_wins_coefficient(bids, round_no);
    if pressure > 0 {
        return strongest_card(hand, trump_kind);
    }
    if pressure < 0 {
        return weakest_card(hand, trump_kind);
    }
    let spare: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|c| !reserved.contains(c))
        .collect();
    if spare.is_empty() {
        weakest_card(hand, trump_kind)
    } else {
        weakest_card(&spare, trump_kind)
    }
}

/// Card to answer a trick with, given the card currently winning it.
#[allow(clippy::too_many_arguments)]
pub(super) fn response_choice(
    legal: &[Card],
    reserved: &[Card],
    own_bid: i32,
    own_wins: u8,
    bids: &[Option<i32>],
    round_no: u8,
    trump_kind: CardKind,
    leading: Card,
) -> Option<Card> {
    let winners = cards_that_beat(legal, leading, trump_kind);

    if own_bid <= i32::from(own_wins) {
        return shed_choice(legal, &winners, trump_kind);
    }

    let pressure = bids_wins_coefficient(bids, round_no);
    if winners.is_empty() {
        if pressure > 0 {
            return strongest_card(legal, trump_kind);
        }
        if pressure < 0 {
            return weakest_card(legal, trump_kind);
        }
        // Balanced table, trick is lost anyway: keep earmarked kinds back.
        let reserved_kinds: Vec<CardKind> = reserved.iter().map(|c| c.kind).collect();
        let spare: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|c| !reserved_kinds.contains(&c.kind))
            .collect();
        return if spare.is_empty() {
            weakest_card(legal, trump_kind)
        } else {
            weakest_card(&spare, trump_kind)
        };
    }

    if pressure < 0 {
        return weakest_card(&winners, trump_kind);
    }
    if pressure > 0 {
        // Spare tricks will fall to someone; save the winners for them.
        let spare: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|c| !winners.contains(c))
            .collect();
        return if spare.is_empty() {
            strongest_card(legal, trump_kind)
        } else {
            strongest_card(&spare, trump_kind)
        };
    }

    let reserved_winners: Vec<Card> = winners
        .iter()
        .copied()
        .filter(|c| reserved.contains(c))
        .collect();
    weakest_card(&reserved_winners, trump_kind).or_else(|| weakest_card(&winners, trump_kind))
}

/// Card to drop when the trick should not be won: the strongest card that
/// cannot win it, or the strongest legal card when every option wins.
pub(super) fn shed_choice(
    legal: &[Card],
    winners: &[Card],
    trump_kind: CardKind,
) -> Option<Card> {
    let spare: Vec<Card> = legal
        .iter()
        .copied()
        .filter(|c| !winners.contains(c))
        .collect();
    if spare.is_empty() {
        strongest_card(legal, trump_kind)
    } else {
        strongest_card(&spare, trump_kind)
    }
}
