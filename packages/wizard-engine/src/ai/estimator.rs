//! Estimator - probability-driven bidder with an adaptive threshold.
//!
//! Bidding:
//! - Score every hand card with the bid-time estimate
//!   [`estimate_bid_win`]; earmark cards at or above the acceptance
//!   threshold and bid the earmarked count.
//! - The threshold starts at 0.40 and is scaled once by table size (more
//!   opponents mean more chances to be beaten, so demand more of each
//!   card). It also adapts across the game: three straight rounds short
//!   of the bid tighten it by a tenth, three straight rounds over the
//!   bid ease it back.
//!
//! Play:
//! - Early leads on a table that has not under-bid go strong, grabbing a
//!   trick while they are contested.
//! - A response that should win consults the full trick estimate
//!   [`estimate_trick_win`] and plays the weakest winner expected to hold
//!   up; with no convincing winner the cheapest one is risked.
//! - Every other decision follows the ladder selection logic.

use std::sync::{Mutex, MutexGuard};

use super::ladder;
use super::trait_def::{Policy, PolicyError};
use crate::domain::cards_logic::cards_that_beat;
use crate::domain::player_view::{BidContext, LeadContext, ResponseContext};
use crate::domain::probability::{
    estimate_bid_win, estimate_trick_win, BidEstimateInput, TrickEstimateInput,
};
use crate::domain::rules::{bids_wins_coefficient, strongest_card, weakest_card};
use crate::domain::Card;

/// Acceptance threshold for earmarking a card at bid time.
const BASE_THRESHOLD: f64 = 0.40;
/// A winning response below this estimate is not trusted to hold up.
const HOLD_UP_THRESHOLD: f64 = 0.5;
/// Consecutive missed rounds before the threshold adapts.
const STREAK_ROUNDS: u8 = 3;
const TIGHTEN_FACTOR: f64 = 1.1;
const EASE_FACTOR: f64 = 0.84;
/// Last round in which an over-bid table still gets a strong lead.
const STRONG_LEAD_ROUND_CAP: u8 = 5;

#[derive(Debug)]
struct EstimatorMemory {
    threshold: f64,
    /// Cards earmarked at bid time, kept for the round.
    reserved: Vec<Card>,
    scaled_for_table: bool,
    under_streak: u8,
    over_streak: u8,
}

impl Default for EstimatorMemory {
    fn default() -> Self {
        Self {
            threshold: BASE_THRESHOLD,
            reserved: Vec::new(),
            scaled_for_table: false,
            under_streak: 0,
            over_streak: 0,
        }
    }
}

/// Probability-driven bidder. See the module docs for the strategy.
pub struct EstimatorPolicy {
    memory: Mutex<EstimatorMemory>,
}

impl EstimatorPolicy {
    pub const NAME: &'static str = "estimator";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(_seed: Option<u64>) -> Self {
        Self {
            memory: Mutex::new(EstimatorMemory::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, EstimatorMemory>, PolicyError> {
        self.memory
            .lock()
            .map_err(|e| PolicyError::Internal(format!("memory lock poisoned: {e}")))
    }
}

impl Policy for EstimatorPolicy {
    fn decide_bid(&self, ctx: &BidContext<'_>) -> Result<i32, PolicyError> {
        let mut memory = self.lock()?;

        if !memory.scaled_for_table {
            memory.threshold *= f64::from(ctx.player_count) / 10.0 + 1.0;
            memory.scaled_for_table = true;
        }

        if ctx.round_no > 2 {
            if let Some(last) = ctx.history.last() {
                let bid = last.bids.get(ctx.player as usize).copied().flatten();
                let wins = last.tricks_won.get(ctx.player as usize).copied();
                if let (Some(bid), Some(wins)) = (bid, wins) {
                    let miss = bid - i32::from(wins);
                    if miss > 0 {
                        memory.under_streak += 1;
                    } else if miss < 0 {
                        memory.over_streak += 1;
                    }
                }
            }
            if memory.under_streak == STREAK_ROUNDS {
                memory.threshold *= TIGHTEN_FACTOR;
                memory.under_streak = 0;
            } else if memory.over_streak == STREAK_ROUNDS {
                memory.threshold *= EASE_FACTOR;
                memory.over_streak = 0;
            }
        }

        let hand_size = ctx.hand.len() as u8;
        let threshold = memory.threshold;
        memory.reserved.clear();
        for &card in ctx.hand {
            let p = estimate_bid_win(
                ctx.deck,
                &BidEstimateInput {
                    candidate: card,
                    trump_card: ctx.trump_card,
                    own_cards: ctx.hand,
                    hand_size,
                    players: ctx.player_count,
                },
            );
            if p >= threshold {
                memory.reserved.push(card);
            }
        }
        Ok(memory.reserved.len() as i32)
    }

    fn decide_lead(&self, ctx: &LeadContext<'_>) -> Result<Card, PolicyError> {
        let memory = self.lock()?;
        let trump_kind = ctx.trump_card.kind;

        let pressure = bids_wins_coefficient(ctx.bids, ctx.round_no);
        if ctx.round_no <= STRONG_LEAD_ROUND_CAP && pressure <= 0 {
            return strongest_card(ctx.hand, trump_kind)
                .ok_or_else(|| PolicyError::InvalidMove("no cards to lead".into()));
        }

        let own_bid = ladder::own_bid(ctx.bids, ctx.player)?;
        let own_wins = ladder::own_wins(ctx.tricks_won, ctx.player)?;
        ladder::lead_choice(
            ctx.hand,
            &memory.reserved,
            own_bid,
            own_wins,
            ctx.bids,
            ctx.round_no,
            trump_kind,
        )
        .ok_or_else(|| PolicyError::InvalidMove("no cards to lead".into()))
    }

    fn decide_response(&self, ctx: &ResponseContext<'_>) -> Result<Card, PolicyError> {
        let memory = self.lock()?;
        let trump_kind = ctx.trump_card.kind;
        let own_bid = ladder::own_bid(ctx.bids, ctx.player)?;
        let own_wins = ladder::own_wins(ctx.tricks_won, ctx.player)?;
        let legal = ctx.legal_cards();
        let leading = ladder::current_leading_card(ctx)?;
        let winners = cards_that_beat(&legal, leading, trump_kind);

        if own_bid > i32::from(own_wins) && !winners.is_empty() {
            let dropped = ctx.dropped_cards();
            let mut pool = winners.clone();
            while let Some(candidate) = weakest_card(&pool, trump_kind) {
                let estimate = estimate_trick_win(
                    ctx.deck,
                    &TrickEstimateInput {
                        candidate,
                        trump_card: ctx.trump_card,
                        used_cards: ctx.used_cards,
                        own_cards: ctx.hand,
                        dropped_in_trick: &dropped,
                        opponents: ctx.player_count.saturating_sub(1),
                        hand_size_at_trick_start: ctx.hand_size_at_trick_start,
                        first_to_drop: false,
                    },
                );
                if estimate >= HOLD_UP_THRESHOLD {
                    return Ok(candidate);
                }
                pool.retain(|c| *c != candidate);
            }
            // No winner is expected to hold up; risk the cheapest one.
            return weakest_card(&winners, trump_kind)
                .ok_or_else(|| PolicyError::InvalidMove("no legal response available".into()));
        }

        ladder::response_choice(
            &legal,
            &memory.reserved,
            own_bid,
            own_wins,
            ctx.bids,
            ctx.round_no,
            trump_kind,
            leading,
        )
        .ok_or_else(|| PolicyError::InvalidMove("no legal response available".into()))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
