//! Game and round state containers plus seat arithmetic.

use super::cards_types::Card;
use crate::errors::engine::EngineError;

pub type PlayerId = u8; // 0-based seat index, clockwise

/// Where the game currently is.
///
/// `NotStarted` doubles as the between-rounds resting point: scoring a
/// round with more rounds to play returns here until the next deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Bidding,
    Trick { trick_no: u8 },
    Scoring,
    Finished,
}

/// Per-round mutable state. Replaced wholesale by each deal.
#[derive(Debug, Clone, Default)]
pub struct RoundState {
    /// Trump card turned up from the undealt remainder.
    pub trump: Option<Card>,
    /// Submitted bids by seat; `None` until the seat has bid.
    pub bids: Vec<Option<i32>>,
    /// Tricks won so far this round, by seat.
    pub tricks_won: Vec<u8>,
    /// Plays of the trick in progress, in play order.
    pub trick_plays: Vec<(PlayerId, Card)>,
    /// Lead card of the trick in progress.
    pub trick_lead: Option<Card>,
    /// Cards retired by completed tricks this round, in play order.
    pub used_cards: Vec<Card>,
    /// Winner of the last completed trick this round.
    pub last_trick_winner: Option<PlayerId>,
}

impl RoundState {
    pub fn empty(player_count: u8) -> Self {
        Self {
            trump: None,
            bids: vec![None; player_count as usize],
            tricks_won: vec![0; player_count as usize],
            trick_plays: Vec::new(),
            trick_lead: None,
            used_cards: Vec::new(),
            last_trick_winner: None,
        }
    }

    pub fn bids_submitted(&self) -> u8 {
        self.bids.iter().filter(|b| b.is_some()).count() as u8
    }
}

/// Immutable record of a completed, scored round.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub round_no: u8,
    pub hand_size: u8,
    pub dealer: PlayerId,
    pub trump: Card,
    pub bids: Vec<Option<i32>>,
    pub tricks_won: Vec<u8>,
    pub score_deltas: Vec<i32>,
    pub last_trick_winner: Option<PlayerId>,
}

/// Whole-game mutable state. Exclusively owned and mutated by the engine;
/// policies only ever see read-only views built from it.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub player_count: u8,
    pub total_rounds: u8,
    /// Current round number, 1-based; also the hand size dealt for it.
    pub round_no: u8,
    /// Cumulative scores by seat. Never reset between rounds.
    pub scores_total: Vec<i32>,
    /// Current hands by seat, kept sorted for stable iteration.
    pub hands: Vec<Vec<Card>>,
    /// Dealer seat for the current round.
    pub dealer: PlayerId,
    /// Seat expected to act next, when the phase defines one.
    pub turn: Option<PlayerId>,
    /// Leader of the trick in progress, or of the upcoming first trick.
    pub leader: Option<PlayerId>,
    pub round: RoundState,
    /// Completed rounds, oldest first.
    pub history: Vec<RoundRecord>,
}

impl GameState {
    /// Fresh game over `total_rounds` configured rounds.
    ///
    /// The round loop's upper bound is exclusive: rounds `1` through
    /// `total_rounds - 1` are played and round `total_rounds` itself never
    /// is, so a game configured with one round (or zero) is born finished.
    pub fn new(player_count: u8, total_rounds: u8) -> Self {
        let phase = if total_rounds <= 1 {
            Phase::Finished
        } else {
            Phase::NotStarted
        };
        Self {
            phase,
            player_count,
            total_rounds,
            round_no: 1,
            scores_total: vec![0; player_count as usize],
            hands: vec![Vec::new(); player_count as usize],
            dealer: 0,
            turn: None,
            leader: None,
            round: RoundState::empty(player_count),
            history: Vec::new(),
        }
    }
}

/// Clockwise seat `delta` seats after `seat`.
#[inline]
pub fn seat_offset(seat: PlayerId, delta: i16, player_count: u8) -> PlayerId {
    let n = i16::from(player_count);
    (i16::from(seat) + delta).rem_euclid(n) as PlayerId
}

#[inline]
pub fn next_player(p: PlayerId, player_count: u8) -> PlayerId {
    seat_offset(p, 1, player_count)
}

#[inline]
pub fn prev_player(p: PlayerId, player_count: u8) -> PlayerId {
    seat_offset(p, -1, player_count)
}

/// Dealer seat for a 1-based round number; the deal starts at seat 0 and
/// rotates clockwise every round.
#[inline]
pub fn dealer_for_round(round_no: u8, player_count: u8) -> PlayerId {
    seat_offset(0, i16::from(round_no) - 1, player_count)
}

/// First bidder of a round: the seat after the dealer.
#[inline]
pub fn round_start_seat(dealer: PlayerId, player_count: u8) -> PlayerId {
    next_player(dealer, player_count)
}

/// Seat expected to submit the next bid, `bid_count` bids into the round.
#[inline]
pub fn expected_bidder(dealer: PlayerId, bid_count: u8, player_count: u8) -> PlayerId {
    seat_offset(dealer, i16::from(bid_count) + 1, player_count)
}

/// Seat expected to play, `play_count` plays into a trick led by `leader`.
#[inline]
pub fn expected_actor(leader: PlayerId, play_count: u8, player_count: u8) -> PlayerId {
    seat_offset(leader, i16::from(play_count), player_count)
}

pub fn require_turn(state: &GameState, ctx: &'static str) -> Result<PlayerId, EngineError> {
    state
        .turn
        .ok_or_else(|| EngineError::invariant(format!("turn must be set ({ctx})")))
}

pub fn require_leader(state: &GameState, ctx: &'static str) -> Result<PlayerId, EngineError> {
    state
        .leader
        .ok_or_else(|| EngineError::invariant(format!("leader must be set ({ctx})")))
}

pub fn require_trump(state: &GameState, ctx: &'static str) -> Result<Card, EngineError> {
    state
        .round
        .trump
        .ok_or_else(|| EngineError::invariant(format!("trump must be set ({ctx})")))
}

pub fn require_trick_no(state: &GameState, ctx: &'static str) -> Result<u8, EngineError> {
    match state.phase {
        Phase::Trick { trick_no } => Ok(trick_no),
        _ => Err(EngineError::invariant(format!(
            "phase must be a trick ({ctx})"
        ))),
    }
}
