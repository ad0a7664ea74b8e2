//! In-memory driver for one complete game.
//!
//! The simulator owns a [`GameState`] and steps the engine's phase
//! machine to `Finished`, asking the seat's policy for a decision at
//! every bid, lead and response. Policies promise to pick from the
//! legal sets in their contexts; an engine rejection of a chosen card
//! is therefore a broken policy and aborts the run with a diagnostic
//! naming the seat and policy.

use std::fmt;

use wizard_engine::ai::{Policy, PolicyError};
use wizard_engine::domain::bidding::submit_bid;
use wizard_engine::domain::dealing::{full_deck, start_round};
use wizard_engine::domain::player_view::{bid_context, lead_context, response_context};
use wizard_engine::domain::scoring::{apply_round_scoring, game_outcome, GameOutcome};
use wizard_engine::domain::seed_derivation::derive_dealing_seed;
use wizard_engine::domain::state::require_turn;
use wizard_engine::domain::tricks::play_card;
use wizard_engine::domain::{Card, CardIdAllocator, GameState, Phase, PlayerId, RoundRecord};
use wizard_engine::errors::{EngineError, ValidationKind};

pub type BoxedPolicy = Box<dyn Policy + Send + Sync>;

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Final cumulative scores by seat.
    pub final_scores: Vec<i32>,
    /// Standings over those scores.
    pub outcome: GameOutcome,
    /// Scored rounds, oldest first.
    pub history: Vec<RoundRecord>,
    /// Rounds actually played; one less than the configured count.
    pub rounds_played: u8,
}

/// In-memory game driver. One instance runs one game and is consumed
/// by [`Simulator::simulate_game`].
pub struct Simulator {
    state: GameState,
    deck: Vec<Card>,
    game_seed: u64,
}

impl Simulator {
    pub fn new(player_count: u8, total_rounds: u8, game_seed: u64) -> Self {
        Self {
            state: GameState::new(player_count, total_rounds),
            deck: full_deck(&mut CardIdAllocator::new()),
            game_seed,
        }
    }

    /// Run the game to completion with one policy per seat.
    ///
    /// Per-round dealing seeds derive from the game seed, so the same
    /// seed and lineup replays the same game.
    pub fn simulate_game(
        mut self,
        policies: &[BoxedPolicy],
    ) -> Result<GameResult, SimulatorError> {
        if policies.len() != self.state.player_count as usize {
            return Err(SimulatorError::Engine(EngineError::invariant(format!(
                "{} policies for {} seats (simulate_game)",
                policies.len(),
                self.state.player_count
            ))));
        }

        while self.state.phase != Phase::Finished {
            match self.state.phase {
                Phase::NotStarted => self.deal_round()?,
                Phase::Bidding => self.collect_bid(policies)?,
                Phase::Trick { .. } => self.play_next_card(policies)?,
                Phase::Scoring => self.score_round()?,
                Phase::Finished => break,
            }
        }

        let rounds_played = self.state.history.len() as u8;
        Ok(GameResult {
            outcome: game_outcome(&self.state.scores_total),
            final_scores: self.state.scores_total,
            history: self.state.history,
            rounds_played,
        })
    }

    fn deal_round(&mut self) -> Result<(), SimulatorError> {
        let seed = derive_dealing_seed(self.game_seed, self.state.round_no);
        start_round(&mut self.state, &self.deck, seed).map_err(SimulatorError::Engine)
    }

    fn collect_bid(&mut self, policies: &[BoxedPolicy]) -> Result<(), SimulatorError> {
        let seat = self.acting_seat()?;
        let policy = &policies[seat as usize];
        let ctx = bid_context(&self.state, &self.deck, seat).map_err(SimulatorError::Engine)?;
        let bid = policy
            .decide_bid(&ctx)
            .map_err(|err| SimulatorError::policy(seat, policy.name(), "bid", err))?;
        submit_bid(&mut self.state, seat, bid).map_err(SimulatorError::Engine)
    }

    fn play_next_card(&mut self, policies: &[BoxedPolicy]) -> Result<(), SimulatorError> {
        let seat = self.acting_seat()?;
        let policy = &policies[seat as usize];

        let (action, card) = if self.state.round.trick_lead.is_none() {
            let ctx =
                lead_context(&self.state, &self.deck, seat).map_err(SimulatorError::Engine)?;
            let card = policy
                .decide_lead(&ctx)
                .map_err(|err| SimulatorError::policy(seat, policy.name(), "lead", err))?;
            ("lead", card)
        } else {
            let ctx =
                response_context(&self.state, &self.deck, seat).map_err(SimulatorError::Engine)?;
            let card = policy
                .decide_response(&ctx)
                .map_err(|err| SimulatorError::policy(seat, policy.name(), "response", err))?;
            ("response", card)
        };

        match play_card(&mut self.state, seat, card) {
            Ok(_) => Ok(()),
            // The engine refusing the chosen card means the policy broke
            // its contract; attribute the failure to it.
            Err(
                err @ EngineError::Validation(
                    ValidationKind::CardNotInHand | ValidationKind::ResponseKindNotLegal,
                    _,
                ),
            ) => Err(SimulatorError::rejected(seat, policy.name(), action, err)),
            Err(err) => Err(SimulatorError::Engine(err)),
        }
    }

    fn score_round(&mut self) -> Result<(), SimulatorError> {
        apply_round_scoring(&mut self.state).map_err(SimulatorError::Engine)
    }

    fn acting_seat(&self) -> Result<PlayerId, SimulatorError> {
        require_turn(&self.state, "simulator").map_err(SimulatorError::Engine)
    }
}

/// Errors that can occur while driving a game.
#[derive(Debug)]
pub enum SimulatorError {
    /// A policy failed to produce a decision.
    Policy {
        seat: PlayerId,
        policy: &'static str,
        action: &'static str,
        source: PolicyError,
    },
    /// The engine rejected a policy's decision.
    Rejected {
        seat: PlayerId,
        policy: &'static str,
        action: &'static str,
        source: EngineError,
    },
    /// The engine failed outside any policy decision.
    Engine(EngineError),
}

impl SimulatorError {
    fn policy(
        seat: PlayerId,
        policy: &'static str,
        action: &'static str,
        source: PolicyError,
    ) -> Self {
        Self::Policy {
            seat,
            policy,
            action,
            source,
        }
    }

    fn rejected(
        seat: PlayerId,
        policy: &'static str,
        action: &'static str,
        source: EngineError,
    ) -> Self {
        Self::Rejected {
            seat,
            policy,
            action,
            source,
        }
    }
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::Policy {
                seat,
                policy,
                action,
                source,
            } => write!(
                f,
                "policy `{policy}` (seat {seat}) failed to choose a {action}: {source}"
            ),
            SimulatorError::Rejected {
                seat,
                policy,
                action,
                source,
            } => write!(
                f,
                "policy `{policy}` (seat {seat}) chose an illegal {action}: {source}"
            ),
            SimulatorError::Engine(source) => write!(f, "engine error: {source}"),
        }
    }
}

impl std::error::Error for SimulatorError {}
