//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod player_view;
pub mod probability;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_dealing;
#[cfg(test)]
mod tests_game_flow;
#[cfg(test)]
mod tests_props_rules;
#[cfg(test)]
mod tests_props_tricks;

// Re-exports for ergonomics
pub use cards_logic::{can_beat, cards_that_beat, hand_has_kind};
pub use cards_types::{Card, CardId, CardIdAllocator, CardKind};
pub use dealing::{deal_round, full_deck, start_round};
pub use rules::{default_total_rounds, hand_size_for_round};
pub use scoring::{apply_round_scoring, game_outcome, GameOutcome};
pub use seed_derivation::{derive_dealing_seed, derive_game_seed, derive_policy_seed};
pub use state::{GameState, Phase, PlayerId, RoundRecord};
pub use tricks::{play_card, PlayCardResult};
