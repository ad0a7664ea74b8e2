//! RNG seed derivation utilities for deterministic simulations.
//!
//! Provides functions to derive unique-but-deterministic seeds for the
//! different random contexts (per-game, per-round dealing, per-seat
//! policies) from one master seed, so a whole batch replays from a single
//! number.

/// Derive the seed of one game in a batch.
///
/// # Arguments
///
/// * `master_seed` - Base seed of the whole batch
/// * `game_index` - 0-based index of the game within the batch
pub fn derive_game_seed(master_seed: u64, game_index: u32) -> u64 {
    // Simple arithmetic derivation for deterministic but unique seeds
    // Uses different multipliers to avoid collisions between contexts
    master_seed
        .wrapping_add((game_index as u64).wrapping_mul(100000000))
        .wrapping_add(3) // Offset to distinguish from the other derivations
}

/// Derive a seed for dealing cards in a round.
///
/// Unique per (game, round) combination, so replaying a game reproduces
/// every shuffle.
pub fn derive_dealing_seed(game_seed: u64, round_no: u8) -> u64 {
    // Different multiplier from the policy derivation to ensure separation
    game_seed
        .wrapping_add((round_no as u64).wrapping_mul(1000000))
        .wrapping_add(2) // Offset to distinguish from the policy seed
}

/// Derive a seed for one seat's policy in a game.
///
/// Unique per (game, seat) combination; seats never share dice even when
/// running the same policy.
pub fn derive_policy_seed(game_seed: u64, seat: u8) -> u64 {
    game_seed
        .wrapping_add((seat as u64).wrapping_mul(100))
        .wrapping_add(1) // Offset to distinguish from the dealing seed
}
