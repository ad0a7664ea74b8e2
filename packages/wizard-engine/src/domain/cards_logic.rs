//! Pure card comparison logic shared by trick resolution, rules and policies.

use super::cards_types::{Card, CardKind};

/// Whether `candidate` beats `target` under the given trump kind.
///
/// Nothing beats a wizard, a wizard beats everything else, and any
/// non-jester beats a jester. Among the rest, higher rank wins within a
/// kind and trump wins over non-trump.
pub fn can_beat(candidate: Card, target: Card, trump_kind: CardKind) -> bool {
    if target.kind == CardKind::Wizard {
        return false;
    }
    if candidate.kind == CardKind::Wizard {
        return true;
    }
    if target.kind == CardKind::Jester && candidate.kind != CardKind::Jester {
        return true;
    }
    if candidate.kind == target.kind && candidate.rank > target.rank {
        return true;
    }
    candidate.kind == trump_kind && target.kind != trump_kind
}

/// All members of `cards` that beat `target` under `trump_kind`.
pub fn cards_that_beat(cards: &[Card], target: Card, trump_kind: CardKind) -> Vec<Card> {
    cards
        .iter()
        .copied()
        .filter(|c| can_beat(*c, target, trump_kind))
        .collect()
}

/// Whether `candidate` beats every card in `targets`.
///
/// Vacuously true for an empty `targets`.
pub fn beats_all(candidate: Card, targets: &[Card], trump_kind: CardKind) -> bool {
    targets.iter().all(|t| can_beat(candidate, *t, trump_kind))
}

/// Whether `hand` holds at least one card of `kind`.
pub fn hand_has_kind(hand: &[Card], kind: CardKind) -> bool {
    hand.iter().any(|c| c.kind == kind)
}

/// How many members of `cards` are of `kind`.
pub fn count_of_kind(cards: &[Card], kind: CardKind) -> usize {
    cards.iter().filter(|c| c.kind == kind).count()
}
