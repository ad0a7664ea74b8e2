//! Pure game rules: response legality, card selection, mid-trick leader.

use super::cards_logic::{can_beat, hand_has_kind};
use super::cards_types::{Card, CardKind};

/// Cards in a full deck: 4 suits of 13 plus 4 wizards and 4 jesters.
pub const DECK_SIZE: usize = 60;

/// Round count configured for a table of `player_count` seats.
///
/// `player_count` must be non-zero. The round loop's exclusive upper bound
/// (see [`crate::domain::state::GameState`]) means the last configured round
/// is never dealt, which keeps every deal within deck capacity.
pub fn default_total_rounds(player_count: u8) -> u8 {
    DECK_SIZE as u8 / player_count
}

/// Hand size dealt in the given round.
#[inline]
pub fn hand_size_for_round(round_no: u8) -> u8 {
    round_no
}

/// Kinds a hand may legally answer the led card with.
///
/// Holding the led kind restricts the response to it plus the special
/// kinds, except under a wizard or jester lead, which frees the response
/// entirely. A hand without the led kind may answer with every kind but
/// the led one.
///
/// Always non-empty for a non-empty hand.
pub fn legal_response_kinds(lead: Card, hand: &[Card]) -> Vec<CardKind> {
    if !hand_has_kind(hand, lead.kind) {
        return CardKind::ALL
            .iter()
            .copied()
            .filter(|k| *k != lead.kind)
            .collect();
    }

    if lead.kind == CardKind::Wizard || lead.kind == CardKind::Jester {
        return CardKind::ALL.to_vec();
    }

    vec![lead.kind, CardKind::Wizard, CardKind::Jester]
}

/// Cards in `hand` a player may play, given the trick's lead so far.
///
/// A leader (no lead yet) may play anything.
pub fn legal_cards(hand: &[Card], lead: Option<Card>) -> Vec<Card> {
    match lead {
        None => hand.to_vec(),
        Some(lead) => {
            let kinds = legal_response_kinds(lead, hand);
            hand.iter()
                .copied()
                .filter(|c| kinds.contains(&c.kind))
                .collect()
        }
    }
}

// Strength class under the total order used for weakest/strongest picks:
// wizard above trump above plain suited above jester.
fn strength_class(card: Card, trump_kind: CardKind) -> u8 {
    if card.kind == CardKind::Wizard {
        3
    } else if card.kind == trump_kind {
        2
    } else if card.kind == CardKind::Jester {
        0
    } else {
        1
    }
}

/// Weakest of `cards` under the strength order, rank-ordered within a class.
///
/// `None` only for an empty slice. Equal-strength picks (two wizards, two
/// jesters) may resolve to any of them.
pub fn weakest_card(cards: &[Card], trump_kind: CardKind) -> Option<Card> {
    cards
        .iter()
        .copied()
        .min_by_key(|c| (strength_class(*c, trump_kind), c.rank))
}

/// Strongest of `cards` under the strength order, rank-ordered within a class.
///
/// `None` only for an empty slice.
pub fn strongest_card(cards: &[Card], trump_kind: CardKind) -> Option<Card> {
    cards
        .iter()
        .copied()
        .max_by_key(|c| (strength_class(*c, trump_kind), c.rank))
}

/// Card currently winning a trick in progress.
///
/// Pairwise beat fold from the led card through the responses in play
/// order. Policies use this mid-trick; trick completion itself runs the
/// resolver in [`crate::domain::tricks`].
pub fn leading_card(lead: Card, responses: &[Card], trump_kind: CardKind) -> Card {
    responses.iter().fold(lead, |winner, c| {
        if can_beat(*c, winner, trump_kind) {
            *c
        } else {
            winner
        }
    })
}

/// Round number minus the sum of submitted bids.
///
/// Positive means tricks are still unclaimed by the table's bids, negative
/// means the table has overbid the round.
pub fn bids_wins_coefficient(bids: &[Option<i32>], round_no: u8) -> i32 {
    i32::from(round_no) - bids.iter().flatten().sum::<i32>()
}
