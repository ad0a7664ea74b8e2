// Proptest generators for domain types.
// Cards are always pulled from a freshly allocated full deck so id-based
// equality behaves the same way it does in real deals.

use proptest::prelude::*;
use rand::Rng as _;

use crate::domain::dealing::full_deck;
use crate::domain::{Card, CardIdAllocator, CardKind, PlayerId};

/// Generate a random CardKind (wizard and jester included)
pub fn kind() -> impl Strategy<Value = CardKind> {
    prop_oneof![
        Just(CardKind::Blue),
        Just(CardKind::Red),
        Just(CardKind::Green),
        Just(CardKind::Yellow),
        Just(CardKind::Wizard),
        Just(CardKind::Jester),
    ]
}

/// Generate a random suit kind (no wizard, no jester)
pub fn suit_kind() -> impl Strategy<Value = CardKind> {
    prop_oneof![
        Just(CardKind::Blue),
        Just(CardKind::Red),
        Just(CardKind::Green),
        Just(CardKind::Yellow),
    ]
}

/// Generate a shuffled `count`-card subset of a full deck
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut alloc = CardIdAllocator::new();
        let mut deck = full_deck(&mut alloc);
        for i in 0..count.min(deck.len()) {
            let j = rng.random_range(i..deck.len());
            deck.swap(i, j);
        }
        deck.truncate(count);
        deck
    })
}

/// Generate a vector of 1 to max_count unique cards
pub fn unique_cards_up_to(max_count: usize) -> impl Strategy<Value = Vec<Card>> {
    (1..=max_count).prop_flat_map(unique_cards)
}

/// Generate a hand of 1 to 13 unique cards
pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    unique_cards_up_to(13)
}

/// Generate a hand containing no card of the given kind
pub fn hand_without_kind(excluded: CardKind) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut alloc = CardIdAllocator::new();
        let mut pool: Vec<Card> = full_deck(&mut alloc)
            .into_iter()
            .filter(|c| c.kind != excluded)
            .collect();
        let count = rng.random_range(1..=13.min(pool.len()));
        for i in 0..count {
            let j = rng.random_range(i..pool.len());
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    })
}

/// Generate a complete trick for a table of `players` seats.
/// Returns (leader_seat, plays in seating order, trump kind).
pub fn complete_trick(
    players: u8,
) -> impl Strategy<Value = (PlayerId, Vec<(PlayerId, Card)>, CardKind)> {
    (0..players, unique_cards(players as usize), kind()).prop_map(
        move |(leader, cards, trump_kind)| {
            let plays: Vec<(PlayerId, Card)> = cards
                .iter()
                .enumerate()
                .map(|(i, &card)| {
                    let seat = ((leader as usize + i) % players as usize) as PlayerId;
                    (seat, card)
                })
                .collect();
            (leader, plays, trump_kind)
        },
    )
}

/// Generate two distinct cards
pub fn two_distinct_cards() -> impl Strategy<Value = (Card, Card)> {
    unique_cards(2).prop_map(|cards| (cards[0], cards[1]))
}
