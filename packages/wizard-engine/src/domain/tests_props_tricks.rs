//! Property tests for the trick resolver.
//!
//! Properties tested:
//! - The resolver agrees with the pairwise leading-card fold
//! - The winner is always one of the plays
//! - The first wizard dropped wins the trick no matter what follows
//! - Without wizards the winner does not depend on response order

use proptest::prelude::*;
use rand::Rng as _;

use crate::domain::dealing::full_deck;
use crate::domain::rules::leading_card;
use crate::domain::tricks::winning_play;
use crate::domain::{test_gens, test_prelude, Card, CardIdAllocator, CardKind, PlayerId};

/// Complete trick with one or two wizards planted at random positions.
fn wizard_laden_trick() -> impl Strategy<Value = (Vec<(PlayerId, Card)>, CardKind)> {
    (2u8..=6, test_gens::kind()).prop_perturb(|(players, trump), mut rng| {
        let mut alloc = CardIdAllocator::new();
        let deck = full_deck(&mut alloc);
        let wizards: Vec<Card> = deck
            .iter()
            .copied()
            .filter(|c| c.kind == CardKind::Wizard)
            .collect();
        let mut fillers: Vec<Card> = deck
            .into_iter()
            .filter(|c| c.kind != CardKind::Wizard)
            .collect();

        let seats = players as usize;
        for i in 0..seats {
            let j = rng.random_range(i..fillers.len());
            fillers.swap(i, j);
        }
        let mut cards: Vec<Card> = fillers[..seats].to_vec();

        let wizard_count = rng.random_range(1..=2.min(seats));
        let mut positions: Vec<usize> = (0..seats).collect();
        for i in 0..wizard_count {
            let j = rng.random_range(i..seats);
            positions.swap(i, j);
        }
        for (w, &pos) in positions[..wizard_count].iter().enumerate() {
            cards[pos] = wizards[w];
        }

        let plays: Vec<(PlayerId, Card)> = cards
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i as PlayerId, c))
            .collect();
        (plays, trump)
    })
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the resolver picks exactly the card the pairwise
    /// leading-card fold settles on, and the winner is one of the plays
    #[test]
    fn prop_resolver_agrees_with_the_leading_card_fold(
        (_, plays, trump) in (2u8..=6).prop_flat_map(test_gens::complete_trick),
    ) {
        let responses: Vec<Card> = plays[1..].iter().map(|(_, c)| *c).collect();
        let folded = leading_card(plays[0].1, &responses, trump);

        let (win_seat, win_card) = winning_play(&plays, trump).unwrap();
        prop_assert_eq!(win_card, folded, "resolver and fold disagree on {:?}", plays);
        prop_assert!(plays.contains(&(win_seat, win_card)),
            "winner ({}, {}) was never played", win_seat, win_card);
    }

    /// Property: the first wizard dropped wins the trick
    #[test]
    fn prop_first_wizard_always_wins((plays, trump) in wizard_laden_trick()) {
        let first = plays
            .iter()
            .position(|(_, c)| c.kind == CardKind::Wizard)
            .unwrap();

        let winner = winning_play(&plays, trump).unwrap();
        prop_assert_eq!(winner, plays[first],
            "first wizard at position {} should win {:?}", first, plays);
    }

    /// Property: with no wizards in the trick and a suit trump, the
    /// winning card does not depend on the order responses came in
    #[test]
    fn prop_wizard_free_winner_ignores_response_order(
        cards in (2..=6usize).prop_flat_map(test_gens::unique_cards),
        trump in test_gens::suit_kind(),
    ) {
        let mut cards = cards;
        prop_assume!(cards.iter().all(|c| c.kind != CardKind::Wizard));
        let lead_pos = cards.iter().position(|c| c.kind != CardKind::Jester);
        prop_assume!(lead_pos.is_some());
        cards.swap(0, lead_pos.unwrap());

        let forward: Vec<(PlayerId, Card)> = cards
            .iter()
            .enumerate()
            .map(|(i, &c)| (i as PlayerId, c))
            .collect();
        let mut reversed = vec![forward[0]];
        reversed.extend(forward[1..].iter().rev().copied());

        let (_, win_fwd) = winning_play(&forward, trump).unwrap();
        let (_, win_rev) = winning_play(&reversed, trump).unwrap();
        prop_assert_eq!(win_fwd, win_rev,
            "winner depends on response order for {:?} under {:?} trump", cards, trump);
    }
}

#[test]
fn winning_play_without_plays_is_none() {
    assert!(winning_play(&[], CardKind::Red).is_none());
}

// Response order is NOT free when wizards are involved: the first one
// played wins, so playing the same two wizards in the other order moves
// the trick to the other seat.
#[test]
fn swapping_two_wizard_plays_swaps_the_winner() {
    let deck = full_deck(&mut CardIdAllocator::new());
    let lead = deck[4]; // B5
    let wizards: Vec<Card> = deck
        .iter()
        .copied()
        .filter(|c| c.kind == CardKind::Wizard)
        .take(2)
        .collect();

    let forward = vec![(0, lead), (1, wizards[0]), (2, wizards[1])];
    let swapped = vec![(0, lead), (2, wizards[1]), (1, wizards[0])];

    assert_eq!(winning_play(&forward, CardKind::Red), Some((1, wizards[0])));
    assert_eq!(winning_play(&swapped, CardKind::Red), Some((2, wizards[1])));
}

#[test]
fn a_single_play_wins_its_own_trick() {
    let deck = full_deck(&mut CardIdAllocator::new());
    let plays = vec![(2, deck[0])];
    assert_eq!(winning_play(&plays, CardKind::Green), Some((2, deck[0])));
}
