//! Property tests for the pure card rules.
//!
//! Properties tested:
//! - A non-empty hand always has at least one legal card against any lead
//! - Legal cards are exactly the hand cards whose kind is a legal answer
//! - Wizards and jesters in hand are always legal answers
//! - Nothing beats a wizard and a wizard beats everything else
//! - Under a suit trump a jester beats nothing and loses to any non-jester
//! - Weakest and strongest picks are hand members and the weakest never
//!   beats the strongest
//! - The bids/wins coefficient moves one-for-one with submitted bids
//! - The mid-trick leading card is always one of the dropped cards

use proptest::prelude::*;

use crate::domain::cards_logic::can_beat;
use crate::domain::cards_types::{JESTER_RANK, WIZARD_RANK};
use crate::domain::dealing::{find_card, full_deck};
use crate::domain::rules::{
    bids_wins_coefficient, leading_card, legal_cards, legal_response_kinds, strongest_card,
    weakest_card,
};
use crate::domain::{test_gens, test_prelude, CardIdAllocator, CardKind};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: a non-empty hand always has a legal card, whatever leads
    #[test]
    fn prop_non_empty_hand_has_a_legal_answer(
        cards in (2..=14usize).prop_flat_map(test_gens::unique_cards),
    ) {
        let lead = cards[0];
        let hand = &cards[1..];

        let legal = legal_cards(hand, Some(lead));
        prop_assert!(!legal.is_empty(), "hand {hand:?} has no legal answer to {lead}");
    }

    /// Property: legal cards are exactly the hand cards of a legal kind
    #[test]
    fn prop_legal_cards_match_legal_kinds(
        cards in (2..=14usize).prop_flat_map(test_gens::unique_cards),
    ) {
        let lead = cards[0];
        let hand = &cards[1..];

        let kinds = legal_response_kinds(lead, hand);
        let legal = legal_cards(hand, Some(lead));

        for card in hand {
            prop_assert_eq!(
                legal.contains(card),
                kinds.contains(&card.kind),
                "membership mismatch for {} against {}", card, lead
            );
        }
        for card in &legal {
            prop_assert!(hand.contains(card), "{card} is not in the hand");
        }
    }

    /// Property: without a lead the whole hand is playable
    #[test]
    fn prop_no_lead_frees_the_whole_hand(hand in test_gens::hand()) {
        prop_assert_eq!(legal_cards(&hand, None), hand);
    }

    /// Property: wizards and jesters in hand are always legal answers
    #[test]
    fn prop_hand_specials_are_always_legal(
        cards in (2..=14usize).prop_flat_map(test_gens::unique_cards),
    ) {
        let lead = cards[0];
        let hand = &cards[1..];

        let legal = legal_cards(hand, Some(lead));
        for card in hand {
            if card.kind == CardKind::Wizard || card.kind == CardKind::Jester {
                prop_assert!(legal.contains(card),
                    "special {} should answer a {} lead", card, lead);
            }
        }
    }

    /// Property: nothing beats a wizard and a wizard beats everything else
    #[test]
    fn prop_wizards_dominate(idx in 0..60usize, trump in test_gens::kind()) {
        let deck = full_deck(&mut CardIdAllocator::new());
        let wizard = find_card(&deck, CardKind::Wizard, WIZARD_RANK).unwrap();
        let card = deck[idx];

        prop_assert!(!can_beat(card, wizard, trump),
            "{} should not beat a wizard under {:?} trump", card, trump);
        prop_assert_eq!(can_beat(wizard, card, trump), card.kind != CardKind::Wizard,
            "wizard vs {} under {:?} trump", card, trump);
    }

    /// Property: under a suit trump a jester beats nothing and loses to
    /// any non-jester
    #[test]
    fn prop_jesters_fold(idx in 0..60usize, trump in test_gens::suit_kind()) {
        let deck = full_deck(&mut CardIdAllocator::new());
        let jester = find_card(&deck, CardKind::Jester, JESTER_RANK).unwrap();
        let card = deck[idx];

        prop_assert!(!can_beat(jester, card, trump),
            "a jester should not beat {} under {:?} trump", card, trump);
        prop_assert_eq!(can_beat(card, jester, trump), card.kind != CardKind::Jester,
            "{} vs jester under {:?} trump", card, trump);
    }

    /// Property: weakest/strongest come from the hand and the weakest
    /// never beats the strongest
    #[test]
    fn prop_weakest_never_beats_strongest(
        hand in test_gens::hand(),
        trump in test_gens::suit_kind(),
    ) {
        let weakest = weakest_card(&hand, trump).unwrap();
        let strongest = strongest_card(&hand, trump).unwrap();

        prop_assert!(hand.contains(&weakest));
        prop_assert!(hand.contains(&strongest));
        prop_assert!(!can_beat(weakest, strongest, trump),
            "weakest {} beats strongest {} under {:?} trump", weakest, strongest, trump);
        for card in &hand {
            prop_assert!(!can_beat(*card, strongest, trump),
                "{} beats the strongest pick {} under {:?} trump", card, strongest, trump);
        }
    }

    /// Property: the coefficient moves one-for-one with submitted bids
    #[test]
    fn prop_coefficient_tracks_bids(
        bids in prop::collection::vec(prop::option::of(-3i32..20), 2..=6),
        extra in -3i32..20,
        round_no in 1u8..=20,
    ) {
        let base = bids_wins_coefficient(&bids, round_no);

        let mut with_extra = bids.clone();
        with_extra.push(Some(extra));
        prop_assert_eq!(bids_wins_coefficient(&with_extra, round_no), base - extra);

        let mut with_pass = bids;
        with_pass.push(None);
        prop_assert_eq!(bids_wins_coefficient(&with_pass, round_no), base);
    }

    /// Property: the mid-trick leading card is one of the dropped cards
    #[test]
    fn prop_leading_card_is_a_dropped_card(
        cards in (1..=6usize).prop_flat_map(test_gens::unique_cards),
        trump in test_gens::kind(),
    ) {
        let lead = cards[0];
        let responses = &cards[1..];

        let leading = leading_card(lead, responses, trump);
        prop_assert!(cards.contains(&leading), "leading card {leading} was never dropped");
        if responses.is_empty() {
            prop_assert_eq!(leading, lead);
        }
    }
}
