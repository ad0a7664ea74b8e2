//! Win-probability estimates for bidding and card selection.
//!
//! The model treats every unseen card slot held by an opponent as an
//! independent draw from the pool of unseen cards. That overstates
//! independence (opponents hold cards without replacement) but it keeps
//! the estimate closed-form and cheap, and it is what the estimator
//! policy tunes its thresholds against.
//!
//! Two variants exist. [`estimate_trick_win`] answers "if I drop this
//! card on the current trick, does it hold up?" using full knowledge of
//! the round so far. [`estimate_bid_win`] is the abstract bid-time
//! variant: no trick context yet, every opponent slot over the whole
//! round counts against the candidate.

use super::cards_logic::{beats_all, cards_that_beat, count_of_kind};
use super::cards_types::{Card, CardKind};

/// Inputs for a trick-level win estimate.
#[derive(Debug, Clone, Copy)]
pub struct TrickEstimateInput<'a> {
    /// Card whose chances are being estimated.
    pub candidate: Card,
    /// Face-up trump card of the round.
    pub trump_card: Card,
    /// Cards played out in earlier tricks of the round.
    pub used_cards: &'a [Card],
    /// The estimating player's current hand.
    pub own_cards: &'a [Card],
    /// Cards dropped so far in the current trick.
    pub dropped_in_trick: &'a [Card],
    /// Number of opponents in the round.
    pub opponents: u8,
    /// Hand size at the start of the current trick.
    pub hand_size_at_trick_start: u8,
    /// Whether the estimating player leads the trick.
    pub first_to_drop: bool,
}

/// Inputs for the abstract bid-time estimate.
#[derive(Debug, Clone, Copy)]
pub struct BidEstimateInput<'a> {
    /// Card whose chances are being estimated.
    pub candidate: Card,
    /// Face-up trump card of the round.
    pub trump_card: Card,
    /// The estimating player's dealt hand.
    pub own_cards: &'a [Card],
    /// Hand size of the round.
    pub hand_size: u8,
    /// Total players in the game.
    pub players: u8,
}

/// Probability that `candidate`, dropped on the current trick, wins it.
///
/// Unseen cards are the deck minus the trump card, the estimating
/// player's hand and everything already played this round. For a
/// responding player the cards already dropped in the trick shrink both
/// the pool and the opponents still to act, and a candidate that fails to
/// beat any dropped card scores zero outright.
pub fn estimate_trick_win(deck: &[Card], input: &TrickEstimateInput<'_>) -> f64 {
    let trump_kind = input.trump_card.kind;

    if input.first_to_drop {
        if input.candidate.kind == CardKind::Wizard {
            return 1.0;
        }
        let unseen = unseen_pool(deck, input);
        let beating = cards_that_beat(&unseen, input.candidate, trump_kind);
        if beating.is_empty() {
            return 1.0;
        }
        if input.candidate.kind == CardKind::Jester {
            return 0.0;
        }
        let slots = u32::from(input.opponents) * u32::from(input.hand_size_at_trick_start);
        if input.candidate.kind == trump_kind || input.hand_size_at_trick_start == 1 {
            return survive_all(beating.len(), unseen.len(), slots);
        }
        return three_factor_win(&unseen, &beating, input.candidate, trump_kind, slots);
    }

    let mut unseen = unseen_pool(deck, input);
    unseen.retain(|c| !input.dropped_in_trick.contains(c));

    if !beats_all(input.candidate, input.dropped_in_trick, trump_kind) {
        return 0.0;
    }
    let yet_to_act = input
        .opponents
        .saturating_sub(input.dropped_in_trick.len() as u8);
    if yet_to_act == 0 {
        return 1.0;
    }
    if unseen.is_empty() {
        return 1.0;
    }
    let beating = cards_that_beat(&unseen, input.candidate, trump_kind);
    if beating.is_empty() {
        return 1.0;
    }
    let slots = u32::from(yet_to_act) * u32::from(input.hand_size_at_trick_start);
    if input.candidate.kind == trump_kind || input.hand_size_at_trick_start == 1 {
        return survive_all(beating.len(), unseen.len(), slots);
    }
    three_factor_win(&unseen, &beating, input.candidate, trump_kind, slots)
}

/// Probability that `candidate` wins some trick of the round, estimated
/// at bid time.
///
/// Unseen cards are the deck minus the trump card and the estimating
/// player's hand. Every opponent card over the whole round counts as one
/// independent chance to beat the candidate, so long rounds pull the
/// estimate down hard. Wizards come out at 1.0 because nothing in the
/// pool beats them.
pub fn estimate_bid_win(deck: &[Card], input: &BidEstimateInput<'_>) -> f64 {
    let trump_kind = input.trump_card.kind;
    let unseen: Vec<Card> = deck
        .iter()
        .copied()
        .filter(|c| *c != input.trump_card && !input.own_cards.contains(c))
        .collect();

    let beating = cards_that_beat(&unseen, input.candidate, trump_kind);
    if beating.is_empty() {
        return 1.0;
    }
    if input.candidate.kind == CardKind::Jester {
        return 0.0;
    }
    let slots = u32::from(input.hand_size) * u32::from(input.players.saturating_sub(1));
    survive_all(beating.len(), unseen.len(), slots)
}

fn unseen_pool(deck: &[Card], input: &TrickEstimateInput<'_>) -> Vec<Card> {
    deck.iter()
        .copied()
        .filter(|c| {
            *c != input.trump_card
                && !input.used_cards.contains(c)
                && !input.own_cards.contains(c)
        })
        .collect()
}

/// Probability that none of `slots` independent draws from a pool of
/// `pool` unseen cards hits one of the `beating` cards.
fn survive_all(beating: usize, pool: usize, slots: u32) -> f64 {
    (1.0 - beating as f64 / pool as f64).powi(slots as i32)
}

/// Full three-factor estimate for a non-trump candidate.
///
/// Factors, each over the same `slots` independent draws:
/// wizards missing from the draws, beating cards of the candidate's own
/// kind missing, and the lead holding up against trumping. The last
/// factor discounts the trump threat by the chance opponents still hold
/// the candidate's kind and so cannot trump in.
fn three_factor_win(
    unseen: &[Card],
    beating: &[Card],
    candidate: Card,
    trump_kind: CardKind,
    slots: u32,
) -> f64 {
    let pool = unseen.len() as f64;
    let same_kind = count_of_kind(unseen, candidate.kind) as f64;
    let wizard_beats = beating
        .iter()
        .filter(|c| c.kind == CardKind::Wizard)
        .count() as f64;
    let trump_beats = beating
        .iter()
        .filter(|c| c.kind == trump_kind && c.kind != CardKind::Wizard)
        .count() as f64;
    let same_kind_beats = beating.len() as f64 - wizard_beats - trump_beats;

    let p_no_same_kind = (1.0 - same_kind / pool).powi(slots as i32);
    let p_no_beating_trumps = (1.0 - trump_beats / pool).powi(slots as i32);
    let p_no_wizards = (1.0 - wizard_beats / pool).powi(slots as i32);
    let p_no_same_kind_beats = (1.0 - same_kind_beats / pool).powi(slots as i32);

    let p_lead_holds = 1.0 - p_no_same_kind * (1.0 - p_no_beating_trumps);
    p_no_wizards * p_no_same_kind_beats * p_lead_holds
}
