//! Core card-related types: Card, CardKind, CardId, CardIdAllocator

use std::hash::{Hash, Hasher};

/// Rank printed on every jester. Loses every comparison.
pub const JESTER_RANK: u8 = 0;
/// Rank carried by every wizard. Above every suited rank.
pub const WIZARD_RANK: u8 = 14;
/// Lowest rank printed on a suited card.
pub const MIN_SUITED_RANK: u8 = 1;
/// Highest rank printed on a suited card.
pub const MAX_SUITED_RANK: u8 = 13;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CardKind {
    Blue,
    Red,
    Green,
    Yellow,
    Wizard,
    Jester,
}

impl CardKind {
    /// Every kind, in deck order.
    pub const ALL: [CardKind; 6] = [
        CardKind::Blue,
        CardKind::Red,
        CardKind::Green,
        CardKind::Yellow,
        CardKind::Wizard,
        CardKind::Jester,
    ];

    /// The four colored suits.
    pub const SUITS: [CardKind; 4] = [
        CardKind::Blue,
        CardKind::Red,
        CardKind::Green,
        CardKind::Yellow,
    ];

    pub fn is_suit(self) -> bool {
        matches!(
            self,
            CardKind::Blue | CardKind::Red | CardKind::Green | CardKind::Yellow
        )
    }
}

/// Identity of one physical card, unique within one allocator's lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CardId(pub u32);

/// One physical card.
///
/// Equality and hashing go through the id alone: the deck holds four
/// wizards and four jesters that are distinct cards despite identical
/// kind and rank. Cards minted by different allocators must not be mixed.
#[derive(Debug, Copy, Clone)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub rank: u8,
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Note: Ord on Card is only for stable sorting: kind order B<R<G<Y<W<J, then
// rank, then id. Do not use for trick resolution or comparisons involving trump.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.kind, self.rank, self.id).cmp(&(other.kind, other.rank, other.id))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Hands out card identities.
///
/// Injected into deck construction rather than kept as process state, so a
/// test or a fresh game can reset identity allocation explicitly.
#[derive(Debug, Default)]
pub struct CardIdAllocator {
    next: u32,
}

impl CardIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }

    /// Forget every id handed out so far.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
