use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::card::{CardId, NUM_CARDS_DECK};

pub const NUM_FOUNDATIONS: usize = 4;
pub const NUM_TABLEAUS: usize = 7;

/// No pile can ever hold more than the whole deck.
pub type PileCards = ArrayVec<CardId, { NUM_CARDS_DECK as usize }>;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PileKind {
    Tableau,
    Foundation,
    Stock,
    Waste,
}

/// Address of a pile within the layout.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileId {
    Stock,
    Waste,
    Foundation(u8),
    Tableau(u8),
}

impl PileId {
    pub fn kind(self) -> PileKind {
        match self {
            PileId::Stock => PileKind::Stock,
            PileId::Waste => PileKind::Waste,
            PileId::Foundation(_) => PileKind::Foundation,
            PileId::Tableau(_) => PileKind::Tableau,
        }
    }

    /// Every valid pile id: stock, waste, foundations, then tableaus.
    pub fn all() -> impl Iterator<Item = PileId> {
        [PileId::Stock, PileId::Waste]
            .into_iter()
            .chain((0..NUM_FOUNDATIONS as u8).map(PileId::Foundation))
            .chain((0..NUM_TABLEAUS as u8).map(PileId::Tableau))
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PileId::Stock => write!(f, "stock"),
            PileId::Waste => write!(f, "waste"),
            PileId::Foundation(idx) => write!(f, "foundation[{idx}]"),
            PileId::Tableau(idx) => write!(f, "tableau[{idx}]"),
        }
    }
}

/// Ordered cards, index 0 at the bottom. Acceptance rules live in the
/// engine; a pile only knows its kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pile {
    kind: PileKind,
    cards: PileCards,
}

impl Pile {
    pub fn new(kind: PileKind) -> Self {
        Self {
            kind,
            cards: PileCards::new(),
        }
    }

    pub fn kind(&self) -> PileKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<CardId> {
        self.cards.get(index).copied()
    }

    pub fn peek_top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    pub fn push(&mut self, card: CardId) {
        self.cards.push(card);
    }

    pub fn push_many<I: IntoIterator<Item = CardId>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    pub fn pop_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    /// Cuts every card from `index` to the top, bottom-to-top. This is purely
    /// positional: whether the cut is a valid run is not checked here.
    pub fn pop_suffix_from(&mut self, index: usize) -> PileCards {
        if index >= self.cards.len() {
            return PileCards::new();
        }
        self.cards.drain(index..).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}
