use rand::{seq::SliceRandom, Rng};
use std::collections::HashSet;

use crate::card::{CardId, NUM_CARDS_DECK};
use crate::error::{EngineError, EngineResult};

/// Source of cards for a deal. The top of the deck is the end of `cards`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<CardId>,
}

impl Deck {
    /// All 52 cards in canonical suit-major order.
    pub fn standard() -> Self {
        Self {
            cards: CardId::all().collect(),
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    /// Builds a deck in exactly the given order, last element on top.
    pub fn from_order(order: Vec<CardId>) -> EngineResult<Self> {
        if order.len() != NUM_CARDS_DECK as usize {
            return Err(EngineError::InvalidDeck(format!(
                "expected {} cards, got {}",
                NUM_CARDS_DECK,
                order.len()
            )));
        }
        let mut seen = HashSet::with_capacity(order.len());
        if let Some(dup) = order.iter().find(|card| !seen.insert(**card)) {
            return Err(EngineError::InvalidDeck(format!("{dup} appears twice")));
        }
        Ok(Self { cards: order })
    }

    /// Fisher-Yates, via `SliceRandom`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
