use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_CARDS_DECK: u8 = 52;
pub const RANKS_PER_SUIT: u8 = 13;

pub const ACE: u8 = 1;
pub const JACK: u8 = 11;
pub const QUEEN: u8 = 12;
pub const KING: u8 = 13;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// Canonical deck order. Card ids are laid out suit by suit in this order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn index(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Stable identity of one of the 52 cards.
///
/// Ids are suit-major: clubs ace is 0, clubs king is 12, diamonds ace is 13
/// and so on up to spades king at 51. Suit and rank are derived from the id,
/// so the id alone is the whole immutable part of a card.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u8);

impl CardId {
    /// Returns `None` unless `rank` is within `ACE..=KING`.
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        (ACE..=KING)
            .contains(&rank)
            .then(|| Self(suit.index() * RANKS_PER_SUIT + rank - ACE))
    }

    pub fn from_index(index: u8) -> Option<Self> {
        (index < NUM_CARDS_DECK).then_some(Self(index))
    }

    /// Every card in canonical suit-major order.
    pub fn all() -> impl Iterator<Item = CardId> {
        (0..NUM_CARDS_DECK).map(CardId)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn suit(self) -> Suit {
        Suit::ALL[(self.0 / RANKS_PER_SUIT) as usize]
    }

    /// Rank in `1..=13`, ace low.
    pub fn rank(self) -> u8 {
        self.0 % RANKS_PER_SUIT + ACE
    }

    pub fn is_red(self) -> bool {
        self.suit().is_red()
    }

    pub fn is_black(self) -> bool {
        !self.is_red()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", rank_label(self.rank()), self.suit())
    }
}

pub fn rank_label(rank: u8) -> String {
    match rank {
        ACE => "A".to_string(),
        JACK => "J".to_string(),
        QUEEN => "Q".to_string(),
        KING => "K".to_string(),
        r => r.to_string(),
    }
}

/// `true` when `lower` sits exactly one rank below `upper`.
pub fn are_card_ranks_sequential(lower: CardId, upper: CardId) -> bool {
    lower.rank() + 1 == upper.rank()
}

pub fn are_card_colors_different(card1: CardId, card2: CardId) -> bool {
    card1.is_red() != card2.is_red()
}

pub fn are_card_suits_the_same(card1: CardId, card2: CardId) -> bool {
    card1.suit() == card2.suit()
}

/// Read-only view of a card: its identity plus current orientation.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
    pub face_up: bool,
}

impl Card {
    pub fn new(id: CardId, face_up: bool) -> Self {
        Self {
            suit: id.suit(),
            rank: id.rank(),
            face_up,
        }
    }

    pub fn id(&self) -> Option<CardId> {
        CardId::new(self.suit, self.rank)
    }

    pub fn is_red(&self) -> bool {
        self.suit.is_red()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", rank_label(self.rank), self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_suit_major() {
        let ids: Vec<CardId> = CardId::all().collect();
        assert_eq!(ids.len(), NUM_CARDS_DECK as usize);
        assert_eq!(ids[0].suit(), Suit::Clubs);
        assert_eq!(ids[0].rank(), ACE);
        assert_eq!(ids[12].rank(), KING);
        assert_eq!(ids[13].suit(), Suit::Diamonds);
        assert_eq!(ids[13].rank(), ACE);
        assert_eq!(ids[51].suit(), Suit::Spades);
        assert_eq!(ids[51].rank(), KING);
    }

    #[test]
    fn new_round_trips_suit_and_rank() {
        for suit in Suit::ALL {
            for rank in ACE..=KING {
                let id = CardId::new(suit, rank).unwrap();
                assert_eq!(id.suit(), suit);
                assert_eq!(id.rank(), rank);
            }
        }
        assert_eq!(CardId::new(Suit::Hearts, 0), None);
        assert_eq!(CardId::new(Suit::Hearts, 14), None);
        assert_eq!(CardId::from_index(52), None);
    }

    #[test]
    fn colors() {
        assert!(CardId::new(Suit::Hearts, 5).unwrap().is_red());
        assert!(CardId::new(Suit::Diamonds, 5).unwrap().is_red());
        assert!(CardId::new(Suit::Clubs, 5).unwrap().is_black());
        assert!(CardId::new(Suit::Spades, 5).unwrap().is_black());
    }

    #[test]
    fn sequential_ranks_and_colors() {
        let seven_spades = CardId::new(Suit::Spades, 7).unwrap();
        let eight_hearts = CardId::new(Suit::Hearts, 8).unwrap();
        let eight_clubs = CardId::new(Suit::Clubs, 8).unwrap();
        assert!(are_card_ranks_sequential(seven_spades, eight_hearts));
        assert!(!are_card_ranks_sequential(eight_hearts, seven_spades));
        assert!(are_card_colors_different(seven_spades, eight_hearts));
        assert!(!are_card_colors_different(seven_spades, eight_clubs));
        assert!(!are_card_suits_the_same(seven_spades, eight_clubs));
    }

    #[test]
    fn labels() {
        assert_eq!(CardId::new(Suit::Hearts, ACE).unwrap().to_string(), "A♥");
        assert_eq!(CardId::new(Suit::Clubs, 10).unwrap().to_string(), "10♣");
        assert_eq!(CardId::new(Suit::Spades, QUEEN).unwrap().to_string(), "Q♠");
    }
}
