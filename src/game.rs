//! The Klondike engine.
//!
//! `Game` owns every card and pile. Collaborators act through
//! [`Game::attempt_move`], [`Game::draw_stock`], [`Game::undo`] and
//! [`Game::redo`], and read state back through [`Game::snapshot`].
//! Cards live in an arena indexed by [`CardId`]; piles only hold ids, and a
//! move cuts ids from one pile and appends them to another, so every card is
//! in exactly one pile at all times.

use log::{debug, error, info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::card::{
    are_card_colors_different, are_card_ranks_sequential, are_card_suits_the_same, Card, CardId,
    ACE, KING, NUM_CARDS_DECK,
};
use crate::deck::Deck;
use crate::error::{EngineError, EngineResult, Rejection};
use crate::moves::{Move, MoveManager};
use crate::pile::{Pile, PileId, PileKind, NUM_FOUNDATIONS, NUM_TABLEAUS};

/// Which cards to pick up from the source pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lift {
    /// The top card only.
    Top,
    /// The top `n` cards.
    Count(usize),
    /// Every card from this index (0 = bottom) up to the top.
    From(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted { uncovered: Option<CardId> },
    Rejected(Rejection),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            MoveOutcome::Rejected(reason) => Some(*reason),
            MoveOutcome::Accepted { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Card turned from the stock onto the waste.
    pub drew: Option<CardId>,
    /// The waste was turned back over into the stock.
    pub recycled: bool,
}

impl DrawOutcome {
    /// Both stock and waste were empty.
    pub fn is_noop(&self) -> bool {
        self.drew.is_none() && !self.recycled
    }
}

/// Owned copy of every pile, bottom card first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub foundations: [Vec<Card>; NUM_FOUNDATIONS],
    pub tableaus: [Vec<Card>; NUM_TABLEAUS],
}

impl Snapshot {
    pub fn pile(&self, id: PileId) -> Option<&[Card]> {
        match id {
            PileId::Stock => Some(self.stock.as_slice()),
            PileId::Waste => Some(self.waste.as_slice()),
            PileId::Foundation(idx) => self.foundations.get(idx as usize).map(Vec::as_slice),
            PileId::Tableau(idx) => self.tableaus.get(idx as usize).map(Vec::as_slice),
        }
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.stock
            .iter()
            .chain(&self.waste)
            .chain(self.foundations.iter().flatten())
            .chain(self.tableaus.iter().flatten())
    }

    pub fn total_cards(&self) -> usize {
        self.cards().count()
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    tableaus: [Pile; NUM_TABLEAUS],
    foundations: [Pile; NUM_FOUNDATIONS],
    stock: Pile,
    waste: Pile,
    face_up: [bool; NUM_CARDS_DECK as usize],
    history: MoveManager,
    seed: Option<u64>,
    revealed: Option<CardId>,
}

impl Game {
    /// Deals a shuffled game. Without a seed one is drawn at random, so the
    /// deal can still be replayed through [`Game::seed`].
    pub fn new(seed: Option<u64>) -> Self {
        let mut game = Self::empty();
        game.new_game(seed);
        game
    }

    /// Deals `deck` as it stands, without shuffling.
    pub fn from_deck(deck: Deck) -> Self {
        let mut game = Self::empty();
        game.deal(deck);
        info!("Dealt prearranged deck");
        game
    }

    fn empty() -> Self {
        Self {
            tableaus: std::array::from_fn(|_| Pile::new(PileKind::Tableau)),
            foundations: std::array::from_fn(|_| Pile::new(PileKind::Foundation)),
            stock: Pile::new(PileKind::Stock),
            waste: Pile::new(PileKind::Waste),
            face_up: [false; NUM_CARDS_DECK as usize],
            history: MoveManager::new(),
            seed: None,
            revealed: None,
        }
    }

    /// Throws away the current game, history included, and deals again.
    pub fn new_game(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        self.deal(Deck::shuffled(&mut rng));
        self.seed = Some(seed);
        info!("Dealt new game with seed {seed}");
    }

    fn deal(&mut self, mut deck: Deck) {
        self.tableaus.iter_mut().for_each(Pile::clear);
        self.foundations.iter_mut().for_each(Pile::clear);
        self.stock.clear();
        self.waste.clear();
        self.face_up = [false; NUM_CARDS_DECK as usize];
        self.history.clear();
        self.seed = None;
        self.revealed = None;

        for (col, tableau) in self.tableaus.iter_mut().enumerate() {
            for row in 0..=col {
                let Some(card) = deck.draw() else { break };
                self.face_up[card.index()] = row == col;
                tableau.push(card);
            }
        }
        while let Some(card) = deck.draw() {
            self.stock.push(card);
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn card(&self, id: CardId) -> Card {
        Card::new(id, self.is_face_up(id))
    }

    pub fn is_face_up(&self, id: CardId) -> bool {
        self.face_up[id.index()]
    }

    fn set_face_up(&mut self, id: CardId, face_up: bool) {
        self.face_up[id.index()] = face_up;
    }

    pub fn pile(&self, id: PileId) -> EngineResult<&Pile> {
        match id {
            PileId::Stock => Some(&self.stock),
            PileId::Waste => Some(&self.waste),
            PileId::Foundation(idx) => self.foundations.get(idx as usize),
            PileId::Tableau(idx) => self.tableaus.get(idx as usize),
        }
        .ok_or(EngineError::UnknownPile(id))
    }

    fn pile_mut(&mut self, id: PileId) -> EngineResult<&mut Pile> {
        match id {
            PileId::Stock => Some(&mut self.stock),
            PileId::Waste => Some(&mut self.waste),
            PileId::Foundation(idx) => self.foundations.get_mut(idx as usize),
            PileId::Tableau(idx) => self.tableaus.get_mut(idx as usize),
        }
        .ok_or(EngineError::UnknownPile(id))
    }

    pub fn history(&self) -> &MoveManager {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.has_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.has_redo()
    }

    /// The card most recently turned face-up by an uncover or a stock draw,
    /// if the caller has not collected it yet.
    pub fn take_revealed(&mut self) -> Option<CardId> {
        self.revealed.take()
    }

    pub fn is_won(&self) -> bool {
        self.foundations.iter().map(Pile::len).sum::<usize>() == NUM_CARDS_DECK as usize
    }

    pub fn snapshot(&self) -> Snapshot {
        let view = |pile: &Pile| -> Vec<Card> {
            pile.cards().iter().map(|&id| self.card(id)).collect()
        };
        Snapshot {
            stock: view(&self.stock),
            waste: view(&self.waste),
            foundations: std::array::from_fn(|i| view(&self.foundations[i])),
            tableaus: std::array::from_fn(|i| view(&self.tableaus[i])),
        }
    }

    /// Judges a move without performing it.
    pub fn check_move(
        &self,
        source: PileId,
        lift: Lift,
        destination: PileId,
    ) -> EngineResult<Result<(), Rejection>> {
        Ok(self.validate(source, lift, destination)?.map(|_| ()))
    }

    /// Returns the number of cards the move would carry.
    fn validate(
        &self,
        source: PileId,
        lift: Lift,
        destination: PileId,
    ) -> EngineResult<Result<usize, Rejection>> {
        let from = self.pile(source)?;
        let to = self.pile(destination)?;
        Ok(self.judge(from, lift, to, source == destination))
    }

    fn judge(&self, from: &Pile, lift: Lift, to: &Pile, same_pile: bool) -> Result<usize, Rejection> {
        if from.is_empty() {
            return Err(Rejection::SourceEmpty);
        }
        let count = match lift {
            Lift::Top => 1,
            Lift::Count(n) => n,
            Lift::From(index) => from.len().saturating_sub(index),
        };
        if count == 0 || count > from.len() {
            return Err(Rejection::InvalidLift);
        }
        let group = &from.cards()[from.len() - count..];
        if group.iter().any(|&card| !self.is_face_up(card)) {
            return Err(Rejection::FaceDownCardNotLiftable);
        }
        if same_pile {
            return Err(Rejection::SameSourceAndDestination);
        }

        // Only the bottom card of the group is checked against the target.
        let first = group[0];
        match to.kind() {
            PileKind::Foundation => {
                if count != 1 {
                    return Err(Rejection::MultiCardToFoundation);
                }
                match to.peek_top() {
                    None if first.rank() == ACE => Ok(count),
                    None => Err(Rejection::FoundationRequiresAce),
                    Some(top) if !are_card_suits_the_same(first, top) => {
                        Err(Rejection::WrongSuitForFoundation)
                    }
                    Some(top) if !are_card_ranks_sequential(top, first) => {
                        Err(Rejection::WrongRankForFoundation)
                    }
                    Some(_) => Ok(count),
                }
            }
            PileKind::Tableau => match to.peek_top() {
                None if first.rank() == KING => Ok(count),
                None => Err(Rejection::TableauRequiresKing),
                Some(top) if !are_card_colors_different(first, top) => {
                    Err(Rejection::WrongColorForTableau)
                }
                Some(top) if !are_card_ranks_sequential(first, top) => {
                    Err(Rejection::WrongRankForTableau)
                }
                Some(_) => Ok(count),
            },
            PileKind::Stock | PileKind::Waste => Err(Rejection::InvalidDestinationKind),
        }
    }

    /// Validates and, if legal, performs a move. Player mistakes come back as
    /// [`MoveOutcome::Rejected`]; only unknown pile ids are errors.
    pub fn attempt_move(
        &mut self,
        source: PileId,
        lift: Lift,
        destination: PileId,
    ) -> EngineResult<MoveOutcome> {
        let count = match self.validate(source, lift, destination)? {
            Ok(count) => count,
            Err(reason) => {
                trace!("Rejected {source} -> {destination} ({lift:?}): {reason}");
                return Ok(MoveOutcome::Rejected(reason));
            }
        };

        self.transfer(source, destination, count)?;
        let uncovered = match source.kind() {
            PileKind::Tableau => self.uncover_top(source)?,
            _ => None,
        };
        if uncovered.is_some() {
            self.revealed = uncovered;
        }

        let mv = Move::new(source, destination, count, uncovered);
        debug!("{mv}");
        self.history.push(mv);
        Ok(MoveOutcome::Accepted { uncovered })
    }

    /// Turns one card from the stock onto the waste, or recycles the waste
    /// once the stock runs out.
    pub fn draw_stock(&mut self) -> DrawOutcome {
        if !self.stock.is_empty() {
            self.turn_over(PileId::Stock, 1);
            let drew = self.waste.peek_top();
            self.revealed = drew;
            self.history.push(Move::new(PileId::Stock, PileId::Waste, 1, None));
            if let Some(card) = drew {
                debug!("Drew {card} from stock");
            }
            DrawOutcome {
                drew,
                recycled: false,
            }
        } else if !self.waste.is_empty() {
            let count = self.waste.len();
            self.turn_over(PileId::Waste, count);
            self.history
                .push(Move::new(PileId::Waste, PileId::Stock, count, None));
            debug!("Recycled {count} cards from waste into stock");
            DrawOutcome {
                drew: None,
                recycled: true,
            }
        } else {
            trace!("Stock and waste are both empty");
            DrawOutcome::default()
        }
    }

    /// Reverts the most recent move. Returns `false` when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        let Some(mv) = self.history.pop_undo() else {
            debug!("Nothing to undo");
            return false;
        };
        if mv.is_draw() {
            self.turn_over(PileId::Waste, mv.count());
        } else if mv.is_recycle() {
            self.turn_over(PileId::Stock, mv.count());
        } else {
            if let Err(e) = self.transfer(mv.destination(), mv.source(), mv.count()) {
                error!("Failed to undo {mv}: {e}");
                return false;
            }
            if let Some(card) = mv.uncovered() {
                self.set_face_up(card, false);
            }
        }
        // Whatever was revealed is face-down again or back in the stock.
        self.revealed = None;
        debug!("Undid {mv}");
        true
    }

    /// Reapplies the most recently undone move. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(mv) = self.history.pop_redo() else {
            debug!("Nothing to redo");
            return false;
        };
        if mv.is_draw() {
            self.turn_over(PileId::Stock, mv.count());
            self.revealed = self.waste.peek_top();
        } else if mv.is_recycle() {
            self.turn_over(PileId::Waste, mv.count());
        } else {
            if let Err(e) = self.transfer(mv.source(), mv.destination(), mv.count()) {
                error!("Failed to redo {mv}: {e}");
                return false;
            }
            if let Some(card) = mv.uncovered() {
                self.set_face_up(card, true);
                self.revealed = Some(card);
            }
        }
        debug!("Redid {mv}");
        true
    }

    /// Moves the top `count` cards of `source` onto `destination` as one
    /// group, keeping their order.
    fn transfer(&mut self, source: PileId, destination: PileId, count: usize) -> EngineResult<()> {
        self.pile(destination)?;
        let from = self.pile_mut(source)?;
        let group = from.pop_suffix_from(from.len().saturating_sub(count));
        self.pile_mut(destination)?.push_many(group);
        Ok(())
    }

    /// Deals `count` cards one at a time between stock and waste. Each card
    /// lands face-up on the waste or face-down on the stock, and the order
    /// of the moved cards is reversed.
    fn turn_over(&mut self, from: PileId, count: usize) {
        let (source, destination, face_up) = match from {
            PileId::Stock => (&mut self.stock, &mut self.waste, true),
            _ => (&mut self.waste, &mut self.stock, false),
        };
        for _ in 0..count {
            let Some(card) = source.pop_top() else { break };
            self.face_up[card.index()] = face_up;
            destination.push(card);
        }
    }

    fn uncover_top(&mut self, id: PileId) -> EngineResult<Option<CardId>> {
        let top = self.pile(id)?.peek_top();
        Ok(match top {
            Some(card) if !self.is_face_up(card) => {
                self.set_face_up(card, true);
                Some(card)
            }
            _ => None,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(None)
    }
}
