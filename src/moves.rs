use std::fmt;

use crate::card::CardId;
use crate::pile::PileId;

/// One committed transition, with enough information to invert it.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Move {
    source: PileId,
    destination: PileId,
    count: usize,
    // tableau card turned face-up because the move exposed it
    uncovered: Option<CardId>,
}

impl Move {
    pub fn new(
        source: PileId,
        destination: PileId,
        count: usize,
        uncovered: Option<CardId>,
    ) -> Self {
        Self {
            source,
            destination,
            count,
            uncovered,
        }
    }

    pub fn source(&self) -> PileId {
        self.source
    }

    pub fn destination(&self) -> PileId {
        self.destination
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn uncovered(&self) -> Option<CardId> {
        self.uncovered
    }

    /// Stock to waste, one card turned face-up.
    pub fn is_draw(&self) -> bool {
        self.source == PileId::Stock && self.destination == PileId::Waste
    }

    /// Waste turned back over onto the stock.
    pub fn is_recycle(&self) -> bool {
        self.source == PileId::Waste && self.destination == PileId::Stock
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "From: {}\tTo: {}\tCards: {}",
            self.source, self.destination, self.count
        )?;
        if let Some(card) = self.uncovered {
            write!(f, "\tUncovered: {card}")?;
        }
        Ok(())
    }
}

/// Undo and redo histories. Pushing a fresh move forgets everything that
/// could have been redone.
#[derive(Clone, Debug, Default)]
pub struct MoveManager {
    undo: Vec<Move>,
    redo: Vec<Move>,
}

impl MoveManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        self.undo.push(mv);
        self.redo.clear();
    }

    /// Pops the latest move and parks it on the redo history.
    pub fn pop_undo(&mut self) -> Option<Move> {
        let mv = self.undo.pop()?;
        self.redo.push(mv);
        Some(mv)
    }

    /// Pops the latest undone move and returns it to the undo history.
    pub fn pop_redo(&mut self) -> Option<Move> {
        let mv = self.redo.pop()?;
        self.undo.push(mv);
        Some(mv)
    }

    pub fn has_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn last(&self) -> Option<&Move> {
        self.undo.last()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
