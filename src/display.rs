//! Terminal rendering of a [`Snapshot`].

use colored::{ColoredString, Colorize};
use std::fmt;

use crate::card::Card;
use crate::game::Snapshot;
use crate::pile::{PileId, NUM_FOUNDATIONS, NUM_TABLEAUS};

// Waste cards shown besides the top one.
const WASTE_FAN: usize = 3;

fn cell(card: &Card) -> ColoredString {
    if !card.face_up {
        return "##".dimmed();
    }
    let label = format!("{card}");
    if card.is_red() {
        label.red().bold()
    } else {
        label.bold()
    }
}

fn empty_cell() -> ColoredString {
    "[  ]".dimmed()
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\n--------- Foundations ---------")?;
        (0..NUM_FOUNDATIONS as u8).try_for_each(|idx| {
            match self.pile(PileId::Foundation(idx)).and_then(<[Card]>::last) {
                Some(card) => write!(f, "f{}:{}\t", idx + 1, cell(card)),
                None => write!(f, "f{}:{}\t", idx + 1, empty_cell()),
            }
        })?;
        writeln!(f)?;
        writeln!(f, "--------- Tableaus ------------")?;
        (0..NUM_TABLEAUS as u8).try_for_each(|idx| {
            let tableau = self.pile(PileId::Tableau(idx)).unwrap_or_default();
            write!(f, "t{}: ", idx + 1)?;
            if tableau.is_empty() {
                write!(f, "{}", empty_cell())?;
            }
            tableau.iter().try_for_each(|card| write!(f, "{}\t", cell(card)))?;
            writeln!(f)
        })?;
        writeln!(f, "--------- Stock ---------------")?;
        match self.stock.len() {
            0 => writeln!(f, "{}", empty_cell())?,
            n => writeln!(f, "{} ({n})", "##".dimmed())?,
        }
        writeln!(f, "--------- Waste ---------------")?;
        if self.waste.is_empty() {
            write!(f, "{}", empty_cell())?;
        }
        let fan = self.waste.len().saturating_sub(WASTE_FAN + 1);
        self.waste[fan..]
            .iter()
            .try_for_each(|card| write!(f, "{} ", cell(card)))
    }
}
