//! # Klondike engine
//!
//! Rules engine for single-deck Klondike solitaire, one card per draw and
//! unlimited passes through the stock.
//!
//! The engine owns the deck, the thirteen piles, move legality, stock and
//! waste cycling, face-up/down transitions and a two-stack undo/redo
//! history. Everything a front end needs goes through [`Game`]; rendering,
//! hit-testing and animation stay outside.
//!
//! ## Example
//!
//! ```
//! use klondike_engine::{Game, Lift, PileId};
//!
//! let mut game = Game::new(Some(7));
//! let draw = game.draw_stock();
//! assert!(draw.drew.is_some());
//!
//! // The waste top can only go to a foundation if it is an ace.
//! let outcome = game
//!     .attempt_move(PileId::Waste, Lift::Top, PileId::Foundation(0))
//!     .unwrap();
//! if outcome.is_accepted() {
//!     assert!(game.undo());
//! } else {
//!     assert!(outcome.rejection().is_some());
//! }
//!
//! assert!(game.undo());
//! assert_eq!(game.snapshot().stock.len(), 24);
//! ```

pub mod card;
pub mod deck;
pub mod display;
pub mod error;
pub mod game;
pub mod moves;
pub mod pile;

pub use card::{Card, CardId, Suit};
pub use deck::Deck;
pub use error::{EngineError, EngineResult, Rejection};
pub use game::{DrawOutcome, Game, Lift, MoveOutcome, Snapshot};
pub use moves::{Move, MoveManager};
pub use pile::{Pile, PileId, PileKind};
