//! Engine error types.

use thiserror::Error;

use crate::pile::PileId;

/// Caller contract violations.
///
/// These never come from a legal player action; a controller that maps its
/// input onto existing piles will not see them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Pile id outside the layout (4 foundations, 7 tableaus)
    #[error("Unknown pile: {0}")]
    UnknownPile(PileId),

    /// Prearranged deck is not a permutation of the 52 cards
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),
}

/// Why a move was refused. Refusals leave the game untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    #[error("source pile is empty")]
    SourceEmpty,

    #[error("lift does not fit the source pile")]
    InvalidLift,

    #[error("face-down cards cannot be lifted")]
    FaceDownCardNotLiftable,

    #[error("source and destination are the same pile")]
    SameSourceAndDestination,

    #[error("foundation needs the next rank of its suit")]
    WrongRankForFoundation,

    #[error("foundation holds a different suit")]
    WrongSuitForFoundation,

    #[error("only one card at a time goes to a foundation")]
    MultiCardToFoundation,

    #[error("empty foundation only accepts an ace")]
    FoundationRequiresAce,

    #[error("empty tableau only accepts a king")]
    TableauRequiresKing,

    #[error("tableau needs the opposite color")]
    WrongColorForTableau,

    #[error("tableau needs exactly one rank lower")]
    WrongRankForTableau,

    #[error("cards cannot be placed on that pile")]
    InvalidDestinationKind,
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
