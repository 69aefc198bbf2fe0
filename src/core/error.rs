//! User-facing move rejections.
//!
//! These are the expected, frequent outcomes of the validation protocol:
//! normal return values carrying a short human-readable reason the
//! presentation layer can surface as a transient notification. Engine
//! corruption (a card absent from its claimed owner, an out-of-range
//! index) is never represented here; that class panics loudly instead.

use thiserror::Error;

use crate::piles::PileKind;

/// Result alias for every acceptance/extraction check.
pub type MoveCheck = Result<(), MoveError>;

/// Why a proposed move was refused.
///
/// Messages are written to be shown to the player verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Cannot move a card from a {0}")]
    ImmovableSource(PileKind),

    #[error("Can only move one card from a {0}")]
    SingleCardOnly(PileKind),

    #[error("Only move one card, or the whole pile")]
    OneOrWholePile,

    #[error("Cannot move a face down card")]
    FaceDownCard,

    #[error("Cannot add a face down card")]
    FaceDownAdd,

    #[error("A Cell can only contain one card")]
    CellOccupied,

    #[error("Cannot move more than one card to a {0}")]
    SingleCardDestination(PileKind),

    #[error("You cannot move cards to the Stock")]
    StockNotADestination,

    #[error("You cannot move cards to a Reserve")]
    ReserveNotADestination,

    #[error("Waste can only accept cards from the Stock")]
    WasteFromStockOnly,

    #[error("The Foundation is full")]
    FoundationFull,

    #[error("An empty Foundation can only accept {0}")]
    FoundationBaseRank(String),

    #[error("A Discard must be built on an empty pile")]
    DiscardOccupied,

    #[error("Can only discard a full sorted run")]
    DiscardFullRunOnly,

    #[error("Cards must be the same suit")]
    SuitMismatch,

    #[error("Cards must be in ascending sequence")]
    NotAscending,

    #[error("Cards must be in descending sequence")]
    NotDescending,

    #[error("Cannot move cards onto their own pile")]
    SamePile,

    #[error("No more stock recycles")]
    RecyclesExhausted,

    /// Variant-specific rejection with its own wording.
    #[error("{0}")]
    Variant(String),
}
