//! Leaf types: cards, the central card store, errors, deal RNG.
//!
//! Nothing in here knows about variants or move validation. A card's
//! "owner" is a non-owning `PileId` lookup key; the `CardStore` is the
//! single place cards live.

pub mod card;
pub mod error;
pub mod rng;
pub mod store;

pub use card::{
    Card, CardId, CardPair, Rank, Suit, CARDS_PER_PACK, RANKS_PER_SUIT, SUITS_PER_PACK,
};
pub use error::{MoveCheck, MoveError};
pub use rng::GameRng;
pub use store::CardStore;
