//! The generic pile container and its per-kind capability objects.
//!
//! One concrete `Pile` type holds structural state for every kind; a
//! stateless `PileBehavior` value selected by the kind enum supplies the
//! kind-specific legality decisions. No downcasts, no inheritance.

pub mod behavior;
pub mod pile;

pub use behavior::{behavior, PileBehavior};
pub use pile::{MoveType, Pile, PileId, PileKind, Slot};
