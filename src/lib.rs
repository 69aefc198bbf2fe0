//! # patience-engine
//!
//! A variant-driven solitaire rules engine.
//!
//! ## Design Principles
//!
//! 1. **Variant-Agnostic Core**: One generic pile container and one
//!    move-validation protocol serve every solitaire variant. Variants
//!    configure topology and sequencing rules, never the mechanics.
//!
//! 2. **Composition Over Downcasts**: Pile kinds are an enum plus a
//!    per-kind capability object. No runtime type switches, no
//!    structural inheritance.
//!
//! 3. **One Mutation Authority**: The table orchestrator executes every
//!    validated move atomically. Scripts react through hooks and return
//!    intents; they never mutate outside an orchestrator call.
//!
//! ## Modules
//!
//! - `core`: Cards, ranks, suits, the central card store, errors, RNG
//! - `piles`: Generic pile container, move-type policy, per-kind behaviors
//! - `script`: The `GameScript` variant protocol, registry, Toad variant
//! - `table`: Move execution state machine, collect sweep, snapshots
//! - `game`: Per-game session tying a table to a script
//! - `stats`: In-memory per-variant win/loss statistics

pub mod core;
pub mod game;
pub mod piles;
pub mod script;
pub mod stats;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, CardPair, CardStore, GameRng, MoveCheck, MoveError, Rank, Suit,
    CARDS_PER_PACK, RANKS_PER_SUIT, SUITS_PER_PACK,
};

pub use crate::piles::{
    behavior, MoveType, Pile, PileBehavior, PileId, PileKind, Slot,
};

pub use crate::script::{
    count_unsorted_pairs, GameScript, ScriptFactory, ScriptPiles, TapIntent, Toad,
    VariantRegistry,
};

pub use crate::table::{
    CardSnapshot, MoveRecord, PileSnapshot, SetupError, Table, TableSnapshot,
};

pub use crate::game::{Game, TapOutcome};

pub use crate::stats::{Statistics, VariantStats};
