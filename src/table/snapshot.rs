//! Table snapshots for the persistence collaborator.
//!
//! A snapshot is pure data: pile contents and labels, card faces, the
//! recycle allowance, and the variant name and seed needed to name the
//! deal. Role references (which pile is the stock) are never serialized;
//! a restore rebuilds the topology through the variant's own
//! `build_piles` and then refills it, so scripts re-derive their roles
//! exactly as they did at deal time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Rank, Suit, CARDS_PER_PACK, RANKS_PER_SUIT, SUITS_PER_PACK};
use crate::piles::{MoveType, PileKind, Slot};

use super::Table;

/// Why a game could not be set up or restored.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("unknown variant {0:?}")]
    UnknownVariant(String),

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    /// The snapshot disagrees with itself or with the variant's
    /// topology. Carries a short diagnostic.
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

/// One card's persistent state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub rank: u8,
    pub suit: u8,
    pub pack: u8,
    pub face_down: bool,
}

/// One pile's persistent state, cards bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileSnapshot {
    pub kind: PileKind,
    pub slot: Slot,
    pub move_type: MoveType,
    pub label: String,
    pub cards: Vec<CardSnapshot>,
}

/// A complete saved game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub variant: String,
    pub seed: u64,
    pub packs: u8,
    pub recycles: u32,
    pub piles: Vec<PileSnapshot>,
}

impl TableSnapshot {
    /// Capture the current state of a table.
    #[must_use]
    pub fn capture(table: &Table, variant: &str, seed: u64) -> Self {
        let piles = table
            .piles()
            .iter()
            .map(|pile| PileSnapshot {
                kind: pile.kind(),
                slot: pile.slot(),
                move_type: pile.move_type(),
                label: pile.label().to_string(),
                cards: pile
                    .cards()
                    .iter()
                    .map(|&id| {
                        let card = table.card(id);
                        CardSnapshot {
                            rank: card.rank().raw(),
                            suit: card.suit().raw(),
                            pack: card.pack(),
                            face_down: card.is_face_down(),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            variant: variant.to_string(),
            seed,
            packs: table.packs(),
            recycles: table.recycles(),
            piles,
        }
    }

    /// Refill a freshly built table from this snapshot.
    ///
    /// The table must already carry the variant's pile topology (from
    /// `build_piles`) and no cards. Snapshot bytes come from outside the
    /// engine, so disagreements are errors here, never panics.
    pub fn populate(&self, table: &mut Table) -> Result<(), SetupError> {
        if table.piles().len() != self.piles.len() {
            return Err(SetupError::Corrupt(format!(
                "variant built {} piles but the snapshot has {}",
                table.piles().len(),
                self.piles.len()
            )));
        }
        let expected = self.packs as usize * CARDS_PER_PACK;
        let counted: usize = self.piles.iter().map(|p| p.cards.len()).sum();
        if counted != expected {
            return Err(SetupError::Corrupt(format!(
                "{} packs imply {} cards but the snapshot holds {}",
                self.packs, expected, counted
            )));
        }

        for (id, saved) in table.pile_ids().zip(&self.piles) {
            if table.pile(id).kind() != saved.kind {
                return Err(SetupError::Corrupt(format!(
                    "{} is a {} but the snapshot says {}",
                    id,
                    table.pile(id).kind(),
                    saved.kind
                )));
            }
            table.pile_mut(id).set_label(saved.label.clone());
            for card in &saved.cards {
                if !(1..=RANKS_PER_SUIT).contains(&card.rank)
                    || !(1..=SUITS_PER_PACK).contains(&card.suit)
                {
                    return Err(SetupError::Corrupt(format!(
                        "no such card: rank {} suit {}",
                        card.rank, card.suit
                    )));
                }
                table.restore_card(
                    id,
                    Rank::new(card.rank),
                    Suit::new(card.suit),
                    card.pack,
                    card.face_down,
                );
            }
        }
        table.set_packs(self.packs);
        table.set_recycles(self.recycles);
        Ok(())
    }

    /// Serialize to a compact byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SetupError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes produced by [`TableSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SetupError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
