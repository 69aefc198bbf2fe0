//! Generic ordered card container with a move-type policy.
//!
//! Structural operations are identical for every pile kind. Kind-specific
//! acceptance lives in [`super::behavior`]; variant sequencing lives in
//! the game script. The card sequence is the only source of truth for
//! which card is on top and for tail contiguity.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, CardStore, MoveCheck, MoveError};

/// Unique identifier for a pile, an index into the table's pile list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileId(pub u16);

impl PileId {
    /// Create a new pile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Get the ID as a table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile({})", self.0)
    }
}

/// The seven pile kinds a variant can build from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Stock,
    Waste,
    Foundation,
    Tableau,
    Reserve,
    Cell,
    Discard,
}

impl std::fmt::Display for PileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PileKind::Stock => "Stock",
            PileKind::Waste => "Waste",
            PileKind::Foundation => "Foundation",
            PileKind::Tableau => "Tableau",
            PileKind::Reserve => "Reserve",
            PileKind::Cell => "Cell",
            PileKind::Discard => "Discard",
        };
        f.write_str(name)
    }
}

/// How many cards may be lifted from a pile in one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveType {
    /// Never a move source.
    None,
    /// Any tail may leave, subject to destination acceptance.
    Any,
    /// Exactly one card at a time.
    One,
    /// One or more; the destination decides the real constraint.
    OnePlus,
    /// Exactly one card, or the whole pile.
    OneOrAll,
}

/// Abstract layout slot. The presentation layer maps slots to pixels;
/// the engine never does layout math.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub x: i32,
    pub y: i32,
}

impl Slot {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A generic ordered container of cards. Top of pile = last element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pile {
    id: PileId,
    kind: PileKind,
    slot: Slot,
    move_type: MoveType,
    /// Display label, e.g. a foundation's base rank once revealed.
    label: String,
    cards: Vec<CardId>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new(id: PileId, kind: PileKind, slot: Slot, move_type: MoveType) -> Self {
        Self {
            id,
            kind,
            slot,
            move_type,
            label: String::new(),
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PileId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> PileKind {
        self.kind
    }

    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    #[must_use]
    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    pub fn set_move_type(&mut self, move_type: MoveType) {
        self.move_type = move_type;
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// The ordered card sequence, bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// The topmost card, if any.
    #[must_use]
    pub fn peek_top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Append a card. Sets the card's owner to this pile; a Stock hides
    /// everything pushed onto it.
    pub fn push(&mut self, id: CardId, store: &mut CardStore) {
        self.cards.push(id);
        let card = store.get_mut(id);
        card.set_owner(Some(self.id));
        if self.kind == PileKind::Stock {
            card.flip_down();
        }
    }

    /// Remove and return the top card, detached and face-up.
    ///
    /// Cards leaving a pile default to face-up unless the destination
    /// re-hides them; that convention lives here.
    pub fn pop(&mut self, store: &mut CardStore) -> Option<CardId> {
        let id = self.cards.pop()?;
        let card = store.get_mut(id);
        card.set_owner(None);
        card.flip_up();
        Some(id)
    }

    /// Remove the card at `index`, preserving the order of the rest.
    /// Does not touch orientation or ownership.
    pub fn remove_at(&mut self, index: usize) -> CardId {
        self.cards.remove(index)
    }

    /// Position of a card within this pile.
    #[must_use]
    pub fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|&c| c == id)
    }

    /// The contiguous suffix starting at `id`, in order.
    ///
    /// Panics if the card is not in this pile: that is an invariant
    /// breach (a card whose owner field lies), never a user error.
    #[must_use]
    pub fn tail_from(&self, id: CardId) -> Vec<CardId> {
        let start = self
            .index_of(id)
            .unwrap_or_else(|| panic!("tail requested for {} which is not in {}", id, self.id));
        self.cards[start..].to_vec()
    }

    /// Detach the suffix starting at `id` from this pile, preserving
    /// order. Same invariant as [`Pile::tail_from`].
    pub fn split_off_tail(&mut self, id: CardId) -> Vec<CardId> {
        let start = self
            .index_of(id)
            .unwrap_or_else(|| panic!("tail requested for {} which is not in {}", id, self.id));
        self.cards.split_off(start)
    }

    /// Generic source-side legality, independent of any destination:
    /// purely a function of this pile's move-type policy and the tail.
    pub fn can_extract_tail(&self, tail: &[CardId], store: &CardStore) -> MoveCheck {
        // Stocks are the one pile allowed to surrender hidden cards.
        if self.kind != PileKind::Stock
            && tail.iter().any(|&id| store.get(id).is_face_down())
        {
            return Err(MoveError::FaceDownCard);
        }
        match self.move_type {
            MoveType::None => Err(MoveError::ImmovableSource(self.kind)),
            MoveType::Any => Ok(()),
            MoveType::One => {
                if tail.len() > 1 {
                    Err(MoveError::SingleCardOnly(self.kind))
                } else {
                    Ok(())
                }
            }
            // Destination acceptance decides the real constraint.
            MoveType::OnePlus => Ok(()),
            MoveType::OneOrAll => {
                if tail.len() == 1 || tail.len() == self.len() {
                    Ok(())
                } else {
                    Err(MoveError::OneOrWholePile)
                }
            }
        }
    }

    /// Empty the pile. Does not touch the cards themselves.
    pub fn reset(&mut self) {
        self.cards.clear();
    }
}
