//! Card identity, rank/suit arithmetic, and adjacency comparison.
//!
//! Cards are minimal entities: rank, suit, orientation, and a non-owning
//! back-reference to the pile that currently holds them. All sequencing
//! rules are expressed through the pure predicates here, each with an
//! explicit wraparound flag, because variants enable King→Ace wraparound
//! on foundations and tableaux independently.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{MoveCheck, MoveError};
use crate::piles::PileId;

/// Ranks per suit (Ace through King).
pub const RANKS_PER_SUIT: u8 = 13;

/// Suits per pack, 1-indexed Club..Spade.
pub const SUITS_PER_PACK: u8 = 4;

/// Cards in one standard pack.
pub const CARDS_PER_PACK: usize = (RANKS_PER_SUIT as usize) * (SUITS_PER_PACK as usize);

/// Unique identifier for a card, an index into the [`super::CardStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Get the ID as a store index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card rank, 1 (Ace) through 13 (King).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    /// Create a rank. Panics outside 1..=13.
    #[must_use]
    pub fn new(ordinal: u8) -> Self {
        assert!(
            (1..=RANKS_PER_SUIT).contains(&ordinal),
            "rank ordinal {} out of range 1..=13",
            ordinal
        );
        Self(ordinal)
    }

    /// Get the raw ordinal (1..=13).
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Short display label, used for foundation base-rank labels.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "A",
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            11 => "J",
            12 => "Q",
            _ => "K",
        }
    }

    /// True if `self` is exactly one rank above `other`.
    ///
    /// With `wrap`, Ace counts as one above King.
    #[must_use]
    pub fn is_one_above(self, other: Rank, wrap: bool) -> bool {
        if self.0 == other.0 + 1 {
            return true;
        }
        wrap && other.0 == RANKS_PER_SUIT && self.0 == 1
    }

    /// True if `self` is exactly one rank below `other`.
    ///
    /// With `wrap`, King counts as one below Ace.
    #[must_use]
    pub fn is_one_below(self, other: Rank, wrap: bool) -> bool {
        other.is_one_above(self, wrap)
    }
}

/// A card suit, 1-indexed: Club, Diamond, Heart, Spade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Suit(u8);

impl Suit {
    /// Create a suit. Panics outside 1..=4.
    #[must_use]
    pub fn new(ordinal: u8) -> Self {
        assert!(
            (1..=SUITS_PER_PACK).contains(&ordinal),
            "suit ordinal {} out of range 1..=4",
            ordinal
        );
        Self(ordinal)
    }

    /// Get the raw ordinal (1..=4).
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Single-letter label for logs and labels.
    #[must_use]
    pub const fn letter(self) -> char {
        match self.0 {
            1 => 'C',
            2 => 'D',
            3 => 'H',
            _ => 'S',
        }
    }
}

/// A card in a game.
///
/// The pile owns the card (by index into the central store); the card's
/// `owner` merely records where it last was. Between the detach and
/// attach steps of a move the owner is `None` and the card is a member
/// of no pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    rank: Rank,
    suit: Suit,
    /// Pack index, for multi-deck variants. Irrelevant to sequencing.
    pack: u8,
    face_down: bool,
    owner: Option<PileId>,
    /// Advisory list of legal destinations, refreshed after each move.
    /// Consumed by tap-to-move; never authoritative.
    destinations: SmallVec<[PileId; 4]>,
}

impl Card {
    /// Create a face-up, unowned card.
    #[must_use]
    pub fn new(id: CardId, rank: Rank, suit: Suit, pack: u8) -> Self {
        Self {
            id,
            rank,
            suit,
            pack,
            face_down: false,
            owner: None,
            destinations: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub fn pack(&self) -> u8 {
        self.pack
    }

    /// Is this card face-down (prone)?
    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.face_down
    }

    /// Turn the card face-up. No effect on ownership.
    pub fn flip_up(&mut self) {
        self.face_down = false;
    }

    /// Turn the card face-down. No effect on ownership.
    pub fn flip_down(&mut self) {
        self.face_down = true;
    }

    /// The pile currently holding this card, if attached.
    #[must_use]
    pub fn owner(&self) -> Option<PileId> {
        self.owner
    }

    /// Record the holding pile. Called by pile attach/detach only.
    pub fn set_owner(&mut self, owner: Option<PileId>) {
        self.owner = owner;
    }

    /// Advisory tap-to-move destination candidates.
    #[must_use]
    pub fn destinations(&self) -> &[PileId] {
        &self.destinations
    }

    /// Replace the advisory destination list.
    pub fn set_destinations(&mut self, destinations: SmallVec<[PileId; 4]>) {
        self.destinations = destinations;
    }

    /// True if this card is one rank above `other` (wraparound optional).
    #[must_use]
    pub fn is_one_rank_above(&self, other: &Card, wrap: bool) -> bool {
        self.rank.is_one_above(other.rank, wrap)
    }

    /// True if this card is one rank below `other` (wraparound optional).
    #[must_use]
    pub fn is_one_rank_below(&self, other: &Card, wrap: bool) -> bool {
        self.rank.is_one_below(other.rank, wrap)
    }

    /// True if both cards share a suit.
    #[must_use]
    pub fn same_suit(&self, other: &Card) -> bool {
        self.suit == other.suit
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.letter())
    }
}

/// A borrowed adjacent pair within a pile: `bottom` sits under `top`.
///
/// Variant comparators are built from these. Each comparator returns a
/// user-facing rejection reason on failure, never a panic.
#[derive(Clone, Copy, Debug)]
pub struct CardPair<'a> {
    pub bottom: &'a Card,
    pub top: &'a Card,
}

impl CardPair<'_> {
    /// True if either card of the pair is face-down.
    #[must_use]
    pub fn either_face_down(&self) -> bool {
        self.bottom.is_face_down() || self.top.is_face_down()
    }

    /// Top must be one rank above bottom.
    pub fn compare_up(&self, wrap: bool) -> MoveCheck {
        if self.top.is_one_rank_above(self.bottom, wrap) {
            Ok(())
        } else {
            Err(MoveError::NotAscending)
        }
    }

    /// Top must be one rank below bottom.
    pub fn compare_down(&self, wrap: bool) -> MoveCheck {
        if self.top.is_one_rank_below(self.bottom, wrap) {
            Ok(())
        } else {
            Err(MoveError::NotDescending)
        }
    }

    /// Same suit, building upward.
    pub fn compare_up_suit(&self, wrap: bool) -> MoveCheck {
        if !self.top.same_suit(self.bottom) {
            return Err(MoveError::SuitMismatch);
        }
        self.compare_up(wrap)
    }

    /// Same suit, building downward.
    pub fn compare_down_suit(&self, wrap: bool) -> MoveCheck {
        if !self.top.same_suit(self.bottom) {
            return Err(MoveError::SuitMismatch);
        }
        self.compare_down(wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u16, rank: u8, suit: u8) -> Card {
        Card::new(CardId::new(id), Rank::new(rank), Suit::new(suit), 0)
    }

    #[test]
    fn test_rank_adjacency() {
        assert!(Rank::new(5).is_one_above(Rank::new(4), false));
        assert!(!Rank::new(4).is_one_above(Rank::new(5), false));
        assert!(Rank::new(4).is_one_below(Rank::new(5), false));
    }

    #[test]
    fn test_rank_wraparound() {
        let ace = Rank::new(1);
        let king = Rank::new(13);

        assert!(!ace.is_one_above(king, false));
        assert!(ace.is_one_above(king, true));
        assert!(!king.is_one_below(ace, false));
        assert!(king.is_one_below(ace, true));
    }

    #[test]
    fn test_rank_labels() {
        assert_eq!(Rank::new(1).label(), "A");
        assert_eq!(Rank::new(10).label(), "10");
        assert_eq!(Rank::new(11).label(), "J");
        assert_eq!(Rank::new(12).label(), "Q");
        assert_eq!(Rank::new(13).label(), "K");
    }

    #[test]
    #[should_panic(expected = "rank ordinal")]
    fn test_rank_out_of_range_panics() {
        Rank::new(14);
    }

    #[test]
    fn test_card_orientation() {
        let mut c = card(0, 1, 1);
        assert!(!c.is_face_down());
        c.flip_down();
        assert!(c.is_face_down());
        c.flip_up();
        assert!(!c.is_face_down());
    }

    #[test]
    fn test_pair_compare_up_suit() {
        let five = card(0, 5, 1);
        let six = card(1, 6, 1);
        let six_hearts = card(2, 6, 3);

        let pair = CardPair { bottom: &five, top: &six };
        assert!(pair.compare_up_suit(false).is_ok());

        let pair = CardPair { bottom: &six, top: &five };
        assert_eq!(pair.compare_up_suit(false), Err(MoveError::NotAscending));

        let pair = CardPair { bottom: &five, top: &six_hearts };
        assert_eq!(pair.compare_up_suit(false), Err(MoveError::SuitMismatch));
    }

    #[test]
    fn test_pair_compare_down_with_wrap() {
        let ace = card(0, 1, 2);
        let king = card(1, 13, 2);

        let pair = CardPair { bottom: &ace, top: &king };
        assert_eq!(pair.compare_down_suit(false), Err(MoveError::NotDescending));
        assert!(pair.compare_down_suit(true).is_ok());
    }

    #[test]
    fn test_pair_face_down_detection() {
        let up = card(0, 2, 1);
        let mut down = card(1, 3, 1);
        down.flip_down();

        assert!(CardPair { bottom: &down, top: &up }.either_face_down());
        assert!(CardPair { bottom: &up, top: &down }.either_face_down());
        assert!(!CardPair { bottom: &up, top: &up }.either_face_down());
    }

    #[test]
    fn test_card_display() {
        assert_eq!(format!("{}", card(0, 1, 1)), "AC");
        assert_eq!(format!("{}", card(1, 12, 3)), "QH");
    }

    #[test]
    fn test_card_serialization() {
        let c = card(7, 11, 4);
        let json = serde_json::to_string(&c).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
