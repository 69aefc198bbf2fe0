//! Central card arena.
//!
//! Every card in a game lives here, owned by value and addressed by
//! `CardId`. Piles hold ID sequences only, and a card's owner field is a
//! lookup key, so no ownership cycle exists: moving a card between piles
//! is a pure index update.
//!
//! Out-of-range lookups panic. A bad `CardId` means engine corruption,
//! not bad user input.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Rank, Suit};

/// Owns all cards for one table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards in existence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if no cards have been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Create a new face-up, unowned card and return its ID.
    pub fn add_card(&mut self, rank: Rank, suit: Suit, pack: u8) -> CardId {
        assert!(
            self.cards.len() < u16::MAX as usize,
            "card store is full"
        );
        let id = CardId::new(self.cards.len() as u16);
        self.cards.push(Card::new(id, rank, suit, pack));
        id
    }

    /// Look up a card. Panics on an out-of-range ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> &Card {
        self.cards
            .get(id.index())
            .unwrap_or_else(|| panic!("{} is not in the card store", id))
    }

    /// Look up a card mutably. Panics on an out-of-range ID.
    pub fn get_mut(&mut self, id: CardId) -> &mut Card {
        self.cards
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("{} is not in the card store", id))
    }

    /// Iterate over all cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Iterate over all card IDs.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> {
        (0..self.cards.len() as u16).map(CardId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut store = CardStore::new();
        let id = store.add_card(Rank::new(1), Suit::new(1), 0);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).rank(), Rank::new(1));
        assert_eq!(store.get(id).id(), id);
        assert!(store.get(id).owner().is_none());
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut store = CardStore::new();
        let a = store.add_card(Rank::new(1), Suit::new(1), 0);
        let b = store.add_card(Rank::new(2), Suit::new(1), 0);

        assert_eq!(a, CardId::new(0));
        assert_eq!(b, CardId::new(1));
        assert_eq!(store.card_ids().count(), 2);
    }

    #[test]
    #[should_panic(expected = "not in the card store")]
    fn test_bad_id_panics() {
        let store = CardStore::new();
        store.get(CardId::new(5));
    }
}
