//! The table: pile list, card store, and the move state machine.
//!
//! Every move goes through the same protocol regardless of variant:
//! propose a tail, validate the source side (move-type policy plus the
//! script's extra constraint), validate the destination side (generic
//! per-kind acceptance, then the script's real sequencing rule), and
//! only then relocate. The script's veto always wins; a move that passes
//! validation is applied atomically.
//!
//! The table is the sole mutation authority. Scripts receive `&mut
//! Table` only inside `build_piles`, `start_game`, and `after_move`;
//! everywhere else they observe and answer questions.

pub mod snapshot;

pub use snapshot::{CardSnapshot, PileSnapshot, SetupError, TableSnapshot};

use smallvec::SmallVec;

use crate::core::{
    CardId, CardStore, GameRng, MoveCheck, MoveError, Rank, Suit, CARDS_PER_PACK, RANKS_PER_SUIT,
    SUITS_PER_PACK,
};
use crate::piles::{behavior, MoveType, Pile, PileId, PileKind, Slot};
use crate::script::GameScript;

/// A successfully applied move, for logs and undo journals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// First card of the moved tail.
    pub card: CardId,
    pub from: PileId,
    pub to: PileId,
    /// Number of cards that moved.
    pub count: usize,
}

/// All piles and cards for one game in progress.
#[derive(Clone, Debug, Default)]
pub struct Table {
    store: CardStore,
    piles: Vec<Pile>,
    /// Stock refills remaining. Scripts set the allowance in `start_game`.
    recycles: u32,
    packs: u8,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pile and return its ID. Creation order is the tie-break
    /// order for non-foundation destinations.
    pub fn add_pile(&mut self, kind: PileKind, slot: Slot, move_type: MoveType) -> PileId {
        assert!(self.piles.len() < u16::MAX as usize, "pile list is full");
        let id = PileId::new(self.piles.len() as u16);
        self.piles.push(Pile::new(id, kind, slot, move_type));
        id
    }

    /// Look up a pile. Panics on an out-of-range ID.
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        self.piles
            .get(id.index())
            .unwrap_or_else(|| panic!("{} is not on the table", id))
    }

    /// Look up a pile mutably. Panics on an out-of-range ID.
    pub fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        self.piles
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("{} is not on the table", id))
    }

    /// All piles, in creation order.
    #[must_use]
    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    /// All pile IDs, in creation order.
    pub fn pile_ids(&self) -> impl Iterator<Item = PileId> {
        (0..self.piles.len() as u16).map(PileId::new)
    }

    /// Look up a card.
    #[must_use]
    pub fn card(&self, id: CardId) -> &crate::core::Card {
        self.store.get(id)
    }

    /// Look up a card mutably.
    pub fn card_mut(&mut self, id: CardId) -> &mut crate::core::Card {
        self.store.get_mut(id)
    }

    /// The central card store.
    #[must_use]
    pub fn store(&self) -> &CardStore {
        &self.store
    }

    #[must_use]
    pub fn recycles(&self) -> u32 {
        self.recycles
    }

    pub fn set_recycles(&mut self, recycles: u32) {
        self.recycles = recycles;
    }

    #[must_use]
    pub fn packs(&self) -> u8 {
        self.packs
    }

    pub fn set_packs(&mut self, packs: u8) {
        self.packs = packs;
    }

    /// Create a card directly in a pile, bypassing move validation.
    /// Used by snapshot restore and test fixtures.
    pub fn restore_card(
        &mut self,
        pile: PileId,
        rank: Rank,
        suit: Suit,
        pack: u8,
        face_down: bool,
    ) -> CardId {
        let id = self.store.add_card(rank, suit, pack);
        self.piles[pile.index()].push(id, &mut self.store);
        if face_down {
            self.store.get_mut(id).flip_down();
        } else {
            self.store.get_mut(id).flip_up();
        }
        id
    }

    /// Create `packs` full packs, shuffle, and stack them on the stock.
    pub fn fill_stock(&mut self, stock: PileId, packs: u8, rng: &mut GameRng) {
        self.packs = packs;
        let mut ids = Vec::with_capacity(packs as usize * CARDS_PER_PACK);
        for pack in 0..packs {
            for suit in 1..=SUITS_PER_PACK {
                for rank in 1..=RANKS_PER_SUIT {
                    ids.push(self.store.add_card(Rank::new(rank), Suit::new(suit), pack));
                }
            }
        }
        rng.shuffle(&mut ids);
        for id in ids {
            self.piles[stock.index()].push(id, &mut self.store);
        }
    }

    /// Move the top card of `src` to `dst` structurally, with no
    /// validation. Deals, recycles, and script refills use this.
    pub fn move_card(&mut self, src: PileId, dst: PileId) -> Option<CardId> {
        let id = self.piles[src.index()].pop(&mut self.store)?;
        self.piles[dst.index()].push(id, &mut self.store);
        Some(id)
    }

    /// Full validation for moving the tail headed by `card` to `dst`.
    ///
    /// Gate order: tail extraction policy, the script's source-side
    /// constraint, the destination kind's generic acceptance, then the
    /// script's sequencing rule. The first rejection is returned.
    pub fn can_move_tail(&self, card: CardId, dst: PileId, script: &dyn GameScript) -> MoveCheck {
        let src = self
            .card(card)
            .owner()
            .unwrap_or_else(|| panic!("{} has no owner", card));
        if src == dst {
            return Err(MoveError::SamePile);
        }

        let tail = self.pile(src).tail_from(card);
        self.pile(src).can_extract_tail(&tail, &self.store)?;
        script.tail_move_error(self, &tail)?;

        let b = behavior(self.pile(dst).kind());
        if tail.len() == 1 {
            b.can_accept_card(self, dst, tail[0])?;
        } else {
            b.can_accept_tail(self, dst, &tail)?;
        }
        script.tail_append_error(self, dst, &tail)
    }

    /// Validate and apply a move in one step.
    pub fn try_move_tail(
        &mut self,
        card: CardId,
        dst: PileId,
        script: &dyn GameScript,
    ) -> Result<MoveRecord, MoveError> {
        log::debug!("move proposed: {} -> {}", self.card(card), dst);
        self.can_move_tail(card, dst, script)?;
        log::debug!("move validated: {} -> {}", self.card(card), dst);

        let record = self.relocate_tail(card, dst);
        log::debug!(
            "move applied: {} card(s) from {} to {}",
            record.count,
            record.from,
            record.to
        );
        Ok(record)
    }

    /// Detach the tail headed by `card` and attach it to `dst`,
    /// preserving order. No validation; callers go through
    /// [`Table::try_move_tail`] unless the move is structural.
    fn relocate_tail(&mut self, card: CardId, dst: PileId) -> MoveRecord {
        let src = self
            .card(card)
            .owner()
            .unwrap_or_else(|| panic!("{} has no owner", card));

        let before = self.counted_cards();
        let tail = self.piles[src.index()].split_off_tail(card);
        let count = tail.len();
        for id in tail {
            let c = self.store.get_mut(id);
            c.set_owner(None);
            c.flip_up();
            self.piles[dst.index()].push(id, &mut self.store);
        }
        debug_assert_eq!(self.counted_cards(), before, "cards lost during relocation");

        MoveRecord { card, from: src, to: dst, count }
    }

    /// Refill the stock from the waste, consuming one recycle.
    ///
    /// Returns the recycles remaining afterwards, or `None` if the
    /// allowance is exhausted or the variant has no stock/waste.
    pub fn recycle_stock(&mut self, script: &dyn GameScript) -> Option<u32> {
        let stock = script.piles().stock?;
        let waste = script.piles().waste?;
        if self.recycles == 0 {
            return None;
        }
        while self.move_card(waste, stock).is_some() {}
        self.recycles -= 1;
        Some(self.recycles)
    }

    /// Sweep every conformant non-foundation pile, repeatedly moving top
    /// cards onto foundations until nothing more fits. Returns the
    /// number of cards collected.
    pub fn collect(&mut self, script: &dyn GameScript) -> usize {
        let mut total = 0;
        loop {
            let mut collected = 0;
            for pile in self.pile_ids().collect::<Vec<_>>() {
                collected += self.collect_pile(pile, script);
            }
            if collected == 0 {
                return total;
            }
            total += collected;
        }
    }

    /// Collect from one pile: while its top card fits a foundation and
    /// the pile is conformant, move it. Foundations in registration
    /// order; foundation piles are never collected from.
    pub fn collect_pile(&mut self, pile: PileId, script: &dyn GameScript) -> usize {
        if self.pile(pile).kind() == PileKind::Foundation {
            return 0;
        }
        let mut moved = 0;
        'sweep: loop {
            if !self.is_conformant(script, pile) {
                return moved;
            }
            let Some(top) = self.pile(pile).peek_top() else {
                return moved;
            };
            for &foundation in &script.piles().foundations {
                if self.can_move_tail(top, foundation, script).is_ok() {
                    self.relocate_tail(top, foundation);
                    script.after_move(self);
                    moved += 1;
                    continue 'sweep;
                }
            }
            return moved;
        }
    }

    /// True if this pile needs no further player decision to finish.
    #[must_use]
    pub fn is_conformant(&self, script: &dyn GameScript, pile: PileId) -> bool {
        behavior(self.pile(pile).kind()).is_conformant(self, script, pile)
    }

    /// True if this pile needs nothing more for the game to be won.
    #[must_use]
    pub fn pile_complete(&self, pile: PileId) -> bool {
        behavior(self.pile(pile).kind()).is_complete(self, pile)
    }

    /// The game is won when every pile is complete: everything has
    /// drained onto the foundations.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.pile_ids().all(|pile| self.pile_complete(pile))
    }

    /// Adjacent out-of-order pairs in one pile, per its kind's rules.
    #[must_use]
    pub fn unsorted_pairs(&self, script: &dyn GameScript, pile: PileId) -> usize {
        behavior(self.pile(pile).kind()).unsorted_pairs(self, script, pile)
    }

    /// Progress score: 100 minus the percentage of adjacent pairs that
    /// are out of order, over every pile with two or more cards.
    #[must_use]
    pub fn percent_complete(&self, script: &dyn GameScript) -> i32 {
        let mut pairs = 0usize;
        let mut unsorted = 0usize;
        for pile in self.pile_ids() {
            let len = self.pile(pile).len();
            if len > 1 {
                pairs += len - 1;
                unsorted += self.unsorted_pairs(script, pile);
            }
        }
        if pairs == 0 {
            100
        } else {
            100 - (unsorted * 100 / pairs) as i32
        }
    }

    /// Cards in existence.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.store.len()
    }

    /// Cards currently attached to piles. Equal to
    /// [`Table::total_cards`] between moves.
    #[must_use]
    pub fn counted_cards(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    /// Every pile the tail headed by `card` could legally move to now.
    #[must_use]
    pub fn tail_destinations(
        &self,
        card: CardId,
        script: &dyn GameScript,
    ) -> SmallVec<[PileId; 4]> {
        self.pile_ids()
            .filter(|&dst| self.can_move_tail(card, dst, script).is_ok())
            .collect()
    }

    /// The destination a tap should use: the first accepting foundation
    /// in registration order, else the first accepting pile in creation
    /// order.
    #[must_use]
    pub fn best_destination(&self, card: CardId, script: &dyn GameScript) -> Option<PileId> {
        for &foundation in &script.piles().foundations {
            if self.can_move_tail(card, foundation, script).is_ok() {
                return Some(foundation);
            }
        }
        self.pile_ids()
            .find(|&dst| self.can_move_tail(card, dst, script).is_ok())
    }

    /// Recompute every movable card's advisory destination list.
    pub fn refresh_destinations(&mut self, script: &dyn GameScript) {
        let fresh: Vec<(CardId, SmallVec<[PileId; 4]>)> = self
            .store
            .card_ids()
            .map(|id| {
                let destinations = if self.card(id).owner().is_some() {
                    self.tail_destinations(id, script)
                } else {
                    SmallVec::new()
                };
                (id, destinations)
            })
            .collect();
        for (id, destinations) in fresh {
            self.store.get_mut(id).set_destinations(destinations);
        }
    }
}
