//! Per-kind pile capabilities.
//!
//! Each pile kind has one stateless behavior value implementing the
//! shared capability set. The behavior is selected from the kind enum at
//! call time and receives the table and pile as short-lived parameters;
//! it never holds a back-pointer.
//!
//! These are the generic rules that hold before any variant override.
//! The script's `tail_append_error` is always consulted after these and
//! its veto wins.

use crate::core::{CardId, MoveCheck, MoveError, RANKS_PER_SUIT};
use crate::script::GameScript;
use crate::table::Table;

use super::pile::{PileId, PileKind};

/// Capability set shared by every pile kind.
pub trait PileBehavior {
    /// May a single card land on this pile?
    fn can_accept_card(&self, table: &Table, pile: PileId, card: CardId) -> MoveCheck;

    /// May a tail land on this pile?
    fn can_accept_tail(&self, table: &Table, pile: PileId, tail: &[CardId]) -> MoveCheck;

    /// True if no further player decision is needed to finish sorting
    /// this pile; conformant piles are eligible for the collect sweep.
    fn is_conformant(&self, table: &Table, script: &dyn GameScript, pile: PileId) -> bool;

    /// True if this pile needs nothing more for the game to be won.
    fn is_complete(&self, table: &Table, pile: PileId) -> bool;

    /// Adjacent pairs violating sort order (face-down counts as
    /// violating). The scoring signal for percent-complete.
    fn unsorted_pairs(&self, table: &Table, script: &dyn GameScript, pile: PileId) -> usize;
}

/// Select the capability object for a pile kind.
#[must_use]
pub fn behavior(kind: PileKind) -> &'static dyn PileBehavior {
    match kind {
        PileKind::Stock => &StockBehavior,
        PileKind::Waste => &WasteBehavior,
        PileKind::Foundation => &FoundationBehavior,
        PileKind::Tableau => &TableauBehavior,
        PileKind::Reserve => &ReserveBehavior,
        PileKind::Cell => &CellBehavior,
        PileKind::Discard => &DiscardBehavior,
    }
}

fn all_pairs(table: &Table, pile: PileId) -> usize {
    table.pile(pile).len().saturating_sub(1)
}

fn any_face_down(table: &Table, tail: &[CardId]) -> bool {
    tail.iter().any(|&id| table.card(id).is_face_down())
}

/// A free holding spot for exactly one face-up card.
pub struct CellBehavior;

impl PileBehavior for CellBehavior {
    fn can_accept_card(&self, table: &Table, pile: PileId, card: CardId) -> MoveCheck {
        if table.card(card).is_face_down() {
            return Err(MoveError::FaceDownAdd);
        }
        if !table.pile(pile).is_empty() {
            return Err(MoveError::CellOccupied);
        }
        Ok(())
    }

    fn can_accept_tail(&self, table: &Table, pile: PileId, tail: &[CardId]) -> MoveCheck {
        if !table.pile(pile).is_empty() {
            return Err(MoveError::CellOccupied);
        }
        if tail.len() > 1 {
            return Err(MoveError::SingleCardDestination(PileKind::Cell));
        }
        if any_face_down(table, tail) {
            return Err(MoveError::FaceDownCard);
        }
        Ok(())
    }

    // A cell is never "wrong".
    fn is_conformant(&self, _table: &Table, _script: &dyn GameScript, _pile: PileId) -> bool {
        true
    }

    fn is_complete(&self, table: &Table, pile: PileId) -> bool {
        table.pile(pile).is_empty()
    }

    fn unsorted_pairs(&self, _table: &Table, _script: &dyn GameScript, _pile: PileId) -> usize {
        0
    }
}

/// The face-down feeder pile. Never a destination; scripts deal and
/// recycle into it through structural moves instead.
pub struct StockBehavior;

impl PileBehavior for StockBehavior {
    fn can_accept_card(&self, _table: &Table, _pile: PileId, _card: CardId) -> MoveCheck {
        Err(MoveError::StockNotADestination)
    }

    fn can_accept_tail(&self, _table: &Table, _pile: PileId, _tail: &[CardId]) -> MoveCheck {
        Err(MoveError::StockNotADestination)
    }

    fn is_conformant(&self, table: &Table, _script: &dyn GameScript, pile: PileId) -> bool {
        table.pile(pile).is_empty()
    }

    fn is_complete(&self, table: &Table, pile: PileId) -> bool {
        table.pile(pile).is_empty()
    }

    fn unsorted_pairs(&self, table: &Table, _script: &dyn GameScript, pile: PileId) -> usize {
        all_pairs(table, pile)
    }
}

/// Receives single cards dealt from the stock. The generic layer allows
/// single face-up deposits; scripts usually forbid manual ones.
pub struct WasteBehavior;

impl PileBehavior for WasteBehavior {
    fn can_accept_card(&self, table: &Table, _pile: PileId, card: CardId) -> MoveCheck {
        if table.card(card).is_face_down() {
            return Err(MoveError::FaceDownAdd);
        }
        Ok(())
    }

    fn can_accept_tail(&self, table: &Table, pile: PileId, tail: &[CardId]) -> MoveCheck {
        if tail.len() > 1 {
            return Err(MoveError::SingleCardDestination(PileKind::Waste));
        }
        self.can_accept_card(table, pile, tail[0])
    }

    fn is_conformant(&self, table: &Table, _script: &dyn GameScript, pile: PileId) -> bool {
        table.pile(pile).len() <= 1
    }

    fn is_complete(&self, table: &Table, pile: PileId) -> bool {
        table.pile(pile).is_empty()
    }

    fn unsorted_pairs(&self, table: &Table, _script: &dyn GameScript, pile: PileId) -> usize {
        all_pairs(table, pile)
    }
}

/// Accumulates one suit sequence. The real acceptance rule (base rank,
/// direction, wraparound) is the script's; the generic layer only stops
/// face-down cards, multi-card tails, and overfilling.
pub struct FoundationBehavior;

impl PileBehavior for FoundationBehavior {
    fn can_accept_card(&self, table: &Table, pile: PileId, card: CardId) -> MoveCheck {
        if table.card(card).is_face_down() {
            return Err(MoveError::FaceDownAdd);
        }
        if table.pile(pile).len() >= RANKS_PER_SUIT as usize {
            return Err(MoveError::FoundationFull);
        }
        Ok(())
    }

    fn can_accept_tail(&self, table: &Table, pile: PileId, tail: &[CardId]) -> MoveCheck {
        if tail.len() > 1 {
            return Err(MoveError::SingleCardDestination(PileKind::Foundation));
        }
        self.can_accept_card(table, pile, tail[0])
    }

    fn is_conformant(&self, _table: &Table, _script: &dyn GameScript, _pile: PileId) -> bool {
        true
    }

    // A foundation is never in a wrong state; winning means every other
    // pile has drained onto the foundations.
    fn is_complete(&self, _table: &Table, _pile: PileId) -> bool {
        true
    }

    fn unsorted_pairs(&self, table: &Table, script: &dyn GameScript, pile: PileId) -> usize {
        script.unsorted_pairs(table, pile)
    }
}

/// The main building area. Sequencing is entirely the script's; the
/// generic layer only rejects face-down arrivals.
pub struct TableauBehavior;

impl PileBehavior for TableauBehavior {
    fn can_accept_card(&self, table: &Table, _pile: PileId, card: CardId) -> MoveCheck {
        if table.card(card).is_face_down() {
            return Err(MoveError::FaceDownAdd);
        }
        Ok(())
    }

    fn can_accept_tail(&self, table: &Table, _pile: PileId, tail: &[CardId]) -> MoveCheck {
        if any_face_down(table, tail) {
            return Err(MoveError::FaceDownCard);
        }
        Ok(())
    }

    fn is_conformant(&self, table: &Table, script: &dyn GameScript, pile: PileId) -> bool {
        script.unsorted_pairs(table, pile) == 0
    }

    fn is_complete(&self, table: &Table, pile: PileId) -> bool {
        table.pile(pile).is_empty()
    }

    fn unsorted_pairs(&self, table: &Table, script: &dyn GameScript, pile: PileId) -> usize {
        script.unsorted_pairs(table, pile)
    }
}

/// A dealt holding area: a terminal source, never a destination.
pub struct ReserveBehavior;

impl PileBehavior for ReserveBehavior {
    fn can_accept_card(&self, _table: &Table, _pile: PileId, _card: CardId) -> MoveCheck {
        Err(MoveError::ReserveNotADestination)
    }

    fn can_accept_tail(&self, _table: &Table, _pile: PileId, _tail: &[CardId]) -> MoveCheck {
        Err(MoveError::ReserveNotADestination)
    }

    fn is_conformant(&self, table: &Table, _script: &dyn GameScript, pile: PileId) -> bool {
        table.pile(pile).len() <= 1
    }

    fn is_complete(&self, table: &Table, pile: PileId) -> bool {
        table.pile(pile).is_empty()
    }

    fn unsorted_pairs(&self, table: &Table, _script: &dyn GameScript, pile: PileId) -> usize {
        all_pairs(table, pile)
    }
}

/// A sink for finished runs: accepts a full face-up run onto an empty
/// pile and is never a move source.
pub struct DiscardBehavior;

impl PileBehavior for DiscardBehavior {
    fn can_accept_card(&self, _table: &Table, _pile: PileId, _card: CardId) -> MoveCheck {
        Err(MoveError::DiscardFullRunOnly)
    }

    fn can_accept_tail(&self, table: &Table, pile: PileId, tail: &[CardId]) -> MoveCheck {
        if !table.pile(pile).is_empty() {
            return Err(MoveError::DiscardOccupied);
        }
        if tail.len() != RANKS_PER_SUIT as usize {
            return Err(MoveError::DiscardFullRunOnly);
        }
        if any_face_down(table, tail) {
            return Err(MoveError::FaceDownCard);
        }
        Ok(())
    }

    fn is_conformant(&self, _table: &Table, _script: &dyn GameScript, _pile: PileId) -> bool {
        true
    }

    fn is_complete(&self, _table: &Table, _pile: PileId) -> bool {
        true
    }

    fn unsorted_pairs(&self, _table: &Table, _script: &dyn GameScript, _pile: PileId) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};
    use crate::piles::{MoveType, Slot};
    use crate::script::{count_unsorted_pairs, ScriptPiles};

    /// Minimal script: tableaux build down by suit with wraparound.
    struct TestScript {
        piles: ScriptPiles,
    }

    impl TestScript {
        fn new() -> Self {
            Self {
                piles: ScriptPiles::default(),
            }
        }
    }

    impl GameScript for TestScript {
        fn name(&self) -> &'static str {
            "Test"
        }

        fn piles(&self) -> &ScriptPiles {
            &self.piles
        }

        fn build_piles(&mut self, _table: &mut Table) {}

        fn start_game(&mut self, _table: &mut Table) {}

        fn tail_append_error(&self, _table: &Table, _dst: PileId, _tail: &[CardId]) -> MoveCheck {
            Ok(())
        }

        fn unsorted_pairs(&self, table: &Table, pile: PileId) -> usize {
            count_unsorted_pairs(table, pile, |pair| pair.compare_down_suit(true))
        }
    }

    fn table_with(kind: PileKind, ranks: &[u8]) -> (Table, PileId, Vec<CardId>) {
        let mut table = Table::new();
        let pile = table.add_pile(kind, Slot::new(0, 0), MoveType::Any);
        let ids = ranks
            .iter()
            .map(|&r| table.restore_card(pile, Rank::new(r), Suit::new(1), 0, false))
            .collect();
        (table, pile, ids)
    }

    #[test]
    fn test_cell_accepts_one_face_up_card() {
        let (mut table, cell, _) = table_with(PileKind::Cell, &[]);
        let loose = table.add_pile(PileKind::Waste, Slot::new(1, 0), MoveType::One);
        let up = table.restore_card(loose, Rank::new(5), Suit::new(2), 0, false);
        let down = table.restore_card(loose, Rank::new(6), Suit::new(2), 0, true);

        let b = behavior(PileKind::Cell);
        assert!(b.can_accept_card(&table, cell, up).is_ok());
        assert_eq!(
            b.can_accept_card(&table, cell, down),
            Err(MoveError::FaceDownAdd)
        );

        table.restore_card(cell, Rank::new(1), Suit::new(1), 0, false);
        assert_eq!(
            b.can_accept_card(&table, cell, up),
            Err(MoveError::CellOccupied)
        );
        assert!(b.is_conformant(&table, &TestScript::new(), cell));
        assert!(!b.is_complete(&table, cell));
    }

    #[test]
    fn test_stock_and_reserve_reject_deposits() {
        let (table, stock, ids) = table_with(PileKind::Stock, &[1]);
        assert_eq!(
            behavior(PileKind::Stock).can_accept_card(&table, stock, ids[0]),
            Err(MoveError::StockNotADestination)
        );

        let (table, reserve, ids) = table_with(PileKind::Reserve, &[1]);
        assert_eq!(
            behavior(PileKind::Reserve).can_accept_tail(&table, reserve, &ids),
            Err(MoveError::ReserveNotADestination)
        );
    }

    #[test]
    fn test_foundation_rejects_when_full() {
        let ranks: Vec<u8> = (1..=13).collect();
        let (mut table, foundation, _) = table_with(PileKind::Foundation, &ranks);
        let loose = table.add_pile(PileKind::Waste, Slot::new(1, 0), MoveType::One);
        let extra = table.restore_card(loose, Rank::new(1), Suit::new(2), 0, false);

        assert_eq!(
            behavior(PileKind::Foundation).can_accept_card(&table, foundation, extra),
            Err(MoveError::FoundationFull)
        );
    }

    #[test]
    fn test_foundation_rejects_multi_card_tails() {
        let (table, foundation, _) = table_with(PileKind::Foundation, &[]);
        let (_, _, ids) = table_with(PileKind::Tableau, &[2, 1]);
        // Two cards from another table is fine for this check; only the
        // length matters before the card lookups.
        assert_eq!(
            behavior(PileKind::Foundation).can_accept_tail(&table, foundation, &ids),
            Err(MoveError::SingleCardDestination(PileKind::Foundation))
        );
    }

    #[test]
    fn test_discard_wants_a_full_run() {
        let (mut table, discard, _) = table_with(PileKind::Discard, &[]);
        let tableau = table.add_pile(PileKind::Tableau, Slot::new(1, 0), MoveType::Any);
        let run: Vec<CardId> = (1..=13)
            .rev()
            .map(|r| table.restore_card(tableau, Rank::new(r), Suit::new(3), 0, false))
            .collect();

        let b = behavior(PileKind::Discard);
        assert!(b.can_accept_tail(&table, discard, &run).is_ok());
        assert_eq!(
            b.can_accept_tail(&table, discard, &run[1..]),
            Err(MoveError::DiscardFullRunOnly)
        );
        assert_eq!(
            b.can_accept_card(&table, discard, run[0]),
            Err(MoveError::DiscardFullRunOnly)
        );
    }

    #[test]
    fn test_tableau_conformance_tracks_script_pairs() {
        let script = TestScript::new();
        let b = behavior(PileKind::Tableau);

        let (table, sorted, _) = table_with(PileKind::Tableau, &[9, 8, 7]);
        assert!(b.is_conformant(&table, &script, sorted));
        assert_eq!(b.unsorted_pairs(&table, &script, sorted), 0);

        let (table, jumbled, _) = table_with(PileKind::Tableau, &[9, 7, 8]);
        assert!(!b.is_conformant(&table, &script, jumbled));
        assert_eq!(b.unsorted_pairs(&table, &script, jumbled), 2);
    }

    #[test]
    fn test_unordered_kinds_count_every_pair() {
        let script = TestScript::new();
        let (table, waste, _) = table_with(PileKind::Waste, &[4, 3, 11]);
        assert_eq!(
            behavior(PileKind::Waste).unsorted_pairs(&table, &script, waste),
            2
        );
        assert!(!behavior(PileKind::Waste).is_conformant(&table, &script, waste));
    }
}
