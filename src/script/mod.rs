//! The variant protocol.
//!
//! A game script is the per-variant module: it declares the pile
//! topology, performs the deal, supplies the sequencing rules the
//! generic per-kind behaviors delegate, and reacts after each move.
//! The engine calls into `GameScript` but never interprets
//! variant-specific concepts directly.
//!
//! Tap handling is expressed as [`TapIntent`] values: the script decides
//! *what* a tap means, the orchestrator executes it. This keeps the
//! table the sole mutation authority.

pub mod registry;
pub mod toad;

pub use registry::{ScriptFactory, VariantRegistry};
pub use toad::Toad;

use crate::core::{CardId, CardPair, MoveCheck};
use crate::piles::PileId;
use crate::table::Table;

/// The piles a script created, grouped by role.
///
/// Role order is registration order; the destination tie-break and the
/// collect sweep both iterate foundations in this order.
#[derive(Clone, Debug, Default)]
pub struct ScriptPiles {
    pub stock: Option<PileId>,
    pub waste: Option<PileId>,
    pub foundations: Vec<PileId>,
    pub tableaux: Vec<PileId>,
    pub reserves: Vec<PileId>,
    pub cells: Vec<PileId>,
    pub discards: Vec<PileId>,
}

/// What a tap means, decided by the script and executed by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapIntent {
    /// Move the tapped tail to its best legal destination.
    Default,
    /// Deal the top card of `from` onto `to` (stock tap, usually).
    DealOne { from: PileId, to: PileId },
    /// Refill the stock from the waste, consuming a recycle.
    Recycle,
    /// The tap means nothing here.
    Ignore,
}

/// One implementation per game variant.
///
/// ## Implementation notes
///
/// - `build_piles` runs once per new game, before any cards exist.
/// - `start_game` runs after the stock is filled and shuffled.
/// - `after_move` runs once after every *successful* move; structural
///   moves it makes (e.g. refilling a tableau from the reserve) do not
///   re-trigger it.
/// - `tail_append_error` is consulted after the generic per-kind
///   acceptance; its veto always wins.
pub trait GameScript {
    /// Variant name, as registered.
    fn name(&self) -> &'static str;

    /// Rules reference for the presentation layer.
    fn wikipedia(&self) -> &'static str {
        "https://en.wikipedia.org/wiki/Solitaire"
    }

    /// How many packs this variant shuffles into the stock.
    fn packs(&self) -> u8 {
        1
    }

    /// The piles this script created, grouped by role.
    fn piles(&self) -> &ScriptPiles;

    /// Declare the full pile topology.
    fn build_piles(&mut self, table: &mut Table);

    /// Deal the initial layout, set labels and the recycle allowance.
    fn start_game(&mut self, table: &mut Table);

    /// Reactive effects after every successful move.
    fn after_move(&self, _table: &mut Table) {}

    /// Extra source-side constraint beyond the generic move-type policy.
    fn tail_move_error(&self, _table: &Table, _tail: &[CardId]) -> MoveCheck {
        Ok(())
    }

    /// The variant's real acceptance logic for a tail landing on `dst`.
    fn tail_append_error(&self, table: &Table, dst: PileId, tail: &[CardId]) -> MoveCheck;

    /// Variant-specific adjacency comparator over a pile's pairs.
    fn unsorted_pairs(&self, table: &Table, pile: PileId) -> usize;

    /// What tapping a card (and the tail under it) should do.
    fn tail_tapped(&self, _table: &Table, _card: CardId) -> TapIntent {
        TapIntent::Default
    }

    /// What tapping an empty pile (or its background) should do.
    fn pile_tapped(&self, _table: &Table, _pile: PileId) -> TapIntent {
        TapIntent::Ignore
    }
}

/// Count the adjacent pairs of `pile` that violate `cmp`, treating any
/// pair with a face-down card as violating. Shared by variant
/// `unsorted_pairs` implementations.
pub fn count_unsorted_pairs<F>(table: &Table, pile: PileId, cmp: F) -> usize
where
    F: Fn(&CardPair<'_>) -> MoveCheck,
{
    table
        .pile(pile)
        .cards()
        .windows(2)
        .filter(|w| {
            let pair = CardPair {
                bottom: table.card(w[0]),
                top: table.card(w[1]),
            };
            pair.either_face_down() || cmp(&pair).is_err()
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};
    use crate::piles::{MoveType, PileKind, Slot};

    #[test]
    fn test_count_unsorted_pairs() {
        let mut table = Table::new();
        let pile = table.add_pile(PileKind::Tableau, Slot::new(0, 0), MoveType::Any);
        for rank in [9u8, 8, 7, 3] {
            table.restore_card(pile, Rank::new(rank), Suit::new(1), 0, false);
        }

        // 9-8 and 8-7 descend; 7-3 does not.
        let count = count_unsorted_pairs(&table, pile, |p| p.compare_down_suit(false));
        assert_eq!(count, 1);
    }

    #[test]
    fn test_face_down_pairs_count_as_unsorted() {
        let mut table = Table::new();
        let pile = table.add_pile(PileKind::Tableau, Slot::new(0, 0), MoveType::Any);
        table.restore_card(pile, Rank::new(9), Suit::new(1), 0, true);
        table.restore_card(pile, Rank::new(8), Suit::new(1), 0, false);

        let count = count_unsorted_pairs(&table, pile, |p| p.compare_down_suit(false));
        assert_eq!(count, 1);
    }
}
