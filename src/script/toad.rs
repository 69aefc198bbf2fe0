//! American Toad, the reference variant.
//!
//! Single pack. One stock (one recycle), one waste, one reserve of 20
//! cards (19 face-down), 8 foundations building up by suit with
//! wraparound from a dealt base rank, 8 tableaux building down by suit
//! with wraparound. Tableau piles move whole or one card at a time;
//! emptied tableau slots refill automatically from the reserve, and once
//! the reserve runs dry may only be filled from the waste.

use crate::core::{CardId, CardPair, MoveCheck, MoveError};
use crate::piles::{MoveType, PileId, PileKind, Slot};
use crate::table::Table;

use super::{count_unsorted_pairs, GameScript, ScriptPiles, TapIntent};

const RESERVE_SIZE: usize = 20;
const FOUNDATION_COUNT: i32 = 8;
const TABLEAU_COUNT: i32 = 8;

/// The American Toad script.
#[derive(Default)]
pub struct Toad {
    piles: ScriptPiles,
}

impl Toad {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn stock(&self) -> PileId {
        self.piles.stock.expect("build_piles must run before play")
    }
}

impl GameScript for Toad {
    fn name(&self) -> &'static str {
        "Toad"
    }

    fn wikipedia(&self) -> &'static str {
        "https://en.wikipedia.org/wiki/American_Toad_(solitaire)"
    }

    fn piles(&self) -> &ScriptPiles {
        &self.piles
    }

    fn build_piles(&mut self, table: &mut Table) {
        self.piles = ScriptPiles::default();

        self.piles.stock = Some(table.add_pile(PileKind::Stock, Slot::new(0, 0), MoveType::One));
        self.piles.waste = Some(table.add_pile(PileKind::Waste, Slot::new(1, 0), MoveType::One));
        self.piles
            .reserves
            .push(table.add_pile(PileKind::Reserve, Slot::new(3, 0), MoveType::One));

        for x in 0..FOUNDATION_COUNT {
            self.piles
                .foundations
                .push(table.add_pile(PileKind::Foundation, Slot::new(x, 1), MoveType::None));
        }

        // Either the whole pile moves or only the top card does.
        for x in 0..TABLEAU_COUNT {
            self.piles
                .tableaux
                .push(table.add_pile(PileKind::Tableau, Slot::new(x, 2), MoveType::OneOrAll));
        }
    }

    fn start_game(&mut self, table: &mut Table) {
        let stock = self.stock();
        table.set_recycles(1);

        let reserve = self.piles.reserves[0];
        for _ in 0..RESERVE_SIZE {
            if let Some(id) = table.move_card(stock, reserve) {
                table.card_mut(id).flip_down();
            }
        }
        if let Some(top) = table.pile(reserve).peek_top() {
            table.card_mut(top).flip_up();
        }

        for &tableau in &self.piles.tableaux {
            table.move_card(stock, tableau);
        }

        // One card starts the first foundation; its rank is the base
        // every foundation must begin from.
        let first = self.piles.foundations[0];
        table.move_card(stock, first);
        if let Some(base) = table.pile(first).peek_top() {
            let label = table.card(base).rank().label();
            for &foundation in &self.piles.foundations {
                table.pile_mut(foundation).set_label(label);
            }
        }
    }

    fn after_move(&self, table: &mut Table) {
        // Empty tableau slots are filled automatically from the reserve,
        // and the reserve's newly exposed card turns face-up.
        let reserve = self.piles.reserves[0];
        for &tableau in &self.piles.tableaux {
            if table.pile(tableau).is_empty() {
                table.move_card(reserve, tableau);
            }
        }
        if let Some(top) = table.pile(reserve).peek_top() {
            table.card_mut(top).flip_up();
        }
    }

    fn tail_append_error(&self, table: &Table, dst: PileId, tail: &[CardId]) -> MoveCheck {
        let dst_pile = table.pile(dst);
        let first = table.card(tail[0]);
        match dst_pile.kind() {
            PileKind::Stock => Err(MoveError::StockNotADestination),
            PileKind::Waste => Err(MoveError::WasteFromStockOnly),
            PileKind::Foundation => {
                if dst_pile.is_empty() {
                    if first.rank().label() != dst_pile.label() {
                        return Err(MoveError::FoundationBaseRank(dst_pile.label().to_string()));
                    }
                    Ok(())
                } else {
                    let top = table.card(dst_pile.peek_top().expect("pile is not empty"));
                    CardPair { bottom: top, top: first }.compare_up_suit(true)
                }
            }
            PileKind::Tableau => {
                if dst_pile.is_empty() {
                    // Once the reserve is empty, spaces may be filled
                    // from the waste but never from another tableau.
                    if first.owner() != self.piles.waste {
                        return Err(MoveError::Variant(
                            "Empty tableaux must be filled with cards from the waste".to_string(),
                        ));
                    }
                    Ok(())
                } else {
                    let top = table.card(dst_pile.peek_top().expect("pile is not empty"));
                    CardPair { bottom: top, top: first }.compare_down_suit(true)
                }
            }
            _ => Ok(()),
        }
    }

    fn unsorted_pairs(&self, table: &Table, pile: PileId) -> usize {
        count_unsorted_pairs(table, pile, |pair| pair.compare_down_suit(true))
    }

    fn tail_tapped(&self, table: &Table, card: CardId) -> TapIntent {
        if let (Some(stock), Some(waste)) = (self.piles.stock, self.piles.waste) {
            if table.card(card).owner() == Some(stock)
                && table.pile(stock).peek_top() == Some(card)
            {
                return TapIntent::DealOne { from: stock, to: waste };
            }
        }
        TapIntent::Default
    }

    fn pile_tapped(&self, _table: &Table, pile: PileId) -> TapIntent {
        if Some(pile) == self.piles.stock {
            TapIntent::Recycle
        } else {
            TapIntent::Ignore
        }
    }
}
