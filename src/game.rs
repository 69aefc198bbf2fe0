//! A game session: one table driven by one variant script.
//!
//! The session owns both and mediates every interaction between them,
//! so the table stays the sole mutation authority. Tap handling turns
//! the script's [`TapIntent`] answers into actual moves; each applied
//! move runs the script's `after_move` hook and refreshes the advisory
//! destination lists.

use crate::core::{CardId, GameRng, MoveError};
use crate::piles::PileId;
use crate::script::{GameScript, TapIntent, VariantRegistry};
use crate::table::{MoveRecord, SetupError, Table, TableSnapshot};

/// What a tap ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// A tail moved to its best destination.
    Moved(MoveRecord),
    /// A card was dealt from the stock.
    Dealt(CardId),
    /// The stock was refilled from the waste.
    Recycled { remaining: u32 },
    /// The tap meant a move, but the move was refused.
    Rejected(MoveError),
    /// The tap meant nothing.
    Nothing,
}

/// One game in progress.
pub struct Game {
    script: Box<dyn GameScript>,
    table: Table,
    seed: u64,
    moves: u32,
}

impl Game {
    /// Deal a new game of `variant` from `seed`.
    pub fn new(registry: &VariantRegistry, variant: &str, seed: u64) -> Result<Self, SetupError> {
        let mut script = registry
            .create(variant)
            .ok_or_else(|| SetupError::UnknownVariant(variant.to_string()))?;

        let mut table = Table::new();
        script.build_piles(&mut table);
        if let Some(stock) = script.piles().stock {
            let mut rng = GameRng::new(seed);
            table.fill_stock(stock, script.packs(), &mut rng);
        }
        script.start_game(&mut table);
        table.refresh_destinations(script.as_ref());

        log::info!("new {} game, seed {}", script.name(), seed);
        Ok(Self { script, table, seed, moves: 0 })
    }

    /// Rebuild a game from a snapshot. The variant's `build_piles`
    /// recreates the topology and role mapping; the snapshot refills it.
    pub fn restore(registry: &VariantRegistry, snapshot: &TableSnapshot) -> Result<Self, SetupError> {
        let mut script = registry
            .create(&snapshot.variant)
            .ok_or_else(|| SetupError::UnknownVariant(snapshot.variant.clone()))?;

        let mut table = Table::new();
        script.build_piles(&mut table);
        snapshot.populate(&mut table)?;
        table.refresh_destinations(script.as_ref());

        log::info!("restored {} game, seed {}", script.name(), snapshot.seed);
        Ok(Self {
            script,
            table,
            seed: snapshot.seed,
            moves: 0,
        })
    }

    #[must_use]
    pub fn variant(&self) -> &str {
        self.script.name()
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Player moves applied so far (deals and recycles count).
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn script(&self) -> &dyn GameScript {
        self.script.as_ref()
    }

    /// Move the tail headed by `card` to `dst`, with full validation.
    pub fn move_tail(&mut self, card: CardId, dst: PileId) -> Result<MoveRecord, MoveError> {
        let record = self.table.try_move_tail(card, dst, self.script.as_ref())?;
        self.moves += 1;
        self.after_successful_move();
        Ok(record)
    }

    /// Handle a tap on a card (and the tail under it).
    pub fn tail_tapped(&mut self, card: CardId) -> TapOutcome {
        match self.script.tail_tapped(&self.table, card) {
            TapIntent::Default => {
                let Some(dst) = self.table.best_destination(card, self.script.as_ref()) else {
                    return TapOutcome::Nothing;
                };
                match self.move_tail(card, dst) {
                    Ok(record) => TapOutcome::Moved(record),
                    Err(err) => TapOutcome::Rejected(err),
                }
            }
            TapIntent::DealOne { from, to } => self.deal_one(from, to),
            TapIntent::Recycle => self.recycle(),
            TapIntent::Ignore => TapOutcome::Nothing,
        }
    }

    /// Handle a tap on a pile itself (usually an emptied stock).
    pub fn pile_tapped(&mut self, pile: PileId) -> TapOutcome {
        match self.script.pile_tapped(&self.table, pile) {
            TapIntent::DealOne { from, to } => self.deal_one(from, to),
            TapIntent::Recycle => self.recycle(),
            TapIntent::Default | TapIntent::Ignore => TapOutcome::Nothing,
        }
    }

    /// Refill the stock from the waste, consuming one recycle.
    pub fn recycle(&mut self) -> TapOutcome {
        match self.table.recycle_stock(self.script.as_ref()) {
            Some(remaining) => {
                self.moves += 1;
                self.after_successful_move();
                TapOutcome::Recycled { remaining }
            }
            None => TapOutcome::Rejected(MoveError::RecyclesExhausted),
        }
    }

    /// Sweep everything collectable onto the foundations.
    pub fn collect(&mut self) -> usize {
        let collected = self.table.collect(self.script.as_ref());
        if collected > 0 {
            self.moves += collected as u32;
            self.after_successful_move();
        }
        collected
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.table.is_won()
    }

    #[must_use]
    pub fn percent_complete(&self) -> i32 {
        self.table.percent_complete(self.script.as_ref())
    }

    /// Capture the current state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(&self.table, self.script.name(), self.seed)
    }

    fn deal_one(&mut self, from: PileId, to: PileId) -> TapOutcome {
        match self.table.move_card(from, to) {
            Some(id) => {
                self.moves += 1;
                self.after_successful_move();
                TapOutcome::Dealt(id)
            }
            None => TapOutcome::Nothing,
        }
    }

    fn after_successful_move(&mut self) {
        self.script.after_move(&mut self.table);
        self.table.refresh_destinations(self.script.as_ref());
        if self.table.is_won() {
            log::info!("{} game won in {} moves", self.script.name(), self.moves);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CARDS_PER_PACK;
    use crate::script::VariantRegistry;

    fn toad(seed: u64) -> Game {
        Game::new(&VariantRegistry::with_builtins(), "Toad", seed).unwrap()
    }

    #[test]
    fn test_unknown_variant_is_an_error() {
        let registry = VariantRegistry::with_builtins();
        assert!(matches!(
            Game::new(&registry, "Spider", 1),
            Err(SetupError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_new_game_conserves_cards() {
        let game = toad(42);
        assert_eq!(game.table().total_cards(), CARDS_PER_PACK);
        assert_eq!(game.table().counted_cards(), CARDS_PER_PACK);
        assert_eq!(game.moves(), 0);
        assert!(!game.is_won());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = toad(7);
        let b = toad(7);
        assert_eq!(a.snapshot(), b.snapshot());

        let c = toad(8);
        assert_ne!(a.snapshot(), c.snapshot());
    }

    #[test]
    fn test_stock_tap_deals_to_waste() {
        let mut game = toad(42);
        let stock = game.script().piles().stock.unwrap();
        let waste = game.script().piles().waste.unwrap();
        let top = game.table().pile(stock).peek_top().unwrap();

        let outcome = game.tail_tapped(top);
        assert!(matches!(outcome, TapOutcome::Dealt(_)));
        assert_eq!(game.table().pile(waste).len(), 1);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut game = toad(42);
        let stock = game.script().piles().stock.unwrap();
        let top = game.table().pile(stock).peek_top().unwrap();
        game.tail_tapped(top);

        let snapshot = game.snapshot();
        let restored = Game::restore(&VariantRegistry::with_builtins(), &snapshot).unwrap();

        assert_eq!(restored.variant(), "Toad");
        assert_eq!(restored.seed(), 42);
        assert_eq!(restored.snapshot(), snapshot);
    }
}
