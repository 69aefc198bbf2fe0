//! Persistence round trips: snapshots through JSON and bytes, and
//! restoring a game mid-play.

use patience_engine::{Game, SetupError, TableSnapshot, TapOutcome, VariantRegistry};

fn registry() -> VariantRegistry {
    VariantRegistry::with_builtins()
}

fn played_game() -> Game {
    let mut game = Game::new(&registry(), "Toad", 42).unwrap();
    let stock = game.script().piles().stock.unwrap();

    // Deal a few cards and let taps place whatever fits.
    for _ in 0..5 {
        if let Some(top) = game.table().pile(stock).peek_top() {
            assert!(matches!(game.tail_tapped(top), TapOutcome::Dealt(_)));
        }
    }
    game.collect();
    game
}

#[test]
fn test_snapshot_through_json() {
    let game = played_game();
    let snapshot = game.snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: TableSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, back);
}

#[test]
fn test_snapshot_through_bytes() {
    let game = played_game();
    let snapshot = game.snapshot();

    let bytes = snapshot.to_bytes().unwrap();
    let back = TableSnapshot::from_bytes(&bytes).unwrap();
    assert_eq!(snapshot, back);
}

#[test]
fn test_restore_reproduces_the_position() {
    let game = played_game();
    let snapshot = game.snapshot();

    let restored = Game::restore(&registry(), &snapshot).unwrap();
    assert_eq!(restored.variant(), "Toad");
    assert_eq!(restored.seed(), 42);
    assert_eq!(restored.snapshot(), snapshot);
    assert_eq!(restored.percent_complete(), game.percent_complete());

    // The restored game plays on: the stock still deals.
    let mut restored = restored;
    let stock = restored.script().piles().stock.unwrap();
    let top = restored.table().pile(stock).peek_top().unwrap();
    assert!(matches!(restored.tail_tapped(top), TapOutcome::Dealt(_)));
}

#[test]
fn test_restore_rejects_unknown_variant() {
    let game = played_game();
    let mut snapshot = game.snapshot();
    snapshot.variant = "Yukon".to_string();

    assert!(matches!(
        Game::restore(&registry(), &snapshot),
        Err(SetupError::UnknownVariant(_))
    ));
}

#[test]
fn test_restore_rejects_tampered_snapshots() {
    let game = played_game();
    let mut snapshot = game.snapshot();
    snapshot.piles[0].cards.pop();

    assert!(matches!(
        Game::restore(&registry(), &snapshot),
        Err(SetupError::Corrupt(_))
    ));
}

#[test]
fn test_garbage_bytes_are_an_error() {
    assert!(matches!(
        TableSnapshot::from_bytes(&[0x2a, 0x00, 0x13]),
        Err(SetupError::Encoding(_))
    ));
}
