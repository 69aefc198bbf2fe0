//! Per-variant win/loss statistics.
//!
//! Pure bookkeeping, no persistence: the embedding application decides
//! where the serialized form lives. A game counts as lost the moment it
//! is abandoned, recording how far it got; wins always score 100.
//!
//! Streaks are signed: winning runs count up, losing runs count down,
//! and either kind of result resets the other's run.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Lifetime results for one variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantStats {
    pub won: u32,
    pub lost: u32,
    /// Signed run length: positive while winning, negative while losing.
    pub curr_streak: i32,
    pub best_streak: i32,
    pub worst_streak: i32,
    /// Percent-complete of each lost game.
    pub percents: Vec<i32>,
}

impl VariantStats {
    /// Record a won game.
    pub fn record_won(&mut self) {
        self.won += 1;
        self.curr_streak = self.curr_streak.max(0) + 1;
        self.best_streak = self.best_streak.max(self.curr_streak);
    }

    /// Record a lost (abandoned) game and how far it got.
    pub fn record_lost(&mut self, percent: i32) {
        self.lost += 1;
        self.curr_streak = self.curr_streak.min(0) - 1;
        self.worst_streak = self.worst_streak.min(self.curr_streak);
        self.percents.push(percent.clamp(0, 100));
    }

    /// Games played.
    #[must_use]
    pub fn played(&self) -> u32 {
        self.won + self.lost
    }

    /// Mean percent-complete over every game, wins scoring 100.
    #[must_use]
    pub fn average_percent(&self) -> i32 {
        let played = self.played();
        if played == 0 {
            return 0;
        }
        let sum = self.won as i64 * 100 + self.percents.iter().map(|&p| p as i64).sum::<i64>();
        (sum / played as i64) as i32
    }

    /// The closest this variant has come to a win.
    #[must_use]
    pub fn best_percent(&self) -> i32 {
        if self.won > 0 {
            return 100;
        }
        self.percents.iter().copied().max().unwrap_or(0)
    }
}

/// Statistics for every variant played.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Statistics {
    variants: FxHashMap<String, VariantStats>,
}

impl Statistics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a win for a variant.
    pub fn record_won(&mut self, variant: &str) {
        self.entry(variant).record_won();
    }

    /// Record a loss for a variant with its final percent-complete.
    pub fn record_lost(&mut self, variant: &str, percent: i32) {
        self.entry(variant).record_lost(percent);
    }

    /// Stats for one variant, if it has been played.
    #[must_use]
    pub fn get(&self, variant: &str) -> Option<&VariantStats> {
        self.variants.get(variant)
    }

    /// Variants with recorded games, in no particular order.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    fn entry(&mut self, variant: &str) -> &mut VariantStats {
        self.variants.entry(variant.to_string()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaks_count_runs() {
        let mut stats = VariantStats::default();
        stats.record_won();
        stats.record_won();
        assert_eq!(stats.curr_streak, 2);
        assert_eq!(stats.best_streak, 2);

        stats.record_lost(40);
        stats.record_lost(60);
        assert_eq!(stats.curr_streak, -2);
        assert_eq!(stats.worst_streak, -2);
        assert_eq!(stats.best_streak, 2);

        stats.record_won();
        assert_eq!(stats.curr_streak, 1);
        assert_eq!(stats.best_streak, 2);
    }

    #[test]
    fn test_percent_summaries() {
        let mut stats = VariantStats::default();
        assert_eq!(stats.average_percent(), 0);
        assert_eq!(stats.best_percent(), 0);

        stats.record_lost(40);
        stats.record_lost(60);
        assert_eq!(stats.average_percent(), 50);
        assert_eq!(stats.best_percent(), 60);

        stats.record_won();
        // (100 + 40 + 60) / 3
        assert_eq!(stats.average_percent(), 66);
        assert_eq!(stats.best_percent(), 100);
    }

    #[test]
    fn test_lost_percent_is_clamped() {
        let mut stats = VariantStats::default();
        stats.record_lost(150);
        stats.record_lost(-3);
        assert_eq!(stats.percents, vec![100, 0]);
    }

    #[test]
    fn test_statistics_keyed_by_variant() {
        let mut stats = Statistics::new();
        stats.record_won("Toad");
        stats.record_lost("Toad", 30);
        stats.record_lost("Klondike", 80);

        assert_eq!(stats.get("Toad").unwrap().played(), 2);
        assert_eq!(stats.get("Klondike").unwrap().best_percent(), 80);
        assert!(stats.get("Spider").is_none());
        assert_eq!(stats.variants().count(), 2);
    }

    #[test]
    fn test_statistics_serialization() {
        let mut stats = Statistics::new();
        stats.record_won("Toad");
        stats.record_lost("Toad", 25);

        let json = serde_json::to_string(&stats).unwrap();
        let back: Statistics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("Toad"), stats.get("Toad"));
    }
}
