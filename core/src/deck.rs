use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Default glyph pool, large enough for boards up to 8x8.
pub const DEFAULT_SYMBOL_POOL: [&str; 32] = [
    "🐶", "🐱", "🦊", "🐼", "🐵", "🦁", "🐸", "🐷", //
    "🍎", "🍌", "🍇", "🍓", "🍒", "🍍", "🥝", "🍉", //
    "⚽", "🏀", "🏈", "🎾", "🎲", "🎯", "🎮", "🎸", //
    "🌟", "☀️", "🌈", "🍀", "🔥", "❄️", "🌊", "🌙",
];

/// The shuffled multiset of paired symbols assigned to board cells.
///
/// `symbols` holds the glyphs sampled for this game, `layout` maps each
/// row-major cell index to one of them. Every id occurs exactly twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    size: Coord2,
    symbols: Vec<String>,
    layout: Vec<SymbolId>,
}

impl Deck {
    /// Samples `pair_count` distinct symbols from `pool`, duplicates each and
    /// shuffles them over the board.
    pub fn deal<R: Rng + ?Sized>(config: GameConfig, pool: &[&str], rng: &mut R) -> Result<Self> {
        let total = config.total_cells();
        if total == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if total % 2 != 0 {
            return Err(ConfigError::OddCellCount(total));
        }

        let pairs = config.pair_count();
        if usize::from(pairs) > pool.len() {
            return Err(ConfigError::PoolTooSmall {
                needed: pairs,
                available: pool.len(),
            });
        }

        let symbols: Vec<String> = pool
            .choose_multiple(rng, pairs.into())
            .map(|&glyph| glyph.to_owned())
            .collect();
        let mut layout: Vec<SymbolId> = (0..pairs).flat_map(|id| [id, id]).collect();
        layout.shuffle(rng);

        Ok(Self {
            size: config.size,
            symbols,
            layout,
        })
    }

    /// Builds a deck from an explicit layout, for deterministic games.
    pub fn from_layout(size: Coord2, symbols: Vec<String>, layout: Vec<SymbolId>) -> Result<Self> {
        let total = mult(size.0, size.1);
        if total == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if total % 2 != 0 {
            return Err(ConfigError::OddCellCount(total));
        }
        if layout.len() != usize::from(total) || symbols.len() != usize::from(total / 2) {
            return Err(ConfigError::UnpairedLayout);
        }

        let mut occurrences = vec![0usize; symbols.len()];
        for &id in &layout {
            let Some(count) = occurrences.get_mut(usize::from(id)) else {
                return Err(ConfigError::UnpairedLayout);
            };
            *count += 1;
        }
        if occurrences.iter().any(|&count| count != 2) {
            return Err(ConfigError::UnpairedLayout);
        }

        Ok(Self {
            size,
            symbols,
            layout,
        })
    }

    /// Re-deals the same symbols into a fresh random arrangement.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.layout.shuffle(rng);
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        self.layout.len() as CellCount
    }

    pub fn pair_count(&self) -> CellCount {
        self.symbols.len() as CellCount
    }

    /// Symbol id placed at the given row-major cell index.
    pub fn symbol_id_at(&self, index: usize) -> SymbolId {
        self.layout[index]
    }

    pub fn symbol(&self, id: SymbolId) -> &str {
        &self.symbols[usize::from(id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(size: Coord2, pool: &[&str]) -> Result<Deck> {
        let mut rng = SmallRng::seed_from_u64(42);
        Deck::deal(GameConfig::new_unchecked(size), pool, &mut rng)
    }

    #[test]
    fn deal_places_every_symbol_exactly_twice() {
        let deck = deal((4, 4), &DEFAULT_SYMBOL_POOL).unwrap();

        assert_eq!(deck.total_cells(), 16);
        assert_eq!(deck.pair_count(), 8);
        for id in 0..deck.pair_count() {
            let occurrences = (0..16).filter(|&i| deck.symbol_id_at(i) == id).count();
            assert_eq!(occurrences, 2, "symbol {id} not paired");
        }
    }

    #[test]
    fn deal_samples_distinct_symbols_from_pool() {
        let deck = deal((2, 2), &["A", "B", "C"]).unwrap();

        let first = deck.symbol(0);
        let second = deck.symbol(1);
        assert_ne!(first, second);
        assert!(["A", "B", "C"].contains(&first));
        assert!(["A", "B", "C"].contains(&second));
    }

    #[test]
    fn deal_rejects_odd_cell_count() {
        assert_eq!(
            deal((3, 3), &DEFAULT_SYMBOL_POOL),
            Err(ConfigError::OddCellCount(9))
        );
    }

    #[test]
    fn deal_rejects_undersized_pool() {
        assert_eq!(
            deal((4, 4), &["A", "B"]),
            Err(ConfigError::PoolTooSmall {
                needed: 8,
                available: 2
            })
        );
    }

    #[test]
    fn from_layout_rejects_unpaired_symbols() {
        let symbols = vec!["A".to_owned(), "B".to_owned()];
        let result = Deck::from_layout((2, 2), symbols, vec![0, 0, 0, 1]);

        assert_eq!(result, Err(ConfigError::UnpairedLayout));
    }

    #[test]
    fn reshuffle_preserves_the_pair_multiset() {
        let mut deck = deal((4, 4), &DEFAULT_SYMBOL_POOL).unwrap();
        let mut before: Vec<_> = (0..16).map(|i| deck.symbol_id_at(i)).collect();

        let mut rng = SmallRng::seed_from_u64(7);
        deck.reshuffle(&mut rng);
        let mut after: Vec<_> = (0..16).map(|i| deck.symbol_id_at(i)).collect();

        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }
}
