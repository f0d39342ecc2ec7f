use serde::{Deserialize, Serialize};

pub use card::*;
pub use clock::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use scheduler::*;
pub use score::*;
pub use types::*;
pub use view::*;

mod card;
mod clock;
mod deck;
mod engine;
mod error;
mod scheduler;
mod score;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    pub fn new((rows, cols): Coord2) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        Self::new_unchecked((rows, cols))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((4, 4))
    }
}
