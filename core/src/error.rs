use thiserror::Error;

use crate::CellCount;

/// The only boundary failure: the requested game cannot be constructed.
/// Anomalous inputs during play are silent no-ops, not errors.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Grid must have at least one row and one column")]
    EmptyGrid,
    #[error("Grid must contain an even number of cards, got {0}")]
    OddCellCount(CellCount),
    #[error("Symbol pool too small: need {needed} unique symbols, pool has {available}")]
    PoolTooSmall { needed: CellCount, available: usize },
    #[error("Deck layout does not pair every symbol exactly twice")]
    UnpairedLayout,
}

pub type Result<T> = core::result::Result<T, ConfigError>;
