use serde::{Deserialize, Serialize};

use crate::SymbolId;

/// Canonical per-cell visibility state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

impl CardState {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCell {
    pub symbol: SymbolId,
    pub state: CardState,
}

/// Per-cell snapshot exposed to renderers; a hidden card never leaks its symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CardView<'a> {
    Hidden,
    Revealed(&'a str),
    Matched(&'a str),
}

impl<'a> CardView<'a> {
    pub const fn symbol(self) -> Option<&'a str> {
        match self {
            Self::Hidden => None,
            Self::Revealed(glyph) | Self::Matched(glyph) => Some(glyph),
        }
    }

    pub const fn is_face_up(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}
