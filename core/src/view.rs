use serde::{Deserialize, Serialize};

use crate::Coord2;

/// Commands the engine emits toward whatever renders the board. The engine
/// never talks to a widget toolkit directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewCommand {
    /// Show the card face at `coords`.
    Reveal { coords: Coord2, symbol: String },
    /// Flip the card at `coords` back down.
    Hide { coords: Coord2 },
    MovesChanged(u32),
    /// Pre-formatted minutes:seconds display text.
    TimeChanged(String),
    Won {
        moves: u32,
        seconds: u32,
        new_best: bool,
    },
}

/// Receiver for engine-emitted view commands.
pub trait ViewSink {
    fn emit(&mut self, command: ViewCommand);
}

/// Recording sink; tests and replay drivers read the collected commands back.
impl ViewSink for Vec<ViewCommand> {
    fn emit(&mut self, command: ViewCommand) {
        self.push(command);
    }
}

/// Discarding sink for drivers that poll the engine's accessors instead.
impl ViewSink for () {
    fn emit(&mut self, _command: ViewCommand) {}
}
