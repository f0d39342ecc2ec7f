use std::num::Saturating;

use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Delay before an unmatched pair flips back down.
pub const REVEAL_DELAY_MS: u32 = 800;
/// Interval between elapsed-time display refreshes while the clock runs.
pub const TICK_INTERVAL_MS: u32 = 500;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Ready,
    Active,
    Won,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// What a single click did. `Ignored` covers every gated input: locked
/// board, face-up card, out-of-bounds coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Revealed,
    Matched,
    Mismatch,
    Won,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// The zero, one, or two face-up unmatched cards awaiting resolution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
enum Selection {
    #[default]
    Empty,
    One(Coord2),
    Pair(Coord2, Coord2),
}

/// Finite-state controller for one memory-matching game.
///
/// The engine is purely event-driven: the driver feeds it clicks and fires
/// scheduled tasks back into [`GameEngine::run_task`], supplying `now` from
/// its own [`Clock`]. Every scheduled task carries the generation current at
/// scheduling time; tasks from before a restart are discarded.
#[derive(Clone, Debug)]
pub struct GameEngine {
    deck: Deck,
    board: Array2<CardCell>,
    selection: Selection,
    locked: bool,
    matched_count: Saturating<CellCount>,
    state: EngineState,
    stopwatch: Stopwatch,
    scores: ScoreKeeper,
    generation: Generation,
    rng: SmallRng,
}

impl GameEngine {
    pub fn new(config: GameConfig, pool: &[&str], seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let deck = Deck::deal(config, pool, &mut rng)?;
        Ok(Self::with_deck(deck, rng))
    }

    /// Builds an engine over an already-dealt deck, for deterministic games.
    pub fn with_deck(deck: Deck, rng: SmallRng) -> Self {
        let board = Self::place_cards(&deck);
        Self {
            deck,
            board,
            selection: Selection::Empty,
            locked: false,
            matched_count: Saturating(0),
            state: EngineState::Ready,
            stopwatch: Stopwatch::default(),
            scores: ScoreKeeper::default(),
            generation: 0,
            rng,
        }
    }

    fn place_cards(deck: &Deck) -> Array2<CardCell> {
        let (rows, cols) = deck.size();
        let cells = (0..usize::from(deck.total_cells()))
            .map(|index| CardCell {
                symbol: deck.symbol_id_at(index),
                state: CardState::Hidden,
            })
            .collect();
        Array2::from_shape_vec((usize::from(rows), usize::from(cols)), cells)
            .expect("deck length matches board dimensions")
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn size(&self) -> Coord2 {
        self.deck.size()
    }

    pub fn moves(&self) -> u32 {
        self.scores.moves()
    }

    pub fn best_score(&self) -> Option<BestScore> {
        self.scores.best()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn elapsed_secs(&self, now: TimestampMs) -> u32 {
        self.stopwatch.elapsed_secs(now)
    }

    pub fn formatted_time(&self, now: TimestampMs) -> String {
        format_clock(self.elapsed_secs(now))
    }

    /// Renderer-facing snapshot of a single cell.
    pub fn card_at(&self, coords: Coord2) -> CardView<'_> {
        let cell = self.board[coords.to_nd_index()];
        match cell.state {
            CardState::Hidden => CardView::Hidden,
            CardState::Revealed => CardView::Revealed(self.deck.symbol(cell.symbol)),
            CardState::Matched => CardView::Matched(self.deck.symbol(cell.symbol)),
        }
    }

    /// Processes one cell click from the view. Total on any input: gated
    /// clicks return [`ClickOutcome::Ignored`] without side effects.
    pub fn handle_cell_click(
        &mut self,
        coords: Coord2,
        now: TimestampMs,
        scheduler: &mut impl Scheduler,
        view: &mut impl ViewSink,
    ) -> ClickOutcome {
        if self.locked {
            return ClickOutcome::Ignored;
        }
        let Some(cell) = self.cell(coords) else {
            return ClickOutcome::Ignored;
        };
        // Covers both matched cards and a double click on the pending card.
        if cell.state.is_face_up() {
            return ClickOutcome::Ignored;
        }

        if !self.stopwatch.is_running() {
            self.start_clock(now, scheduler, view);
        }

        self.set_state(coords, CardState::Revealed);
        view.emit(ViewCommand::Reveal {
            coords,
            symbol: self.deck.symbol(cell.symbol).to_owned(),
        });

        match self.selection {
            Selection::Empty => {
                self.selection = Selection::One(coords);
                ClickOutcome::Revealed
            }
            Selection::One(first) if first != coords => {
                self.selection = Selection::Pair(first, coords);
                let moves = self.scores.bump_moves();
                view.emit(ViewCommand::MovesChanged(moves));
                self.resolve_pair(first, coords, now, scheduler, view)
            }
            // Unreachable while the gating above holds; stay inert if not.
            _ => ClickOutcome::Ignored,
        }
    }

    /// Entry point for scheduled callbacks. Tasks tagged with a generation
    /// other than the current one are stale and ignored.
    pub fn run_task(&mut self, task: ScheduledTask, now: TimestampMs, view: &mut impl ViewSink) {
        if task.generation != self.generation {
            log::trace!("discarding stale scheduled task {task:?}");
            return;
        }

        match task.kind {
            TaskKind::UnrevealPair => self.unreveal_pair(view),
            TaskKind::TimerTick => self.emit_time(now, view),
        }
    }

    /// Abandons the current session and deals a fresh board. The best score
    /// is kept; everything else resets. Safe to call mid-lock or after a win.
    pub fn restart(&mut self, scheduler: &mut impl Scheduler, view: &mut impl ViewSink) {
        log::debug!("restarting game (generation {})", self.generation);
        self.retire_generation(scheduler);
        self.stopwatch.reset();
        self.scores.reset_moves();
        view.emit(ViewCommand::MovesChanged(0));
        view.emit(ViewCommand::TimeChanged(format_clock(0)));
        self.locked = false;
        self.selection = Selection::Empty;
        self.matched_count = Saturating(0);
        self.state = EngineState::Ready;
        self.deck.reshuffle(&mut self.rng);
        self.board = Self::place_cards(&self.deck);
        for coords in iter_coords(self.size()) {
            view.emit(ViewCommand::Hide { coords });
        }
    }

    fn resolve_pair(
        &mut self,
        first: Coord2,
        second: Coord2,
        now: TimestampMs,
        scheduler: &mut impl Scheduler,
        view: &mut impl ViewSink,
    ) -> ClickOutcome {
        let matched = self.board[first.to_nd_index()].symbol == self.board[second.to_nd_index()].symbol;

        if matched {
            self.set_state(first, CardState::Matched);
            self.set_state(second, CardState::Matched);
            self.selection = Selection::Empty;
            self.matched_count += 2;

            if self.matched_count == Saturating(self.deck.total_cells()) {
                self.finish_game(now, scheduler, view);
                ClickOutcome::Won
            } else {
                ClickOutcome::Matched
            }
        } else {
            // Input stays suppressed until the unreveal task clears it.
            self.locked = true;
            scheduler.schedule_once(
                REVEAL_DELAY_MS,
                ScheduledTask {
                    kind: TaskKind::UnrevealPair,
                    generation: self.generation,
                },
            );
            ClickOutcome::Mismatch
        }
    }

    fn finish_game(
        &mut self,
        now: TimestampMs,
        scheduler: &mut impl Scheduler,
        view: &mut impl ViewSink,
    ) {
        self.stopwatch.stop(now);
        // Also silences the repeating tick.
        self.retire_generation(scheduler);
        self.state = EngineState::Won;

        let seconds = self.stopwatch.elapsed_secs(now);
        let new_best = self.scores.record_win(seconds);
        log::debug!(
            "game won in {} moves and {seconds}s (new best: {new_best})",
            self.scores.moves()
        );
        view.emit(ViewCommand::Won {
            moves: self.scores.moves(),
            seconds,
            new_best,
        });
    }

    fn unreveal_pair(&mut self, view: &mut impl ViewSink) {
        if let Selection::Pair(first, second) = self.selection {
            self.set_state(first, CardState::Hidden);
            self.set_state(second, CardState::Hidden);
            view.emit(ViewCommand::Hide { coords: first });
            view.emit(ViewCommand::Hide { coords: second });
        }
        self.selection = Selection::Empty;
        self.locked = false;
    }

    fn emit_time(&mut self, now: TimestampMs, view: &mut impl ViewSink) {
        if !self.stopwatch.is_running() {
            return;
        }
        view.emit(ViewCommand::TimeChanged(self.formatted_time(now)));
    }

    fn start_clock(
        &mut self,
        now: TimestampMs,
        scheduler: &mut impl Scheduler,
        view: &mut impl ViewSink,
    ) {
        self.stopwatch.start(now);
        self.state = EngineState::Active;
        view.emit(ViewCommand::TimeChanged(format_clock(0)));
        scheduler.schedule_repeating(
            TICK_INTERVAL_MS,
            ScheduledTask {
                kind: TaskKind::TimerTick,
                generation: self.generation,
            },
        );
    }

    fn retire_generation(&mut self, scheduler: &mut impl Scheduler) {
        scheduler.cancel_generation(self.generation);
        self.generation = self.generation.wrapping_add(1);
    }

    fn cell(&self, coords: Coord2) -> Option<CardCell> {
        self.board.get(coords.to_nd_index()).copied()
    }

    fn set_state(&mut self, coords: Coord2, state: CardState) {
        self.board[coords.to_nd_index()].state = state;
    }
}
