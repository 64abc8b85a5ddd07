//! Grid game implementation.

use serde::{Deserialize, Serialize};

use crate::core::{
    format_mm_ss, record_best, BestTimeStore, Catalog, Debouncer, GameRng, MemoryStore, Millis,
    RandomSource, Ticker,
};
use crate::rules::{draw_avoiding, Drill, Outcome};

use super::board::{CellPos, GridBoard, GridKey};
use super::level::{pick_headers, GridLevel, GridQuestion};

/// Resize bursts shorter than this rebuild the grid once.
pub const RESIZE_DEBOUNCE_MS: u64 = 200;

/// A single cell answer to check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellAttempt {
    pub pos: CellPos,
    pub entry: String,
}

/// Rules of the grid game.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridDrill;

impl Drill for GridDrill {
    type Level = GridLevel;
    type Question = GridQuestion;
    type Answer = CellAttempt;

    fn generate<R: RandomSource>(
        &self,
        level: &GridLevel,
        previous: Option<&GridQuestion>,
        rng: &mut R,
    ) -> GridQuestion {
        draw_avoiding(previous, || {
            let cols = pick_headers(&level.coins, level.grid_size, rng);
            let rows = pick_headers(&level.coins, level.grid_size, rng);
            GridQuestion { rows, cols }
        })
    }

    /// Only the attempted cell is checked. Empty or unparsable text and
    /// cells outside the grid are `Incomplete`.
    fn evaluate(&self, question: &GridQuestion, attempt: &CellAttempt) -> Outcome {
        let Some(answer) = question.answer(attempt.pos.row, attempt.pos.col) else {
            return Outcome::Incomplete;
        };
        match attempt.entry.parse::<u32>() {
            Ok(value) if value == answer => Outcome::Correct,
            Ok(_) => Outcome::Incorrect,
            Err(_) => Outcome::Incomplete,
        }
    }
}

/// Result of clearing a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearResult {
    /// Clear time in whole seconds.
    pub seconds: u64,
    /// Beat (or set the first) best time.
    pub new_record: bool,
    /// Stored best after this clear.
    pub best: Option<u64>,
}

/// Round state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridPhase {
    /// Grid shown, timer idle.
    NotStarted,
    /// Timer running, cells accept input.
    Running,
    /// Every cell solved.
    Cleared(ClearResult),
}

/// Player input, independent of pointer, touch or keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridEvent {
    /// Start the timer and focus the top-left cell.
    Start,
    /// Focus a cell.
    SelectCell(CellPos),
    /// Ten-key or keyboard input for the focused cell.
    Key(GridKey),
    /// Fresh grid on the same level.
    Retry,
    /// Switch level.
    SelectLevel(usize),
    /// Viewport changed size.
    Resize,
    /// Let pending timed work (debounced rebuild) run.
    Poll,
}

/// What changed in response to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridResponse {
    Ignored,
    Started,
    Selected(CellPos),
    /// The focused cell's text changed.
    EntryChanged(CellPos),
    /// A cell was checked; the grid is not finished yet.
    Checked { pos: CellPos, outcome: Outcome },
    Cleared(ClearResult),
    /// New grid, timer reset.
    Reset,
    /// Resize noted; the rebuild happens on a later `Poll`.
    ResizePending,
    /// Debounced resize regenerated the grid.
    Rebuilt,
}

/// One player's timed run through a grid level.
#[derive(Clone, Debug)]
pub struct GridSession<S: BestTimeStore = MemoryStore, R: RandomSource = GameRng> {
    catalog: Catalog<GridLevel>,
    level: usize,
    store: S,
    rng: R,
    drill: GridDrill,
    question: GridQuestion,
    board: GridBoard,
    timer: Ticker,
    phase: GridPhase,
    resize: Debouncer,
}

impl GridSession<MemoryStore, GameRng> {
    /// Level 0, in-memory records, seeded RNG.
    pub fn new(catalog: Catalog<GridLevel>, seed: u64) -> Self {
        Self::with_parts(catalog, MemoryStore::new(), GameRng::new(seed))
    }

    /// Level 0, in-memory records, RNG seeded by the operating system.
    pub fn from_entropy(catalog: Catalog<GridLevel>) -> Self {
        Self::with_parts(catalog, MemoryStore::new(), GameRng::from_entropy())
    }
}

impl<S: BestTimeStore, R: RandomSource> GridSession<S, R> {
    /// Level 0 with the given record store and random source.
    pub fn with_parts(catalog: Catalog<GridLevel>, store: S, rng: R) -> Self {
        let mut session = Self {
            catalog,
            level: 0,
            store,
            rng,
            drill: GridDrill,
            question: GridQuestion::default(),
            board: GridBoard::new(0),
            timer: Ticker::seconds(),
            phase: GridPhase::NotStarted,
            resize: Debouncer::new(RESIZE_DEBOUNCE_MS),
        };
        session.build_grid();
        session
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: GridEvent, now: Millis) -> GridResponse {
        let running = self.phase == GridPhase::Running;
        match event {
            GridEvent::Start if self.phase == GridPhase::NotStarted => self.start(now),
            GridEvent::SelectCell(pos) if running => {
                if self.board.select(pos) {
                    GridResponse::Selected(pos)
                } else {
                    GridResponse::Ignored
                }
            }
            GridEvent::Key(key) if running => self.key(key, now),
            GridEvent::Retry => {
                self.reset_round(now);
                GridResponse::Reset
            }
            GridEvent::SelectLevel(index) => self.select_level(index, now),
            GridEvent::Resize => {
                self.resize.trigger(now);
                GridResponse::ResizePending
            }
            GridEvent::Poll => self.poll(now),
            _ => GridResponse::Ignored,
        }
    }

    fn start(&mut self, now: Millis) -> GridResponse {
        self.timer.reset();
        self.timer.start(now);
        self.phase = GridPhase::Running;
        self.board.select(CellPos::new(0, 0));
        tracing::debug!(level = self.level, "grid timer started");
        GridResponse::Started
    }

    fn key(&mut self, key: GridKey, now: Millis) -> GridResponse {
        let Some(pos) = self.board.selected() else {
            return GridResponse::Ignored;
        };
        let changed = match key {
            GridKey::Digit(d) => self.board.push_digit(d),
            GridKey::Delete => self.board.pop_digit(),
            GridKey::Enter => return self.check_cell(pos, now),
        };
        if changed {
            GridResponse::EntryChanged(pos)
        } else {
            GridResponse::Ignored
        }
    }

    fn check_cell(&mut self, pos: CellPos, now: Millis) -> GridResponse {
        let attempt = CellAttempt {
            pos,
            entry: self.board.entry(pos).unwrap_or_default().to_string(),
        };
        let outcome = self.drill.evaluate(&self.question, &attempt);
        tracing::debug!(%pos, entry = %attempt.entry, ?outcome, "check cell");

        match outcome {
            Outcome::Correct => {
                self.board.mark_solved(pos);
                if self.board.is_complete() {
                    return self.finish(now);
                }
                if let Some(next) = self.board.next_unsolved(pos) {
                    self.board.select(next);
                }
                GridResponse::Checked { pos, outcome }
            }
            Outcome::Incorrect => {
                self.board.mark_wrong(pos, now);
                GridResponse::Checked { pos, outcome }
            }
            _ => GridResponse::Ignored,
        }
    }

    fn finish(&mut self, now: Millis) -> GridResponse {
        self.timer.stop(now);
        let seconds = self.timer.ticks(now);
        let key = self.catalog[self.level].record_key.clone();

        let new_record = match record_best(&mut self.store, &key, seconds) {
            Ok(new_record) => new_record,
            Err(error) => {
                tracing::warn!(%error, key = %key, "could not save best time");
                false
            }
        };
        let result = ClearResult {
            seconds,
            new_record,
            best: self.store.load(&key),
        };

        self.board.deselect();
        self.phase = GridPhase::Cleared(result);
        tracing::info!(level = self.level, seconds, new_record, "grid cleared");
        GridResponse::Cleared(result)
    }

    fn select_level(&mut self, index: usize, now: Millis) -> GridResponse {
        let replaying = index == self.level && self.phase == GridPhase::Running;
        if !self.catalog.contains(index) || replaying {
            return GridResponse::Ignored;
        }
        self.level = index;
        self.reset_round(now);
        GridResponse::Reset
    }

    /// A fired resize rebuilds any grid that is not being played,
    /// including a cleared one.
    fn poll(&mut self, now: Millis) -> GridResponse {
        if !self.resize.fire(now) || self.phase == GridPhase::Running {
            return GridResponse::Ignored;
        }
        self.reset_round(now);
        GridResponse::Rebuilt
    }

    fn reset_round(&mut self, now: Millis) {
        if self.timer.stop(now) {
            tracing::debug!(level = self.level, "grid timer stopped on reset");
        }
        self.timer.reset();
        self.resize.cancel();
        self.phase = GridPhase::NotStarted;
        self.build_grid();
    }

    fn build_grid(&mut self) {
        let level = &self.catalog[self.level];
        self.question = self.drill.generate(level, Some(&self.question), &mut self.rng);
        self.board = GridBoard::new(level.grid_size);
        tracing::debug!(
            level = self.level,
            rows = ?self.question.rows,
            cols = ?self.question.cols,
            "new grid"
        );
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    /// Current level index.
    #[must_use]
    pub fn level_index(&self) -> usize {
        self.level
    }

    /// Current level definition.
    #[must_use]
    pub fn level(&self) -> &GridLevel {
        &self.catalog[self.level]
    }

    /// Headers of the current grid.
    #[must_use]
    pub fn question(&self) -> &GridQuestion {
        &self.question
    }

    /// Player entries.
    #[must_use]
    pub fn board(&self) -> &GridBoard {
        &self.board
    }

    /// Whole seconds on the clock.
    #[must_use]
    pub fn elapsed_seconds(&self, now: Millis) -> u64 {
        self.timer.ticks(now)
    }

    /// Clock as `mm:ss`.
    #[must_use]
    pub fn clock_display(&self, now: Millis) -> String {
        format_mm_ss(self.elapsed_seconds(now))
    }

    /// Stored best time for the current level.
    #[must_use]
    pub fn best_time(&self) -> Option<u64> {
        self.store.load(&self.catalog[self.level].record_key)
    }

    /// Record store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
