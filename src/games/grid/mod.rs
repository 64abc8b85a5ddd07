//! Coin-sum grid against the clock.
//!
//! Rows and columns are headed by coins; every cell holds the sum of
//! its row and column header. The player starts a timer, fills cells
//! through a ten-key pad or the keyboard, and the round ends when every
//! cell is correct. The best clear time per level is kept in a
//! `BestTimeStore`.

mod board;
mod game;
mod level;

pub use board::{CellPos, GridBoard, GridKey, FLASH_MS, MAX_ENTRY_DIGITS};
pub use game::{
    CellAttempt, ClearResult, GridDrill, GridEvent, GridPhase, GridResponse, GridSession,
    RESIZE_DEBOUNCE_MS,
};
pub use level::{builtin_grid_levels, pick_headers, record_key, GridLevel, GridQuestion};
