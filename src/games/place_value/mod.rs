//! Hundreds/tens/ones digit entry.
//!
//! Coins are laid out in place-value columns and the player types the
//! number they show, one digit per column. Columns before the first
//! nonzero digit must be left empty. Ten questions make a game, timed
//! with a stopwatch in tenths of a second.

mod game;
mod level;
mod pad;

pub use game::{
    PlaceEvent, PlacePhase, PlaceResponse, PlaceValueDrill, PlaceValueSession, CORRECT_PAUSE_MS,
    WRONG_PAUSE_MS,
};
pub use level::{
    builtin_place_levels, Place, PlaceCoins, PlaceLevel, PlaceQuestion, SplitPolicy,
    TOTAL_QUESTIONS,
};
pub use pad::DigitPad;
