//! Shared game rules: answer outcomes, the `Drill` trait and
//! repeat-avoiding selection.
//!
//! Each game implements `Drill` to define:
//! - How a question is generated for a level
//! - How the player's input is classified against it
//!
//! Sessions call into `Drill` but never interpret game-specific
//! answers directly.

pub mod drill;
pub mod repeat;

pub use drill::{Drill, Outcome};
pub use repeat::{draw_avoiding, pick_avoiding, MAX_REDRAWS};
