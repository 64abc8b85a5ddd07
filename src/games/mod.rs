//! The three drills.
//!
//! Each game module provides:
//! - Level definitions and a built-in catalog
//! - A `Drill` implementation (question generation and checking)
//! - A session driven by an input event enum

pub mod amount;
pub mod grid;
pub mod place_value;
