//! # coin-drill
//!
//! Question generators, answer validators and progression state machines
//! for three children's money arithmetic drills.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: Sessions consume abstract input events
//!    (`AmountEvent`, `GridEvent`, `PlaceEvent`) and return responses.
//!    Rendering, audio and gesture tracking live outside the crate.
//!
//! 2. **Caller-Driven Time**: Every event carries the current `Millis`.
//!    Timers, feedback pauses and resize debouncing are plain values, so
//!    any sequence of events replays exactly.
//!
//! 3. **Injected Randomness**: Generators take any `RandomSource`. Games
//!    use a seeded ChaCha8 `GameRng`; tests script the draws.
//!
//! 4. **Validated Configuration**: Levels are serde structs collected in
//!    a `Catalog` that rejects unplayable definitions up front.
//!
//! ## Modules
//!
//! - `core`: Denominations, RNG, time primitives, catalogs, errors,
//!   best time storage
//! - `rules`: `Outcome`, the `Drill` trait, repeat-avoiding selection
//! - `games`: The amount, grid and place-value drills
//!
//! ## Example
//!
//! ```
//! use coin_drill::games::amount::{builtin_stages, AmountEvent, AmountSession};
//! use coin_drill::{Millis, Outcome};
//!
//! let mut session = AmountSession::new(builtin_stages(), 7);
//! let target = session.target();
//! assert!(session.wallet().worth() >= target);
//!
//! let response = session.handle(AmountEvent::Pay, Millis(0));
//! assert_eq!(response, coin_drill::games::amount::AmountResponse::Paid(Outcome::Empty));
//! ```

pub mod core;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Denomination,
    GameRng, GameRngState, RandomSource, ScriptedRng,
    Millis, Ticker, Deadline, Debouncer,
    Catalog, LevelConfig,
    ConfigError, StoreError,
    BestTimeStore, MemoryStore, JsonFileStore,
};

pub use crate::rules::{Drill, Outcome};

pub use crate::games::amount::{AmountSession, AmountEvent, AmountResponse, Stage};
pub use crate::games::grid::{GridSession, GridEvent, GridResponse, GridLevel};
pub use crate::games::place_value::{PlaceValueSession, PlaceEvent, PlaceResponse, PlaceLevel};
