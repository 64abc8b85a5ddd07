//! Core building blocks shared by every game: denominations, RNG,
//! caller-driven time, level catalogs, errors and best time storage.
//!
//! Games configure these via their own level types rather than
//! modifying the core.

pub mod money;
pub mod rng;
pub mod clock;
pub mod config;
pub mod error;
pub mod store;

pub use money::Denomination;
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use clock::{format_mm_ss, format_tenths, Deadline, Debouncer, Millis, Ticker};
pub use config::{Catalog, LevelConfig};
pub use error::{ConfigError, StoreError};
pub use store::{record_best, BestTimeStore, JsonFileStore, MemoryStore};
