//! Error types.
//!
//! Only configuration and persistence can fail. Player mistakes are
//! ordinary `Outcome` values, never errors.

use std::path::PathBuf;
use thiserror::Error;

/// A level catalog that cannot be played.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Catalog with no levels at all.
    #[error("catalog has no levels")]
    EmptyCatalog,

    /// Amount game stage with nothing to ask.
    #[error("level '{level}' has no target amounts")]
    EmptyAmounts { level: String },

    /// Target amount of zero can never be paid.
    #[error("level '{level}' has a zero target amount")]
    ZeroAmount { level: String },

    /// No denominations to build questions from.
    #[error("level '{level}' has no coin denominations")]
    EmptyCoinSet { level: String },

    /// A zero-valued coin would stall wallet padding.
    #[error("level '{level}' uses a zero-valued coin")]
    ZeroDenomination { level: String },

    /// Sums of the level's coins or amounts would not fit in a `u32`.
    #[error("level '{level}' has coin or amount values too large to add up")]
    ValueOverflow { level: String },

    /// Padding the wallet to the largest amount needs too many coins.
    #[error("level '{level}' needs {coins} wallet coins, limit is {max}")]
    WalletTooLarge { level: String, coins: u64, max: u32 },

    /// Grid with no cells.
    #[error("level '{level}' has a zero grid size")]
    ZeroGridSize { level: String },

    /// A stage that can never be cleared.
    #[error("level '{level}' has a zero question quota")]
    ZeroQuota { level: String },

    /// Best time records need a stable key.
    #[error("level '{level}' has an empty record key")]
    EmptyRecordKey { level: String },

    /// Place-value level with no columns.
    #[error("level '{level}' has no place values")]
    NoPlaces { level: String },

    /// Place columns must run from most to least significant, once each.
    #[error("level '{level}' has place values out of order")]
    PlacesOutOfOrder { level: String },

    /// All-zero fallback must produce a nonzero leading digit.
    #[error("level '{level}' has leading digit fallback {min}, expected 1..=9")]
    BadFallback { level: String, min: u8 },

    /// Level index past the end of the catalog.
    #[error("unknown level index {index} (catalog has {len})")]
    UnknownLevel { index: usize, len: usize },

    /// Catalog JSON could not be parsed.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reading or writing persisted best times.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("failed to access record file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record file exists but is not a key/seconds map.
    #[error("corrupt record file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
