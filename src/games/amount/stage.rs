//! Stage definitions for the amount game.

use serde::{Deserialize, Serialize};

use crate::core::{Catalog, ConfigError, Denomination, LevelConfig};

use super::wallet::MAX_WALLET_COINS;

/// Questions to clear before moving to the next stage.
pub const QUESTIONS_PER_STAGE: usize = 7;

/// One difficulty tier of the amount game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Display name.
    pub name: String,
    /// Short range description shown next to the name.
    pub description: String,
    /// Denominations the stage is about; the smallest pads the wallet.
    pub coin_types: Vec<Denomination>,
    /// Target amounts that may be asked.
    pub amounts: Vec<u32>,
    /// Coins placed in the wallet before padding.
    pub wallet: Vec<Denomination>,
    /// Questions to clear the stage.
    #[serde(default = "default_quota")]
    pub quota: usize,
}

fn default_quota() -> usize {
    QUESTIONS_PER_STAGE
}

impl Stage {
    /// Create an empty stage; fill it with the builder methods.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            coin_types: Vec::new(),
            amounts: Vec::new(),
            wallet: Vec::new(),
            quota: QUESTIONS_PER_STAGE,
        }
    }

    /// Set the coin types.
    #[must_use]
    pub fn with_coins(mut self, values: &[u32]) -> Self {
        self.coin_types = Denomination::list(values);
        self
    }

    /// Set the target amounts.
    #[must_use]
    pub fn with_amounts(mut self, amounts: impl Into<Vec<u32>>) -> Self {
        self.amounts = amounts.into();
        self
    }

    /// Set the base wallet.
    #[must_use]
    pub fn with_wallet(mut self, values: &[u32]) -> Self {
        self.wallet = Denomination::list(values);
        self
    }

    /// Set the question quota.
    #[must_use]
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }

    /// Coin used to top up a wallet that cannot cover the target.
    #[must_use]
    pub fn smallest_coin(&self) -> Option<Denomination> {
        Denomination::smallest(&self.coin_types)
    }
}

impl LevelConfig for Stage {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let level = || self.name.clone();
        if self.amounts.is_empty() {
            return Err(ConfigError::EmptyAmounts { level: level() });
        }
        if self.amounts.contains(&0) {
            return Err(ConfigError::ZeroAmount { level: level() });
        }
        if self.coin_types.is_empty() {
            return Err(ConfigError::EmptyCoinSet { level: level() });
        }
        if self.coin_types.iter().chain(&self.wallet).any(|c| c.value() == 0) {
            return Err(ConfigError::ZeroDenomination { level: level() });
        }
        if self.quota == 0 {
            return Err(ConfigError::ZeroQuota { level: level() });
        }

        // Wallet padded for the largest amount bounds every question
        let smallest = self.smallest_coin().map_or(1, |c| u64::from(c.value()));
        let base: u64 = self.wallet.iter().map(|c| u64::from(c.value())).sum();
        let target = self.amounts.iter().max().map_or(0, |&a| u64::from(a));
        let padding = target.saturating_sub(base).div_ceil(smallest);
        if base + padding * smallest > u64::from(u32::MAX) {
            return Err(ConfigError::ValueOverflow { level: level() });
        }
        let coins = self.wallet.len() as u64 + padding;
        if coins > u64::from(MAX_WALLET_COINS) {
            return Err(ConfigError::WalletTooLarge {
                level: level(),
                coins,
                max: MAX_WALLET_COINS,
            });
        }
        Ok(())
    }
}

fn repeated(value: u32, count: usize) -> impl Iterator<Item = u32> {
    std::iter::repeat(value).take(count)
}

/// The four built-in stages.
#[must_use]
pub fn builtin_stages() -> Catalog<Stage> {
    let wallet4: Vec<u32> = repeated(1, 9)
        .chain(repeated(5, 2))
        .chain(repeated(10, 5))
        .chain(repeated(50, 2))
        .chain(repeated(100, 5))
        .collect();

    let stages = vec![
        Stage::new("ステージ 1", "10円〜50円")
            .with_coins(&[1, 5, 10])
            .with_amounts([10, 20, 30, 40, 50])
            .with_wallet(&[10, 10, 10, 10, 10, 50]),
        Stage::new("ステージ 2", "50円〜150円")
            .with_coins(&[10, 50, 100])
            .with_amounts((50..=150).step_by(10).collect::<Vec<_>>())
            .with_wallet(&[10, 10, 10, 10, 10, 50, 100, 100]),
        Stage::new("ステージ 3", "100円〜300円")
            .with_coins(&[10, 50, 100])
            .with_amounts([100, 110, 120, 130, 150, 160, 170, 180, 200, 210, 250, 260, 300])
            .with_wallet(&[10, 10, 10, 10, 10, 50, 50, 100, 100, 100]),
        Stage::new("ステージ 4", "こまかいおかね")
            .with_coins(&[1, 5, 10, 50, 100])
            .with_amounts([
                13, 27, 35, 42, 58, 63, 76, 84, 99, 103, 115, 127, 134, 148, 156, 167, 178, 189,
                205, 213, 236, 247, 258, 312, 341, 378, 405, 467,
            ])
            .with_wallet(&wallet4),
    ];

    Catalog::new(stages).expect("built-in stages are valid")
}
