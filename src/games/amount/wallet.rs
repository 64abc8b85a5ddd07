//! The player's coins, split between the wallet and the payment tray.
//!
//! Every coin is in exactly one of two places at any time, so the
//! partitions are disjoint by construction. The tray total is kept
//! incrementally; moving a coin is O(1).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Denomination;

use super::stage::Stage;

/// Denominations with more coins than this are shown as a stack.
pub const STACK_THRESHOLD: usize = 3;

/// Most coins a padded stage wallet may hold.
pub const MAX_WALLET_COINS: u32 = 100_000;

/// Coin identifier, stable for the lifetime of one wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoinId(pub u32);

impl CoinId {
    /// Identifier for the coin at `index`, if it fits.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coin({})", self.0)
    }
}

/// Where a coin currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Available to pay with.
    Wallet,
    /// Committed to the payment.
    Tray,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Slot {
    value: Denomination,
    placement: Placement,
}

/// Display group: all coins of one denomination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletGroup {
    pub value: Denomination,
    pub coins: SmallVec<[CoinId; 8]>,
    /// Drawn as a single stack with a count badge.
    pub stacked: bool,
}

/// A multiset of coins partitioned into wallet and tray.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    slots: Vec<Slot>,
    committed_total: u32,
}

impl Wallet {
    /// All coins start in the wallet.
    pub fn new(coins: impl IntoIterator<Item = Denomination>) -> Self {
        let slots = coins
            .into_iter()
            .map(|value| Slot {
                value,
                placement: Placement::Wallet,
            })
            .collect();
        Self {
            slots,
            committed_total: 0,
        }
    }

    /// Build the wallet for a question, topping it up with the stage's
    /// smallest coin until it covers `target`.
    ///
    /// Solvability is guaranteed; a unique or minimal solution is not.
    pub fn synthesize(stage: &Stage, target: u32) -> Self {
        let mut coins = stage.wallet.clone();
        let mut worth = Denomination::total(&coins);

        if let Some(smallest) = stage.smallest_coin().filter(|c| c.value() > 0) {
            let mut padded = 0usize;
            while worth < target {
                coins.push(smallest);
                worth += smallest.value();
                padded += 1;
            }
            if padded > 0 {
                tracing::debug!(amount = target, padded, coin = smallest.value(), "padded wallet");
            }
        }

        Self::new(coins)
    }

    /// Move a coin into the tray. Returns the new tray total.
    ///
    /// Unknown coins and coins already in the tray leave it unchanged.
    pub fn commit(&mut self, coin: CoinId) -> u32 {
        if let Some(slot) = self.slots.get_mut(coin.index()) {
            if slot.placement == Placement::Wallet {
                slot.placement = Placement::Tray;
                self.committed_total += slot.value.value();
            }
        }
        self.committed_total
    }

    /// Move a coin back to the wallet. Returns the new tray total.
    pub fn release(&mut self, coin: CoinId) -> u32 {
        if let Some(slot) = self.slots.get_mut(coin.index()) {
            if slot.placement == Placement::Tray {
                slot.placement = Placement::Wallet;
                self.committed_total -= slot.value.value();
            }
        }
        self.committed_total
    }

    /// Sum of coins in the tray.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.committed_total
    }

    /// Sum of every coin, wherever it is.
    #[must_use]
    pub fn worth(&self) -> u32 {
        self.slots.iter().map(|s| s.value.value()).sum()
    }

    /// Number of coins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True for a wallet with no coins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Face value of a coin.
    #[must_use]
    pub fn value(&self, coin: CoinId) -> Option<Denomination> {
        self.slots.get(coin.index()).map(|s| s.value)
    }

    /// Where a coin is.
    #[must_use]
    pub fn placement(&self, coin: CoinId) -> Option<Placement> {
        self.slots.get(coin.index()).map(|s| s.placement)
    }

    fn in_place(&self, place: Placement) -> impl Iterator<Item = CoinId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.placement == place)
            .filter_map(|(i, _)| CoinId::from_index(i))
    }

    /// Coins still in the wallet.
    pub fn available(&self) -> impl Iterator<Item = CoinId> + '_ {
        self.in_place(Placement::Wallet)
    }

    /// Coins in the tray.
    pub fn committed(&self) -> impl Iterator<Item = CoinId> + '_ {
        self.in_place(Placement::Tray)
    }

    /// Coins grouped by denomination, largest first.
    #[must_use]
    pub fn groups(&self) -> Vec<WalletGroup> {
        let mut values: Vec<Denomination> = self.slots.iter().map(|s| s.value).collect();
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.dedup();

        values
            .into_iter()
            .map(|value| {
                let coins: SmallVec<[CoinId; 8]> = self
                    .slots
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.value == value)
                    .filter_map(|(i, _)| CoinId::from_index(i))
                    .collect();
                let stacked = coins.len() > STACK_THRESHOLD;
                WalletGroup { value, coins, stacked }
            })
            .collect()
    }
}
