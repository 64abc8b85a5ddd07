//! Coin denominations.

use serde::{Deserialize, Serialize};

/// A single coin value in yen.
///
/// Levels define which denominations are in play; the engine only
/// sums and compares them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Denomination(pub u32);

impl Denomination {
    pub const YEN_1: Self = Self(1);
    pub const YEN_5: Self = Self(5);
    pub const YEN_10: Self = Self(10);
    pub const YEN_50: Self = Self(50);
    pub const YEN_100: Self = Self(100);
    pub const YEN_500: Self = Self(500);

    /// Create a new denomination.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the face value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Build a list of denominations from raw values.
    pub fn list(values: &[u32]) -> Vec<Self> {
        values.iter().copied().map(Self).collect()
    }

    /// Smallest denomination in a set, if any.
    #[must_use]
    pub fn smallest(set: &[Self]) -> Option<Self> {
        set.iter().copied().min()
    }

    /// Sum of face values.
    pub fn total<'a>(coins: impl IntoIterator<Item = &'a Self>) -> u32 {
        coins.into_iter().map(|c| c.0).sum()
    }
}

impl std::fmt::Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}円", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Denomination::YEN_50.to_string(), "50円");
    }

    #[test]
    fn test_smallest_and_total() {
        let coins = Denomination::list(&[10, 1, 100, 5]);
        assert_eq!(Denomination::smallest(&coins), Some(Denomination::YEN_1));
        assert_eq!(Denomination::total(&coins), 116);
        assert_eq!(Denomination::smallest(&[]), None);
    }

    #[test]
    fn test_serde_is_bare_number() {
        let json = serde_json::to_string(&Denomination::YEN_5).unwrap();
        assert_eq!(json, "5");
        let back: Denomination = serde_json::from_str("100").unwrap();
        assert_eq!(back, Denomination::YEN_100);
    }
}
