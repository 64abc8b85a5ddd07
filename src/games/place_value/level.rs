//! Place columns, levels and digit question generation.

use serde::{Deserialize, Serialize};

use crate::core::{Catalog, ConfigError, Denomination, LevelConfig, RandomSource};

/// Questions in one game.
pub const TOTAL_QUESTIONS: usize = 10;

/// A positional column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Place {
    Hundreds,
    Tens,
    Ones,
}

impl Place {
    /// Positional weight.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Place::Hundreds => 100,
            Place::Tens => 10,
            Place::Ones => 1,
        }
    }

    /// Coin worth five units of this place, if one exists.
    #[must_use]
    pub const fn half_coin(self) -> Option<Denomination> {
        match self {
            Place::Hundreds => None,
            Place::Tens => Some(Denomination::YEN_50),
            Place::Ones => Some(Denomination::YEN_5),
        }
    }

    /// Coin worth one unit of this place.
    #[must_use]
    pub const fn base_coin(self) -> Denomination {
        Denomination(self.value())
    }

    /// Column heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Place::Hundreds => "ひゃく",
            Place::Tens => "じゅう",
            Place::Ones => "いち",
        }
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a digit of 5 or more is shown as coins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Only unit coins.
    #[default]
    BaseOnly,
    /// One half coin plus units whenever the place has a half coin.
    AlwaysHalf,
    /// Like `AlwaysHalf`, decided per column by a coin flip.
    CoinFlip,
}

/// Coins shown in one column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceCoins {
    /// Half coins (0 or 1).
    pub half: u8,
    /// Unit coins.
    pub base: u8,
}

impl SplitPolicy {
    /// Decompose `digit` into coins for `place`.
    pub fn split<R: RandomSource + ?Sized>(
        self,
        place: Place,
        digit: u8,
        rng: &mut R,
    ) -> PlaceCoins {
        if digit < 5 || place.half_coin().is_none() {
            return PlaceCoins { half: 0, base: digit };
        }
        let use_half = match self {
            SplitPolicy::BaseOnly => false,
            SplitPolicy::AlwaysHalf => true,
            SplitPolicy::CoinFlip => rng.coin_flip(),
        };
        if use_half {
            PlaceCoins { half: 1, base: digit - 5 }
        } else {
            PlaceCoins { half: 0, base: digit }
        }
    }
}

fn default_fallback() -> u8 {
    1
}

/// One difficulty tier of the place-value game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceLevel {
    /// Display name.
    pub name: String,
    /// Columns, most significant first.
    pub places: Vec<Place>,
    /// Coin decomposition of each digit.
    #[serde(default)]
    pub split: SplitPolicy,
    /// Lowest leading digit drawn when every digit came out zero.
    #[serde(default = "default_fallback")]
    pub fallback_min: u8,
}

impl PlaceLevel {
    pub fn new(name: impl Into<String>, places: &[Place]) -> Self {
        Self {
            name: name.into(),
            places: places.to_vec(),
            split: SplitPolicy::BaseOnly,
            fallback_min: 1,
        }
    }

    #[must_use]
    pub fn with_split(mut self, split: SplitPolicy) -> Self {
        self.split = split;
        self
    }

    #[must_use]
    pub fn with_fallback_min(mut self, min: u8) -> Self {
        self.fallback_min = min;
        self
    }

    /// Draw one digit per column, forcing a nonzero leading digit when
    /// the draw came out all zero.
    pub fn draw_digits<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        let mut digits: Vec<u8> = self.places.iter().map(|_| rng.next_in(0, 9)).collect();
        if digits.iter().all(|&d| d == 0) {
            for (i, digit) in digits.iter_mut().enumerate() {
                *digit = if i == 0 { rng.next_in(self.fallback_min, 9) } else { rng.next_in(0, 9) };
            }
        }
        digits
    }
}

impl LevelConfig for PlaceLevel {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let level = || self.name.clone();
        if self.places.is_empty() {
            return Err(ConfigError::NoPlaces { level: level() });
        }
        if self.places.windows(2).any(|w| w[0].value() <= w[1].value()) {
            return Err(ConfigError::PlacesOutOfOrder { level: level() });
        }
        if !(1..=9).contains(&self.fallback_min) {
            return Err(ConfigError::BadFallback {
                level: level(),
                min: self.fallback_min,
            });
        }
        Ok(())
    }
}

/// The four built-in levels.
#[must_use]
pub fn builtin_place_levels() -> Catalog<PlaceLevel> {
    use Place::{Hundreds, Ones, Tens};

    let levels = vec![
        PlaceLevel::new("レベル1", &[Tens, Ones]),
        PlaceLevel::new("レベル2", &[Tens, Ones])
            .with_split(SplitPolicy::AlwaysHalf)
            .with_fallback_min(5),
        PlaceLevel::new("レベル3", &[Hundreds, Tens, Ones]),
        PlaceLevel::new("レベル4", &[Hundreds, Tens, Ones]).with_split(SplitPolicy::CoinFlip),
    ];
    Catalog::new(levels).expect("built-in place-value levels are valid")
}

/// Correct digit and coins for every column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceQuestion {
    pub places: Vec<Place>,
    pub digits: Vec<u8>,
    pub coins: Vec<PlaceCoins>,
}

impl PlaceQuestion {
    /// Question with unit coins only.
    pub fn new(places: &[Place], digits: &[u8]) -> Self {
        Self {
            places: places.to_vec(),
            digits: digits.to_vec(),
            coins: digits.iter().map(|&d| PlaceCoins { half: 0, base: d }).collect(),
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Amount shown by the coins.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.places
            .iter()
            .zip(&self.digits)
            .map(|(p, &d)| p.value() * u32::from(d))
            .sum()
    }

    /// Column of the first nonzero digit, or `len()` if there is none.
    ///
    /// Columns before it must be left empty.
    #[must_use]
    pub fn first_significant(&self) -> usize {
        self.digits.iter().position(|&d| d != 0).unwrap_or(self.digits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, ScriptedRng};

    #[test]
    fn test_place_coins() {
        assert_eq!(Place::Tens.half_coin(), Some(Denomination::YEN_50));
        assert_eq!(Place::Hundreds.half_coin(), None);
        assert_eq!(Place::Ones.base_coin(), Denomination::YEN_1);
        assert_eq!(Place::Hundreds.to_string(), "ひゃく");
    }

    #[test]
    fn test_split_policies() {
        let mut rng = ScriptedRng::new(vec![0]);
        assert_eq!(
            SplitPolicy::AlwaysHalf.split(Place::Tens, 7, &mut rng),
            PlaceCoins { half: 1, base: 2 }
        );
        assert_eq!(
            SplitPolicy::AlwaysHalf.split(Place::Ones, 4, &mut rng),
            PlaceCoins { half: 0, base: 4 }
        );
        assert_eq!(
            SplitPolicy::AlwaysHalf.split(Place::Hundreds, 8, &mut rng),
            PlaceCoins { half: 0, base: 8 }
        );
        assert_eq!(
            SplitPolicy::BaseOnly.split(Place::Ones, 9, &mut rng),
            PlaceCoins { half: 0, base: 9 }
        );
        assert_eq!(rng.consumed(), 0);

        // Index 0 is heads
        assert_eq!(
            SplitPolicy::CoinFlip.split(Place::Ones, 5, &mut ScriptedRng::new(vec![0])),
            PlaceCoins { half: 1, base: 0 }
        );
        assert_eq!(
            SplitPolicy::CoinFlip.split(Place::Ones, 5, &mut ScriptedRng::new(vec![1])),
            PlaceCoins { half: 0, base: 5 }
        );
    }

    #[test]
    fn test_all_zero_fallback() {
        // Two zero digits, then fallback leading index 2 -> 5 + 2 = 7, ones 3
        let level = PlaceLevel::new("x", &[Place::Tens, Place::Ones]).with_fallback_min(5);
        let mut rng = ScriptedRng::new(vec![0, 0, 2, 3]);
        assert_eq!(level.draw_digits(&mut rng), vec![7, 3]);
    }

    #[test]
    fn test_never_all_zero() {
        let catalog = builtin_place_levels();
        let mut rng = GameRng::new(11);
        for level in catalog.levels() {
            for _ in 0..300 {
                let digits = level.draw_digits(&mut rng);
                assert_eq!(digits.len(), level.places.len());
                assert!(digits.iter().any(|&d| d != 0));
                assert!(digits.iter().all(|&d| d <= 9));
            }
        }
    }

    #[test]
    fn test_builtin_levels() {
        let catalog = builtin_place_levels();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog[1].split, SplitPolicy::AlwaysHalf);
        assert_eq!(catalog[1].fallback_min, 5);
        assert_eq!(catalog[3].places.len(), 3);
    }

    #[test]
    fn test_validation() {
        let err = PlaceLevel::new("x", &[]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NoPlaces { .. }));

        let err = PlaceLevel::new("x", &[Place::Ones, Place::Tens]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::PlacesOutOfOrder { .. }));

        let err = PlaceLevel::new("x", &[Place::Tens, Place::Tens]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::PlacesOutOfOrder { .. }));

        let err = PlaceLevel::new("x", &[Place::Ones]).with_fallback_min(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::BadFallback { min: 0, .. }));
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"[{"name": "a", "places": ["tens", "ones"]}]"#;
        let catalog = Catalog::<PlaceLevel>::from_json(json).unwrap();
        assert_eq!(catalog[0].split, SplitPolicy::BaseOnly);
        assert_eq!(catalog[0].fallback_min, 1);
    }

    #[test]
    fn test_question_value() {
        let q = PlaceQuestion::new(&[Place::Hundreds, Place::Tens, Place::Ones], &[0, 4, 7]);
        assert_eq!(q.value(), 47);
        assert_eq!(q.first_significant(), 1);
        assert_eq!(PlaceQuestion::new(&[Place::Ones], &[0]).first_significant(), 1);
    }
}
