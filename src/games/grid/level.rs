//! Grid levels, header generation and the generated question.

use serde::{Deserialize, Serialize};

use crate::core::{Catalog, ConfigError, Denomination, LevelConfig, RandomSource};

/// One difficulty tier of the grid game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLevel {
    /// Display name.
    pub name: String,
    /// Denominations used for row and column headers.
    pub coins: Vec<Denomination>,
    /// Rows and columns of the grid.
    pub grid_size: usize,
    /// Stable key the best time is stored under.
    pub record_key: String,
}

impl GridLevel {
    /// Create a level with an empty record key.
    pub fn new(name: impl Into<String>, coins: &[u32], grid_size: usize) -> Self {
        Self {
            name: name.into(),
            coins: Denomination::list(coins),
            grid_size,
            record_key: String::new(),
        }
    }

    /// Set the record key.
    #[must_use]
    pub fn with_record_key(mut self, key: impl Into<String>) -> Self {
        self.record_key = key.into();
        self
    }

    /// Number of answer cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }
}

impl LevelConfig for GridLevel {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let level = || self.name.clone();
        if self.coins.is_empty() {
            return Err(ConfigError::EmptyCoinSet { level: level() });
        }
        if self.coins.iter().any(|c| c.value() == 0) {
            return Err(ConfigError::ZeroDenomination { level: level() });
        }
        // Any row and column pair must add up without overflow
        if self.coins.iter().any(|c| c.value() > u32::MAX / 2) {
            return Err(ConfigError::ValueOverflow { level: level() });
        }
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize { level: level() });
        }
        if self.record_key.is_empty() {
            return Err(ConfigError::EmptyRecordKey { level: level() });
        }
        Ok(())
    }
}

/// Record key of the built-in level at `index`.
#[must_use]
pub fn record_key(index: usize) -> String {
    format!("masucalc_best_lv{}", index)
}

/// The five built-in levels.
#[must_use]
pub fn builtin_grid_levels() -> Catalog<GridLevel> {
    let levels = [
        ("レベル1", &[1, 5, 10][..], 3),
        ("レベル2", &[1, 5, 10][..], 4),
        ("レベル3", &[1, 5, 10, 100][..], 5),
        ("レベル4", &[1, 5, 10, 50, 100][..], 5),
        ("レベル5", &[1, 5, 10, 50, 100][..], 7),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, coins, size))| {
        GridLevel::new(name, coins, size).with_record_key(record_key(i))
    })
    .collect();

    Catalog::new(levels).expect("built-in grid levels are valid")
}

/// Generate one header sequence of length `count`.
///
/// - `count <= coins.len()`: a shuffled selection of distinct slots
/// - otherwise every coin appears once (in random order), then random
///   coins are appended, each differing from the one before it
pub fn pick_headers<R: RandomSource>(
    coins: &[Denomination],
    count: usize,
    rng: &mut R,
) -> Vec<Denomination> {
    let mut base = coins.to_vec();
    rng.shuffle(&mut base);

    if count <= base.len() {
        let mut head = base[..count].to_vec();
        rng.shuffle(&mut head);
        return head;
    }

    let mut result = base;
    while result.len() < count {
        let prev = result.last().copied();
        let fresh: Vec<Denomination> = coins.iter().copied().filter(|&c| Some(c) != prev).collect();
        let candidates = if fresh.is_empty() { coins } else { &fresh[..] };
        match rng.pick(candidates) {
            Some(&coin) => result.push(coin),
            None => break,
        }
    }
    result
}

/// Row and column headers; each cell's answer is their sum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridQuestion {
    pub rows: Vec<Denomination>,
    pub cols: Vec<Denomination>,
}

impl GridQuestion {
    /// Build a question from raw header values.
    pub fn new(rows: &[u32], cols: &[u32]) -> Self {
        Self {
            rows: Denomination::list(rows),
            cols: Denomination::list(cols),
        }
    }

    /// Grid side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Correct value of a cell, if the cell exists and its sum fits.
    #[must_use]
    pub fn answer(&self, row: usize, col: usize) -> Option<u32> {
        let r = self.rows.get(row)?;
        let c = self.cols.get(col)?;
        r.value().checked_add(c.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, ScriptedRng};

    #[test]
    fn test_builtin_levels() {
        let levels = builtin_grid_levels();
        assert_eq!(levels.len(), 5);
        assert_eq!(levels[0].grid_size, 3);
        assert_eq!(levels[4].grid_size, 7);
        assert_eq!(levels[4].cell_count(), 49);
        assert_eq!(levels[2].record_key, "masucalc_best_lv2");
    }

    #[test]
    fn test_validation() {
        let ok = GridLevel::new("x", &[1, 5], 2).with_record_key("k");
        assert!(ok.validate().is_ok());

        let err = GridLevel::new("x", &[1], 2).validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRecordKey { .. }));

        let err = GridLevel::new("x", &[], 2).with_record_key("k").validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCoinSet { .. }));

        let err = GridLevel::new("x", &[1], 0).with_record_key("k").validate().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroGridSize { .. }));

        let huge = GridLevel::new("x", &[1, u32::MAX], 2).with_record_key("k");
        let err = huge.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValueOverflow { .. }));
        let widest = GridLevel::new("x", &[u32::MAX / 2], 1).with_record_key("k");
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn test_headers_cover_coin_set() {
        let coins = Denomination::list(&[1, 5, 10, 50, 100]);
        let mut rng = GameRng::new(8);
        for _ in 0..50 {
            let headers = pick_headers(&coins, 7, &mut rng);
            assert_eq!(headers.len(), 7);
            for coin in &coins {
                assert!(headers.contains(coin));
            }
            for pair in headers[coins.len() - 1..].windows(2) {
                assert_ne!(pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_headers_subset_are_distinct() {
        let coins = Denomination::list(&[1, 5, 10, 50, 100]);
        let mut rng = GameRng::new(4);
        let mut headers = pick_headers(&coins, 3, &mut rng);
        headers.sort_unstable();
        headers.dedup();
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_headers_single_coin_pads_with_itself() {
        let coins = Denomination::list(&[5]);
        let mut rng = ScriptedRng::new(vec![0]);
        assert_eq!(pick_headers(&coins, 3, &mut rng), Denomination::list(&[5, 5, 5]));
    }

    #[test]
    fn test_answer() {
        let q = GridQuestion::new(&[1, 5, 10], &[5, 10, 1]);
        assert_eq!(q.size(), 3);
        assert_eq!(q.answer(0, 0), Some(6));
        assert_eq!(q.answer(2, 1), Some(20));
        assert_eq!(q.answer(3, 0), None);

        let huge = GridQuestion::new(&[u32::MAX], &[1]);
        assert_eq!(huge.answer(0, 0), None);
    }
}
