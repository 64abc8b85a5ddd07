//! Level catalogs.
//!
//! Every game is configured by an ordered list of levels fixed at
//! startup:
//! - Amount game: `Stage` (target amounts, wallet, quota)
//! - Grid game: `GridLevel` (coin set, grid size, record key)
//! - Place-value game: `PlaceLevel` (columns, coin split policy)
//!
//! A `Catalog` is validated once when it is built, so sessions never
//! see an empty pool. Catalogs can also be loaded from JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ConfigError;

/// A level definition that can check itself.
pub trait LevelConfig {
    /// Human-readable name (for display and errors).
    fn name(&self) -> &str;

    /// Reject definitions no session could play.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Non-empty, validated, immutable list of levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog<L> {
    levels: Vec<L>,
}

impl<L: LevelConfig> Catalog<L> {
    /// Validate and wrap a list of levels.
    pub fn new(levels: Vec<L>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// Parse and validate a JSON array of levels.
    pub fn from_json(json: &str) -> Result<Self, ConfigError>
    where
        L: DeserializeOwned,
    {
        let levels: Vec<L> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Serialize the catalog as a JSON array.
    pub fn to_json(&self) -> Result<String, ConfigError>
    where
        L: Serialize,
    {
        Ok(serde_json::to_string_pretty(&self.levels)?)
    }

    /// Get a level by index.
    pub fn get(&self, index: usize) -> Result<&L, ConfigError> {
        self.levels.get(index).ok_or(ConfigError::UnknownLevel {
            index,
            len: self.levels.len(),
        })
    }

    /// Does the catalog have a level at `index`?
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.levels.len()
    }

    /// Number of levels (never zero).
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; kept for the usual collection API.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// All levels in order.
    #[must_use]
    pub fn levels(&self) -> &[L] {
        &self.levels
    }

    /// Names of all levels, for a level picker.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(LevelConfig::name)
    }
}

impl<L> std::ops::Index<usize> for Catalog<L> {
    type Output = L;

    fn index(&self, index: usize) -> &L {
        &self.levels[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Toy {
        name: String,
        size: usize,
    }

    impl LevelConfig for Toy {
        fn name(&self) -> &str {
            &self.name
        }

        fn validate(&self) -> Result<(), ConfigError> {
            if self.size == 0 {
                return Err(ConfigError::ZeroGridSize { level: self.name.clone() });
            }
            Ok(())
        }
    }

    fn toy(name: &str, size: usize) -> Toy {
        Toy { name: name.to_string(), size }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = Catalog::<Toy>::new(vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCatalog));
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = Catalog::new(vec![toy("a", 3), toy("b", 0)]).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroGridSize { ref level } if level == "b"));
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::new(vec![toy("a", 3), toy("b", 4)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert!(catalog.contains(1));
        assert!(!catalog.contains(2));
        assert_eq!(catalog.get(1).unwrap().size, 4);
        assert_eq!(catalog[0].name, "a");
        assert!(matches!(
            catalog.get(5),
            Err(ConfigError::UnknownLevel { index: 5, len: 2 })
        ));
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = Catalog::new(vec![toy("a", 3)]).unwrap();
        let json = catalog.to_json().unwrap();
        let back = Catalog::<Toy>::from_json(&json).unwrap();
        assert_eq!(catalog, back);
    }

    #[test]
    fn test_bad_json() {
        let err = Catalog::<Toy>::from_json("[{\"name\": 1}]").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));

        let err = Catalog::<Toy>::from_json("[]").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCatalog));
    }
}
