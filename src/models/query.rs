use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::domain::Restaurant;

/// Errors produced while parsing a `"min-max"` price range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceRangeError {
    #[error("price range {0:?} has no '-' separator")]
    MissingSeparator(String),

    #[error("price range bound {0:?} is not a number")]
    InvalidBound(String),

    #[error("price range has min {min} above max {max}")]
    Inverted { min: f64, max: f64 },
}

/// Inclusive price bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl FromStr for PriceRange {
    type Err = PriceRangeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (min, max) = raw
            .trim()
            .split_once('-')
            .ok_or_else(|| PriceRangeError::MissingSeparator(raw.to_string()))?;

        let parse_bound = |bound: &str| {
            bound
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| PriceRangeError::InvalidBound(bound.to_string()))
        };

        let min = parse_bound(min)?;
        let max = parse_bound(max)?;
        if min > max {
            return Err(PriceRangeError::Inverted { min, max });
        }

        Ok(Self { min, max })
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Descending rating
    #[default]
    Rating,
    /// Ascending name, Spanish collation
    Name,
    /// Ascending price
    Price,
    /// Ascending precomputed distance
    Distance,
    /// Keep input order; what unrecognized keys resolve to
    Original,
}

impl SortKey {
    /// Parse a sort key name. Unknown names keep the input order.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rating" => SortKey::Rating,
            "name" => SortKey::Name,
            "price" => SortKey::Price,
            "distance" => SortKey::Distance,
            _ => SortKey::Original,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Rating => "rating",
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Distance => "distance",
            SortKey::Original => "original",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the key a record is stored under in the favorites set
pub type FavoriteKeyFn = Arc<dyn Fn(&Restaurant) -> String + Send + Sync>;

fn default_favorite_key() -> FavoriteKeyFn {
    Arc::new(|r: &Restaurant| r.favorite_key().to_string())
}

/// Fully-typed browse configuration consumed by the filter and sort stages
///
/// Empty selections impose no constraint. Price ranges are OR-combined, every
/// other facet is AND-combined.
#[derive(Clone)]
pub struct BrowseQuery {
    pub query: String,
    pub cuisines: BTreeSet<String>,
    pub districts: BTreeSet<String>,
    pub price_ranges: Vec<PriceRange>,
    pub favorites_only: bool,
    pub favorites: HashSet<String>,
    pub favorite_key: FavoriteKeyFn,
    pub sort: SortKey,
    pub fuzzy: bool,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            cuisines: BTreeSet::new(),
            districts: BTreeSet::new(),
            price_ranges: Vec::new(),
            favorites_only: false,
            favorites: HashSet::new(),
            favorite_key: default_favorite_key(),
            sort: SortKey::default(),
            fuzzy: true,
        }
    }
}

impl fmt::Debug for BrowseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowseQuery")
            .field("query", &self.query)
            .field("cuisines", &self.cuisines)
            .field("districts", &self.districts)
            .field("price_ranges", &self.price_ranges)
            .field("favorites_only", &self.favorites_only)
            .field("favorites", &self.favorites.len())
            .field("sort", &self.sort)
            .field("fuzzy", &self.fuzzy)
            .finish()
    }
}

impl BrowseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_cuisines<I, S>(mut self, cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cuisines = cuisines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_districts<I, S>(mut self, districts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.districts = districts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price_ranges(mut self, ranges: Vec<PriceRange>) -> Self {
        self.price_ranges = ranges;
        self
    }

    pub fn with_favorites<I, S>(mut self, favorites: I, only: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.favorites = favorites.into_iter().map(Into::into).collect();
        self.favorites_only = only;
        self
    }

    pub fn with_favorite_key<F>(mut self, key: F) -> Self
    where
        F: Fn(&Restaurant) -> String + Send + Sync + 'static,
    {
        self.favorite_key = Arc::new(key);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Whether the record is in the favorites set under the configured key
    pub fn is_favorite(&self, record: &Restaurant) -> bool {
        self.favorites.contains(&(self.favorite_key)(record))
    }
}
