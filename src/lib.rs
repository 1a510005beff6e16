//! Mesa Search - query, filter and sort engine for a restaurant catalog
//!
//! This library narrows an in-memory restaurant collection by free text
//! (accent-insensitive, typo-tolerant within a bounded edit distance), cuisine,
//! district, price brackets and favorites, then orders the survivors by rating,
//! name (Spanish collation), price or distance.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::haversine_distance, filter_records, fuzzy::matches, sort_records, SearchEngine,
    SearchResult,
};
pub use models::{BrowseQuery, BrowseRequest, BrowseResponse, GeoPoint, PriceRange, Restaurant, SortKey};
pub use services::{load_catalog, CatalogError};
