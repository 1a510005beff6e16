// Core algorithm exports
pub mod collation;
pub mod distance;
pub mod edit_distance;
pub mod engine;
pub mod facets;
pub mod filters;
pub mod fuzzy;
pub mod normalize;
pub mod sorting;
pub mod tags;

pub use collation::{spanish_cmp, CollationKey};
pub use distance::{annotate_distances, clear_distances, distance_between, haversine_distance};
pub use edit_distance::{bounded_levenshtein, within_distance};
pub use engine::{SearchEngine, SearchResult};
pub use facets::{cuisine_facets, district_facets};
pub use filters::{filter_records, filter_records_with, matches_record, DerivedRecord};
pub use fuzzy::{matches, FuzzyQuery};
pub use normalize::{normalize, normalize_opt};
pub use sorting::{compare, sort_in_place, sort_records, DISTANCE_SENTINEL, PRICE_SENTINEL};
pub use tags::{parse_tags, TagParser, CUISINE_DELIMITER};
