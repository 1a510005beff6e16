use crate::core::{
    distance::{annotate_distances, clear_distances},
    facets::{cuisine_facets, district_facets},
    filters::{matches_record, DerivedRecord},
    fuzzy::FuzzyQuery,
    sorting::sort_in_place,
    tags::TagParser,
};
use crate::models::{BrowseQuery, FacetCount, GeoPoint, Restaurant};

/// Result of a browse pass
#[derive(Debug)]
pub struct SearchResult<'a> {
    pub restaurants: Vec<&'a Restaurant>,
    pub total_candidates: usize,
}

/// Browse orchestrator over an in-memory catalog
///
/// Folded haystacks and parsed cuisine tags are derived once at construction
/// and kept in an arena indexed like the records, so each search only pays for
/// matching.
///
/// # Pipeline Stages
/// 1. Free-text containment, then bounded fuzzy fallback
/// 2. Cuisine, district, price and favorites facets
/// 3. Stable sort by the configured key
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    records: Vec<Restaurant>,
    derived: Vec<DerivedRecord>,
    tag_parser: TagParser,
}

impl SearchEngine {
    pub fn new(records: Vec<Restaurant>) -> Self {
        Self::with_tag_parser(records, TagParser::default())
    }

    pub fn with_tag_parser(records: Vec<Restaurant>, tag_parser: TagParser) -> Self {
        let derived = records
            .iter()
            .map(|r| DerivedRecord::new(r, &tag_parser))
            .collect();

        Self {
            records,
            derived,
            tag_parser,
        }
    }

    pub fn records(&self) -> &[Restaurant] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Attach the distance from `origin` to every record with coordinates
    pub fn annotate_distances(&mut self, origin: GeoPoint) {
        annotate_distances(&mut self.records, origin);
        tracing::debug!(
            "Annotated distances from ({}, {}) on {} records",
            origin.lat,
            origin.lng,
            self.records.len()
        );
    }

    pub fn clear_distances(&mut self) {
        clear_distances(&mut self.records);
    }

    /// Filter the catalog and order the survivors
    ///
    /// Records come back by reference in the configured sort order; equal keys
    /// keep catalog order.
    pub fn search(&self, query: &BrowseQuery) -> SearchResult<'_> {
        let text = FuzzyQuery::new(&query.query);

        let mut restaurants: Vec<&Restaurant> = self
            .records
            .iter()
            .zip(&self.derived)
            .filter(|(record, derived)| matches_record(record, derived, query, &text))
            .map(|(record, _)| record)
            .collect();

        sort_in_place(&mut restaurants, query.sort);

        tracing::debug!(
            "Search {:?} sorted by {}: {} of {} records",
            text.as_str(),
            query.sort,
            restaurants.len(),
            self.records.len()
        );

        SearchResult {
            restaurants,
            total_candidates: self.records.len(),
        }
    }

    pub fn cuisine_facets(&self) -> Vec<FacetCount> {
        cuisine_facets(&self.records, &self.tag_parser)
    }

    pub fn district_facets(&self) -> Vec<FacetCount> {
        district_facets(&self.records)
    }
}
