use std::collections::BTreeSet;

use crate::core::fuzzy::FuzzyQuery;
use crate::core::normalize::normalize;
use crate::core::tags::TagParser;
use crate::models::{BrowseQuery, PriceRange, Restaurant};

/// Per-record data derived once and reused by every filter pass
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    /// Folded name, cuisine, district and address
    pub haystack: String,
    /// Parsed cuisine tags
    pub tags: Vec<String>,
}

impl DerivedRecord {
    pub fn new(record: &Restaurant, parser: &TagParser) -> Self {
        Self {
            haystack: normalize(&record.haystack()),
            tags: parser.parse(&record.cuisine),
        }
    }
}

/// Check the free-text predicate against a folded haystack
#[inline]
pub fn matches_text(query: &FuzzyQuery, folded_haystack: &str, fuzzy: bool) -> bool {
    if query.is_empty() || query.contained_in(folded_haystack) {
        return true;
    }
    fuzzy && query.near_token_in(folded_haystack)
}

/// Check whether any of the record's tags is selected
#[inline]
pub fn matches_cuisine(tags: &[String], selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || tags.iter().any(|tag| selected.contains(tag))
}

/// Check whether the record's district is selected (exact match)
#[inline]
pub fn matches_district(district: &str, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || selected.contains(district)
}

/// Check the price against OR-combined ranges
///
/// Once any range is configured, records without a price fail.
#[inline]
pub fn matches_price(record: &Restaurant, ranges: &[PriceRange]) -> bool {
    if ranges.is_empty() {
        return true;
    }

    match record.price_value() {
        Some(price) => ranges.iter().any(|range| range.contains(price)),
        None => false,
    }
}

/// Check the favorites-only predicate
#[inline]
pub fn matches_favorites(record: &Restaurant, query: &BrowseQuery) -> bool {
    !query.favorites_only || query.is_favorite(record)
}

/// Apply every predicate, short-circuiting on the first failure
pub fn matches_record(
    record: &Restaurant,
    derived: &DerivedRecord,
    query: &BrowseQuery,
    text: &FuzzyQuery,
) -> bool {
    matches_text(text, &derived.haystack, query.fuzzy)
        && matches_cuisine(&derived.tags, &query.cuisines)
        && matches_district(&record.district, &query.districts)
        && matches_price(record, &query.price_ranges)
        && matches_favorites(record, query)
}

/// Single filter pass over a record collection, deriving per-record data on the fly
///
/// Survivors keep input order.
pub fn filter_records<'a>(records: &'a [Restaurant], query: &BrowseQuery) -> Vec<&'a Restaurant> {
    filter_records_with(records, query, &TagParser::default())
}

/// [`filter_records`] with an explicit tag parser
pub fn filter_records_with<'a>(
    records: &'a [Restaurant],
    query: &BrowseQuery,
    parser: &TagParser,
) -> Vec<&'a Restaurant> {
    let text = FuzzyQuery::new(&query.query);

    records
        .iter()
        .filter(|record| {
            let derived = DerivedRecord::new(record, parser);
            matches_record(record, &derived, query, &text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_restaurant(name: &str, cuisine: &str, district: &str, price: &str) -> Restaurant {
        Restaurant {
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            cuisine: cuisine.to_string(),
            district: district.to_string(),
            price: price.to_string(),
            ..Default::default()
        }
    }

    fn selection(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_cuisine_intersection() {
        let tags = vec!["Italiana".to_string(), "Pizza".to_string()];
        assert!(matches_cuisine(&tags, &selection(&["Italiana"])));
        assert!(!matches_cuisine(&tags, &selection(&["Japonesa"])));
        assert!(matches_cuisine(&tags, &BTreeSet::new()));
    }

    #[test]
    fn test_district_exact() {
        assert!(matches_district("Salamanca", &selection(&["Salamanca", "Retiro"])));
        assert!(!matches_district("salamanca", &selection(&["Salamanca"])));
        assert!(matches_district("", &BTreeSet::new()));
    }

    #[test]
    fn test_price_or_combined() {
        let ranges = vec![PriceRange::new(1.0, 2.0), PriceRange::new(3.0, 4.0)];

        assert!(matches_price(&create_test_restaurant("A", "", "", "3"), &ranges));
        assert!(!matches_price(&create_test_restaurant("B", "", "", "5"), &ranges));
        assert!(!matches_price(&create_test_restaurant("C", "", "", ""), &ranges));
        assert!(matches_price(&create_test_restaurant("C", "", "", ""), &[]));
    }

    #[test]
    fn test_favorites_only() {
        let record = create_test_restaurant("Casa Pepe", "", "", "");
        let query = BrowseQuery::new().with_favorites(["casa-pepe"], true);
        assert!(matches_favorites(&record, &query));

        let query = BrowseQuery::new().with_favorites(["otro"], true);
        assert!(!matches_favorites(&record, &query));

        let query = BrowseQuery::new().with_favorites(["otro"], false);
        assert!(matches_favorites(&record, &query));
    }

    #[test]
    fn test_text_searches_all_fields() {
        let mut record = create_test_restaurant("Casa Pepe", "Gallega", "Chamberí", "30");
        record.address = "Calle de Ponzano 12".to_string();
        let derived = DerivedRecord::new(&record, &TagParser::default());

        assert!(matches_text(&FuzzyQuery::new("chamberi"), &derived.haystack, false));
        assert!(matches_text(&FuzzyQuery::new("ponzano"), &derived.haystack, false));
        assert!(matches_text(&FuzzyQuery::new("gallega"), &derived.haystack, false));
    }

    #[test]
    fn test_fuzzy_toggle() {
        let record = create_test_restaurant("Sushi Zen", "Japonesa", "", "");
        let derived = DerivedRecord::new(&record, &TagParser::default());
        let typo = FuzzyQuery::new("sushy");

        assert!(matches_text(&typo, &derived.haystack, true));
        assert!(!matches_text(&typo, &derived.haystack, false));
    }

    #[test]
    fn test_filter_records_combines_facets() {
        let records = vec![
            create_test_restaurant("Trattoria", "Italiana • Pizza", "Centro", "25"),
            create_test_restaurant("Pizzeria Sur", "Pizza", "Usera", "15"),
            create_test_restaurant("Sushi Zen", "Japonesa", "Centro", "40"),
        ];

        let query = BrowseQuery::new()
            .with_cuisines(["Pizza"])
            .with_districts(["Centro"]);
        let filtered = filter_records(&records, &query);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Trattoria");
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let records = vec![
            create_test_restaurant("B", "", "", ""),
            create_test_restaurant("A", "", "", ""),
        ];
        let filtered = filter_records(&records, &BrowseQuery::new());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].name, "B");
    }
}
