use std::collections::HashMap;

use crate::core::collation::CollationKey;
use crate::core::tags::TagParser;
use crate::models::{FacetCount, Restaurant};

fn collect_counts<'a, I>(values: I) -> Vec<FacetCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        if !value.is_empty() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut facets: Vec<FacetCount> = counts
        .into_iter()
        .map(|(value, count)| FacetCount {
            value: value.to_string(),
            count,
        })
        .collect();
    facets.sort_by_cached_key(|f| CollationKey::new(&f.value));
    facets
}

/// Distinct cuisine tags with the number of records carrying each
pub fn cuisine_facets(records: &[Restaurant], parser: &TagParser) -> Vec<FacetCount> {
    let tags: Vec<String> = records
        .iter()
        .flat_map(|r| parser.parse(&r.cuisine))
        .collect();
    collect_counts(tags.iter().map(String::as_str))
}

/// Distinct districts with the number of records in each
pub fn district_facets(records: &[Restaurant]) -> Vec<FacetCount> {
    collect_counts(records.iter().map(|r| r.district.as_str()))
}
