use std::cmp::Ordering;

use crate::core::collation::CollationKey;
use crate::models::{Restaurant, SortKey};

/// Price used for records without one, so they sort last
pub const PRICE_SENTINEL: f64 = 1e9;

/// Distance used for records without an annotation, so they sort last
pub const DISTANCE_SENTINEL: f64 = 1e9;

#[inline]
fn price_or_sentinel(record: &Restaurant) -> f64 {
    record.price_value().unwrap_or(PRICE_SENTINEL)
}

#[inline]
fn distance_or_sentinel(record: &Restaurant) -> f64 {
    record
        .distance_km
        .filter(|d| d.is_finite())
        .unwrap_or(DISTANCE_SENTINEL)
}

/// Comparator for a sort key
///
/// `Name` falls back to per-call collation keys here; [`sort_records`] caches
/// them instead.
pub fn compare(a: &Restaurant, b: &Restaurant, key: SortKey) -> Ordering {
    match key {
        SortKey::Rating => b.rating_value().total_cmp(&a.rating_value()),
        SortKey::Name => CollationKey::new(&a.name).cmp(&CollationKey::new(&b.name)),
        SortKey::Price => price_or_sentinel(a).total_cmp(&price_or_sentinel(b)),
        SortKey::Distance => distance_or_sentinel(a).total_cmp(&distance_or_sentinel(b)),
        SortKey::Original => Ordering::Equal,
    }
}

/// Sort records in place. Stable: ties keep their relative order.
pub fn sort_in_place(records: &mut [&Restaurant], key: SortKey) {
    match key {
        SortKey::Original => {}
        SortKey::Name => records.sort_by_cached_key(|r| CollationKey::new(&r.name)),
        _ => records.sort_by(|a, b| compare(a, b, key)),
    }
}

/// Return a new ordered sequence; the input is left untouched
pub fn sort_records<'a, I>(records: I, key: SortKey) -> Vec<&'a Restaurant>
where
    I: IntoIterator<Item = &'a Restaurant>,
{
    let mut sorted: Vec<&Restaurant> = records.into_iter().collect();
    sort_in_place(&mut sorted, key);
    sorted
}
