use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::query::{BrowseQuery, PriceRange, SortKey};

const MAX_PRICE_RANGES: usize = 16;

/// A selection as sent by the UI: a single string or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(OneOrMany::into_vec))
}

/// Loosely-typed browse request as produced by the UI layer
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseRequest {
    #[validate(length(max = 200))]
    pub query: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub sel_cuisine: Option<Vec<String>>,
    #[serde(deserialize_with = "one_or_many")]
    pub sel_district: Option<Vec<String>>,
    pub price_value: Option<OneOrMany>,
    pub favs_only: Option<bool>,
    #[serde(deserialize_with = "one_or_many")]
    pub favs: Option<Vec<String>>,
    pub sort: Option<String>,
    pub fuzzy: Option<bool>,
}

impl BrowseRequest {
    /// Normalize into the strict engine configuration
    ///
    /// Malformed price ranges are dropped, absent sets become empty sets and an
    /// unknown sort key keeps input order. At most 16 valid ranges are kept.
    pub fn into_query(self) -> BrowseQuery {
        let mut price_ranges: Vec<PriceRange> = self
            .price_value
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .filter(|raw| !raw.trim().is_empty())
            .filter_map(|raw| match raw.parse::<PriceRange>() {
                Ok(range) => Some(range),
                Err(e) => {
                    tracing::warn!("Dropping price range {:?}: {}", raw, e);
                    None
                }
            })
            .collect();

        if price_ranges.len() > MAX_PRICE_RANGES {
            tracing::warn!(
                "Keeping the first {} of {} price ranges",
                MAX_PRICE_RANGES,
                price_ranges.len()
            );
            price_ranges.truncate(MAX_PRICE_RANGES);
        }

        let sort = self
            .sort
            .as_deref()
            .map(SortKey::parse)
            .unwrap_or_default();

        BrowseQuery::new()
            .with_query(self.query.unwrap_or_default())
            .with_cuisines(self.sel_cuisine.unwrap_or_default())
            .with_districts(self.sel_district.unwrap_or_default())
            .with_price_ranges(price_ranges)
            .with_favorites(self.favs.unwrap_or_default(), self.favs_only.unwrap_or(false))
            .with_sort(sort)
            .with_fuzzy(self.fuzzy.unwrap_or(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_price_string() {
        let req: BrowseRequest = serde_json::from_str(r#"{"priceValue":"1-2"}"#).unwrap();
        let query = req.into_query();
        assert_eq!(query.price_ranges, vec![PriceRange::new(1.0, 2.0)]);
    }

    #[test]
    fn test_price_list_drops_malformed() {
        let req: BrowseRequest =
            serde_json::from_str(r#"{"priceValue":["1-2","oops","","3-4"]}"#).unwrap();
        let query = req.into_query();
        assert_eq!(
            query.price_ranges,
            vec![PriceRange::new(1.0, 2.0), PriceRange::new(3.0, 4.0)]
        );
    }

    #[test]
    fn test_null_sets_become_empty() {
        let req: BrowseRequest =
            serde_json::from_str(r#"{"selCuisine":null,"selDistrict":null,"favs":null}"#).unwrap();
        let query = req.into_query();
        assert!(query.cuisines.is_empty());
        assert!(query.districts.is_empty());
        assert!(query.favorites.is_empty());
        assert!(query.fuzzy);
        assert_eq!(query.sort, SortKey::Rating);
    }

    #[test]
    fn test_unknown_sort_keeps_order() {
        let req: BrowseRequest = serde_json::from_str(r#"{"sort":"newest"}"#).unwrap();
        assert_eq!(req.into_query().sort, SortKey::Original);
    }

    #[test]
    fn test_query_length_validated() {
        let req = BrowseRequest {
            query: Some("x".repeat(201)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
        assert!(BrowseRequest::default().validate().is_ok());
    }

    #[test]
    fn test_price_ranges_capped() {
        let req = BrowseRequest {
            price_value: Some(OneOrMany::Many(vec!["1-2".to_string(); 20])),
            ..Default::default()
        };
        assert_eq!(req.into_query().price_ranges.len(), MAX_PRICE_RANGES);
    }

    #[test]
    fn test_dropped_ranges_do_not_count_toward_cap() {
        let mut raw = vec![String::new(), "oops".to_string()];
        raw.extend(vec!["x-y".to_string(); 16]);
        raw.push("10-20".to_string());
        raw.push("30-40".to_string());
        let req = BrowseRequest {
            price_value: Some(OneOrMany::Many(raw)),
            ..Default::default()
        };
        assert_eq!(
            req.into_query().price_ranges,
            vec![PriceRange::new(10.0, 20.0), PriceRange::new(30.0, 40.0)]
        );
    }

    #[test]
    fn test_single_string_selections() {
        let req: BrowseRequest = serde_json::from_str(
            r#"{"selCuisine":"Italiana","selDistrict":"Centro","favs":"la-tasca"}"#,
        )
        .unwrap();
        let query = req.into_query();
        assert!(query.cuisines.contains("Italiana"));
        assert!(query.districts.contains("Centro"));
        assert!(query.favorites.contains("la-tasca"));
    }

    #[test]
    fn test_null_favs_only_is_false() {
        let req: BrowseRequest = serde_json::from_str(r#"{"favsOnly":null}"#).unwrap();
        assert!(!req.into_query().favorites_only);

        let req: BrowseRequest = serde_json::from_str(r#"{"favsOnly":true}"#).unwrap();
        assert!(req.into_query().favorites_only);
    }
}
