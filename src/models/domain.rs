use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Restaurant record as published by the catalog data step
///
/// Field names are the abbreviated keys of the published bundle. Numeric-looking
/// fields stay strings because the upstream data mixes numbers, numeric strings,
/// empty strings and placeholders like `"-"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "n", default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(rename = "s", default, deserialize_with = "loose_string")]
    pub slug: String,
    #[serde(rename = "a", default, deserialize_with = "loose_string")]
    pub address: String,
    #[serde(rename = "lat", default, deserialize_with = "loose_coordinate")]
    pub latitude: Option<f64>,
    #[serde(rename = "lng", default, deserialize_with = "loose_coordinate")]
    pub longitude: Option<f64>,
    #[serde(rename = "c", default, deserialize_with = "loose_string")]
    pub cuisine: String,
    #[serde(rename = "d", default, deserialize_with = "loose_string")]
    pub district: String,
    #[serde(rename = "r", default, deserialize_with = "loose_string")]
    pub rating: String,
    #[serde(rename = "rf", default, deserialize_with = "loose_string")]
    pub rating_food: String,
    #[serde(rename = "rd", default, deserialize_with = "loose_string")]
    pub rating_decor: String,
    #[serde(rename = "rs", default, deserialize_with = "loose_string")]
    pub rating_service: String,
    #[serde(rename = "p", default, deserialize_with = "loose_string")]
    pub price: String,
    #[serde(rename = "ph", default, deserialize_with = "loose_string")]
    pub phone: String,
    #[serde(rename = "w", default, deserialize_with = "loose_string")]
    pub website: String,
    #[serde(rename = "u", default, deserialize_with = "loose_string")]
    pub url: String,
    /// Transient annotation attached before sorting by distance
    #[serde(rename = "dist", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl Restaurant {
    /// Overall rating, `0.0` when missing or unparseable
    pub fn rating_value(&self) -> f64 {
        parse_number(&self.rating).unwrap_or(0.0)
    }

    /// Price in euros, `None` when missing, zero or unparseable
    pub fn price_value(&self) -> Option<f64> {
        parse_number(&self.price).filter(|p| *p > 0.0)
    }

    /// Default favorites key: slug, falling back to name
    pub fn favorite_key(&self) -> &str {
        if self.slug.is_empty() {
            &self.name
        } else {
            &self.slug
        }
    }

    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        }
    }

    /// Text searched by free-text queries: name, cuisine, district and address
    pub fn haystack(&self) -> String {
        [
            self.name.as_str(),
            self.cuisine.as_str(),
            self.district.as_str(),
            self.address.as_str(),
        ]
        .join(" ")
    }
}

/// Parse a numeric-as-string field. Accepts a decimal comma.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<f64>()
        .or_else(|_| trimmed.replace(',', ".").parse::<f64>())
        .ok()
        .filter(|v| v.is_finite())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(LooseValue::Text(s)) => s,
        Some(LooseValue::Integer(i)) => i.to_string(),
        Some(LooseValue::Float(f)) => f.to_string(),
        Some(LooseValue::Flag(b)) => b.to_string(),
        None => String::new(),
    })
}

fn loose_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(LooseValue::Text(s)) => parse_number(&s),
        Some(LooseValue::Integer(i)) => Some(i as f64),
        Some(LooseValue::Float(f)) if f.is_finite() => Some(f),
        _ => None,
    })
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Metadata published alongside the record collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogMeta {
    #[serde(default)]
    pub updated: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub count: usize,
}

/// Loaded record collection
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub restaurants: Vec<Restaurant>,
    pub meta: Option<CatalogMeta>,
}
