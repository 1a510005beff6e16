use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Catalog, CatalogMeta, Restaurant};

const RESTAURANTS_BINDING: &str = "RESTAURANTS";
const META_BINDING: &str = "META";

/// Errors that can occur while loading the record collection
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binding `const {0}=` not found in data bundle")]
    MissingBinding(&'static str),
}

/// Load the catalog from a JSON array or a published `data.js` bundle
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let catalog = parse_catalog(&contents)?;
    tracing::info!(
        "Loaded {} restaurants from {}",
        catalog.restaurants.len(),
        path.display()
    );

    Ok(catalog)
}

/// Parse catalog text
///
/// Accepts a bare JSON array of records, or script text of the form
/// `const RESTAURANTS=[...];const META={...};` where `META` is optional.
pub fn parse_catalog(contents: &str) -> Result<Catalog, CatalogError> {
    let trimmed = contents.trim_start_matches('\u{feff}').trim_start();
    if trimmed.starts_with('[') {
        let restaurants: Vec<Restaurant> = serde_json::from_str(trimmed.trim_end())?;
        return Ok(Catalog {
            restaurants,
            meta: None,
        });
    }

    let restaurants: Vec<Restaurant> = read_binding(trimmed, RESTAURANTS_BINDING)?
        .ok_or(CatalogError::MissingBinding(RESTAURANTS_BINDING))?;
    let meta: Option<CatalogMeta> = read_binding(trimmed, META_BINDING)?;

    if let Some(meta) = &meta {
        if meta.count != restaurants.len() {
            tracing::warn!(
                "Catalog META reports {} restaurants but {} were loaded",
                meta.count,
                restaurants.len()
            );
        }
    }

    Ok(Catalog { restaurants, meta })
}

/// Read the first JSON value assigned to `const <name>=`
fn read_binding<T: DeserializeOwned>(script: &str, name: &str) -> Result<Option<T>, CatalogError> {
    let Some(value_start) = find_binding(script, name) else {
        return Ok(None);
    };

    let mut values = serde_json::Deserializer::from_str(&script[value_start..]).into_iter::<T>();
    match values.next() {
        Some(value) => Ok(Some(value?)),
        None => Ok(None),
    }
}

/// Byte offset just past `const <name>=`, tolerating whitespace around `=`
fn find_binding(script: &str, name: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(found) = script[search_from..].find("const") {
        let after_const = search_from + found + "const".len();
        let rest = &script[after_const..];
        let ident = rest.trim_start();
        let ident_offset = after_const + (rest.len() - ident.len());

        if let Some(after_name) = ident.strip_prefix(name) {
            let after_eq = after_name.trim_start();
            if let Some(value) = after_eq.strip_prefix('=') {
                return Some(script.len() - value.len());
            }
        }

        search_from = ident_offset.max(after_const);
    }
    None
}
