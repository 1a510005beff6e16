use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

use crate::core::tags::CUISINE_DELIMITER;
use crate::models::{GeoPoint, SortKey};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String { "docs/data.js".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_fuzzy")]
    pub fuzzy: bool,
    #[serde(default = "default_sort")]
    pub default_sort: String,
    #[serde(default = "default_cuisine_delimiter")]
    pub cuisine_delimiter: char,
    /// Reference point for distance sorting
    #[serde(default)]
    pub origin: Option<GeoPoint>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fuzzy: default_fuzzy(),
            default_sort: default_sort(),
            cuisine_delimiter: default_cuisine_delimiter(),
            origin: None,
        }
    }
}

impl SearchSettings {
    pub fn sort_key(&self) -> SortKey {
        SortKey::parse(&self.default_sort)
    }
}

fn default_fuzzy() -> bool { true }
fn default_sort() -> String { "rating".to_string() }
fn default_cuisine_delimiter() -> char { CUISINE_DELIMITER }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "warn".to_string() }
fn default_log_format() -> String { "plain".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MESA__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MESA__SEARCH__FUZZY -> search.fuzzy
            .add_source(
                Environment::with_prefix("MESA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_overrides(settings)?;
        settings.try_deserialize::<Settings>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MESA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if let Some(origin) = &self.search.origin {
            origin
                .validate()
                .map_err(|e| ConfigError::Message(format!("search.origin: {}", e)))?;
        }
        Ok(self)
    }
}

/// Apply plain environment overrides
///
/// `CATALOG_PATH` takes precedence over `catalog.path`.
fn apply_overrides(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("CATALOG_PATH") {
        Ok(path) if !path.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("catalog.path", path)?
            .build(),
        _ => Ok(settings),
    }
}
