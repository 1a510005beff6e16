//! Mesa Search CLI - browse a restaurant catalog from the terminal

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use validator::Validate;

use mesa_search::config::{LoggingSettings, Settings};
use mesa_search::core::{SearchEngine, TagParser};
use mesa_search::models::{
    BrowseRequest, BrowseResponse, FacetsResponse, GeoPoint, OneOrMany, Restaurant,
};
use mesa_search::services::load_catalog;

/// Query, filter and sort a restaurant catalog
#[derive(Parser)]
#[command(name = "mesa-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to config/default.toml and config/local.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file: a JSON array or a data.js bundle
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the catalog
    Search {
        /// Free-text query over name, cuisine, district and address
        #[arg(short, long, default_value = "")]
        query: String,

        /// Cuisine tag to include (repeatable)
        #[arg(long = "cuisine")]
        cuisines: Vec<String>,

        /// District to include (repeatable)
        #[arg(long = "district")]
        districts: Vec<String>,

        /// Price range as MIN-MAX (repeatable, any range matches)
        #[arg(long = "price")]
        prices: Vec<String>,

        /// JSON file with an array of favorite keys
        #[arg(long)]
        favorites: Option<PathBuf>,

        /// Only show favorites
        #[arg(long, requires = "favorites")]
        favs_only: bool,

        /// Sort key: rating, name, price or distance
        #[arg(short, long)]
        sort: Option<String>,

        /// Disable typo-tolerant matching
        #[arg(long)]
        no_fuzzy: bool,

        /// Reference point for distances, as LAT,LNG
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        near: Option<GeoPoint>,

        /// Maximum rows to print (0 prints everything)
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// List cuisine and district values with counts
    Facets,
}

fn parse_point(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {:?}", raw))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {}", e))?;
    let lng = lng.trim().parse::<f64>().map_err(|e| format!("longitude: {}", e))?;
    Ok(GeoPoint::new(lat, lng))
}

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.init(),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, config::ConfigError> {
    match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

fn read_favorites(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);

    match run(cli, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, settings: Settings) -> Result<(), Box<dyn Error>> {
    let catalog_path = cli
        .catalog
        .unwrap_or_else(|| PathBuf::from(&settings.catalog.path));
    let catalog = load_catalog(&catalog_path)?;

    if let Some(meta) = &catalog.meta {
        if let Some(updated) = meta.updated {
            info!("Catalog updated {}", updated.to_rfc3339());
        }
    }

    let parser = TagParser::new(settings.search.cuisine_delimiter);
    let mut engine = SearchEngine::with_tag_parser(catalog.restaurants, parser);
    if engine.is_empty() {
        warn!("Catalog {} has no restaurants", catalog_path.display());
    } else {
        debug!("Indexed {} restaurants", engine.len());
    }

    match cli.command {
        Commands::Facets => {
            let facets = FacetsResponse {
                cuisines: engine.cuisine_facets(),
                districts: engine.district_facets(),
            };

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&facets)?),
                OutputFormat::Text => {
                    println!("Cuisines:");
                    for facet in &facets.cuisines {
                        println!("  {:<32} {:>5}", facet.value, facet.count);
                    }
                    println!("Districts:");
                    for facet in &facets.districts {
                        println!("  {:<32} {:>5}", facet.value, facet.count);
                    }
                }
            }
        }
        Commands::Search {
            query,
            cuisines,
            districts,
            prices,
            favorites,
            favs_only,
            sort,
            no_fuzzy,
            near,
            limit,
        } => {
            if let Some(origin) = near.or(settings.search.origin) {
                origin.validate()?;
                engine.annotate_distances(origin);
            }

            let favs = favorites.as_deref().map(read_favorites).transpose()?;

            let request = BrowseRequest {
                query: Some(query),
                sel_cuisine: Some(cuisines),
                sel_district: Some(districts),
                price_value: Some(OneOrMany::Many(prices)),
                favs_only: Some(favs_only),
                favs,
                sort: Some(sort.unwrap_or_else(|| settings.search.default_sort.clone())),
                fuzzy: Some(settings.search.fuzzy && !no_fuzzy),
            };
            request.validate()?;

            let query = request.into_query();
            let result = engine.search(&query);
            let total_results = result.restaurants.len();
            let shown = if limit == 0 {
                total_results
            } else {
                limit.min(total_results)
            };

            match cli.format {
                OutputFormat::Json => {
                    let response = BrowseResponse {
                        results: result.restaurants[..shown].to_vec(),
                        total_results,
                        total_candidates: result.total_candidates,
                        sort: query.sort.to_string(),
                    };
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Text => {
                    print_table(&result.restaurants[..shown]);
                    println!(
                        "{} of {} restaurants (sorted by {})",
                        total_results, result.total_candidates, query.sort
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_table(rows: &[&Restaurant]) {
    for (rank, r) in rows.iter().enumerate() {
        let rating = if r.rating.is_empty() { "-" } else { r.rating.as_str() };
        let price = r
            .price_value()
            .map(|p| format!("{} €", p))
            .unwrap_or_default();
        let distance = r
            .distance_km
            .map(|d| format!("{:.1} km", d))
            .unwrap_or_default();

        println!(
            "{:>3}. {:<36} {:>4} {:>7} {:>9}  {} | {}",
            rank + 1,
            r.name,
            rating,
            price,
            distance,
            r.district,
            r.cuisine
        );
    }
}
