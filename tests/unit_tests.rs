// Unit tests for Mesa Search

use mesa_search::core::{
    bounded_levenshtein, distance::haversine_distance, fuzzy::matches, normalize, parse_tags,
    spanish_cmp, within_distance, DISTANCE_SENTINEL, PRICE_SENTINEL,
};
use mesa_search::models::{PriceRange, Restaurant};
use std::cmp::Ordering;

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.4168, -3.7038, 40.4168, -3.7038);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_sol_to_retiro() {
    // Puerta del Sol to the Retiro pond is roughly 1.7 km
    let distance = haversine_distance(40.4168, -3.7038, 40.4180, -3.6835);
    assert!(distance > 1.2 && distance < 2.2, "got {}", distance);
}

#[test]
fn test_haversine_distance_madrid_to_sevilla() {
    let distance = haversine_distance(40.4168, -3.7038, 37.3891, -5.9845);
    assert!((distance - 390.0).abs() < 15.0, "Expected ~390km, got {}", distance);
}

#[test]
fn test_normalize_matches_accented_names() {
    assert_eq!(normalize("José Luis"), normalize("jose luis"));
    assert_eq!(normalize(&normalize("Álvaro")), normalize("Álvaro"));
}

#[test]
fn test_bounded_distance_bound() {
    assert_eq!(bounded_levenshtein("paella", "paela", 2), 1);
    assert!(bounded_levenshtein("paella", "gazpacho", 2) > 2);
    assert!(within_distance("croquetas", "croqetas", 1));
    assert!(!within_distance("croquetas", "cocretas", 1));
}

#[test]
fn test_fuzzy_policy_tiers() {
    // containment
    assert!(matches("tasca", "La Tasca"));
    // one edit on a five-letter query
    assert!(matches("tazca", "La Tasca"));
    // two edits only allowed from seven letters
    assert!(!matches("tazka", "La Tasca"));
    assert!(matches("japoneza", "Sushi • Japonesa"));
    assert!(matches("xaponeza", "Sushi • Japonesa"));
}

#[test]
fn test_parse_tags_bullet_only() {
    assert_eq!(parse_tags("Italiana • Pizza"), vec!["Italiana", "Pizza"]);
    assert_eq!(parse_tags("Creativa, de autor"), vec!["Creativa, de autor"]);
    assert!(parse_tags("").is_empty());
}

#[test]
fn test_spanish_collation_examples() {
    assert_eq!(spanish_cmp("Árbol", "Azul"), Ordering::Less);
    assert_eq!(spanish_cmp("Nuria", "Ñandú"), Ordering::Less);
}

#[test]
fn test_record_numeric_fallbacks() {
    let record = Restaurant {
        rating: "-".to_string(),
        price: "".to_string(),
        ..Default::default()
    };
    assert_eq!(record.rating_value(), 0.0);
    assert_eq!(record.price_value(), None);
    assert!(PRICE_SENTINEL > 1e6 && DISTANCE_SENTINEL > 1e6);
}

#[test]
fn test_price_range_parse() {
    let range: PriceRange = "30-60".parse().unwrap();
    assert!(range.contains(30.0) && range.contains(60.0));
    assert!("sixty".parse::<PriceRange>().is_err());
}
