use crate::models::{GeoPoint, Restaurant};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lng1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lng2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance between two points
#[inline]
pub fn distance_between(from: GeoPoint, to: GeoPoint) -> f64 {
    haversine_distance(from.lat, from.lng, to.lat, to.lng)
}

/// Attach the distance from `origin` to every record
///
/// Records without coordinates get no annotation and sort last by distance.
pub fn annotate_distances(records: &mut [Restaurant], origin: GeoPoint) {
    for record in records.iter_mut() {
        record.distance_km = record.location().map(|p| distance_between(origin, p));
    }
}

/// Drop every distance annotation
pub fn clear_distances(records: &mut [Restaurant]) {
    for record in records.iter_mut() {
        record.distance_km = None;
    }
}
