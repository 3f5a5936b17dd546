use geo::{GeodesicDistance, Point};
use serde::{Deserialize, Serialize};

use crate::models::Coordinates;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// How the distance between two coordinates is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceModel {
    /// Shortest path on the WGS84 ellipsoid (Karney's algorithm)
    #[default]
    Geodesic,
    /// Great circle on a sphere of radius 6371 km
    Haversine,
}

impl DistanceModel {
    /// Distance in kilometers between two valid coordinates
    #[inline]
    pub fn distance_km(&self, a: &Coordinates, b: &Coordinates) -> f64 {
        match self {
            DistanceModel::Geodesic => geodesic_distance(a.lat, a.lon, b.lat, b.lon),
            DistanceModel::Haversine => haversine_distance(a.lat, a.lon, b.lat, b.lon),
        }
    }
}

/// Calculate the geodesic distance on the WGS84 ellipsoid in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn geodesic_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // geo points are (x = lon, y = lat)
    let a = Point::new(lon1, lat1);
    let b = Point::new(lon2, lat2);

    a.geodesic_distance(&b) / 1000.0
}

/// Calculate the Haversine distance between two points in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
