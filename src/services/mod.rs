// Service exports
pub mod geocoder;

pub use geocoder::{Geocoder, GeocoderError, NominatimClient, StaticGeocoder};
