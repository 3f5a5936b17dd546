use crate::models::Coordinates;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when resolving an address
///
/// These never leave the adapter: [`Geocoder::geocode`] turns them into `None`.
#[derive(Debug, Error)]
pub enum GeocoderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Service returned error: {0}")]
    ServiceError(StatusCode),

    #[error("No result for address")]
    NotFound,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Resolves free-text addresses to coordinates
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    /// Look up an address, `None` on any failure or if nothing was found
    async fn geocode(&self, address: &str) -> Option<Coordinates>;
}

/// One hit of the Nominatim `/search` endpoint (coordinates come as strings)
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Nominatim (OpenStreetMap) geocoding client
///
/// One request per lookup; no retry and no caching.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    base_url: String,
    client: Client,
}

impl NominatimClient {
    /// Create a new Nominatim client
    pub fn new(base_url: String, user_agent: &str, timeout: Duration) -> Result<Self, GeocoderError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Query the search endpoint and return the first hit
    pub async fn search(&self, address: &str) -> Result<Coordinates, GeocoderError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        tracing::debug!("Geocoding '{}' via {}", address, url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocoderError::ServiceError(response.status()));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocoderError::InvalidResponse(e.to_string()))?;

        let place = places.first().ok_or(GeocoderError::NotFound)?;

        let lat = parse_degrees(&place.lat)?;
        let lon = parse_degrees(&place.lon)?;

        Ok(Coordinates::new(lat, lon))
    }
}

fn parse_degrees(value: &str) -> Result<f64, GeocoderError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocoderError::InvalidResponse(format!("Invalid coordinate '{}'", value)))
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, address: &str) -> Option<Coordinates> {
        match self.search(address).await {
            Ok(coords) => Some(coords),
            Err(GeocoderError::NotFound) => {
                tracing::warn!("No geocoding result for {}", address);
                None
            }
            Err(e) => {
                tracing::warn!("Error geocoding {}: {}", address, e);
                None
            }
        }
    }
}

/// Fixed lookup table, for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    entries: HashMap<String, Coordinates>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, lat: f64, lon: f64) -> Self {
        self.entries
            .insert(address.to_string(), Coordinates::new(lat, lon));
        self
    }
}

impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> Option<Coordinates> {
        let found = self.entries.get(address).copied();
        if found.is_none() {
            tracing::warn!("No geocoding result for {}", address);
        }
        found
    }
}
