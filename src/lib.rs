//! Location Matcher - nearest-location matching between two address lists
//!
//! Both lists are geocoded, then every record of the query list is paired
//! with the geographically closest record of the candidate list.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod tabular;

// Re-export commonly used types
pub use crate::core::{geodesic_distance, haversine_distance, DistanceModel, Matcher};
pub use crate::models::{
    AddressRecord, Coordinates, Direction, LocationRecord, MatchReport, MatchResult,
};
