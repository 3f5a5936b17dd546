// Core algorithm exports
pub mod distance;
pub mod matcher;

pub use distance::{geodesic_distance, haversine_distance, DistanceModel};
pub use matcher::Matcher;
