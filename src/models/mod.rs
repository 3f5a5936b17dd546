// Model exports
pub mod domain;
pub mod report;

pub use domain::{AddressRecord, Coordinates, Direction, Geolocated, LocationRecord, MatchResult};
pub use report::{MatchReport, RunSummary};
