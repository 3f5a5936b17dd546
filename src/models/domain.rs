use serde::{Deserialize, Serialize};

/// A geocoded position in degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components finite and inside the WGS84 degree ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Anything the matcher can compare: a label for the output plus an optional position.
pub trait Geolocated {
    /// Text written to the output file for this record
    fn label(&self) -> String;

    /// Raw geocoding result, `None` if geocoding failed
    fn raw_coordinates(&self) -> Option<Coordinates>;

    /// Coordinates usable for distance computation
    fn coordinates(&self) -> Option<Coordinates> {
        self.raw_coordinates().filter(Coordinates::is_valid)
    }
}

/// Row of list A ("stock" side)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub street: String,
    pub house_number: String,
    pub zip_code: String,
    pub city: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl AddressRecord {
    pub fn new(street: &str, house_number: &str, zip_code: &str, city: &str) -> Self {
        Self {
            street: street.to_string(),
            house_number: house_number.to_string(),
            zip_code: zip_code.to_string(),
            city: city.to_string(),
            coordinates: None,
        }
    }

    /// Geocoding query, e.g. `Hauptstraße 5, 10115 Berlin`
    pub fn full_address(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.street, self.house_number, self.zip_code, self.city
        )
    }
}

impl Geolocated for AddressRecord {
    fn label(&self) -> String {
        self.full_address()
    }

    fn raw_coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

/// Row of list B ("customer" side)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub city: String,
    pub zip_code: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl LocationRecord {
    pub fn new(city: &str, zip_code: &str) -> Self {
        Self {
            city: city.to_string(),
            zip_code: zip_code.to_string(),
            coordinates: None,
        }
    }

    /// Geocoding query, e.g. `Berlin, 10115`
    pub fn simplified_address(&self) -> String {
        format!("{}, {}", self.city, self.zip_code)
    }
}

impl Geolocated for LocationRecord {
    fn label(&self) -> String {
        format!("{} {}", self.city, self.zip_code)
    }

    fn raw_coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

/// Nearest candidate found for one query record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub query_label: String,
    pub candidate_label: String,
    pub distance_km: f64,
}

/// Which list is searched for which
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Every address of list A gets its nearest location from list B
    #[default]
    AToB,
    /// Every customer location (list B) gets its closest stock address (list A)
    CustomerToStock,
}

impl Direction {
    /// Column header of the output file
    pub fn headers(&self) -> [&'static str; 3] {
        match self {
            Direction::AToB => [
                "Address from List A",
                "Location from List B",
                "Distance (km)",
            ],
            Direction::CustomerToStock => [
                "Customer Location",
                "Closest Stock Location",
                "Distance (km)",
            ],
        }
    }
}
