use csv::{Reader, StringRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{AddressRecord, LocationRecord};

/// Columns required in list A
pub const ADDRESS_COLUMNS: [&str; 4] = ["street", "house number", "zip code", "city"];

/// Columns required in list B
pub const LOCATION_COLUMNS: [&str; 2] = ["City", "Zip Code"];

/// Fatal errors while reading an input list
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Malformed CSV in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

#[derive(Debug, Deserialize)]
struct AddressRow {
    street: String,
    #[serde(rename = "house number")]
    house_number: String,
    #[serde(rename = "zip code")]
    zip_code: String,
    city: String,
}

#[derive(Debug, Deserialize)]
struct LocationRow {
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Zip Code")]
    zip_code: String,
}

/// Load list A (street, house number, zip code, city)
pub fn load_addresses(path: &Path) -> Result<Vec<AddressRecord>, LoadError> {
    let rows: Vec<AddressRow> = load_rows(path, &ADDRESS_COLUMNS)?;

    Ok(rows
        .into_iter()
        .map(|row| AddressRecord {
            street: row.street,
            house_number: row.house_number,
            zip_code: row.zip_code,
            city: row.city,
            coordinates: None,
        })
        .collect())
}

/// Load list B (City, Zip Code)
pub fn load_locations(path: &Path) -> Result<Vec<LocationRecord>, LoadError> {
    let rows: Vec<LocationRow> = load_rows(path, &LOCATION_COLUMNS)?;

    Ok(rows
        .into_iter()
        .map(|row| LocationRecord {
            city: row.city,
            zip_code: row.zip_code,
            coordinates: None,
        })
        .collect())
}

fn load_rows<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = Reader::from_reader(file);

    // Tolerate "city " style headers
    let headers: StringRecord = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::trim)
        .collect();

    if let Some(column) = required.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        });
    }
    reader.set_headers(headers.clone());

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_err)?;

    tracing::info!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(rows)
}
