use thiserror::Error;

use crate::services::GeocoderError;
use crate::tabular::{LoadError, WriteError};

/// Fatal errors that abort a run
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Geocoder setup failed: {0}")]
    Geocoder(#[from] GeocoderError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
