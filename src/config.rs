use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::DistanceModel;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub files: FileSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of lookups in flight
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl GeocoderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_endpoint() -> String { "https://nominatim.openstreetmap.org".to_string() }
fn default_user_agent() -> String { "location-matcher".to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_concurrency() -> usize { 1 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub distance_model: DistanceModel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileSettings {
    #[serde(default = "default_list_a")]
    pub list_a: PathBuf,
    #[serde(default = "default_list_b")]
    pub list_b: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            list_a: default_list_a(),
            list_b: default_list_b(),
            output: default_output(),
        }
    }
}

fn default_list_a() -> PathBuf { PathBuf::from("list_a.csv") }
fn default_list_b() -> PathBuf { PathBuf::from("list_b.csv") }
fn default_output() -> PathBuf { PathBuf::from("matched_locations.csv") }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LOCMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LOCMATCH__GEOCODER__CONCURRENCY -> geocoder.concurrency
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("LOCMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
