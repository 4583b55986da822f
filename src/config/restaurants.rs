//! Seed restaurant configuration loading from config.toml
//!
//! Restaurants listed in config.toml are added to the directory the first time it
//! starts with an empty data file. The file is optional; without it nothing is seeded.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the seed configuration file.
pub const CONFIG_PATH_VAR: &str = "RESTAURANT_CONFIG_PATH";

/// Seed configuration used when the environment does not name one.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Restaurants to add to an empty directory
    #[serde(default)]
    pub restaurants: Vec<RestaurantSeed>,
}

/// A single restaurant to seed
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RestaurantSeed {
    /// Name of the restaurant
    pub name: String,
    /// Category (e.g. "Italian", "Japanese")
    pub category: String,
    /// Whether to mark it as favorite right away
    #[serde(default)]
    pub favorite: bool,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed configuration named by `RESTAURANT_CONFIG_PATH` (default `./config.toml`).
///
/// A missing file is not an error and yields an empty configuration.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        tracing::debug!("No seed configuration at {}", path);
        return Ok(Config::default());
    }
    load_config(path)
}
