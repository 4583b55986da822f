//! Storage configuration for the restaurant directory.
//!
//! The backing file location comes from `RESTAURANT_DATA_PATH` (usually set in `.env`)
//! and falls back to a JSON file under `data/`.

use std::path::PathBuf;

/// Environment variable naming the backing file.
pub const DATA_PATH_VAR: &str = "RESTAURANT_DATA_PATH";

/// Backing file used when the environment does not name one.
pub const DEFAULT_DATA_PATH: &str = "data/restaurants.json";

/// Gets the backing file path from the environment or returns the default.
#[must_use]
pub fn get_data_path() -> PathBuf {
    data_path_from(std::env::var(DATA_PATH_VAR).ok())
}

fn data_path_from(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from)
}
