//! Shared test utilities for the restaurant directory.
//!
//! This module provides helpers for creating throwaway stores backed by a temporary
//! directory and sample records with sensible defaults.

use crate::{core::RestaurantStore, entities::Restaurant, errors::Result};
use tempfile::TempDir;

/// File name of the backing file inside a test store's directory.
pub const TEST_DATA_FILE: &str = "restaurants.json";

/// Creates an empty store whose backing file lives in a fresh temporary directory.
///
/// The directory is returned so it outlives the store; dropping it deletes the file.
#[allow(clippy::expect_used)]
pub fn setup_test_store() -> (TempDir, RestaurantStore) {
    let dir = TempDir::new().expect("create temp dir");
    let store = RestaurantStore::open(dir.path().join(TEST_DATA_FILE));
    (dir, store)
}

/// Creates a test store pre-populated with `(name, category)` pairs, ids 1..=n.
pub fn setup_with_restaurants(entries: &[(&str, &str)]) -> Result<(TempDir, RestaurantStore)> {
    let (dir, mut store) = setup_test_store();
    for (name, category) in entries {
        store.add(name, category)?;
    }
    Ok((dir, store))
}

/// Builds a record directly, bypassing the store.
///
/// # Defaults
/// * active, not a favorite, unrated, no contact details
pub fn sample_restaurant(id: u64, name: &str, category: &str) -> Restaurant {
    Restaurant::new(id, name, category, chrono::Utc::now().naive_utc())
}
