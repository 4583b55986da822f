//! Snapshot persistence - Reads and writes the whole restaurant collection as one JSON file.
//!
//! The file carries a schema version, the time of the last write and the ordered
//! record list. Writes go to a sibling temporary file that is renamed over the
//! target, so a crash mid-write never leaves a truncated snapshot behind.

use crate::{
    entities::{MAX_RATING, MIN_RATING, Restaurant},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, instrument};

/// Schema version written into every snapshot.
pub const SCHEMA_VERSION: &str = "1.0";

/// On-disk layout of the backing file.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every record, in insertion order
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    /// Schema version tag
    #[serde(default = "default_version")]
    pub version: String,
    /// When the snapshot was written
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
}

/// What happened when the backing file was read.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file does not exist yet; the collection starts empty.
    Missing,
    /// The file was read successfully.
    Loaded {
        /// Number of records restored
        count: usize,
    },
    /// The file exists but could not be used; the collection starts empty.
    Malformed {
        /// Why the file was rejected
        reason: String,
    },
}

impl LoadOutcome {
    /// True when the file existed but was rejected.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Reads the snapshot at `path`.
///
/// Never fails: a missing file and a malformed file both produce an empty record
/// list, with the outcome telling them apart.
#[instrument]
pub fn read_snapshot(path: &Path) -> (Vec<Restaurant>, LoadOutcome) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No data file at {:?}; starting with an empty collection", path);
            return (Vec::new(), LoadOutcome::Missing);
        }
        Err(e) => {
            error!("Failed to read data file {:?}: {}", path, e);
            return (
                Vec::new(),
                LoadOutcome::Malformed {
                    reason: format!("Failed to read data file: {e}"),
                },
            );
        }
    };

    match decode(&contents) {
        Ok(restaurants) => {
            let count = restaurants.len();
            info!("Loaded {} restaurants from {:?}", count, path);
            (restaurants, LoadOutcome::Loaded { count })
        }
        Err(e) => {
            error!("Data file {:?} is malformed, ignoring it: {}", path, e);
            (
                Vec::new(),
                LoadOutcome::Malformed {
                    reason: e.to_string(),
                },
            )
        }
    }
}

fn decode(contents: &str) -> Result<Vec<Restaurant>> {
    let snapshot: Snapshot = serde_json::from_str(contents)?;
    debug!(
        "Snapshot version {} last updated {:?}",
        snapshot.version, snapshot.last_updated
    );

    let mut seen_ids = HashSet::with_capacity(snapshot.restaurants.len());
    let mut seen_names = HashSet::with_capacity(snapshot.restaurants.len());
    for restaurant in &snapshot.restaurants {
        if restaurant.id == 0 {
            return Err(malformed(format!("record '{}' has id 0", restaurant.name)));
        }
        if !seen_ids.insert(restaurant.id) {
            return Err(malformed(format!("duplicate record id {}", restaurant.id)));
        }
        if restaurant.name.trim().is_empty() || restaurant.category.trim().is_empty() {
            return Err(malformed(format!(
                "record {} has a blank name or category",
                restaurant.id
            )));
        }
        if !seen_names.insert(restaurant.normalized_name()) {
            return Err(malformed(format!(
                "duplicate restaurant name '{}'",
                restaurant.name.trim()
            )));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&restaurant.rating) {
            return Err(malformed(format!(
                "record {} has rating {} outside {MIN_RATING} to {MAX_RATING}",
                restaurant.id, restaurant.rating
            )));
        }
    }

    Ok(snapshot.restaurants)
}

const fn malformed(message: String) -> Error {
    Error::Persistence { message }
}

/// Writes `restaurants` to `path`, replacing whatever was there.
///
/// # Errors
/// Returns `Error::Persistence` if the parent directory cannot be created, the
/// temporary file cannot be written, or the rename fails.
#[instrument(skip(restaurants), fields(count = restaurants.len()))]
pub fn write_snapshot(path: &Path, restaurants: &[Restaurant]) -> Result<()> {
    let snapshot = SnapshotRef {
        restaurants,
        version: SCHEMA_VERSION,
        last_updated: chrono::Utc::now().naive_utc(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| persistence_error(path, &e))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        persistence_error(path, &e)
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        persistence_error(path, &e)
    })?;

    debug!("Wrote snapshot to {:?}", path);
    Ok(())
}

// Borrowing twin of `Snapshot` so a save never clones the collection.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    restaurants: &'a [Restaurant],
    version: &'a str,
    last_updated: NaiveDateTime,
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn persistence_error(path: &Path, e: &std::io::Error) -> Error {
    error!("Failed to write data file {:?}: {}", path, e);
    Error::Persistence {
        message: format!("Failed to write {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::sample_restaurant;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let (restaurants, outcome) = read_snapshot(&dir.path().join("absent.json"));
        assert!(restaurants.is_empty());
        assert!(matches!(outcome, LoadOutcome::Missing));
    }

    #[test]
    fn test_read_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ this is not json").unwrap();

        let (restaurants, outcome) = read_snapshot(&path);
        assert!(restaurants.is_empty());
        assert!(outcome.is_malformed());
    }

    #[test]
    fn test_read_rejects_duplicate_and_zero_ids() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dupes.json");

        write_snapshot(
            &path,
            &[sample_restaurant(1, "A", "X"), sample_restaurant(1, "B", "X")],
        )?;
        let (restaurants, outcome) = read_snapshot(&path);
        assert!(restaurants.is_empty());
        assert!(outcome.is_malformed());

        write_snapshot(&path, &[sample_restaurant(0, "A", "X")])?;
        let (_, outcome) = read_snapshot(&path);
        assert!(outcome.is_malformed());
        Ok(())
    }

    #[test]
    fn test_read_rejects_broken_record_invariants() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invariants.json");

        write_snapshot(
            &path,
            &[sample_restaurant(1, "Pizza", "A"), sample_restaurant(2, " pizza ", "B")],
        )?;
        let (restaurants, outcome) = read_snapshot(&path);
        assert!(restaurants.is_empty());
        assert!(outcome.is_malformed());

        let mut blank = sample_restaurant(1, "Pizza", "A");
        blank.category = "  ".to_string();
        write_snapshot(&path, &[blank])?;
        assert!(read_snapshot(&path).1.is_malformed());

        let mut blank = sample_restaurant(1, "Pizza", "A");
        blank.name = String::new();
        write_snapshot(&path, &[blank])?;
        assert!(read_snapshot(&path).1.is_malformed());

        let mut over_rated = sample_restaurant(1, "Pizza", "A");
        over_rated.rating = 9.5;
        over_rated.rating_count = 1;
        write_snapshot(&path, &[over_rated])?;
        assert!(read_snapshot(&path).1.is_malformed());

        let mut under_rated = sample_restaurant(1, "Pizza", "A");
        under_rated.rating = -0.5;
        write_snapshot(&path, &[under_rated])?;
        assert!(read_snapshot(&path).1.is_malformed());
        Ok(())
    }

    #[test]
    fn test_read_rejects_raw_file_with_name_twins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("twins.json");
        fs::write(
            &path,
            r#"{"restaurants": [
                {"id": 1, "name": "Pizza", "category": "A",
                 "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00"},
                {"id": 2, "name": " pizza ", "category": "  ", "rating": 9.5,
                 "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00"}
            ]}"#,
        )
        .unwrap();

        let (restaurants, outcome) = read_snapshot(&path);
        assert!(restaurants.is_empty());
        assert!(outcome.is_malformed());
    }

    #[test]
    fn test_write_then_read_round_trip() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("restaurants.json");
        let mut second = sample_restaurant(7, "Sushi Bar", "Japanese");
        second.email = Some("hi@sushi.jp".to_string());
        second.fold_rating(4.5);
        let written = vec![sample_restaurant(3, "Cantina", "Italian"), second];

        write_snapshot(&path, &written)?;
        assert!(!temp_path(&path).exists());

        let (read, outcome) = read_snapshot(&path);
        assert!(matches!(outcome, LoadOutcome::Loaded { count: 2 }));
        assert_eq!(read, written);
        Ok(())
    }

    #[test]
    fn test_snapshot_carries_version_and_timestamp() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("restaurants.json");
        write_snapshot(&path, &[])?;

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(raw["version"], SCHEMA_VERSION);
        assert!(raw["last_updated"].is_string());
        assert!(raw["restaurants"].as_array().unwrap().is_empty());
        Ok(())
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("restaurants.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupant"), "keeps the directory non-empty").unwrap();

        let result = write_snapshot(&target, &[sample_restaurant(1, "A", "X")]);
        assert!(matches!(result, Err(Error::Persistence { .. })));
        assert!(!temp_path(&target).exists());
        assert!(target.is_dir());
    }

    #[test]
    fn test_write_into_unwritable_location_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let result = write_snapshot(&blocker.join("restaurants.json"), &[]);
        assert!(matches!(result, Err(Error::Persistence { .. })));
    }
}
