//! Restaurant store - Owns the restaurant collection and mirrors it to a backing file.
//!
//! The store is the only component that mutates records. Every successful mutation
//! rewrites the whole backing file; a mutation is applied to a working copy first
//! and only swapped in once the write has succeeded, so a failed save leaves the
//! in-memory collection exactly as it was.
//!
//! The store is single-threaded and assumes it is the only writer of its file.

use crate::{
    config::restaurants::RestaurantSeed,
    core::{
        notifications::NotificationLog,
        persistence::{self, LoadOutcome},
        query::{self, RestaurantQuery},
        statistics::Statistics,
        validation,
    },
    entities::{
        MAX_RATING, MIN_RATING, Notification, NotificationKind, Restaurant, RestaurantDetails,
        normalize_name,
    },
    errors::{Error, Result},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// In-memory restaurant collection backed by a JSON snapshot file.
#[derive(Debug)]
pub struct RestaurantStore {
    path: PathBuf,
    restaurants: Vec<Restaurant>,
    notifications: NotificationLog,
}

impl RestaurantStore {
    /// Creates an empty store bound to `path` without reading it.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            restaurants: Vec::new(),
            notifications: NotificationLog::new(),
        }
    }

    /// Creates a store bound to `path` and loads whatever the file holds.
    ///
    /// A missing or malformed file yields an empty store; the problem is logged and
    /// posted to the notification feed.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        store.load();
        store
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of restaurants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    /// True when the store holds no restaurants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Replaces the in-memory collection with the contents of the backing file.
    ///
    /// Never fails; see [`LoadOutcome`] for how a missing file differs from a broken one.
    pub fn load(&mut self) -> LoadOutcome {
        let (restaurants, outcome) = persistence::read_snapshot(&self.path);
        self.restaurants = restaurants;
        if let LoadOutcome::Malformed { reason } = &outcome {
            self.notifications.push(
                format!("Could not load saved restaurants: {reason}"),
                NotificationKind::Error,
            );
        }
        outcome
    }

    /// Writes the current collection to the backing file.
    ///
    /// # Errors
    /// Returns `Error::Persistence` if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        persistence::write_snapshot(&self.path, &self.restaurants)
    }

    /// Adds a restaurant with default flags and no rating.
    ///
    /// # Errors
    /// - `Error::Validation` if the name or category is blank
    /// - `Error::DuplicateName` if the name matches an existing one, ignoring case and
    ///   surrounding whitespace
    /// - `Error::Persistence` if the save fails (nothing is added)
    #[instrument(skip(self))]
    pub fn add(&mut self, name: &str, category: &str) -> Result<Restaurant> {
        validation::validate_restaurant(&RestaurantDetails::new(name, category)).into_result()?;
        if self.exists(name) {
            warn!("Rejected duplicate restaurant name '{}'", name.trim());
            return Err(Error::DuplicateName {
                name: name.trim().to_string(),
            });
        }

        let id = self.next_id();
        let restaurant = Restaurant::new(id, name, category, now());

        let mut next = self.restaurants.clone();
        next.push(restaurant.clone());
        self.commit(
            next,
            format!("Restaurant '{}' added", restaurant.name),
        )?;

        info!(
            "Added restaurant '{}' (ID: {}) in category '{}'",
            restaurant.name, restaurant.id, restaurant.category
        );
        Ok(restaurant)
    }

    /// Renames and recategorizes a restaurant.
    ///
    /// # Errors
    /// - `Error::NotFound` if no restaurant has `id`
    /// - `Error::Validation` if the name or category is blank
    /// - `Error::DuplicateName` if another restaurant already uses the name
    /// - `Error::Persistence` if the save fails
    #[instrument(skip(self))]
    pub fn update(&mut self, id: u64, name: &str, category: &str) -> Result<Restaurant> {
        self.position(id).ok_or(Error::NotFound { id })?;
        validation::validate_restaurant(&RestaurantDetails::new(name, category)).into_result()?;
        self.ensure_name_free(id, name)?;

        let (name, category) = (name.trim().to_string(), category.trim().to_string());
        self.modify(
            id,
            |r| {
                r.name = name;
                r.category = category;
            },
            |r| format!("Restaurant '{}' updated", r.name),
        )
    }

    /// Replaces every editable field after validating all of them.
    ///
    /// Validation runs before anything else and reports every failing field.
    ///
    /// # Errors
    /// - `Error::Validation` with one reason per failing field
    /// - `Error::NotFound` if no restaurant has `id`
    /// - `Error::DuplicateName` if another restaurant already uses the name
    /// - `Error::Persistence` if the save fails
    #[instrument(skip(self))]
    pub fn update_full(&mut self, id: u64, details: &RestaurantDetails) -> Result<Restaurant> {
        validation::validate_restaurant(details).into_result()?;
        self.position(id).ok_or(Error::NotFound { id })?;
        self.ensure_name_free(id, &details.name)?;

        self.modify(
            id,
            |r| r.apply_details(details),
            |r| format!("Restaurant '{}' updated", r.name),
        )
    }

    /// Flips the active flag.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id or `Error::Persistence` if the save fails.
    #[instrument(skip(self))]
    pub fn toggle_active(&mut self, id: u64) -> Result<Restaurant> {
        self.modify(
            id,
            |r| r.active = !r.active,
            |r| {
                let state = if r.active { "activated" } else { "deactivated" };
                format!("Restaurant '{}' {state}", r.name)
            },
        )
    }

    /// Flips the favorite flag.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id or `Error::Persistence` if the save fails.
    #[instrument(skip(self))]
    pub fn toggle_favorite(&mut self, id: u64) -> Result<Restaurant> {
        self.modify(
            id,
            |r| r.favorite = !r.favorite,
            |r| {
                let state = if r.favorite {
                    "added to favorites"
                } else {
                    "removed from favorites"
                };
                format!("Restaurant '{}' {state}", r.name)
            },
        )
    }

    /// Folds `rating` into the restaurant's running mean.
    ///
    /// # Errors
    /// - `Error::InvalidRating` if `rating` is outside 0 to 5 (or not a number)
    /// - `Error::NotFound` if no restaurant has `id`
    /// - `Error::Persistence` if the save fails
    #[instrument(skip(self))]
    pub fn add_rating(&mut self, id: u64, rating: f64) -> Result<Restaurant> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(Error::InvalidRating { rating });
        }
        self.modify(
            id,
            |r| r.fold_rating(rating),
            |r| format!("Rated '{}' {rating:.1} (average {:.1})", r.name, r.rating),
        )
    }

    /// Removes a restaurant and returns it.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id or `Error::Persistence` if the save fails.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: u64) -> Result<Restaurant> {
        let index = self.position(id).ok_or(Error::NotFound { id })?;

        let mut next = self.restaurants.clone();
        let removed = next.remove(index);
        self.commit(next, format!("Restaurant '{}' deleted", removed.name))?;

        info!("Deleted restaurant '{}' (ID: {})", removed.name, removed.id);
        Ok(removed)
    }

    /// A copy of the restaurant with `id`, if any.
    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<Restaurant> {
        self.restaurants.iter().find(|r| r.id == id).cloned()
    }

    /// Whether a restaurant with this name exists, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        let normalized = normalize_name(name);
        self.restaurants
            .iter()
            .any(|r| r.normalized_name() == normalized)
    }

    /// A copy of every restaurant, in insertion order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Restaurant> {
        self.restaurants.clone()
    }

    /// Restaurants matching every predicate set on `query`.
    #[must_use]
    pub fn query(&self, query: &RestaurantQuery) -> Vec<Restaurant> {
        query.apply(&self.restaurants)
    }

    /// Restaurants filtered by category, active flag and favorite flag.
    ///
    /// `None` leaves a predicate unrestricted, as does a category of `"all"`.
    #[must_use]
    pub fn filter(
        &self,
        category: Option<&str>,
        active: Option<bool>,
        favorite: Option<bool>,
    ) -> Vec<Restaurant> {
        self.query(&RestaurantQuery {
            category: category.map(ToString::to_string),
            active,
            favorite,
            term: None,
        })
    }

    /// Restaurants whose name or category contains `term`, ignoring case.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<Restaurant> {
        self.query(&RestaurantQuery::new().term(term))
    }

    /// Restaurants marked as favorite.
    #[must_use]
    pub fn favorites(&self) -> Vec<Restaurant> {
        self.query(&RestaurantQuery::new().favorite(true))
    }

    /// Restaurants with the given active flag.
    #[must_use]
    pub fn by_status(&self, active: bool) -> Vec<Restaurant> {
        self.query(&RestaurantQuery::new().active(active))
    }

    /// Distinct categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        query::categories(&self.restaurants)
    }

    /// Totals, flag counts and per-category counts.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.restaurants)
    }

    /// Adds the configured restaurants when the store is empty.
    ///
    /// Entries that fail validation or collide with an earlier entry are skipped with a
    /// warning. Returns how many restaurants were created.
    ///
    /// # Errors
    /// Returns `Error::Persistence` if a save fails; restaurants added before the failure stay.
    #[instrument(skip(self, seeds), fields(seeds = seeds.len()))]
    pub fn seed(&mut self, seeds: &[RestaurantSeed]) -> Result<usize> {
        if !self.is_empty() {
            debug!("Store already holds {} restaurants; skipping seed", self.len());
            return Ok(0);
        }

        let mut created = 0;
        for seed in seeds {
            let restaurant = match self.add(&seed.name, &seed.category) {
                Ok(r) => r,
                Err(e @ (Error::DuplicateName { .. } | Error::Validation { .. })) => {
                    warn!("Skipping seed entry '{}': {}", seed.name, e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            if seed.favorite {
                self.toggle_favorite(restaurant.id)?;
            }
            created += 1;
        }

        info!("Seeded {} restaurants from configuration", created);
        Ok(created)
    }

    /// Posts a message to the notification feed and returns its id.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.notifications.push(message, kind)
    }

    /// The retained notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.entries()
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.unread_count()
    }

    /// Marks every notification as read.
    pub fn mark_all_read(&mut self) {
        self.notifications.mark_all_read();
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.restaurants.iter().position(|r| r.id == id)
    }

    fn next_id(&self) -> u64 {
        self.restaurants.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    fn ensure_name_free(&self, id: u64, name: &str) -> Result<()> {
        let normalized = normalize_name(name);
        if self
            .restaurants
            .iter()
            .any(|r| r.id != id && r.normalized_name() == normalized)
        {
            warn!("Rejected rename of {} to taken name '{}'", id, name.trim());
            return Err(Error::DuplicateName {
                name: name.trim().to_string(),
            });
        }
        Ok(())
    }

    // Applies `apply` to a copy of record `id`, restamps it and commits the copy.
    fn modify(
        &mut self,
        id: u64,
        apply: impl FnOnce(&mut Restaurant),
        describe: impl FnOnce(&Restaurant) -> String,
    ) -> Result<Restaurant> {
        let index = self.position(id).ok_or(Error::NotFound { id })?;

        let mut next = self.restaurants.clone();
        let record = &mut next[index];
        apply(record);
        record.updated_at = now();
        let updated = record.clone();

        self.commit(next, describe(&updated))?;
        debug!("Updated restaurant {}: {:?}", id, updated);
        Ok(updated)
    }

    fn commit(&mut self, next: Vec<Restaurant>, message: String) -> Result<()> {
        match persistence::write_snapshot(&self.path, &next) {
            Ok(()) => {
                self.restaurants = next;
                self.notifications.push(message, NotificationKind::Success);
                Ok(())
            }
            Err(e) => {
                self.notifications
                    .push(format!("Failed to save changes: {e}"), NotificationKind::Error);
                Err(e)
            }
        }
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}
