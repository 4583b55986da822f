//! Aggregate statistics over the restaurant collection.

use crate::entities::Restaurant;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts shown on the statistics screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Number of restaurants
    pub total: usize,
    /// Restaurants currently active
    pub active: usize,
    /// `total - active`
    pub inactive: usize,
    /// Restaurants marked as favorite
    pub favorites: usize,
    /// Restaurant count per raw category string
    pub by_category: BTreeMap<String, usize>,
}

impl Statistics {
    /// Computes the statistics in a single pass.
    #[must_use]
    pub fn compute(restaurants: &[Restaurant]) -> Self {
        let mut stats = Self {
            total: restaurants.len(),
            ..Self::default()
        };

        for restaurant in restaurants {
            if restaurant.active {
                stats.active += 1;
            }
            if restaurant.favorite {
                stats.favorites += 1;
            }
            *stats
                .by_category
                .entry(restaurant.category.clone())
                .or_default() += 1;
        }

        stats.inactive = stats.total - stats.active;
        stats
    }
}
