//! Read-side views over the restaurant collection.
//!
//! All views are linear scans that return owned copies; nothing here can mutate the
//! store. Predicates set on a [`RestaurantQuery`] compose by intersection.

use crate::entities::Restaurant;
use std::collections::BTreeSet;

/// Category value that disables category filtering (matched case-insensitively).
pub const ALL_CATEGORIES: &str = "all";

/// Legacy spelling of [`ALL_CATEGORIES`] used by older front ends.
pub const ALL_CATEGORIES_LEGACY: &str = "todas";

/// A combination of optional predicates over restaurants.
///
/// An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantQuery {
    /// Exact category match, case-insensitive
    pub category: Option<String>,
    /// Only restaurants with this active flag
    pub active: Option<bool>,
    /// Only restaurants with this favorite flag
    pub favorite: Option<bool>,
    /// Case-insensitive substring of name or category
    pub term: Option<String>,
}

impl RestaurantQuery {
    /// A query that matches every restaurant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one category. Empty, [`ALL_CATEGORIES`] or [`ALL_CATEGORIES_LEGACY`]
    /// leaves the query unrestricted.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts to active (`true`) or inactive (`false`) restaurants.
    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Restricts to favorites (`true`) or non-favorites (`false`).
    #[must_use]
    pub const fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }

    /// Restricts to restaurants whose name or category contains `term`.
    #[must_use]
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// Whether `restaurant` satisfies every predicate that is set.
    #[must_use]
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.matches_category(restaurant)
            && self.active.is_none_or(|a| restaurant.active == a)
            && self.favorite.is_none_or(|f| restaurant.favorite == f)
            && self.matches_term(restaurant)
    }

    /// Copies of the matching restaurants, in collection order.
    #[must_use]
    pub fn apply(&self, restaurants: &[Restaurant]) -> Vec<Restaurant> {
        restaurants
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    fn matches_category(&self, restaurant: &Restaurant) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(c)
                if c.eq_ignore_ascii_case(ALL_CATEGORIES)
                    || c.eq_ignore_ascii_case(ALL_CATEGORIES_LEGACY) =>
            {
                true
            }
            Some(c) => restaurant.category.to_lowercase() == c.to_lowercase(),
        }
    }

    fn matches_term(&self, restaurant: &Restaurant) -> bool {
        match self.term.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                restaurant.name.to_lowercase().contains(&needle)
                    || restaurant.category.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Distinct category strings, sorted ascending.
///
/// Categories differing only in case are kept as separate entries.
#[must_use]
pub fn categories(restaurants: &[Restaurant]) -> Vec<String> {
    restaurants
        .iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_restaurant;

    fn fixture() -> Vec<Restaurant> {
        let mut pizzeria = sample_restaurant(1, "Pizzaria Bella", "Italian");
        pizzeria.favorite = true;
        let mut closed = sample_restaurant(2, "Piz Buin", "Swiss");
        closed.active = false;
        let sushi = sample_restaurant(3, "Sushi Go", "Japanese");
        let pasta = sample_restaurant(4, "Pasta Nostra", "italian");
        vec![pizzeria, closed, sushi, pasta]
    }

    fn ids(restaurants: &[Restaurant]) -> Vec<u64> {
        restaurants.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert_eq!(ids(&RestaurantQuery::new().apply(&fixture())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_category_is_case_insensitive_exact_match() {
        let result = RestaurantQuery::new().category("ITALIAN").apply(&fixture());
        assert_eq!(ids(&result), vec![1, 4]);

        let result = RestaurantQuery::new().category("Ital").apply(&fixture());
        assert!(result.is_empty());
    }

    #[test]
    fn test_all_sentinel_passes_through() {
        let result = RestaurantQuery::new().category("All").apply(&fixture());
        assert_eq!(result.len(), 4);

        let result = RestaurantQuery::new().category("Todas").apply(&fixture());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_term_matches_name_or_category() {
        let result = RestaurantQuery::new().term("PIZ").apply(&fixture());
        assert_eq!(ids(&result), vec![1, 2]);

        let result = RestaurantQuery::new().term("japan").apply(&fixture());
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_predicates_intersect() {
        let result = RestaurantQuery::new()
            .category("Italian")
            .term("piz")
            .apply(&fixture());
        assert_eq!(ids(&result), vec![1]);

        let result = RestaurantQuery::new()
            .active(true)
            .favorite(false)
            .apply(&fixture());
        assert_eq!(ids(&result), vec![3, 4]);
    }

    #[test]
    fn test_categories_sorted_and_case_sensitive() {
        assert_eq!(
            categories(&fixture()),
            vec!["Italian", "Japanese", "Swiss", "italian"]
        );
    }
}
