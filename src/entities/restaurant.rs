//! Restaurant entity - The single record type managed by the store.
//!
//! A restaurant carries its identity (id, name, category), two flags (active and
//! favorite), a running-mean rating and a handful of optional contact fields.
//! Field names accept the legacy Portuguese keys on load so older data files
//! keep working.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 0.0;
/// Highest accepted rating.
pub const MAX_RATING: f64 = 5.0;

/// Restaurant record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Unique identifier, never reused while the record exists
    pub id: u64,
    /// Display name, trimmed; unique case-insensitively
    #[serde(alias = "nome")]
    pub name: String,
    /// Free-text category (e.g. "Pizza", "Japanese")
    #[serde(alias = "categoria")]
    pub category: String,
    /// Whether the restaurant is currently operating
    #[serde(alias = "ativo", default = "default_active")]
    pub active: bool,
    /// Marked as favorite by the user
    #[serde(alias = "favorito", default)]
    pub favorite: bool,
    /// Mean of every rating ever submitted, 0.0 when unrated
    #[serde(alias = "avaliacao", default)]
    pub rating: f64,
    /// Number of ratings folded into `rating`
    #[serde(alias = "num_avaliacoes", default)]
    pub rating_count: u32,
    /// Contact phone number
    #[serde(
        alias = "telefone",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    /// Contact email
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    /// Street address
    #[serde(
        alias = "endereco",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    /// 14-digit national business registration number (CNPJ)
    #[serde(
        alias = "cnpj",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_id: Option<String>,
    /// When the record was created
    #[serde(alias = "data_criacao")]
    pub created_at: NaiveDateTime,
    /// When any field was last changed
    #[serde(alias = "data_atualizacao")]
    pub updated_at: NaiveDateTime,
}

impl Restaurant {
    /// Builds a fresh record: active, not a favorite, unrated, no contact details.
    #[must_use]
    pub fn new(id: u64, name: &str, category: &str, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            category: category.trim().to_string(),
            active: true,
            favorite: false,
            rating: 0.0,
            rating_count: 0,
            phone: None,
            email: None,
            address: None,
            tax_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name used for uniqueness comparisons.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Folds one more rating into the running mean.
    ///
    /// The caller is responsible for range-checking `rating`.
    pub fn fold_rating(&mut self, rating: f64) {
        let total = self.rating * f64::from(self.rating_count);
        self.rating_count += 1;
        self.rating = (total + rating) / f64::from(self.rating_count);
    }

    /// Replaces the editable fields with the trimmed values from `details`.
    pub fn apply_details(&mut self, details: &RestaurantDetails) {
        self.name = details.name.trim().to_string();
        self.category = details.category.trim().to_string();
        self.phone = trimmed_or_none(details.phone.as_deref());
        self.email = trimmed_or_none(details.email.as_deref());
        self.address = trimmed_or_none(details.address.as_deref());
        self.tax_id = trimmed_or_none(details.tax_id.as_deref());
    }
}

/// The full set of user-editable fields, as submitted by a form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestaurantDetails {
    /// Restaurant name (required)
    pub name: String,
    /// Category (required)
    pub category: String,
    /// Phone with area code, any punctuation
    pub phone: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Street address, free text
    pub address: Option<String>,
    /// Business registration number, any punctuation
    pub tax_id: Option<String>,
}

impl RestaurantDetails {
    /// Details with only the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }
}

/// Trims and case-folds a name for uniqueness comparisons.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

const fn default_active() -> bool {
    true
}

fn trimmed_or_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

// Older files store absent optional fields as "".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
