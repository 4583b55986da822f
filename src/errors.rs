//! Unified error types for the restaurant directory.
//!
//! Every failure a store operation can report is a variant here. None of them
//! are fatal: callers decide how to surface them to the user.

use thiserror::Error;

/// All errors produced by the record store, its validators and its configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more fields failed validation. Reasons are listed in field order.
    #[error("Validation failed: {}", reasons.join("; "))]
    Validation {
        /// Every failing field's human-readable reason
        reasons: Vec<String>,
    },

    /// No restaurant has the requested id.
    #[error("Restaurant not found: {id}")]
    NotFound {
        /// The id that was looked up
        id: u64,
    },

    /// Another restaurant already uses this name (case-insensitive).
    #[error("A restaurant named '{name}' already exists")]
    DuplicateName {
        /// The conflicting name as submitted
        name: String,
    },

    /// A rating outside the accepted range (0 to 5).
    #[error("Invalid rating: {rating} (must be between 0 and 5)")]
    InvalidRating {
        /// The rejected rating
        rating: f64,
    },

    /// The backing file could not be written; in-memory state is unchanged.
    #[error("Persistence error: {message}")]
    Persistence {
        /// What went wrong while writing
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Flattens the error into the messages shown to the user.
    ///
    /// Validation errors yield one entry per failing field; every other variant
    /// yields its display text.
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        match self {
            Self::Validation { reasons } => reasons.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
