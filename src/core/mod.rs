//! Core business logic - the restaurant store and everything it is built from.
//!
//! Nothing here knows about menus, forms or terminals; a presentation layer calls
//! [`store::RestaurantStore`] and renders what it returns.

pub mod notifications;
pub mod persistence;
pub mod query;
pub mod statistics;
pub mod store;
pub mod validation;

pub use persistence::LoadOutcome;
pub use query::RestaurantQuery;
pub use statistics::Statistics;
pub use store::RestaurantStore;
pub use validation::ValidationReport;
