//! Entity module - Plain data structures for everything the store owns.
//! Records are serialized as-is into the backing file.

pub mod notification;
pub mod restaurant;

pub use notification::{Notification, NotificationKind};
pub use restaurant::{MAX_RATING, MIN_RATING, Restaurant, RestaurantDetails, normalize_name};
