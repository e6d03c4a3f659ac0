//! Recipient records and the persistent store they live in.

mod sqlite;
mod store;
mod types;

pub use sqlite::SqliteRecipientStore;
pub use store::{RecipientStore, StoreError};
pub use types::{normalize_display_name, DeliveryStatus, MatchKey, RecipientRecord, StatusUpdate};
