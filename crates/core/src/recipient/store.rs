//! Recipient storage trait.

use thiserror::Error;

use super::{MatchKey, RecipientRecord, StatusUpdate};

/// Error type for recipient store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Table name is not a valid identifier.
    #[error("invalid table name: {0}")]
    InvalidTable(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Trait for recipient storage backends.
///
/// The batch treats the store as a mutable table keyed by recipient
/// identity. Fetch returns a point-in-time snapshot; updates match by
/// equality on all [`MatchKey`] fields.
pub trait RecipientStore: Send + Sync {
    /// Fetch all rows of the given table.
    fn fetch(&self, table: &str) -> Result<Vec<RecipientRecord>, StoreError>;

    /// Apply a status transition to the rows matching the key.
    /// Returns `true` if at least one row was updated.
    fn update(
        &self,
        table: &str,
        set: &StatusUpdate,
        matching: &MatchKey,
    ) -> Result<bool, StoreError>;
}
