//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external service
//! traits, so the batch runner can be exercised without a database, an
//! SMTP server or a notification backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use postino_core::testing::{fixtures, MockMailer, MockRecipientStore};
//!
//! let store = MockRecipientStore::with_rows(vec![
//!     fixtures::pending_recipient("a@example.com", "Springfield", "OR"),
//! ]);
//! let mailer = MockMailer::new("gmail");
//! mailer.fail_for("a@example.com");
//!
//! // Run the batch, then assert on recorded calls...
//! let updates = store.recorded_updates();
//! let sent = mailer.sent();
//! ```

mod mock_mailer;
mod mock_notifier;
mod mock_store;

pub use mock_mailer::MockMailer;
pub use mock_notifier::MockNotifier;
pub use mock_store::{MockRecipientStore, RecordedUpdate};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::recipient::{DeliveryStatus, RecipientRecord};

    /// Create a pending recipient with reasonable defaults.
    pub fn pending_recipient(email: &str, municipality: &str, region: &str) -> RecipientRecord {
        RecipientRecord {
            email: email.to_string(),
            display_name: Some("Acme Corp".to_string()),
            municipality: municipality.to_string(),
            region: region.to_string(),
            status: DeliveryStatus::Pending,
            last_updated: None,
        }
    }

    /// Create a recipient whose status is already past pending.
    pub fn sent_recipient(email: &str, municipality: &str, region: &str) -> RecipientRecord {
        RecipientRecord {
            status: DeliveryStatus::sent("gmail"),
            ..pending_recipient(email, municipality, region)
        }
    }
}
