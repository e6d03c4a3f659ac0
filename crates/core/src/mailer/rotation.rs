//! Positional rotation over the configured mail providers.

use std::sync::Arc;

use super::{Mailer, MailerError};

/// Cycles over an ordered list of mailers by working-set position.
///
/// With two providers this is the classic even/odd alternation; adding a
/// third provider is a configuration change, not a code change. Selection
/// is deterministic: position `i` always maps to `mailers[i % len]`.
pub struct MailerRotation {
    mailers: Vec<Arc<dyn Mailer>>,
}

impl MailerRotation {
    pub fn new(mailers: Vec<Arc<dyn Mailer>>) -> Result<Self, MailerError> {
        if mailers.is_empty() {
            return Err(MailerError::NoProviders);
        }
        Ok(Self { mailers })
    }

    /// The mailer responsible for the given working-set position.
    pub fn for_position(&self, position: usize) -> &Arc<dyn Mailer> {
        &self.mailers[position % self.mailers.len()]
    }

    pub fn len(&self) -> usize {
        self.mailers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mailers.is_empty()
    }
}
