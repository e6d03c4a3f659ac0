//! Mock mail transport for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::mailer::{Mailer, MailerError, OutgoingEmail};

/// Mock implementation of the [`Mailer`] trait.
///
/// Provides controllable behavior for testing:
/// - Record every email handed to `send`
/// - Simulate failures for specific addresses, or for every send
pub struct MockMailer {
    name: String,
    sent: Mutex<Vec<OutgoingEmail>>,
    failing_addresses: Mutex<HashSet<String>>,
    fail_all: AtomicBool,
}

impl MockMailer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sent: Mutex::new(Vec::new()),
            failing_addresses: Mutex::new(HashSet::new()),
            fail_all: AtomicBool::new(false),
        }
    }

    /// Make sends to the given address fail.
    pub fn fail_for(&self, address: &str) {
        self.failing_addresses
            .lock()
            .unwrap()
            .insert(address.to_string());
    }

    /// Make every send fail.
    pub fn fail_all(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    /// All successfully sent emails, in call order.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        if self.fail_all.load(Ordering::SeqCst)
            || self.failing_addresses.lock().unwrap().contains(&email.to)
        {
            return Err(MailerError::Failed(format!(
                "mock failure for {}",
                email.to
            )));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
