//! Mock notifier for testing.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::notifier::{Channel, Notifier};

/// Mock implementation of the [`Notifier`] trait.
///
/// Records every notification for assertions.
pub struct MockNotifier {
    messages: Mutex<Vec<(Channel, String)>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// All notifications recorded so far, in call order.
    pub fn messages(&self) -> Vec<(Channel, String)> {
        self.messages.lock().unwrap().clone()
    }

    /// Number of notifications delivered to the given channel.
    pub fn count_for(&self, channel: Channel) -> usize {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == channel)
            .count()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, text: &str, channel: Channel) {
        self.messages
            .lock()
            .unwrap()
            .push((channel, text.to_string()));
    }
}
