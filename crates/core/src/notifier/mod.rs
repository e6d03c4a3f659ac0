//! Operator notifications.
//!
//! Notifications are fire-and-forget: delivery failures are logged and
//! never surfaced to the batch.

mod telegram;

pub use telegram::TelegramNotifier;

use async_trait::async_trait;
use tracing::debug;

/// Logical notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Per-recipient successes.
    Success,
    /// Failures and the final run outcome.
    Warning,
}

/// Trait for operator notification backends.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a message to the given channel, best-effort.
    async fn notify(&self, text: &str, channel: Channel);
}

/// Notifier used when no backend is configured; messages only hit the log.
#[derive(Debug, Default)]
pub struct NoneNotifier;

#[async_trait]
impl Notifier for NoneNotifier {
    async fn notify(&self, text: &str, channel: Channel) {
        debug!(?channel, "Notification (no backend): {}", text);
    }
}
