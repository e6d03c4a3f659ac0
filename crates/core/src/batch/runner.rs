//! Batch runner implementation.
//!
//! Drives one outreach run end to end:
//! - Selection: snapshot the store, build the Working Set
//! - Loop: compose, rotate provider, send, record, pace - one recipient
//!   at a time, in order
//! - Reporting: per-recipient outcomes to the operator channels
//!
//! A failed send affects exactly one recipient; only structural failures
//! (fetch error, empty Working Set) abort the run. Two concurrent runs
//! against the same store can double-send: nothing claims a row before
//! sending, the snapshot is the only selection step.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::composer::MessageComposer;
use crate::mailer::{MailerRotation, OutgoingEmail};
use crate::notifier::{Channel, Notifier};
use crate::recipient::{DeliveryStatus, MatchKey, RecipientRecord, RecipientStore, StatusUpdate};

use super::config::BatchConfig;
use super::pacing::Pacing;
use super::selection::build_working_set;
use super::types::{BatchError, RunReport};

/// The batch runner - sends one campaign run to completion.
pub struct BatchRunner {
    config: BatchConfig,
    store: Arc<dyn RecipientStore>,
    rotation: MailerRotation,
    composer: MessageComposer,
    notifier: Arc<dyn Notifier>,
}

impl BatchRunner {
    pub fn new(
        config: BatchConfig,
        store: Arc<dyn RecipientStore>,
        rotation: MailerRotation,
        composer: MessageComposer,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            store,
            rotation,
            composer,
            notifier,
        }
    }

    /// Run the batch to completion.
    ///
    /// Returns `true` only if the Working Set was non-empty and the loop
    /// ran to completion. Individual send failures do not fail the run.
    pub async fn run(&self) -> bool {
        match self.run_inner().await {
            Ok(report) => {
                info!(
                    total = report.total,
                    succeeded = report.succeeded,
                    failed = report.failed,
                    "Batch run complete"
                );
                true
            }
            Err(BatchError::EmptyWorkingSet) => {
                warn!(
                    table = %self.config.table,
                    "No pending recipients for the given filters"
                );
                self.notifier
                    .notify("No data found for this run", Channel::Warning)
                    .await;
                false
            }
            Err(e) => {
                error!(error = %e, "Batch run aborted");
                false
            }
        }
    }

    async fn run_inner(&self) -> Result<RunReport, BatchError> {
        info!(table = %self.config.table, "Fetching recipients");
        let rows = self.store.fetch(&self.config.table)?;

        let working_set = build_working_set(
            rows,
            self.config.municipality.as_deref(),
            self.config.region.as_deref(),
        );
        if working_set.is_empty() {
            return Err(BatchError::EmptyWorkingSet);
        }

        let total = working_set.len();
        info!(total, "Starting sends");

        let mut report = RunReport {
            total,
            ..Default::default()
        };
        let mut pacing = Pacing::new(self.config.initial_wait_secs);

        for (position, recipient) in working_set.iter().enumerate() {
            info!("Step {} of {}", position + 1, total);

            // The new wait applies to the sleep after this send. The rng
            // handle must not live across an await point.
            let wait_secs = pacing.advance(&mut rand::thread_rng());

            if self.send_one(position, recipient).await {
                report.succeeded += 1;
            } else {
                report.failed += 1;
            }

            if position + 1 < total {
                info!(
                    "Waiting {:.2} minutes before the next send",
                    wait_secs / 60.0
                );
                tokio::time::sleep(pacing.as_duration()).await;
            }
        }

        Ok(report)
    }

    /// Send to one recipient and record the outcome. Returns whether the
    /// send succeeded; every failure path stays inside this method.
    async fn send_one(&self, position: usize, recipient: &RecipientRecord) -> bool {
        let mailer = self.rotation.for_position(position);
        let provider = mailer.name();

        let email = OutgoingEmail {
            // Case-duplicate store rows must not become distinct sends.
            to: recipient.email.to_lowercase(),
            subject: self.composer.subject(recipient.display_name.as_deref()),
            body: self.composer.body(recipient.display_name.as_deref()),
            attachments: self.config.attachments.clone(),
        };

        match mailer.send(&email).await {
            Ok(()) => {
                info!(provider, to = %email.to, "Email sent");
                self.notifier
                    .notify(
                        &format!("Sent via {}: {}", provider, email.to),
                        Channel::Success,
                    )
                    .await;
                self.record_sent(provider, recipient, &email.to).await;
                true
            }
            Err(e) => {
                warn!(provider, to = %email.to, error = %e, "Send failed");
                self.notifier
                    .notify(
                        &format!("Failed via {}: {}", provider, email.to),
                        Channel::Warning,
                    )
                    .await;
                false
            }
        }
    }

    /// Persist the `pending -> sent_<provider>` transition. Update
    /// failures are reported but never abort the batch; the recipient
    /// ends up sent-but-marked-pending, surfaced for manual
    /// reconciliation.
    async fn record_sent(&self, provider: &str, recipient: &RecipientRecord, to: &str) {
        let update = StatusUpdate {
            status: DeliveryStatus::sent(provider),
            last_updated: Utc::now(),
        };
        let key = MatchKey {
            municipality: recipient.municipality.clone(),
            region: recipient.region.clone(),
            email: to.to_string(),
        };

        match self.store.update(&self.config.table, &update, &key) {
            Ok(true) => debug!(to, "Recipient row updated"),
            Ok(false) => {
                warn!(to, "No recipient row matched the update key");
                self.notifier
                    .notify(
                        &format!("Sent but no row updated for {}", to),
                        Channel::Warning,
                    )
                    .await;
            }
            Err(e) => {
                warn!(to, error = %e, "Failed to update recipient row");
                self.notifier
                    .notify(
                        &format!("Sent but failed to record {}: {}", to, e),
                        Channel::Warning,
                    )
                    .await;
            }
        }
    }
}
