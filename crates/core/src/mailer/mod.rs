//! Outgoing mail transports.
//!
//! Two SMTP variants share the [`Mailer`] trait: a pooled implicit-TLS
//! relay and a per-send STARTTLS connection. Which one a provider gets is
//! decided by its configured security mode.

mod relay;
mod rotation;
mod starttls;

pub use relay::SmtpRelayMailer;
pub use rotation::MailerRotation;
pub use starttls::StartTlsMailer;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::{header::ContentType, Attachment, Mailbox, Message, MultiPart, SinglePart};
use thiserror::Error;

use crate::config::{SmtpConfig, SmtpSecurity};

/// Mail transport errors
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("unreadable attachment {path}: {source}")]
    Attachment {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("send failed: {0}")]
    Failed(String),

    #[error("no smtp providers configured")]
    NoProviders,
}

/// One email ready to be handed to a transport.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    /// Recipient address, already lower-cased by the orchestrator.
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Files attached to the message, in order. Every path must be
    /// readable at send time or the send fails.
    pub attachments: Vec<PathBuf>,
}

/// Trait for mail transports.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Provider name, recorded in the recipient status on success.
    fn name(&self) -> &str;

    /// Send one email. Errors are per-recipient; the caller decides what
    /// a failure means for the batch.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError>;
}

/// Build mailers for the configured providers, in configuration order.
pub fn build_mailers(configs: &[SmtpConfig]) -> Result<Vec<Arc<dyn Mailer>>, MailerError> {
    configs
        .iter()
        .map(|config| -> Result<Arc<dyn Mailer>, MailerError> {
            match config.security {
                SmtpSecurity::Tls => Ok(Arc::new(SmtpRelayMailer::new(config.clone())?)),
                SmtpSecurity::Starttls => Ok(Arc::new(StartTlsMailer::new(config.clone())?)),
            }
        })
        .collect()
}

/// Assemble the MIME message: plain-text body plus one base64-encoded
/// `Content-Disposition: attachment` part per file.
fn build_message(
    from: &Mailbox,
    email: &OutgoingEmail,
) -> Result<Message, MailerError> {
    let to: Mailbox = email.to.parse()?;

    let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(email.body.clone()));

    for path in &email.attachments {
        let content = std::fs::read(path).map_err(|e| MailerError::Attachment {
            path: path.clone(),
            source: e,
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = ContentType::parse("application/octet-stream")
            .expect("static content type is valid");
        multipart = multipart.singlepart(Attachment::new(filename).body(content, content_type));
    }

    let message = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(&email.subject)
        .multipart(multipart)?;

    Ok(message)
}
