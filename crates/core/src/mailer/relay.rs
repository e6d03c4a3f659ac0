//! Implicit-TLS SMTP relay transport (Variant A).

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::debug;

use crate::config::SmtpConfig;

use super::{build_message, Mailer, MailerError, OutgoingEmail};

/// Pooled relay over a direct TLS connection. The transport is built once
/// with the provider credentials and reused across sends.
pub struct SmtpRelayMailer {
    name: String,
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelayMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, MailerError> {
        let from: Mailbox = config.from_address().parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        if let Some(port) = config.port {
            builder = builder.port(port);
        }

        Ok(Self {
            name: config.name,
            from,
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpRelayMailer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        let message = build_message(&self.from, email)?;

        debug!(provider = %self.name, to = %email.to, "Sending via TLS relay");
        self.transport.send(message).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            name: "gmail".to_string(),
            host: "smtp.gmail.com".to_string(),
            port: None,
            security: crate::config::SmtpSecurity::Tls,
            username: "bot@example.com".to_string(),
            password: "secret".to_string(),
            from: None,
        }
    }

    #[test]
    fn test_new_uses_username_as_from() {
        let mailer = SmtpRelayMailer::new(config()).unwrap();
        assert_eq!(mailer.name(), "gmail");
        assert_eq!(mailer.from.email.to_string(), "bot@example.com");
    }

    #[test]
    fn test_new_with_display_from() {
        let mut cfg = config();
        cfg.from = Some("Sales <sales@example.com>".to_string());
        let mailer = SmtpRelayMailer::new(cfg).unwrap();
        assert_eq!(mailer.from.email.to_string(), "sales@example.com");
    }

    #[test]
    fn test_new_invalid_from_fails() {
        let mut cfg = config();
        cfg.from = Some("not an address".to_string());
        assert!(matches!(
            SmtpRelayMailer::new(cfg),
            Err(MailerError::Address(_))
        ));
    }
}
