//! STARTTLS SMTP transport (Variant B).

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::debug;

use crate::config::SmtpConfig;

use super::{build_message, Mailer, MailerError, OutgoingEmail};

/// Opens a fresh STARTTLS connection for every send and tears it down on
/// every exit path, success or not. Some providers drop idle
/// authenticated sessions well within this batch's pacing delays, so a
/// pooled connection would be stale by the next recipient anyway.
pub struct StartTlsMailer {
    name: String,
    from: Mailbox,
    config: SmtpConfig,
}

impl StartTlsMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, MailerError> {
        let from: Mailbox = config.from_address().parse()?;
        Ok(Self {
            name: config.name.clone(),
            from,
            config,
        })
    }

    fn connect(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailerError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
                .credentials(Credentials::new(
                    self.config.username.clone(),
                    self.config.password.clone(),
                ));
        if let Some(port) = self.config.port {
            builder = builder.port(port);
        }
        Ok(builder.build())
    }
}

#[async_trait]
impl Mailer for StartTlsMailer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        let message = build_message(&self.from, email)?;

        // The transport lives only for this send; dropping it closes the
        // connection on every exit path, including errors.
        let transport = self.connect()?;

        debug!(provider = %self.name, to = %email.to, "Sending via STARTTLS");
        transport.send(message).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SmtpSecurity;

    fn config() -> SmtpConfig {
        SmtpConfig {
            name: "outlook".to_string(),
            host: "smtp.office365.com".to_string(),
            port: Some(587),
            security: SmtpSecurity::Starttls,
            username: "bot@example.com".to_string(),
            password: "secret".to_string(),
            from: None,
        }
    }

    #[test]
    fn test_new_parses_from() {
        let mailer = StartTlsMailer::new(config()).unwrap();
        assert_eq!(mailer.name(), "outlook");
        assert_eq!(mailer.from.email.to_string(), "bot@example.com");
    }

    #[test]
    fn test_connect_builds_transport() {
        let mailer = StartTlsMailer::new(config()).unwrap();
        assert!(mailer.connect().is_ok());
    }
}
