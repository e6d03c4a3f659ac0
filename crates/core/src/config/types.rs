use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub campaign: CampaignConfig,
    pub smtp: Vec<SmtpConfig>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
}

/// Campaign configuration: what to send, to whom, and how fast.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CampaignConfig {
    /// Recipient table to read from.
    pub table: String,
    /// Subject line base; the recipient display name is appended when present.
    pub subject: String,
    /// Body text; the salutation line is prepended per recipient.
    pub body: String,
    /// Restrict the run to recipients of this municipality.
    #[serde(default)]
    pub municipality: Option<String>,
    /// Restrict the run to recipients of this region.
    #[serde(default)]
    pub region: Option<String>,
    /// Seed for the randomized per-send delay (seconds).
    #[serde(default = "default_initial_wait")]
    pub initial_wait_secs: f64,
    /// Files attached to every outgoing email, in order.
    #[serde(default)]
    pub attachments: Vec<PathBuf>,
}

fn default_initial_wait() -> f64 {
    1800.0
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("postino.db")
}

/// One SMTP provider. The batch rotates over providers in the order
/// they appear in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Provider name, recorded in the recipient status ("sent_<name>").
    pub name: String,
    /// SMTP server hostname.
    pub host: String,
    /// Port override; when absent the default for the security mode is used.
    #[serde(default)]
    pub port: Option<u16>,
    /// Connection security.
    #[serde(default)]
    pub security: SmtpSecurity,
    pub username: String,
    pub password: String,
    /// Sender mailbox; defaults to the username.
    #[serde(default)]
    pub from: Option<String>,
}

impl SmtpConfig {
    /// Sender address used in the From header.
    pub fn from_address(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }
}

/// SMTP connection security
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SmtpSecurity {
    /// Direct TLS connection (typically port 465).
    #[default]
    Tls,
    /// STARTTLS upgrade (typically port 587).
    Starttls,
}

/// Telegram notifier configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Chat receiving per-recipient success messages.
    pub success_chat_id: String,
    /// Chat receiving failures and the final run outcome.
    pub warning_chat_id: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_telegram_timeout")]
    pub timeout_secs: u32,
}

fn default_telegram_timeout() -> u32 {
    10
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub campaign: CampaignConfig,
    pub smtp: Vec<SanitizedSmtpConfig>,
    pub database: DatabaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<SanitizedTelegramConfig>,
}

/// Sanitized SMTP provider (password hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSmtpConfig {
    pub name: String,
    pub host: String,
    pub username: String,
    pub password_configured: bool,
}

/// Sanitized Telegram config (bot token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTelegramConfig {
    pub bot_token_configured: bool,
    pub success_chat_id: String,
    pub warning_chat_id: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            campaign: config.campaign.clone(),
            smtp: config
                .smtp
                .iter()
                .map(|s| SanitizedSmtpConfig {
                    name: s.name.clone(),
                    host: s.host.clone(),
                    username: s.username.clone(),
                    password_configured: !s.password.is_empty(),
                })
                .collect(),
            database: config.database.clone(),
            telegram: config.telegram.as_ref().map(|t| SanitizedTelegramConfig {
                bot_token_configured: !t.bot_token.is_empty(),
                success_chat_id: t.success_chat_id.clone(),
                warning_chat_id: t.warning_chat_id.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_toml() -> &'static str {
        r#"
[campaign]
table = "companies"
subject = "Services proposal"
body = "We offer IT services."

[[smtp]]
name = "gmail"
host = "smtp.gmail.com"
username = "bot@example.com"
password = "secret"
"#
    }

    #[test]
    fn test_deserialize_minimal_config() {
        let config: Config = toml::from_str(minimal_toml()).unwrap();
        assert_eq!(config.campaign.table, "companies");
        assert_eq!(config.campaign.initial_wait_secs, 1800.0);
        assert!(config.campaign.municipality.is_none());
        assert!(config.campaign.attachments.is_empty());
        assert_eq!(config.smtp.len(), 1);
        assert_eq!(config.smtp[0].security, SmtpSecurity::Tls);
        assert!(config.smtp[0].port.is_none());
        assert!(config.telegram.is_none());
    }

    #[test]
    fn test_deserialize_missing_campaign_fails() {
        let toml = r#"
[[smtp]]
name = "gmail"
host = "smtp.gmail.com"
username = "u"
password = "p"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_two_providers() {
        let toml = r#"
[campaign]
table = "companies"
subject = "Hello"
body = "Body"
municipality = "Sao Paulo"
region = "SP"
initial_wait_secs = 60.0
attachments = ["brochure.pdf"]

[[smtp]]
name = "gmail"
host = "smtp.gmail.com"
username = "a@example.com"
password = "p1"

[[smtp]]
name = "outlook"
host = "smtp.office365.com"
port = 587
security = "starttls"
username = "b@example.com"
password = "p2"
from = "Sales <b@example.com>"

[telegram]
bot_token = "123:abc"
success_chat_id = "-100"
warning_chat_id = "-200"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.smtp.len(), 2);
        assert_eq!(config.smtp[1].security, SmtpSecurity::Starttls);
        assert_eq!(config.smtp[1].port, Some(587));
        assert_eq!(config.smtp[1].from_address(), "Sales <b@example.com>");
        assert_eq!(config.smtp[0].from_address(), "a@example.com");
        assert_eq!(config.campaign.municipality.as_deref(), Some("Sao Paulo"));
        let telegram = config.telegram.unwrap();
        assert_eq!(telegram.timeout_secs, 10);
    }

    #[test]
    fn test_default_database_path() {
        let config: Config = toml::from_str(minimal_toml()).unwrap();
        assert_eq!(config.database.path.to_str().unwrap(), "postino.db");
    }

    #[test]
    fn test_sanitized_config() {
        let mut config: Config = toml::from_str(minimal_toml()).unwrap();
        config.telegram = Some(TelegramConfig {
            bot_token: "123:abc".to_string(),
            success_chat_id: "-100".to_string(),
            warning_chat_id: "-200".to_string(),
            timeout_secs: 10,
        });

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.smtp[0].password_configured);
        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("123:abc"));
    }
}
