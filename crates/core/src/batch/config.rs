//! Batch configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::CampaignConfig;

/// Configuration for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Recipient table to read from.
    pub table: String,

    /// Keep only recipients of this municipality (equality; None = all).
    #[serde(default)]
    pub municipality: Option<String>,

    /// Keep only recipients of this region (equality; None = all).
    #[serde(default)]
    pub region: Option<String>,

    /// Seed for the randomized per-send delay (seconds).
    /// The delay is perturbed multiplicatively after every send and is
    /// never reset to this value.
    #[serde(default = "default_initial_wait")]
    pub initial_wait_secs: f64,

    /// Files attached to every outgoing email.
    #[serde(default)]
    pub attachments: Vec<PathBuf>,
}

fn default_initial_wait() -> f64 {
    1800.0
}

impl From<&CampaignConfig> for BatchConfig {
    fn from(campaign: &CampaignConfig) -> Self {
        Self {
            table: campaign.table.clone(),
            municipality: campaign.municipality.clone(),
            region: campaign.region.clone(),
            initial_wait_secs: campaign.initial_wait_secs,
            attachments: campaign.attachments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let toml = r#"
            table = "companies"
        "#;
        let config: BatchConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.table, "companies");
        assert_eq!(config.initial_wait_secs, 1800.0);
        assert!(config.municipality.is_none());
        assert!(config.attachments.is_empty());
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            table = "companies"
            municipality = "Springfield"
            region = "OR"
            initial_wait_secs = 90.0
            attachments = ["brochure.pdf"]
        "#;
        let config: BatchConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.municipality.as_deref(), Some("Springfield"));
        assert_eq!(config.region.as_deref(), Some("OR"));
        assert_eq!(config.initial_wait_secs, 90.0);
        assert_eq!(config.attachments.len(), 1);
    }

    #[test]
    fn test_from_campaign_config() {
        let campaign = crate::config::load_config_from_str(
            r#"
[campaign]
table = "companies"
subject = "s"
body = "b"
region = "SP"

[[smtp]]
name = "gmail"
host = "smtp.gmail.com"
username = "u"
password = "p"
"#,
        )
        .unwrap()
        .campaign;

        let config = BatchConfig::from(&campaign);
        assert_eq!(config.table, "companies");
        assert_eq!(config.region.as_deref(), Some("SP"));
    }
}
