use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Campaign table name is not empty
/// - Initial wait is not negative
/// - At least one SMTP provider with unique, non-empty names
/// - Attachment paths exist on disk
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.campaign.table.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "campaign.table cannot be empty".to_string(),
        ));
    }

    if config.campaign.initial_wait_secs < 0.0 {
        return Err(ConfigError::ValidationError(
            "campaign.initial_wait_secs cannot be negative".to_string(),
        ));
    }

    if config.smtp.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one [[smtp]] provider is required".to_string(),
        ));
    }

    let mut names = std::collections::HashSet::new();
    for provider in &config.smtp {
        if provider.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "smtp.name cannot be empty".to_string(),
            ));
        }
        if !names.insert(provider.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate smtp provider name: {}",
                provider.name
            )));
        }
    }

    // Attachments are resolved before the run; a missing file here would
    // fail every single send.
    for path in &config.campaign.attachments {
        if !path.exists() {
            return Err(ConfigError::ValidationError(format!(
                "attachment not found: {}",
                path.display()
            )));
        }
    }

    Ok(())
}
