use chrono::{DateTime, Utc};

/// Delivery status of a recipient row.
///
/// Stored as text: `"pending"` or `"sent_<provider>"`. Values written by
/// other tools are preserved as [`DeliveryStatus::Other`] and never
/// considered eligible for sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Not yet contacted; eligible for the next run.
    Pending,
    /// Sent successfully through the named provider.
    Sent { provider: String },
    /// Unrecognized status value, kept verbatim.
    Other(String),
}

impl DeliveryStatus {
    pub fn sent(provider: impl Into<String>) -> Self {
        Self::Sent {
            provider: provider.into(),
        }
    }

    /// Text encoding used in the store.
    pub fn as_db_value(&self) -> String {
        match self {
            DeliveryStatus::Pending => "pending".to_string(),
            DeliveryStatus::Sent { provider } => format!("sent_{}", provider),
            DeliveryStatus::Other(value) => value.clone(),
        }
    }

    /// Parse the text encoding back into a status.
    pub fn from_db_value(value: &str) -> Self {
        if value == "pending" {
            DeliveryStatus::Pending
        } else if let Some(provider) = value.strip_prefix("sent_") {
            DeliveryStatus::Sent {
                provider: provider.to_string(),
            }
        } else {
            DeliveryStatus::Other(value.to_string())
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, DeliveryStatus::Pending)
    }
}

/// One row of the recipient table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientRecord {
    /// Email address; the recipient's identity for deduplication.
    pub email: String,
    /// Company/contact display name; `None` when the source had no value.
    pub display_name: Option<String>,
    pub municipality: String,
    pub region: String,
    pub status: DeliveryStatus,
    /// Set only on a status transition.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Fields written on a status transition.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: DeliveryStatus,
    pub last_updated: DateTime<Utc>,
}

/// Composite key identifying the row(s) to update. Matching is equality
/// on all fields; the email comparison is case-insensitive.
#[derive(Debug, Clone)]
pub struct MatchKey {
    pub municipality: String,
    pub region: String,
    pub email: String,
}

/// Collapse the source store's "missing name" spellings into a real absence.
///
/// Text exports of the upstream table serialize missing names as an empty
/// string or a NaN literal; all of those mean "no display name". This is
/// the single place that check happens.
pub fn normalize_display_name(raw: Option<String>) -> Option<String> {
    let value = raw?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(trimmed.to_string())
    }
}
