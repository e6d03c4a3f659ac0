//! Types for the batch orchestrator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural failures that abort a run.
///
/// Per-recipient send and persistence failures never appear here; they
/// are absorbed by the loop and reported out-of-band.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Fetching the recipient snapshot failed; batch-fatal.
    #[error("recipient store error: {0}")]
    Store(#[from] crate::recipient::StoreError),

    /// Nothing to send for the given table and filters.
    #[error("no eligible recipients")]
    EmptyWorkingSet,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Size of the Working Set.
    pub total: usize,
    /// Recipients whose send succeeded.
    pub succeeded: usize,
    /// Recipients whose send failed (left pending for a later run).
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BatchError::EmptyWorkingSet;
        assert_eq!(err.to_string(), "no eligible recipients");
    }

    #[test]
    fn test_report_serialization() {
        let report = RunReport {
            total: 10,
            succeeded: 8,
            failed: 2,
        };
        let json = serde_json::to_string(&report).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total, 10);
        assert_eq!(parsed.succeeded, 8);
        assert_eq!(parsed.failed, 2);
    }
}
