//! Mock recipient store for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::recipient::{MatchKey, RecipientRecord, RecipientStore, StatusUpdate, StoreError};

/// A recorded update for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedUpdate {
    pub table: String,
    pub set: StatusUpdate,
    pub matching: MatchKey,
}

/// Mock implementation of the [`RecipientStore`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configured rows from `fetch`
/// - Record every `update` call for assertions
/// - Simulate fetch and update failures, or updates that match no row
pub struct MockRecipientStore {
    rows: Mutex<Vec<RecipientRecord>>,
    updates: Mutex<Vec<RecordedUpdate>>,
    fail_next_fetch: AtomicBool,
    fail_updates: AtomicBool,
    update_matches: AtomicBool,
}

impl MockRecipientStore {
    pub fn new() -> Self {
        Self::with_rows(vec![])
    }

    /// Create a store whose `fetch` returns the given rows.
    pub fn with_rows(rows: Vec<RecipientRecord>) -> Self {
        Self {
            rows: Mutex::new(rows),
            updates: Mutex::new(Vec::new()),
            fail_next_fetch: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
            update_matches: AtomicBool::new(true),
        }
    }

    /// Make the next `fetch` call fail.
    pub fn fail_next_fetch(&self) {
        self.fail_next_fetch.store(true, Ordering::SeqCst);
    }

    /// Make every `update` call fail.
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    /// Control whether `update` reports a matched row.
    pub fn set_update_matches(&self, matches: bool) {
        self.update_matches.store(matches, Ordering::SeqCst);
    }

    /// All updates recorded so far, in call order.
    pub fn recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

impl Default for MockRecipientStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipientStore for MockRecipientStore {
    fn fetch(&self, _table: &str) -> Result<Vec<RecipientRecord>, StoreError> {
        if self.fail_next_fetch.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Database("mock fetch failure".to_string()));
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    fn update(
        &self,
        table: &str,
        set: &StatusUpdate,
        matching: &MatchKey,
    ) -> Result<bool, StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Database("mock update failure".to_string()));
        }
        self.updates.lock().unwrap().push(RecordedUpdate {
            table: table.to_string(),
            set: set.clone(),
            matching: matching.clone(),
        });
        Ok(self.update_matches.load(Ordering::SeqCst))
    }
}
