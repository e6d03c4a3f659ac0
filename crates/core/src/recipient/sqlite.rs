//! SQLite-backed recipient store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::{
    normalize_display_name, DeliveryStatus, MatchKey, RecipientRecord, RecipientStore, StoreError,
    StatusUpdate,
};

/// SQLite-backed recipient store.
///
/// The table name is part of the public contract (campaigns run against
/// different tables of the same database), so it is validated and spliced
/// into the SQL rather than bound as a parameter.
pub struct SqliteRecipientStore {
    conn: Mutex<Connection>,
}

impl SqliteRecipientStore {
    /// Open (or create) a database file.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create the recipient table if it does not exist.
    pub fn ensure_table(&self, table: &str) -> Result<(), StoreError> {
        let table = validated_table_name(table)?;
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{table}" (
                email TEXT NOT NULL,
                display_name TEXT,
                municipality TEXT NOT NULL DEFAULT '',
                region TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'pending',
                last_updated TEXT
            );

            CREATE INDEX IF NOT EXISTS "idx_{table}_status" ON "{table}"(status);
            "#
        ))
        .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Insert a row. Used for seeding campaigns and in tests; the batch
    /// itself never inserts.
    pub fn insert(&self, table: &str, record: &RecipientRecord) -> Result<(), StoreError> {
        let table = validated_table_name(table)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!(
                r#"INSERT INTO "{table}" (email, display_name, municipality, region, status, last_updated) VALUES (?, ?, ?, ?, ?, ?)"#
            ),
            params![
                record.email,
                record.display_name,
                record.municipality,
                record.region,
                record.status.as_db_value(),
                record.last_updated.map(|t| t.to_rfc3339()),
            ],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<RecipientRecord> {
        let email: String = row.get(0)?;
        let display_name: Option<String> = row.get(1)?;
        let municipality: String = row.get(2)?;
        let region: String = row.get(3)?;
        let status: String = row.get(4)?;
        let last_updated: Option<String> = row.get(5)?;

        Ok(RecipientRecord {
            email,
            display_name: normalize_display_name(display_name),
            municipality,
            region,
            status: DeliveryStatus::from_db_value(&status),
            last_updated: last_updated.and_then(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
            }),
        })
    }
}

impl RecipientStore for SqliteRecipientStore {
    fn fetch(&self, table: &str) -> Result<Vec<RecipientRecord>, StoreError> {
        let table = validated_table_name(table)?;
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(&format!(
                r#"SELECT email, display_name, municipality, region, status, last_updated FROM "{table}""#
            ))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_record)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row_result in rows {
            records.push(row_result.map_err(|e| StoreError::Database(e.to_string()))?);
        }

        Ok(records)
    }

    fn update(
        &self,
        table: &str,
        set: &StatusUpdate,
        matching: &MatchKey,
    ) -> Result<bool, StoreError> {
        let table = validated_table_name(table)?;
        let conn = self.conn.lock().unwrap();

        let affected = conn
            .execute(
                &format!(
                    r#"UPDATE "{table}" SET status = ?, last_updated = ? WHERE municipality = ? AND region = ? AND LOWER(email) = LOWER(?)"#
                ),
                params![
                    set.status.as_db_value(),
                    set.last_updated.to_rfc3339(),
                    matching.municipality,
                    matching.region,
                    matching.email,
                ],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(affected > 0)
    }
}

/// Reject table names that are not plain identifiers; they are spliced
/// into SQL text.
fn validated_table_name(table: &str) -> Result<&str, StoreError> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(table)
    } else {
        Err(StoreError::InvalidTable(table.to_string()))
    }
}
