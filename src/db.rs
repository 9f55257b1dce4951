use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Error;

/// Storage key for the user profile record.
pub const USER_DATA_KEY: &str = "userData";


/// Key-to-JSON persistence over the device-local SQLite database.
///
/// This is the on-device equivalent of a mobile key-value store: a single
/// `records` table mapping string keys to serialized JSON snapshots. The
/// connection sits behind an async mutex so the store can be cloned into
/// every manager that needs it.
#[derive(Debug, Clone)]
pub struct RecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl RecordStore {
    // Open (or create) the backing database file
    pub fn open(db_path: &str) -> Result<Self, Error> {
        let conn = Connection::open(db_path)?;
        debug!("record store opened at: {}", db_path);
        Ok(RecordStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // Create the key-value schema
    pub async fn create_schema(&self) -> Result<(), Error> {
        let conn = self.conn.lock().await;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Fetches and deserializes the record stored under `key`.
    ///
    /// A missing key is `Ok(None)`, never an error; only storage-layer
    /// failures and unreadable stored JSON are reported as errors.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        let conn = self.conn.lock().await;
        let raw = match conn.query_row(
            "SELECT value FROM records WHERE key = ?1",
            [key],
            |row| row.get::<_, String>(0),
        ) {
            Ok(raw) => raw,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Serializes `value` and stores it under `key`, replacing any
    /// previous snapshot.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), Error> {
        let raw = serde_json::to_string(value)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO records (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, raw],
        )?;
        debug!("record saved under key: {}", key);
        Ok(())
    }
}
