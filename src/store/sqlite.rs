use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use super::schema::SCHEMA;
use super::{KvStore, PutOptions};
use crate::error::Result;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens the database at `db_path` and creates the schema if needed.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let store = Self::new(db_path)?;
        store.initialize()?;
        Ok(store)
    }

    pub fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn();
        let row: Option<(String, Option<i64>)> = conn
            .query_row(
                "SELECT value, expires_at FROM kv WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((_, Some(expires_at))) if expires_at <= now_millis() => {
                tracing::debug!("Dropping expired key {key}");
                conn.execute(
                    "DELETE FROM kv WHERE key = ?1 AND expires_at = ?2",
                    params![key, expires_at],
                )?;
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: &str, opts: PutOptions) -> Result<()> {
        let expires_at = opts
            .ttl
            .map(|ttl| now_millis().saturating_add(ttl.as_millis() as i64));

        self.conn().execute(
            "INSERT INTO kv (key, value, expires_at, updated_at)
             VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                expires_at = excluded.expires_at,
                updated_at = excluded.updated_at",
            params![key, value, expires_at],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM kv WHERE key = ?1 AND (expires_at IS NULL OR expires_at > ?2)",
            params![key, now_millis()],
        )?;
        Ok(rows > 0)
    }

    fn purge_expired(&self) -> Result<usize> {
        let rows = self.conn().execute(
            "DELETE FROM kv WHERE expires_at IS NOT NULL AND expires_at <= ?1",
            params![now_millis()],
        )?;
        Ok(rows)
    }
}
