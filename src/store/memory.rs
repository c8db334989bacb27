use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{KvStore, PutOptions};
use crate::error::Result;

struct Entry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// In-process store, used by tests and for ephemeral deployments.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Expiry of a live key. `None` if the key is absent, expired or has no TTL.
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let now = Utc::now();
        self.entries()
            .get(key)
            .filter(|e| e.is_live(now))
            .and_then(|e| e.expires_at)
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries().values().filter(|e| e.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Utc::now();
        Ok(self
            .entries()
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    fn put(&self, key: &str, value: &str, opts: PutOptions) -> Result<()> {
        let expires_at = opts
            .ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .map(|ttl| Utc::now() + ttl);

        self.entries().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let now = Utc::now();
        Ok(self
            .entries()
            .remove(key)
            .is_some_and(|e| e.is_live(now)))
    }

    fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        Ok(before - entries.len())
    }
}
