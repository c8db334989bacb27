pub mod keys;
mod memory;
mod schema;
mod sqlite;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;

/// Full records of individual orders are retained for 7 days.
pub const ORDER_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Daily stats buckets are retained for 90 days.
pub const STATS_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 90);

#[derive(Debug, Clone, Copy, Default)]
pub struct PutOptions {
    /// Lifetime after which the value may be purged. `None` keeps it forever.
    pub ttl: Option<Duration>,
}

impl PutOptions {
    #[must_use]
    pub const fn ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }
}

/// KvStore is a single-value-per-key store with optional expiry.
///
/// There is no cross-key atomicity and no compare-and-swap: callers that need
/// read-modify-write consistency serialize themselves (see `service::KeyLocks`).
pub trait KvStore: Send + Sync {
    /// Returns the raw value at `key`, or `None` if it is absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` at `key`, replacing any previous value and its expiry.
    fn put(&self, key: &str, value: &str, opts: PutOptions) -> Result<()>;

    /// Removes `key`. Returns whether a live value was removed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Physically removes every expired entry. Returns how many were removed.
    fn purge_expired(&self) -> Result<usize>;
}

/// JSON helpers available on every store.
pub trait KvJsonExt {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>;
    fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T, opts: PutOptions)
    -> Result<()>;

    /// Reads a collection value. An absent key is an empty collection.
    fn get_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.get_json(key)?.unwrap_or_default())
    }
}

impl<S: KvStore + ?Sized> KvJsonExt for S {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn put_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        opts: PutOptions,
    ) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.put(key, &raw, opts)
    }
}
