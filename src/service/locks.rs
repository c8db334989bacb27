use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// KeyLocks gives each store key a single writer within this process.
///
/// Every read-modify-write of a restaurant's menu, active orders or stats
/// bucket runs inside [`KeyLocks::with`] for that key, so concurrent requests
/// in one process cannot lose each other's updates. Writers in other
/// processes sharing the same store are not covered.
#[derive(Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs `f` while holding the lock for `key`.
    pub fn with<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let lock = Arc::clone(self.table().entry(key.to_string()).or_default());

        let result = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            f()
        };

        let mut table = self.table();
        // Only the table and this call hold it: nobody else is waiting.
        if Arc::strong_count(&lock) == 2 {
            table.remove(key);
        }
        result
    }

    /// Number of keys currently locked or waited on.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_serializes_read_modify_write() {
        let locks = Arc::new(KeyLocks::new());
        let counter = Arc::new(Mutex::new(0u32));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..100 {
                        locks.with("restaurant:cafe-x:orders", || {
                            let current = *counter.lock().unwrap();
                            thread::yield_now();
                            *counter.lock().unwrap() = current + 1;
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(*counter.lock().unwrap(), 800);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_distinct_keys_do_not_block_each_other() {
        let locks = KeyLocks::new();
        let value = locks.with("a", || locks.with("b", || 42));
        assert_eq!(value, 42);
        assert!(locks.is_empty());
    }
}
