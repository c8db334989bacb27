use std::sync::Arc;

use chrono::NaiveDate;

use super::{KeyLocks, ensure_finite};
use crate::error::Result;
use crate::store::{KvJsonExt, KvStore, PutOptions, STATS_TTL, keys};
use crate::types::DailyStats;
use crate::util::{round_money, today};

/// Stats keeps one order-intake counter per restaurant per UTC day.
///
/// Buckets only grow: an order counts once when it is created and is never
/// taken back, even if it is later rejected.
#[derive(Clone)]
pub struct Stats {
    store: Arc<dyn KvStore>,
    locks: Arc<KeyLocks>,
}

impl Stats {
    pub fn new(store: Arc<dyn KvStore>, locks: Arc<KeyLocks>) -> Self {
        Self { store, locks }
    }

    /// Counts one order of `order_total` in today's bucket.
    pub fn record_order(&self, slug: &str, order_total: f64) -> Result<DailyStats> {
        self.record_order_on(slug, today(), order_total)
    }

    pub fn record_order_on(
        &self,
        slug: &str,
        date: NaiveDate,
        order_total: f64,
    ) -> Result<DailyStats> {
        let key = keys::stats(slug, &date.to_string());
        self.locks.with(&key, || {
            let mut stats = self
                .store
                .get_json(&key)?
                .unwrap_or_else(|| DailyStats::empty(date));
            stats.revenue = ensure_finite("Revenue", round_money(stats.revenue + order_total))?;
            stats.orders += 1;
            self.store
                .put_json(&key, &stats, PutOptions::ttl(STATS_TTL))?;
            Ok(stats)
        })
    }

    pub fn today(&self, slug: &str) -> Result<DailyStats> {
        self.get_day(slug, today())
    }

    /// The bucket for `date`, zero-valued if nothing was recorded.
    pub fn get_day(&self, slug: &str, date: NaiveDate) -> Result<DailyStats> {
        Ok(self
            .store
            .get_json(&keys::stats(slug, &date.to_string()))?
            .unwrap_or_else(|| DailyStats::empty(date)))
    }
}
