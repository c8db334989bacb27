//! The order & menu data layer.
//!
//! All state lives in the injected [`KvStore`]; the services here only hold
//! handles to it. Multi-step operations are sequences of independent writes,
//! serialized per key within the process by [`KeyLocks`].

mod locks;
mod menu;
mod orders;
mod restaurants;
mod stats;

use std::sync::Arc;

pub use locks::KeyLocks;
pub use menu::{MAX_BULK_ITEMS, Menu};
pub use orders::{MAX_ITEM_QTY, Orders};
pub use restaurants::Restaurants;
pub use stats::Stats;

use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::store::KvStore;

/// Core bundles the services over one store.
#[derive(Clone)]
pub struct Core {
    pub restaurants: Restaurants,
    pub menu: Menu,
    pub orders: Orders,
    pub stats: Stats,
}

impl Core {
    pub fn new(store: Arc<dyn KvStore>, notifier: Arc<dyn Notifier>) -> Self {
        let locks = Arc::new(KeyLocks::new());
        let restaurants = Restaurants::new(store.clone(), locks.clone());
        let stats = Stats::new(store.clone(), locks.clone());
        let menu = Menu::new(store.clone(), locks.clone(), restaurants.clone());
        let orders = Orders::new(store, locks, restaurants.clone(), stats.clone(), notifier);

        Self {
            restaurants,
            menu,
            orders,
            stats,
        }
    }
}

/// Largest single money amount accepted as a price, fee or minimum order.
pub const MAX_AMOUNT: f64 = 100_000.0;

/// Accepts finite, non-negative money amounts up to [`MAX_AMOUNT`].
fn validate_amount(field: &str, amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::invalid(format!(
            "{field} must be a non-negative number"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(Error::invalid(format!(
            "{field} must not exceed {MAX_AMOUNT:.2}"
        )));
    }
    Ok(amount)
}

/// Rejects derived money values (sums, products) that left the finite range.
/// JSON has no representation for them and a stored `inf` would not read back.
fn ensure_finite(field: &str, amount: f64) -> Result<f64> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(Error::invalid(format!("{field} is out of range")))
    }
}
