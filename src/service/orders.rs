use std::sync::Arc;

use super::{KeyLocks, Restaurants, Stats, ensure_finite, validate_amount};
use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::store::{KvJsonExt, KvStore, ORDER_TTL, PutOptions, keys};
use crate::types::{
    NotificationEvent, Order, OrderDraft, OrderItem, OrderStatus, OrderType, Restaurant,
};
use crate::util::{now, round_money, uid};

/// Largest quantity accepted on one order line.
pub const MAX_ITEM_QTY: u32 = 999;

/// Orders owns the order lifecycle.
///
/// Each order has one full record at `restaurant:{slug}:order:{id}`, kept for
/// [`ORDER_TTL`] after its last write. The restaurant's active list is an index
/// over the records in `new`, `accepted` or `ready`, most recent first. On
/// every transition the record is written first and the index entry is then
/// rebuilt from it, or dropped once the order is terminal.
#[derive(Clone)]
pub struct Orders {
    store: Arc<dyn KvStore>,
    locks: Arc<KeyLocks>,
    restaurants: Restaurants,
    stats: Stats,
    notifier: Arc<dyn Notifier>,
}

impl Orders {
    pub fn new(
        store: Arc<dyn KvStore>,
        locks: Arc<KeyLocks>,
        restaurants: Restaurants,
        stats: Stats,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            locks,
            restaurants,
            stats,
            notifier,
        }
    }

    /// Places a new order. Totals are computed here from item prices and
    /// quantities; the delivery fee comes from the restaurant's settings.
    pub fn create(&self, slug: &str, draft: OrderDraft) -> Result<Order> {
        let restaurant = self.restaurants.require(slug)?;
        let order = build_order(&restaurant, draft)?;

        let key = keys::active_orders(slug);
        self.locks.with(&key, || {
            self.store.put_json(
                &keys::order(slug, &order.id),
                &order,
                PutOptions::ttl(ORDER_TTL),
            )?;

            let mut active: Vec<Order> = self.store.get_list(&key)?;
            active.insert(0, order.clone());
            self.store.put_json(&key, &active, PutOptions::default())?;

            self.stats.record_order(slug, order.total)
        })?;

        tracing::info!(
            "Order {} placed at {slug}: {} item(s), total {:.2}",
            order.id,
            order.items.len(),
            order.total
        );
        self.notifier
            .notify(NotificationEvent::OrderReceived, &order, &restaurant);
        Ok(order)
    }

    /// Orders in a non-terminal state, most recent first.
    pub fn list_active(&self, slug: &str) -> Result<Vec<Order>> {
        self.store.get_list(&keys::active_orders(slug))
    }

    /// The full record of an order, active or not, until its retention expires.
    pub fn get(&self, slug: &str, order_id: &str) -> Result<Option<Order>> {
        self.store.get_json(&keys::order(slug, order_id))
    }

    /// Moves an active order to `next`.
    ///
    /// Fails with `NotFound` if the order is not active and with
    /// `InvalidTransition` if `next` is not a legal successor of its status.
    pub fn transition(&self, slug: &str, order_id: &str, next: OrderStatus) -> Result<Order> {
        let key = keys::active_orders(slug);
        let order = self.locks.with(&key, || {
            let mut active: Vec<Order> = self.store.get_list(&key)?;
            let idx = active
                .iter()
                .position(|o| o.id == order_id)
                .ok_or_else(|| Error::not_found("Order"))?;

            let record_key = keys::order(slug, order_id);
            let mut order = match self.store.get_json::<Order>(&record_key)? {
                Some(record) => record,
                None => {
                    tracing::warn!("Order {order_id} of {slug} has no record, using index entry");
                    active[idx].clone()
                }
            };

            if !order.status.can_transition_to(next) {
                return Err(Error::InvalidTransition {
                    from: order.status,
                    to: next,
                });
            }

            order.status = next;
            order.updated_at = Some(now());
            self.store
                .put_json(&record_key, &order, PutOptions::ttl(ORDER_TTL))?;

            if next.is_terminal() {
                active.remove(idx);
            } else {
                active[idx] = order.clone();
            }
            self.store.put_json(&key, &active, PutOptions::default())?;
            Ok(order)
        })?;

        tracing::info!("Order {order_id} of {slug} is now {next}");
        match self.restaurants.get(slug) {
            Ok(Some(restaurant)) => {
                self.notifier
                    .notify(NotificationEvent::for_status(next), &order, &restaurant);
            }
            Ok(None) => tracing::warn!("Restaurant {slug} vanished, skipping notification"),
            Err(e) => tracing::warn!("Failed to load {slug} for notification: {e}"),
        }
        Ok(order)
    }
}

fn build_order(restaurant: &Restaurant, draft: OrderDraft) -> Result<Order> {
    if draft.items.is_empty() {
        return Err(Error::invalid("No items in order"));
    }
    if draft.customer_name.trim().is_empty() || draft.customer_phone.trim().is_empty() {
        return Err(Error::invalid("Name and phone number are required"));
    }
    if !restaurant.order_types.contains(&draft.order_type) {
        return Err(Error::invalid(format!(
            "{} orders are not available",
            match draft.order_type {
                OrderType::Collection => "Collection",
                OrderType::Delivery => "Delivery",
            }
        )));
    }

    let items = draft
        .items
        .into_iter()
        .map(|item| {
            if item.qty == 0 || item.qty > MAX_ITEM_QTY {
                return Err(Error::invalid(format!(
                    "Item quantity must be between 1 and {MAX_ITEM_QTY}"
                )));
            }
            let price = validate_amount("Item price", item.price)?;
            Ok(OrderItem {
                id: item.id,
                name: item.name,
                price: round_money(price),
                qty: item.qty,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let subtotal = ensure_finite(
        "Subtotal",
        round_money(
            items
                .iter()
                .map(|item| item.price * f64::from(item.qty))
                .sum(),
        ),
    )?;
    if subtotal < restaurant.min_order {
        return Err(Error::invalid(format!(
            "Minimum order is {}{:.2}",
            restaurant.currency.symbol(),
            restaurant.min_order
        )));
    }

    let delivery_fee = match draft.order_type {
        OrderType::Delivery => restaurant.delivery_fee,
        OrderType::Collection => 0.0,
    };

    let total = ensure_finite("Total", round_money(subtotal + delivery_fee))?;

    Ok(Order {
        id: uid(),
        customer_name: draft.customer_name,
        customer_phone: draft.customer_phone,
        order_type: draft.order_type,
        items,
        subtotal,
        delivery_fee,
        total,
        notes: draft.notes,
        status: OrderStatus::New,
        created_at: now(),
        updated_at: None,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;

    use super::*;
    use crate::service::MAX_AMOUNT;
    use crate::types::{Currency, OrderItemDraft, SmsSettings};

    fn restaurant() -> Restaurant {
        Restaurant {
            slug: "cafe-x".to_string(),
            name: "Cafe X".to_string(),
            tagline: String::new(),
            currency: Currency::Gbp,
            delivery_fee: 1.5,
            min_order: 5.0,
            order_types: BTreeSet::from([OrderType::Collection, OrderType::Delivery]),
            theme_color: "#28A745".to_string(),
            sms: SmsSettings::default(),
            created_at: Utc::now(),
        }
    }

    fn draft(order_type: OrderType, items: Vec<(f64, u32)>) -> OrderDraft {
        OrderDraft {
            customer_name: "Ann".to_string(),
            customer_phone: "07700900123".to_string(),
            order_type,
            items: items
                .into_iter()
                .enumerate()
                .map(|(i, (price, qty))| OrderItemDraft {
                    id: format!("item-{i}"),
                    name: format!("Item {i}"),
                    price,
                    qty,
                })
                .collect(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_build_order_totals() {
        let order = build_order(
            &restaurant(),
            draft(OrderType::Delivery, vec![(2.5, 2), (0.1, 3)]),
        )
        .unwrap();
        assert_eq!(order.subtotal, 5.3);
        assert_eq!(order.delivery_fee, 1.5);
        assert_eq!(order.total, 6.8);
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.updated_at, None);
    }

    #[test]
    fn test_collection_has_no_delivery_fee() {
        let order =
            build_order(&restaurant(), draft(OrderType::Collection, vec![(5.0, 1)])).unwrap();
        assert_eq!(order.delivery_fee, 0.0);
        assert_eq!(order.total, 5.0);
    }

    #[test]
    fn test_build_order_rejects_bad_input() {
        let restaurant = restaurant();
        let cases = [
            draft(OrderType::Collection, vec![]),
            draft(OrderType::Collection, vec![(5.0, 0)]),
            draft(OrderType::Collection, vec![(-5.0, 2), (10.0, 1)]),
            draft(OrderType::Collection, vec![(f64::NAN, 1)]),
            draft(OrderType::Collection, vec![(4.99, 1)]),
            draft(OrderType::Collection, vec![(1e308, 10)]),
            draft(OrderType::Collection, vec![(5.0, MAX_ITEM_QTY + 1)]),
            OrderDraft {
                customer_phone: " ".to_string(),
                ..draft(OrderType::Collection, vec![(5.0, 1)])
            },
        ];
        for case in cases {
            assert!(matches!(
                build_order(&restaurant, case),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_out_of_range_totals_are_rejected() {
        // Stored restaurants written before fees were capped can still hold huge values.
        let restaurant = Restaurant {
            delivery_fee: f64::MAX,
            ..restaurant()
        };
        let order = draft(OrderType::Delivery, vec![(MAX_AMOUNT, 1)]);
        assert!(matches!(
            build_order(&restaurant, order),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_build_order_rejects_disabled_order_type() {
        let restaurant = Restaurant {
            order_types: BTreeSet::from([OrderType::Collection]),
            ..restaurant()
        };
        assert!(matches!(
            build_order(&restaurant, draft(OrderType::Delivery, vec![(5.0, 1)])),
            Err(Error::InvalidInput(_))
        ));
    }
}
