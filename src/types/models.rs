use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "£")]
    Gbp,
    #[serde(rename = "€")]
    Eur,
    #[serde(rename = "$")]
    Usd,
}

impl Currency {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Gbp => "£",
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Currency> {
        match symbol {
            "£" => Some(Currency::Gbp),
            "€" => Some(Currency::Eur),
            "$" => Some(Currency::Usd),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Collection,
    Delivery,
}

/// Order lifecycle events that may trigger a customer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationEvent {
    OrderReceived,
    OrderAccepted,
    OrderReady,
    OrderDelivered,
    OrderRejected,
}

impl NotificationEvent {
    /// The event announced when an order enters `status`.
    #[must_use]
    pub const fn for_status(status: OrderStatus) -> NotificationEvent {
        match status {
            OrderStatus::New => NotificationEvent::OrderReceived,
            OrderStatus::Accepted => NotificationEvent::OrderAccepted,
            OrderStatus::Ready => NotificationEvent::OrderReady,
            OrderStatus::Delivered => NotificationEvent::OrderDelivered,
            OrderStatus::Rejected => NotificationEvent::OrderRejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsSettings {
    pub enabled: bool,
    pub api_key: String,
    /// Per-event switches. A missing event counts as enabled.
    #[serde(default)]
    pub events: BTreeMap<NotificationEvent, bool>,
}

impl SmsSettings {
    #[must_use]
    pub fn is_event_enabled(&self, event: NotificationEvent) -> bool {
        self.events.get(&event).copied().unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub currency: Currency,
    pub delivery_fee: f64,
    pub min_order: f64,
    pub order_types: BTreeSet<OrderType>,
    pub theme_color: String,
    pub sms: SmsSettings,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Menu item id as submitted by the customer.
    pub id: String,
    pub name: String,
    pub price: f64,
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: OrderType,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub notes: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Last four characters of the id, used when talking to customers.
    #[must_use]
    pub fn short_ref(&self) -> &str {
        let start = self
            .id
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(idx, _)| idx);
        &self.id[start..]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub orders: u64,
    pub revenue: f64,
}

impl DailyStats {
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            orders: 0,
            revenue: 0.0,
        }
    }
}
