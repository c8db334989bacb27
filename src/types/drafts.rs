//! Inputs accepted by the core. Unset fields take the documented defaults.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::{Currency, OrderType, SmsSettings};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRestaurant {
    /// Raw slug, normalized before use.
    pub slug: String,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub currency: Option<Currency>,
    pub delivery_fee: Option<f64>,
    pub min_order: Option<f64>,
    pub order_types: Option<BTreeSet<OrderType>>,
    pub theme_color: Option<String>,
}

/// Partial settings update. `slug` is not part of it: it never changes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub currency: Option<Currency>,
    pub delivery_fee: Option<f64>,
    pub min_order: Option<f64>,
    pub order_types: Option<BTreeSet<OrderType>>,
    pub theme_color: Option<String>,
    pub sms: Option<SmsSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemDraft {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub qty: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: OrderType,
    pub items: Vec<OrderItemDraft>,
    pub notes: String,
}
