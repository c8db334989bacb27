use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{
    Currency, MenuItem, MenuItemDraft, MenuItemUpdate, NewRestaurant, NotificationEvent,
    OrderDraft, OrderItemDraft, OrderType, Restaurant, RestaurantUpdate, SmsSettings,
};
use crate::util::{sanitize_phone, sanitize_text};

const MAX_SMS_API_KEY_LEN: usize = 200;

/// Accepts a JSON number or a numeric string; anything else reads as 0.
/// Menu imports produced by OCR send prices as text.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Float(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Number::deserialize(deserializer)? {
        Number::Float(n) => n,
        Number::Text(s) => s.trim().trim_start_matches(['£', '€', '$']).parse().unwrap_or(0.0),
        Number::Other(_) => 0.0,
    })
}

fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_number(deserializer).map(Some)
}

fn sanitize_optional(value: Option<String>) -> Option<String> {
    value.map(|v| sanitize_text(&v))
}

fn parse_currency(symbol: Option<&str>) -> Currency {
    symbol.and_then(Currency::from_symbol).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub struct SetupRequest {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl SetupRequest {
    pub fn into_new_restaurant(self) -> NewRestaurant {
        NewRestaurant {
            slug: self.slug,
            name: sanitize_optional(self.name),
            tagline: sanitize_optional(self.tagline),
            currency: Some(parse_currency(self.currency.as_deref())),
            ..NewRestaurant::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub slug: String,
    /// Admin token for the new restaurant. Shown once.
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsSettingsRequest {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub events: BTreeMap<NotificationEvent, bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_number")]
    pub delivery_fee: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_number")]
    pub min_order: Option<f64>,
    #[serde(default)]
    pub order_types: Option<BTreeSet<OrderType>>,
    #[serde(default)]
    pub theme_color: Option<String>,
    #[serde(default)]
    pub sms: Option<SmsSettingsRequest>,
}

impl SettingsRequest {
    pub fn into_update(self) -> RestaurantUpdate {
        RestaurantUpdate {
            name: sanitize_optional(self.name),
            tagline: sanitize_optional(self.tagline),
            currency: self.currency.map(|c| parse_currency(Some(&c))),
            delivery_fee: self.delivery_fee.map(|fee| fee.max(0.0)),
            min_order: self.min_order.map(|min| min.max(0.0)),
            order_types: self.order_types,
            theme_color: sanitize_optional(self.theme_color),
            sms: self.sms.map(|sms| SmsSettings {
                enabled: sms.enabled,
                api_key: sms.api_key.chars().take(MAX_SMS_API_KEY_LEN).collect(),
                events: sms.events,
            }),
        }
    }
}

/// Restaurant profile as shown to customers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub currency: Currency,
    pub delivery_fee: f64,
    pub min_order: f64,
    pub order_types: BTreeSet<OrderType>,
    pub theme_color: String,
}

impl From<Restaurant> for PublicProfile {
    fn from(r: Restaurant) -> Self {
        Self {
            slug: r.slug,
            name: r.name,
            tagline: r.tagline,
            currency: r.currency,
            delivery_fee: r.delivery_fee,
            min_order: r.min_order,
            order_types: r.order_types,
            theme_color: r.theme_color,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MenuItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl MenuItemRequest {
    pub fn into_draft(self) -> MenuItemDraft {
        MenuItemDraft {
            name: sanitize_optional(self.name),
            description: sanitize_optional(self.description),
            price: self.price,
            category: sanitize_optional(self.category),
            available: self.available,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkMenuRequest {
    #[serde(default)]
    pub items: Vec<MenuItemRequest>,
}

#[derive(Debug, Serialize)]
pub struct BulkMenuResponse {
    pub count: usize,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMenuItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_number")]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl UpdateMenuItemRequest {
    pub fn into_update(self) -> MenuItemUpdate {
        MenuItemUpdate {
            name: sanitize_optional(self.name),
            description: sanitize_optional(self.description),
            price: self.price,
            category: sanitize_optional(self.category),
            available: self.available,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: f64,
    #[serde(default)]
    pub qty: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub notes: String,
}

impl CreateOrderRequest {
    pub fn into_draft(self) -> OrderDraft {
        let order_type = match self.order_type.as_deref() {
            Some("delivery") => OrderType::Delivery,
            _ => OrderType::Collection,
        };

        OrderDraft {
            customer_name: sanitize_text(&self.customer_name),
            customer_phone: sanitize_phone(&self.customer_phone),
            order_type,
            items: self
                .items
                .into_iter()
                .map(|item| OrderItemDraft {
                    id: item.id,
                    name: sanitize_text(&item.name),
                    price: item.price,
                    qty: item.qty.unwrap_or(1),
                })
                .collect(),
            notes: sanitize_text(&self.notes),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    #[serde(default)]
    pub status: String,
}
