use std::collections::BTreeSet;
use std::sync::Arc;

use super::{KeyLocks, validate_amount};
use crate::error::{Error, Result};
use crate::store::{KvJsonExt, KvStore, PutOptions, keys};
use crate::types::{
    MenuItem, NewRestaurant, Order, OrderType, Restaurant, RestaurantUpdate, SmsSettings,
};
use crate::util::{normalize_slug, now, validate_slug};

const DEFAULT_NAME: &str = "My Restaurant";
const DEFAULT_THEME_COLOR: &str = "#28A745";

/// Restaurants is the tenant registry.
#[derive(Clone)]
pub struct Restaurants {
    store: Arc<dyn KvStore>,
    locks: Arc<KeyLocks>,
}

impl Restaurants {
    pub fn new(store: Arc<dyn KvStore>, locks: Arc<KeyLocks>) -> Self {
        Self { store, locks }
    }

    /// Creates a restaurant at the normalized form of `input.slug`, together
    /// with its empty menu and empty active orders list.
    ///
    /// The three writes are not atomic. A crash part way leaves a profile
    /// whose missing collections read as empty.
    pub fn create(&self, input: NewRestaurant) -> Result<Restaurant> {
        let slug = normalize_slug(&input.slug);
        validate_slug(&slug)?;

        let order_types = input
            .order_types
            .unwrap_or_else(|| BTreeSet::from([OrderType::Collection, OrderType::Delivery]));
        if order_types.is_empty() {
            return Err(Error::invalid("At least one order type is required"));
        }

        let restaurant = Restaurant {
            slug: slug.clone(),
            name: non_empty_or(input.name, DEFAULT_NAME),
            tagline: input.tagline.unwrap_or_default(),
            currency: input.currency.unwrap_or_default(),
            delivery_fee: validate_amount("Delivery fee", input.delivery_fee.unwrap_or(0.0))?,
            min_order: validate_amount("Minimum order", input.min_order.unwrap_or(0.0))?,
            order_types,
            theme_color: non_empty_or(input.theme_color, DEFAULT_THEME_COLOR),
            sms: SmsSettings::default(),
            created_at: now(),
        };

        let key = keys::restaurant(&slug);
        self.locks.with(&key, || {
            if self.get(&slug)?.is_some() {
                return Err(Error::Conflict("Restaurant slug already exists".to_string()));
            }

            self.store
                .put_json(&key, &restaurant, PutOptions::default())?;
            self.store
                .put_json(&keys::menu(&slug), &Vec::<MenuItem>::new(), PutOptions::default())?;
            self.store.put_json(
                &keys::active_orders(&slug),
                &Vec::<Order>::new(),
                PutOptions::default(),
            )?;
            Ok(())
        })?;

        tracing::info!("Created restaurant {slug}");
        Ok(restaurant)
    }

    pub fn get(&self, slug: &str) -> Result<Option<Restaurant>> {
        self.store.get_json(&keys::restaurant(slug))
    }

    /// Like [`Restaurants::get`], but a missing restaurant is `NotFound`.
    pub fn require(&self, slug: &str) -> Result<Restaurant> {
        self.get(slug)?
            .ok_or_else(|| Error::not_found("Restaurant"))
    }

    /// Applies the set fields of `update` over the stored profile.
    pub fn update(&self, slug: &str, update: RestaurantUpdate) -> Result<Restaurant> {
        let key = keys::restaurant(slug);
        self.locks.with(&key, || {
            let mut restaurant = self.require(slug)?;

            if let Some(name) = update.name {
                restaurant.name = non_empty_or(Some(name), DEFAULT_NAME);
            }
            if let Some(tagline) = update.tagline {
                restaurant.tagline = tagline;
            }
            if let Some(currency) = update.currency {
                restaurant.currency = currency;
            }
            if let Some(fee) = update.delivery_fee {
                restaurant.delivery_fee = validate_amount("Delivery fee", fee)?;
            }
            if let Some(min_order) = update.min_order {
                restaurant.min_order = validate_amount("Minimum order", min_order)?;
            }
            if let Some(order_types) = update.order_types {
                if order_types.is_empty() {
                    return Err(Error::invalid("At least one order type is required"));
                }
                restaurant.order_types = order_types;
            }
            if let Some(theme_color) = update.theme_color {
                restaurant.theme_color = non_empty_or(Some(theme_color), DEFAULT_THEME_COLOR);
            }
            if let Some(sms) = update.sms {
                restaurant.sms = sms;
            }

            self.store
                .put_json(&key, &restaurant, PutOptions::default())?;
            tracing::info!("Updated settings of restaurant {slug}");
            Ok(restaurant)
        })
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
