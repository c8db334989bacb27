use std::sync::Arc;

use super::{KeyLocks, Restaurants, validate_amount};
use crate::error::{Error, Result};
use crate::store::{KvJsonExt, KvStore, PutOptions, keys};
use crate::types::{MenuItem, MenuItemDraft, MenuItemUpdate};
use crate::util::{now, round_money, uid};

/// Largest batch accepted by [`Menu::bulk_add`].
pub const MAX_BULK_ITEMS: usize = 200;

const DEFAULT_ITEM_NAME: &str = "Unnamed Item";
const DEFAULT_CATEGORY: &str = "Main";

/// Menu stores each restaurant's items as one ordered list. Every mutation
/// rewrites the whole list.
#[derive(Clone)]
pub struct Menu {
    store: Arc<dyn KvStore>,
    locks: Arc<KeyLocks>,
    restaurants: Restaurants,
}

impl Menu {
    pub fn new(store: Arc<dyn KvStore>, locks: Arc<KeyLocks>, restaurants: Restaurants) -> Self {
        Self {
            store,
            locks,
            restaurants,
        }
    }

    /// Items in display order. Empty if the restaurant has none.
    pub fn list(&self, slug: &str) -> Result<Vec<MenuItem>> {
        self.store.get_list(&keys::menu(slug))
    }

    pub fn add(&self, slug: &str, draft: MenuItemDraft) -> Result<MenuItem> {
        let mut added = self.append(slug, vec![draft])?;
        added
            .pop()
            .ok_or_else(|| Error::invalid("No items provided"))
    }

    /// Appends up to [`MAX_BULK_ITEMS`] items in submission order with one write.
    pub fn bulk_add(&self, slug: &str, drafts: Vec<MenuItemDraft>) -> Result<Vec<MenuItem>> {
        if drafts.len() > MAX_BULK_ITEMS {
            return Err(Error::invalid(format!(
                "Maximum {MAX_BULK_ITEMS} items per import"
            )));
        }
        self.append(slug, drafts)
    }

    fn append(&self, slug: &str, drafts: Vec<MenuItemDraft>) -> Result<Vec<MenuItem>> {
        if drafts.is_empty() {
            return Err(Error::invalid("No items provided"));
        }
        self.restaurants.require(slug)?;

        let new_items = drafts
            .into_iter()
            .map(build_item)
            .collect::<Result<Vec<_>>>()?;

        let key = keys::menu(slug);
        self.locks.with(&key, || {
            let mut menu: Vec<MenuItem> = self.store.get_list(&key)?;
            menu.extend(new_items.iter().cloned());
            self.store.put_json(&key, &menu, PutOptions::default())
        })?;

        tracing::info!("Added {} menu item(s) to {slug}", new_items.len());
        Ok(new_items)
    }

    /// Applies the set fields of `update` to item `item_id`. The id never changes.
    pub fn update(&self, slug: &str, item_id: &str, update: MenuItemUpdate) -> Result<MenuItem> {
        let price = update
            .price
            .map(|p| validate_amount("Price", p))
            .transpose()?;

        let key = keys::menu(slug);
        self.locks.with(&key, || {
            let mut menu: Vec<MenuItem> = self.store.get_list(&key)?;
            let item = menu
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or_else(|| Error::not_found("Menu item"))?;

            if let Some(name) = update.name {
                item.name = name;
            }
            if let Some(description) = update.description {
                item.description = description;
            }
            if let Some(price) = price {
                item.price = round_money(price);
            }
            if let Some(category) = update.category {
                item.category = category;
            }
            if let Some(available) = update.available {
                item.available = available;
            }

            let updated = item.clone();
            self.store.put_json(&key, &menu, PutOptions::default())?;
            Ok(updated)
        })
    }

    /// Removes item `item_id`. Removing an absent item is a no-op.
    /// Returns whether an item was removed.
    pub fn delete(&self, slug: &str, item_id: &str) -> Result<bool> {
        let key = keys::menu(slug);
        self.locks.with(&key, || {
            let mut menu: Vec<MenuItem> = self.store.get_list(&key)?;
            let before = menu.len();
            menu.retain(|i| i.id != item_id);
            if menu.len() == before {
                return Ok(false);
            }
            self.store.put_json(&key, &menu, PutOptions::default())?;
            Ok(true)
        })
    }
}

fn build_item(draft: MenuItemDraft) -> Result<MenuItem> {
    let price = validate_amount("Price", draft.price)?;
    Ok(MenuItem {
        id: uid(),
        name: draft
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string()),
        description: draft.description.unwrap_or_default(),
        price: round_money(price),
        category: draft
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        available: draft.available.unwrap_or(true),
        created_at: now(),
    })
}
