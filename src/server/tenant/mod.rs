mod menu;
mod orders;
mod profile;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::server::AppState;

pub fn tenant_router() -> Router<Arc<AppState>> {
    Router::new()
        // Profile and settings
        .route("/{slug}", get(profile::get_profile))
        .route("/{slug}/settings", put(profile::update_settings))
        .route("/{slug}/stats", get(profile::get_stats))
        // Menu
        .route("/{slug}/menu", get(menu::list_menu).post(menu::add_menu_item))
        .route("/{slug}/menu/bulk", post(menu::bulk_add_menu_items))
        .route(
            "/{slug}/menu/{item_id}",
            patch(menu::update_menu_item).delete(menu::delete_menu_item),
        )
        // Orders
        .route(
            "/{slug}/orders",
            get(orders::list_active_orders).post(orders::create_order),
        )
        .route(
            "/{slug}/orders/{order_id}",
            get(orders::get_order).patch(orders::update_order_status),
        )
}
