use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::RequireTenant;
use crate::server::AppState;
use crate::server::dto::{BulkMenuRequest, BulkMenuResponse, MenuItemRequest, UpdateMenuItemRequest};
use crate::server::response::{ApiError, ApiResponse};
use crate::service::MAX_BULK_ITEMS;

pub async fn list_menu(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.core.menu.list(&slug)?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn add_menu_item(
    RequireTenant(slug): RequireTenant,
    State(state): State<Arc<AppState>>,
    Json(req): Json<MenuItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.core.menu.add(&slug, req.into_draft())?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

pub async fn bulk_add_menu_items(
    RequireTenant(slug): RequireTenant,
    State(state): State<Arc<AppState>>,
    Json(req): Json<BulkMenuRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.items.is_empty() {
        return Err(ApiError::bad_request("No items provided"));
    }
    if req.items.len() > MAX_BULK_ITEMS {
        return Err(ApiError::bad_request(format!(
            "Maximum {MAX_BULK_ITEMS} items per import"
        )));
    }

    let drafts = req.items.into_iter().map(|i| i.into_draft()).collect();
    let items = state.core.menu.bulk_add(&slug, drafts)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BulkMenuResponse {
            count: items.len(),
            items,
        })),
    ))
}

pub async fn update_menu_item(
    RequireTenant(slug): RequireTenant,
    State(state): State<Arc<AppState>>,
    Path((_, item_id)): Path<(String, String)>,
    Json(req): Json<UpdateMenuItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.core.menu.update(&slug, &item_id, req.into_update())?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn delete_menu_item(
    RequireTenant(slug): RequireTenant,
    State(state): State<Arc<AppState>>,
    Path((_, item_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    state.core.menu.delete(&slug, &item_id)?;
    Ok(StatusCode::NO_CONTENT)
}
