use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::RequireTenant;
use crate::server::AppState;
use crate::server::dto::{CreateOrderRequest, UpdateOrderStatusRequest};
use crate::server::response::{ApiError, ApiResponse};
use crate::types::OrderStatus;

/// Places an order. Customers are not authenticated.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.core.orders.create(&slug, req.into_draft())?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order))))
}

pub async fn list_active_orders(
    RequireTenant(slug): RequireTenant,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state.core.orders.list_active(&slug)?;
    Ok(Json(ApiResponse::success(orders)))
}

pub async fn get_order(
    RequireTenant(slug): RequireTenant,
    State(state): State<Arc<AppState>>,
    Path((_, order_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .core
        .orders
        .get(&slug, &order_id)?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn update_order_status(
    RequireTenant(slug): RequireTenant,
    State(state): State<Arc<AppState>>,
    Path((_, order_id)): Path<(String, String)>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = req
        .status
        .parse::<OrderStatus>()
        .ok()
        .filter(|s| *s != OrderStatus::New)
        .ok_or_else(|| ApiError::bad_request("Invalid status"))?;

    let order = state.core.orders.transition(&slug, &order_id, status)?;
    Ok(Json(ApiResponse::success(order)))
}
