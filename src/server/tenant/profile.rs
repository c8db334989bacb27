use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::auth::RequireTenant;
use crate::server::AppState;
use crate::server::dto::{PublicProfile, SettingsRequest};
use crate::server::response::{ApiError, ApiResponse};

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant = state.core.restaurants.require(&slug)?;
    Ok(Json(ApiResponse::success(PublicProfile::from(restaurant))))
}

pub async fn update_settings(
    RequireTenant(slug): RequireTenant,
    State(state): State<Arc<AppState>>,
    Json(req): Json<SettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant = state.core.restaurants.update(&slug, req.into_update())?;
    Ok(Json(ApiResponse::success(restaurant)))
}

pub async fn get_stats(
    RequireTenant(slug): RequireTenant,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.core.stats.today(&slug)?;
    Ok(Json(ApiResponse::success(stats)))
}
