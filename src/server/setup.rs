use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::issue_admin_token;
use crate::server::AppState;
use crate::server::dto::{SetupRequest, SetupResponse};
use crate::server::response::{ApiError, ApiResponse};

/// Creates a restaurant and returns its admin token.
pub async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant = state.core.restaurants.create(req.into_new_restaurant())?;
    let token = issue_admin_token(state.store.as_ref(), &restaurant.slug)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SetupResponse {
            slug: restaurant.slug,
            token,
        })),
    ))
}
