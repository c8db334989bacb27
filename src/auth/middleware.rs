use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequestParts, Path},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::helpers::{TokenValidationError, extract_token_from_header, verify_admin_token};
use crate::server::AppState;

/// Extractor for admin-only routes under `/api/{slug}`.
///
/// Holds the slug whose admin token was presented. Handlers pass it to the
/// core, which trusts it without further checks.
pub struct RequireTenant(pub String);

#[derive(Debug)]
pub enum AuthError {
    MissingAuth,
    InvalidScheme,
    InvalidToken,
    MissingTenant,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingAuth => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AuthError::InvalidScheme => (StatusCode::UNAUTHORIZED, "Invalid authorization scheme"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::MissingTenant => (StatusCode::BAD_REQUEST, "Restaurant slug required"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({ "data": null, "error": message });

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                "WWW-Authenticate",
                axum::http::HeaderValue::from_static("Bearer realm=\"menulinx\""),
            );
        }

        response
    }
}

impl FromRequestParts<Arc<AppState>> for RequireTenant {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthError::MissingTenant)?;
        let slug = params.get("slug").ok_or(AuthError::MissingTenant)?;

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let raw_token = extract_token_from_header(auth_header)
            .map_err(|e| match e {
                TokenValidationError::InvalidScheme => AuthError::InvalidScheme,
                TokenValidationError::InvalidToken => AuthError::InvalidToken,
            })?
            .ok_or(AuthError::MissingAuth)?;

        let verified = verify_admin_token(state.store.as_ref(), slug, &raw_token).map_err(|e| {
            tracing::error!("Failed to verify admin token for {slug}: {e}");
            AuthError::InternalError
        })?;

        if !verified {
            return Err(AuthError::InvalidToken);
        }

        Ok(RequireTenant(slug.clone()))
    }
}
