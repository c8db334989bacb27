use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AdminToken;
use crate::error::{Error, Result};
use crate::store::{KvJsonExt, KvStore, PutOptions, keys};

/// Stored form of a restaurant's admin token. The raw token is never kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredential {
    pub hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum TokenValidationError {
    InvalidScheme,
    InvalidToken,
}

/// Issues a fresh admin token for `slug`, replacing any previous one.
/// Returns the raw token, which is only available here.
pub fn issue_admin_token(store: &dyn KvStore, slug: &str) -> Result<String> {
    let token = AdminToken::generate(slug);
    let credential = AdminCredential {
        hash: token.hash()?,
        created_at: Utc::now(),
    };
    store.put_json(
        &keys::admin_credential(slug),
        &credential,
        PutOptions::default(),
    )?;
    tracing::info!("Issued admin token for {slug}");
    Ok(token.raw())
}

/// Checks `raw_token` against the admin credential of `slug`.
pub fn verify_admin_token(store: &dyn KvStore, slug: &str, raw_token: &str) -> Result<bool> {
    let token = match AdminToken::parse(raw_token) {
        Ok(token) => token,
        Err(Error::InvalidTokenFormat) => return Ok(false),
        Err(e) => return Err(e),
    };
    if token.slug != slug {
        return Ok(false);
    }

    let Some(credential) = store.get_json::<AdminCredential>(&keys::admin_credential(slug))? else {
        return Ok(false);
    };
    token.verify(&credential.hash)
}

/// Extracts a token string from a Basic auth header.
/// Expects format: Basic base64(x-token:actual_token)
pub fn extract_basic_auth_token(header: &str) -> Option<String> {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;

    let (username, password) = credentials.split_once(':')?;

    if username != "x-token" {
        return None;
    }

    Some(password.to_string())
}

/// Extracts token from Authorization header (Bearer or Basic).
/// Returns None if no auth header is present.
/// Returns Err if the auth scheme is unsupported.
pub fn extract_token_from_header(
    auth_header: Option<&str>,
) -> std::result::Result<Option<String>, TokenValidationError> {
    match auth_header {
        Some(header) => {
            if let Some(token) = header.strip_prefix("Bearer ") {
                Ok(Some(token.to_string()))
            } else if header.starts_with("Basic ") {
                extract_basic_auth_token(header)
                    .ok_or(TokenValidationError::InvalidToken)
                    .map(Some)
            } else {
                Err(TokenValidationError::InvalidScheme)
            }
        }
        None => Ok(None),
    }
}
