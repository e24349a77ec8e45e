use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::{Config, Permission};
use crate::landmarks::LandmarkCatalog;
use crate::session::SessionProvider;
use crate::web::api::error::ErrorResponse;

/// Shared by every handler. Sessions are loaded per request; nothing is cached.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn SessionProvider>,
    pub catalog: Arc<LandmarkCatalog>,
}

/// Caller identified by a configured API key.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub name: String,
    pub permissions: HashSet<Permission>,
}

impl AuthenticatedUser {
    pub fn require(&self, permission: Permission) -> Result<(), PermissionError> {
        if self.permissions.contains(&permission) {
            return Ok(());
        }
        log::warn!("API key '{}' lacks permission {}", self.name, permission);
        Err(PermissionError(permission))
    }
}

#[derive(Debug, PartialEq)]
pub enum AuthError {
    MissingAuth,
    InvalidFormat,
    InvalidKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingAuth => "missing Authorization header",
            AuthError::InvalidFormat => "expected 'Authorization: Bearer <key>'",
            AuthError::InvalidKey => "unknown API key",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::with_message("unauthorized", message)),
        )
            .into_response()
    }
}

/// The caller is known but may not use this endpoint.
#[derive(Debug, PartialEq)]
pub struct PermissionError(pub Permission);

impl IntoResponse for PermissionError {
    fn into_response(self) -> Response {
        let message = format!("requires the '{}' permission", self.0);
        (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::with_message("forbidden", &message)),
        )
            .into_response()
    }
}

fn bearer_key(parts: &Parts) -> Result<&str, AuthError> {
    let value = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(AuthError::InvalidFormat)
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = bearer_key(parts)?;
        let api_key = state.config.find_api_key(key).ok_or_else(|| {
            log::debug!("Rejected request to {} with unknown API key", parts.uri.path());
            AuthError::InvalidKey
        })?;

        Ok(AuthenticatedUser {
            name: api_key.name.clone(),
            permissions: api_key.permissions.clone(),
        })
    }
}
