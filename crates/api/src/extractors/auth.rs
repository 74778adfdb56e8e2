//! Bearer token authentication extractor.
//!
//! Used by handlers that are not behind the auth middleware but still
//! need the calling principal (for example `GET /api/auth/me`).

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthPrincipal as AuthPrincipalData;
use domain::models::Role;

/// Authenticated principal from a bearer token.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields are for handler use; not every handler reads both
pub struct AuthPrincipal {
    /// Principal ID from the token subject claim.
    pub principal_id: Uuid,
    /// Role claim carried by the token.
    pub role: Role,
}

impl From<AuthPrincipalData> for AuthPrincipal {
    fn from(data: AuthPrincipalData) -> Self {
        Self {
            principal_id: data.principal_id,
            role: data.role,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The auth middleware may already have validated the token
        if let Some(auth) = parts.extensions.get::<AuthPrincipalData>() {
            return Ok(auth.clone().into());
        }

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let auth = AuthPrincipalData::validate(&state.token_keys, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(auth.into())
    }
}
