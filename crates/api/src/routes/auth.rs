//! Authentication routes: login and current-principal lookup.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use domain::models::Principal;
use persistence::repositories::UserRepository;
use shared::password::verify_password;

/// Request body for login.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Principal information in responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl From<Principal> for PrincipalResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id.to_string(),
            email: principal.email,
            first_name: principal.first_name,
            last_name: principal.last_name,
            role: principal.role.to_string(),
        }
    }
}

/// Response body for successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub principal: PrincipalResponse,
}

/// Log in with email and password.
///
/// POST /api/auth/login
///
/// Issues a signed token carrying the principal id and role, valid for
/// the configured lifetime (7 days by default).
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let principal: Principal = user.into();

    let matches = verify_password(&request.password, &principal.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;

    if !matches {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state
        .token_keys
        .issue(principal.id, principal.role.as_str())
        .map_err(|e| ApiError::Internal(format!("Token issuance failed: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        principal: principal.into(),
    }))
}

/// Fetch the principal behind the presented token.
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthPrincipal,
) -> Result<Json<PrincipalResponse>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(auth.principal_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown principal".to_string()))?;

    let principal: Principal = user.into();
    Ok(Json(principal.into()))
}
