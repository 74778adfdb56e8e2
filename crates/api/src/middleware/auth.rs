//! Bearer token authentication and role middleware.
//!
//! The access guard validates the `Authorization: Bearer <token>` header
//! and attaches the decoded principal to the request extensions. Role
//! middleware additionally rejects principals outside the allowed set:
//! admin counts as teacher wherever teacher-or-admin is required, while
//! course deletion requires admin itself.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use domain::models::Role;
use shared::token::TokenKeys;

/// Authenticated principal extracted from a bearer token.
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    /// Principal ID from the token subject claim.
    pub principal_id: Uuid,
    /// Role claim carried by the token.
    pub role: Role,
}

impl AuthPrincipal {
    /// Validates an access token and returns the decoded principal.
    pub fn validate(keys: &TokenKeys, token: &str) -> Result<Self, String> {
        let claims = keys
            .verify(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let principal_id = claims
            .principal_id()
            .map_err(|_| "Invalid principal ID in token".to_string())?;

        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| "Invalid role in token".to_string())?;

        Ok(AuthPrincipal { principal_id, role })
    }
}

/// Extracts the bearer token from the Authorization header.
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
}

/// Middleware that requires a valid bearer token.
///
/// The decoded principal is stored in request extensions for use by
/// downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    require_role_impl(state, req, next, None).await
}

/// Middleware that requires a teacher or admin principal.
pub async fn require_staff(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    require_role_impl(state, req, next, Some(RoleCheck::Staff)).await
}

/// Middleware that requires an admin principal.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    require_role_impl(state, req, next, Some(RoleCheck::Admin)).await
}

enum RoleCheck {
    Staff,
    Admin,
}

async fn require_role_impl(
    state: AppState,
    mut req: Request<Body>,
    next: Next,
    check: Option<RoleCheck>,
) -> Response {
    let token = match bearer_token(&req) {
        Some(token) => token,
        None => return unauthorized_response("Missing or invalid Authorization header"),
    };

    let auth = match AuthPrincipal::validate(&state.token_keys, token) {
        Ok(auth) => auth,
        Err(e) => {
            tracing::debug!("Token validation failed: {}", e);
            return unauthorized_response("Invalid or expired token");
        }
    };

    let allowed = match check {
        None => true,
        Some(RoleCheck::Staff) => auth.role.is_staff(),
        Some(RoleCheck::Admin) => auth.role.is_admin(),
    };

    if !allowed {
        return forbidden_response("Access denied");
    }

    req.extensions_mut().insert(auth);
    next.run(req).await
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

fn forbidden_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> TokenKeys {
        TokenKeys::from_secret("auth_middleware_test_secret", 3600, 0)
    }

    #[test]
    fn test_validate_decodes_principal() {
        let keys = test_keys();
        let principal_id = Uuid::new_v4();
        let token = keys.issue(principal_id, "teacher").unwrap();

        let auth = AuthPrincipal::validate(&keys, &token).unwrap();
        assert_eq!(auth.principal_id, principal_id);
        assert_eq!(auth.role, Role::Teacher);
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let keys = test_keys();
        assert!(AuthPrincipal::validate(&keys, "not_a_token").is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_role() {
        let keys = test_keys();
        let token = keys.issue(Uuid::new_v4(), "superuser").unwrap();
        assert!(AuthPrincipal::validate(&keys, &token).is_err());
    }

    #[test]
    fn test_unauthorized_response_status() {
        let response = unauthorized_response("Missing or invalid Authorization header");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_response_status() {
        let response = forbidden_response("Access denied");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
