use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, require_auth, require_staff, trace_id,
};
use crate::routes::{auth, courses, health, registrations};
use shared::token::TokenKeys;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub token_keys: TokenKeys,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let token_keys = TokenKeys::from_secret(
        &config.auth.secret,
        config.auth.token_expiry_secs,
        config.auth.leeway_secs,
    );

    let state = AppState {
        pool,
        config: config.clone(),
        token_keys,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/courses", get(courses::list_courses))
        .route("/api/courses/:id", get(courses::get_course))
        .route("/api/registrations", post(registrations::create_registration))
        .route("/api/auth/login", post(auth::login))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics_handler));

    // Routes for any authenticated principal
    let authed_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Staff routes (require teacher or admin)
    let staff_routes = Router::new()
        .route("/api/courses", post(courses::create_course))
        .route("/api/courses/:id", put(courses::replace_course))
        .route("/api/courses/:id", patch(courses::patch_course))
        .route(
            "/api/registrations/course/:course_id",
            get(registrations::list_for_course),
        )
        .route(
            "/api/registrations/course/:course_id/export",
            get(registrations::export_for_course),
        )
        .route("/api/registrations/:id", patch(registrations::update_status))
        .route(
            "/api/registrations/:id/attendance",
            post(registrations::record_attendance),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff));

    // Admin routes
    let admin_routes = Router::new()
        .route("/api/courses/:id", delete(courses::delete_course))
        .route(
            "/api/registrations/:id",
            delete(registrations::delete_registration),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(authed_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
