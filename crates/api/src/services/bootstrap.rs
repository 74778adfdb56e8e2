//! Admin bootstrap for initial setup.
//!
//! Seeds the first admin principal on startup when configured. The step
//! is idempotent: if the account already exists nothing happens, so the
//! configuration can stay in place across restarts.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AuthConfig;
use domain::models::Role;
use persistence::repositories::UserRepository;
use shared::password::{hash_password, PasswordError};

/// Error types for admin bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Bootstrap the admin principal if configured and not already present.
///
/// Called after migrations on startup.
pub async fn bootstrap_admin(pool: &PgPool, config: &AuthConfig) -> Result<(), BootstrapError> {
    if config.bootstrap_email.is_empty() {
        return Ok(());
    }

    if config.bootstrap_password.is_empty() {
        warn!(
            "SSP__AUTH__BOOTSTRAP_EMAIL is set but SSP__AUTH__BOOTSTRAP_PASSWORD is empty - skipping bootstrap"
        );
        return Ok(());
    }

    let repo = UserRepository::new(pool.clone());

    if repo.find_by_email(&config.bootstrap_email).await?.is_some() {
        info!("Bootstrap admin already exists - skipping bootstrap");
        return Ok(());
    }

    let password_hash = hash_password(&config.bootstrap_password)?;

    let user = repo
        .create(
            &config.bootstrap_email,
            &password_hash,
            "System",
            "Administrator",
            Role::Admin.as_str(),
        )
        .await?;

    info!(
        email = %config.bootstrap_email,
        user_id = %user.id,
        "Bootstrap admin created successfully"
    );

    Ok(())
}
