//! Persistence layer for the Schulsport backend.
//!
//! Database access is organized as repositories over a shared `PgPool`;
//! row mappings live in `entities` and convert into the domain models.

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
