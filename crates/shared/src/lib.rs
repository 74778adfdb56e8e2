//! Shared utilities for the Schulsport backend.
//!
//! This crate provides common functionality used across the other crates:
//! - Bearer token signing and verification
//! - Password hashing with Argon2id
//! - Common validation logic

pub mod password;
pub mod token;
pub mod validation;
