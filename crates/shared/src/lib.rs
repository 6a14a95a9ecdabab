//! Shared utilities for the TEDx platform backend.
//!
//! - JWT access tokens
//! - Password hashing with Argon2id and the account password policy
//! - Common validation helpers
//! - Page-based pagination

pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
