//! Test utilities for Rolodex services.
//!
//! Import from `[dev-dependencies]` only, never in production code.

pub mod auth;
pub mod db;
