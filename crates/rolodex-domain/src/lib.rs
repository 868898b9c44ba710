//! Domain types shared across Rolodex crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! The list query description, pagination metadata and the time parser live here
//! so the query builder and the request validators agree on one definition.

pub mod pagination;
pub mod query;
pub mod time;
