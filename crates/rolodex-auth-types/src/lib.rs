//! Auth types shared across Rolodex crates.
//!
//! Provides JWT issuing and validation, and the bearer-token `Identity` extractors.

pub mod identity;
pub mod token;
