//! HTTP and runtime plumbing shared by Rolodex services.

pub mod health;
pub mod middleware;
pub mod response;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
