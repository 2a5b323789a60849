//! Data Transfer Objects for API request/response serialization.

pub mod health;
pub mod share_links;
pub mod slugs;
pub mod stats;
pub mod targets;
