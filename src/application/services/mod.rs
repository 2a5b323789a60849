//! Application services orchestrating the domain over the repositories.

mod auth_service;
mod registry;
mod resolver;
mod slug_service;
mod stats_service;
mod target_service;

pub use auth_service::AuthService;
pub use registry::SlugRegistry;
pub use resolver::{RedirectResolver, RedirectTarget, Resolution};
pub use slug_service::{BatchReport, SlugService};
pub use stats_service::StatsService;
pub use target_service::{ShareLink, TargetService};
