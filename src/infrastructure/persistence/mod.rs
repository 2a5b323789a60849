//! Storage implementations of the domain repository traits.

mod memory;
mod pg_hit_repository;
mod pg_target_repository;

pub use memory::{InMemoryHitRepository, InMemoryTargetRepository};
pub use pg_hit_repository::PgHitRepository;
pub use pg_target_repository::PgTargetRepository;
