//! Repository traits decoupling domain logic from storage.

mod hit_repository;
mod target_repository;

pub use hit_repository::{HitCounts, HitRepository};
pub use target_repository::TargetRepository;

#[cfg(test)]
pub use hit_repository::MockHitRepository;
#[cfg(test)]
pub use target_repository::MockTargetRepository;
