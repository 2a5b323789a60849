//! Domain layer: entities, repository traits, and the hit worker.

pub mod entities;
pub mod hit_event;
pub mod hit_worker;
pub mod repositories;
