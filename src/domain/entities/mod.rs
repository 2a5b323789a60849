//! Core business entities.

mod platform;
mod target;

pub use platform::Platform;
pub use target::{NewTarget, ObjectStatus, ObjectType, SlugEntry, SlugTarget};
