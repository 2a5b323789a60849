//! Repository trait for shareable target persistence.

use crate::domain::entities::{NewTarget, ObjectType, SlugTarget};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for targets and their vanity slugs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTargetRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryTargetRepository`] - hermetic tests / cacheless dev
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TargetRepository: Send + Sync {
    /// Registers a target, or refreshes its metadata if the
    /// `(object_type, object_id)` pair already exists. The slug column is
    /// never touched by an upsert.
    async fn upsert(&self, new_target: NewTarget) -> Result<SlugTarget, AppError>;

    /// Finds a target by its object type and id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(target))` if found
    /// - `Ok(None)` if not found
    async fn find(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<Option<SlugTarget>, AppError>;

    /// Lists every resolvable target with a non-empty slug.
    ///
    /// This is the registry load query: trashed targets and targets without
    /// a slug are excluded.
    async fn list_with_slugs(&self) -> Result<Vec<SlugTarget>, AppError>;

    /// Lists resolvable targets that still need a slug, restricted to the
    /// allowed object types and (for terms) the allowed taxonomies.
    async fn list_missing_slugs(
        &self,
        allowed_types: &[ObjectType],
        allowed_taxonomies: &[String],
    ) -> Result<Vec<SlugTarget>, AppError>;

    /// Writes a slug onto a target's row.
    ///
    /// Returns `Ok(false)` if no matching target exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the slug collides with the
    /// unique index (a concurrent writer won the race).
    async fn set_slug(
        &self,
        object_type: ObjectType,
        object_id: i64,
        slug: &str,
    ) -> Result<bool, AppError>;

    /// Backend liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
