//! Slug assignment: generation, backfill sweeps, and renames.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::services::SlugRegistry;
use crate::domain::entities::{ObjectType, SlugTarget};
use crate::domain::repositories::TargetRepository;
use crate::error::AppError;
use crate::utils::slug::{DEFAULT_SLUG_LENGTH, random_slug, validate_slug};

/// Retries before giving up on finding an unclaimed slug.
const MAX_GENERATION_ATTEMPTS: u32 = 100;

/// Outcome of a backfill sweep over targets missing slugs.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub success: u32,
    pub error: u32,
    pub messages: Vec<String>,
}

pub struct SlugService {
    repo: Arc<dyn TargetRepository>,
    registry: Arc<SlugRegistry>,
    allowed_types: Vec<ObjectType>,
    allowed_taxonomies: Vec<String>,
}

impl SlugService {
    pub fn new(
        repo: Arc<dyn TargetRepository>,
        registry: Arc<SlugRegistry>,
        allowed_types: Vec<ObjectType>,
        allowed_taxonomies: Vec<String>,
    ) -> Self {
        Self {
            repo,
            registry,
            allowed_types,
            allowed_taxonomies,
        }
    }

    /// Assigns a fresh random slug to a target, keeping any slug it already
    /// has. Returns the target's current slug either way.
    pub async fn generate_for(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<String, AppError> {
        let target = self.repo.find(object_type, object_id).await?.ok_or_else(|| {
            AppError::not_found(
                "Target not found",
                json!({ "object_type": object_type, "object_id": object_id }),
            )
        })?;

        if let Some(slug) = target.slug.as_deref().filter(|s| !s.is_empty()) {
            return Ok(slug.to_string());
        }

        let mut rng = StdRng::from_os_rng();
        self.generate_with(&target, || random_slug(&mut rng, DEFAULT_SLUG_LENGTH))
            .await
    }

    /// Core generation loop with a caller-supplied slug draw.
    ///
    /// Draws until an unclaimed slug lands, treating a storage-level
    /// [`AppError::Conflict`] as one more collision. Gives up after
    /// [`MAX_GENERATION_ATTEMPTS`] draws.
    pub async fn generate_with<F>(
        &self,
        target: &SlugTarget,
        mut draw: F,
    ) -> Result<String, AppError>
    where
        F: FnMut() -> String,
    {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = draw();
            if self.registry.contains(&candidate).await? {
                continue;
            }

            match self.registry.add(target, &candidate).await {
                Ok(()) => {
                    info!(
                        slug = %candidate,
                        object_type = %target.object_type,
                        object_id = target.object_id,
                        attempt,
                        "slug assigned"
                    );
                    return Ok(candidate);
                }
                // Lost the unique-index race; draw again.
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique slug",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Backfills slugs for every eligible target that lacks one.
    ///
    /// Per-target failures are recorded and the sweep continues; one broken
    /// row must not starve the rest.
    pub async fn generate_missing(&self) -> Result<BatchReport, AppError> {
        let missing = self
            .repo
            .list_missing_slugs(&self.allowed_types, &self.allowed_taxonomies)
            .await?;

        let mut report = BatchReport::default();
        let mut rng = StdRng::from_os_rng();

        for target in &missing {
            let result = self
                .generate_with(target, || random_slug(&mut rng, DEFAULT_SLUG_LENGTH))
                .await;
            match result {
                Ok(_) => report.success += 1,
                Err(e) => {
                    warn!(
                        object_type = %target.object_type,
                        object_id = target.object_id,
                        error = %e,
                        "slug backfill failed for target"
                    );
                    report.error += 1;
                    report.messages.push(format!(
                        "{} {}: {e}",
                        target.object_type, target.object_id
                    ));
                }
            }
        }

        info!(
            success = report.success,
            error = report.error,
            "slug backfill sweep finished"
        );
        Ok(report)
    }

    /// Renames a target's slug to a caller-chosen value.
    ///
    /// The old slug stops resolving immediately in this process; cached
    /// redirects for it age out with the cache TTL.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed slug
    /// - [`AppError::NotFound`] if the target is not registered
    /// - [`AppError::Conflict`] naming the current holder's title if the
    ///   slug is taken
    pub async fn rename(
        &self,
        object_type: ObjectType,
        object_id: i64,
        new_slug: &str,
    ) -> Result<SlugTarget, AppError> {
        validate_slug(new_slug)?;

        let target = self.repo.find(object_type, object_id).await?.ok_or_else(|| {
            AppError::not_found(
                "Target not found",
                json!({ "object_type": object_type, "object_id": object_id }),
            )
        })?;

        let old_slug = target.slug.clone().filter(|s| !s.is_empty());
        if old_slug.as_deref() == Some(new_slug) {
            return Ok(target);
        }

        if let Some(holder) = self.registry.lookup(new_slug).await? {
            if (holder.object_type, holder.object_id) != (object_type, object_id) {
                let title = self
                    .repo
                    .find(holder.object_type, holder.object_id)
                    .await?
                    .map(|t| t.title)
                    .unwrap_or_default();
                return Err(AppError::conflict(
                    format!("Slug already in use by \"{title}\""),
                    json!({
                        "slug": new_slug,
                        "object_type": holder.object_type,
                        "object_id": holder.object_id,
                    }),
                ));
            }
        }

        self.registry.add(&target, new_slug).await?;
        if let Some(old) = old_slug.as_deref() {
            self.registry.remove(old).await;
        }

        info!(
            old_slug = old_slug.as_deref().unwrap_or(""),
            new_slug,
            object_type = %object_type,
            object_id,
            "slug renamed"
        );

        self.repo.find(object_type, object_id).await?.ok_or_else(|| {
            AppError::internal(
                "Target disappeared during rename",
                json!({ "object_type": object_type, "object_id": object_id }),
            )
        })
    }
}
