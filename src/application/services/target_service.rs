//! Target registration and share link assembly.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::services::SlugRegistry;
use crate::domain::entities::{NewTarget, ObjectType, Platform, SlugTarget};
use crate::domain::repositories::TargetRepository;
use crate::error::AppError;
use crate::utils::utm::{UtmConfig, append_query, query_string};

/// One rendered share link.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    pub platform: Platform,
    pub url: String,
}

pub struct TargetService {
    repo: Arc<dyn TargetRepository>,
    registry: Arc<SlugRegistry>,
    allowed_types: Vec<ObjectType>,
    allowed_taxonomies: Vec<String>,
    base_url: String,
    utm: UtmConfig,
    redirects_enabled: bool,
}

impl TargetService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repo: Arc<dyn TargetRepository>,
        registry: Arc<SlugRegistry>,
        allowed_types: Vec<ObjectType>,
        allowed_taxonomies: Vec<String>,
        base_url: String,
        utm: UtmConfig,
        redirects_enabled: bool,
    ) -> Self {
        Self {
            repo,
            registry,
            allowed_types,
            allowed_taxonomies,
            base_url: base_url.trim_end_matches('/').to_string(),
            utm,
            redirects_enabled,
        }
    }

    /// Registers a target, or refreshes its metadata if it already exists.
    ///
    /// A refresh can change the destination URL behind existing slugs, so
    /// the registry's memoized map is dropped afterwards.
    pub async fn register(&self, new_target: NewTarget) -> Result<SlugTarget, AppError> {
        if new_target.object_id <= 0 {
            return Err(AppError::bad_request(
                "object_id must be positive",
                json!({ "object_id": new_target.object_id }),
            ));
        }

        if !self.allowed_types.contains(&new_target.object_type) {
            return Err(AppError::bad_request(
                "Object type not enabled for sharing",
                json!({ "object_type": new_target.object_type }),
            ));
        }

        if new_target.object_type == ObjectType::Term {
            match new_target.taxonomy.as_deref() {
                None | Some("") => {
                    return Err(AppError::bad_request(
                        "Terms require a taxonomy",
                        json!({}),
                    ));
                }
                Some(taxonomy) if !self.allowed_taxonomies.iter().any(|t| t == taxonomy) => {
                    return Err(AppError::bad_request(
                        "Taxonomy not enabled for sharing",
                        json!({ "taxonomy": taxonomy }),
                    ));
                }
                Some(_) => {}
            }
        }

        if !new_target.url.is_empty() && url::Url::parse(&new_target.url).is_err() {
            return Err(AppError::bad_request(
                "url must be absolute and well-formed",
                json!({ "url": new_target.url }),
            ));
        }

        let target = self.repo.upsert(new_target).await?;
        self.registry.invalidate().await;

        info!(
            object_type = %target.object_type,
            object_id = target.object_id,
            "target registered"
        );
        Ok(target)
    }

    pub async fn get(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<SlugTarget, AppError> {
        self.repo.find(object_type, object_id).await?.ok_or_else(|| {
            AppError::not_found(
                "Target not found",
                json!({ "object_type": object_type, "object_id": object_id }),
            )
        })
    }

    /// Renders one share link per platform for a target.
    ///
    /// With redirects enabled and a slug assigned, links go through the
    /// vanity path so hits are counted. Otherwise they point straight at
    /// the destination URL with the UTM decoration inlined.
    pub async fn share_links(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<Vec<ShareLink>, AppError> {
        let target = self.get(object_type, object_id).await?;
        let term = target.primary_keyword().to_string();

        let links = Platform::ALL
            .iter()
            .map(|platform| {
                let url = match target.slug.as_deref().filter(|s| !s.is_empty()) {
                    Some(slug) if self.redirects_enabled => {
                        format!("{}/{slug}{}", self.base_url, platform.suffix())
                    }
                    _ => append_query(&target.url, &query_string(*platform, &term, &self.utm)),
                };
                ShareLink {
                    platform: *platform,
                    url,
                }
            })
            .collect();

        Ok(links)
    }

    /// Storage liveness, surfaced by the health endpoint.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repo.ping().await
    }
}
