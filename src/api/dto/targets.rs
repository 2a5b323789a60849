//! DTOs for target registration and retrieval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{NewTarget, ObjectStatus, ObjectType, SlugTarget};

/// Request to register a shareable object, or refresh one already known.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterTargetRequest {
    pub object_type: ObjectType,

    #[validate(range(min = 1, message = "object_id must be positive"))]
    pub object_id: i64,

    /// Required when `object_type` is `term`.
    pub taxonomy: Option<String>,

    /// Canonical destination URL. May be empty for objects that cannot be
    /// resolved yet; such targets never redirect.
    #[serde(default)]
    pub url: String,

    #[validate(length(min = 1, max = 500))]
    pub title: String,

    pub status: ObjectStatus,

    pub campaign_term: Option<String>,
    pub focus_keyword: Option<String>,
}

impl RegisterTargetRequest {
    pub fn into_new_target(self) -> NewTarget {
        NewTarget {
            object_type: self.object_type,
            object_id: self.object_id,
            taxonomy: self.taxonomy,
            url: self.url,
            title: self.title,
            status: self.status,
            campaign_term: self.campaign_term,
            focus_keyword: self.focus_keyword,
        }
    }
}

/// A registered target as returned by the API.
#[derive(Debug, Serialize)]
pub struct TargetResponse {
    pub object_type: ObjectType,
    pub object_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<String>,

    pub url: String,
    pub title: String,
    pub status: ObjectStatus,
    pub slug: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_term: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_keyword: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SlugTarget> for TargetResponse {
    fn from(target: SlugTarget) -> Self {
        Self {
            object_type: target.object_type,
            object_id: target.object_id,
            taxonomy: target.taxonomy,
            url: target.url,
            title: target.title,
            status: target.status,
            slug: target.slug,
            campaign_term: target.campaign_term,
            focus_keyword: target.focus_keyword,
            created_at: target.created_at,
            updated_at: target.updated_at,
        }
    }
}
