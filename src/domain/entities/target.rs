//! Shareable objects and the slug registry descriptor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of object a vanity slug can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Post,
    Term,
    User,
}

impl ObjectType {
    pub const ALL: [ObjectType; 3] = [ObjectType::Post, ObjectType::Term, ObjectType::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Post => "post",
            ObjectType::Term => "term",
            ObjectType::User => "user",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(ObjectType::Post),
            "term" => Ok(ObjectType::Term),
            "user" => Ok(ObjectType::User),
            _ => Err(()),
        }
    }
}

/// Publication status of a target.
///
/// Everything except [`ObjectStatus::Trash`] is eligible for the slug
/// registry; trashed targets keep their row but stop resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectStatus {
    Published,
    Scheduled,
    Draft,
    Pending,
    Private,
    Trash,
}

impl ObjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectStatus::Published => "published",
            ObjectStatus::Scheduled => "scheduled",
            ObjectStatus::Draft => "draft",
            ObjectStatus::Pending => "pending",
            ObjectStatus::Private => "private",
            ObjectStatus::Trash => "trash",
        }
    }

    /// Whether a target in this status participates in slug resolution.
    pub fn is_resolvable(&self) -> bool {
        !matches!(self, ObjectStatus::Trash)
    }
}

impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(ObjectStatus::Published),
            "scheduled" => Ok(ObjectStatus::Scheduled),
            "draft" => Ok(ObjectStatus::Draft),
            "pending" => Ok(ObjectStatus::Pending),
            "private" => Ok(ObjectStatus::Private),
            "trash" => Ok(ObjectStatus::Trash),
            _ => Err(()),
        }
    }
}

/// A shareable object registered with the service.
///
/// One row per `(object_type, object_id)` pair. The `slug` column holds the
/// object's current vanity slug; renaming replaces it, so superseded slugs
/// stop resolving once caches expire.
#[derive(Debug, Clone)]
pub struct SlugTarget {
    pub id: i64,
    pub object_type: ObjectType,
    pub object_id: i64,
    /// Present only for terms; qualifies which taxonomy the term belongs to.
    pub taxonomy: Option<String>,
    /// Canonical destination URL. May be empty when unresolvable at
    /// registration time; such targets never redirect.
    pub url: String,
    pub title: String,
    pub status: ObjectStatus,
    pub slug: Option<String>,
    /// Per-object `utm_term` override.
    pub campaign_term: Option<String>,
    /// SEO focus keyword used as the `utm_term` fallback.
    pub focus_keyword: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SlugTarget {
    /// Returns the `utm_term` for this target: the configured campaign term,
    /// falling back to the SEO focus keyword, else empty.
    pub fn primary_keyword(&self) -> &str {
        match self.campaign_term.as_deref() {
            Some(term) if !term.is_empty() => term,
            _ => match self.focus_keyword.as_deref() {
                Some(kw) if !kw.is_empty() => kw,
                _ => "",
            },
        }
    }

    /// Whether this target currently has a usable slug.
    pub fn has_slug(&self) -> bool {
        self.slug.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Input data for registering (or refreshing) a target.
#[derive(Debug, Clone)]
pub struct NewTarget {
    pub object_type: ObjectType,
    pub object_id: i64,
    pub taxonomy: Option<String>,
    pub url: String,
    pub title: String,
    pub status: ObjectStatus,
    pub campaign_term: Option<String>,
    pub focus_keyword: Option<String>,
}

/// The value side of the slug registry map: where a slug leads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlugEntry {
    pub object_type: ObjectType,
    pub object_id: i64,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<String>,
}

impl SlugEntry {
    pub fn from_target(target: &SlugTarget) -> Self {
        Self {
            object_type: target.object_type,
            object_id: target.object_id,
            url: target.url.clone(),
            taxonomy: target.taxonomy.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_target() -> SlugTarget {
        SlugTarget {
            id: 1,
            object_type: ObjectType::Post,
            object_id: 7,
            taxonomy: None,
            url: "https://site.example/x".to_string(),
            title: "Example".to_string(),
            status: ObjectStatus::Published,
            slug: Some("ab12cd34".to_string()),
            campaign_term: None,
            focus_keyword: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_primary_keyword_prefers_campaign_term() {
        let mut target = make_target();
        target.campaign_term = Some("running shoes".to_string());
        target.focus_keyword = Some("sneakers".to_string());
        assert_eq!(target.primary_keyword(), "running shoes");
    }

    #[test]
    fn test_primary_keyword_falls_back_to_focus_keyword() {
        let mut target = make_target();
        target.campaign_term = Some(String::new());
        target.focus_keyword = Some("sneakers".to_string());
        assert_eq!(target.primary_keyword(), "sneakers");
    }

    #[test]
    fn test_primary_keyword_empty_when_unset() {
        assert_eq!(make_target().primary_keyword(), "");
    }

    #[test]
    fn test_has_slug() {
        let mut target = make_target();
        assert!(target.has_slug());
        target.slug = Some(String::new());
        assert!(!target.has_slug());
        target.slug = None;
        assert!(!target.has_slug());
    }

    #[test]
    fn test_slug_entry_from_target() {
        let target = make_target();
        let entry = SlugEntry::from_target(&target);
        assert_eq!(entry.object_type, ObjectType::Post);
        assert_eq!(entry.object_id, 7);
        assert_eq!(entry.url, "https://site.example/x");
        assert!(entry.taxonomy.is_none());
    }

    #[test]
    fn test_trash_status_not_resolvable() {
        assert!(ObjectStatus::Published.is_resolvable());
        assert!(ObjectStatus::Draft.is_resolvable());
        assert!(!ObjectStatus::Trash.is_resolvable());
    }
}
