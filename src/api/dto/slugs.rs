//! DTOs for slug assignment endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::ObjectType;

/// Compiled regex for custom slug validation.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z\-_$.*()]+$").unwrap());

/// Request to rename a target's slug to a chosen value.
#[derive(Debug, Deserialize, Validate)]
pub struct RenameSlugRequest {
    #[validate(length(min = 1, max = 20))]
    #[validate(regex(
        path = "*SLUG_REGEX",
        message = "Slug contains characters outside [0-9a-zA-Z-_$.*()]"
    ))]
    pub slug: String,
}

/// A target's current slug assignment.
#[derive(Debug, Serialize)]
pub struct SlugResponse {
    pub object_type: ObjectType,
    pub object_id: i64,
    pub slug: String,
}

/// Outcome of a backfill sweep over targets missing slugs.
#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub summary: SweepSummary,

    /// One line per failed target.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SweepSummary {
    pub successful: u32,
    pub failed: u32,
}
