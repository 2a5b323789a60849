//! DTOs for hit statistics.

use serde::Serialize;

use crate::domain::entities::{ObjectType, Platform};
use crate::domain::repositories::HitCounts;

/// Hit counts for one target: the overall total plus per-platform rows.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub object_type: ObjectType,
    pub object_id: i64,
    pub total: i64,
    pub platforms: Vec<PlatformHits>,
}

#[derive(Debug, Serialize)]
pub struct PlatformHits {
    pub platform: Platform,
    pub hits: i64,
}

impl StatsResponse {
    pub fn from_counts(object_type: ObjectType, object_id: i64, counts: HitCounts) -> Self {
        Self {
            object_type,
            object_id,
            total: counts.total,
            platforms: counts
                .by_platform
                .into_iter()
                .map(|(platform, hits)| PlatformHits { platform, hits })
                .collect(),
        }
    }
}
