//! Repository trait for redirect hit counters.

use crate::domain::entities::{ObjectType, Platform};
use crate::error::AppError;
use async_trait::async_trait;

/// Aggregated hit counts for one target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitCounts {
    pub total: i64,
    /// Per-platform counts, only for platforms that recorded at least one hit.
    pub by_platform: Vec<(Platform, i64)>,
}

/// Repository interface for hit counters.
///
/// Counters are monotonic: they are incremented by exactly one per
/// qualifying redirect and never reset.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitRepository: Send + Sync {
    /// Increments a counter and returns the new value.
    ///
    /// `platform = None` addresses the per-object total.
    async fn increment(
        &self,
        object_type: ObjectType,
        object_id: i64,
        platform: Option<Platform>,
    ) -> Result<i64, AppError>;

    /// Reads the counters for one target. Missing rows count as zero.
    async fn counts(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<HitCounts, AppError>;
}
