//! Hit count reads for the stats endpoint.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::ObjectType;
use crate::domain::repositories::{HitCounts, HitRepository, TargetRepository};
use crate::error::AppError;

pub struct StatsService {
    hits: Arc<dyn HitRepository>,
    targets: Arc<dyn TargetRepository>,
}

impl StatsService {
    pub fn new(hits: Arc<dyn HitRepository>, targets: Arc<dyn TargetRepository>) -> Self {
        Self { hits, targets }
    }

    /// Returns the hit counts for a registered target. An unregistered
    /// target is a 404; a registered target with no recorded hits reports
    /// zeros.
    pub async fn counts(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<HitCounts, AppError> {
        if self.targets.find(object_type, object_id).await?.is_none() {
            return Err(AppError::not_found(
                "Target not found",
                json!({ "object_type": object_type, "object_id": object_id }),
            ));
        }

        self.hits.counts(object_type, object_id).await
    }
}
