use crate::domain::entities::{ObjectType, Platform};
use chrono::{DateTime, Utc};

/// One qualifying redirect, queued for asynchronous counter updates.
///
/// The background worker increments two counters per event: the per-object
/// total and the (object, platform) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct HitEvent {
    pub object_type: ObjectType,
    pub object_id: i64,
    pub platform: Platform,
    pub occurred_at: DateTime<Utc>,
}

impl HitEvent {
    pub fn new(object_type: ObjectType, object_id: i64, platform: Platform) -> Self {
        Self {
            object_type,
            object_id,
            platform,
            occurred_at: Utc::now(),
        }
    }
}
