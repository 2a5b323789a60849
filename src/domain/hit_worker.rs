//! Background worker draining the hit event queue into counter updates.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::warn;

use crate::domain::entities::Platform;
use crate::domain::hit_event::HitEvent;
use crate::domain::repositories::HitRepository;
use crate::error::AppError;

/// Processes queued hit events until the channel closes.
///
/// Each event increments two counters: the per-object total and the
/// (object, platform) pair. Transient storage errors are retried with
/// exponential backoff; an event that still fails after the retry budget
/// is logged and dropped, never crashing the worker.
pub async fn run_hit_worker(mut rx: mpsc::Receiver<HitEvent>, repo: Arc<dyn HitRepository>) {
    while let Some(ev) = rx.recv().await {
        // Each counter retries on its own. Retrying them as a pair would
        // re-run a successful total increment when the platform increment
        // hits a transient error, counting one redirect twice.
        let total = increment_with_retry(&*repo, &ev, None).await;
        let platform = increment_with_retry(&*repo, &ev, Some(ev.platform)).await;

        if let Err(e) = total.and(platform) {
            warn!(
                "Dropping hit event for {} {} ({}): {}",
                ev.object_type, ev.object_id, ev.platform, e
            );
            metrics::counter!("hit_events_dropped_total").increment(1);
        }
    }
}

async fn increment_with_retry(
    repo: &dyn HitRepository,
    ev: &HitEvent,
    platform: Option<Platform>,
) -> Result<i64, AppError> {
    let strategy = ExponentialBackoff::from_millis(50).map(jitter).take(3);
    Retry::start(strategy, || {
        repo.increment(ev.object_type, ev.object_id, platform)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ObjectType, Platform};
    use crate::domain::repositories::HitCounts;
    use crate::infrastructure::persistence::InMemoryHitRepository;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails per-platform increments a fixed number of times, then delegates.
    struct FlakyHitRepository {
        inner: InMemoryHitRepository,
        platform_failures_left: AtomicUsize,
    }

    impl FlakyHitRepository {
        fn failing_platform_increments(n: usize) -> Self {
            Self {
                inner: InMemoryHitRepository::new(),
                platform_failures_left: AtomicUsize::new(n),
            }
        }
    }

    #[async_trait]
    impl HitRepository for FlakyHitRepository {
        async fn increment(
            &self,
            object_type: ObjectType,
            object_id: i64,
            platform: Option<Platform>,
        ) -> Result<i64, AppError> {
            if platform.is_some()
                && self
                    .platform_failures_left
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok()
            {
                return Err(AppError::internal("storage hiccup", json!({})));
            }
            self.inner.increment(object_type, object_id, platform).await
        }

        async fn counts(
            &self,
            object_type: ObjectType,
            object_id: i64,
        ) -> Result<HitCounts, AppError> {
            self.inner.counts(object_type, object_id).await
        }
    }

    #[tokio::test]
    async fn test_worker_increments_total_and_platform() {
        let repo = Arc::new(InMemoryHitRepository::new());
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn(run_hit_worker(rx, repo.clone()));

        tx.send(HitEvent::new(ObjectType::Post, 7, Platform::Facebook))
            .await
            .unwrap();
        tx.send(HitEvent::new(ObjectType::Post, 7, Platform::Twitter))
            .await
            .unwrap();
        drop(tx);
        handle.await.unwrap();

        let counts = repo.counts(ObjectType::Post, 7).await.unwrap();
        assert_eq!(counts.total, 2);
        assert!(counts.by_platform.contains(&(Platform::Facebook, 1)));
        assert!(counts.by_platform.contains(&(Platform::Twitter, 1)));
    }

    #[tokio::test]
    async fn test_worker_keys_counters_by_object() {
        let repo = Arc::new(InMemoryHitRepository::new());
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn(run_hit_worker(rx, repo.clone()));

        tx.send(HitEvent::new(ObjectType::Post, 7, Platform::Facebook))
            .await
            .unwrap();
        tx.send(HitEvent::new(ObjectType::Term, 7, Platform::Facebook))
            .await
            .unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(repo.counts(ObjectType::Post, 7).await.unwrap().total, 1);
        assert_eq!(repo.counts(ObjectType::Term, 7).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_transient_platform_failure_counts_total_once() {
        let repo = Arc::new(FlakyHitRepository::failing_platform_increments(1));
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn(run_hit_worker(rx, repo.clone()));

        tx.send(HitEvent::new(ObjectType::Post, 7, Platform::Facebook))
            .await
            .unwrap();
        drop(tx);
        handle.await.unwrap();

        let counts = repo.counts(ObjectType::Post, 7).await.unwrap();
        assert_eq!(counts.total, 1);
        assert!(counts.by_platform.contains(&(Platform::Facebook, 1)));
    }

    #[tokio::test]
    async fn test_exhausted_platform_retries_drop_the_event() {
        // Ten failures outlast the per-counter retry budget.
        let repo = Arc::new(FlakyHitRepository::failing_platform_increments(10));
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn(run_hit_worker(rx, repo.clone()));

        tx.send(HitEvent::new(ObjectType::Post, 7, Platform::Facebook))
            .await
            .unwrap();
        drop(tx);
        handle.await.unwrap();

        let counts = repo.counts(ObjectType::Post, 7).await.unwrap();
        assert_eq!(counts.total, 1);
        assert!(counts.by_platform.is_empty());
    }
}
