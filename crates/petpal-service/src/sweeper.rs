//! Background cache sweeper.

use crate::forum_service::ForumService;
use petpal_core::{PetpalError, PetpalResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(86_400);

/// Periodically removes expired entries from the forum cache.
///
/// Reads never depend on the sweeper; it only keeps keys that are no longer
/// requested from piling up.
pub struct CacheSweeper {
    service: Arc<dyn ForumService>,
    interval: Duration,
    running: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
}

impl CacheSweeper {
    /// Creates a sweeper that runs every `interval`, clamped to at most one day.
    pub fn new(service: Arc<dyn ForumService>, interval: Duration) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            service,
            interval: interval.clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL),
            running: AtomicBool::new(false),
            shutdown_tx,
        }
    }

    /// Runs the sweep loop until [`shutdown`](Self::shutdown) is called.
    ///
    /// The first sweep happens one interval after start.
    pub async fn start(&self) -> PetpalResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(PetpalError::Internal("Cache sweeper already running".to_string()));
        }

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        if *shutdown_rx.borrow() {
            self.running.store(false, Ordering::SeqCst);
            return Ok(());
        }

        info!(interval_secs = self.interval.as_secs(), "Starting cache sweeper");

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Cache sweeper received shutdown signal");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = self.service.sweep_cache();
                    debug!(removed, "Swept expired cache entries");
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!("Cache sweeper stopped");
        Ok(())
    }

    /// Signals the sweep loop to stop.
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Whether the sweep loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::service_impl::{ForumOptions, ForumServiceImpl};
    use crate::reddit::PostFetcher;
    use async_trait::async_trait;
    use petpal_core::Post;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingService {
        sweeps: AtomicUsize,
    }

    #[async_trait]
    impl ForumService for CountingService {
        async fn get_posts(&self, _subreddit: &str) -> PetpalResult<Vec<Post>> {
            Ok(Vec::new())
        }

        fn default_subreddit(&self) -> &str {
            "pets"
        }

        fn sweep_cache(&self) -> usize {
            self.sweeps.fetch_add(1, Ordering::SeqCst);
            0
        }

        fn cached_entries(&self) -> usize {
            0
        }
    }

    struct EmptyFetcher;

    #[async_trait]
    impl PostFetcher for EmptyFetcher {
        async fn fetch(&self, _subreddit: &str) -> PetpalResult<Vec<Post>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeps_once_per_interval() {
        let service = Arc::new(CountingService::default());
        let sweeper = Arc::new(CacheSweeper::new(service.clone(), Duration::from_secs(60)));

        let handle = tokio::spawn({
            let sweeper = sweeper.clone();
            async move { sweeper.start().await }
        });

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(sweeper.is_running());
        assert_eq!(service.sweeps.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(service.sweeps.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(service.sweeps.load(Ordering::SeqCst), 2);

        sweeper.shutdown();
        handle.await.unwrap().unwrap();
        assert!(!sweeper.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_expired_posts() {
        let cache = Arc::new(TtlCache::new());
        let options = ForumOptions {
            ttl: Duration::from_secs(30),
            ..ForumOptions::default()
        };
        let service = Arc::new(ForumServiceImpl::new(
            Arc::new(EmptyFetcher),
            cache.clone(),
            options,
        ));
        service.get_posts("pets").await.unwrap();
        service.get_posts("dogs").await.unwrap();
        assert_eq!(cache.len(), 2);

        let sweeper = Arc::new(CacheSweeper::new(service, Duration::from_secs(60)));
        let handle = tokio::spawn({
            let sweeper = sweeper.clone();
            async move { sweeper.start().await }
        });

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(cache.is_empty());

        sweeper.shutdown();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_start_returns_immediately() {
        let service = Arc::new(CountingService::default());
        let sweeper = CacheSweeper::new(service.clone(), Duration::from_secs(60));

        sweeper.shutdown();
        sweeper.start().await.unwrap();

        assert!(!sweeper.is_running());
        assert_eq!(service.sweeps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_rejected() {
        let sweeper = Arc::new(CacheSweeper::new(
            Arc::new(CountingService::default()),
            Duration::from_secs(60),
        ));
        let handle = tokio::spawn({
            let sweeper = sweeper.clone();
            async move { sweeper.start().await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;

        let err = sweeper.start().await.unwrap_err();
        assert!(matches!(err, PetpalError::Internal(_)));

        sweeper.shutdown();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_interval_is_clamped_to_one_day() {
        let service = Arc::new(CountingService::default());
        let sweeper = Arc::new(CacheSweeper::new(service.clone(), Duration::MAX));
        let handle = tokio::spawn({
            let sweeper = sweeper.clone();
            async move { sweeper.start().await }
        });

        tokio::time::sleep(Duration::from_secs(86_401)).await;
        assert_eq!(service.sweeps.load(Ordering::SeqCst), 1);

        sweeper.shutdown();
        handle.await.unwrap().unwrap();
    }
}
