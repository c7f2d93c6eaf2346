//! Cached Reddit ingestion pipeline.

use crate::cache::{cache_keys, TtlCache, DEFAULT_TTL};
use crate::forum_service::ForumService;
use crate::reddit::PostFetcher;
use async_trait::async_trait;
use parking_lot::Mutex;
use petpal_config::{CacheConfig, RedditConfig};
use petpal_core::{validate_subreddit, PetpalResult, Post};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Cache holding normalized listings keyed by `reddit:{subreddit}`.
pub type PostCache = TtlCache<Vec<Post>>;

/// Result of one upstream fetch, published to every caller that joined it.
/// `None` until the fetch finishes.
type FetchOutcome = Option<PetpalResult<Vec<Post>>>;

type InFlightMap = Mutex<HashMap<String, watch::Receiver<FetchOutcome>>>;

/// Tunables for [`ForumServiceImpl`].
#[derive(Debug, Clone)]
pub struct ForumOptions {
    /// How long a fetched listing stays fresh.
    pub ttl: Duration,
    /// Let one caller fetch while concurrent misses on the same key share its result.
    pub coalesce_misses: bool,
    /// Subreddit served when none is requested.
    pub default_subreddit: String,
}

impl Default for ForumOptions {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            coalesce_misses: true,
            default_subreddit: "pets".to_string(),
        }
    }
}

impl ForumOptions {
    /// Builds options from the cache and Reddit configuration sections.
    #[must_use]
    pub fn from_config(cache: &CacheConfig, reddit: &RedditConfig) -> Self {
        Self {
            ttl: cache.ttl(),
            coalesce_misses: cache.coalesce_misses,
            default_subreddit: reddit.default_subreddit.clone(),
        }
    }
}

/// Forum service backed by a [`PostFetcher`] and a [`PostCache`].
///
/// A read checks the cache first and only calls the fetcher on a miss.
/// Successful fetches are cached for `ttl`; failures are returned unchanged
/// and leave the cache untouched, so the next call fetches again.
///
/// With coalescing on, misses that arrive while a fetch for the same key is
/// running wait for that fetch and receive its outcome, success or failure.
pub struct ForumServiceImpl {
    fetcher: Arc<dyn PostFetcher>,
    cache: Arc<PostCache>,
    in_flight: InFlightMap,
    options: ForumOptions,
}

/// Role of a caller that missed the cache with coalescing on.
enum Flight<'a> {
    Leader(FlightGuard<'a>),
    Follower(watch::Receiver<FetchOutcome>),
}

/// Held by the caller doing the fetch. Dropping it, on completion or on
/// cancellation, removes the in-flight entry and closes the channel.
struct FlightGuard<'a> {
    in_flight: &'a InFlightMap,
    key: String,
    tx: watch::Sender<FetchOutcome>,
}

impl FlightGuard<'_> {
    fn publish(&self, outcome: &PetpalResult<Vec<Post>>) {
        self.tx.send_replace(Some(outcome.clone()));
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        // `tx` is still alive here, so no other leader can have replaced the entry.
        self.in_flight.lock().remove(&self.key);
    }
}

impl ForumServiceImpl {
    /// Creates a new forum service.
    pub fn new(
        fetcher: Arc<dyn PostFetcher>,
        cache: Arc<PostCache>,
        options: ForumOptions,
    ) -> Self {
        Self {
            fetcher,
            cache,
            in_flight: Mutex::new(HashMap::new()),
            options,
        }
    }

    /// The cache this service reads and populates.
    #[must_use]
    pub fn cache(&self) -> &Arc<PostCache> {
        &self.cache
    }

    async fn fetch_and_store(&self, subreddit: &str, key: &str) -> PetpalResult<Vec<Post>> {
        match self.fetcher.fetch(subreddit).await {
            Ok(posts) => {
                self.cache.set(key, posts.clone(), self.options.ttl);
                info!(subreddit, count = posts.len(), "Fetched Reddit posts");
                Ok(posts)
            }
            Err(e) => {
                warn!(
                    subreddit,
                    error = %e,
                    retriable = e.is_retriable(),
                    "Failed to fetch Reddit posts"
                );
                Err(e)
            }
        }
    }

    fn join_flight(&self, key: &str) -> Flight<'_> {
        let mut in_flight = self.in_flight.lock();
        if let Some(rx) = in_flight.get(key) {
            return Flight::Follower(rx.clone());
        }

        let (tx, rx) = watch::channel(None);
        in_flight.insert(key.to_string(), rx);
        Flight::Leader(FlightGuard {
            in_flight: &self.in_flight,
            key: key.to_string(),
            tx,
        })
    }

    async fn get_coalesced(&self, subreddit: &str, key: &str) -> PetpalResult<Vec<Post>> {
        loop {
            match self.join_flight(key) {
                Flight::Leader(guard) => {
                    // A flight may have finished between our miss and taking the lead.
                    if let Some(posts) = self.cache.get(key) {
                        return Ok(posts);
                    }
                    let outcome = self.fetch_and_store(subreddit, key).await;
                    guard.publish(&outcome);
                    return outcome;
                }
                Flight::Follower(mut rx) => {
                    let shared = rx
                        .wait_for(Option::is_some)
                        .await
                        .ok()
                        .and_then(|outcome| (*outcome).clone());
                    if let Some(outcome) = shared {
                        debug!(subreddit, "Served by a concurrent fetch");
                        return outcome;
                    }
                    // The leader was cancelled before finishing.
                    if let Some(posts) = self.cache.get(key) {
                        return Ok(posts);
                    }
                }
            }
        }
    }
}

#[async_trait]
impl ForumService for ForumServiceImpl {
    async fn get_posts(&self, subreddit: &str) -> PetpalResult<Vec<Post>> {
        validate_subreddit(subreddit)?;
        let key = cache_keys::reddit_posts(subreddit);

        if let Some(posts) = self.cache.get(&key) {
            return Ok(posts);
        }

        if self.options.coalesce_misses {
            self.get_coalesced(subreddit, &key).await
        } else {
            self.fetch_and_store(subreddit, &key).await
        }
    }

    fn default_subreddit(&self) -> &str {
        &self.options.default_subreddit
    }

    fn sweep_cache(&self) -> usize {
        self.cache.sweep()
    }

    fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
