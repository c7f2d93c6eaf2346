//! Forum service trait definition.

use async_trait::async_trait;
use petpal_core::{PetpalResult, Post};

/// Forum service trait.
#[async_trait]
pub trait ForumService: Send + Sync {
    /// Gets the posts of a subreddit, served from cache while fresh.
    async fn get_posts(&self, subreddit: &str) -> PetpalResult<Vec<Post>>;

    /// Subreddit used when a caller does not name one.
    fn default_subreddit(&self) -> &str;

    /// Drops expired cache entries, returning how many were removed.
    fn sweep_cache(&self) -> usize;

    /// Number of cached listings, including expired ones not yet swept.
    fn cached_entries(&self) -> usize;
}
