//! Cache key generators for consistent key naming.

/// Prefix for cached Reddit listings.
const REDDIT_PREFIX: &str = "reddit";

/// Generate the cache key for a subreddit listing.
#[must_use]
pub fn reddit_posts(subreddit: &str) -> String {
    format!("{REDDIT_PREFIX}:{subreddit}")
}
