//! HTTP client for Reddit listings.

use super::normalize_listing;
use async_trait::async_trait;
use chrono::Utc;
use petpal_config::RedditConfig;
use petpal_core::{PetpalError, PetpalResult, Post};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::debug;

/// Source of posts for a subreddit.
#[async_trait]
pub trait PostFetcher: Send + Sync {
    /// Fetches and normalizes the current posts of `subreddit`, in upstream order.
    async fn fetch(&self, subreddit: &str) -> PetpalResult<Vec<Post>>;
}

/// Fetches `/r/{subreddit}.json` listings over HTTP.
///
/// One request per call, no retries. Transport failures, non-2xx statuses
/// and unparsable bodies each map to their own `PetpalError` variant.
pub struct RedditFetcher {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl RedditFetcher {
    /// Creates a fetcher from configuration.
    pub fn new(config: &RedditConfig) -> PetpalResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PetpalError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.base_url, &config.user_agent))
    }

    /// Creates a fetcher around an existing client.
    pub fn with_client(client: Client, base_url: &str, user_agent: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    fn listing_url(&self, subreddit: &str) -> String {
        format!("{}/r/{}.json", self.base_url, subreddit)
    }
}

#[async_trait]
impl PostFetcher for RedditFetcher {
    async fn fetch(&self, subreddit: &str) -> PetpalResult<Vec<Post>> {
        let url = self.listing_url(subreddit);
        debug!("Fetching Reddit listing: {}", url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PetpalError::upstream_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unexpected status"),
            ));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let listing: serde_json::Value = serde_json::from_slice(&body)?;

        normalize_listing(&listing, subreddit, Utc::now())
    }
}

fn map_transport_error(err: reqwest::Error) -> PetpalError {
    if err.is_timeout() {
        PetpalError::Transport(format!("request timed out: {}", err))
    } else if err.is_connect() {
        PetpalError::Transport(format!("connection failed: {}", err))
    } else {
        PetpalError::Transport(err.to_string())
    }
}
