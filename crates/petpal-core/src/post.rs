//! Canonical forum post shared by every layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a post came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PostOrigin {
    /// Ingested from a subreddit.
    Reddit,
    /// Written by a PetPal user.
    Community,
}

impl fmt::Display for PostOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reddit => write!(f, "Reddit"),
            Self::Community => write!(f, "Community"),
        }
    }
}

/// A forum post in the app's canonical shape.
///
/// Every field always holds a value; absent upstream data is resolved to a
/// default before a `Post` is built. The wire names match what the mobile
/// client reads (`selftext`, `created_utc` in epoch seconds, `hasImage`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Post {
    /// Post title.
    pub title: String,
    /// Post body text.
    #[serde(rename = "selftext")]
    pub body: String,
    /// Creation time, serialized as seconds since the Unix epoch.
    #[serde(rename = "created_utc", with = "chrono::serde::ts_seconds")]
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 1_700_000_000))]
    pub created_at: DateTime<Utc>,
    /// Author name.
    pub author: String,
    /// Subreddit or community category the post belongs to.
    #[serde(rename = "subreddit")]
    pub source_group: String,
    /// Whether the post links directly to an image.
    #[serde(rename = "hasImage")]
    pub has_image: bool,
    /// Origin of the post.
    #[serde(rename = "source")]
    pub origin: PostOrigin,
}
