//! Mapping from Reddit listing JSON to canonical posts.
//!
//! Reddit payloads are treated as untrusted: any field may be missing or of
//! the wrong type. Nothing here fails on a single post; every gap resolves to
//! a documented default.

use chrono::{DateTime, TimeZone, Utc};
use petpal_core::{PetpalError, PetpalResult, Post, PostOrigin};
use serde_json::Value;

/// URL suffixes that mark a post as an image post.
pub const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".png", ".gif"];

const DEFAULT_AUTHOR: &str = "Unknown";

/// Whether `url` points directly at an image.
#[must_use]
pub fn has_image_extension(url: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
}

/// Normalize one post's `data` object.
///
/// `queried_group` fills in `subreddit` when the payload omits it, and `now`
/// stands in for a missing or unusable `created_utc`.
#[must_use]
pub fn normalize_post(raw: &Value, queried_group: &str, now: DateTime<Utc>) -> Post {
    Post {
        title: text_field(raw, "title").unwrap_or_default(),
        body: text_field(raw, "selftext").unwrap_or_default(),
        created_at: raw
            .get("created_utc")
            .and_then(Value::as_f64)
            .and_then(epoch_seconds_to_datetime)
            .unwrap_or(now),
        author: text_field(raw, "author").unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        source_group: text_field(raw, "subreddit").unwrap_or_else(|| queried_group.to_string()),
        has_image: raw
            .get("url")
            .and_then(Value::as_str)
            .is_some_and(has_image_extension),
        origin: PostOrigin::Reddit,
    }
}

/// Normalize a whole listing document, keeping upstream order.
///
/// The document must have the `{ data: { children: [...] } }` envelope;
/// anything else is a malformed payload. A child without a `data` object
/// still produces a post made entirely of defaults.
pub fn normalize_listing(
    listing: &Value,
    queried_group: &str,
    now: DateTime<Utc>,
) -> PetpalResult<Vec<Post>> {
    let children = listing
        .get("data")
        .and_then(|data| data.get("children"))
        .and_then(Value::as_array)
        .ok_or_else(|| PetpalError::malformed_payload("listing has no data.children array"))?;

    Ok(children
        .iter()
        .map(|child| normalize_post(child.get("data").unwrap_or(&Value::Null), queried_group, now))
        .collect())
}

fn text_field(raw: &Value, name: &str) -> Option<String> {
    raw.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn epoch_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * 1e9) as u32;
    Utc.timestamp_opt(whole as i64, nanos).single()
}
