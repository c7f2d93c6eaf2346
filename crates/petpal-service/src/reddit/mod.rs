//! Reddit ingestion: listing fetcher and post normalizer.

mod fetcher;
mod normalizer;

pub use fetcher::{PostFetcher, RedditFetcher};
pub use normalizer::{has_image_extension, normalize_listing, normalize_post, IMAGE_EXTENSIONS};
