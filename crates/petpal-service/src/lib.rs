//! # PetPal Service
//!
//! Forum ingestion for the PetPal backend: a TTL cache, the Reddit listing
//! fetcher and normalizer, the cached `ForumService` pipeline, and the
//! background sweeper that keeps the cache bounded.

pub mod cache;
pub mod forum_service;
pub mod reddit;
pub mod sweeper;

#[path = "impl/mod.rs"]
pub mod service_impl;

pub use cache::*;
pub use forum_service::*;
pub use reddit::*;
pub use service_impl::*;
pub use sweeper::*;
