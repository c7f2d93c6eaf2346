//! Caching infrastructure for the service layer.
//!
//! An in-memory key/value store with per-entry expiry. Listings fetched
//! from Reddit are kept here so repeated requests do not hit the upstream.

pub mod cache_keys;
mod ttl_cache;

pub use ttl_cache::{TtlCache, DEFAULT_TTL};
