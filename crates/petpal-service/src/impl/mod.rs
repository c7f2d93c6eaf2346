//! Service implementations.

pub mod forum_service_impl;

pub use forum_service_impl::*;
