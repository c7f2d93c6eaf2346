//! # PetPal Server Library
//!
//! Wires configuration, the Reddit fetcher, the post cache and the REST
//! router into a runnable application.

pub mod app;
pub mod logging;
pub mod startup;

pub use app::{AppBuilder, Application};
