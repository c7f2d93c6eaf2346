//! # PetPal Config
//!
//! Configuration management for the PetPal backend.
//! Supports layered configuration from TOML files and environment variables,
//! validated up front so bad settings fail at startup.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
