//! REST API controllers.

pub mod forum_controller;
pub mod health_controller;

pub use health_controller::*;
