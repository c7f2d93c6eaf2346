//! # PetPal Core
//!
//! Core types and error definitions for the PetPal backend.
//! Every other crate in the workspace builds on the error type and the
//! canonical forum post defined here.

pub mod error;
pub mod post;
pub mod result;
pub mod validation;

pub use error::*;
pub use post::*;
pub use result::*;
pub use validation::*;
