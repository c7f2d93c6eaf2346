//! Result type aliases for PetPal.

use crate::PetpalError;

/// A specialized `Result` type for PetPal operations.
pub type PetpalResult<T> = Result<T, PetpalError>;
