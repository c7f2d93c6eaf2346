//! Validation utilities.

use crate::{PetpalError, PetpalResult};

/// Longest subreddit name accepted.
pub const MAX_SUBREDDIT_LEN: usize = 64;

/// Validates a subreddit name before it is used in a cache key or an
/// upstream URL.
///
/// Accepts 1 to [`MAX_SUBREDDIT_LEN`] ASCII letters, digits, or underscores.
pub fn validate_subreddit(name: &str) -> PetpalResult<()> {
    if rules::subreddit_name(name) {
        Ok(())
    } else {
        Err(PetpalError::Validation(format!("Invalid subreddit: {name}")))
    }
}

/// Common validation functions.
pub mod rules {
    use super::MAX_SUBREDDIT_LEN;

    /// Whether `name` is a well-formed subreddit name.
    #[must_use]
    pub fn subreddit_name(name: &str) -> bool {
        !name.is_empty()
            && name.len() <= MAX_SUBREDDIT_LEN
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
