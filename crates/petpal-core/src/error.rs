//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Generic message returned to API clients for any upstream fetch failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch Reddit posts";

/// Unified error type for all layers of PetPal.
#[derive(Error, Debug)]
pub enum PetpalError {
    // ============ Upstream Fetch Errors ============
    /// The outbound call could not be completed (network, DNS, refused, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status code.
    #[error("Upstream returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// The upstream body could not be parsed into the expected structure.
    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),

    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PetpalError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Transport(_) | Self::UpstreamStatus { .. } | Self::MalformedPayload(_) => 502,
            Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::UpstreamStatus { .. } => "UPSTREAM_STATUS_ERROR",
            Self::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport<T: Into<String>>(message: T) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an upstream status error.
    #[must_use]
    pub fn upstream_status<T: Into<String>>(status: u16, message: T) -> Self {
        Self::UpstreamStatus {
            status,
            message: message.into(),
        }
    }

    /// Creates a malformed payload error.
    #[must_use]
    pub fn malformed_payload<T: Into<String>>(message: T) -> Self {
        Self::MalformedPayload(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error came out of an upstream fetch.
    #[must_use]
    pub const fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::UpstreamStatus { .. } | Self::MalformedPayload(_)
        )
    }

    /// Checks if this error is retriable.
    ///
    /// Nothing in the ingestion path retries on its own; callers use this
    /// to decide whether trying again later is worthwhile.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::UpstreamStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// `Other` cannot clone its source chain, so the copy keeps only the message.
impl Clone for PetpalError {
    fn clone(&self) -> Self {
        match self {
            Self::Transport(msg) => Self::Transport(msg.clone()),
            Self::UpstreamStatus { status, message } => Self::UpstreamStatus {
                status: *status,
                message: message.clone(),
            },
            Self::MalformedPayload(msg) => Self::MalformedPayload(msg.clone()),
            Self::NotFound { resource_type, id } => Self::NotFound {
                resource_type: *resource_type,
                id: id.clone(),
            },
            Self::Validation(msg) => Self::Validation(msg.clone()),
            Self::Configuration(msg) => Self::Configuration(msg.clone()),
            Self::Internal(msg) => Self::Internal(msg.clone()),
            Self::Other(err) => Self::Other(anyhow::anyhow!("{err:#}")),
        }
    }
}

impl From<serde_json::Error> for PetpalError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `PetpalError`.
    ///
    /// Upstream failures collapse into one generic code and message so that
    /// transport details never reach API clients.
    #[must_use]
    pub fn from_error(error: &PetpalError) -> Self {
        if error.is_upstream_failure() {
            return Self {
                code: "UPSTREAM_FETCH_FAILED".to_string(),
                message: UPSTREAM_FAILURE_MESSAGE.to_string(),
            };
        }

        let message = match error {
            PetpalError::Internal(_) | PetpalError::Other(_) | PetpalError::Configuration(_) => {
                "Something went wrong!".to_string()
            }
            other => other.to_string(),
        };

        Self {
            code: error.error_code().to_string(),
            message,
        }
    }
}

impl From<&PetpalError> for ErrorResponse {
    fn from(error: &PetpalError) -> Self {
        Self::from_error(error)
    }
}
