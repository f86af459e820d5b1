//! Error types for the Snapshot SDK
//!
//! Focused error structs carry the context of the failing boundary (hub
//! query, score API call, ballot shaping); [`SnapshotError`] unifies them for
//! callers that want a single error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Voting method / ballot errors
// =============================================================================

/// Error when a proposal carries a voting method string outside the known set
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Unsupported voting method: {method}")]
pub struct UnsupportedVotingMethod {
    /// The unrecognized wire string
    pub method: String,
}

impl UnsupportedVotingMethod {
    /// Create a new unsupported voting method error
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
        }
    }
}

/// Error when a ballot choice has the wrong shape for the proposal's method
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Malformed choice: {message}")]
pub struct MalformedChoice {
    /// Detailed error message
    pub message: String,
    /// The voting method the choice was validated against
    pub method: Option<String>,
}

impl MalformedChoice {
    /// Create a new malformed choice error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            method: None,
        }
    }

    /// Create a new malformed choice error tagged with the voting method
    pub fn with_method(message: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            method: Some(method.into()),
        }
    }
}

// =============================================================================
// Hub / score API errors
// =============================================================================

/// Error when a GraphQL query against the hub fails
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Hub query error: {message}")]
pub struct HubQueryError {
    /// Detailed error message
    pub message: String,
    /// The GraphQL root field being queried
    pub field: Option<String>,
}

impl HubQueryError {
    /// Create a new hub query error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new hub query error with the queried root field
    pub fn with_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

/// Error when the scoring oracle call fails or returns an unusable payload
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Score API error: {message}")]
pub struct ScoreApiError {
    /// Detailed error message
    pub message: String,
    /// The score API URL that was called
    pub url: Option<String>,
}

impl ScoreApiError {
    /// Create a new score API error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            url: None,
        }
    }

    /// Create a new score API error with the endpoint URL
    pub fn with_url(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            url: Some(url.into()),
        }
    }
}

/// Error when the external wallet bridge fails to produce a signature
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Signing error: {message}")]
pub struct SigningError {
    /// Detailed error message
    pub message: String,
}

impl SigningError {
    /// Create a new signing error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// Unified error type
// =============================================================================

/// Unified error type covering every SDK boundary
#[derive(Debug, Error)]
pub enum SnapshotError {
    // Voting method / ballot errors
    #[error(transparent)]
    UnsupportedVotingMethod(#[from] UnsupportedVotingMethod),
    #[error(transparent)]
    MalformedChoice(#[from] MalformedChoice),

    // Hub / score API errors
    #[error(transparent)]
    HubQuery(#[from] HubQueryError),
    #[error(transparent)]
    ScoreApi(#[from] ScoreApiError),
    #[error(transparent)]
    Signing(#[from] SigningError),

    // Transport / serialization
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias using the unified [`SnapshotError`]
pub type SnapshotResult<T> = Result<T, SnapshotError>;
