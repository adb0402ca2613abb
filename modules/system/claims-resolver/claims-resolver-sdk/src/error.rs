//! Error types for claims resolvers.

use thiserror::Error;

/// Errors a resolver may report for a single call.
#[derive(Debug, Error)]
pub enum ClaimsResolverError {
    /// The credential was addressed to this resolver but is invalid, expired, or malformed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A service the resolver depends on is not available.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The caller cancelled the authentication step.
    #[error("claims resolution cancelled")]
    Cancelled,

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
