//! Token service error types.

use thiserror::Error;

use inulearn_core::LearningError;

/// Errors that can occur when issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured signing algorithm is not an HMAC algorithm.
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The configured token lifetime does not fit a timestamp.
    #[error("token lifetime of {0} hours is too long")]
    LifetimeTooLong(u64),

    /// The token could not be signed.
    #[error("failed to encode token: {0}")]
    Encoding(String),

    /// The token's expiry has passed.
    #[error("token expired")]
    Expired,

    /// The token failed signature or format checks.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The token carries no user identifier.
    #[error("token has no subject")]
    MissingSubject,
}

impl From<AuthError> for LearningError {
    fn from(err: AuthError) -> Self {
        LearningError::InvalidToken(err.to_string())
    }
}
