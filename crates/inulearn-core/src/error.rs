//! Learning engine error types.
//!
//! `LearningError` covers every failure a caller of the core operations can
//! see. `StoreError` lives here next to the `SubmissionStore` trait so the
//! service can classify store failures for retry decisions without string
//! matching.

use thiserror::Error;

/// Errors returned by the core learning operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LearningError {
    /// The requested subject is not a catalog key.
    #[error("subject '{0}' not supported")]
    InvalidSubject(String),

    /// The requested difficulty is not one of easy, medium, hard.
    #[error("difficulty must be one of: easy, medium, hard (got '{0}')")]
    InvalidDifficulty(String),

    /// A count parameter fell outside its inclusive range.
    #[error("count must be between {min} and {max} (got {value})")]
    InvalidCount { value: i64, min: i64, max: i64 },

    /// No catalog question has the given identifier.
    #[error("question not found: {0}")]
    QuestionNotFound(String),

    /// The token service rejected a token.
    #[error("invalid authentication credentials: {0}")]
    InvalidToken(String),
}

impl LearningError {
    /// Returns `true` if the error was caused by caller input.
    ///
    /// Every variant is a client error: the engine only touches in-memory,
    /// read-only data, so nothing here is worth retrying.
    pub fn is_client_error(&self) -> bool {
        true
    }

    /// HTTP status code a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            LearningError::InvalidSubject(_)
            | LearningError::InvalidDifficulty(_)
            | LearningError::InvalidCount { .. } => 400,
            LearningError::QuestionNotFound(_) => 404,
            LearningError::InvalidToken(_) => 401,
        }
    }
}

/// Errors that can occur when persisting a graded submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store did not answer within the configured timeout.
    #[error("store timed out after {0}ms")]
    Timeout(u64),

    /// The store could not be reached or failed transiently.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the record.
    #[error("store rejected submission: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(self, StoreError::Rejected(_))
    }
}
