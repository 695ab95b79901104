//! Collaborator traits.
//!
//! The engine never signs tokens or writes to a database itself. Token
//! issuance/verification and durable submission storage are reached through
//! these traits, implemented by the `inulearn-providers` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{LearningError, StoreError};
use crate::model::SubmissionRecord;

// ---------------------------------------------------------------------------
// Token service
// ---------------------------------------------------------------------------

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier.
    pub sub: String,
    /// Role, e.g. "student", "parent" or "teacher".
    pub role: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

/// A freshly issued access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

/// Issues and verifies access tokens.
pub trait TokenService: Send + Sync {
    /// Human-readable service name (e.g. "jwt").
    fn name(&self) -> &str;

    /// Issue a token for a user and role.
    fn issue(&self, subject: &str, role: &str) -> anyhow::Result<IssuedToken>;

    /// Verify a token and return its claims.
    fn verify(&self, token: &str) -> Result<Claims, LearningError>;

    /// Exchange a valid token for a new one with the same subject and role.
    fn refresh(&self, token: &str) -> Result<IssuedToken, LearningError> {
        let claims = self.verify(token)?;
        self.issue(&claims.sub, &claims.role)
            .map_err(|e| LearningError::InvalidToken(format!("{e:#}")))
    }
}

// ---------------------------------------------------------------------------
// Submission store
// ---------------------------------------------------------------------------

/// Durable storage for graded submissions.
///
/// Calls may block on I/O; the service wraps each one in a timeout.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Human-readable store name (e.g. "jsonl").
    fn name(&self) -> &str;

    /// Persist one graded submission.
    async fn record(&self, submission: &SubmissionRecord) -> Result<(), StoreError>;
}

/// Store that drops every submission.
pub struct NoopStore;

#[async_trait]
impl SubmissionStore for NoopStore {
    fn name(&self) -> &str {
        "noop"
    }

    async fn record(&self, _: &SubmissionRecord) -> Result<(), StoreError> {
        Ok(())
    }
}
