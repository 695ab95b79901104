//! Mock token service for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use inulearn_core::traits::{Claims, IssuedToken, TokenService};
use inulearn_core::LearningError;

const PREFIX: &str = "mock";

/// A token service that issues readable, unsigned tokens.
///
/// Tokens look like `mock:<subject>:<role>`. Useful for exercising the
/// service without a signing secret.
pub struct MockTokenService {
    /// Lifetime reported on issued tokens, in seconds.
    expires_in: u64,
    /// Number of verify calls made.
    verify_count: AtomicU32,
    /// Last token passed to `verify`.
    last_token: Mutex<Option<String>>,
}

impl MockTokenService {
    pub fn new() -> Self {
        Self {
            expires_in: 3600,
            verify_count: AtomicU32::new(0),
            last_token: Mutex::new(None),
        }
    }

    /// Get the number of verify calls made to this service.
    pub fn verify_count(&self) -> u32 {
        self.verify_count.load(Ordering::Relaxed)
    }

    /// Get the last token passed to `verify`.
    pub fn last_token(&self) -> Option<String> {
        match self.last_token.lock() {
            Ok(token) => token.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for MockTokenService {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenService for MockTokenService {
    fn name(&self) -> &str {
        "mock"
    }

    fn issue(&self, subject: &str, role: &str) -> anyhow::Result<IssuedToken> {
        if subject.is_empty() || subject.contains(':') {
            anyhow::bail!("mock subject must be non-empty and contain no ':'");
        }

        Ok(IssuedToken {
            access_token: format!("{PREFIX}:{subject}:{role}"),
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
        })
    }

    fn verify(&self, token: &str) -> Result<Claims, LearningError> {
        self.verify_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_token.lock() {
            *last = Some(token.to_string());
        }

        let mut parts = token.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(PREFIX), Some(sub), Some(role)) if !sub.is_empty() => Ok(Claims {
                sub: sub.to_string(),
                role: role.to_string(),
                exp: i64::MAX,
            }),
            _ => Err(LearningError::InvalidToken(format!(
                "not a mock token: {token}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify() {
        let service = MockTokenService::new();
        let token = service.issue("learner-1", "student").unwrap();
        assert_eq!(token.access_token, "mock:learner-1:student");

        let claims = service.verify(&token.access_token).unwrap();
        assert_eq!(claims.sub, "learner-1");
        assert_eq!(claims.role, "student");
        assert_eq!(service.verify_count(), 1);
        assert_eq!(service.last_token().as_deref(), Some("mock:learner-1:student"));
    }

    #[test]
    fn rejects_foreign_tokens() {
        let service = MockTokenService::new();
        for token in ["", "mock", "mock::student", "jwt:a:b", "eyJhbGciOi"] {
            assert!(
                matches!(service.verify(token), Err(LearningError::InvalidToken(_))),
                "accepted {token:?}"
            );
        }
        assert_eq!(service.verify_count(), 5);
    }

    #[test]
    fn refresh_reissues_same_identity() {
        let service = MockTokenService::new();
        let refreshed = service.refresh("mock:learner-2:parent").unwrap();
        assert_eq!(refreshed.access_token, "mock:learner-2:parent");
        assert!(service.refresh("bogus").is_err());
    }

    #[test]
    fn subject_with_separator_cannot_be_issued() {
        assert!(MockTokenService::new().issue("a:b", "student").is_err());
    }
}
