//! HMAC-signed JWT token service.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use inulearn_core::traits::{Claims, IssuedToken, TokenService};
use inulearn_core::LearningError;

use crate::error::AuthError;

const TOKEN_TYPE: &str = "Bearer";

/// Issues and verifies JWTs signed with a shared secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    expires_in_secs: u64,
}

impl JwtTokenService {
    /// Build a service for one of HS256, HS384 or HS512.
    pub fn new(secret: &str, algorithm: &str, expiration_hours: u64) -> Result<Self, AuthError> {
        let algorithm = parse_hmac_algorithm(algorithm)?;
        let expires_in_secs = expiration_hours
            .checked_mul(3600)
            .filter(|secs| i64::try_from(*secs).is_ok())
            .ok_or(AuthError::LifetimeTooLong(expiration_hours))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            expires_in_secs,
        })
    }

    /// Expiry timestamp for a token issued now.
    fn expiry(&self) -> Result<i64, AuthError> {
        i64::try_from(self.expires_in_secs)
            .ok()
            .and_then(|secs| Utc::now().timestamp().checked_add(secs))
            .ok_or(AuthError::LifetimeTooLong(self.expires_in_secs / 3600))
    }
}

fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, AuthError> {
    match name.to_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(AuthError::UnsupportedAlgorithm(name.to_string())),
    }
}

impl TokenService for JwtTokenService {
    fn name(&self) -> &str {
        "jwt"
    }

    fn issue(&self, subject: &str, role: &str) -> anyhow::Result<IssuedToken> {
        if subject.is_empty() {
            return Err(AuthError::MissingSubject.into());
        }

        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            exp: self.expiry()?,
        };

        let access_token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Encoding(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.expires_in_secs,
        })
    }

    fn verify(&self, token: &str) -> Result<Claims, LearningError> {
        let validation = Validation::new(self.algorithm);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed(e.to_string()),
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::MissingSubject.into());
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtTokenService {
        JwtTokenService::new("test-secret", "HS256", 24).unwrap()
    }

    #[test]
    fn issue_then_verify() {
        let service = service();
        let token = service.issue("uuid-123", "student").unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 24 * 3600);

        let claims = service.verify(&token.access_token).unwrap();
        assert_eq!(claims.sub, "uuid-123");
        assert_eq!(claims.role, "student");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = service().issue("uuid-123", "student").unwrap();
        let other = JwtTokenService::new("other-secret", "HS256", 24).unwrap();
        let err = other.verify(&token.access_token).unwrap_err();
        assert!(matches!(err, LearningError::InvalidToken(_)));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = service().verify("not.a.token").unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            sub: "uuid-123".into(),
            role: "student".into(),
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = service().verify(&token).unwrap_err();
        assert!(err.to_string().contains("expired"), "got: {err}");
    }

    #[test]
    fn algorithm_mismatch_is_rejected() {
        let token = JwtTokenService::new("test-secret", "HS512", 1)
            .unwrap()
            .issue("uuid-123", "teacher")
            .unwrap();
        assert!(service().verify(&token.access_token).is_err());
    }

    #[test]
    fn empty_subject_cannot_be_issued() {
        let err = service().issue("", "student").unwrap_err();
        assert!(err.to_string().contains("no subject"));
    }

    #[test]
    fn only_hmac_algorithms_are_accepted() {
        assert!(JwtTokenService::new("s", "hs384", 1).is_ok());
        assert!(matches!(
            JwtTokenService::new("s", "RS256", 1),
            Err(AuthError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn oversized_lifetime_is_rejected() {
        for hours in [u64::MAX / 1000, u64::MAX] {
            assert!(matches!(
                JwtTokenService::new("s", "HS256", hours),
                Err(AuthError::LifetimeTooLong(h)) if h == hours
            ));
        }
    }

    #[test]
    fn lifetime_past_the_timestamp_range_cannot_be_issued() {
        // Fits in an i64 on its own but not once added to the current time.
        let hours = i64::MAX as u64 / 3600;
        let service = JwtTokenService::new("s", "HS256", hours).unwrap();
        let err = service.issue("uuid-123", "student").unwrap_err();
        assert!(err.to_string().contains("too long"), "got: {err}");
    }

    #[test]
    fn refresh_keeps_subject_and_role() {
        let service = service();
        let token = service.issue("uuid-123", "parent").unwrap();
        let refreshed = service.refresh(&token.access_token).unwrap();
        let claims = service.verify(&refreshed.access_token).unwrap();
        assert_eq!(claims.sub, "uuid-123");
        assert_eq!(claims.role, "parent");
    }
}
