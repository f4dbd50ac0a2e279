//! HS256 access tokens.

use buycut_sdk::UserId;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::config::JwtConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::TokenIssuer;

const INVALID_TOKEN: &str = "Invalid or expired JWT";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies access tokens with a shared secret.
pub struct JwtTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokens {
    #[must_use]
    pub fn new(cfg: &JwtConfig) -> Self {
        let secret = cfg.secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(
                i64::try_from(cfg.access_token_ttl_minutes.saturating_mul(60)).unwrap_or(i64::MAX),
            ),
        }
    }

    /// Decode and validate a token, returning the user id it was issued for.
    ///
    /// # Errors
    /// Returns `DomainError::Unauthorized` for a bad signature, an expired token
    /// or a malformed subject.
    pub fn verify(&self, token: &str) -> Result<UserId, DomainError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "Rejected access token");
            DomainError::unauthorized(INVALID_TOKEN)
        })?;

        data.claims
            .sub
            .parse()
            .map_err(|_| DomainError::unauthorized(INVALID_TOKEN))
    }
}

impl TokenIssuer for JwtTokens {
    fn issue(&self, subject: UserId) -> Result<String, DomainError> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.unix_timestamp(),
            exp: now.saturating_add(self.ttl).unix_timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::internal(format!("sign token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::SecretString;

    use super::*;

    fn tokens(secret: &str, ttl: u64) -> JwtTokens {
        JwtTokens::new(&JwtConfig {
            secret: SecretString::from(secret.to_owned()),
            access_token_ttl_minutes: ttl,
        })
    }

    #[test]
    fn issued_token_verifies_to_subject() {
        let t = tokens("s3cret", 60);
        let token = t.issue(42).unwrap();
        assert_eq!(t.verify(&token).unwrap(), 42);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = tokens("one", 60).issue(1).unwrap();
        let err = tokens("two", 60).verify(&token).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized { .. }));
    }

    #[test]
    fn expired_token_is_rejected() {
        let t = tokens("s3cret", 60);
        let past = OffsetDateTime::now_utc().saturating_sub(Duration::hours(2));
        let claims = Claims {
            sub: "1".to_owned(),
            iat: past.unix_timestamp(),
            exp: past.saturating_add(Duration::minutes(1)).unix_timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &t.encoding).unwrap();

        assert!(matches!(
            t.verify(&token),
            Err(DomainError::Unauthorized { .. })
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(tokens("s3cret", 60).verify("not-a-jwt").is_err());
    }
}
