use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::{auth::claims::Claims, config::JwtConfig, error::ApiError, state::AppState};

/// Holds the JWT signing and verification keys plus the token TTL.
/// Derived from the process config; read-only after startup.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }
}

impl JwtKeys {
    /// Mints a signed bearer token for `subject`, expiring TTL from now.
    pub fn issue(&self, subject: &str) -> anyhow::Result<String> {
        let exp = OffsetDateTime::now_utc() + self.ttl;
        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(subject = %subject, "jwt signed");
        Ok(token)
    }

    /// Checks signature and expiry and returns the subject claim. Every
    /// failure mode collapses into `Unauthenticated` so the caller cannot
    /// tell which check rejected the token.
    pub fn verify(&self, token: &str) -> Result<String, ApiError> {
        let validation = Validation::default();
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| ApiError::Unauthenticated)?;
        debug!(subject = %data.claims.sub, "jwt verified");
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn make_keys(secret: &str, ttl_minutes: i64) -> JwtKeys {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let keys = make_keys("dev-secret", 5);
        let token = keys.issue("a@x.com").expect("issue");
        let subject = keys.verify(&token).expect("verify");
        assert_eq!(subject, "a@x.com");
    }

    #[tokio::test]
    async fn state_derived_keys_roundtrip() {
        use crate::state::AppState;
        let keys = JwtKeys::from_ref(&AppState::fake());
        let token = keys.issue("b@x.com").expect("issue");
        assert_eq!(keys.verify(&token).unwrap(), "b@x.com");
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let signer = make_keys("secret-one", 5);
        let verifier = make_keys("secret-two", 5);
        let token = signer.issue("a@x.com").expect("issue");
        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[test]
    fn verify_rejects_expired_token() {
        // TTL well past the default decode leeway.
        let keys = make_keys("dev-secret", -5);
        let token = keys.issue("a@x.com").expect("issue");
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret", 5);
        let err = keys.verify("definitely.not.a-jwt").unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[test]
    fn verify_rejects_missing_subject() {
        #[derive(Serialize)]
        struct NoSub {
            exp: usize,
        }
        let keys = make_keys("dev-secret", 5);
        let exp = (OffsetDateTime::now_utc() + Duration::minutes(5)).unix_timestamp() as usize;
        let token = encode(&Header::default(), &NoSub { exp }, &keys.encoding).unwrap();
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
