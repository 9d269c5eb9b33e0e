use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::{auth::jwt::JwtKeys, error::ApiError};

/// The auth gate. Extracts the bearer token from the Authorization header,
/// verifies it and yields the subject (user email) to the handler. Any
/// failure short-circuits the request with 401 before resource logic runs.
#[derive(Debug)]
pub struct AuthSubject(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthSubject
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("authorization header without bearer scheme");
            ApiError::Unauthenticated
        })?;

        let subject = keys.verify(token).map_err(|e| {
            warn!("invalid or expired token");
            e
        })?;

        Ok(AuthSubject(subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::{header, Request};

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/todo/");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn accepts_valid_bearer_token() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.issue("a@x.com").expect("issue");

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let AuthSubject(subject) = AuthSubject::from_request_parts(&mut parts, &state)
            .await
            .expect("gate should pass");
        assert_eq!(subject, "a@x.com");
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(None);
        let err = AuthSubject::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn rejects_non_bearer_scheme() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("Basic dXNlcjpwdw=="));
        let err = AuthSubject::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn rejects_tampered_token() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let mut token = keys.issue("a@x.com").expect("issue");
        token.push('x');

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let err = AuthSubject::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
