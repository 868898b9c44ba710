//! Bearer-token identity extractors.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::request::Parts;

use crate::token::{AuthError, TokenKind, validate_token};

/// HMAC secret the extractors validate against. Provide it through `FromRef` on the router state.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Caller identity from an `Authorization: Bearer <access token>` header.
///
/// Rejects with 401 if the header is absent, the token does not validate, or
/// the token is not an access token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub token: String,
    pub exp: u64,
}

/// Caller identity from an `Authorization: Bearer <otp token>` header.
#[derive(Debug, Clone)]
pub struct OtpIdentity(pub Identity);

fn extract(parts: &Parts, secret: &JwtSecret, kind: TokenKind) -> Result<Identity, AuthError> {
    let Authorization(bearer) = parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AuthError::MissingToken)?;
    let info = validate_token(bearer.token(), secret.as_str(), kind)?;
    Ok(Identity {
        user_id: info.user_id,
        token: bearer.token().to_owned(),
        exp: info.exp,
    })
}

impl<S> FromRequestParts<S> for Identity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send`. Validation is
    // synchronous, so resolve it here and hand back a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = extract(parts, &JwtSecret::from_ref(state), TokenKind::Access);
        async move { result }
    }
}

impl<S> FromRequestParts<S> for OtpIdentity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = extract(parts, &JwtSecret::from_ref(state), TokenKind::Otp).map(OtpIdentity);
        async move { result }
    }
}
