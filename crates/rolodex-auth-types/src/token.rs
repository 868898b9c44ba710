//! JWT issuing and validation.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rolodex_core::response::Envelope;

/// `iss` claim stamped on and required from every token.
pub const ISSUER: &str = "rolodex";

/// Access-token lifetime in seconds (24 hours).
pub const ACCESS_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// OTP-token lifetime in seconds (5 minutes).
pub const OTP_TOKEN_TTL_SECS: u64 = 5 * 60;

/// What a token may be used for. A token of one kind is rejected where the other is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Authenticates API calls.
    Access,
    /// Binds a one-time code to a user; authorizes a password reset once verified.
    Otp,
}

impl TokenKind {
    pub fn ttl_secs(self) -> u64 {
        match self {
            TokenKind::Access => ACCESS_TOKEN_TTL_SECS,
            TokenKind::Otp => OTP_TOKEN_TTL_SECS,
        }
    }
}

/// Errors returned by [`issue_token`] and [`validate_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token cannot be used here")]
    WrongKind,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let Self::Signing(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "token signing failed");
            let body = Envelope::error("internal error", "INTERNAL");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
        let body = Envelope::error(self.to_string(), "UNAUTHORIZED");
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user ID |
/// | `kind` | [`TokenKind`] |
/// | `iss` | always [`ISSUER`] |
/// | `iat`, `exp` | seconds since UNIX epoch |
/// | `jti` | random UUID, so two tokens issued in the same second differ |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub kind: TokenKind,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
    pub jti: String,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub exp: u64,
}

/// Identity extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: String,
    pub kind: TokenKind,
    pub exp: u64,
}

/// Sign an HS256 token of `kind` for `user_id`, valid for the kind's TTL.
pub fn issue_token(user_id: &str, kind: TokenKind, secret: &str) -> Result<IssuedToken, AuthError> {
    let iat = get_current_timestamp();
    let claims = JwtClaims {
        sub: user_id.to_owned(),
        kind,
        iss: ISSUER.to_owned(),
        iat,
        exp: iat + kind.ttl_secs(),
        jti: Uuid::new_v4().to_string(),
    };
    sign(&claims, secret)
}

fn sign(claims: &JwtClaims, secret: &str) -> Result<IssuedToken, AuthError> {
    let token = encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)?;
    Ok(IssuedToken {
        token,
        exp: claims.exp,
    })
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, signature first, then `exp` (no leeway) and `iss`.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);
    validation.set_issuer(&[ISSUER]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a token of the `expected` kind, returning the identity it carries.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected: TokenKind,
) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.kind != expected {
        return Err(AuthError::WrongKind);
    }
    if claims.sub.is_empty() {
        return Err(AuthError::Malformed);
    }
    Ok(TokenInfo {
        user_id: claims.sub,
        kind: claims.kind,
        exp: claims.exp,
    })
}
