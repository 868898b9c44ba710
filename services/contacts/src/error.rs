use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use rolodex_auth_types::token::AuthError;
use rolodex_core::response::Envelope;

/// Contacts service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ContactsError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid otp")]
    InvalidOtp,
    #[error("otp expired")]
    OtpExpired,
    #[error("otp already verified")]
    OtpAlreadyVerified,
    #[error("otp not verified")]
    OtpNotVerified,
    #[error("user not found")]
    UserNotFound,
    #[error("otp not found")]
    OtpNotFound,
    #[error("person not found")]
    PersonNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("relationship not found")]
    RelationshipNotFound,
    #[error("phone not found")]
    PhoneNotFound,
    #[error("important date not found")]
    ImportantDateNotFound,
    #[error("referenced record does not exist")]
    ReferenceNotFound,
    #[error("email already exists")]
    EmailAlreadyExists,
    #[error("tag already exists")]
    TagAlreadyExists,
    #[error("relationship already exists")]
    RelationshipAlreadyExists,
    #[error("phone already exists")]
    PhoneAlreadyExists,
    #[error("important date already exists")]
    ImportantDateAlreadyExists,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ContactsError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOtp => "INVALID_OTP",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpAlreadyVerified => "OTP_ALREADY_VERIFIED",
            Self::OtpNotVerified => "OTP_NOT_VERIFIED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::PersonNotFound => "PERSON_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::RelationshipNotFound => "RELATIONSHIP_NOT_FOUND",
            Self::PhoneNotFound => "PHONE_NOT_FOUND",
            Self::ImportantDateNotFound => "IMPORTANT_DATE_NOT_FOUND",
            Self::ReferenceNotFound => "REFERENCE_NOT_FOUND",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::RelationshipAlreadyExists => "RELATIONSHIP_ALREADY_EXISTS",
            Self::PhoneAlreadyExists => "PHONE_ALREADY_EXISTS",
            Self::ImportantDateAlreadyExists => "IMPORTANT_DATE_ALREADY_EXISTS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized
            | Self::InvalidCredentials
            | Self::InvalidOtp
            | Self::OtpExpired
            | Self::OtpAlreadyVerified
            | Self::OtpNotVerified => StatusCode::UNAUTHORIZED,
            Self::UserNotFound
            | Self::OtpNotFound
            | Self::PersonNotFound
            | Self::TagNotFound
            | Self::RelationshipNotFound
            | Self::PhoneNotFound
            | Self::ImportantDateNotFound
            | Self::ReferenceNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyExists
            | Self::TagAlreadyExists
            | Self::RelationshipAlreadyExists
            | Self::PhoneAlreadyExists
            | Self::ImportantDateAlreadyExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }
}

impl From<sea_orm::DbErr> for ContactsError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Internal(anyhow::Error::new(e))
    }
}

impl From<AuthError> for ContactsError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Signing(_) => Self::Internal(anyhow::Error::new(e)),
            _ => Self::Unauthorized,
        }
    }
}

impl IntoResponse for ContactsError {
    fn into_response(self) -> Response {
        let status = self.status();
        // TraceLayer already records every response status; only 500s carry a cause worth logging.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = Envelope::error(self.to_string(), self.kind());
        (status, axum::Json(body)).into_response()
    }
}
