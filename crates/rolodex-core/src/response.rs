//! JSON response envelope shared by every endpoint.
//!
//! ```json
//! {"message": "...", "data": {...}, "meta": {...}, "errors": "...", "timestamp": "..."}
//! ```
//!
//! `data`, `meta` and `errors` are omitted when absent.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use rolodex_domain::pagination::PageMeta;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
    /// Creation time, RFC 3339 UTC with nanoseconds.
    pub timestamp: String,
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

impl<T: Serialize> Envelope<T> {
    pub fn data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta: None,
            errors: None,
            timestamp: now_timestamp(),
        }
    }

    pub fn page(message: impl Into<String>, data: T, meta: PageMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::data(message, data)
        }
    }
}

impl Envelope<()> {
    pub fn error(message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            meta: None,
            errors: Some(kind.into()),
            timestamp: now_timestamp(),
        }
    }
}

/// An envelope paired with its status code.
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope::data(message, data),
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: Envelope::data(message, data),
        }
    }

    pub fn page(message: impl Into<String>, data: T, meta: PageMeta) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope::page(message, data, meta),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
