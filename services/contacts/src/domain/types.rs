use chrono::{DateTime, Utc};
use serde::Serialize;

use rolodex_domain::pagination::PageMeta;

/// Number of decimal digits in a one-time code.
pub const OTP_LEN: usize = 6;

/// Seconds a one-time code stays valid.
pub const OTP_TTL_SECS: i64 = 5 * 60;

/// A page of results plus the metadata describing it.
#[derive(Debug, Clone)]
pub struct Listed<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms_opt")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// A user together with a freshly issued access token.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
    /// Token expiry, seconds since UNIX epoch.
    pub expires_at: u64,
}

/// What the caller learns about a newly requested one-time code. The code itself is only emailed.
#[derive(Debug, Clone, Serialize)]
pub struct OtpTicket {
    pub id: String,
    pub user_id: String,
    pub token: String,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<Phone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important_dates: Option<Vec<ImportantDate>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persons: Option<Vec<Person>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persons: Option<Vec<Person>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phone {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    pub name: String,
    pub number: String,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Box<Person>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportantDate {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    pub name: String,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub date: DateTime<Utc>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "rolodex_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Box<Person>>,
}

/// Trimmed value of a required text field, or a 400 naming the field.
pub fn required(field: &str, value: &str) -> Result<String, crate::error::ContactsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::error::ContactsError::invalid_request(format!(
            "{field} is required"
        )));
    }
    Ok(trimmed.to_owned())
}

/// `Some(trimmed)` for a non-blank patch value, `None` for "leave unchanged".
pub fn patch(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
