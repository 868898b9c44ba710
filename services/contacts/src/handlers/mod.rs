use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::Deserialize;

use rolodex_domain::query::ListQuery;

use crate::error::ContactsError;

pub mod important_date;
pub mod otp;
pub mod person;
pub mod phone;
pub mod relationship;
pub mod tag;
pub mod user;

/// `Json` whose rejection is rendered as a 400 `INVALID_REQUEST` envelope.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ContactsError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ContactsError::invalid_request(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Parse a nested list query string; an absent query means "everything, unsorted".
pub(crate) fn list_query(raw_query: Option<String>) -> Result<ListQuery, ContactsError> {
    Ok(raw_query
        .as_deref()
        .map(serde_qs::from_str::<ListQuery>)
        .transpose()
        .map_err(|e| ContactsError::InvalidQuery(e.to_string()))?
        .unwrap_or_default())
}

/// Body of every delete request.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct DeleteRequest {
    pub id: String,
}
