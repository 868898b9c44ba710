use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use rolodex_auth_types::identity::JwtSecret;

use crate::domain::mailer::Mailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub mailer: Arc<dyn Mailer>,
}
