//! Bearer-token helpers for integration tests.
//!
//! Signs real tokens with a test secret so requests pass through the same
//! `Identity` extractor production traffic does.

use axum::http::HeaderValue;
use uuid::Uuid;

use rolodex_auth_types::token::{TokenKind, issue_token};

/// Secret shared by the test router state and [`MockAuth`].
pub const TEST_JWT_SECRET: &str = "rolodex-test-secret";

/// Identity to authenticate test requests as.
pub struct MockAuth {
    pub user_id: String,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            secret: TEST_JWT_SECRET.to_owned(),
        }
    }

    /// A user id nobody has registered.
    pub fn stranger() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    pub fn token(&self, kind: TokenKind) -> String {
        issue_token(&self.user_id, kind, &self.secret)
            .unwrap()
            .token
    }

    /// `Authorization` value carrying an access token.
    pub fn bearer(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token(TokenKind::Access))).unwrap()
    }
}
