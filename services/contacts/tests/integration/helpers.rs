use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::{TestResponse, TestServer};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};

use rolodex_auth_types::identity::JwtSecret;
use rolodex_contacts::domain::mailer::Mailer;
use rolodex_contacts::router::build_router;
use rolodex_contacts::state::AppState;
use rolodex_contacts_migration::Migrator;
use rolodex_testing::auth::TEST_JWT_SECRET;
use rolodex_testing::db::memory_database;

pub const PASSWORD: &str = "correct horse battery";

// ── Mailers ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentOtp {
    pub to: String,
    pub code: String,
}

/// Keeps every OTP email instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentOtp>>,
}

impl RecordingMailer {
    pub fn last_code(&self) -> String {
        self.sent
            .lock()
            .unwrap()
            .last()
            .expect("no otp email was sent")
            .code
            .clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_otp(&self, to: &str, code: &str) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(SentOtp {
            to: to.to_owned(),
            code: code.to_owned(),
        });
        Ok(())
    }
}

/// Fails every delivery, like an unreachable relay.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_otp(&self, _to: &str, _code: &str) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

// ── App ──────────────────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub db: DatabaseConnection,
    pub mailer: Arc<RecordingMailer>,
}

/// A logged-in user.
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> HeaderValue {
        bearer(&self.token)
    }
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

pub async fn migrated_db() -> DatabaseConnection {
    let db = memory_database().await;
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn spawn_app_with(mailer: Arc<dyn Mailer>) -> (TestServer, DatabaseConnection) {
    let db = migrated_db().await;
    let state = AppState {
        db: db.clone(),
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        mailer,
    };
    let server = TestServer::new(build_router(state)).unwrap();
    (server, db)
}

pub async fn spawn_app() -> TestApp {
    let mailer = Arc::new(RecordingMailer::default());
    let (server, db) = spawn_app_with(mailer.clone()).await;
    TestApp { server, db, mailer }
}

impl TestApp {
    pub async fn register(&self, email: &str) -> String {
        let resp = self
            .server
            .post("/api/users")
            .json(&json!({ "email": email, "password": PASSWORD, "name": "Test User" }))
            .await;
        resp.assert_status(StatusCode::CREATED);
        resp.json::<Value>()["data"]["id"]
            .as_str()
            .unwrap()
            .to_owned()
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.server
            .post("/api/users/_login")
            .json(&json!({ "email": email, "password": password }))
            .await
    }

    /// Register and log in a fresh user.
    pub async fn user(&self, email: &str) -> TestUser {
        let id = self.register(email).await;
        let resp = self.login(email, PASSWORD).await;
        resp.assert_status_ok();
        let token = resp.json::<Value>()["data"]["token"]
            .as_str()
            .unwrap()
            .to_owned();
        TestUser {
            id,
            email: email.to_owned(),
            token,
        }
    }

    pub async fn post(&self, user: &TestUser, path: &str, body: Value) -> TestResponse {
        self.server
            .post(path)
            .add_header(AUTHORIZATION, user.bearer())
            .json(&body)
            .await
    }

    pub async fn patch(&self, user: &TestUser, path: &str, body: Value) -> TestResponse {
        self.server
            .patch(path)
            .add_header(AUTHORIZATION, user.bearer())
            .json(&body)
            .await
    }

    pub async fn delete(&self, user: &TestUser, path: &str, body: Value) -> TestResponse {
        self.server
            .delete(path)
            .add_header(AUTHORIZATION, user.bearer())
            .json(&body)
            .await
    }

    /// `path` may carry a raw nested query string, e.g. `/api/tags?search[name]=Fri`.
    pub async fn get(&self, user: &TestUser, path: &str) -> TestResponse {
        self.server
            .get(path)
            .add_header(AUTHORIZATION, user.bearer())
            .await
    }

    /// Create a row and return its `data` object.
    pub async fn create(&self, user: &TestUser, path: &str, body: Value) -> Value {
        let resp = self.post(user, path, body).await;
        resp.assert_status(StatusCode::CREATED);
        resp.json::<Value>()["data"].clone()
    }

    pub async fn create_id(&self, user: &TestUser, path: &str, body: Value) -> String {
        self.create(user, path, body).await["id"]
            .as_str()
            .unwrap()
            .to_owned()
    }
}

/// Assert the envelope error kind of a failed response.
pub fn assert_error(resp: &TestResponse, status: StatusCode, kind: &str) {
    resp.assert_status(status);
    let json = resp.json::<Value>();
    assert_eq!(json["errors"], kind, "unexpected body: {json}");
}
