use std::sync::Arc;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use rolodex_auth_types::identity::JwtSecret;
use rolodex_contacts::config::ContactsConfig;
use rolodex_contacts::domain::mailer::Mailer;
use rolodex_contacts::infra::mailer::{LogMailer, SmtpMailer};
use rolodex_contacts::router::build_router;
use rolodex_contacts::state::AppState;
use rolodex_contacts_migration::Migrator;
use rolodex_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ContactsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::new(smtp).expect("invalid SMTP configuration")),
        None => {
            info!("SMTP_HOST not set, otp emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret),
        mailer,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.contacts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("contacts service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
