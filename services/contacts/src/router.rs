use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use rolodex_core::health::{healthz, readyz};
use rolodex_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    important_date::{
        create_important_date, delete_important_date, get_important_dates, update_important_date,
    },
    otp::{create_otp, verify_forgot_password, verify_user},
    person::{create_person, delete_person, get_persons, update_person},
    phone::{create_phone, delete_phone, get_phones, update_phone},
    relationship::{create_relationship, delete_relationship, get_relationships, update_relationship},
    tag::{create_tag, delete_tag, get_tags, update_tag},
    user::{get_current, login, logout, register, update_current, update_password},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Users
        .route("/users", post(register).delete(logout))
        .route("/users/_login", post(login))
        .route("/users/_current", get(get_current).patch(update_current))
        .route("/users/_password", patch(update_password))
        // OTP
        .route("/users/_otp", post(create_otp))
        .route("/users/_otp/verify", post(verify_user))
        .route("/users/_otp/forgot", post(verify_forgot_password))
        // Tags
        .route(
            "/tags",
            post(create_tag)
                .get(get_tags)
                .patch(update_tag)
                .delete(delete_tag),
        )
        // Persons
        .route(
            "/persons",
            post(create_person)
                .get(get_persons)
                .patch(update_person)
                .delete(delete_person),
        )
        // Relationships
        .route(
            "/relationships",
            post(create_relationship)
                .get(get_relationships)
                .patch(update_relationship)
                .delete(delete_relationship),
        )
        // Phones
        .route(
            "/phones",
            post(create_phone)
                .get(get_phones)
                .patch(update_phone)
                .delete(delete_phone),
        )
        // Important dates
        .route(
            "/importantdates",
            post(create_important_date)
                .get(get_important_dates)
                .patch(update_important_date)
                .delete(delete_important_date),
        );

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
