use axum::extract::State;
use serde::Deserialize;

use rolodex_auth_types::identity::{Identity, OtpIdentity};
use rolodex_core::response::ApiResponse;

use crate::domain::types::{Session, User};
use crate::error::ContactsError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::user::{
    GetCurrentUserUseCase, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput,
    RegisterUseCase, UpdateCurrentUserInput, UpdateCurrentUserUseCase, UpdatePasswordUseCase,
};

// ── POST /api/users ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<ApiResponse<User>, ContactsError> {
    let usecase = RegisterUseCase { db: state.db };
    let user = usecase
        .execute(RegisterInput {
            email: body.email,
            password: body.password,
            name: body.name,
        })
        .await?;
    Ok(ApiResponse::created("User registered successfully", user))
}

// ── POST /api/users/_login ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<ApiResponse<Session>, ContactsError> {
    let usecase = LoginUseCase {
        db: state.db,
        jwt_secret: state.jwt_secret,
    };
    let session = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(ApiResponse::ok("User logged in successfully", session))
}

// ── DELETE /api/users ────────────────────────────────────────────────────────

pub async fn logout(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<ApiResponse<User>, ContactsError> {
    let usecase = LogoutUseCase { db: state.db };
    let user = usecase.execute(&identity.user_id).await?;
    Ok(ApiResponse::ok("User logged out successfully", user))
}

// ── GET /api/users/_current ──────────────────────────────────────────────────

pub async fn get_current(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<ApiResponse<User>, ContactsError> {
    let usecase = GetCurrentUserUseCase { db: state.db };
    let user = usecase.execute(&identity.user_id).await?;
    Ok(ApiResponse::ok("User fetched successfully", user))
}

// ── PATCH /api/users/_current ────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateCurrentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

pub async fn update_current(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateCurrentRequest>,
) -> Result<ApiResponse<User>, ContactsError> {
    let usecase = UpdateCurrentUserUseCase { db: state.db };
    let user = usecase
        .execute(
            &identity.user_id,
            UpdateCurrentUserInput {
                name: body.name,
                email: body.email,
                avatar: body.avatar,
                password: body.password,
            },
        )
        .await?;
    Ok(ApiResponse::ok("User updated successfully", user))
}

// ── PATCH /api/users/_password ───────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

pub async fn update_password(
    OtpIdentity(identity): OtpIdentity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdatePasswordRequest>,
) -> Result<ApiResponse<User>, ContactsError> {
    let usecase = UpdatePasswordUseCase { db: state.db };
    let user = usecase
        .execute(&identity.user_id, &identity.token, &body.password)
        .await?;
    Ok(ApiResponse::ok("Password updated successfully", user))
}
