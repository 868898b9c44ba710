use axum::extract::State;
use serde::Deserialize;

use rolodex_auth_types::identity::Identity;
use rolodex_core::response::ApiResponse;

use crate::domain::types::{OtpTicket, User};
use crate::error::ContactsError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::otp::{
    CreateOtpInput, CreateOtpUseCase, VerifyForgotPasswordUseCase, VerifyOtpInput,
    VerifyUserUseCase,
};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct VerifyOtpRequest {
    pub otp: String,
    pub token: String,
}

// ── POST /api/users/_otp ─────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateOtpRequest {
    pub email: String,
}

pub async fn create_otp(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateOtpRequest>,
) -> Result<ApiResponse<OtpTicket>, ContactsError> {
    let usecase = CreateOtpUseCase {
        db: state.db,
        jwt_secret: state.jwt_secret,
        mailer: state.mailer,
    };
    let ticket = usecase
        .execute(CreateOtpInput { email: body.email })
        .await?;
    Ok(ApiResponse::created("OTP sent successfully", ticket))
}

// ── POST /api/users/_otp/verify ──────────────────────────────────────────────

pub async fn verify_user(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VerifyOtpRequest>,
) -> Result<ApiResponse<User>, ContactsError> {
    let usecase = VerifyUserUseCase {
        db: state.db,
        jwt_secret: state.jwt_secret,
    };
    let user = usecase
        .execute(
            &identity.user_id,
            VerifyOtpInput {
                otp: body.otp,
                token: body.token,
            },
        )
        .await?;
    Ok(ApiResponse::ok("User verified successfully", user))
}

// ── POST /api/users/_otp/forgot ──────────────────────────────────────────────

pub async fn verify_forgot_password(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VerifyOtpRequest>,
) -> Result<ApiResponse<OtpTicket>, ContactsError> {
    let usecase = VerifyForgotPasswordUseCase {
        db: state.db,
        jwt_secret: state.jwt_secret,
    };
    let ticket = usecase
        .execute(VerifyOtpInput {
            otp: body.otp,
            token: body.token,
        })
        .await?;
    Ok(ApiResponse::ok("OTP verified successfully", ticket))
}
