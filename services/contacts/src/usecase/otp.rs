use std::sync::Arc;

use anyhow::Context as _;
use chrono::{Duration, Utc};
use rand::RngExt;
use sea_orm::{ActiveValue::Set, DatabaseConnection};

use rolodex_auth_types::identity::JwtSecret;
use rolodex_auth_types::token::{AuthError, TokenInfo, TokenKind, issue_token, validate_token};
use rolodex_contacts_schema::otps;

use crate::domain::mailer::Mailer;
use crate::domain::types::{OTP_LEN, OTP_TTL_SECS, OtpTicket, User, required};
use crate::error::ContactsError;
use crate::infra::db::{delete_otp_by_token, find_otp_by_token, find_user_by_email};
use crate::infra::models::{otp_ticket_from_model, user_from_model};
use crate::infra::password::{hash_secret, verify_secret};
use crate::infra::repository::{OtpRepository, UserRepository};
use crate::usecase::{begin, commit, new_id};

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Reject an OTP row that was already used, has expired, or does not match `code`.
async fn check_otp(otp: &otps::Model, code: &str) -> Result<(), ContactsError> {
    if otp.verified_at.is_some() {
        return Err(ContactsError::OtpAlreadyVerified);
    }
    if Utc::now() > otp.expires_at {
        return Err(ContactsError::OtpExpired);
    }
    if !verify_secret(code, &otp.otp).await {
        return Err(ContactsError::InvalidOtp);
    }
    Ok(())
}

/// Explain why no OTP row exists for a token.
///
/// `token` is the result of validating the token itself, `verified_user` the
/// id of the caller when their account is already verified.
fn missing_otp(token: Result<TokenInfo, AuthError>, verified_user: Option<&str>) -> ContactsError {
    match token {
        Err(AuthError::Expired) => ContactsError::OtpExpired,
        Ok(info) if verified_user == Some(info.user_id.as_str()) => {
            ContactsError::OtpAlreadyVerified
        }
        _ => ContactsError::OtpNotFound,
    }
}

pub struct VerifyOtpInput {
    pub otp: String,
    pub token: String,
}

// ── CreateOtp ────────────────────────────────────────────────────────────────

pub struct CreateOtpInput {
    pub email: String,
}

pub struct CreateOtpUseCase {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub mailer: Arc<dyn Mailer>,
}

impl CreateOtpUseCase {
    pub async fn execute(&self, input: CreateOtpInput) -> Result<OtpTicket, ContactsError> {
        let email = required("email", &input.email)?.to_lowercase();

        let txn = begin(&self.db).await?;

        // 1. Find user by email → 404 if not found
        let user = find_user_by_email(&txn, &email)
            .await?
            .ok_or(ContactsError::UserNotFound)?;

        // 2. Token bound to the user + hashed code
        let issued = issue_token(&user.id, TokenKind::Otp, self.jwt_secret.as_str())?;
        let code = generate_code();
        let otp = OtpRepository::create(
            &txn,
            otps::ActiveModel {
                id: Set(new_id()),
                user_id: Set(user.id.clone()),
                otp: Set(hash_secret(&code).await?),
                token: Set(issued.token),
                verified_at: Set(None),
                expires_at: Set(Utc::now() + Duration::seconds(OTP_TTL_SECS)),
                ..Default::default()
            },
        )
        .await?;

        // 3. Deliver before committing; a failed send discards the row
        self.mailer
            .send_otp(&user.email, &code)
            .await
            .context("send otp email")?;
        commit(txn).await?;

        tracing::info!(user_id = %user.id, otp_id = %otp.id, "otp issued");
        Ok(otp_ticket_from_model(otp))
    }
}

// ── VerifyUser ───────────────────────────────────────────────────────────────

pub struct VerifyUserUseCase {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
}

impl VerifyUserUseCase {
    /// Mark the caller's account verified with an OTP issued to them. The OTP is consumed.
    pub async fn execute(&self, user_id: &str, input: VerifyOtpInput) -> Result<User, ContactsError> {
        let code = required("otp", &input.otp)?;
        let token = required("token", &input.token)?;

        let txn = begin(&self.db).await?;
        let mut user = UserRepository::find_by_id(&txn, user_id, user_id).await?;
        let Some(mut otp) = find_otp_by_token(&txn, &token)
            .await?
            .filter(|otp| otp.user_id == user_id)
        else {
            let verified = user.verified_at.is_some().then_some(user_id);
            let err = missing_otp(
                validate_token(&token, self.jwt_secret.as_str(), TokenKind::Otp),
                verified,
            );
            tracing::warn!(user_id, kind = err.kind(), "otp verification rejected");
            return Err(err);
        };
        if let Err(err) = check_otp(&otp, &code).await {
            tracing::warn!(user_id, kind = err.kind(), "otp verification rejected");
            return Err(err);
        }

        let now = Utc::now();
        user.verified_at = Some(now);
        let user = UserRepository::update(&txn, user).await?;
        otp.verified_at = Some(now);
        OtpRepository::update(&txn, otp).await?;
        delete_otp_by_token(&txn, &token).await?;
        commit(txn).await?;

        tracing::info!(user_id, "user verified");
        Ok(user_from_model(user))
    }
}

// ── VerifyForgotPassword ─────────────────────────────────────────────────────

pub struct VerifyForgotPasswordUseCase {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
}

impl VerifyForgotPasswordUseCase {
    /// Mark an OTP verified so its token can authorize one password reset.
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<OtpTicket, ContactsError> {
        let code = required("otp", &input.otp)?;
        let token = required("token", &input.token)?;

        let txn = begin(&self.db).await?;
        let Some(mut otp) = find_otp_by_token(&txn, &token).await? else {
            let err = missing_otp(
                validate_token(&token, self.jwt_secret.as_str(), TokenKind::Otp),
                None,
            );
            tracing::warn!(kind = err.kind(), "forgot-password otp rejected");
            return Err(err);
        };
        if let Err(err) = check_otp(&otp, &code).await {
            tracing::warn!(user_id = %otp.user_id, kind = err.kind(), "forgot-password otp rejected");
            return Err(err);
        }

        otp.verified_at = Some(Utc::now());
        let otp = OtpRepository::update(&txn, otp).await?;
        commit(txn).await?;

        Ok(otp_ticket_from_model(otp))
    }
}
