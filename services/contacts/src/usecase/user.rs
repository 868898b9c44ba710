use sea_orm::{ActiveValue::Set, DatabaseConnection};

use rolodex_auth_types::identity::JwtSecret;
use rolodex_auth_types::token::{TokenKind, issue_token};
use rolodex_contacts_schema::users;

use crate::domain::types::{Session, User, patch, required};
use crate::error::ContactsError;
use crate::infra::db::{delete_otp_by_token, find_otp_by_token, find_user_by_email};
use crate::infra::models::user_from_model;
use crate::infra::password::{hash_secret, verify_secret};
use crate::infra::repository::UserRepository;
use crate::usecase::{begin, commit, new_id};

fn normalize_email(email: &str) -> Result<String, ContactsError> {
    Ok(required("email", email)?.to_lowercase())
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

pub struct RegisterUseCase {
    pub db: DatabaseConnection,
}

impl RegisterUseCase {
    /// Create an unverified account. No token is issued; the caller logs in afterwards.
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ContactsError> {
        let email = normalize_email(&input.email)?;
        let password = required("password", &input.password)?;
        let name = required("name", &input.name)?;
        let password_hash = hash_secret(&password).await?;

        let txn = begin(&self.db).await?;
        let user = UserRepository::create(
            &txn,
            users::ActiveModel {
                id: Set(new_id()),
                email: Set(email),
                password: Set(password_hash),
                name: Set(name),
                avatar: Set(None),
                verified_at: Set(None),
                ..Default::default()
            },
        )
        .await?;
        commit(txn).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user_from_model(user))
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
}

impl LoginUseCase {
    pub async fn execute(&self, input: LoginInput) -> Result<Session, ContactsError> {
        let email = normalize_email(&input.email)?;
        let password = required("password", &input.password)?;

        let txn = begin(&self.db).await?;
        let user = find_user_by_email(&txn, &email).await?;
        commit(txn).await?;

        let matched = match &user {
            Some(user) => verify_secret(&password, &user.password).await,
            None => false,
        };
        let Some(user) = user.filter(|_| matched) else {
            tracing::warn!("login rejected");
            return Err(ContactsError::InvalidCredentials);
        };
        let issued = issue_token(&user.id, TokenKind::Access, self.jwt_secret.as_str())?;

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(Session {
            user: user_from_model(user),
            token: issued.token,
            expires_at: issued.exp,
        })
    }
}

// ── GetCurrentUser ───────────────────────────────────────────────────────────

pub struct GetCurrentUserUseCase {
    pub db: DatabaseConnection,
}

impl GetCurrentUserUseCase {
    pub async fn execute(&self, user_id: &str) -> Result<User, ContactsError> {
        let txn = begin(&self.db).await?;
        let user = UserRepository::find_by_id(&txn, user_id, user_id).await?;
        commit(txn).await?;
        Ok(user_from_model(user))
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase {
    pub db: DatabaseConnection,
}

impl LogoutUseCase {
    /// Tokens are stateless, so logging out only confirms who the caller was.
    pub async fn execute(&self, user_id: &str) -> Result<User, ContactsError> {
        let user = GetCurrentUserUseCase {
            db: self.db.clone(),
        }
        .execute(user_id)
        .await?;
        tracing::info!(user_id = %user.id, "user logged out");
        Ok(user)
    }
}

// ── UpdateCurrentUser ────────────────────────────────────────────────────────

pub struct UpdateCurrentUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

pub struct UpdateCurrentUserUseCase {
    pub db: DatabaseConnection,
}

impl UpdateCurrentUserUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        input: UpdateCurrentUserInput,
    ) -> Result<User, ContactsError> {
        let password_hash = match patch(input.password.as_deref()) {
            Some(password) => Some(hash_secret(&password).await?),
            None => None,
        };

        let txn = begin(&self.db).await?;
        let mut user = UserRepository::find_by_id(&txn, user_id, user_id).await?;
        if let Some(name) = patch(input.name.as_deref()) {
            user.name = name;
        }
        if let Some(email) = patch(input.email.as_deref()) {
            user.email = email.to_lowercase();
        }
        if let Some(avatar) = patch(input.avatar.as_deref()) {
            user.avatar = Some(avatar);
        }
        if let Some(hash) = password_hash {
            user.password = hash;
        }
        let user = UserRepository::update(&txn, user).await?;
        commit(txn).await?;

        Ok(user_from_model(user))
    }
}

// ── UpdatePassword ───────────────────────────────────────────────────────────

pub struct UpdatePasswordUseCase {
    pub db: DatabaseConnection,
}

impl UpdatePasswordUseCase {
    /// Reset the password of the user an OTP token was issued to.
    ///
    /// The OTP behind `otp_token` must have been verified through the
    /// forgot-password flow. It is consumed on success.
    pub async fn execute(
        &self,
        user_id: &str,
        otp_token: &str,
        password: &str,
    ) -> Result<User, ContactsError> {
        let password = required("password", password)?;
        let password_hash = hash_secret(&password).await?;

        let txn = begin(&self.db).await?;
        let otp = find_otp_by_token(&txn, otp_token)
            .await?
            .filter(|otp| otp.user_id == user_id)
            .ok_or(ContactsError::OtpNotFound)?;
        if otp.verified_at.is_none() {
            tracing::warn!(user_id, "password reset with unverified otp");
            return Err(ContactsError::OtpNotVerified);
        }

        let mut user = UserRepository::find_by_id(&txn, user_id, user_id).await?;
        user.password = password_hash;
        let user = UserRepository::update(&txn, user).await?;
        delete_otp_by_token(&txn, otp_token).await?;
        commit(txn).await?;

        tracing::info!(user_id, "password reset");
        Ok(user_from_model(user))
    }
}
