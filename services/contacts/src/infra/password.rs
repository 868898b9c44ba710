use anyhow::Context as _;
use argon2::{
    Argon2, PasswordVerifier,
    password_hash::{PasswordHash, PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::error::ContactsError;

/// Argon2id PHC string for `secret` under a fresh random salt.
///
/// Hashing runs on the blocking pool so it does not stall other requests.
pub async fn hash_secret(secret: &str) -> Result<String, ContactsError> {
    let secret = secret.to_owned();
    tokio::task::spawn_blocking(move || hash(&secret))
        .await
        .context("join hash task")?
}

/// Whether `secret` matches `hash`. A hash that fails to parse never matches.
pub async fn verify_secret(secret: &str, hash: &str) -> bool {
    let (secret, hash) = (secret.to_owned(), hash.to_owned());
    match tokio::task::spawn_blocking(move || verify(&secret, &hash)).await {
        Ok(matched) => matched,
        Err(e) => {
            tracing::error!(error = %e, "verify task failed");
            false
        }
    }
}

fn hash(secret: &str) -> Result<String, ContactsError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ContactsError::Internal(anyhow::anyhow!("hash secret: {e}")))
}

fn verify(secret: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
