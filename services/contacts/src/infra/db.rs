//! Lookups by natural key that the generic repository does not cover.

use anyhow::Context as _;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use rolodex_contacts_schema::{otps, users};

use crate::error::ContactsError;

/// Emails are globally unique, so this is the one unscoped user read.
pub async fn find_user_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, ContactsError> {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
        .context("find user by email")?;
    Ok(user)
}

pub async fn find_otp_by_token<C: ConnectionTrait>(
    conn: &C,
    token: &str,
) -> Result<Option<otps::Model>, ContactsError> {
    let otp = otps::Entity::find()
        .filter(otps::Column::Token.eq(token))
        .one(conn)
        .await
        .context("find otp by token")?;
    Ok(otp)
}

pub async fn delete_otp_by_token<C: ConnectionTrait>(
    conn: &C,
    token: &str,
) -> Result<(), ContactsError> {
    otps::Entity::delete_many()
        .filter(otps::Column::Token.eq(token))
        .exec(conn)
        .await
        .context("delete otp by token")?;
    Ok(())
}
