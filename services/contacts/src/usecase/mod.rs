//! One struct per business operation. Each `execute` owns its transaction:
//! it begins one, commits on success, and lets the drop roll it back on any
//! early return.

use anyhow::Context as _;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use uuid::Uuid;

use crate::error::ContactsError;

pub mod important_date;
pub mod otp;
pub mod person;
pub mod phone;
pub mod relationship;
pub mod tag;
pub mod user;

async fn begin(db: &DatabaseConnection) -> Result<DatabaseTransaction, ContactsError> {
    Ok(db.begin().await.context("begin transaction")?)
}

async fn commit(txn: DatabaseTransaction) -> Result<(), ContactsError> {
    txn.commit().await.context("commit transaction")?;
    Ok(())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
