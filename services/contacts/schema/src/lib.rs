//! sea-orm entities for the contacts service.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{self, Set};

pub mod important_dates;
pub mod otps;
pub mod persons;
pub mod persons_relationships;
pub mod persons_tags;
pub mod phones;
pub mod relationships;
pub mod tags;
pub mod users;

/// Stamp `updated_at` on every save and `created_at` on insert.
pub(crate) fn touch(
    created_at: &mut ActiveValue<DateTime<Utc>>,
    updated_at: &mut ActiveValue<DateTime<Utc>>,
    insert: bool,
) {
    let now = Utc::now();
    if insert {
        *created_at = Set(now);
    }
    *updated_at = Set(now);
}
