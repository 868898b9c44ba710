use sea_orm::EntityTrait;

use rolodex_contacts_schema::{important_dates, otps, persons, phones, relationships, tags, users};

use crate::error::ContactsError;

/// Per-entity knowledge the generic repository needs: how rows are keyed,
/// who owns them, which relations may be preloaded and which errors to raise.
pub trait Resource: EntityTrait {
    /// Relation names accepted in a list query's `preload`.
    const RELATIONS: &'static [&'static str] = &[];

    fn id_column() -> Self::Column;

    /// Column scoping every read and write to one user.
    fn owner_column() -> Self::Column;

    fn id_of(model: &Self::Model) -> &str;

    fn not_found() -> ContactsError;

    /// Raised when a write trips a uniqueness constraint.
    fn conflict() -> ContactsError;
}

impl Resource for users::Entity {
    fn id_column() -> Self::Column {
        users::Column::Id
    }

    // A user owns exactly their own row.
    fn owner_column() -> Self::Column {
        users::Column::Id
    }

    fn id_of(model: &users::Model) -> &str {
        &model.id
    }

    fn not_found() -> ContactsError {
        ContactsError::UserNotFound
    }

    fn conflict() -> ContactsError {
        ContactsError::EmailAlreadyExists
    }
}

impl Resource for otps::Entity {
    fn id_column() -> Self::Column {
        otps::Column::Id
    }

    fn owner_column() -> Self::Column {
        otps::Column::UserId
    }

    fn id_of(model: &otps::Model) -> &str {
        &model.id
    }

    fn not_found() -> ContactsError {
        ContactsError::OtpNotFound
    }

    fn conflict() -> ContactsError {
        ContactsError::Internal(anyhow::anyhow!("otp token collision"))
    }
}

impl Resource for persons::Entity {
    const RELATIONS: &'static [&'static str] = &["tags", "relationships", "phones", "important_dates"];

    fn id_column() -> Self::Column {
        persons::Column::Id
    }

    fn owner_column() -> Self::Column {
        persons::Column::UserId
    }

    fn id_of(model: &persons::Model) -> &str {
        &model.id
    }

    fn not_found() -> ContactsError {
        ContactsError::PersonNotFound
    }

    fn conflict() -> ContactsError {
        ContactsError::Internal(anyhow::anyhow!("person id collision"))
    }
}

impl Resource for tags::Entity {
    const RELATIONS: &'static [&'static str] = &["persons"];

    fn id_column() -> Self::Column {
        tags::Column::Id
    }

    fn owner_column() -> Self::Column {
        tags::Column::UserId
    }

    fn id_of(model: &tags::Model) -> &str {
        &model.id
    }

    fn not_found() -> ContactsError {
        ContactsError::TagNotFound
    }

    fn conflict() -> ContactsError {
        ContactsError::TagAlreadyExists
    }
}

impl Resource for relationships::Entity {
    const RELATIONS: &'static [&'static str] = &["persons"];

    fn id_column() -> Self::Column {
        relationships::Column::Id
    }

    fn owner_column() -> Self::Column {
        relationships::Column::UserId
    }

    fn id_of(model: &relationships::Model) -> &str {
        &model.id
    }

    fn not_found() -> ContactsError {
        ContactsError::RelationshipNotFound
    }

    fn conflict() -> ContactsError {
        ContactsError::RelationshipAlreadyExists
    }
}

impl Resource for phones::Entity {
    const RELATIONS: &'static [&'static str] = &["person"];

    fn id_column() -> Self::Column {
        phones::Column::Id
    }

    fn owner_column() -> Self::Column {
        phones::Column::UserId
    }

    fn id_of(model: &phones::Model) -> &str {
        &model.id
    }

    fn not_found() -> ContactsError {
        ContactsError::PhoneNotFound
    }

    fn conflict() -> ContactsError {
        ContactsError::PhoneAlreadyExists
    }
}

impl Resource for important_dates::Entity {
    const RELATIONS: &'static [&'static str] = &["person"];

    fn id_column() -> Self::Column {
        important_dates::Column::Id
    }

    fn owner_column() -> Self::Column {
        important_dates::Column::UserId
    }

    fn id_of(model: &important_dates::Model) -> &str {
        &model.id
    }

    fn not_found() -> ContactsError {
        ContactsError::ImportantDateNotFound
    }

    fn conflict() -> ContactsError {
        ContactsError::ImportantDateAlreadyExists
    }
}
