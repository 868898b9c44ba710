use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, DatabaseConnection};

use rolodex_contacts_schema::{important_dates, persons};
use rolodex_domain::query::ListQuery;
use rolodex_domain::time::parse_flexible_time;

use crate::domain::types::{ImportantDate, Listed, patch, required};
use crate::error::ContactsError;
use crate::infra::association::ensure_exist;
use crate::infra::models::{important_date_from_model, person_from_model};
use crate::infra::preload;
use crate::infra::repository::ImportantDateRepository;
use crate::usecase::{begin, commit, new_id};

fn parse_date(raw: &str) -> Result<DateTime<Utc>, ContactsError> {
    parse_flexible_time(raw).map_err(|e| ContactsError::invalid_request(e.to_string()))
}

// ── CreateImportantDate ──────────────────────────────────────────────────────

pub struct CreateImportantDateInput {
    pub name: String,
    pub date: String,
    pub person_id: Option<String>,
}

pub struct CreateImportantDateUseCase {
    pub db: DatabaseConnection,
}

impl CreateImportantDateUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        input: CreateImportantDateInput,
    ) -> Result<ImportantDate, ContactsError> {
        let name = required("name", &input.name)?;
        let date = parse_date(&required("date", &input.date)?)?;
        let person_id = patch(input.person_id.as_deref());

        let txn = begin(&self.db).await?;
        if let Some(person_id) = &person_id {
            ensure_exist::<persons::Entity, _>(&txn, user_id, std::slice::from_ref(person_id))
                .await?;
        }
        let important_date = ImportantDateRepository::create(
            &txn,
            important_dates::ActiveModel {
                id: Set(new_id()),
                user_id: Set(user_id.to_owned()),
                person_id: Set(person_id),
                name: Set(name),
                date: Set(date),
                ..Default::default()
            },
        )
        .await?;
        commit(txn).await?;

        Ok(important_date_from_model(important_date))
    }
}

// ── GetImportantDates ────────────────────────────────────────────────────────

pub struct GetImportantDatesUseCase {
    pub db: DatabaseConnection,
}

impl GetImportantDatesUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        query: ListQuery,
    ) -> Result<Listed<ImportantDate>, ContactsError> {
        let txn = begin(&self.db).await?;
        let page = ImportantDateRepository::find_all(&txn, user_id, &query).await?;
        if page.rows.is_empty() {
            return Err(ContactsError::ImportantDateNotFound);
        }

        let owners = if page.wants("person") {
            let ids: Vec<String> = page
                .rows
                .iter()
                .filter_map(|d| d.person_id.clone())
                .collect();
            preload::by_id::<persons::Entity, _>(&txn, user_id, &ids).await?
        } else {
            HashMap::new()
        };
        commit(txn).await?;

        let items = page
            .rows
            .into_iter()
            .map(|model| {
                let person = model
                    .person_id
                    .as_ref()
                    .and_then(|id| owners.get(id))
                    .cloned()
                    .map(|p| Box::new(person_from_model(p)));
                ImportantDate {
                    person,
                    ..important_date_from_model(model)
                }
            })
            .collect();
        Ok(Listed {
            items,
            meta: query.page_meta(page.total),
        })
    }
}

// ── UpdateImportantDate ──────────────────────────────────────────────────────

pub struct UpdateImportantDateInput {
    pub id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub person_id: Option<String>,
}

pub struct UpdateImportantDateUseCase {
    pub db: DatabaseConnection,
}

impl UpdateImportantDateUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        input: UpdateImportantDateInput,
    ) -> Result<ImportantDate, ContactsError> {
        let id = required("id", &input.id)?;
        let date = patch(input.date.as_deref())
            .map(|raw| parse_date(&raw))
            .transpose()?;

        let txn = begin(&self.db).await?;
        let mut important_date = ImportantDateRepository::find_by_id(&txn, user_id, &id).await?;
        if let Some(name) = patch(input.name.as_deref()) {
            important_date.name = name;
        }
        if let Some(date) = date {
            important_date.date = date;
        }
        if let Some(person_id) = patch(input.person_id.as_deref()) {
            ensure_exist::<persons::Entity, _>(&txn, user_id, std::slice::from_ref(&person_id))
                .await?;
            important_date.person_id = Some(person_id);
        }
        let important_date = ImportantDateRepository::update(&txn, important_date).await?;
        commit(txn).await?;

        Ok(important_date_from_model(important_date))
    }
}

// ── DeleteImportantDate ──────────────────────────────────────────────────────

pub struct DeleteImportantDateUseCase {
    pub db: DatabaseConnection,
}

impl DeleteImportantDateUseCase {
    pub async fn execute(&self, user_id: &str, id: &str) -> Result<ImportantDate, ContactsError> {
        let id = required("id", id)?;

        let txn = begin(&self.db).await?;
        let important_date = ImportantDateRepository::find_by_id(&txn, user_id, &id).await?;
        ImportantDateRepository::delete(&txn, important_date.clone()).await?;
        commit(txn).await?;

        Ok(important_date_from_model(important_date))
    }
}
