use std::collections::HashMap;

use sea_orm::{ActiveValue::Set, DatabaseConnection};

use rolodex_contacts_schema::{persons, phones};
use rolodex_domain::query::ListQuery;

use crate::domain::types::{Listed, Phone, patch, required};
use crate::error::ContactsError;
use crate::infra::association::ensure_exist;
use crate::infra::models::{person_from_model, phone_from_model};
use crate::infra::preload;
use crate::infra::repository::PhoneRepository;
use crate::usecase::{begin, commit, new_id};

// ── CreatePhone ──────────────────────────────────────────────────────────────

pub struct CreatePhoneInput {
    pub name: String,
    pub number: String,
    pub person_id: Option<String>,
}

pub struct CreatePhoneUseCase {
    pub db: DatabaseConnection,
}

impl CreatePhoneUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        input: CreatePhoneInput,
    ) -> Result<Phone, ContactsError> {
        let name = required("name", &input.name)?;
        let number = required("number", &input.number)?;
        let person_id = patch(input.person_id.as_deref());

        let txn = begin(&self.db).await?;
        if let Some(person_id) = &person_id {
            ensure_exist::<persons::Entity, _>(&txn, user_id, std::slice::from_ref(person_id))
                .await?;
        }
        let phone = PhoneRepository::create(
            &txn,
            phones::ActiveModel {
                id: Set(new_id()),
                user_id: Set(user_id.to_owned()),
                person_id: Set(person_id),
                name: Set(name),
                number: Set(number),
                ..Default::default()
            },
        )
        .await?;
        commit(txn).await?;

        Ok(phone_from_model(phone))
    }
}

// ── GetPhones ────────────────────────────────────────────────────────────────

pub struct GetPhonesUseCase {
    pub db: DatabaseConnection,
}

impl GetPhonesUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        query: ListQuery,
    ) -> Result<Listed<Phone>, ContactsError> {
        let txn = begin(&self.db).await?;
        let page = PhoneRepository::find_all(&txn, user_id, &query).await?;
        if page.rows.is_empty() {
            return Err(ContactsError::PhoneNotFound);
        }

        let with_person = page.wants("person");
        let owners = if with_person {
            let ids: Vec<String> = page
                .rows
                .iter()
                .filter_map(|p| p.person_id.clone())
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
                Phone {
                    person,
                    ..phone_from_model(model)
                }
            })
            .collect();
        Ok(Listed {
            items,
            meta: query.page_meta(page.total),
        })
    }
}

// ── UpdatePhone ──────────────────────────────────────────────────────────────

pub struct UpdatePhoneInput {
    pub id: String,
    pub name: Option<String>,
    pub number: Option<String>,
    pub person_id: Option<String>,
}

pub struct UpdatePhoneUseCase {
    pub db: DatabaseConnection,
}

impl UpdatePhoneUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        input: UpdatePhoneInput,
    ) -> Result<Phone, ContactsError> {
        let id = required("id", &input.id)?;

        let txn = begin(&self.db).await?;
        let mut phone = PhoneRepository::find_by_id(&txn, user_id, &id).await?;
        if let Some(name) = patch(input.name.as_deref()) {
            phone.name = name;
        }
        if let Some(number) = patch(input.number.as_deref()) {
            phone.number = number;
        }
        if let Some(person_id) = patch(input.person_id.as_deref()) {
            ensure_exist::<persons::Entity, _>(&txn, user_id, std::slice::from_ref(&person_id))
                .await?;
            phone.person_id = Some(person_id);
        }
        let phone = PhoneRepository::update(&txn, phone).await?;
        commit(txn).await?;

        Ok(phone_from_model(phone))
    }
}

// ── DeletePhone ──────────────────────────────────────────────────────────────

pub struct DeletePhoneUseCase {
    pub db: DatabaseConnection,
}

impl DeletePhoneUseCase {
    pub async fn execute(&self, user_id: &str, id: &str) -> Result<Phone, ContactsError> {
        let id = required("id", id)?;

        let txn = begin(&self.db).await?;
        let phone = PhoneRepository::find_by_id(&txn, user_id, &id).await?;
        PhoneRepository::delete(&txn, phone.clone()).await?;
        commit(txn).await?;

        Ok(phone_from_model(phone))
    }
}
