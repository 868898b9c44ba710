use std::collections::HashMap;

use sea_orm::{ActiveValue::Set, DatabaseConnection};

use rolodex_contacts_schema::{important_dates, persons, phones};
use rolodex_domain::query::ListQuery;

use crate::domain::types::{Listed, Person, patch, required};
use crate::error::ContactsError;
use crate::infra::association::{person_relationships, person_tags};
use crate::infra::models::{
    important_date_from_model, person_from_model, phone_from_model, relationship_from_model,
    tag_from_model,
};
use crate::infra::preload;
use crate::infra::repository::PersonRepository;
use crate::usecase::{begin, commit, new_id};

// ── CreatePerson ─────────────────────────────────────────────────────────────

pub struct CreatePersonInput {
    pub first_name: String,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub tag_ids: Vec<String>,
    pub relationship_ids: Vec<String>,
}

pub struct CreatePersonUseCase {
    pub db: DatabaseConnection,
}

impl CreatePersonUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        input: CreatePersonInput,
    ) -> Result<Person, ContactsError> {
        let first_name = required("first_name", &input.first_name)?;

        let txn = begin(&self.db).await?;
        let person = PersonRepository::create(
            &txn,
            persons::ActiveModel {
                id: Set(new_id()),
                user_id: Set(user_id.to_owned()),
                first_name: Set(first_name),
                last_name: Set(patch(input.last_name.as_deref())),
                nickname: Set(patch(input.nickname.as_deref())),
                avatar: Set(patch(input.avatar.as_deref())),
                description: Set(patch(input.description.as_deref())),
                ..Default::default()
            },
        )
        .await?;
        person_tags()
            .append(&txn, user_id, &person.id, &input.tag_ids)
            .await?;
        person_relationships()
            .append(&txn, user_id, &person.id, &input.relationship_ids)
            .await?;
        commit(txn).await?;

        Ok(person_from_model(person))
    }
}

// ── GetPersons ───────────────────────────────────────────────────────────────

fn phone_owner(phone: &phones::Model) -> Option<&str> {
    phone.person_id.as_deref()
}

fn important_date_owner(date: &important_dates::Model) -> Option<&str> {
    date.person_id.as_deref()
}

pub struct GetPersonsUseCase {
    pub db: DatabaseConnection,
}

impl GetPersonsUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        query: ListQuery,
    ) -> Result<Listed<Person>, ContactsError> {
        let txn = begin(&self.db).await?;
        let page = PersonRepository::find_all(&txn, user_id, &query).await?;
        if page.rows.is_empty() {
            return Err(ContactsError::PersonNotFound);
        }

        let ids: Vec<String> = page.rows.iter().map(|p| p.id.clone()).collect();
        let with_tags = page.wants("tags");
        let with_relationships = page.wants("relationships");
        let with_phones = page.wants("phones");
        let with_dates = page.wants("important_dates");

        let mut tags = if with_tags {
            preload::linked(&txn, user_id, &person_tags(), &ids).await?
        } else {
            HashMap::new()
        };
        let mut relationships = if with_relationships {
            preload::linked(&txn, user_id, &person_relationships(), &ids).await?
        } else {
            HashMap::new()
        };
        let mut phones = if with_phones {
            preload::children::<phones::Entity, _>(
                &txn,
                user_id,
                phones::Column::PersonId,
                &ids,
                phone_owner,
            )
            .await?
        } else {
            HashMap::new()
        };
        let mut dates = if with_dates {
            preload::children::<important_dates::Entity, _>(
                &txn,
                user_id,
                important_dates::Column::PersonId,
                &ids,
                important_date_owner,
            )
            .await?
        } else {
            HashMap::new()
        };
        commit(txn).await?;

        let items = page
            .rows
            .into_iter()
            .map(|model| {
                let id = model.id.clone();
                Person {
                    tags: with_tags.then(|| {
                        tags.remove(&id)
                            .unwrap_or_default()
                            .into_iter()
                            .map(tag_from_model)
                            .collect()
                    }),
                    relationships: with_relationships.then(|| {
                        relationships
                            .remove(&id)
                            .unwrap_or_default()
                            .into_iter()
                            .map(relationship_from_model)
                            .collect()
                    }),
                    phones: with_phones.then(|| {
                        phones
                            .remove(&id)
                            .unwrap_or_default()
                            .into_iter()
                            .map(phone_from_model)
                            .collect()
                    }),
                    important_dates: with_dates.then(|| {
                        dates
                            .remove(&id)
                            .unwrap_or_default()
                            .into_iter()
                            .map(important_date_from_model)
                            .collect()
                    }),
                    ..person_from_model(model)
                }
            })
            .collect();
        Ok(Listed {
            items,
            meta: query.page_meta(page.total),
        })
    }
}

// ── UpdatePerson ─────────────────────────────────────────────────────────────

pub struct UpdatePersonInput {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub tag_ids: Vec<String>,
    pub relationship_ids: Vec<String>,
}

pub struct UpdatePersonUseCase {
    pub db: DatabaseConnection,
}

impl UpdatePersonUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        input: UpdatePersonInput,
    ) -> Result<Person, ContactsError> {
        let id = required("id", &input.id)?;

        let txn = begin(&self.db).await?;
        let mut person = PersonRepository::find_by_id(&txn, user_id, &id).await?;
        if let Some(first_name) = patch(input.first_name.as_deref()) {
            person.first_name = first_name;
        }
        if let Some(last_name) = patch(input.last_name.as_deref()) {
            person.last_name = Some(last_name);
        }
        if let Some(nickname) = patch(input.nickname.as_deref()) {
            person.nickname = Some(nickname);
        }
        if let Some(avatar) = patch(input.avatar.as_deref()) {
            person.avatar = Some(avatar);
        }
        if let Some(description) = patch(input.description.as_deref()) {
            person.description = Some(description);
        }
        let person = PersonRepository::update(&txn, person).await?;
        person_tags()
            .replace(&txn, user_id, &person.id, &input.tag_ids)
            .await?;
        person_relationships()
            .replace(&txn, user_id, &person.id, &input.relationship_ids)
            .await?;
        commit(txn).await?;

        Ok(person_from_model(person))
    }
}

// ── DeletePerson ─────────────────────────────────────────────────────────────

pub struct DeletePersonUseCase {
    pub db: DatabaseConnection,
}

impl DeletePersonUseCase {
    pub async fn execute(&self, user_id: &str, id: &str) -> Result<Person, ContactsError> {
        let id = required("id", id)?;

        let txn = begin(&self.db).await?;
        let person = PersonRepository::find_by_id(&txn, user_id, &id).await?;
        PersonRepository::delete(&txn, person.clone()).await?;
        commit(txn).await?;

        Ok(person_from_model(person))
    }
}
