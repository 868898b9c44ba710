use std::collections::HashMap;

use sea_orm::{ActiveValue::Set, DatabaseConnection};

use rolodex_contacts_schema::tags;
use rolodex_domain::query::ListQuery;

use crate::domain::types::{Listed, Tag, patch, required};
use crate::error::ContactsError;
use crate::infra::association::tag_persons;
use crate::infra::models::{person_from_model, tag_from_model};
use crate::infra::preload;
use crate::infra::repository::TagRepository;
use crate::usecase::{begin, commit, new_id};

// ── CreateTag ────────────────────────────────────────────────────────────────

pub struct CreateTagInput {
    pub name: String,
    pub person_ids: Vec<String>,
}

pub struct CreateTagUseCase {
    pub db: DatabaseConnection,
}

impl CreateTagUseCase {
    pub async fn execute(&self, user_id: &str, input: CreateTagInput) -> Result<Tag, ContactsError> {
        let name = required("name", &input.name)?;

        let txn = begin(&self.db).await?;
        let tag = TagRepository::create(
            &txn,
            tags::ActiveModel {
                id: Set(new_id()),
                user_id: Set(user_id.to_owned()),
                name: Set(name),
                ..Default::default()
            },
        )
        .await?;
        tag_persons()
            .append(&txn, user_id, &tag.id, &input.person_ids)
            .await?;
        commit(txn).await?;

        Ok(tag_from_model(tag))
    }
}

// ── GetTags ──────────────────────────────────────────────────────────────────

pub struct GetTagsUseCase {
    pub db: DatabaseConnection,
}

impl GetTagsUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        query: ListQuery,
    ) -> Result<Listed<Tag>, ContactsError> {
        let txn = begin(&self.db).await?;
        let page = TagRepository::find_all(&txn, user_id, &query).await?;
        if page.rows.is_empty() {
            return Err(ContactsError::TagNotFound);
        }

        let ids: Vec<String> = page.rows.iter().map(|t| t.id.clone()).collect();
        let with_persons = page.wants("persons");
        let mut persons = if with_persons {
            preload::linked(&txn, user_id, &tag_persons(), &ids).await?
        } else {
            HashMap::new()
        };
        commit(txn).await?;

        let items = page
            .rows
            .into_iter()
            .map(|model| {
                let loaded =
                    with_persons.then(|| persons.remove(&model.id).unwrap_or_default());
                Tag {
                    persons: loaded.map(|rows| rows.into_iter().map(person_from_model).collect()),
                    ..tag_from_model(model)
                }
            })
            .collect();
        Ok(Listed {
            items,
            meta: query.page_meta(page.total),
        })
    }
}

// ── UpdateTag ────────────────────────────────────────────────────────────────

pub struct UpdateTagInput {
    pub id: String,
    pub name: Option<String>,
    pub person_ids: Vec<String>,
}

pub struct UpdateTagUseCase {
    pub db: DatabaseConnection,
}

impl UpdateTagUseCase {
    pub async fn execute(&self, user_id: &str, input: UpdateTagInput) -> Result<Tag, ContactsError> {
        let id = required("id", &input.id)?;

        let txn = begin(&self.db).await?;
        let mut tag = TagRepository::find_by_id(&txn, user_id, &id).await?;
        if let Some(name) = patch(input.name.as_deref()) {
            tag.name = name;
        }
        let tag = TagRepository::update(&txn, tag).await?;
        tag_persons()
            .replace(&txn, user_id, &tag.id, &input.person_ids)
            .await?;
        commit(txn).await?;

        Ok(tag_from_model(tag))
    }
}

// ── DeleteTag ────────────────────────────────────────────────────────────────

pub struct DeleteTagUseCase {
    pub db: DatabaseConnection,
}

impl DeleteTagUseCase {
    pub async fn execute(&self, user_id: &str, id: &str) -> Result<Tag, ContactsError> {
        let id = required("id", id)?;

        let txn = begin(&self.db).await?;
        let tag = TagRepository::find_by_id(&txn, user_id, &id).await?;
        TagRepository::delete(&txn, tag.clone()).await?;
        commit(txn).await?;

        Ok(tag_from_model(tag))
    }
}
