use std::collections::HashMap;

use sea_orm::{ActiveValue::Set, DatabaseConnection};

use rolodex_contacts_schema::relationships;
use rolodex_domain::query::ListQuery;

use crate::domain::types::{Listed, Relationship, patch, required};
use crate::error::ContactsError;
use crate::infra::association::relationship_persons;
use crate::infra::models::{person_from_model, relationship_from_model};
use crate::infra::preload;
use crate::infra::repository::RelationshipRepository;
use crate::usecase::{begin, commit, new_id};

// ── CreateRelationship ───────────────────────────────────────────────────────

pub struct CreateRelationshipInput {
    pub name: String,
    pub color: Option<String>,
    pub person_ids: Vec<String>,
}

pub struct CreateRelationshipUseCase {
    pub db: DatabaseConnection,
}

impl CreateRelationshipUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        input: CreateRelationshipInput,
    ) -> Result<Relationship, ContactsError> {
        let name = required("name", &input.name)?;

        let txn = begin(&self.db).await?;
        let relationship = RelationshipRepository::create(
            &txn,
            relationships::ActiveModel {
                id: Set(new_id()),
                user_id: Set(user_id.to_owned()),
                name: Set(name),
                color: Set(patch(input.color.as_deref())),
                ..Default::default()
            },
        )
        .await?;
        relationship_persons()
            .append(&txn, user_id, &relationship.id, &input.person_ids)
            .await?;
        commit(txn).await?;

        Ok(relationship_from_model(relationship))
    }
}

// ── GetRelationships ─────────────────────────────────────────────────────────

pub struct GetRelationshipsUseCase {
    pub db: DatabaseConnection,
}

impl GetRelationshipsUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        query: ListQuery,
    ) -> Result<Listed<Relationship>, ContactsError> {
        let txn = begin(&self.db).await?;
        let page = RelationshipRepository::find_all(&txn, user_id, &query).await?;
        if page.rows.is_empty() {
            return Err(ContactsError::RelationshipNotFound);
        }

        let ids: Vec<String> = page.rows.iter().map(|r| r.id.clone()).collect();
        let with_persons = page.wants("persons");
        let mut persons = if with_persons {
            preload::linked(&txn, user_id, &relationship_persons(), &ids).await?
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
                Relationship {
                    persons: loaded.map(|rows| rows.into_iter().map(person_from_model).collect()),
                    ..relationship_from_model(model)
                }
            })
            .collect();
        Ok(Listed {
            items,
            meta: query.page_meta(page.total),
        })
    }
}

// ── UpdateRelationship ───────────────────────────────────────────────────────

pub struct UpdateRelationshipInput {
    pub id: String,
    pub name: Option<String>,
    pub color: Option<String>,
    pub person_ids: Vec<String>,
}

pub struct UpdateRelationshipUseCase {
    pub db: DatabaseConnection,
}

impl UpdateRelationshipUseCase {
    pub async fn execute(
        &self,
        user_id: &str,
        input: UpdateRelationshipInput,
    ) -> Result<Relationship, ContactsError> {
        let id = required("id", &input.id)?;

        let txn = begin(&self.db).await?;
        let mut relationship = RelationshipRepository::find_by_id(&txn, user_id, &id).await?;
        if let Some(name) = patch(input.name.as_deref()) {
            relationship.name = name;
        }
        if let Some(color) = patch(input.color.as_deref()) {
            relationship.color = Some(color);
        }
        let relationship = RelationshipRepository::update(&txn, relationship).await?;
        relationship_persons()
            .replace(&txn, user_id, &relationship.id, &input.person_ids)
            .await?;
        commit(txn).await?;

        Ok(relationship_from_model(relationship))
    }
}

// ── DeleteRelationship ───────────────────────────────────────────────────────

pub struct DeleteRelationshipUseCase {
    pub db: DatabaseConnection,
}

impl DeleteRelationshipUseCase {
    pub async fn execute(&self, user_id: &str, id: &str) -> Result<Relationship, ContactsError> {
        let id = required("id", id)?;

        let txn = begin(&self.db).await?;
        let relationship = RelationshipRepository::find_by_id(&txn, user_id, &id).await?;
        RelationshipRepository::delete(&txn, relationship.clone()).await?;
        commit(txn).await?;

        Ok(relationship_from_model(relationship))
    }
}
