use std::collections::BTreeSet;
use std::marker::PhantomData;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityName as _, EntityTrait, IntoActiveModel,
    QueryFilter, Value, sea_query::OnConflict,
};

use rolodex_contacts_schema::{persons, persons_relationships, persons_tags, relationships, tags};

use crate::error::ContactsError;
use crate::infra::repository::Repository;
use crate::infra::resource::Resource;

/// A many-to-many link stored in join entity `J`, seen from the parent side,
/// pointing at rows of `T`.
pub struct Association<J: EntityTrait, T> {
    pub parent: J::Column,
    pub target: J::Column,
    _target: PhantomData<T>,
}

pub fn person_tags() -> Association<persons_tags::Entity, tags::Entity> {
    Association::new(persons_tags::Column::PersonId, persons_tags::Column::TagId)
}

pub fn tag_persons() -> Association<persons_tags::Entity, persons::Entity> {
    Association::new(persons_tags::Column::TagId, persons_tags::Column::PersonId)
}

pub fn person_relationships() -> Association<persons_relationships::Entity, relationships::Entity> {
    Association::new(
        persons_relationships::Column::PersonId,
        persons_relationships::Column::RelationshipId,
    )
}

pub fn relationship_persons() -> Association<persons_relationships::Entity, persons::Entity> {
    Association::new(
        persons_relationships::Column::RelationshipId,
        persons_relationships::Column::PersonId,
    )
}

impl<J, T> Association<J, T>
where
    J: EntityTrait,
    J::Model: IntoActiveModel<J::ActiveModel>,
    J::ActiveModel: Send,
    T: Resource,
    T::Model: IntoActiveModel<T::ActiveModel> + Sync,
    T::ActiveModel: Send,
{
    fn new(parent: J::Column, target: J::Column) -> Self {
        Self {
            parent,
            target,
            _target: PhantomData,
        }
    }

    /// Link `parent_id` to every id in `target_ids`, keeping existing links.
    pub async fn append<C: ConnectionTrait>(
        &self,
        conn: &C,
        owner: &str,
        parent_id: &str,
        target_ids: &[String],
    ) -> Result<(), ContactsError> {
        let ids = dedup(target_ids);
        if ids.is_empty() {
            return Ok(());
        }
        ensure_exist::<T, C>(conn, owner, &ids).await?;
        self.link(conn, parent_id, &ids).await
    }

    /// Make `target_ids` the complete set of links for `parent_id`.
    ///
    /// An empty list leaves the current links alone.
    pub async fn replace<C: ConnectionTrait>(
        &self,
        conn: &C,
        owner: &str,
        parent_id: &str,
        target_ids: &[String],
    ) -> Result<(), ContactsError> {
        let ids = dedup(target_ids);
        if ids.is_empty() {
            return Ok(());
        }
        ensure_exist::<T, C>(conn, owner, &ids).await?;
        J::delete_many()
            .filter(self.parent.eq(parent_id))
            .exec(conn)
            .await
            .context("unlink association")?;
        self.link(conn, parent_id, &ids).await
    }

    async fn link<C: ConnectionTrait>(
        &self,
        conn: &C,
        parent_id: &str,
        ids: &[String],
    ) -> Result<(), ContactsError> {
        let rows = ids.iter().map(|id| {
            let mut row = <J::ActiveModel as ActiveModelTrait>::default();
            row.set(self.parent, Value::from(parent_id.to_owned()));
            row.set(self.target, Value::from(id.clone()));
            row
        });
        J::insert_many(rows)
            .on_conflict(
                OnConflict::columns([self.parent, self.target])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .context("link association")?;
        Ok(())
    }
}

/// Fail with [`ContactsError::ReferenceNotFound`] unless every id in `ids`
/// names a row of `T` owned by `owner`.
pub async fn ensure_exist<T, C>(conn: &C, owner: &str, ids: &[String]) -> Result<(), ContactsError>
where
    T: Resource,
    T::Model: IntoActiveModel<T::ActiveModel> + Sync,
    T::ActiveModel: Send,
    C: ConnectionTrait,
{
    let ids = dedup(ids);
    if ids.is_empty() {
        return Ok(());
    }
    let found = Repository::<T>::count_by_ids(conn, owner, &ids).await?;
    if found != ids.len() as u64 {
        tracing::warn!(
            requested = ids.len(),
            found,
            entity = %T::default().table_name(),
            "association references missing rows"
        );
        return Err(ContactsError::ReferenceNotFound);
    }
    Ok(())
}

fn dedup(ids: &[String]) -> Vec<String> {
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
