//! Batched eager loading. Each loader issues one query per relation for a
//! whole page of parents, scoped to the same owner as the parents.

use std::collections::{BTreeSet, HashMap};

use anyhow::Context as _;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};

use crate::error::ContactsError;
use crate::infra::association::Association;
use crate::infra::resource::Resource;

/// `owner`'s rows of `T` among `ids`, keyed by id.
pub async fn by_id<T, C>(
    conn: &C,
    owner: &str,
    ids: &[String],
) -> Result<HashMap<String, T::Model>, ContactsError>
where
    T: Resource,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = T::find()
        .filter(T::owner_column().eq(owner))
        .filter(T::id_column().is_in(ids.iter().cloned()))
        .all(conn)
        .await
        .context("preload rows by id")?;
    Ok(rows
        .into_iter()
        .map(|m| (T::id_of(&m).to_owned(), m))
        .collect())
}

/// `owner`'s rows of `T` whose `fk` points at one of `parent_ids`, grouped by parent.
pub async fn children<T, C>(
    conn: &C,
    owner: &str,
    fk: T::Column,
    parent_ids: &[String],
    parent_of: fn(&T::Model) -> Option<&str>,
) -> Result<HashMap<String, Vec<T::Model>>, ContactsError>
where
    T: Resource,
    C: ConnectionTrait,
{
    if parent_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = T::find()
        .filter(T::owner_column().eq(owner))
        .filter(fk.is_in(parent_ids.iter().cloned()))
        .all(conn)
        .await
        .context("preload child rows")?;
    let mut grouped: HashMap<String, Vec<T::Model>> = HashMap::new();
    for row in rows {
        if let Some(parent) = parent_of(&row) {
            grouped.entry(parent.to_owned()).or_default().push(row);
        }
    }
    Ok(grouped)
}

/// Rows of `T` linked through `assoc` to each of `parent_ids`, grouped by parent.
pub async fn linked<J, T, C>(
    conn: &C,
    owner: &str,
    assoc: &Association<J, T>,
    parent_ids: &[String],
) -> Result<HashMap<String, Vec<T::Model>>, ContactsError>
where
    J: EntityTrait,
    T: Resource,
    C: ConnectionTrait,
{
    if parent_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let links: Vec<(String, String)> = J::find()
        .select_only()
        .column(assoc.parent)
        .column(assoc.target)
        .filter(assoc.parent.is_in(parent_ids.iter().cloned()))
        .into_tuple()
        .all(conn)
        .await
        .context("preload association links")?;

    let target_ids: Vec<String> = links
        .iter()
        .map(|(_, target)| target.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let targets = by_id::<T, C>(conn, owner, &target_ids).await?;

    let mut grouped: HashMap<String, Vec<T::Model>> = HashMap::new();
    for (parent, target) in links {
        if let Some(model) = targets.get(&target) {
            grouped.entry(parent).or_default().push(model.clone());
        }
    }
    Ok(grouped)
}
