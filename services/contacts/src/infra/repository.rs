use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::str::FromStr;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ColumnType, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, Select, SqlErr,
};

use rolodex_contacts_schema::{important_dates, otps, persons, phones, relationships, tags, users};
use rolodex_core::sea_ext::SelectWindow as _;
use rolodex_domain::query::{ListQuery, is_identifier_field};

use crate::error::ContactsError;
use crate::infra::resource::Resource;

pub type UserRepository = Repository<users::Entity>;
pub type OtpRepository = Repository<otps::Entity>;
pub type PersonRepository = Repository<persons::Entity>;
pub type TagRepository = Repository<tags::Entity>;
pub type RelationshipRepository = Repository<relationships::Entity>;
pub type PhoneRepository = Repository<phones::Entity>;
pub type ImportantDateRepository = Repository<important_dates::Entity>;

/// One page of rows, the unpaginated match count and the relations the caller asked to load.
#[derive(Debug)]
pub struct Page<M> {
    pub rows: Vec<M>,
    pub total: u64,
    pub preload: Vec<&'static str>,
}

impl<M> Page<M> {
    pub fn wants(&self, relation: &str) -> bool {
        self.preload.iter().any(|r| *r == relation)
    }
}

/// Owner-scoped CRUD and list queries for any [`Resource`].
///
/// Every call takes the caller's connection or transaction; the repository
/// never opens or commits one itself.
pub struct Repository<E>(PhantomData<E>);

impl<E> Repository<E>
where
    E: Resource,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
{
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        row: E::ActiveModel,
    ) -> Result<E::Model, ContactsError> {
        row.insert(conn).await.map_err(write_error::<E>)
    }

    /// Save every column of `model`.
    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        model: E::Model,
    ) -> Result<E::Model, ContactsError> {
        model
            .into_active_model()
            .reset_all()
            .update(conn)
            .await
            .map_err(write_error::<E>)
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, model: E::Model) -> Result<(), ContactsError> {
        model
            .into_active_model()
            .delete(conn)
            .await
            .context("delete row")?;
        Ok(())
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        owner: &str,
        id: &str,
    ) -> Result<E::Model, ContactsError> {
        scoped::<E>(owner)
            .filter(E::id_column().eq(id))
            .one(conn)
            .await
            .context("find row by id")?
            .ok_or_else(E::not_found)
    }

    pub async fn exists_by_id<C: ConnectionTrait>(
        conn: &C,
        owner: &str,
        id: &str,
    ) -> Result<bool, ContactsError> {
        Ok(Self::count_by_ids(conn, owner, &[id.to_owned()]).await? > 0)
    }

    /// How many of `ids` exist and belong to `owner`.
    pub async fn count_by_ids<C: ConnectionTrait>(
        conn: &C,
        owner: &str,
        ids: &[String],
    ) -> Result<u64, ContactsError> {
        let count = scoped::<E>(owner)
            .filter(E::id_column().is_in(ids.iter().cloned()))
            .count(conn)
            .await
            .context("count rows by id")?;
        Ok(count)
    }

    /// Filter, count, sort and window `owner`'s rows.
    ///
    /// `total` is counted before sorting and windowing. Every field name in
    /// the query must be a column of `E`, and every preload name one of
    /// [`Resource::RELATIONS`].
    pub async fn find_all<C: ConnectionTrait>(
        conn: &C,
        owner: &str,
        query: &ListQuery,
    ) -> Result<Page<E::Model>, ContactsError> {
        let preload = resolve_preload::<E>(&query.preload)?;
        let sort = query.sort_field().map(column::<E>).transpose()?;

        let mut select = scoped::<E>(owner);
        if !query.search.is_empty() {
            select = select.filter(search_condition::<E>(&query.search, query.or)?);
        }
        for (field, range) in &query.date_ranges {
            let col = date_column::<E>(field)?;
            let (from, to) = range.bounds();
            if let Some(from) = from {
                select = select.filter(col.gte(from));
            }
            if let Some(to) = to {
                select = select.filter(col.lte(to));
            }
        }

        let total = select
            .clone()
            .count(conn)
            .await
            .context("count listed rows")?;

        if let Some(col) = sort {
            select = select.order_by_sort(col, query.sort());
        }
        let rows = select
            .window(query.limit, query.offset)
            .all(conn)
            .await
            .context("list rows")?;

        Ok(Page {
            rows,
            total,
            preload,
        })
    }
}

fn scoped<E: Resource>(owner: &str) -> Select<E> {
    E::find().filter(E::owner_column().eq(owner))
}

/// Translate a failed write into the entity's conflict or a missing reference.
pub(crate) fn write_error<E: Resource>(e: DbErr) -> ContactsError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => E::conflict(),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ContactsError::ReferenceNotFound,
        _ => ContactsError::Internal(anyhow::Error::new(e).context("write row")),
    }
}

// ── Query building ───────────────────────────────────────────────────────────

fn column<E: Resource>(field: &str) -> Result<E::Column, ContactsError> {
    E::Column::from_str(field)
        .map_err(|_| ContactsError::InvalidQuery(format!("unknown field `{field}`")))
}

fn is_text<C: ColumnTrait>(col: &C) -> bool {
    matches!(
        col.def().get_column_type(),
        ColumnType::String(_) | ColumnType::Text | ColumnType::Char(_)
    )
}

fn date_column<E: Resource>(field: &str) -> Result<E::Column, ContactsError> {
    let col = column::<E>(field)?;
    match col.def().get_column_type() {
        ColumnType::TimestampWithTimeZone
        | ColumnType::Timestamp
        | ColumnType::DateTime
        | ColumnType::Date => Ok(col),
        _ => Err(ContactsError::InvalidQuery(format!(
            "field `{field}` is not a date"
        ))),
    }
}

fn search_condition<E: Resource>(
    search: &BTreeMap<String, String>,
    or: bool,
) -> Result<Condition, ContactsError> {
    let mut cond = if or { Condition::any() } else { Condition::all() };
    for (field, term) in search {
        let col = column::<E>(field)?;
        cond = if is_identifier_field(field) {
            cond.add(col.eq(term.as_str()))
        } else if is_text(&col) {
            cond.add(col.contains(term.as_str()))
        } else {
            return Err(ContactsError::InvalidQuery(format!(
                "field `{field}` cannot be searched"
            )));
        };
    }
    Ok(cond)
}

/// Canonical relation names for `requested`, matched ignoring case and underscores.
fn resolve_preload<E: Resource>(requested: &[String]) -> Result<Vec<&'static str>, ContactsError> {
    requested
        .iter()
        .map(|name| {
            let wanted = normalize(name);
            E::RELATIONS
                .iter()
                .copied()
                .find(|rel| normalize(rel) == wanted)
                .ok_or_else(|| ContactsError::InvalidQuery(format!("unknown relation `{name}`")))
        })
        .collect()
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
