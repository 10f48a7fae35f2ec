use std::collections::HashMap;

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, Order, PaginatorTrait,
    PrimaryKeyTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::errors::InternalError;
use crate::types::internal::listing::{ListParams, Listable, Page, SortOrder};

/// Paginated, searchable, sortable read over a soft-deletable entity
///
/// Filters out soft-deleted rows, OR-combines a case-insensitive substring
/// match over the entity's searchable columns, counts the filtered set, then
/// orders and slices it. Offsets past the end yield an empty page.
pub async fn list<E, C>(conn: &C, params: &ListParams) -> Result<Page<E::Model>, InternalError>
where
    E: Listable,
    E::Model: FromQueryResult + Sized + Send + Sync,
    C: ConnectionTrait,
{
    list_where::<E, C>(conn, params, Condition::all()).await
}

/// Same as [`list`] with an extra filter applied before search and count
pub async fn list_where<E, C>(
    conn: &C,
    params: &ListParams,
    filter: Condition,
) -> Result<Page<E::Model>, InternalError>
where
    E: Listable,
    E::Model: FromQueryResult + Sized + Send + Sync,
    C: ConnectionTrait,
{
    let query = filtered_query::<E>(params, filter);

    let count = query
        .clone()
        .count(conn)
        .await
        .map_err(|e| InternalError::database("list_count", e))?;

    let items = sorted(query, params)
        .offset(params.offset)
        .limit(params.limit)
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_page", e))?;

    Ok(Page { count, items })
}

fn filtered_query<E: Listable>(params: &ListParams, filter: Condition) -> Select<E> {
    let mut query = E::find()
        .filter(E::soft_delete_column().eq(false))
        .filter(filter);

    if let Some(term) = params.search_term() {
        let pattern = format!("%{}%", term.to_lowercase());
        let any_column = E::searchable_columns()
            .into_iter()
            .fold(Condition::any(), |condition, column| {
                condition.add(
                    Expr::expr(Func::lower(Expr::col((E::default(), column)))).like(pattern.as_str()),
                )
            });
        query = query.filter(any_column);
    }

    query
}

fn sorted<E: Listable>(query: Select<E>, params: &ListParams) -> Select<E> {
    match params.sort_by.as_deref().and_then(E::sort_column) {
        Some(column) => {
            let order = match params.order {
                SortOrder::Asc => Order::Asc,
                SortOrder::Desc => Order::Desc,
            };
            query.order_by(column, order)
        }
        None => query.order_by_desc(E::default_sort_column()),
    }
}

/// Look up a non-deleted row by its string primary key
pub async fn find_active<E, C>(conn: &C, id: &str) -> Result<Option<E::Model>, InternalError>
where
    E: Listable,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = String>,
    E::Model: FromQueryResult + Sized + Send + Sync,
    C: ConnectionTrait,
{
    E::find_by_id(id.to_owned())
        .filter(E::soft_delete_column().eq(false))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_active", e))
}

/// Map of id to display name for the given ids, deleted rows included
pub async fn names_by_id<E, C>(
    conn: &C,
    ids: Vec<String>,
    id_column: E::Column,
    name_column: E::Column,
) -> Result<HashMap<String, String>, InternalError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let pairs: Vec<(String, String)> = E::find()
        .select_only()
        .column(id_column)
        .column(name_column)
        .filter(id_column.is_in(ids))
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| InternalError::database("names_by_id", e))?;

    Ok(pairs.into_iter().collect())
}
