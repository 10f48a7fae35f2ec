use std::str::FromStr;

use sea_orm::{EntityTrait, IdenStatic};

/// Default page size for collection endpoints
pub const DEFAULT_LIMIT: u64 = 10;

/// Largest offset or limit the database binder accepts (SQL integers are signed)
pub const MAX_BOUND: u64 = i64::MAX as u64;

/// Sort direction requested by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only the literal `desc` selects descending order; anything else is ascending
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Paging, sorting and search options shared by every collection endpoint
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub offset: u64,
    pub limit: u64,
    pub sort_by: Option<String>,
    pub order: SortOrder,
    pub search: Option<String>,
}

impl ListParams {
    /// Offset and limit are clamped to [`MAX_BOUND`]
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset: offset.min(MAX_BOUND),
            limit: limit.min(MAX_BOUND),
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort_by = Some(field.to_string());
        self.order = order;
        self
    }

    pub fn searching(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    /// Search term with surrounding whitespace removed; blank terms disable search
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// One page of a filtered collection
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Number of matching rows before pagination
    pub count: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Adapter that makes an entity usable with the listing store
///
/// Each entity declares the text columns searched by a free-text query, the
/// soft-delete flag and the column used when no valid sort is requested.
pub trait Listable: EntityTrait {
    fn searchable_columns() -> Vec<Self::Column>;

    fn soft_delete_column() -> Self::Column;

    fn default_sort_column() -> Self::Column;

    /// Columns clients may sort by; `None` allows any column of the entity
    fn sortable_columns() -> Option<Vec<Self::Column>> {
        None
    }

    /// Resolve a client supplied field name to a sortable column
    fn sort_column(field: &str) -> Option<Self::Column> {
        let column = Self::Column::from_str(field).ok()?;
        match Self::sortable_columns() {
            Some(allowed) => allowed
                .into_iter()
                .find(|candidate| candidate.as_str() == column.as_str()),
            None => Some(column),
        }
    }
}
