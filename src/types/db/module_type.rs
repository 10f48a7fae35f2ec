use sea_orm::entity::prelude::*;

use crate::types::internal::listing::Listable;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "module_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::module::Entity")]
    Module,
}

impl Related<super::module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Listable for Entity {
    fn searchable_columns() -> Vec<Column> {
        vec![Column::Name]
    }

    fn soft_delete_column() -> Column {
        Column::IsDeleted
    }

    fn default_sort_column() -> Column {
        Column::CreatedAt
    }
}
