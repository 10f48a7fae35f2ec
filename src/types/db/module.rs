use sea_orm::entity::prelude::*;

use crate::types::internal::listing::Listable;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "modules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub project_id: String,
    pub module_type_id: String,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::module_type::Entity",
        from = "Column::ModuleTypeId",
        to = "super::module_type::Column::Id"
    )]
    ModuleType,
    #[sea_orm(has_many = "super::task::Entity")]
    Task,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::module_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleType.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Listable for Entity {
    fn searchable_columns() -> Vec<Column> {
        vec![Column::Name, Column::Description]
    }

    fn soft_delete_column() -> Column {
        Column::IsDeleted
    }

    fn default_sort_column() -> Column {
        Column::CreatedAt
    }
}
