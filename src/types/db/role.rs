use sea_orm::entity::prelude::*;

use crate::types::internal::listing::Listable;

/// Slug of the reserved role that bypasses every permission check
pub const SUPER_ADMIN_SLUG: &str = "Super Admin";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub slug: String,
    pub name: String,
    /// Protected roles (`editable = false`) cannot be renamed, re-permissioned or deleted
    pub editable: bool,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Model {
    pub fn is_super_admin(&self) -> bool {
        self.slug == SUPER_ADMIN_SLUG
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_operation::Entity")]
    RoleOperation,
    #[sea_orm(has_many = "super::admin_user_role::Entity")]
    AdminUserRole,
}

impl Related<super::role_operation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleOperation.def()
    }
}

impl Related<super::admin_user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminUserRole.def()
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
        Column::UpdatedAt
    }

    fn sortable_columns() -> Option<Vec<Column>> {
        Some(vec![Column::Name])
    }
}
