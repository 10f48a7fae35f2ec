use sea_orm::entity::prelude::*;

use crate::types::internal::listing::Listable;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(indexed)]
    pub email: String,
    pub password_hash: String,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::admin_user_role::Entity")]
    AdminUserRole,
    #[sea_orm(has_many = "super::admin_user_otp::Entity")]
    AdminUserOtp,
    #[sea_orm(has_many = "super::project_user::Entity")]
    ProjectUser,
    #[sea_orm(has_many = "super::issue_user::Entity")]
    IssueUser,
}

impl Related<super::admin_user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminUserRole.def()
    }
}

impl Related<super::admin_user_otp::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminUserOtp.def()
    }
}

impl Related<super::project_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectUser.def()
    }
}

impl Related<super::issue_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IssueUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Listable for Entity {
    fn searchable_columns() -> Vec<Column> {
        vec![Column::Name, Column::Email]
    }

    fn soft_delete_column() -> Column {
        Column::IsDeleted
    }

    fn default_sort_column() -> Column {
        Column::CreatedAt
    }

    fn sortable_columns() -> Option<Vec<Column>> {
        Some(vec![Column::Name, Column::Email])
    }
}
