use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "operations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub name: String,
    #[sea_orm(indexed)]
    pub order_index: i32,
    /// `None` for headings, the heading id for leaf operations
    pub parent_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Heading,
    #[sea_orm(has_many = "super::role_operation::Entity")]
    RoleOperation,
}

impl Related<super::role_operation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleOperation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
