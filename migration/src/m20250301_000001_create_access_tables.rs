use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminUsers::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(AdminUsers::Name).string_len(100).not_null())
                    .col(ColumnDef::new(AdminUsers::Email).string_len(100).not_null())
                    .col(ColumnDef::new(AdminUsers::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(AdminUsers::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(AdminUsers::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(AdminUsers::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admin_users_email")
                    .table(AdminUsers::Table)
                    .col(AdminUsers::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(Roles::Slug).string_len(50).not_null())
                    .col(ColumnDef::new(Roles::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Roles::Editable).boolean().not_null().default(true))
                    .col(ColumnDef::new(Roles::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Roles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Roles::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Headings have no parent; leaves point at their heading
        manager
            .create_table(
                Table::create()
                    .table(Operations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Operations::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(Operations::Slug).string_len(50).not_null().unique_key())
                    .col(ColumnDef::new(Operations::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Operations::OrderIndex).integer().not_null())
                    .col(ColumnDef::new(Operations::ParentId).string_len(36).null())
                    .col(ColumnDef::new(Operations::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Operations::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_operations_parent_id")
                            .from(Operations::Table, Operations::ParentId)
                            .to(Operations::Table, Operations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operations_order_index")
                    .table(Operations::Table)
                    .col(Operations::OrderIndex)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoleOperations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RoleOperations::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(RoleOperations::RoleId).string_len(36).not_null())
                    .col(ColumnDef::new(RoleOperations::OperationId).string_len(36).not_null())
                    .col(ColumnDef::new(RoleOperations::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(RoleOperations::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_operations_role_id")
                            .from(RoleOperations::Table, RoleOperations::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_operations_operation_id")
                            .from(RoleOperations::Table, RoleOperations::OperationId)
                            .to(Operations::Table, Operations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_role_operations_role_operation")
                    .table(RoleOperations::Table)
                    .col(RoleOperations::RoleId)
                    .col(RoleOperations::OperationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminUserRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminUserRoles::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(AdminUserRoles::AdminUserId).string_len(36).not_null())
                    .col(ColumnDef::new(AdminUserRoles::RoleId).string_len(36).not_null())
                    .col(ColumnDef::new(AdminUserRoles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(AdminUserRoles::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_user_roles_admin_user_id")
                            .from(AdminUserRoles::Table, AdminUserRoles::AdminUserId)
                            .to(AdminUsers::Table, AdminUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_user_roles_role_id")
                            .from(AdminUserRoles::Table, AdminUserRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One role per admin user
        manager
            .create_index(
                Index::create()
                    .name("idx_admin_user_roles_admin_user_id")
                    .table(AdminUserRoles::Table)
                    .col(AdminUserRoles::AdminUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminUserOtps::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminUserOtps::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(AdminUserOtps::Otp).string_len(6).not_null())
                    .col(ColumnDef::new(AdminUserOtps::IsRedeemed).boolean().not_null().default(false))
                    .col(ColumnDef::new(AdminUserOtps::IsConsumed).boolean().not_null().default(false))
                    .col(ColumnDef::new(AdminUserOtps::AdminUserId).string_len(36).not_null())
                    .col(ColumnDef::new(AdminUserOtps::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(AdminUserOtps::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_user_otps_admin_user_id")
                            .from(AdminUserOtps::Table, AdminUserOtps::AdminUserId)
                            .to(AdminUsers::Table, AdminUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admin_user_otps_admin_user_id")
                    .table(AdminUserOtps::Table)
                    .col(AdminUserOtps::AdminUserId)
                    .col(AdminUserOtps::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminUserOtps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminUserRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoleOperations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Operations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminUsers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum AdminUsers {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Slug,
    Name,
    Editable,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Operations {
    Table,
    Id,
    Slug,
    Name,
    OrderIndex,
    ParentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RoleOperations {
    Table,
    Id,
    RoleId,
    OperationId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AdminUserRoles {
    Table,
    Id,
    AdminUserId,
    RoleId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AdminUserOtps {
    Table,
    Id,
    Otp,
    IsRedeemed,
    IsConsumed,
    AdminUserId,
    CreatedAt,
    UpdatedAt,
}
