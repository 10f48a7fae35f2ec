use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_access_tables::AdminUsers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(Projects::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Projects::Description).string_len(255).null())
                    .col(ColumnDef::new(Projects::StartDate).date().not_null())
                    .col(ColumnDef::new(Projects::EndDate).date().not_null())
                    .col(ColumnDef::new(Projects::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Projects::ManagerId).string_len(36).not_null())
                    .col(ColumnDef::new(Projects::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Projects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Projects::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_manager_id")
                            .from(Projects::Table, Projects::ManagerId)
                            .to(AdminUsers::Table, AdminUsers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ModuleTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ModuleTypes::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(ModuleTypes::Name).string_len(50).not_null())
                    .col(ColumnDef::new(ModuleTypes::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(ModuleTypes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ModuleTypes::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Modules::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(Modules::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Modules::Description).string_len(255).not_null())
                    .col(ColumnDef::new(Modules::ProjectId).string_len(36).not_null())
                    .col(ColumnDef::new(Modules::ModuleTypeId).string_len(36).not_null())
                    .col(ColumnDef::new(Modules::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Modules::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Modules::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_modules_project_id")
                            .from(Modules::Table, Modules::ProjectId)
                            .to(Projects::Table, Projects::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_modules_module_type_id")
                            .from(Modules::Table, Modules::ModuleTypeId)
                            .to(ModuleTypes::Table, ModuleTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tasks::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(Tasks::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Tasks::Description).string_len(255).null())
                    .col(ColumnDef::new(Tasks::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Tasks::ModuleId).string_len(36).not_null())
                    .col(ColumnDef::new(Tasks::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Tasks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Tasks::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_module_id")
                            .from(Tasks::Table, Tasks::ModuleId)
                            .to(Modules::Table, Modules::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Issues::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(Issues::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Issues::Description).string_len(255).null())
                    .col(ColumnDef::new(Issues::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Issues::Priority).string_len(20).not_null())
                    .col(ColumnDef::new(Issues::TaskId).string_len(36).not_null())
                    .col(ColumnDef::new(Issues::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Issues::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Issues::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issues_task_id")
                            .from(Issues::Table, Issues::TaskId)
                            .to(Tasks::Table, Tasks::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProjectUsers::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(ProjectUsers::ProjectId).string_len(36).not_null())
                    .col(ColumnDef::new(ProjectUsers::AdminUserId).string_len(36).not_null())
                    .col(ColumnDef::new(ProjectUsers::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_users_project_id")
                            .from(ProjectUsers::Table, ProjectUsers::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_users_admin_user_id")
                            .from(ProjectUsers::Table, ProjectUsers::AdminUserId)
                            .to(AdminUsers::Table, AdminUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_users_pair")
                    .table(ProjectUsers::Table)
                    .col(ProjectUsers::ProjectId)
                    .col(ProjectUsers::AdminUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IssueUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(IssueUsers::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(IssueUsers::IssueId).string_len(36).not_null())
                    .col(ColumnDef::new(IssueUsers::AdminUserId).string_len(36).not_null())
                    .col(ColumnDef::new(IssueUsers::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_users_issue_id")
                            .from(IssueUsers::Table, IssueUsers::IssueId)
                            .to(Issues::Table, Issues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_users_admin_user_id")
                            .from(IssueUsers::Table, IssueUsers::AdminUserId)
                            .to(AdminUsers::Table, AdminUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issue_users_pair")
                    .table(IssueUsers::Table)
                    .col(IssueUsers::IssueId)
                    .col(IssueUsers::AdminUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IssueUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Issues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModuleTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Name,
    Description,
    StartDate,
    EndDate,
    Status,
    ManagerId,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ModuleTypes {
    Table,
    Id,
    Name,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Modules {
    Table,
    Id,
    Name,
    Description,
    ProjectId,
    ModuleTypeId,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Name,
    Description,
    Status,
    ModuleId,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Issues {
    Table,
    Id,
    Name,
    Description,
    Status,
    Priority,
    TaskId,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProjectUsers {
    Table,
    Id,
    ProjectId,
    AdminUserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum IssueUsers {
    Table,
    Id,
    IssueId,
    AdminUserId,
    CreatedAt,
}
