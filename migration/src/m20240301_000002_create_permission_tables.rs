use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Permission {
    Table,
    Id,
    Name,
    Codename,
}

#[derive(DeriveIden)]
enum UserPermission {
    Table,
    UserId,
    PermissionId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Permission::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Permission::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(ColumnDef::new(Permission::Name).string().not_null())
                .col(ColumnDef::new(Permission::Codename).string().not_null().unique_key())
                .to_owned(),
        ).await?;

        // Join table, FKs declared inline so SQLite accepts them
        m.create_table(
            Table::create()
                .table(UserPermission::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserPermission::UserId).uuid().not_null())
                .col(ColumnDef::new(UserPermission::PermissionId).integer().not_null())
                .primary_key(
                    Index::create()
                        .name("pk_user_permission")
                        .col(UserPermission::UserId)
                        .col(UserPermission::PermissionId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_permission_user")
                        .from(UserPermission::Table, UserPermission::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_permission_permission")
                        .from(UserPermission::Table, UserPermission::PermissionId)
                        .to(Permission::Table, Permission::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_user_permission_user")
                .table(UserPermission::Table)
                .col(UserPermission::UserId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(UserPermission::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Permission::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
