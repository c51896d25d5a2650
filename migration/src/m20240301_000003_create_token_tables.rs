use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ActionToken {
    Table,
    Id,
    Key,
    UserId,
    Kind,
    CreatedAt,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum TemporaryToken {
    Table,
    Key,
    UserId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(ActionToken::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(ActionToken::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(ColumnDef::new(ActionToken::Key).string().not_null().unique_key())
                .col(ColumnDef::new(ActionToken::UserId).uuid().not_null())
                .col(ColumnDef::new(ActionToken::Kind).string().not_null())
                .col(ColumnDef::new(ActionToken::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(ActionToken::ExpiresAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_action_token_user")
                        .from(ActionToken::Table, ActionToken::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_action_token_user")
                .table(ActionToken::Table)
                .col(ActionToken::UserId)
                .to_owned(),
        ).await?;

        // one session token per user
        m.create_table(
            Table::create()
                .table(TemporaryToken::Table)
                .if_not_exists()
                .col(ColumnDef::new(TemporaryToken::Key).string().not_null().primary_key())
                .col(ColumnDef::new(TemporaryToken::UserId).uuid().not_null().unique_key())
                .col(ColumnDef::new(TemporaryToken::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_temporary_token_user")
                        .from(TemporaryToken::Table, TemporaryToken::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(TemporaryToken::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(ActionToken::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
