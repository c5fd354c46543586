//! Migration: Create block_users table.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlockUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlockUsers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BlockUsers::UserId).uuid().not_null())
                    .col(ColumnDef::new(BlockUsers::BlockedUserId).uuid().not_null())
                    .col(
                        ColumnDef::new(BlockUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_block_users_user_id")
                            .from(BlockUsers::Table, BlockUsers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_block_users_blocked_user_id")
                            .from(BlockUsers::Table, BlockUsers::BlockedUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_block_users_user_blocked")
                    .table(BlockUsers::Table)
                    .col(BlockUsers::UserId)
                    .col(BlockUsers::BlockedUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Reverse lookups ("who blocked me") filter on blocked_user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_block_users_blocked_user_id")
                    .table(BlockUsers::Table)
                    .col(BlockUsers::BlockedUserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlockUsers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlockUsers {
    Table,
    Id,
    UserId,
    BlockedUserId,
    CreatedAt,
}
