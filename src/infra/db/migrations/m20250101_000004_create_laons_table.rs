//! Migration: Create laons table.

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
                    .table(Laons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Laons::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Laons::UserId).uuid().not_null())
                    .col(ColumnDef::new(Laons::LaonId).uuid().not_null())
                    .col(
                        ColumnDef::new(Laons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_laons_user_id")
                            .from(Laons::Table, Laons::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_laons_laon_id")
                            .from(Laons::Table, Laons::LaonId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_laons_user_laon")
                    .table(Laons::Table)
                    .col(Laons::UserId)
                    .col(Laons::LaonId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Laons::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Laons {
    Table,
    Id,
    UserId,
    LaonId,
    CreatedAt,
}
