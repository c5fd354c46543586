//! Migration: Create centers table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Centers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Centers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Centers::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Centers::Address).string().not_null())
                    .col(ColumnDef::new(Centers::Tel).string().null())
                    .col(ColumnDef::new(Centers::WebUrl).string().null())
                    .col(ColumnDef::new(Centers::InstagramUrl).string().null())
                    .col(ColumnDef::new(Centers::YoutubeUrl).string().null())
                    .col(ColumnDef::new(Centers::ImgList).json_binary().not_null())
                    .col(ColumnDef::new(Centers::OperatingTime).json_binary().not_null())
                    .col(ColumnDef::new(Centers::Facilities).text().null())
                    .col(ColumnDef::new(Centers::Charge).json_binary().not_null())
                    .col(ColumnDef::new(Centers::HoldInfoImg).string().null())
                    .col(
                        ColumnDef::new(Centers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Centers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_centers_name")
                    .table(Centers::Table)
                    .col(Centers::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Centers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Centers {
    Table,
    Id,
    Name,
    Address,
    Tel,
    WebUrl,
    InstagramUrl,
    YoutubeUrl,
    ImgList,
    OperatingTime,
    Facilities,
    Charge,
    HoldInfoImg,
    CreatedAt,
    UpdatedAt,
}
