//! Migration: Create users table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::OauthId).string().not_null())
                    .col(ColumnDef::new(Users::Provider).string_len(16).not_null())
                    .col(ColumnDef::new(Users::Role).string_len(16).not_null())
                    .col(ColumnDef::new(Users::Nickname).string_len(20).null().unique_key())
                    .col(ColumnDef::new(Users::MetropolitanActivityArea).string().null())
                    .col(ColumnDef::new(Users::BasicLocalActivityArea).string().null())
                    .col(ColumnDef::new(Users::ImagePath).string().null())
                    .col(ColumnDef::new(Users::InstagramOauthId).string().null())
                    .col(ColumnDef::new(Users::InstagramUserName).string().null())
                    .col(ColumnDef::new(Users::Height).float().null())
                    .col(ColumnDef::new(Users::ArmReach).float().null())
                    .col(
                        ColumnDef::new(Users::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One account per provider identity
        manager
            .create_index(
                Index::create()
                    .name("idx_users_provider_oauth_id")
                    .table(Users::Table)
                    .col(Users::Provider)
                    .col(Users::OauthId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Users {
    Table,
    Id,
    Email,
    OauthId,
    Provider,
    Role,
    Nickname,
    MetropolitanActivityArea,
    BasicLocalActivityArea,
    ImagePath,
    InstagramOauthId,
    InstagramUserName,
    Height,
    ArmReach,
    IsPrivate,
    CreatedAt,
    UpdatedAt,
}
