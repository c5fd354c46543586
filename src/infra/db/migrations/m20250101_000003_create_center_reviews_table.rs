//! Migration: Create center_reviews table.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users_table::Users;
use super::m20250101_000002_create_centers_table::Centers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CenterReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CenterReviews::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CenterReviews::Rank).small_integer().not_null())
                    .col(ColumnDef::new(CenterReviews::Content).string_len(500).not_null())
                    .col(ColumnDef::new(CenterReviews::UserId).uuid().not_null())
                    .col(ColumnDef::new(CenterReviews::CenterId).uuid().not_null())
                    .col(
                        ColumnDef::new(CenterReviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CenterReviews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_center_reviews_user_id")
                            .from(CenterReviews::Table, CenterReviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_center_reviews_center_id")
                            .from(CenterReviews::Table, CenterReviews::CenterId)
                            .to(Centers::Table, Centers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One review per user per center
        manager
            .create_index(
                Index::create()
                    .name("idx_center_reviews_user_center")
                    .table(CenterReviews::Table)
                    .col(CenterReviews::UserId)
                    .col(CenterReviews::CenterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_center_reviews_center_created_at")
                    .table(CenterReviews::Table)
                    .col(CenterReviews::CenterId)
                    .col(CenterReviews::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CenterReviews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CenterReviews {
    Table,
    Id,
    Rank,
    Content,
    UserId,
    CenterId,
    CreatedAt,
    UpdatedAt,
}
