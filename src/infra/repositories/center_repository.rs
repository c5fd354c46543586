//! Center repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use uuid::Uuid;

use super::entities::center::{
    self, ActiveModel, ChargeList, Entity as CenterEntity, ImageList, OperatingTimeList,
};
use crate::domain::{Center, NewCenter};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CenterRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Center>>;

    async fn create(&self, center: NewCenter) -> AppResult<Center>;

    /// Centers whose name contains `keyword` (case-insensitive), ordered by
    /// name, with the total number of matches
    async fn search(
        &self,
        keyword: &str,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Center>, u64)>;
}

/// `%keyword%` with LIKE wildcards escaped, so `_` and `%` match literally
fn contains_pattern(keyword: &str) -> String {
    let escaped = keyword
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn search_query(keyword: &str) -> Select<CenterEntity> {
    CenterEntity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(center::Column::Name)))
                .like(LikeExpr::new(contains_pattern(keyword)).escape('\\')),
        )
        .order_by_asc(center::Column::Name)
}

/// Concrete implementation of CenterRepository
pub struct CenterStore {
    db: DatabaseConnection,
}

impl CenterStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CenterRepository for CenterStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Center>> {
        let result = CenterEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Center::from))
    }

    async fn create(&self, center: NewCenter) -> AppResult<Center> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(center.name),
            address: Set(center.address),
            tel: Set(center.tel),
            web_url: Set(center.web_url),
            instagram_url: Set(center.instagram_url),
            youtube_url: Set(center.youtube_url),
            img_list: Set(ImageList(center.img_list)),
            operating_time: Set(OperatingTimeList(center.operating_time)),
            facilities: Set(center.facilities),
            charge: Set(ChargeList(center.charge)),
            hold_info_img: Set(center.hold_info_img),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Center::from(model))
    }

    async fn search(
        &self,
        keyword: &str,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Center>, u64)> {
        let paginator = search_query(keyword).paginate(&self.db, params.limit());

        let total = paginator.num_items().await.map_err(AppError::from)?;
        let models = paginator
            .fetch_page(params.page_index())
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Center::from).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait, Value};

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Seoul"), "%seoul%");
        assert_eq!(contains_pattern("_"), "%\\_%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_search_query_matches_underscore_literally() {
        let statement = search_query("_").build(DbBackend::Postgres);

        assert!(
            statement.sql.contains(r#"LOWER("name") LIKE $1 ESCAPE"#),
            "{}",
            statement.sql
        );
        assert!(statement.sql.ends_with(r#"ORDER BY "centers"."name" ASC"#), "{}", statement.sql);

        let values = statement.values.expect("bound values").0;
        assert_eq!(values[0], Value::from("%\\_%"));
    }
}
