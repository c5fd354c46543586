//! Center service - registering, viewing and searching climbing centers.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CenterPreview, CenterResponse, NewCenter, RankSummary};
use crate::errors::{AppResult, ErrorCode, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait CenterService: Send + Sync {
    async fn create(&self, center: NewCenter) -> AppResult<CenterResponse>;

    /// Center detail with its review aggregate
    async fn find_center(&self, center_id: Uuid) -> AppResult<CenterResponse>;

    async fn search(
        &self,
        keyword: &str,
        params: PaginationParams,
    ) -> AppResult<Paginated<CenterPreview>>;
}

pub struct CenterManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CenterManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CenterService for CenterManager<U> {
    async fn create(&self, center: NewCenter) -> AppResult<CenterResponse> {
        let center = self.uow.centers().create(center).await?;
        tracing::info!(center_id = %center.id, name = %center.name, "Center registered");
        Ok(CenterResponse::new(center, RankSummary::default()))
    }

    async fn find_center(&self, center_id: Uuid) -> AppResult<CenterResponse> {
        let centers = self.uow.centers();
        let reviews = self.uow.reviews();

        let (center, summary) = tokio::try_join!(
            centers.find_by_id(center_id),
            reviews.rank_summary(center_id),
        )?;
        let center =
            center.ok_or_not_found(ErrorCode::CenterDoesNotExist, "Center does not exist")?;

        Ok(CenterResponse::new(center, summary))
    }

    async fn search(
        &self,
        keyword: &str,
        params: PaginationParams,
    ) -> AppResult<Paginated<CenterPreview>> {
        let (centers, total) = self.uow.centers().search(keyword.trim(), &params).await?;
        Ok(Paginated::new(centers, &params, total).map(CenterPreview::from))
    }
}
