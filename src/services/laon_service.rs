//! Laon service - follow-like relation between members.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::requester::{find_member, find_target};
use crate::domain::UserPreview;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait LaonService: Send + Sync {
    async fn create_laon(&self, user_id: Uuid, nickname: &str) -> AppResult<()>;

    async fn delete_laon(&self, user_id: Uuid, nickname: &str) -> AppResult<()>;

    /// The requester's laons, hiding users who blocked the requester
    async fn find_all_laon(
        &self,
        user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<UserPreview>>;
}

pub struct LaonManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LaonManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> LaonService for LaonManager<U> {
    async fn create_laon(&self, user_id: Uuid, nickname: &str) -> AppResult<()> {
        let users = self.uow.users();
        let me = find_member(users.as_ref(), user_id).await?;
        let target = find_target(users.as_ref(), nickname).await?;

        if target.id == me.id {
            return Err(AppError::validation("Cannot laon yourself"));
        }

        if self.uow.block_users().exists_between(me.id, target.id).await? {
            return Err(AppError::unauthorized(
                ErrorCode::Blocked,
                format!("Blocked relation with '{}'", nickname),
            ));
        }

        let laons = self.uow.laons();
        if laons.find(me.id, target.id).await?.is_some() {
            return Err(AppError::bad_request(
                ErrorCode::RowAlreadyExist,
                format!("'{}' is already a laon", nickname),
            ));
        }

        laons.create(me.id, target.id).await?;
        Ok(())
    }

    async fn delete_laon(&self, user_id: Uuid, nickname: &str) -> AppResult<()> {
        let users = self.uow.users();
        let me = find_member(users.as_ref(), user_id).await?;
        let target = find_target(users.as_ref(), nickname).await?;

        let laons = self.uow.laons();
        let laon = laons.find(me.id, target.id).await?.ok_or_else(|| {
            AppError::bad_request(
                ErrorCode::RowDoesNotExist,
                format!("'{}' is not a laon", nickname),
            )
        })?;

        laons.delete(laon.id).await
    }

    async fn find_all_laon(
        &self,
        user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<UserPreview>> {
        let me = find_member(self.uow.users().as_ref(), user_id).await?;
        let (laons, total) = self.uow.laons().find_all_by_user_id(me.id, &params).await?;
        Ok(Paginated::new(laons, &params, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Laon, User};
    use crate::services::test_support::{member, TestUnitOfWork};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn setup(me: &User, target: &User) -> TestUnitOfWork {
        let mut uow = TestUnitOfWork::default();
        let found = me.clone();
        uow.users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        let found = target.clone();
        uow.users
            .expect_find_by_nickname()
            .returning(move |_| Ok(Some(found.clone())));
        uow
    }

    fn laon(user_id: Uuid, laon_id: Uuid) -> Laon {
        Laon {
            id: Uuid::new_v4(),
            user_id,
            laon_id,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_laon_success() {
        let me = member("me");
        let target = member("target");
        let mut uow = setup(&me, &target);
        uow.block_users.expect_exists_between().returning(|_, _| Ok(false));
        uow.laons.expect_find().returning(|_, _| Ok(None));
        uow.laons
            .expect_create()
            .with(eq(me.id), eq(target.id))
            .times(1)
            .returning(|user_id, laon_id| Ok(laon(user_id, laon_id)));

        LaonManager::new(uow.build())
            .create_laon(me.id, "target")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_laon_to_self() {
        let me = member("me");
        let uow = setup(&me, &me);

        let err = LaonManager::new(uow.build())
            .create_laon(me.id, "me")
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidParameter);
    }

    #[tokio::test]
    async fn test_create_laon_blocked() {
        let me = member("me");
        let target = member("target");
        let mut uow = setup(&me, &target);
        uow.block_users.expect_exists_between().returning(|_, _| Ok(true));

        let err = LaonManager::new(uow.build())
            .create_laon(me.id, "target")
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Blocked);
    }

    #[tokio::test]
    async fn test_create_laon_duplicate() {
        let me = member("me");
        let target = member("target");
        let mut uow = setup(&me, &target);
        uow.block_users.expect_exists_between().returning(|_, _| Ok(false));
        uow.laons
            .expect_find()
            .returning(|user_id, laon_id| Ok(Some(laon(user_id, laon_id))));
        uow.laons.expect_create().never();

        let err = LaonManager::new(uow.build())
            .create_laon(me.id, "target")
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::RowAlreadyExist);
    }

    #[tokio::test]
    async fn test_delete_missing_laon() {
        let me = member("me");
        let target = member("target");
        let mut uow = setup(&me, &target);
        uow.laons.expect_find().returning(|_, _| Ok(None));

        let err = LaonManager::new(uow.build())
            .delete_laon(me.id, "target")
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::RowDoesNotExist);
    }

    #[tokio::test]
    async fn test_find_all_laon_paginates() {
        let me = member("me");
        let mut uow = TestUnitOfWork::default();
        let found = me.clone();
        uow.users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        uow.laons.expect_find_all_by_user_id().returning(|_, _| {
            Ok((
                vec![UserPreview {
                    nickname: "target".to_string(),
                    image_path: None,
                }],
                3,
            ))
        });

        let page = LaonManager::new(uow.build())
            .find_all_laon(me.id, PaginationParams::new(1, 1))
            .await
            .unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.next_page, Some(2));
    }
}
