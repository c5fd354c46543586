//! Shared fixtures for service unit tests.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Center, CenterReview, OAuth2Provider, User};
use crate::infra::repositories::{
    MockBlockUserRepository, MockCenterRepository, MockLaonRepository, MockReviewRepository,
    MockUserRepository,
};
use crate::infra::{
    BlockUserRepository, CenterRepository, LaonRepository, ReviewRepository, UnitOfWork,
    UserRepository,
};

/// UnitOfWork over mockall repositories. Unset repositories are strict
/// mocks, so any unexpected call fails the test.
#[derive(Default)]
pub(crate) struct TestUnitOfWork {
    pub users: MockUserRepository,
    pub centers: MockCenterRepository,
    pub reviews: MockReviewRepository,
    pub laons: MockLaonRepository,
    pub block_users: MockBlockUserRepository,
}

impl TestUnitOfWork {
    pub fn build(self) -> Arc<BuiltUnitOfWork> {
        Arc::new(BuiltUnitOfWork {
            users: Arc::new(self.users),
            centers: Arc::new(self.centers),
            reviews: Arc::new(self.reviews),
            laons: Arc::new(self.laons),
            block_users: Arc::new(self.block_users),
        })
    }
}

pub(crate) struct BuiltUnitOfWork {
    users: Arc<MockUserRepository>,
    centers: Arc<MockCenterRepository>,
    reviews: Arc<MockReviewRepository>,
    laons: Arc<MockLaonRepository>,
    block_users: Arc<MockBlockUserRepository>,
}

impl UnitOfWork for BuiltUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn centers(&self) -> Arc<dyn CenterRepository> {
        self.centers.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.reviews.clone()
    }

    fn laons(&self) -> Arc<dyn LaonRepository> {
        self.laons.clone()
    }

    fn block_users(&self) -> Arc<dyn BlockUserRepository> {
        self.block_users.clone()
    }
}

/// A user who has completed sign-up
pub(crate) fn member(nickname: &str) -> User {
    let mut user = User::new(
        Uuid::new_v4(),
        format!("{}@example.com", nickname),
        format!("oauth-{}", nickname),
        OAuth2Provider::Google,
    );
    user.nickname = Some(nickname.to_string());
    user.metropolitan_activity_area = Some("Seoul".to_string());
    user.basic_local_activity_area = Some("Mapo-gu".to_string());
    user
}

pub(crate) fn center() -> Center {
    let now = Utc::now();
    Center {
        id: Uuid::new_v4(),
        name: "Claon Climbing".to_string(),
        address: "Seoul".to_string(),
        tel: None,
        web_url: None,
        instagram_url: None,
        youtube_url: None,
        img_list: vec!["https://img.example.com/1.png".to_string()],
        operating_time: vec![],
        facilities: None,
        charge: vec![],
        hold_info_img: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn review(user_id: Uuid, center_id: Uuid) -> CenterReview {
    let now = Utc::now();
    CenterReview {
        id: Uuid::new_v4(),
        rank: 5,
        content: "Great problems".to_string(),
        user_id,
        center_id,
        created_at: now,
        updated_at: now,
    }
}
