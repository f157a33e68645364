// All repositories module
pub mod member;
pub mod category;
pub mod ticket;
pub mod mock;

pub use member::*;
pub use category::*;
pub use ticket::*;
pub use mock::*;

use std::sync::Arc;
use crate::shared::database::Database;

/// 서비스에 주입되는 저장소 묶음
/// Repository handles injected into the services
#[derive(Clone)]
pub struct Repositories {
    pub members: Arc<dyn MemberRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub onboarding: Arc<dyn OnboardingRepository>,
    pub tickets: Arc<dyn TicketRepository>,
}

impl Repositories {
    /// PostgreSQL 저장소
    pub fn postgres(db: &Database) -> Self {
        Self {
            members: Arc::new(PgMemberRepository::new(db.pool().clone())),
            categories: Arc::new(PgCategoryRepository::new(db.pool().clone())),
            onboarding: Arc::new(PgOnboardingRepository::new(db.pool().clone())),
            tickets: Arc::new(PgTicketRepository::new(db.pool().clone())),
        }
    }

    /// 하나의 MockStore를 모든 저장소로 사용
    pub fn mock(store: Arc<MockStore>) -> Self {
        Self {
            members: store.clone(),
            categories: store.clone(),
            onboarding: store.clone(),
            tickets: store,
        }
    }
}
