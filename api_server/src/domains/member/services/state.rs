// Member domain state
// 회원 도메인 상태
use crate::domains::category::services::CategoryService;
use crate::domains::member::services::{MemberService, OnboardingService};
use crate::shared::database::Repositories;

#[derive(Clone)]
pub struct MemberState {
    pub member_service: MemberService,
    pub onboarding_service: OnboardingService,
}

impl MemberState {
    pub fn new(repositories: &Repositories, category_service: CategoryService) -> Self {
        Self {
            member_service: MemberService::new(repositories.members.clone()),
            onboarding_service: OnboardingService::new(repositories.onboarding.clone(), category_service),
        }
    }
}
