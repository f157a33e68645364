use std::sync::Arc;
use crate::domains::category::models::{distinct_category_names, Category};
use crate::domains::category::services::CategoryService;
use crate::domains::member::models::Member;
use crate::shared::database::OnboardingRepository;
use crate::shared::errors::MemberError;

// =====================================================
// 온보딩 카테고리 선택
// =====================================================
// 항상 전체 교체 (합집합 아님)
// 1. 모든 이름을 먼저 카테고리로 변환 (하나라도 없으면 아무것도 바꾸지 않음)
// 2. 삭제 + 삽입을 하나의 트랜잭션에서 수행
// =====================================================
#[derive(Clone)]
pub struct OnboardingService {
    onboarding: Arc<dyn OnboardingRepository>,
    category_service: CategoryService,
}

impl OnboardingService {
    pub fn new(onboarding: Arc<dyn OnboardingRepository>, category_service: CategoryService) -> Self {
        Self {
            onboarding,
            category_service,
        }
    }

    /// 회원의 온보딩 카테고리를 전체 교체
    /// Replace the member's onboarding categories with exactly `names`
    pub async fn replace_categories<S: AsRef<str>>(
        &self,
        member: &Member,
        names: &[S],
    ) -> Result<Vec<Category>, MemberError> {
        let names = distinct_category_names(names.iter().map(|n| n.as_ref()));

        let mut categories = Vec::with_capacity(names.len());
        for name in &names {
            categories.push(self.category_service.find_by_name(name).await?);
        }

        let category_ids: Vec<u64> = categories.iter().map(|c| c.id).collect();
        self.onboarding
            .replace_categories(member.id, &category_ids)
            .await
            .map_err(|e| MemberError::DatabaseError(format!("Failed to replace onboarding categories: {:#}", e)))?;

        tracing::info!(member_id = member.id, categories = ?names, "Onboarding categories replaced");
        Ok(categories)
    }

    /// 회원의 온보딩 카테고리 (선택 순서)
    pub async fn member_categories(&self, member_id: u64) -> Result<Vec<Category>, MemberError> {
        self.onboarding
            .find_categories(member_id)
            .await
            .map_err(|e| MemberError::DatabaseError(format!("Failed to fetch onboarding categories: {:#}", e)))
    }

    pub async fn member_category_names(&self, member_id: u64) -> Result<Vec<String>, MemberError> {
        Ok(self
            .member_categories(member_id)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }
}
