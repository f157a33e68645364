use sqlx::PgPool;
use anyhow::{Context, Result};
use async_trait::async_trait;
use crate::domains::category::models::Category;
use crate::shared::database::repositories::category::category_repository::row_to_category;

/// 온보딩 카테고리 저장소 (회원 <-> 카테고리 연결)
/// Onboarding association persistence
#[async_trait]
pub trait OnboardingRepository: Send + Sync {
    /// 회원의 연결을 모두 지우고 새 집합으로 교체 (하나의 트랜잭션)
    /// Replace the member's whole association set atomically
    async fn replace_categories(&self, member_id: u64, category_ids: &[u64]) -> Result<()>;

    /// 회원의 온보딩 카테고리 (선택 순서대로)
    async fn find_categories(&self, member_id: u64) -> Result<Vec<Category>>;
}

pub struct PgOnboardingRepository {
    pool: PgPool,
}

impl PgOnboardingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OnboardingRepository for PgOnboardingRepository {
    async fn replace_categories(&self, member_id: u64, category_ids: &[u64]) -> Result<()> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        // 회원 행을 잠가 같은 회원에 대한 동시 교체를 직렬화
        sqlx::query("SELECT id FROM members WHERE id = $1 FOR UPDATE")
            .bind(member_id as i64)
            .fetch_optional(&mut *tx)
            .await
            .context("Failed to lock member")?;

        sqlx::query("DELETE FROM onboarding_member_categories WHERE member_id = $1")
            .bind(member_id as i64)
            .execute(&mut *tx)
            .await
            .context("Failed to delete onboarding categories")?;

        for category_id in category_ids {
            sqlx::query(
                r#"
                INSERT INTO onboarding_member_categories (member_id, category_id, created_at)
                VALUES ($1, $2, clock_timestamp())
                "#,
            )
            .bind(member_id as i64)
            .bind(*category_id as i64)
            .execute(&mut *tx)
            .await
            .context("Failed to create onboarding category")?;
        }

        tx.commit().await.context("Failed to commit onboarding categories")?;
        Ok(())
    }

    async fn find_categories(&self, member_id: u64) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, c.eng_name, c.basic_image, c.click_image
            FROM onboarding_member_categories omc
            JOIN categories c ON c.id = omc.category_id
            WHERE omc.member_id = $1
            ORDER BY omc.created_at, c.id
            "#,
        )
        .bind(member_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch onboarding categories")?;

        Ok(rows.iter().map(row_to_category).collect())
    }
}

