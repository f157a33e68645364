use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use async_trait::async_trait;
use crate::domains::category::models::{Category, CategoryImageKind};

/// 카테고리 저장소 (회원 흐름에서는 조회만)
/// Category persistence; the member flow only reads from it
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// 이름 정확히 일치 (대소문자 구분)
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    async fn find_all(&self) -> Result<Vec<Category>>;

    /// 카테고리 아이콘 URL 변경
    async fn update_image(&self, id: u64, kind: CategoryImageKind, url: &str) -> Result<Option<Category>>;
}

pub(crate) fn row_to_category(row: &PgRow) -> Category {
    Category {
        id: row.get::<i64, _>("id") as u64,
        name: row.get("name"),
        eng_name: row.get("eng_name"),
        basic_image: row.get("basic_image"),
        click_image: row.get("click_image"),
    }
}

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query(
            "SELECT id, name, eng_name, basic_image, click_image FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch category by name")?;

        Ok(row.as_ref().map(row_to_category))
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT id, name, eng_name, basic_image, click_image FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch categories")?;

        Ok(rows.iter().map(row_to_category).collect())
    }

    async fn update_image(&self, id: u64, kind: CategoryImageKind, url: &str) -> Result<Option<Category>> {
        // 컬럼명은 enum에서만 오므로 SQL 주입 없음
        let column = match kind {
            CategoryImageKind::Basic => "basic_image",
            CategoryImageKind::Click => "click_image",
        };
        let row = sqlx::query(&format!(
            r#"
            UPDATE categories SET {} = $2 WHERE id = $1
            RETURNING id, name, eng_name, basic_image, click_image
            "#,
            column
        ))
        .bind(id as i64)
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update category image")?;

        Ok(row.as_ref().map(row_to_category))
    }
}
