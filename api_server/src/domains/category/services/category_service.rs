use std::sync::Arc;
use crate::domains::category::models::{normalize_category_name, Category, CategoryImageKind};
use crate::shared::database::CategoryRepository;
use crate::shared::errors::CategoryError;
use crate::shared::services::{ImageService, UploadFile, CATEGORY_IMAGE_HEIGHT};

const CATEGORY_ENTITY: &str = "Category";

/// 카테고리 서비스
/// CategoryService: name lookups and icon uploads
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    image_service: ImageService,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, image_service: ImageService) -> Self {
        Self {
            categories,
            image_service,
        }
    }

    /// 이름으로 조회 (앞뒤 공백 제거 후 정확히 일치)
    /// Resolve a category by exact (trimmed, case-sensitive) name
    pub async fn find_by_name(&self, name: &str) -> Result<Category, CategoryError> {
        let name = normalize_category_name(name);
        self.categories
            .find_by_name(name)
            .await
            .map_err(|e| CategoryError::DatabaseError(format!("Failed to fetch category: {:#}", e)))?
            .ok_or_else(|| CategoryError::CategoryNotFound { name: name.to_string() })
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CategoryError> {
        self.categories
            .find_all()
            .await
            .map_err(|e| CategoryError::DatabaseError(format!("Failed to list categories: {:#}", e)))
    }

    /// 카테고리 아이콘 업로드 (높이 122px로 축소)
    /// Upload a category icon resized to the icon height and persist its URL
    pub async fn update_image(
        &self,
        name: &str,
        kind: CategoryImageKind,
        file: Option<&UploadFile>,
    ) -> Result<Category, CategoryError> {
        // 업로드 전에 존재 확인
        let id = self.find_by_name(name).await?.id;

        let url = self
            .image_service
            .store_resized(file, CATEGORY_ENTITY, kind.column_name(), CATEGORY_IMAGE_HEIGHT)
            .await?;

        let category = self
            .categories
            .update_image(id, kind, &url)
            .await
            .map_err(|e| CategoryError::DatabaseError(format!("Failed to update category image: {:#}", e)))?
            .ok_or(CategoryError::CategoryNotFoundById { id })?;

        tracing::info!(category_id = id, kind = kind.column_name(), url = %url, "Category image updated");
        Ok(category)
    }
}
