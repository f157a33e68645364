// Category domain state
use crate::domains::category::services::CategoryService;
use crate::shared::database::Repositories;
use crate::shared::services::ImageService;

#[derive(Clone)]
pub struct CategoryState {
    pub category_service: CategoryService,
}

impl CategoryState {
    pub fn new(repositories: &Repositories, image_service: ImageService) -> Self {
        Self {
            category_service: CategoryService::new(repositories.categories.clone(), image_service),
        }
    }
}
