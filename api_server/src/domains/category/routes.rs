// Category domain routes
// 카테고리 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::category::handlers::category_handler;
use crate::shared::services::AppState;

pub fn create_category_router() -> Router<AppState> {
    Router::new()
        .route("/", get(category_handler::list_categories))
        .route("/:name", get(category_handler::get_category))
        .route("/:name/image", post(category_handler::upload_image))
}
