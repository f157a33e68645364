use axum::{extract::{Multipart, Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use crate::domains::category::models::{Category, CategoryImageKind};
use crate::shared::errors::{AuthError, CategoryError};
use crate::shared::services::AppState;
use crate::shared::utils::MultipartParts;

/// 이미지 종류 쿼리
#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryImageQuery {
    /// basic | click
    pub kind: CategoryImageKind,
}

/// 카테고리 목록
#[utoipa::path(
    get,
    path = "/api/categorys",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Category>>, (StatusCode, Json<serde_json::Value>)> {
    let categories = app_state
        .category_state
        .category_service
        .list_categories()
        .await
        .map_err(|e: CategoryError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(categories))
}

/// 이름으로 카테고리 조회
#[utoipa::path(
    get,
    path = "/api/categorys/{name}",
    params(("name" = String, Path, description = "Category name (exact match)")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found")
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Category>, (StatusCode, Json<serde_json::Value>)> {
    let category = app_state
        .category_state
        .category_service
        .find_by_name(&name)
        .await
        .map_err(|e: CategoryError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(category))
}

/// 카테고리 아이콘 업로드 (multipart `image`, 높이 122px로 축소)
#[utoipa::path(
    post,
    path = "/api/categorys/{name}/image",
    params(
        ("name" = String, Path, description = "Category name (exact match)"),
        CategoryImageQuery
    ),
    request_body(content = String, content_type = "multipart/form-data", description = "`image` file part"),
    responses(
        (status = 200, description = "Image stored", body = Category),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Image upload failed")
    ),
    tag = "Categories"
)]
pub async fn upload_image(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<CategoryImageQuery>,
    multipart: Multipart,
) -> Result<Json<Category>, (StatusCode, Json<serde_json::Value>)> {
    let mut parts = MultipartParts::read(multipart)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;
    let image = parts.take_file("image");

    let category = app_state
        .category_state
        .category_service
        .update_image(&name, query.kind, image.as_ref())
        .await
        .map_err(|e: CategoryError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(category))
}
