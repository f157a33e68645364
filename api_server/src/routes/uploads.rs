// 로컬 개발용 업로드 파일 제공
// S3 없이 실행할 때 InMemoryObjectStorage에 저장된 객체를 /uploads/<key>로 제공
use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use crate::shared::clients::InMemoryObjectStorage;

pub const UPLOADS_PATH: &str = "/uploads";

/// `GET /uploads/*key`
pub fn create_uploads_router(storage: Arc<InMemoryObjectStorage>) -> Router {
    Router::new()
        .route(&format!("{UPLOADS_PATH}/*key"), get(serve_upload))
        .with_state(storage)
}

async fn serve_upload(
    State(storage): State<Arc<InMemoryObjectStorage>>,
    Path(key): Path<String>,
) -> Response {
    match storage.get(&key) {
        Some(object) => ([(header::CONTENT_TYPE, object.content_type)], object.body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
