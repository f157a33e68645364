use thiserror::Error;
use axum::{http::StatusCode, Json};
use crate::shared::errors::{error_response, ErrorCode};

/// 이미지 업로드 에러 (재시도 없음, 클라이언트가 다시 요청해야 함)
/// Image upload errors (never retried; the caller resubmits)
#[derive(Error, Debug)]
pub enum ImageError {
    /// 파일이 전달되지 않음
    #[error("Image upload failed: no file provided")]
    MissingFile,

    #[error("Image upload failed: empty file")]
    EmptyFile,

    /// 이미지 디코딩 실패 (이미지가 아닌 데이터 등)
    /// Decoding failed (e.g. non-image content)
    #[error("Image upload failed: cannot decode image: {0}")]
    Decode(String),

    #[error("Image upload failed: cannot encode image: {0}")]
    Encode(String),

    /// 오브젝트 스토리지 I/O 실패
    /// Object storage I/O failure
    #[error("Image upload failed: {0}")]
    Storage(String),
}

impl ImageError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ImageUploadFail
    }
}

impl From<ImageError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Storage(ref message) => {
                tracing::error!(error = %message, "Object storage upload failed");
                error_response(err.code(), "Image upload failed")
            }
            _ => error_response(err.code(), err.to_string()),
        }
    }
}
