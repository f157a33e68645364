use thiserror::Error;
use axum::{http::StatusCode, Json};
use crate::shared::errors::{error_response, ErrorCode, ImageError};

/// 카테고리 관련 에러
/// Category-related errors
#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("Category not found: {name}")]
    CategoryNotFound { name: String },

    #[error("Category not found: id={id}")]
    CategoryNotFoundById { id: u64 },

    /// 카테고리 이미지 업로드 실패
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl CategoryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CategoryError::CategoryNotFound { .. } | CategoryError::CategoryNotFoundById { .. } => {
                ErrorCode::CategoryNotFound
            }
            CategoryError::Image(e) => e.code(),
            CategoryError::DatabaseError(_) => ErrorCode::InternalServerError,
        }
    }
}

impl From<CategoryError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::Image(e) => e.into(),
            CategoryError::DatabaseError(ref message) => {
                tracing::error!(error = %message, "Category database error");
                error_response(ErrorCode::InternalServerError, "Internal server error")
            }
            _ => error_response(err.code(), err.to_string()),
        }
    }
}
