use axum::{http::StatusCode, Json};
use serde_json::json;

/// 클라이언트에 노출되는 에러 코드
/// Error codes surfaced to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NicknameDuplicate,
    MemberNotFound,
    CategoryNotFound,
    ImageUploadFail,
    InvalidInput,
    InvalidToken,
    MissingToken,
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NicknameDuplicate => "NICKNAME_DUPLICATE",
            ErrorCode::MemberNotFound => "MEMBER_NOT_FOUND",
            ErrorCode::CategoryNotFound => "CATEGORY_NOT_FOUND",
            ErrorCode::ImageUploadFail => "IMAGE_UPLOAD_FAIL",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::MissingToken => "MISSING_TOKEN",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// 에러 코드별 HTTP 상태
    /// HTTP status for each error code
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NicknameDuplicate => StatusCode::CONFLICT,
            ErrorCode::MemberNotFound | ErrorCode::CategoryNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidToken | ErrorCode::MissingToken => StatusCode::UNAUTHORIZED,
            ErrorCode::ImageUploadFail | ErrorCode::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// `{"errorCode": ..., "message": ...}` 응답 생성
/// Build the structured error body shared by every domain error
pub fn error_response(code: ErrorCode, message: impl Into<String>) -> (StatusCode, Json<serde_json::Value>) {
    (
        code.status(),
        Json(json!({
            "errorCode": code.as_str(),
            "message": message.into(),
        })),
    )
}
