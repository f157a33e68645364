use thiserror::Error;
use axum::{http::StatusCode, Json};
use crate::shared::errors::{error_response, CategoryError, ErrorCode, ImageError, MemberError};

/// 인증 관련 에러 (로그인 흐름 전체를 포함)
/// Authentication errors, including every failure of the composite login flow
#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Member(#[from] MemberError),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    Image(#[from] ImageError),

    /// 잘못된 요청 (multipart 파싱 실패 등)
    /// Malformed request (e.g. unreadable multipart part)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 잘못된 또는 만료된 토큰
    /// Invalid or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 토큰이 제공되지 않음
    /// Token not provided
    #[error("Token not provided")]
    MissingToken,

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::Member(e) => e.code(),
            AuthError::Category(e) => e.code(),
            AuthError::Image(e) => e.code(),
            AuthError::InvalidRequest(_) => ErrorCode::InvalidInput,
            AuthError::InvalidToken => ErrorCode::InvalidToken,
            AuthError::MissingToken => ErrorCode::MissingToken,
            AuthError::Internal(_) => ErrorCode::InternalServerError,
        }
    }
}

/// AuthError를 HTTP 응답으로 변환
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Member(e) => e.into(),
            AuthError::Category(e) => e.into(),
            AuthError::Image(e) => e.into(),
            AuthError::Internal(ref message) => {
                tracing::error!(error = %message, "Auth internal error");
                error_response(ErrorCode::InternalServerError, "Internal server error")
            }
            _ => error_response(err.code(), err.to_string()),
        }
    }
}
