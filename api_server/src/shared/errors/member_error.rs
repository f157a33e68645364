use thiserror::Error;
use axum::{http::StatusCode, Json};
use crate::shared::errors::{error_response, CategoryError, ErrorCode};

/// 회원 관련 에러
/// Member-related errors
#[derive(Error, Debug)]
pub enum MemberError {
    /// 닉네임이 이미 사용 중
    /// Nickname already claimed by a member
    #[error("Nickname already in use: {nickname}")]
    NicknameDuplicate { nickname: String },

    /// 회원을 찾을 수 없음
    /// Member not found
    #[error("Member not found: id={id}")]
    MemberNotFound { id: u64 },

    /// 회원을 찾을 수 없음 (소셜 정보로)
    /// Member not found by social identity
    #[error("Member not found: social_id={social_id}, social_type={social_type}")]
    MemberNotFoundBySocial { social_id: String, social_type: String },

    /// 온보딩 카테고리 조회 실패
    #[error(transparent)]
    Category(#[from] CategoryError),

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl MemberError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MemberError::NicknameDuplicate { .. } => ErrorCode::NicknameDuplicate,
            MemberError::MemberNotFound { .. } | MemberError::MemberNotFoundBySocial { .. } => {
                ErrorCode::MemberNotFound
            }
            MemberError::Category(e) => e.code(),
            MemberError::DatabaseError(_) => ErrorCode::InternalServerError,
        }
    }
}

/// MemberError를 HTTP 응답으로 변환
impl From<MemberError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: MemberError) -> Self {
        match err {
            MemberError::Category(e) => e.into(),
            MemberError::DatabaseError(ref message) => {
                tracing::error!(error = %message, "Member database error");
                error_response(ErrorCode::InternalServerError, "Internal server error")
            }
            _ => error_response(err.code(), err.to_string()),
        }
    }
}
