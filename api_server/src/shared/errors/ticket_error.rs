use thiserror::Error;
use axum::{http::StatusCode, Json};
use crate::shared::errors::{error_response, ErrorCode};

/// 티켓 조회/통계 에러
/// Ticket query and statistics errors
#[derive(Error, Debug)]
pub enum TicketError {
    /// 월 형식 오류 (YYYY-MM)
    /// Month must be formatted as YYYY-MM
    #[error("Invalid month (expected YYYY-MM): {value}")]
    InvalidMonth { value: String },

    /// 시작일이 종료일보다 늦음
    #[error("Invalid date range: start must not be after end")]
    InvalidDateRange,

    #[error("Invalid ticket scope: {value}")]
    InvalidScope { value: String },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl TicketError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TicketError::InvalidMonth { .. }
            | TicketError::InvalidDateRange
            | TicketError::InvalidScope { .. } => ErrorCode::InvalidInput,
            TicketError::DatabaseError(_) => ErrorCode::InternalServerError,
        }
    }
}

impl From<TicketError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::DatabaseError(ref message) => {
                tracing::error!(error = %message, "Ticket database error");
                error_response(ErrorCode::InternalServerError, "Internal server error")
            }
            _ => error_response(err.code(), err.to_string()),
        }
    }
}
