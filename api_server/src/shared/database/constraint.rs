use sqlx::postgres::PgDatabaseError;
use thiserror::Error;

/// PostgreSQL unique_violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

/// 유니크 제약 조건 위반 (닉네임, 소셜 ID 등)
/// Storage-level unique constraint violation, shared by every repository implementation
#[derive(Debug, Error)]
#[error("Unique constraint violated: {constraint}")]
pub struct UniqueViolation {
    pub constraint: String,
}

/// sqlx 에러를 anyhow 에러로 변환 (유니크 위반은 UniqueViolation으로)
/// Convert a sqlx error, surfacing unique violations as `UniqueViolation`
pub fn map_sqlx_error(err: sqlx::Error) -> anyhow::Error {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err
                .try_downcast_ref::<PgDatabaseError>()
                .and_then(|e| e.constraint())
                .unwrap_or("unknown")
                .to_string();
            return anyhow::Error::new(UniqueViolation { constraint });
        }
    }
    anyhow::Error::new(err)
}

/// anyhow 에러 체인에서 UniqueViolation 찾기
pub fn as_unique_violation(err: &anyhow::Error) -> Option<&UniqueViolation> {
    err.downcast_ref::<UniqueViolation>()
}
