//! Server configuration (environment variables, `.env` supported)

use anyhow::{anyhow, Result};

const DEVELOPMENT: &str = "development";

/// 서버 설정
/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 signing secret for access tokens
    pub jwt_secret: String,
    /// Access token lifetime in hours
    pub access_token_ttl_hours: i64,
    /// S3 bucket for uploaded images; development falls back to in-memory storage when unset
    pub s3_bucket: Option<String>,
    /// Public base URL of uploaded objects (CDN); defaults to the bucket's S3 URL
    pub s3_public_base_url: Option<String>,
    /// Allowed CORS origin
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 조회 함수로 설정 로드 (테스트용으로 분리)
    /// Load configuration through `lookup`; `from_env` passes the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| DEVELOPMENT.into());

        Ok(Self {
            database_url: lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?,
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: require_secret(&lookup, "JWT_SECRET", &environment)?,
            access_token_ttl_hours: lookup("ACCESS_TOKEN_TTL_HOURS")
                .and_then(|h| h.parse().ok())
                .unwrap_or(1),
            s3_bucket: match lookup("S3_BUCKET").filter(|s| !s.is_empty()) {
                Some(bucket) => Some(bucket),
                None if environment == DEVELOPMENT => None,
                None => return Err(anyhow!("S3_BUCKET must be set in {environment} environment")),
            },
            s3_public_base_url: lookup("S3_PUBLIC_BASE_URL").filter(|s| !s.is_empty()),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".into()),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == DEVELOPMENT
    }
}

/// development 외 환경에서는 반드시 설정되어 있어야 함
/// Must be set and non-empty outside development
fn require_secret(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    environment: &str,
) -> Result<String> {
    match lookup(name).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None if environment == DEVELOPMENT => Ok(format!("dev-{name}-not-for-production")),
        None => Err(anyhow!("{name} must be set in {environment} environment")),
    }
}
