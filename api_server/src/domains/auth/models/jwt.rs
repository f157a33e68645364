use serde::{Deserialize, Serialize};
use crate::domains::member::models::SocialType;

/// JWT Claims (Access Token 페이로드)
/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 회원 ID
    pub member_id: u64,

    /// 소셜 로그인 제공자
    /// Social login provider of the member
    pub social_type: SocialType,

    /// 만료 시간 (Unix timestamp)
    pub exp: i64,

    /// 발급 시간 (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// 만료 시간 자동 계산
    /// Build claims expiring `expiration_hours` from now
    pub fn new(member_id: u64, social_type: SocialType, expiration_hours: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            member_id,
            social_type,
            exp: now + expiration_hours * 3600,
            iat: now,
        }
    }
}
