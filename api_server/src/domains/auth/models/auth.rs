use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domains::member::models::{Agree, MemberPatch, MemberResponse, SocialType};

// 로그인 요청 모델 (multipart "request" 파트의 JSON)
/// Login request, sent as the JSON `request` part of the multipart body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// 소셜 제공자가 발급한 사용자 ID
    #[schema(example = "u1")]
    pub social_id: String,

    #[schema(example = "GOOGLE")]
    pub social_type: SocialType,

    /// 닉네임 (공백 제거, 빈 값은 없음으로 처리)
    /// Nickname; trimmed, blank counts as absent
    #[schema(example = "alice")]
    pub nickname: Option<String>,

    /// 이미 업로드된 프로필 URL (파일이 함께 오면 파일이 우선)
    /// Pre-existing profile URL; an uploaded file wins over it
    pub profile_url: Option<String>,

    pub marketing_agree: Option<Agree>,
    pub push_agree: Option<Agree>,
}

impl LoginRequest {
    /// 로그인 요청의 회원 수정분
    pub fn to_patch(&self, profile_url: Option<String>) -> MemberPatch {
        MemberPatch {
            nickname: self.nickname.clone(),
            profile_url: profile_url.or_else(|| self.profile_url.clone()),
            marketing_agree: self.marketing_agree,
            push_agree: self.push_agree,
        }
    }
}

// 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT Access Token (짧은 수명)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// Refresh Token (회원에 저장됨)
    /// Refresh token, stored on the member
    #[schema(example = "abc123def456...")]
    pub refresh_token: String,
}

// 로그인 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: TokenResponse,
    pub member: MemberResponse,
}

// 토큰 갱신 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[schema(example = "abc123def456...")]
    pub refresh_token: String,
}

// 로그아웃 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[schema(example = "abc123def456...")]
    pub refresh_token: String,
}
