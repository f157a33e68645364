use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

// =====================================================
// Member 모델
// =====================================================
// 역할: 소셜 로그인으로 가입한 회원
// 식별: (social_id, social_type) 쌍이 전역 유일
//       nickname은 NULL이 아니면 전역 유일
// =====================================================

/// 소셜 로그인 제공자
/// Social login provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialType {
    Kakao,
    Google,
    Apple,
    Naver,
}

impl SocialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialType::Kakao => "KAKAO",
            SocialType::Google => "GOOGLE",
            SocialType::Apple => "APPLE",
            SocialType::Naver => "NAVER",
        }
    }
}

impl fmt::Display for SocialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KAKAO" => Ok(SocialType::Kakao),
            "GOOGLE" => Ok(SocialType::Google),
            "APPLE" => Ok(SocialType::Apple),
            "NAVER" => Ok(SocialType::Naver),
            other => Err(format!("Unknown social type: {}", other)),
        }
    }
}

/// 동의 여부 (마케팅 / 푸시 알림)
/// Consent flag (marketing / push notifications)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Agree {
    Agree,
    Disagree,
}

impl Agree {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agree::Agree => "AGREE",
            Agree::Disagree => "DISAGREE",
        }
    }
}

impl FromStr for Agree {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AGREE" => Ok(Agree::Agree),
            "DISAGREE" => Ok(Agree::Disagree),
            other => Err(format!("Unknown agree value: {}", other)),
        }
    }
}

/// 회원 정보 (데이터베이스에서 조회한 회원)
/// Member record
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: u64,
    pub social_id: String,
    pub social_type: SocialType,
    pub nickname: Option<String>,
    pub profile_url: Option<String>,
    pub marketing_agree: Agree,
    pub push_agree: Agree,
    /// 로그인 시 그대로 반환되는 장기 토큰
    /// Long-lived refresh token stored on the member itself
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// 부분 업데이트: 전달된 필드만 덮어씀
    /// Partial update: only the supplied fields are overwritten
    pub fn apply_patch(&mut self, patch: MemberPatch) {
        if let Some(nickname) = normalize_nickname(patch.nickname) {
            self.nickname = Some(nickname);
        }
        if let Some(profile_url) = patch.profile_url {
            self.profile_url = Some(profile_url);
        }
        if let Some(marketing_agree) = patch.marketing_agree {
            self.marketing_agree = marketing_agree;
        }
        if let Some(push_agree) = patch.push_agree {
            self.push_agree = push_agree;
        }
    }
}

/// 닉네임 정규화: 앞뒤 공백 제거, 빈 문자열은 None
/// Trim the nickname; an empty nickname counts as absent
pub fn normalize_nickname(nickname: Option<String>) -> Option<String> {
    nickname
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

/// 회원 부분 수정 요청
/// Member partial update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    #[schema(example = "alice")]
    pub nickname: Option<String>,
    pub profile_url: Option<String>,
    pub marketing_agree: Option<Agree>,
    pub push_agree: Option<Agree>,
}

/// 회원 응답 (온보딩 카테고리 이름 포함)
/// Member view returned to clients, with resolved onboarding category names
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: u64,
    #[schema(example = "alice")]
    pub nickname: Option<String>,
    pub profile_url: Option<String>,
    pub marketing_agree: Agree,
    pub push_agree: Agree,
    #[schema(example = json!(["sports", "music"]))]
    pub categorys: Vec<String>,
}

impl MemberResponse {
    pub fn new(member: &Member, categorys: Vec<String>) -> Self {
        Self {
            id: member.id,
            nickname: member.nickname.clone(),
            profile_url: member.profile_url.clone(),
            marketing_agree: member.marketing_agree,
            push_agree: member.push_agree,
            categorys,
        }
    }
}

/// 온보딩 카테고리 교체 요청
/// Onboarding category replacement request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OnboardingRequest {
    #[schema(example = json!(["sports", "music"]))]
    pub categorys: Vec<String>,
}
