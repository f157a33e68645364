use std::convert::Infallible;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use crate::domains::member::models::SocialType;
use crate::shared::errors::AuthError;
use crate::shared::services::AppState;

/// 인증된 회원 정보 (JWT Access Token에서 추출)
/// Authenticated member extracted from the `Authorization: Bearer <jwt>` header
///
/// 사용법:
/// ```ignore
/// pub async fn get_me(
///     State(app_state): State<AppState>,
///     authenticated: AuthenticatedMember,
/// ) -> Result<...> {
///     let member_id = authenticated.member_id;
/// }
/// ```
///
/// 인증이 선택인 핸들러는 `OptionalMember`로 받습니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedMember {
    pub member_id: u64,
    pub social_type: SocialType,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedMember {
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map_err(|e| -> Self::Rejection { e.into() })
    }
}

/// 선택 인증
/// - Authorization 헤더 없음: `None`
/// - 헤더 있음: 검증 결과 (만료/위조 토큰은 `INVALID_TOKEN`으로 남음)
#[derive(Debug, Default)]
pub struct OptionalMember(pub Option<Result<AuthenticatedMember, AuthError>>);

impl OptionalMember {
    /// 인증 필수 경로: 헤더가 없으면 MissingToken, 검증 실패면 그 에러
    pub fn require(self) -> Result<AuthenticatedMember, AuthError> {
        self.0.unwrap_or(Err(AuthError::MissingToken))
    }
}

impl From<AuthenticatedMember> for OptionalMember {
    fn from(member: AuthenticatedMember) -> Self {
        Self(Some(Ok(member)))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalMember {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(Self(None));
        }
        Ok(Self(Some(authenticate(parts, state))))
    }
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthenticatedMember, AuthError> {
    let token = bearer_token(parts)?;
    let claims = state.auth_state.jwt_service.verify_access_token(token)?;

    Ok(AuthenticatedMember {
        member_id: claims.member_id,
        social_type: claims.social_type,
    })
}

/// "Bearer <token>" 형식 파싱
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_header_requires_login() {
        let err = OptionalMember::default().require().unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[test]
    fn test_rejected_token_keeps_its_reason() {
        let err = OptionalMember(Some(Err(AuthError::InvalidToken))).require().unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
