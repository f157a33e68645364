use crate::domains::auth::models::{LoginRequest, LoginResponse, TokenResponse};
use crate::domains::auth::services::JwtService;
use crate::domains::member::models::{normalize_nickname, Member, MemberResponse};
use crate::domains::member::services::{MemberService, OnboardingService};
use crate::shared::errors::AuthError;
use crate::shared::services::{ImageService, UploadFile};

const MEMBER_ENTITY: &str = "Member";
const PROFILE_COLUMN: &str = "profileUrl";

// =====================================================
// 인증 서비스 (소셜 로그인 온보딩)
// =====================================================
// 로그인 순서:
// 1. 닉네임 중복 확인 (본인 현재 닉네임은 제외) → 여기서 실패하면 아무것도 변경하지 않음
// 2. 소셜 정보로 회원 조회/생성
// 3. 프로필 이미지 업로드 (있을 때만)
// 4. 회원 정보 부분 수정
// 5. 카테고리 전체 교체 (요청에 있을 때만, 없으면 기존 유지)
// 6. Refresh Token: 없으면 발급, 있으면 그대로 반환
// 7. Access Token 발급
// =====================================================
#[derive(Clone)]
pub struct AuthService {
    member_service: MemberService,
    onboarding_service: OnboardingService,
    image_service: ImageService,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(
        member_service: MemberService,
        onboarding_service: OnboardingService,
        image_service: ImageService,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            member_service,
            onboarding_service,
            image_service,
            jwt_service,
        }
    }

    /// 소셜 로그인
    /// Social login: find-or-create the member, apply the onboarding data and issue tokens
    pub async fn login(
        &self,
        mut request: LoginRequest,
        profile_image: Option<UploadFile>,
        categorys: Option<Vec<String>>,
    ) -> Result<LoginResponse, AuthError> {
        request.nickname = normalize_nickname(request.nickname.take());

        // 1. 닉네임 확인 (재로그인 시 같은 닉네임은 허용)
        let existing = self
            .member_service
            .find_by_social(&request.social_id, request.social_type)
            .await?;
        let current_nickname = existing.as_ref().and_then(|m| m.nickname.as_deref());
        if request.nickname.as_deref() != current_nickname {
            self.member_service
                .verify_nickname_available(request.nickname.as_deref())
                .await?;
        }

        // 2. 조회 / 생성
        let member = match existing {
            Some(member) => member,
            None => {
                let created = self
                    .member_service
                    .get_or_create_by_social(&request.social_id, request.social_type)
                    .await?;
                tracing::info!(
                    member_id = created.id,
                    social_type = %created.social_type,
                    "Member created on first login"
                );
                created
            }
        };

        // 3. 프로필 이미지
        let profile_url = match profile_image.as_ref() {
            Some(file) => Some(
                self.image_service
                    .store(Some(file), MEMBER_ENTITY, PROFILE_COLUMN)
                    .await?,
            ),
            None => None,
        };

        // 4. 부분 수정
        let mut member = member;
        member.apply_patch(request.to_patch(profile_url));
        let member = self.member_service.save(&member).await?;

        // 5. 카테고리
        let category_names = match categorys {
            Some(names) => self
                .onboarding_service
                .replace_categories(&member, &names)
                .await?
                .into_iter()
                .map(|c| c.name)
                .collect(),
            None => self.onboarding_service.member_category_names(member.id).await?,
        };

        // 6-7. 토큰
        let (member, refresh_token) = self.ensure_refresh_token(member).await?;
        let access_token = self.jwt_service.generate_access_token(&member)?;

        tracing::info!(member_id = member.id, "Member logged in");

        Ok(LoginResponse {
            token: TokenResponse {
                access_token,
                refresh_token,
            },
            member: MemberResponse::new(&member, category_names),
        })
    }

    /// Refresh Token으로 새 토큰 쌍 발급 (Refresh Token 교체)
    /// Exchange a stored refresh token for a new pair, rotating the refresh token
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        let member = self
            .member_service
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let new_refresh_token = self.jwt_service.generate_refresh_token();
        let member = self
            .member_service
            .update_refresh_token(&member, Some(new_refresh_token.clone()))
            .await?;

        Ok(TokenResponse {
            access_token: self.jwt_service.generate_access_token(&member)?,
            refresh_token: new_refresh_token,
        })
    }

    /// 로그아웃: 저장된 Refresh Token 삭제 (이미 없으면 아무것도 하지 않음)
    /// Logout: clear the stored refresh token; unknown tokens are a no-op
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        if let Some(member) = self.member_service.find_by_refresh_token(refresh_token).await? {
            self.member_service.update_refresh_token(&member, None).await?;
            tracing::info!(member_id = member.id, "Member logged out");
        }
        Ok(())
    }

    async fn ensure_refresh_token(&self, member: Member) -> Result<(Member, String), AuthError> {
        if let Some(token) = member.refresh_token.clone() {
            return Ok((member, token));
        }

        let token = self.jwt_service.generate_refresh_token();
        let member = self
            .member_service
            .update_refresh_token(&member, Some(token.clone()))
            .await?;
        Ok((member, token))
    }
}
