// Auth domain state
// 인증 도메인 상태
use crate::domains::auth::services::{AuthService, JwtService};
use crate::domains::member::services::MemberState;
use crate::shared::services::ImageService;

#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub jwt_service: JwtService,
}

impl AuthState {
    /// 회원 도메인 서비스를 공유해서 생성
    /// Build on top of the member domain's services
    pub fn new(member_state: &MemberState, image_service: ImageService, jwt_service: JwtService) -> Self {
        Self {
            auth_service: AuthService::new(
                member_state.member_service.clone(),
                member_state.onboarding_service.clone(),
                image_service,
                jwt_service.clone(),
            ),
            jwt_service,
        }
    }
}
