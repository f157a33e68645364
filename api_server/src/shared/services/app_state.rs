use std::sync::Arc;
use crate::domains::auth::services::{AuthState, JwtService};
use crate::domains::category::services::CategoryState;
use crate::domains::member::services::MemberState;
use crate::domains::ticket::services::TicketState;
use crate::shared::clients::ObjectStorage;
use crate::shared::database::Repositories;
use crate::shared::services::ImageService;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
#[derive(Clone)]
pub struct AppState {
    pub auth_state: AuthState,
    pub member_state: MemberState,
    pub category_state: CategoryState,
    pub ticket_state: TicketState,
}

impl AppState {
    /// 저장소 / JWT / 오브젝트 스토리지를 주입받아 모든 도메인 State 생성
    /// Wire every domain state from the injected collaborators
    pub fn new(
        repositories: Repositories,
        jwt_service: JwtService,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        // 1. 공유 서비스
        let image_service = ImageService::new(storage);

        // 2. 도메인 State (카테고리 → 회원 → 인증 순서로 의존)
        let category_state = CategoryState::new(&repositories, image_service.clone());
        let member_state = MemberState::new(&repositories, category_state.category_service.clone());
        let auth_state = AuthState::new(&member_state, image_service, jwt_service);
        let ticket_state = TicketState::new(&repositories);

        Self {
            auth_state,
            member_state,
            category_state,
            ticket_state,
        }
    }
}
