// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

pub mod uploads;

pub use uploads::{create_uploads_router, UPLOADS_PATH};

use axum::Router;
use crate::shared::services::AppState;

use crate::domains::auth::routes::create_auth_router;
use crate::domains::member::routes::create_member_router;
use crate::domains::category::routes::create_category_router;
use crate::domains::ticket::routes::create_ticket_router;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", create_auth_router())
        .nest("/api/members", create_member_router())
        .nest("/api/categorys", create_category_router())
        .nest("/api/tickets", create_ticket_router())
}
