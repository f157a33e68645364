// Member domain routes
// 회원 도메인 라우터
use axum::{routing::{get, put}, Router};
use crate::domains::member::handlers::member_handler;
use crate::shared::services::AppState;

pub fn create_member_router() -> Router<AppState> {
    Router::new()
        .route("/", get(member_handler::list_members))
        .route("/me", get(member_handler::get_me))
        .route(
            "/:id",
            get(member_handler::get_member)
                .patch(member_handler::patch_member)
                .delete(member_handler::delete_member),
        )
        .route("/:id/categorys", put(member_handler::replace_categories))
}
