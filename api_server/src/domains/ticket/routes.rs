// Ticket domain routes
// 티켓 도메인 라우터
use axum::{routing::get, Router};
use crate::domains::ticket::handlers::ticket_handler;
use crate::shared::services::AppState;

pub fn create_ticket_router() -> Router<AppState> {
    Router::new()
        .route("/", get(ticket_handler::list_tickets))
        .route("/statistics", get(ticket_handler::monthly_statistics))
        .route("/statistics/year", get(ticket_handler::yearly_statistics))
}
