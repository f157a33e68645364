use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

/// 티켓 정보 (카테고리 이름 포함)
/// Ticket record joined with its category name
///
/// member_id가 None이면 전체 공개 티켓, Some이면 해당 회원의 티켓
/// `member_id == None` marks a "total" ticket; `Some` marks a member's own ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: u64,
    pub member_id: Option<u64>,
    pub category_id: u64,
    #[schema(example = "sports")]
    pub category_name: String,
    #[schema(example = "KBO Opening Day")]
    pub title: String,
    pub content: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub ticket_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// 티켓 목록 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketsResponse {
    pub tickets: Vec<Ticket>,
    pub total: usize,
}
