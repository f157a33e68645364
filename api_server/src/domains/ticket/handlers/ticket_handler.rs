use axum::{extract::{Query, State}, http::StatusCode, Json};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use crate::domains::ticket::models::{
    DateRange, MonthlyStatistic, Ticket, TicketFilter, TicketScope, TicketsResponse, YearlyStatistic,
};
use crate::shared::errors::{AuthError, TicketError};
use crate::shared::middleware::{AuthenticatedMember, OptionalMember};
use crate::shared::services::AppState;

/// 티켓 목록 쿼리
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TicketListQuery {
    /// total (기본값) | all (전체 + 내 것) | mine — all/mine은 인증 필요
    #[param(example = "total")]
    pub scope: Option<String>,
    /// 쉼표로 구분한 카테고리 이름
    #[param(example = "sports,music")]
    pub categorys: Option<String>,
    /// 시작일 (YYYY-MM-DD, 포함)
    pub start: Option<NaiveDate>,
    /// 종료일 (YYYY-MM-DD, 포함)
    pub end: Option<NaiveDate>,
    /// 제목/내용 부분 일치
    pub search: Option<String>,
}

impl TicketListQuery {
    /// 쿼리를 필터로 변환 (scope 해석은 인증 정보 필요)
    /// Convert to a filter; `all`/`mine` need the authenticated member
    pub fn into_filter(self, member: OptionalMember) -> Result<TicketFilter, (StatusCode, Json<serde_json::Value>)> {
        let scope = match self.scope.as_deref().map(str::trim).unwrap_or("total") {
            "total" | "" => TicketScope::Total,
            "all" => TicketScope::TotalAndMine(require_member(member)?),
            "mine" => TicketScope::Mine(require_member(member)?),
            other => {
                return Err(TicketError::InvalidScope { value: other.to_string() }.into());
            }
        };

        let date_range = match (self.start, self.end) {
            (None, None) => None,
            (start, end) => Some(
                DateRange::new(
                    start_of_day(start.unwrap_or_else(earliest_date)),
                    end_of_day(end.unwrap_or_else(latest_date)),
                )
                .map_err(|e: TicketError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?,
            ),
        };

        let categories: Vec<String> = self
            .categorys
            .as_deref()
            .map(|value| value.split(',').map(str::to_string).collect())
            .unwrap_or_default();

        Ok(TicketFilter::new(scope)
            .with_categories(categories)
            .with_date_range(date_range)
            .with_search(self.search))
    }
}

/// 월간 통계 쿼리
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthlyStatisticsQuery {
    /// 대상 월 (YYYY-MM)
    #[param(example = "2024-05")]
    pub month: String,
}

/// 티켓 목록 (날짜 내림차순)
#[utoipa::path(
    get,
    path = "/api/tickets",
    params(TicketListQuery),
    responses(
        (status = 200, description = "Tickets matching the filter, newest first", body = TicketsResponse),
        (status = 400, description = "Invalid scope or date range"),
        (status = 401, description = "Scope requires authentication")
    ),
    security((), ("BearerAuth" = [])),
    tag = "Tickets"
)]
pub async fn list_tickets(
    State(app_state): State<AppState>,
    member: OptionalMember,
    Query(query): Query<TicketListQuery>,
) -> Result<Json<TicketsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let TicketFilter { scope, categories, date_range, search } = query.into_filter(member)?;
    let ticket_service = &app_state.ticket_state.ticket_service;

    let tickets: Vec<Ticket> = match scope {
        TicketScope::Total => ticket_service.list_total(&categories, date_range, search).await,
        TicketScope::TotalAndMine(member_id) => {
            ticket_service
                .list_total_and_mine(&categories, date_range, search, member_id)
                .await
        }
        TicketScope::Mine(member_id) => {
            ticket_service.list_mine(&categories, date_range, search, member_id).await
        }
    }
    .map_err(|e: TicketError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(TicketsResponse {
        total: tickets.len(),
        tickets,
    }))
}

/// 월간 통계 (카테고리별 개수)
#[utoipa::path(
    get,
    path = "/api/tickets/statistics",
    params(MonthlyStatisticsQuery),
    responses(
        (status = 200, description = "Ticket count per category for the month", body = Vec<MonthlyStatistic>),
        (status = 400, description = "Invalid month"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("BearerAuth" = [])),
    tag = "Tickets"
)]
pub async fn monthly_statistics(
    State(app_state): State<AppState>,
    member: AuthenticatedMember,
    Query(query): Query<MonthlyStatisticsQuery>,
) -> Result<Json<Vec<MonthlyStatistic>>, (StatusCode, Json<serde_json::Value>)> {
    let statistics = app_state
        .ticket_state
        .ticket_service
        .monthly_statistics(member.member_id, &query.month)
        .await
        .map_err(|e: TicketError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(statistics))
}

/// 올해 월별 통계
#[utoipa::path(
    get,
    path = "/api/tickets/statistics/year",
    responses(
        (status = 200, description = "Ticket count per month of the current year", body = Vec<YearlyStatistic>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("BearerAuth" = [])),
    tag = "Tickets"
)]
pub async fn yearly_statistics(
    State(app_state): State<AppState>,
    member: AuthenticatedMember,
) -> Result<Json<Vec<YearlyStatistic>>, (StatusCode, Json<serde_json::Value>)> {
    let statistics = app_state
        .ticket_state
        .ticket_service
        .yearly_statistics(member.member_id)
        .await
        .map_err(|e: TicketError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(statistics))
}

fn require_member(member: OptionalMember) -> Result<u64, (StatusCode, Json<serde_json::Value>)> {
    member
        .require()
        .map(|m| m.member_id)
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })
}

// 한쪽 경계만 주어졌을 때의 반대쪽 경계 (PostgreSQL timestamptz 범위 안)
fn earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn latest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::member::models::SocialType;

    fn member() -> AuthenticatedMember {
        AuthenticatedMember {
            member_id: 3,
            social_type: SocialType::Apple,
        }
    }

    #[test]
    fn test_default_scope_is_total() {
        let filter = TicketListQuery::default().into_filter(OptionalMember::default()).unwrap();
        assert_eq!(filter.scope, TicketScope::Total);
        assert!(filter.categories.is_empty());
        assert!(filter.date_range.is_none());
    }

    #[test]
    fn test_member_scopes_require_authentication() {
        let query = || TicketListQuery {
            scope: Some("mine".to_string()),
            ..Default::default()
        };

        let (status, _) = query().into_filter(OptionalMember::default()).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let filter = query().into_filter(member().into()).unwrap();
        assert_eq!(filter.scope, TicketScope::Mine(3));
    }

    #[test]
    fn test_unknown_scope_is_invalid_input() {
        let query = TicketListQuery {
            scope: Some("everyone".to_string()),
            ..Default::default()
        };
        let (status, Json(body)) = query.into_filter(member().into()).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorCode"], "INVALID_INPUT");
    }

    #[test]
    fn test_days_are_inclusive() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let query = TicketListQuery {
            categorys: Some("sports, music,sports".to_string()),
            start: Some(day),
            end: Some(day),
            ..Default::default()
        };
        let filter = query.into_filter(OptionalMember::default()).unwrap();
        let range = filter.date_range.unwrap();

        assert!(range.contains(Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 5, 10, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 5, 11, 0, 0, 0).unwrap()));
        assert_eq!(filter.categories, vec!["sports", "music"]);
    }

    #[test]
    fn test_start_after_end_is_rejected() {
        let query = TicketListQuery {
            start: NaiveDate::from_ymd_opt(2024, 6, 1),
            end: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        };
        let (status, _) = query.into_filter(OptionalMember::default()).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
