use std::sync::Arc;
use chrono::{Datelike, Utc};
use crate::domains::ticket::models::{
    DateRange, MonthlyStatistic, StatisticsMonth, Ticket, TicketFilter, TicketScope, YearlyStatistic,
};
use crate::shared::database::TicketRepository;
use crate::shared::errors::TicketError;

/// 티켓 조회 / 통계 서비스
/// TicketService: filtered listings and per-member statistics
#[derive(Clone)]
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
}

impl TicketService {
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    /// 소유자 없는 티켓
    pub async fn list_total(
        &self,
        categories: &[String],
        date_range: Option<DateRange>,
        search: Option<String>,
    ) -> Result<Vec<Ticket>, TicketError> {
        let filter = Self::filter(TicketScope::Total, categories, date_range, search);
        self.find(&filter).await
    }

    /// 소유자 없는 티켓 + 회원 본인 티켓
    pub async fn list_total_and_mine(
        &self,
        categories: &[String],
        date_range: Option<DateRange>,
        search: Option<String>,
        member_id: u64,
    ) -> Result<Vec<Ticket>, TicketError> {
        let filter = Self::filter(TicketScope::TotalAndMine(member_id), categories, date_range, search);
        self.find(&filter).await
    }

    /// 회원 본인 티켓만
    pub async fn list_mine(
        &self,
        categories: &[String],
        date_range: Option<DateRange>,
        search: Option<String>,
        member_id: u64,
    ) -> Result<Vec<Ticket>, TicketError> {
        let filter = Self::filter(TicketScope::Mine(member_id), categories, date_range, search);
        self.find(&filter).await
    }

    async fn find(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError> {
        self.tickets
            .find_tickets(filter)
            .await
            .map_err(|e| TicketError::DatabaseError(format!("Failed to list tickets: {:#}", e)))
    }

    /// 월간 통계 (month: "YYYY-MM")
    /// Per-category counts of the member's tickets within the month
    pub async fn monthly_statistics(
        &self,
        member_id: u64,
        month: &str,
    ) -> Result<Vec<MonthlyStatistic>, TicketError> {
        let (start, end) = StatisticsMonth::parse(month)?.range();
        self.tickets
            .monthly_statistics(member_id, start, end)
            .await
            .map_err(|e| TicketError::DatabaseError(format!("Failed to compute monthly statistics: {:#}", e)))
    }

    /// 올해(UTC) 월별 통계
    pub async fn yearly_statistics(&self, member_id: u64) -> Result<Vec<YearlyStatistic>, TicketError> {
        self.yearly_statistics_for(member_id, Utc::now().year()).await
    }

    pub async fn yearly_statistics_for(
        &self,
        member_id: u64,
        year: i32,
    ) -> Result<Vec<YearlyStatistic>, TicketError> {
        self.tickets
            .yearly_statistics(member_id, year)
            .await
            .map_err(|e| TicketError::DatabaseError(format!("Failed to compute yearly statistics: {:#}", e)))
    }

    fn filter(
        scope: TicketScope,
        categories: &[String],
        date_range: Option<DateRange>,
        search: Option<String>,
    ) -> TicketFilter {
        TicketFilter::new(scope)
            .with_categories(categories)
            .with_date_range(date_range)
            .with_search(search)
    }
}
