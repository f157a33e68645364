use chrono::{DateTime, Utc};
use crate::domains::ticket::models::Ticket;
use crate::domains::category::models::distinct_category_names;
use crate::shared::errors::TicketError;

// =====================================================
// 티켓 검색 조건 (Predicate 값 객체)
// =====================================================
// - categories 비어 있음 → 카테고리 필터 없음
// - date_range None     → 기간 제한 없음 (양 끝 포함)
// - search None         → 검색 없음 (title/content 부분 일치, 대소문자 구분)
// - scope               → 전체 / 전체+내 것 / 내 것
//
// PostgreSQL 구현은 같은 조건을 SQL로 렌더링하고,
// MockStore는 matches()로 동일하게 평가합니다.
// =====================================================

/// 기간 (시작/종료 모두 포함)
/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TicketError> {
        if start > end {
            return Err(TicketError::InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// 소유자 범위
/// Owner scope of a ticket listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketScope {
    /// 소유자 없는 티켓만
    Total,
    /// 소유자 없는 티켓 + 해당 회원의 티켓
    TotalAndMine(u64),
    /// 해당 회원의 티켓만
    Mine(u64),
}

impl TicketScope {
    pub fn matches(&self, owner: Option<u64>) -> bool {
        match (self, owner) {
            (TicketScope::Total, None) => true,
            (TicketScope::Total, Some(_)) => false,
            (TicketScope::TotalAndMine(_), None) => true,
            (TicketScope::TotalAndMine(member_id), Some(owner)) => *member_id == owner,
            (TicketScope::Mine(_), None) => false,
            (TicketScope::Mine(member_id), Some(owner)) => *member_id == owner,
        }
    }
}

/// 티켓 목록 필터
/// Composable ticket filter
#[derive(Debug, Clone, PartialEq)]
pub struct TicketFilter {
    pub scope: TicketScope,
    pub categories: Vec<String>,
    pub date_range: Option<DateRange>,
    pub search: Option<String>,
}

impl TicketFilter {
    pub fn new(scope: TicketScope) -> Self {
        Self {
            scope,
            categories: Vec::new(),
            date_range: None,
            search: None,
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.categories = distinct_category_names(categories);
        self
    }

    pub fn with_date_range(mut self, date_range: Option<DateRange>) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    /// 메모리 상에서 조건 평가
    /// Evaluate the filter against a single ticket
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if !self.scope.matches(ticket.member_id) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&ticket.category_name) {
            return false;
        }
        if let Some(range) = &self.date_range {
            if !range.contains(ticket.ticket_date) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !ticket.title.contains(search.as_str()) && !ticket.content.contains(search.as_str()) {
                return false;
            }
        }
        true
    }
}

/// 목록 정렬: 티켓 날짜 내림차순, 같으면 id 내림차순
/// Listing order: newest ticket date first, then highest id
pub fn sort_tickets(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| {
        b.ticket_date
            .cmp(&a.ticket_date)
            .then_with(|| b.id.cmp(&a.id))
    });
}
