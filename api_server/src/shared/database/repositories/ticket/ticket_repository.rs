use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::domains::ticket::models::{
    MonthlyStatistic, Ticket, TicketFilter, TicketScope, YearlyStatistic, year_range,
};

/// 티켓 조회 저장소 (이 서비스에서는 읽기 전용)
/// Ticket query persistence; tickets are read-only here
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// 필터 조건에 맞는 티켓 (날짜 내림차순, id 내림차순)
    async fn find_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>>;

    /// [start, end) 구간 회원 티켓의 카테고리별 개수
    async fn monthly_statistics(
        &self,
        member_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MonthlyStatistic>>;

    /// 해당 연도 회원 티켓의 월별 개수 (티켓 있는 달만, 월 오름차순)
    async fn yearly_statistics(&self, member_id: u64, year: i32) -> Result<Vec<YearlyStatistic>>;
}

pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_ticket(row: &PgRow) -> Ticket {
        Ticket {
            id: row.get::<i64, _>("id") as u64,
            member_id: row.get::<Option<i64>, _>("member_id").map(|id| id as u64),
            category_id: row.get::<i64, _>("category_id") as u64,
            category_name: row.get("category_name"),
            title: row.get("title"),
            content: row.get("content"),
            location: row.get("location"),
            image_url: row.get("image_url"),
            ticket_date: row.get("ticket_date"),
            created_at: row.get("created_at"),
        }
    }
}

/// 필터를 WHERE 절로 렌더링 (항상 바인딩 사용)
/// Render a filter as a WHERE clause using bound parameters only
pub fn push_ticket_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TicketFilter) {
    builder.push(" WHERE ");
    match filter.scope {
        TicketScope::Total => {
            builder.push("t.member_id IS NULL");
        }
        TicketScope::TotalAndMine(member_id) => {
            builder.push("(t.member_id IS NULL OR t.member_id = ");
            builder.push_bind(member_id as i64);
            builder.push(")");
        }
        TicketScope::Mine(member_id) => {
            builder.push("t.member_id = ");
            builder.push_bind(member_id as i64);
        }
    }

    if !filter.categories.is_empty() {
        builder.push(" AND c.name = ANY(");
        builder.push_bind(filter.categories.clone());
        builder.push(")");
    }

    if let Some(range) = filter.date_range {
        builder.push(" AND t.ticket_date BETWEEN ");
        builder.push_bind(range.start);
        builder.push(" AND ");
        builder.push_bind(range.end);
    }

    if let Some(search) = &filter.search {
        builder.push(" AND (strpos(t.title, ");
        builder.push_bind(search.clone());
        builder.push(") > 0 OR strpos(t.content, ");
        builder.push_bind(search.clone());
        builder.push(") > 0)");
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn find_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT t.id, t.member_id, t.category_id, c.name AS category_name, t.title, t.content,
                   t.location, t.image_url, t.ticket_date, t.created_at
            FROM tickets t
            JOIN categories c ON c.id = t.category_id
            "#,
        );
        push_ticket_filter(&mut builder, filter);
        builder.push(" ORDER BY t.ticket_date DESC, t.id DESC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch tickets")?;

        Ok(rows.iter().map(Self::row_to_ticket).collect())
    }

    async fn monthly_statistics(
        &self,
        member_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MonthlyStatistic>> {
        let rows = sqlx::query(
            r#"
            SELECT c.name AS category_name, COUNT(*) AS count
            FROM tickets t
            JOIN categories c ON c.id = t.category_id
            WHERE t.member_id = $1 AND t.ticket_date >= $2 AND t.ticket_date < $3
            GROUP BY c.name
            ORDER BY count DESC, c.name
            "#,
        )
        .bind(member_id as i64)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch monthly statistics")?;

        Ok(rows
            .iter()
            .map(|row| MonthlyStatistic {
                category_name: row.get("category_name"),
                count: row.get("count"),
            })
            .collect())
    }

    async fn yearly_statistics(&self, member_id: u64, year: i32) -> Result<Vec<YearlyStatistic>> {
        let (start, end) = year_range(year);
        let rows = sqlx::query(
            r#"
            SELECT EXTRACT(MONTH FROM t.ticket_date AT TIME ZONE 'UTC')::INT AS month, COUNT(*) AS count
            FROM tickets t
            WHERE t.member_id = $1 AND t.ticket_date >= $2 AND t.ticket_date < $3
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(member_id as i64)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch yearly statistics")?;

        Ok(rows
            .iter()
            .map(|row| YearlyStatistic {
                year,
                month: row.get::<i32, _>("month") as u32,
                count: row.get("count"),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ticket::models::DateRange;
    use chrono::TimeZone;

    fn render(filter: &TicketFilter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM tickets t");
        push_ticket_filter(&mut builder, filter);
        builder.sql().to_string()
    }

    #[test]
    fn test_total_scope_without_predicates() {
        let sql = render(&TicketFilter::new(TicketScope::Total));
        assert_eq!(sql, "SELECT 1 FROM tickets t WHERE t.member_id IS NULL");
    }

    #[test]
    fn test_all_predicates_are_bound() {
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let filter = TicketFilter::new(TicketScope::TotalAndMine(3))
            .with_categories(["sports", "music"])
            .with_date_range(Some(range))
            .with_search(Some("'; DROP TABLE tickets; --".to_string()));

        let sql = render(&filter);
        assert!(sql.contains("(t.member_id IS NULL OR t.member_id = $1)"));
        assert!(sql.contains("c.name = ANY($2)"));
        assert!(sql.contains("t.ticket_date BETWEEN $3 AND $4"));
        assert!(sql.contains("strpos(t.title, $5) > 0 OR strpos(t.content, $6) > 0"));
        assert!(!sql.contains("DROP TABLE"));
    }

    #[test]
    fn test_mine_scope() {
        let sql = render(&TicketFilter::new(TicketScope::Mine(9)));
        assert!(sql.ends_with("WHERE t.member_id = $1"));
    }
}
