use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use crate::shared::errors::TicketError;

/// 월간 통계 (카테고리별 티켓 수)
/// Monthly statistics: ticket count per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatistic {
    #[schema(example = "sports")]
    pub category_name: String,
    #[schema(example = 3)]
    pub count: i64,
}

/// 연간 통계 (월별 티켓 수)
/// Yearly statistics: ticket count per month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStatistic {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 5)]
    pub month: u32,
    #[schema(example = 3)]
    pub count: i64,
}

/// 통계 대상 월 (YYYY-MM)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsMonth {
    pub year: i32,
    pub month: u32,
}

impl StatisticsMonth {
    pub fn parse(value: &str) -> Result<Self, TicketError> {
        let invalid = || TicketError::InvalidMonth { value: value.to_string() };

        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    /// [해당 월 1일 00:00, 다음 달 1일 00:00)
    /// Half-open UTC range covering the month
    pub fn range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        (month_start(self.year, self.month), month_start(next_year, next_month))
    }
}

/// [해당 연도 1월 1일, 다음 연도 1월 1일)
pub fn year_range(year: i32) -> (DateTime<Utc>, DateTime<Utc>) {
    (month_start(year, 1), month_start(year + 1, 1))
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        let month = StatisticsMonth::parse("2024-05").unwrap();
        assert_eq!(month, StatisticsMonth { year: 2024, month: 5 });
    }

    #[test]
    fn test_parse_month_rejects_garbage() {
        for value in ["2024-5", "2024-13", "2024/05", "abcd-ef", "", "2024-00"] {
            assert!(StatisticsMonth::parse(value).is_err(), "{} should be rejected", value);
        }
    }

    #[test]
    fn test_december_range_rolls_over() {
        let (start, end) = StatisticsMonth { year: 2023, month: 12 }.range();
        assert_eq!(start, Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_year_range() {
        let (start, end) = year_range(2024);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }
}
