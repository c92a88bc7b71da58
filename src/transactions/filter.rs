use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sea_orm::{ColumnTrait, QueryFilter, Select};

use crate::{entities::transactions, models::EntryType, validations::{self, validate_month}};

///
/// The first through last instant of a calendar month, both inclusive, in UTC
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthRange {
    pub year: i32,
    pub month: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthRange {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?;

        Some(MonthRange {
            year,
            month,
            start: first.and_hms_opt(0, 0, 0)?.and_utc(),
            end: last.and_hms_nano_opt(23, 59, 59, 999_999_999)?.and_utc(),
        })
    }

    /// Parses a `YYYY-MM` month
    pub fn parse(month: &str) -> validations::error::Result<Self> {
        let (year, month_num) = validate_month(month)?;
        Self::new(year, month_num)
            .ok_or_else(|| validations::error::Error::InvalidMonth(month.to_string()))
    }

    pub fn containing(dt: DateTime<Utc>) -> Option<Self> {
        Self::new(dt.year(), dt.month())
    }

    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt <= self.end
    }

    /// `YYYY-MM`
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

pub trait ToSelectQuery {
    fn into_select_query(self, query: Select<transactions::Entity>) -> Select<transactions::Entity>;
}

pub enum TransactionFilter {
    Month(MonthRange),
    Type(EntryType),
}

impl ToSelectQuery for TransactionFilter {
    fn into_select_query(self, query: Select<transactions::Entity>) -> Select<transactions::Entity> {
        match self {
            TransactionFilter::Month(range) => query.filter(
                transactions::Column::CreatedAt.between(range.start, range.end)
            ),
            TransactionFilter::Type(entry_type) => query.filter(
                transactions::Column::EntryType.eq(entry_type)
            ),
        }
    }
}
