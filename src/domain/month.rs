//! Calendar-month arithmetic used as the aggregation key.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A `(year, month)` bucket. Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Months elapsed since year zero; convenient for distance arithmetic.
    pub fn index(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }

    fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn offset(&self, months: i64) -> Self {
        Self::from_index(self.index() + months)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    /// Number of months from `self` to `other` (negative when `other` is earlier).
    pub fn months_until(&self, other: MonthKey) -> i64 {
        other.index() - self.index()
    }

    /// `count` consecutive buckets starting at `self`.
    pub fn range(&self, count: usize) -> impl Iterator<Item = MonthKey> {
        let start = *self;
        (0..count as i64).map(move |step| start.offset(step))
    }

    pub fn label(&self) -> String {
        format!("{} {}", month_label(self.month), self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        MonthKey::from_date(date)
    }
}

/// Moves `date` by whole calendar months, clamping the day to the target month's length.
///
/// Returns `None` when the target month lies outside chrono's calendar.
pub fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let target = MonthKey::from_date(date).offset(months as i64);
    let day = date.day().min(days_in_month(target.year, target.month));
    NaiveDate::from_ymd_opt(target.year, target.month, day)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
