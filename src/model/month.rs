//! Month-granular calendar values.
//!
//! A [`Month`] is a date truncated to the first day of its month. Equality and
//! ordering are therefore month-granular, which is the only granularity the
//! picker ever compares at.

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

/// A calendar month, stored as its first day.
///
/// # Invariants
/// - The wrapped date always has `day() == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Build a month from a year and a 1-based month number.
    ///
    /// Returns `None` for month numbers outside `1..=12`.
    pub fn from_ymd(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Last day of the month.
    pub fn last_day(self) -> NaiveDate {
        self.add_months(1).0.pred_opt().unwrap_or(self.0)
    }

    /// Calendar year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// 1-based month number.
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Number of days in the month.
    pub fn day_count(self) -> u32 {
        self.last_day().day()
    }

    /// Shift by a signed number of months.
    ///
    /// Saturates at chrono's representable range instead of failing.
    pub fn add_months(self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.map(Self).unwrap_or(self)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: Month) -> i32 {
        (other.year() - self.year()) * 12 + other.month() as i32 - self.month() as i32
    }

    /// Whether `date` falls inside this month.
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::containing(date) == self
    }
}

impl From<NaiveDate> for Month {
    fn from(date: NaiveDate) -> Self {
        Self::containing(date)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
