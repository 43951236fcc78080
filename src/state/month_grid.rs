//! One month of days, as shown on a single pager page.
//!
//! A grid covers a calendar month but only the days in `[start, end]` are
//! enabled; the pager narrows the range at explicit bounds.

use crate::model::Month;
use chrono::{Datelike, NaiveDate, Weekday};

/// Inputs for building a [`MonthGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Month shown by the grid.
    pub month: Month,
    /// First enabled day.
    pub start: NaiveDate,
    /// Last enabled day.
    pub end: NaiveDate,
    /// First column of the grid.
    pub week_start: Weekday,
    /// Whether the grid draws its own month title.
    pub show_header: bool,
}

/// Builds grids for pager pages.
pub type GridFactory = Box<dyn Fn(&GridSpec) -> MonthGrid>;

/// Factory producing grids as specified.
pub fn default_grid_factory() -> GridFactory {
    Box::new(MonthGrid::from_spec)
}

/// Factory producing grids without their own month title, for hosts that
/// already show the month elsewhere.
pub fn headerless_grid_factory() -> GridFactory {
    Box::new(|spec| {
        MonthGrid::from_spec(&GridSpec {
            show_header: false,
            ..*spec
        })
    })
}

/// Day grid for one month with a keyboard cursor and a selected day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: Month,
    start: NaiveDate,
    end: NaiveDate,
    week_start: Weekday,
    show_header: bool,
    cursor: NaiveDate,
    selected: Option<NaiveDate>,
}

impl MonthGrid {
    /// Build a grid. The enabled range is narrowed to the month; an empty
    /// intersection leaves only the nearest day of the month enabled.
    pub fn from_spec(spec: &GridSpec) -> Self {
        let first = spec.month.first_day();
        let last = spec.month.last_day();
        let start = spec.start.clamp(first, last);
        let end = spec.end.clamp(start, last);
        Self {
            month: spec.month,
            start,
            end,
            week_start: spec.week_start,
            show_header: spec.show_header,
            cursor: start,
            selected: None,
        }
    }

    /// Month shown.
    pub fn month(&self) -> Month {
        self.month
    }

    /// First enabled day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last enabled day.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// First column weekday.
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Whether the grid draws a month title.
    pub fn show_header(&self) -> bool {
        self.show_header
    }

    /// Day under the keyboard cursor.
    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    /// Selected day, if it lies in this grid.
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Whether `date` is an enabled day.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Clamp `date` onto the enabled days.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.start, self.end)
    }

    /// Move the cursor to `date` if it is enabled.
    pub fn set_cursor(&mut self, date: NaiveDate) -> bool {
        if !self.contains(date) {
            return false;
        }
        self.cursor = date;
        true
    }

    /// Mark `date` selected. Dates outside the grid clear the selection.
    pub fn set_selected(&mut self, date: Option<NaiveDate>) {
        self.selected = date.filter(|date| self.contains(*date));
    }

    /// Weekdays in column order.
    pub fn weekday_order(&self) -> [Weekday; 7] {
        let mut days = [self.week_start; 7];
        for i in 1..7 {
            days[i] = days[i - 1].succ();
        }
        days
    }

    /// Calendar rows. Padding before the first and after the last day of
    /// the month is `None`.
    pub fn weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let first = self.month.first_day();
        let lead = (first.weekday().num_days_from_monday() + 7
            - self.week_start.num_days_from_monday())
            % 7;

        let mut weeks = Vec::with_capacity(6);
        let mut row = [None; 7];
        let mut column = lead as usize;
        for date in first.iter_days().take(self.month.day_count() as usize) {
            row[column] = Some(date);
            column += 1;
            if column == 7 {
                weeks.push(row);
                row = [None; 7];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(row);
        }
        weeks
    }
}
