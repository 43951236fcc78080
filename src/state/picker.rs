//! Combined month strip and day-grid pager kept in lock-step.

use super::day_grid_pager::{DayGridDataSource, DayGridDelegate, DayGridPager};
use super::month_grid::GridFactory;
use super::month_strip::{MonthStrip, MonthStripDelegate};
use super::sync::synchronize;
use crate::model::Month;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::debug;

/// Default strip height in rows.
pub const DEFAULT_STRIP_HEIGHT: u16 = 3;

/// A month strip above a day-grid pager.
///
/// Every mutating call ends with a synchronization relay, so the strip's
/// selected month and the pager's current month agree whenever control
/// returns to the caller.
#[derive(Debug)]
pub struct PagingDateAndMonthPicker {
    strip: MonthStrip,
    pager: DayGridPager,
    strip_height: u16,
}

impl PagingDateAndMonthPicker {
    /// Unbounded picker showing `today`'s month.
    pub fn new(today: NaiveDate) -> Self {
        Self::from_parts(MonthStrip::new(today), DayGridPager::new(today))
    }

    /// Combine a preconfigured strip and pager. The pager is loaded if it
    /// has no page yet.
    pub fn from_parts(strip: MonthStrip, mut pager: DayGridPager) -> Self {
        if pager.current_month().is_none() {
            pager.load();
        }
        let mut picker = Self {
            strip,
            pager,
            strip_height: DEFAULT_STRIP_HEIGHT,
        };
        picker.sync();
        picker
    }

    /// Explicit start bound.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.strip.start_date()
    }

    /// Explicit end bound.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.strip.end_date()
    }

    /// Set the start bound on both children.
    pub fn set_start_date(&mut self, start: Option<NaiveDate>) {
        self.set_bounds(start, self.end_date());
    }

    /// Set the end bound on both children.
    pub fn set_end_date(&mut self, end: Option<NaiveDate>) {
        self.set_bounds(self.start_date(), end);
    }

    /// Set both bounds on both children.
    pub fn set_bounds(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.strip.set_bounds(start, end);
        self.pager.set_bounds(start, end);
        if let Some(month) = self.strip.selected_month() {
            self.pager.scroll_to_date(month.first_day(), false, true, false);
        }
        debug!(start = ?start, end = ?end, "picker bounds changed");
        self.sync();
    }

    /// Show the month containing `date` (clamped into the bounds) in both
    /// children.
    pub fn scroll_to_date(&mut self, date: NaiveDate, animated: bool) {
        let target = self.strip.range().clamp(date);
        self.strip.scroll_to_date(target, animated, false);
        self.pager.scroll_to_date(target, false, true, animated);
        self.sync();
    }

    /// Advance animations in both children. Returns whether any was running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let strip = self.strip.tick(dt);
        let pager = self.pager.tick(dt);
        self.sync();
        strip || pager
    }

    /// Whether either child is animating.
    pub fn is_animating(&self) -> bool {
        self.strip.is_animating() || self.pager.is_animating()
    }

    /// Apply a user action to the children, then synchronize.
    pub fn update<R>(&mut self, action: impl FnOnce(&mut MonthStrip, &mut DayGridPager) -> R) -> R {
        let result = action(&mut self.strip, &mut self.pager);
        self.sync();
        result
    }

    /// Run the synchronization relay.
    pub fn sync(&mut self) -> usize {
        synchronize(&mut self.strip, &mut self.pager)
    }

    /// Month selected in the strip.
    pub fn selected_month(&self) -> Option<Month> {
        self.strip.selected_month()
    }

    /// Month displayed by the pager.
    pub fn current_month(&self) -> Option<Month> {
        self.pager.current_month()
    }

    /// Day last selected in the pager.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.pager.selected_date()
    }

    /// The month strip.
    pub fn strip(&self) -> &MonthStrip {
        &self.strip
    }

    /// The day-grid pager.
    pub fn pager(&self) -> &DayGridPager {
        &self.pager
    }

    /// Strip height in rows.
    pub fn strip_height(&self) -> u16 {
        self.strip_height
    }

    /// Set the strip height in rows (at least one).
    pub fn set_strip_height(&mut self, height: u16) {
        self.strip_height = height.max(1);
    }

    /// Month strip hooks.
    pub fn set_month_delegate(&mut self, delegate: MonthStripDelegate) {
        self.strip.set_delegate(delegate);
    }

    /// Day selection hooks, passed to the pager.
    pub fn set_day_delegate(&mut self, delegate: DayGridDelegate) {
        self.pager.set_day_delegate(delegate);
    }

    /// Day content source, passed to the pager.
    pub fn set_data_source(&mut self, data_source: DayGridDataSource) {
        self.pager.set_data_source(data_source);
    }

    /// Grid factory, passed to the pager.
    pub fn set_grid_factory(&mut self, factory: GridFactory) {
        self.pager.set_grid_factory(factory);
    }
}
