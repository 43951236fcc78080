//! Bounded, lazily extended month window.
//!
//! The month strip materializes a contiguous window of months
//! `[window_from, window_to)`. Explicit start/end bounds pin the window on
//! their side; unbound sides start `lookahead` months away from an anchor and
//! grow on demand.
//!
//! # Invariants
//! - `window_from <= window_to`
//! - `window_from >= month(start_bound)` when a start bound is set
//! - `window_to <= month(end_bound) + 1` when an end bound is set

use super::month::Month;
use chrono::NaiveDate;
use tracing::warn;

/// Largest lookahead honoured, in months. Larger requests are capped.
pub const MAX_LOOKAHEAD_MONTHS: u32 = 1200;

/// Side of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards earlier months (`window_from`).
    Past,
    /// Towards later months (`window_to`).
    Future,
}

/// Optional bounds normalized into a concrete month window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start_bound: Option<NaiveDate>,
    end_bound: Option<NaiveDate>,
    window_from: Month,
    window_to: Month,
}

impl DateRange {
    /// Create a window around `anchor`.
    ///
    /// The anchor is clamped into the bounds first. Bound sides sit exactly on
    /// the bound month; unbound sides are `lookahead` months from the anchor,
    /// with the anchor's own month plus `lookahead` months after it included.
    pub fn new(
        start_bound: Option<NaiveDate>,
        end_bound: Option<NaiveDate>,
        anchor: Month,
        lookahead: u32,
    ) -> Self {
        let (start_bound, end_bound) = normalize_bounds(start_bound, end_bound);
        let mut range = Self {
            start_bound,
            end_bound,
            window_from: anchor,
            window_to: anchor.add_months(1),
        };
        let anchor = range.clamp_month(anchor);
        let lookahead = lookahead_span(lookahead);
        range.window_from = range.bound_from().unwrap_or(anchor.add_months(-lookahead));
        range.window_to = range
            .bound_to()
            .unwrap_or(anchor.add_months(lookahead + 1));
        range
    }

    /// Replace both bounds and re-derive the window around `anchor`.
    pub fn set_bounds(
        &mut self,
        start_bound: Option<NaiveDate>,
        end_bound: Option<NaiveDate>,
        anchor: Month,
        lookahead: u32,
    ) {
        *self = Self::new(start_bound, end_bound, anchor, lookahead);
    }

    /// Explicit start bound, if any.
    pub fn start_bound(&self) -> Option<NaiveDate> {
        self.start_bound
    }

    /// Explicit end bound, if any.
    pub fn end_bound(&self) -> Option<NaiveDate> {
        self.end_bound
    }

    /// First month of the window (inclusive).
    pub fn window_from(&self) -> Month {
        self.window_from
    }

    /// Month after the last month of the window (exclusive).
    pub fn window_to(&self) -> Month {
        self.window_to
    }

    /// Whether an explicit bound pins the given side.
    pub fn is_bounded(&self, direction: Direction) -> bool {
        match direction {
            Direction::Past => self.start_bound.is_some(),
            Direction::Future => self.end_bound.is_some(),
        }
    }

    /// Grow the window by `amount_months` on one side.
    ///
    /// No-op when that side has an explicit bound. Returns whether the window
    /// changed.
    pub fn extend_window(&mut self, direction: Direction, amount_months: u32) -> bool {
        if amount_months == 0 || self.is_bounded(direction) {
            return false;
        }
        let amount = lookahead_span(amount_months);
        match direction {
            Direction::Past => {
                let from = self.window_from.add_months(-amount);
                let changed = from != self.window_from;
                self.window_from = from;
                changed
            }
            Direction::Future => {
                let to = self.window_to.add_months(amount);
                let changed = to != self.window_to;
                self.window_to = to;
                changed
            }
        }
    }

    /// Regenerate the unbound sides of the window around `target`.
    pub fn recenter(&mut self, target: Month, lookahead: u32) {
        let target = self.clamp_month(target);
        let lookahead = lookahead_span(lookahead);
        if self.start_bound.is_none() {
            self.window_from = target.add_months(-lookahead);
        }
        if self.end_bound.is_none() {
            self.window_to = target.add_months(lookahead + 1);
        }
    }

    /// Number of months in the window.
    pub fn item_count(&self) -> usize {
        self.window_from.months_until(self.window_to).max(0) as usize
    }

    /// Index of `month` within the window, `None` if outside it.
    pub fn month_index(&self, month: Month) -> Option<usize> {
        if !self.contains(month) {
            return None;
        }
        Some(self.window_from.months_until(month) as usize)
    }

    /// Month at `index`, `None` past the end of the window.
    pub fn month_at(&self, index: usize) -> Option<Month> {
        if index >= self.item_count() {
            return None;
        }
        Some(self.window_from.add_months(index as i32))
    }

    /// Whether `month` lies inside `[window_from, window_to)`.
    pub fn contains(&self, month: Month) -> bool {
        month >= self.window_from && month < self.window_to
    }

    /// Clamp a date into `[start_bound, end_bound]`.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        let mut date = date;
        if let Some(start) = self.start_bound {
            date = date.max(start);
        }
        if let Some(end) = self.end_bound {
            date = date.min(end);
        }
        date
    }

    /// Clamp a month into the bound months.
    pub fn clamp_month(&self, month: Month) -> Month {
        let mut month = month;
        if let Some(start) = self.start_bound {
            month = month.max(Month::containing(start));
        }
        if let Some(end) = self.end_bound {
            month = month.min(Month::containing(end));
        }
        month
    }

    /// Whether `month` is inside the explicit bounds (ignores the window).
    pub fn allows(&self, month: Month) -> bool {
        self.clamp_month(month) == month
    }

    fn bound_from(&self) -> Option<Month> {
        self.start_bound.map(Month::containing)
    }

    fn bound_to(&self) -> Option<Month> {
        self.end_bound.map(|end| Month::containing(end).add_months(1))
    }
}

/// Signed month span for a lookahead, capped at [`MAX_LOOKAHEAD_MONTHS`].
fn lookahead_span(lookahead: u32) -> i32 {
    i32::try_from(lookahead.min(MAX_LOOKAHEAD_MONTHS)).unwrap_or(i32::MAX)
}

fn normalize_bounds(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match (start, end) {
        (Some(s), Some(e)) if s > e => {
            warn!(start = %s, end = %e, "start bound after end bound, swapping");
            (Some(e), Some(s))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn m(y: i32, month: u32) -> Month {
        Month::from_ymd(y, month).unwrap()
    }

    #[test]
    fn unbounded_window_surrounds_anchor() {
        let range = DateRange::new(None, None, m(2024, 6), 16);
        assert_eq!(range.window_from(), m(2023, 2));
        assert_eq!(range.window_to(), m(2025, 11));
        assert_eq!(range.item_count(), 33);
        assert_eq!(range.month_index(m(2024, 6)), Some(16));
    }

    #[test]
    fn both_bounds_pin_window_exactly() {
        let range = DateRange::new(Some(d(2024, 1, 15)), Some(d(2024, 3, 31)), m(2024, 2), 16);
        assert_eq!(range.window_from(), m(2024, 1));
        assert_eq!(range.window_to(), m(2024, 4));
        assert_eq!(range.item_count(), 3);
    }

    #[test]
    fn extend_window_respects_bounds() {
        let mut range = DateRange::new(Some(d(2024, 1, 1)), None, m(2024, 2), 4);
        assert!(!range.extend_window(Direction::Past, 12));
        assert_eq!(range.window_from(), m(2024, 1));

        let before = range.window_to();
        assert!(range.extend_window(Direction::Future, 12));
        assert_eq!(range.window_to(), before.add_months(12));
    }

    #[test]
    fn extend_window_past_moves_window_from() {
        let mut range = DateRange::new(None, None, m(2024, 6), 2);
        assert!(range.extend_window(Direction::Past, 3));
        assert_eq!(range.window_from(), m(2024, 1));
        assert_eq!(range.month_index(m(2024, 6)), Some(5));
    }

    #[test]
    fn anchor_outside_bounds_is_clamped() {
        let range = DateRange::new(Some(d(2024, 1, 1)), None, m(2020, 1), 2);
        assert_eq!(range.window_from(), m(2024, 1));
        assert_eq!(range.window_to(), m(2024, 4));
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let range = DateRange::new(Some(d(2024, 5, 1)), Some(d(2024, 2, 1)), m(2024, 3), 2);
        assert_eq!(range.start_bound(), Some(d(2024, 2, 1)));
        assert_eq!(range.end_bound(), Some(d(2024, 5, 1)));
        assert_eq!(range.item_count(), 4);
    }

    #[test]
    fn recenter_only_touches_unbound_side() {
        let mut range = DateRange::new(None, Some(d(2030, 12, 31)), m(2024, 6), 2);
        range.recenter(m(2028, 1), 2);
        assert_eq!(range.window_from(), m(2027, 11));
        assert_eq!(range.window_to(), m(2031, 1));
    }

    #[test]
    fn month_index_outside_window_is_none() {
        let range = DateRange::new(None, None, m(2024, 6), 1);
        assert_eq!(range.month_index(m(2024, 8)), None);
        assert_eq!(range.month_index(m(2024, 4)), None);
        assert_eq!(range.month_at(3), None);
        assert_eq!(range.month_at(2), Some(m(2024, 7)));
    }

    #[test]
    fn clamp_pins_dates_to_bounds() {
        let range = DateRange::new(Some(d(2024, 1, 1)), Some(d(2024, 3, 31)), m(2024, 2), 2);
        assert_eq!(range.clamp(d(2024, 5, 1)), d(2024, 3, 31));
        assert_eq!(range.clamp(d(2023, 5, 1)), d(2024, 1, 1));
        assert_eq!(range.clamp(d(2024, 2, 9)), d(2024, 2, 9));
        assert!(range.allows(m(2024, 3)));
        assert!(!range.allows(m(2024, 4)));
    }

    #[test]
    fn oversized_lookahead_is_capped() {
        // GIVEN: a lookahead far beyond any useful window
        let cap = MAX_LOOKAHEAD_MONTHS as i32;

        for lookahead in [100_000_000, u32::MAX / 2, u32::MAX] {
            // WHEN: building and recentering a window with it
            let mut range = DateRange::new(None, None, m(2024, 6), lookahead);

            // THEN: the window is the capped span around the anchor
            assert_eq!(range.window_from(), m(2024, 6).add_months(-cap));
            assert_eq!(range.window_to(), m(2024, 6).add_months(cap + 1));
            assert_eq!(range.month_index(m(2024, 6)), Some(MAX_LOOKAHEAD_MONTHS as usize));

            range.recenter(m(2030, 1), lookahead);
            assert_eq!(range.month_index(m(2030, 1)), Some(MAX_LOOKAHEAD_MONTHS as usize));

            let before = range.window_to();
            assert!(range.extend_window(Direction::Future, lookahead));
            assert_eq!(range.window_to(), before.add_months(cap));
        }
    }
}
