//! Page-based day-grid pager.
//!
//! Shows one month's [`MonthGrid`] at a time. At most three pages exist at
//! once (previous, current, next), and neighbours are only built when a swipe
//! asks for them. Page turns are transitions advanced by [`DayGridPager::tick`];
//! only a user swipe that completes without being cancelled reports
//! [`PagerEvent::ScrolledToMonth`]. Programmatic jumps never report.

use super::month_grid::{default_grid_factory, GridFactory, GridSpec, MonthGrid};
use crate::model::Month;
use chrono::{NaiveDate, TimeDelta, Weekday};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Duration of a page turn.
pub const PAGE_TURN_ANIMATION: Duration = Duration::from_millis(200);

/// Slot of a materialized page relative to the displayed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSlot {
    /// The month before the current one.
    Previous,
    /// The displayed month.
    Current,
    /// The month after the current one.
    Next,
}

/// Direction of a page turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Towards later months.
    Forward,
    /// Towards earlier months.
    Reverse,
}

impl SwipeDirection {
    fn delta(self) -> i32 {
        match self {
            SwipeDirection::Forward => 1,
            SwipeDirection::Reverse => -1,
        }
    }

    fn slot(self) -> PageSlot {
        match self {
            SwipeDirection::Forward => PageSlot::Next,
            SwipeDirection::Reverse => PageSlot::Previous,
        }
    }
}

/// A materialized page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Month shown.
    pub month: Month,
    /// The page's day grid.
    pub grid: MonthGrid,
}

#[derive(Debug, Clone)]
enum TransitionKind {
    /// User swipe towards a neighbour slot; rotates slots on completion.
    Swipe,
    /// Programmatic jump; the new page is already current.
    Jump { outgoing: Box<Page> },
}

#[derive(Debug, Clone)]
struct PageTransition {
    direction: SwipeDirection,
    elapsed: Duration,
    kind: TransitionKind,
}

/// A page turn in flight, for rendering.
#[derive(Debug, Clone, Copy)]
pub struct TransitionFrame<'a> {
    /// Page sliding out.
    pub outgoing: &'a Page,
    /// Page sliding in.
    pub incoming: &'a Page,
    /// Completion in `[0, 1]`.
    pub progress: f64,
    /// Turn direction.
    pub direction: SwipeDirection,
}

/// Snapshot of the pager's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerState {
    /// Displayed month.
    pub current_date: Month,
    /// Slot on screen. A neighbour while a swipe is in flight.
    pub visible_page: PageSlot,
}

/// Notifications emitted by the pager for the synchronization relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEvent {
    /// A page turn completed; carries the new current month.
    ScrolledToMonth(Month),
}

/// Page-level application hooks.
#[derive(Default)]
pub struct PagerDelegate {
    /// Called after a completed page turn.
    pub did_page_to_month: Option<Box<dyn FnMut(Month)>>,
    /// Called for every grid built, before it is shown.
    pub did_create_grid: Option<Box<dyn FnMut(&mut MonthGrid)>>,
}

/// Day-level application hooks.
#[derive(Default)]
pub struct DayGridDelegate {
    /// Veto a selection. Missing means every enabled day is selectable.
    pub should_select_date: Option<Box<dyn Fn(NaiveDate) -> bool>>,
    /// Called after a day is selected.
    pub did_select_date: Option<Box<dyn FnMut(NaiveDate)>>,
}

/// Day-level content source.
#[derive(Default)]
pub struct DayGridDataSource {
    /// Whether a day carries a marker.
    pub is_date_marked: Option<Box<dyn Fn(NaiveDate) -> bool>>,
}

impl fmt::Debug for PagerDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerDelegate")
            .field("did_page_to_month", &self.did_page_to_month.is_some())
            .field("did_create_grid", &self.did_create_grid.is_some())
            .finish()
    }
}

impl fmt::Debug for DayGridDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayGridDelegate")
            .field("should_select_date", &self.should_select_date.is_some())
            .field("did_select_date", &self.did_select_date.is_some())
            .finish()
    }
}

impl fmt::Debug for DayGridDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayGridDataSource")
            .field("is_date_marked", &self.is_date_marked.is_some())
            .finish()
    }
}

/// Paging container showing one month's day grid at a time.
pub struct DayGridPager {
    start_bound: Option<NaiveDate>,
    end_bound: Option<NaiveDate>,
    week_start: Weekday,
    show_header: bool,
    today: NaiveDate,
    factory: GridFactory,
    previous: Option<Page>,
    current: Option<Page>,
    next: Option<Page>,
    transition: Option<PageTransition>,
    animation: Duration,
    selected_date: Option<NaiveDate>,
    delegate: PagerDelegate,
    day_delegate: DayGridDelegate,
    data_source: DayGridDataSource,
    events: Vec<PagerEvent>,
    pages_created: usize,
}

impl fmt::Debug for DayGridPager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayGridPager")
            .field("start_bound", &self.start_bound)
            .field("end_bound", &self.end_bound)
            .field("current", &self.current_month())
            .field("previous", &self.previous.as_ref().map(|p| p.month))
            .field("next", &self.next.as_ref().map(|p| p.month))
            .field("transition", &self.transition.as_ref().map(|t| t.direction))
            .field("selected_date", &self.selected_date)
            .finish_non_exhaustive()
    }
}

impl DayGridPager {
    /// Unbounded pager using the default grid factory. Call
    /// [`Self::load`] to show the first page.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_factory(today, default_grid_factory())
    }

    /// Pager building its grids through `factory`.
    pub fn with_factory(today: NaiveDate, factory: GridFactory) -> Self {
        Self {
            start_bound: None,
            end_bound: None,
            week_start: Weekday::Mon,
            show_header: true,
            today,
            factory,
            previous: None,
            current: None,
            next: None,
            transition: None,
            animation: PAGE_TURN_ANIMATION,
            selected_date: None,
            delegate: PagerDelegate::default(),
            day_delegate: DayGridDelegate::default(),
            data_source: DayGridDataSource::default(),
            events: Vec::new(),
            pages_created: 0,
        }
    }

    // ===== Configuration =====

    /// Install page-level hooks.
    pub fn set_delegate(&mut self, delegate: PagerDelegate) {
        self.delegate = delegate;
    }

    /// Install day-level hooks.
    pub fn set_day_delegate(&mut self, delegate: DayGridDelegate) {
        self.day_delegate = delegate;
    }

    /// Install the day content source.
    pub fn set_data_source(&mut self, data_source: DayGridDataSource) {
        self.data_source = data_source;
    }

    /// Replace the grid factory and rebuild the displayed page.
    pub fn set_grid_factory(&mut self, factory: GridFactory) {
        self.factory = factory;
        self.rebuild();
    }

    /// First weekday column for grids built from now on. Rebuilds pages.
    pub fn set_week_start(&mut self, week_start: Weekday) {
        self.week_start = week_start;
        self.rebuild();
    }

    /// Whether grids draw their own month title. Rebuilds pages.
    pub fn set_show_header(&mut self, show_header: bool) {
        self.show_header = show_header;
        self.rebuild();
    }

    /// Page turn duration. Zero completes turns immediately.
    pub fn set_animation(&mut self, animation: Duration) {
        self.animation = animation;
    }

    /// Replace the explicit bounds.
    ///
    /// Neighbour pages are dropped. The displayed page is rebuilt; if its
    /// month left the bounds the pager falls back to the start-bound month.
    pub fn set_bounds(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) if s > e => {
                warn!(start = %s, end = %e, "pager bounds reversed, swapping");
                (Some(e), Some(s))
            }
            bounds => bounds,
        };
        self.start_bound = start;
        self.end_bound = end;
        self.transition = None;
        self.previous = None;
        self.next = None;
        let Some(current) = self.current_month() else {
            return;
        };
        debug!(start = ?start, end = ?end, current = %current, "pager bounds changed");
        self.scroll_to_date(current.first_day(), true, true, false);
    }

    // ===== Paging =====

    /// Show the initial page: today's month, or the nearest bound month when
    /// today is out of bounds. Reports the initial month once.
    pub fn load(&mut self) {
        let month = self.clamp_month(Month::containing(self.today));
        let page = self.build_page(month);
        self.current = Some(page);
        self.previous = None;
        self.next = None;
        self.transition = None;
        info!(month = %month, "pager loaded");
        self.emit(month);
    }

    /// Neighbouring page `delta` months away (`±1`), built on first request.
    ///
    /// Returns `None` past an explicit bound or before [`Self::load`].
    pub fn navigate(&mut self, delta: i32) -> Option<&Page> {
        let direction = match delta {
            1 => SwipeDirection::Forward,
            -1 => SwipeDirection::Reverse,
            _ => return None,
        };
        let month = self.current_month()?.add_months(delta);
        if !self.allows(month) {
            return None;
        }
        let cached = match direction {
            SwipeDirection::Forward => self.next.as_ref(),
            SwipeDirection::Reverse => self.previous.as_ref(),
        }
        .is_some_and(|page| page.month == month);
        if !cached {
            let page = self.build_page(month);
            *self.slot_mut(direction.slot()) = Some(page);
        }
        self.page(direction.slot())
    }

    /// Start a user page turn. Returns `false` at a bound.
    ///
    /// A turn already in flight completes first. Without animation (or with
    /// a zero duration) the turn completes immediately.
    pub fn swipe(&mut self, direction: SwipeDirection, animated: bool) -> bool {
        if self.transition.is_some() {
            self.finish_transition();
        }
        if self.navigate(direction.delta()).is_none() {
            debug!(?direction, "swipe stopped at bound");
            return false;
        }
        self.transition = Some(PageTransition {
            direction,
            elapsed: Duration::ZERO,
            kind: TransitionKind::Swipe,
        });
        if !animated || self.animation.is_zero() {
            self.finish_transition();
        }
        true
    }

    /// Abandon an in-flight turn. A cancelled swipe never reports.
    pub fn cancel_swipe(&mut self) {
        if let Some(transition) = self.transition.take() {
            debug!(direction = ?transition.direction, "page turn cancelled");
        }
    }

    /// Advance the in-flight turn. Returns whether one was running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        transition.elapsed += dt;
        if transition.elapsed >= self.animation {
            self.finish_transition();
        }
        true
    }

    /// Programmatic jump to the month containing `date`.
    ///
    /// Does nothing when that month is already displayed unless `reload` is
    /// set. A month outside the bounds falls back to the start-bound month
    /// (or the nearest bound month without a start bound) when
    /// `fallback_to_start_date` is set, and is otherwise ignored. Never
    /// reports [`PagerEvent::ScrolledToMonth`].
    pub fn scroll_to_date(
        &mut self,
        date: NaiveDate,
        reload: bool,
        fallback_to_start_date: bool,
        animated: bool,
    ) -> bool {
        let mut target = Month::containing(date);
        if !self.allows(target) {
            if !fallback_to_start_date {
                return false;
            }
            target = match self.start_bound {
                Some(start) => Month::containing(start),
                None => self.clamp_month(target),
            };
        }

        let current = self.current_month();
        if !reload && current == Some(target) && !self.is_swiping() {
            return false;
        }

        self.transition = None;
        let page = self.build_page(target);
        let outgoing = self.current.replace(page);
        self.previous = None;
        self.next = None;
        debug!(month = %target, reload, animated, "pager jumped");

        if let (true, Some(outgoing), Some(current)) = (animated, outgoing, current) {
            if current != target && !self.animation.is_zero() {
                let direction = if target > current {
                    SwipeDirection::Forward
                } else {
                    SwipeDirection::Reverse
                };
                self.transition = Some(PageTransition {
                    direction,
                    elapsed: Duration::ZERO,
                    kind: TransitionKind::Jump {
                        outgoing: Box::new(outgoing),
                    },
                });
            }
        }
        true
    }

    fn finish_transition(&mut self) {
        let Some(transition) = self.transition.take() else {
            return;
        };
        let TransitionKind::Swipe = transition.kind else {
            return;
        };
        let incoming = match transition.direction {
            SwipeDirection::Forward => self.next.take(),
            SwipeDirection::Reverse => self.previous.take(),
        };
        let Some(incoming) = incoming else {
            return;
        };
        let outgoing = self.current.replace(incoming);
        match transition.direction {
            SwipeDirection::Forward => self.previous = outgoing,
            SwipeDirection::Reverse => self.next = outgoing,
        }
        if let Some(month) = self.current_month() {
            info!(month = %month, direction = ?transition.direction, "paged to month");
            self.emit(month);
        }
    }

    // ===== Day interaction =====

    /// Move the day cursor by `days`. Crossing the month edge turns the page.
    pub fn move_cursor(&mut self, days: i64) -> bool {
        if self.transition.is_some() {
            self.finish_transition();
        }
        let Some(page) = self.current.as_mut() else {
            return false;
        };
        let cursor = page.grid.cursor();
        let Some(target) = cursor.checked_add_signed(TimeDelta::days(days)) else {
            return false;
        };
        if page.grid.set_cursor(target) {
            return true;
        }
        if page.month.contains(target) {
            // Inside the month but outside the bounds.
            return false;
        }

        let direction = if target > cursor {
            SwipeDirection::Forward
        } else {
            SwipeDirection::Reverse
        };
        if !self.swipe(direction, true) {
            return false;
        }
        let slot = match self.transition {
            Some(_) => direction.slot(),
            None => PageSlot::Current,
        };
        if let Some(page) = self.slot_mut(slot).as_mut() {
            let clamped = page.grid.clamp(target);
            page.grid.set_cursor(clamped);
        }
        true
    }

    /// Select the day under the cursor.
    pub fn select_cursor(&mut self) -> bool {
        match self.current.as_ref() {
            Some(page) => self.select_date(page.grid.cursor()),
            None => false,
        }
    }

    /// Select `date` on the displayed page.
    ///
    /// Days outside the displayed grid, and days vetoed by the delegate, are
    /// ignored.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        let Some(page) = self.current.as_mut() else {
            return false;
        };
        if !page.grid.contains(date) {
            return false;
        }
        if let Some(should_select) = self.day_delegate.should_select_date.as_ref() {
            if !should_select(date) {
                debug!(date = %date, "day selection vetoed");
                return false;
            }
        }
        page.grid.set_cursor(date);
        page.grid.set_selected(Some(date));
        for neighbour in [self.previous.as_mut(), self.next.as_mut()].into_iter().flatten() {
            neighbour.grid.set_selected(Some(date));
        }
        self.selected_date = Some(date);
        info!(date = %date, "day selected");
        if let Some(did_select) = self.day_delegate.did_select_date.as_mut() {
            did_select(date);
        }
        true
    }

    /// Whether the data source marks `date`.
    pub fn is_date_marked(&self, date: NaiveDate) -> bool {
        self.data_source
            .is_date_marked
            .as_ref()
            .is_some_and(|is_marked| is_marked(date))
    }

    // ===== Queries =====

    /// Displayed month. `None` before [`Self::load`].
    pub fn current_month(&self) -> Option<Month> {
        self.current.as_ref().map(|page| page.month)
    }

    /// Displayed page.
    pub fn current_page(&self) -> Option<&Page> {
        self.current.as_ref()
    }

    /// Page in a slot, if materialized.
    pub fn page(&self, slot: PageSlot) -> Option<&Page> {
        match slot {
            PageSlot::Previous => self.previous.as_ref(),
            PageSlot::Current => self.current.as_ref(),
            PageSlot::Next => self.next.as_ref(),
        }
    }

    /// Number of materialized pages (at most three).
    pub fn materialized_pages(&self) -> usize {
        [&self.previous, &self.current, &self.next]
            .iter()
            .filter(|page| page.is_some())
            .count()
    }

    /// Total grids built so far.
    pub fn pages_created(&self) -> usize {
        self.pages_created
    }

    /// Position snapshot. `None` before [`Self::load`].
    pub fn state(&self) -> Option<PagerState> {
        let current_date = self.current_month()?;
        let visible_page = match &self.transition {
            Some(PageTransition {
                kind: TransitionKind::Swipe,
                direction,
                ..
            }) => direction.slot(),
            _ => PageSlot::Current,
        };
        Some(PagerState {
            current_date,
            visible_page,
        })
    }

    /// In-flight page turn, for rendering.
    pub fn transition_frame(&self) -> Option<TransitionFrame<'_>> {
        let transition = self.transition.as_ref()?;
        let progress = if self.animation.is_zero() {
            1.0
        } else {
            (transition.elapsed.as_secs_f64() / self.animation.as_secs_f64()).clamp(0.0, 1.0)
        };
        let (outgoing, incoming) = match &transition.kind {
            TransitionKind::Swipe => (
                self.current.as_ref()?,
                self.page(transition.direction.slot())?,
            ),
            TransitionKind::Jump { outgoing } => (outgoing.as_ref(), self.current.as_ref()?),
        };
        Some(TransitionFrame {
            outgoing,
            incoming,
            progress,
            direction: transition.direction,
        })
    }

    /// Whether a page turn of any kind is in flight.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether a user swipe is in flight.
    pub fn is_swiping(&self) -> bool {
        matches!(
            self.transition,
            Some(PageTransition {
                kind: TransitionKind::Swipe,
                ..
            })
        )
    }

    /// Last selected day.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Explicit start bound.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_bound
    }

    /// Explicit end bound.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_bound
    }

    /// Date treated as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// First weekday column.
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Take pending notifications.
    pub fn drain_events(&mut self) -> Vec<PagerEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== Internals =====

    fn allows(&self, month: Month) -> bool {
        self.clamp_month(month) == month
    }

    fn clamp_month(&self, month: Month) -> Month {
        let mut month = month;
        if let Some(start) = self.start_bound {
            month = month.max(Month::containing(start));
        }
        if let Some(end) = self.end_bound {
            month = month.min(Month::containing(end));
        }
        month
    }

    fn build_page(&mut self, month: Month) -> Page {
        let mut start = month.first_day();
        let mut end = month.last_day();
        if let Some(bound) = self.start_bound {
            start = start.max(bound);
        }
        if let Some(bound) = self.end_bound {
            end = end.min(bound);
        }
        let spec = GridSpec {
            month,
            start,
            end,
            week_start: self.week_start,
            show_header: self.show_header,
        };
        let mut grid = (self.factory)(&spec);
        grid.set_selected(self.selected_date);
        let cursor = self
            .selected_date
            .filter(|date| grid.contains(*date))
            .or_else(|| Some(self.today).filter(|date| grid.contains(*date)));
        if let Some(cursor) = cursor {
            grid.set_cursor(cursor);
        }
        if let Some(did_create) = self.delegate.did_create_grid.as_mut() {
            did_create(&mut grid);
        }
        self.pages_created += 1;
        debug!(month = %month, start = %spec.start, end = %spec.end, "grid created");
        Page { month, grid }
    }

    fn rebuild(&mut self) {
        self.transition = None;
        self.previous = None;
        self.next = None;
        if let Some(month) = self.current_month() {
            let page = self.build_page(month);
            self.current = Some(page);
        }
    }

    fn slot_mut(&mut self, slot: PageSlot) -> &mut Option<Page> {
        match slot {
            PageSlot::Previous => &mut self.previous,
            PageSlot::Current => &mut self.current,
            PageSlot::Next => &mut self.next,
        }
    }

    fn emit(&mut self, month: Month) {
        self.events.push(PagerEvent::ScrolledToMonth(month));
        if let Some(did_page) = self.delegate.did_page_to_month.as_mut() {
            did_page(month);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::from_ymd(y, m).unwrap()
    }

    fn loaded() -> DayGridPager {
        let mut pager = DayGridPager::new(d(2024, 6, 15));
        pager.load();
        assert_eq!(
            pager.drain_events(),
            vec![PagerEvent::ScrolledToMonth(month(2024, 6))]
        );
        pager
    }

    #[test]
    fn load_shows_todays_month_with_cursor_on_today() {
        let pager = loaded();
        let page = pager.current_page().unwrap();
        assert_eq!(page.month, month(2024, 6));
        assert_eq!(page.grid.cursor(), d(2024, 6, 15));
        assert_eq!(pager.materialized_pages(), 1);
    }

    #[test]
    fn completed_forward_swipe_emits_new_month() {
        let mut pager = loaded();
        assert!(pager.swipe(SwipeDirection::Forward, true));
        assert_eq!(
            pager.state(),
            Some(PagerState {
                current_date: month(2024, 6),
                visible_page: PageSlot::Next,
            })
        );
        assert!(pager.drain_events().is_empty(), "no event before completion");

        pager.tick(PAGE_TURN_ANIMATION / 2);
        assert!(pager.drain_events().is_empty());
        pager.tick(PAGE_TURN_ANIMATION);

        assert_eq!(pager.current_month(), Some(month(2024, 7)));
        assert_eq!(
            pager.drain_events(),
            vec![PagerEvent::ScrolledToMonth(month(2024, 7))]
        );
        assert_eq!(pager.page(PageSlot::Previous).unwrap().month, month(2024, 6));
    }

    #[test]
    fn cancelled_swipe_never_emits() {
        let mut pager = loaded();
        pager.swipe(SwipeDirection::Reverse, true);
        pager.tick(Duration::from_millis(10));
        pager.cancel_swipe();
        assert!(!pager.tick(PAGE_TURN_ANIMATION));
        assert_eq!(pager.current_month(), Some(month(2024, 6)));
        assert!(pager.drain_events().is_empty());
    }

    #[test]
    fn programmatic_jump_never_emits() {
        let mut pager = loaded();
        assert!(pager.scroll_to_date(d(2025, 1, 9), false, false, true));
        assert_eq!(pager.current_month(), Some(month(2025, 1)));
        let frame = pager.transition_frame().unwrap();
        assert_eq!(frame.direction, SwipeDirection::Forward);
        assert_eq!(frame.outgoing.month, month(2024, 6));
        while pager.tick(Duration::from_millis(16)) {}
        assert!(pager.drain_events().is_empty());
    }

    #[test]
    fn jump_to_current_month_is_noop_unless_reloaded() {
        let mut pager = loaded();
        let built = pager.pages_created();
        assert!(!pager.scroll_to_date(d(2024, 6, 30), false, false, true));
        assert_eq!(pager.pages_created(), built);
        assert!(pager.scroll_to_date(d(2024, 6, 30), true, false, false));
        assert_eq!(pager.pages_created(), built + 1);
    }

    #[test]
    fn jump_backwards_animates_in_reverse() {
        let mut pager = loaded();
        pager.scroll_to_date(d(2023, 11, 1), false, false, true);
        assert_eq!(
            pager.transition_frame().map(|f| f.direction),
            Some(SwipeDirection::Reverse)
        );
    }

    #[test]
    fn navigation_stops_at_bounds() {
        let mut pager = loaded();
        pager.set_bounds(Some(d(2024, 5, 10)), Some(d(2024, 6, 20)));
        assert!(pager.navigate(1).is_none());
        assert!(!pager.swipe(SwipeDirection::Forward, false));
        assert!(pager.swipe(SwipeDirection::Reverse, false));
        assert_eq!(pager.current_month(), Some(month(2024, 5)));
        assert!(!pager.swipe(SwipeDirection::Reverse, false));
        assert_eq!(pager.current_page().unwrap().grid.start(), d(2024, 5, 10));
    }

    #[test]
    fn out_of_bounds_jump_falls_back_to_start_month() {
        let mut pager = loaded();
        pager.set_bounds(Some(d(2024, 1, 1)), Some(d(2024, 3, 31)));
        assert_eq!(pager.current_month(), Some(month(2024, 1)));
        assert!(!pager.scroll_to_date(d(2024, 9, 1), false, false, false));
        assert!(pager.scroll_to_date(d(2024, 2, 1), false, false, false));
        assert!(pager.scroll_to_date(d(2024, 9, 1), false, true, false));
        assert_eq!(pager.current_month(), Some(month(2024, 1)));
        assert!(pager.drain_events().is_empty());
    }

    #[test]
    fn at_most_three_pages_are_materialized() {
        let mut pager = loaded();
        for _ in 0..5 {
            pager.navigate(1);
            pager.navigate(-1);
            pager.swipe(SwipeDirection::Forward, false);
            assert!(pager.materialized_pages() <= 3);
        }
        assert_eq!(pager.current_month(), Some(month(2024, 11)));
    }

    #[test]
    fn neighbour_pages_are_built_lazily_once() {
        let mut pager = loaded();
        assert_eq!(pager.pages_created(), 1);
        pager.navigate(1);
        pager.navigate(1);
        assert_eq!(pager.pages_created(), 2);
        assert!(pager.navigate(2).is_none());
    }

    #[test]
    fn cursor_crossing_month_edge_turns_page() {
        let mut pager = loaded();
        pager.set_animation(Duration::ZERO);
        pager.select_date(d(2024, 6, 28));
        assert!(pager.move_cursor(7));
        assert_eq!(pager.current_month(), Some(month(2024, 7)));
        assert_eq!(pager.current_page().unwrap().grid.cursor(), d(2024, 7, 5));
        assert_eq!(
            pager.drain_events(),
            vec![PagerEvent::ScrolledToMonth(month(2024, 7))]
        );
    }

    #[test]
    fn delegate_can_veto_selection() {
        let mut pager = loaded();
        let chosen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&chosen);
        pager.set_day_delegate(DayGridDelegate {
            should_select_date: Some(Box::new(|date: NaiveDate| {
                chrono::Datelike::weekday(&date) != Weekday::Sun
            })),
            did_select_date: Some(Box::new(move |date| sink.borrow_mut().push(date))),
        });
        assert!(!pager.select_date(d(2024, 6, 16)));
        assert!(pager.select_date(d(2024, 6, 17)));
        assert!(!pager.select_date(d(2024, 7, 1)), "not on the displayed page");
        assert_eq!(*chosen.borrow(), vec![d(2024, 6, 17)]);
        assert_eq!(pager.selected_date(), Some(d(2024, 6, 17)));
    }

    #[test]
    fn created_grids_pass_through_delegate() {
        let mut pager = DayGridPager::new(d(2024, 6, 15));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        pager.set_delegate(PagerDelegate {
            did_create_grid: Some(Box::new(move |grid: &mut MonthGrid| {
                sink.borrow_mut().push(grid.month())
            })),
            ..PagerDelegate::default()
        });
        pager.load();
        pager.navigate(-1);
        assert_eq!(*seen.borrow(), vec![month(2024, 6), month(2024, 5)]);
    }

    #[test]
    fn data_source_marks_days() {
        let mut pager = loaded();
        assert!(!pager.is_date_marked(d(2024, 6, 1)));
        pager.set_data_source(DayGridDataSource {
            is_date_marked: Some(Box::new(|date: NaiveDate| date == d(2024, 6, 1))),
        });
        assert!(pager.is_date_marked(d(2024, 6, 1)));
        assert!(!pager.is_date_marked(d(2024, 6, 2)));
    }

    #[test]
    fn load_out_of_bounds_today_uses_nearest_bound_month() {
        let mut pager = DayGridPager::new(d(2024, 6, 15));
        pager.set_bounds(Some(d(2025, 2, 1)), None);
        pager.load();
        assert_eq!(pager.current_month(), Some(month(2025, 2)));
    }
}
