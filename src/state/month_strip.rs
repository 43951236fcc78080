//! Month strip virtualizer.
//!
//! A horizontally scrolling row of month cells over a lazily extended
//! [`DateRange`] window. Only the cells intersecting the viewport are bound,
//! through a [`CellPool`]. When the viewport approaches an edge that has no
//! explicit bound, the window grows by the lookahead amount and the scroll
//! offset is shifted so nothing moves on screen.
//!
//! A few cells at each unbound edge form a reserved margin: they are laid out
//! (so the strip can extend before the user reaches the real end) but hidden
//! and never selected.
//!
//! # Ordering within a layout pass
//! window mutation → cell reload → offset restoration → cell binding.

use crate::model::date_range::{DateRange, Direction, MAX_LOOKAHEAD_MONTHS};
use crate::model::format::MonthFormatter;
use crate::model::Month;
use crate::view_state::cell_pool::CellPool;
use crate::view_state::month_cell::{MonthCell, MONTH_CELL_IDENTIFIER};
use crate::view_state::snap_layout::SnapLayout;
use chrono::NaiveDate;
use ratatui::text::Line;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Months added to the window per extension, and the half-width of a
/// regenerated window.
pub const LOOKAHEAD_MONTHS: u32 = 16;

/// Hidden buffer cells kept at each unbound edge.
pub const RESERVED_MARGIN: usize = 2;

/// Extend when the remaining scroll distance to an unbound edge drops below
/// this many viewport widths.
pub const EXTENSION_THRESHOLD_VIEWPORTS: f64 = 1.0;

/// Duration of programmatic and snap scroll animations.
pub const SCROLL_ANIMATION: Duration = Duration::from_millis(240);

/// Seconds of travel projected from release velocity when a drag ends.
pub const DECELERATION_SECONDS: f64 = 0.35;

/// Release velocities below this (columns/second) end a drag without
/// deceleration.
pub const MIN_FLING_VELOCITY: f64 = 4.0;

/// Cells of travel shown when animating into a regenerated window.
const REGENERATED_LEAD_IN: usize = 2;

const SNAP_EPSILON: f64 = 1e-6;
const MAX_EXTENSIONS_PER_PASS: usize = 8;
const MAX_SETTLE_DEPTH: usize = 4;

/// Tunables for the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripConfig {
    /// Lookahead constant in months.
    pub lookahead: u32,
    /// Hidden cells at each unbound edge.
    pub reserved_margin: usize,
    /// Extension threshold in viewport widths.
    pub extension_threshold: f64,
    /// Scroll animation duration. Zero makes every scroll immediate.
    pub animation: Duration,
    /// Projected deceleration travel in seconds.
    pub deceleration: f64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            lookahead: LOOKAHEAD_MONTHS,
            reserved_margin: RESERVED_MARGIN,
            extension_threshold: EXTENSION_THRESHOLD_VIEWPORTS,
            animation: SCROLL_ANIMATION,
            deceleration: DECELERATION_SECONDS,
        }
    }
}

/// Notifications emitted by the strip for the synchronization relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripEvent {
    /// The selected month changed.
    MonthSelected(Month),
}

/// Optional application hooks.
#[derive(Default)]
pub struct MonthStripDelegate {
    /// Called whenever the selected month changes.
    pub did_select_month: Option<Box<dyn FnMut(Month)>>,
    /// Styled title override. `None` from the hook falls back to the
    /// formatted label.
    pub title_for_month: Option<Box<dyn Fn(Month) -> Option<Line<'static>>>>,
    /// Subtitle shown under the title.
    pub subtitle_for_month: Option<Box<dyn Fn(Month) -> Option<String>>>,
}

impl fmt::Debug for MonthStripDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonthStripDelegate")
            .field("did_select_month", &self.did_select_month.is_some())
            .field("title_for_month", &self.title_for_month.is_some())
            .field("subtitle_for_month", &self.subtitle_for_month.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Idle,
    Dragging,
    Animating {
        from: f64,
        to: f64,
        elapsed: Duration,
        settle_on_finish: bool,
    },
}

/// Horizontally scrolling, virtualized month selector.
#[derive(Debug)]
pub struct MonthStrip {
    range: DateRange,
    layout: SnapLayout,
    config: StripConfig,
    formatter: MonthFormatter,
    delegate: MonthStripDelegate,
    pool: CellPool<MonthCell>,
    offset: f64,
    viewport_width: f64,
    selected: Option<Month>,
    motion: Motion,
    events: Vec<StripEvent>,
    today: NaiveDate,
}

impl MonthStrip {
    /// Unbounded strip selecting `today`'s month.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_config(
            today,
            StripConfig::default(),
            SnapLayout::default(),
            MonthFormatter::default(),
        )
    }

    /// Strip with explicit tunables, layout and label formatter.
    ///
    /// The lookahead is raised above the reserved margin if needed so a
    /// regenerated window always has interior cells.
    pub fn with_config(
        today: NaiveDate,
        mut config: StripConfig,
        layout: SnapLayout,
        formatter: MonthFormatter,
    ) -> Self {
        config.lookahead = config
            .lookahead
            .min(MAX_LOOKAHEAD_MONTHS)
            .max(config.reserved_margin as u32 + 1);
        let mut strip = Self {
            range: DateRange::new(None, None, Month::containing(today), config.lookahead),
            layout,
            config,
            formatter,
            delegate: MonthStripDelegate::default(),
            pool: CellPool::new(Box::new(|_| MonthCell::default())),
            offset: 0.0,
            viewport_width: 0.0,
            selected: None,
            motion: Motion::Idle,
            events: Vec::new(),
            today,
        };
        strip.scroll_to_today(false, true);
        strip
    }

    // ===== Configuration =====

    /// Install application hooks and rebind visible cells.
    pub fn set_delegate(&mut self, delegate: MonthStripDelegate) {
        self.delegate = delegate;
        self.reload();
        self.bind_visible_cells();
    }

    /// Replace the label formatter.
    pub fn set_formatter(&mut self, formatter: MonthFormatter) {
        self.formatter = formatter;
        self.reload();
        self.bind_visible_cells();
    }

    /// Replace the layout, keeping the selection centered.
    pub fn set_layout(&mut self, layout: SnapLayout) {
        self.layout = layout;
        self.reload();
        self.recenter_selection();
    }

    /// Replace the explicit bounds.
    ///
    /// Reloads every cell and re-centres on the current selection clamped into
    /// the new bounds.
    pub fn set_bounds(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        let anchor = self.selected.unwrap_or(Month::containing(self.today));
        self.range.set_bounds(start, end, anchor, self.config.lookahead);
        debug!(
            start = ?self.range.start_bound(),
            end = ?self.range.end_bound(),
            from = %self.range.window_from(),
            to = %self.range.window_to(),
            "month strip bounds changed"
        );
        self.reload();
        let target = self.selected.map(Month::first_day).unwrap_or(self.today);
        self.scroll_to_date(target, false, true);
    }

    /// Width of the viewport in columns.
    ///
    /// A bounds change always invalidates the layout; the selected cell stays
    /// centered.
    pub fn set_viewport_width(&mut self, width: f64) {
        let width = width.max(0.0);
        if (width - self.viewport_width).abs() < SNAP_EPSILON {
            return;
        }
        self.viewport_width = width;
        if self.layout.invalidates_on_bounds_change() {
            self.recenter_selection();
        }
    }

    // ===== Scrolling =====

    /// Scroll to the month containing `date` and select it.
    ///
    /// `date` is clamped into the explicit bounds first. Without `force`,
    /// targeting the already selected month does nothing. A target outside the
    /// window (or inside a reserved margin) regenerates the window around it on
    /// the unbound sides. Returns whether anything happened.
    pub fn scroll_to_date(&mut self, date: NaiveDate, animated: bool, force: bool) -> bool {
        let target = Month::containing(self.range.clamp(date));
        if !force && self.selected == Some(target) {
            return false;
        }

        let regenerated = !self.is_interior(target);
        if regenerated {
            self.range.recenter(target, self.config.lookahead);
            debug!(
                target = %target,
                from = %self.range.window_from(),
                to = %self.range.window_to(),
                "month window regenerated"
            );
            self.reload();
        }

        let Some(mut index) = self.range.month_index(target) else {
            return false;
        };
        if animated && regenerated {
            // The old offset indexes the previous window. Start close by
            // instead, then re-resolve in case that layout pass extended it.
            self.jump_to(self.lead_in_offset(index, target));
            let Some(shifted) = self.range.month_index(target) else {
                return false;
            };
            index = shifted;
        }
        let destination = self.layout.centering_offset(index, self.viewport_width);
        if animated {
            self.animate_to(destination, false);
        } else {
            self.jump_to(destination);
        }
        self.set_selected(target);
        true
    }

    /// Scroll to today's month.
    pub fn scroll_to_today(&mut self, animated: bool, force: bool) -> bool {
        self.scroll_to_date(self.today, animated, force)
    }

    /// Move the selection by `delta` months (keyboard navigation).
    pub fn step(&mut self, delta: i32) -> bool {
        let base = self.selected.unwrap_or(Month::containing(self.today));
        self.scroll_to_date(base.add_months(delta).first_day(), true, false)
    }

    /// Tap on the cell at `index`: center it and select its month.
    ///
    /// Hidden margin cells ignore taps.
    pub fn select_index(&mut self, index: usize) -> bool {
        if self.is_margin_index(index) {
            return false;
        }
        let Some(month) = self.range.month_at(index) else {
            return false;
        };
        let destination = self.layout.centering_offset(index, self.viewport_width);
        self.animate_to(destination, false);
        self.set_selected(month);
        true
    }

    /// Tap at a viewport column. Taps between cells hit nothing.
    pub fn select_at_column(&mut self, column: f64) -> bool {
        let content_x = self.offset + column;
        if content_x < 0.0 {
            return false;
        }
        let index = (content_x / self.layout.stride()).floor() as usize;
        if content_x >= self.layout.frame(index).max_x() {
            return false;
        }
        self.select_index(index)
    }

    /// Start a drag gesture. Supersedes any running animation.
    pub fn begin_drag(&mut self) {
        self.motion = Motion::Dragging;
    }

    /// Move the content with the pointer by `dx` columns.
    pub fn drag_by(&mut self, dx: f64) {
        if self.viewport_width <= 0.0 {
            return;
        }
        self.motion = Motion::Dragging;
        self.offset = self.layout.clamp_offset(
            self.offset - dx,
            self.range.item_count(),
            self.viewport_width,
        );
        self.layout_pass();
    }

    /// End a drag gesture with the pointer's release velocity
    /// (columns/second).
    ///
    /// A slow release settles immediately; a fling decelerates towards a
    /// snapped target and settles when the motion stops.
    pub fn end_drag(&mut self, velocity: f64) {
        self.motion = Motion::Idle;
        if velocity.abs() < MIN_FLING_VELOCITY {
            self.settle();
            return;
        }
        let count = self.range.item_count();
        let proposed = self.offset - velocity * self.config.deceleration;
        let target = self
            .layout
            .target_offset(proposed, -velocity, self.viewport_width, count);
        let target = self.layout.clamp_offset(target, count, self.viewport_width);
        self.animate_to(target, true);
    }

    /// Scroll wheel: a short drag that settles immediately.
    pub fn scroll_by(&mut self, dx: f64) {
        self.begin_drag();
        self.drag_by(dx);
        self.end_drag(0.0);
    }

    /// Advance a running animation. Returns whether one was running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Motion::Animating {
            from,
            to,
            elapsed,
            settle_on_finish,
        } = self.motion
        else {
            return false;
        };

        let elapsed = elapsed + dt;
        let duration = self.config.animation;
        if duration.is_zero() || elapsed >= duration {
            self.motion = Motion::Idle;
            self.offset = to;
            self.layout_pass();
            if settle_on_finish {
                self.settle();
            }
        } else {
            let t = elapsed.as_secs_f64() / duration.as_secs_f64();
            self.motion = Motion::Animating {
                from,
                to,
                elapsed,
                settle_on_finish,
            };
            self.offset = from + (to - from) * ease_out(t);
            self.layout_pass();
        }
        true
    }

    /// Whether a scroll animation is in flight.
    pub fn is_animating(&self) -> bool {
        matches!(self.motion, Motion::Animating { .. })
    }

    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.motion == Motion::Dragging
    }

    // ===== Layout =====

    /// Extend the window near unbound edges, then bind visible cells.
    ///
    /// A skipped pass (zero viewport) is harmless: the next pass catches up.
    pub fn layout_pass(&mut self) {
        if self.viewport_width <= 0.0 {
            return;
        }
        for _ in 0..MAX_EXTENSIONS_PER_PASS {
            let count = self.range.item_count();
            let (min, max) = self.layout.offset_bounds(count, self.viewport_width);
            let threshold = self.viewport_width * self.config.extension_threshold;
            if !self.range.is_bounded(Direction::Past) && self.offset - min < threshold {
                self.extend(Direction::Past);
            } else if !self.range.is_bounded(Direction::Future) && max - self.offset < threshold {
                self.extend(Direction::Future);
            } else {
                break;
            }
        }
        trace!(
            offset = self.offset,
            count = self.range.item_count(),
            "month strip layout pass"
        );
        self.bind_visible_cells();
    }

    fn extend(&mut self, direction: Direction) {
        let previous_from = self.range.window_from();
        if !self.range.extend_window(direction, self.config.lookahead) {
            return;
        }
        self.reload();
        // The month that used to be first keeps its on-screen position.
        let shifted = self.range.month_index(previous_from).unwrap_or(0);
        if shifted > 0 {
            self.shift_offset(shifted as f64 * self.layout.stride());
        }
        debug!(
            ?direction,
            from = %self.range.window_from(),
            to = %self.range.window_to(),
            "month window extended"
        );
    }

    fn bind_visible_cells(&mut self) {
        if self.viewport_width <= 0.0 {
            return;
        }
        let count = self.range.item_count();
        let visible = self
            .layout
            .visible_indices(self.offset, self.viewport_width, count);
        self.pool.recycle_outside(visible);

        for attributes in self
            .layout
            .attributes_in_rect(self.offset, self.viewport_width, count)
        {
            let Some(month) = self.range.month_at(attributes.index) else {
                continue;
            };
            let hidden = self.is_margin_index(attributes.index);
            let title = self
                .delegate
                .title_for_month
                .as_ref()
                .and_then(|title_for| title_for(month))
                .unwrap_or_else(|| Line::from(self.formatter.format(month)));
            let subtitle = self
                .delegate
                .subtitle_for_month
                .as_ref()
                .and_then(|subtitle_for| subtitle_for(month));
            let selected = self.selected == Some(month);

            let cell = self.pool.dequeue(MONTH_CELL_IDENTIFIER, attributes.index);
            cell.month = Some(month);
            cell.title = title;
            cell.subtitle = subtitle;
            cell.hidden = hidden;
            cell.selected = selected;
            cell.attributes = Some(attributes);
        }
    }

    fn reload(&mut self) {
        self.pool.reload();
    }

    // ===== Settling =====

    /// Select the cell nearest the viewport center once motion has stopped.
    ///
    /// A cell in a reserved margin is never selected: the strip re-snaps to
    /// the nearest interior cell and settles again.
    pub fn settle(&mut self) {
        self.settle_at_depth(0);
    }

    fn settle_at_depth(&mut self, depth: usize) {
        if depth > MAX_SETTLE_DEPTH {
            return;
        }
        let count = self.range.item_count();
        let Some(index) = self
            .layout
            .nearest_to_center(self.offset, self.viewport_width, count)
        else {
            return;
        };

        if self.is_margin_index(index) {
            let Some(interior) = self.nearest_interior_index(index) else {
                return;
            };
            debug!(index, interior, "settled in reserved margin, re-snapping");
            self.jump_to(self.layout.centering_offset(interior, self.viewport_width));
            self.settle_at_depth(depth + 1);
            return;
        }

        let destination = self.layout.centering_offset(index, self.viewport_width);
        if (destination - self.offset).abs() > SNAP_EPSILON {
            self.jump_to(destination);
        }
        if let Some(month) = self.range.month_at(index) {
            self.set_selected(month);
        }
    }

    // ===== Queries =====

    /// Currently selected month.
    pub fn selected_month(&self) -> Option<Month> {
        self.selected
    }

    /// Month of the cell nearest the viewport center.
    pub fn month_at_center(&self) -> Option<Month> {
        self.layout
            .nearest_to_center(self.offset, self.viewport_width, self.range.item_count())
            .and_then(|index| self.range.month_at(index))
    }

    /// The bounded month window.
    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Explicit start bound.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.range.start_bound()
    }

    /// Explicit end bound.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.range.end_bound()
    }

    /// Number of month items in the window.
    pub fn item_count(&self) -> usize {
        self.range.item_count()
    }

    /// Scroll offset of the viewport's left edge in content columns.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Viewport width in columns.
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Layout in use.
    pub fn layout(&self) -> &SnapLayout {
        &self.layout
    }

    /// Tunables in use.
    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Date treated as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Cells bound by the last layout pass, in index order.
    pub fn visible_cells(&self) -> impl Iterator<Item = &MonthCell> {
        self.pool.bound().map(|(_, cell)| cell)
    }

    /// The cell pool, for inspection.
    pub fn cell_pool(&self) -> &CellPool<MonthCell> {
        &self.pool
    }

    /// Take pending notifications.
    pub fn drain_events(&mut self) -> Vec<StripEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether `index` falls in a reserved margin of an unbound edge.
    pub fn is_margin_index(&self, index: usize) -> bool {
        let (lo, hi) = self.margins();
        let count = self.range.item_count();
        index < lo || index + hi >= count
    }

    // ===== Internals =====

    fn margins(&self) -> (usize, usize) {
        let margin = self.config.reserved_margin;
        let lo = if self.range.is_bounded(Direction::Past) { 0 } else { margin };
        let hi = if self.range.is_bounded(Direction::Future) { 0 } else { margin };
        (lo, hi)
    }

    fn is_interior(&self, month: Month) -> bool {
        self.range
            .month_index(month)
            .is_some_and(|index| !self.is_margin_index(index))
    }

    fn nearest_interior_index(&self, index: usize) -> Option<usize> {
        let (lo, hi) = self.margins();
        let count = self.range.item_count();
        if count <= lo + hi {
            return None;
        }
        Some(index.clamp(lo, count - hi - 1))
    }

    fn set_selected(&mut self, month: Month) {
        if self.selected == Some(month) {
            return;
        }
        self.selected = Some(month);
        info!(month = %month, "month selected");
        self.events.push(StripEvent::MonthSelected(month));
        if let Some(did_select) = self.delegate.did_select_month.as_mut() {
            did_select(month);
        }
        self.bind_visible_cells();
    }

    fn recenter_selection(&mut self) {
        self.motion = Motion::Idle;
        let count = self.range.item_count();
        match self.selected.and_then(|month| self.range.month_index(month)) {
            Some(index) => {
                self.offset = self.layout.centering_offset(index, self.viewport_width);
            }
            None => {
                self.offset = self
                    .layout
                    .clamp_offset(self.offset, count, self.viewport_width);
            }
        }
        self.layout_pass();
    }

    /// Offset a few cells short of `index`, on the side the previous
    /// selection lay.
    fn lead_in_offset(&self, index: usize, target: Month) -> f64 {
        let from_past = self.selected.is_none_or(|previous| previous < target);
        let lead_index = if from_past {
            index.saturating_sub(REGENERATED_LEAD_IN)
        } else {
            (index + REGENERATED_LEAD_IN).min(self.range.item_count().saturating_sub(1))
        };
        self.layout.centering_offset(lead_index, self.viewport_width)
    }

    fn jump_to(&mut self, offset: f64) {
        self.motion = Motion::Idle;
        self.offset = offset;
        self.layout_pass();
    }

    fn animate_to(&mut self, destination: f64, settle_on_finish: bool) {
        if self.viewport_width <= 0.0 || self.config.animation.is_zero() {
            self.jump_to(destination);
            if settle_on_finish {
                self.settle();
            }
            return;
        }
        self.motion = Motion::Animating {
            from: self.offset,
            to: destination,
            elapsed: Duration::ZERO,
            settle_on_finish,
        };
    }

    fn shift_offset(&mut self, delta: f64) {
        self.offset += delta;
        if let Motion::Animating { from, to, .. } = &mut self.motion {
            *from += delta;
            *to += delta;
        }
    }
}

fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: f64 = 80.0;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::from_ymd(y, m).unwrap()
    }

    fn strip() -> MonthStrip {
        let mut strip = MonthStrip::new(d(2024, 6, 15));
        strip.set_viewport_width(VIEWPORT);
        strip.drain_events();
        strip
    }

    fn immediate_strip(config: StripConfig) -> MonthStrip {
        let config = StripConfig {
            animation: Duration::ZERO,
            ..config
        };
        let mut strip = MonthStrip::with_config(
            d(2024, 6, 15),
            config,
            SnapLayout::default(),
            MonthFormatter::default(),
        );
        strip.set_viewport_width(VIEWPORT);
        strip.drain_events();
        strip
    }

    fn center_of(strip: &MonthStrip) -> f64 {
        strip.offset() + strip.viewport_width() / 2.0
    }

    #[test]
    fn new_selects_todays_month_and_emits_once() {
        let mut strip = MonthStrip::new(d(2024, 6, 15));
        assert_eq!(strip.selected_month(), Some(month(2024, 6)));
        assert_eq!(
            strip.drain_events(),
            vec![StripEvent::MonthSelected(month(2024, 6))]
        );
        assert!(strip.range().window_from() <= month(2023, 2));
        assert!(strip.range().window_to() > month(2025, 10));
    }

    #[test]
    fn viewport_change_keeps_selection_centered() {
        let strip = strip();
        let index = strip.range().month_index(month(2024, 6)).unwrap();
        let frame = strip.layout().frame(index);
        assert!((frame.center() - center_of(&strip)).abs() < 1e-9);
        assert!(strip.visible_cells().count() > 0);
    }

    #[test]
    fn repeated_scroll_to_same_month_is_noop() {
        let mut strip = strip();
        assert!(strip.scroll_to_date(d(2024, 9, 3), false, false));
        assert!(!strip.scroll_to_date(d(2024, 9, 28), false, false));
        assert_eq!(
            strip.drain_events(),
            vec![StripEvent::MonthSelected(month(2024, 9))]
        );
    }

    #[test]
    fn forced_scroll_to_same_month_recenters_without_event() {
        let mut strip = strip();
        strip.drag_by(5.0);
        assert!(strip.scroll_to_date(d(2024, 6, 1), false, true));
        assert!(strip.drain_events().is_empty());
        assert_eq!(strip.month_at_center(), Some(month(2024, 6)));
    }

    #[test]
    fn out_of_bounds_date_clamps_to_end_bound_month() {
        let mut strip = strip();
        strip.set_bounds(Some(d(2024, 1, 1)), Some(d(2024, 3, 31)));
        strip.scroll_to_date(d(2024, 5, 1), false, false);
        assert_eq!(strip.selected_month(), Some(month(2024, 3)));
        strip.scroll_to_date(d(2019, 5, 1), false, false);
        assert_eq!(strip.selected_month(), Some(month(2024, 1)));
        assert_eq!(strip.item_count(), 3);
    }

    #[test]
    fn set_bounds_clamps_existing_selection() {
        let mut strip = strip();
        strip.set_bounds(Some(d(2024, 8, 1)), None);
        assert_eq!(strip.selected_month(), Some(month(2024, 8)));
        assert_eq!(strip.range().window_from(), month(2024, 8));
    }

    #[test]
    fn far_target_regenerates_window_around_it() {
        let mut strip = strip();
        strip.scroll_to_date(d(2031, 1, 20), false, false);
        assert_eq!(strip.selected_month(), Some(month(2031, 1)));
        assert!(strip.range().contains(month(2031, 1)));
        assert_eq!(strip.month_at_center(), Some(month(2031, 1)));
        assert!(!strip.range().contains(month(2024, 6)));
    }

    #[test]
    fn animated_far_jump_slides_in_from_neighbouring_months() {
        // GIVEN: a strip dragged a few years into the future
        let mut strip = strip();
        strip.begin_drag();
        for _ in 0..80 {
            strip.drag_by(-8.0);
        }
        strip.end_drag(0.0);
        assert!(strip.selected_month().unwrap() > month(2026, 1));

        // WHEN: jumping far into the past with animation
        assert!(strip.scroll_to_date(d(2020, 1, 10), true, false));

        // THEN: the first frame already shows months next to the target
        assert_eq!(strip.month_at_center(), Some(month(2020, 3)));
        assert!(strip.visible_cells().any(|cell| cell.month == Some(month(2020, 2))));

        // AND: every frame stays near the target without growing the window
        let count = strip.item_count();
        assert_eq!(count, 2 * LOOKAHEAD_MONTHS as usize + 1);
        while strip.tick(Duration::from_millis(16)) {
            let center = strip.month_at_center().unwrap();
            assert!(
                (month(2020, 1)..=month(2020, 3)).contains(&center),
                "frame centered on {center}"
            );
            assert_eq!(strip.item_count(), count);
        }
        assert_eq!(strip.month_at_center(), Some(month(2020, 1)));
        assert_eq!(strip.selected_month(), Some(month(2020, 1)));
    }

    #[test]
    fn animated_far_jump_forward_approaches_from_the_past() {
        let mut strip = strip();
        strip.scroll_to_date(d(2031, 6, 1), true, false);
        assert_eq!(strip.month_at_center(), Some(month(2031, 4)));
        while strip.tick(Duration::from_millis(16)) {}
        assert_eq!(strip.month_at_center(), Some(month(2031, 6)));
    }

    #[test]
    fn dragging_to_past_edge_extends_window_without_jumping() {
        let mut strip = strip();
        let old_from = strip.range().window_from();
        let stride = strip.layout().stride();
        strip.begin_drag();
        strip.drag_by(16.0 * stride);

        assert_eq!(strip.month_at_center(), Some(old_from));
        assert_eq!(
            strip.range().window_from(),
            old_from.add_months(-(LOOKAHEAD_MONTHS as i32))
        );
        // selection only changes on settle
        assert_eq!(strip.selected_month(), Some(month(2024, 6)));
        strip.end_drag(0.0);
        assert_eq!(strip.selected_month(), Some(old_from));
    }

    #[test]
    fn settle_in_margin_resnaps_to_interior_cell() {
        let mut strip = immediate_strip(StripConfig {
            extension_threshold: 0.0,
            ..StripConfig::default()
        });
        let from = strip.range().window_from();
        strip.begin_drag();
        strip.drag_by(1.0e6);
        assert_eq!(strip.month_at_center(), Some(from));

        strip.end_drag(0.0);
        let expected = from.add_months(RESERVED_MARGIN as i32);
        assert_eq!(strip.selected_month(), Some(expected));
        assert_eq!(strip.month_at_center(), Some(expected));
    }

    #[test]
    fn bounded_edges_have_no_margin() {
        let mut strip = strip();
        strip.set_bounds(Some(d(2024, 1, 1)), Some(d(2024, 3, 31)));
        assert!(!strip.is_margin_index(0));
        assert!(!strip.is_margin_index(2));
        assert!(strip.select_index(0));
        assert_eq!(strip.selected_month(), Some(month(2024, 1)));
    }

    #[test]
    fn tapping_hidden_margin_cell_is_ignored() {
        let mut strip = strip();
        assert!(!strip.select_index(0));
        assert!(!strip.select_index(strip.item_count() - 1));
        assert_eq!(strip.selected_month(), Some(month(2024, 6)));
    }

    #[test]
    fn margin_cells_are_bound_hidden() {
        let mut strip = immediate_strip(StripConfig {
            extension_threshold: 0.0,
            ..StripConfig::default()
        });
        strip.drag_by(1.0e6);
        let first = strip.visible_cells().next().unwrap();
        assert_eq!(first.month, Some(strip.range().window_from()));
        assert!(first.hidden);
    }

    #[test]
    fn fling_decelerates_then_selects_snapped_cell() {
        let mut strip = strip();
        strip.begin_drag();
        strip.drag_by(-3.0);
        strip.end_drag(-100.0);
        assert!(strip.is_animating());
        let mut guard = 0;
        while strip.tick(Duration::from_millis(16)) {
            guard += 1;
            assert!(guard < 1000);
        }
        let selected = strip.selected_month().unwrap();
        assert!(selected > month(2024, 6), "fling left should move forward");
        let index = strip.range().month_index(selected).unwrap();
        let center = strip.layout().frame(index).center();
        assert!((center - center_of(&strip)).abs() < 1e-6);
    }

    #[test]
    fn animated_scroll_selects_immediately_and_arrives_on_tick() {
        let mut strip = strip();
        strip.scroll_to_date(d(2024, 8, 1), true, false);
        assert_eq!(strip.selected_month(), Some(month(2024, 8)));
        assert!(strip.is_animating());
        strip.tick(SCROLL_ANIMATION);
        assert!(!strip.is_animating());
        assert_eq!(strip.month_at_center(), Some(month(2024, 8)));
    }

    #[test]
    fn step_moves_selection_by_months() {
        let mut strip = strip();
        strip.step(1);
        strip.step(1);
        strip.step(-3);
        assert_eq!(strip.selected_month(), Some(month(2024, 5)));
    }

    #[test]
    fn select_at_column_hits_cell_under_pointer() {
        let mut strip = strip();
        let center = VIEWPORT / 2.0;
        let stride = strip.layout().stride();
        assert!(strip.select_at_column(center + stride));
        assert_eq!(strip.selected_month(), Some(month(2024, 7)));
    }

    #[test]
    fn delegate_supplies_titles_and_subtitles() {
        let mut strip = strip();
        strip.set_delegate(MonthStripDelegate {
            title_for_month: Some(Box::new(|m: Month| {
                (m.month() == 6).then(|| Line::from("JUNE!"))
            })),
            subtitle_for_month: Some(Box::new(|m: Month| Some(format!("{} days", m.day_count())))),
            ..MonthStripDelegate::default()
        });
        let june = strip
            .visible_cells()
            .find(|cell| cell.month == Some(month(2024, 6)))
            .unwrap();
        assert_eq!(june.title.to_string(), "JUNE!");
        assert_eq!(june.subtitle.as_deref(), Some("30 days"));
        assert!(june.selected);

        let july = strip
            .visible_cells()
            .find(|cell| cell.month == Some(month(2024, 7)))
            .unwrap();
        assert_eq!(july.title.to_string(), "July 2024");
        assert!(!july.selected);
    }

    #[test]
    fn delegate_is_notified_on_selection_change() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut strip = strip();
        strip.set_delegate(MonthStripDelegate {
            did_select_month: Some(Box::new(move |m| sink.borrow_mut().push(m))),
            ..MonthStripDelegate::default()
        });
        strip.step(1);
        strip.step(1);
        strip.scroll_to_date(d(2024, 8, 30), false, false);
        assert_eq!(*seen.borrow(), vec![month(2024, 7), month(2024, 8)]);
    }

    #[test]
    fn long_drags_keep_cell_creation_bounded() {
        let mut strip = strip();
        strip.begin_drag();
        for _ in 0..2_000 {
            strip.drag_by(-7.0);
        }
        strip.end_drag(0.0);
        let visible = strip.visible_cells().count();
        assert!(
            strip.cell_pool().created_count() <= visible + 2,
            "created {} cells for {} visible",
            strip.cell_pool().created_count(),
            visible
        );
    }
}
