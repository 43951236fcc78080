//! Mouse event handler.
//!
//! Functions that transform [`AppState`] in response to mouse events. Screen
//! positions are converted to pane-relative coordinates by the caller; time
//! is passed in so drag velocity is deterministic under test.

use super::app_state::{AppState, FocusPane};
use super::day_grid_pager::SwipeDirection;
use crate::view_state::GridGeometry;
use std::time::{Duration, Instant};
use tracing::trace;

/// A release this long after the last movement carries no fling velocity.
pub const RELEASE_IDLE: Duration = Duration::from_millis(80);

/// Weight of the newest sample in the smoothed drag velocity.
const VELOCITY_SMOOTHING: f64 = 0.8;

/// Pointer state of an in-progress strip drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTracker {
    last_column: u16,
    last_at: Instant,
    velocity: f64,
    moved: bool,
}

impl DragTracker {
    /// Start tracking at `column`.
    pub fn new(column: u16, now: Instant) -> Self {
        Self {
            last_column: column,
            last_at: now,
            velocity: 0.0,
            moved: false,
        }
    }

    /// Record a pointer move. Returns the horizontal delta in columns.
    pub fn update(&mut self, column: u16, now: Instant) -> f64 {
        let dx = f64::from(column) - f64::from(self.last_column);
        if dx == 0.0 {
            return 0.0;
        }
        let dt = now
            .saturating_duration_since(self.last_at)
            .max(Duration::from_millis(1))
            .as_secs_f64();
        let sample = dx / dt;
        self.velocity = VELOCITY_SMOOTHING * sample + (1.0 - VELOCITY_SMOOTHING) * self.velocity;
        self.last_column = column;
        self.last_at = now;
        self.moved = true;
        dx
    }

    /// Pointer velocity in columns per second at release time `now`.
    pub fn release_velocity(&self, now: Instant) -> f64 {
        if now.saturating_duration_since(self.last_at) > RELEASE_IDLE {
            0.0
        } else {
            self.velocity
        }
    }

    /// Whether the pointer moved since the press.
    pub fn moved(&self) -> bool {
        self.moved
    }
}

/// Button press on the strip at a column relative to the strip's left edge.
pub fn press_strip(state: &mut AppState, column: u16, now: Instant) {
    state.focus_pane(FocusPane::Strip);
    state.drag = Some(DragTracker::new(column, now));
    state.picker.update(|strip, _| strip.begin_drag());
}

/// Pointer drag over the strip.
pub fn drag_strip(state: &mut AppState, column: u16, now: Instant) {
    let Some(tracker) = state.drag.as_mut() else {
        return;
    };
    let dx = tracker.update(column, now);
    if dx != 0.0 {
        trace!(dx, "strip drag");
        state.picker.update(|strip, _| strip.drag_by(dx));
    }
}

/// Button release. A press without movement is a tap on the cell under the
/// pointer; otherwise the release velocity drives deceleration and snapping.
pub fn release_strip(state: &mut AppState, column: u16, now: Instant) {
    let Some(tracker) = state.drag.take() else {
        return;
    };
    if tracker.moved() {
        let velocity = tracker.release_velocity(now);
        trace!(velocity, "strip drag released");
        state.picker.update(|strip, _| strip.end_drag(velocity));
    } else {
        state.picker.update(|strip, _| {
            strip.end_drag(0.0);
            strip.select_at_column(f64::from(column))
        });
    }
}

/// Scroll wheel over the strip: one cell per notch.
pub fn wheel_strip(state: &mut AppState, towards_past: bool) {
    state.picker.update(|strip, _| {
        let stride = strip.layout().stride();
        strip.scroll_by(if towards_past { stride } else { -stride });
    });
}

/// Scroll wheel over the grid: one page per notch.
pub fn wheel_grid(state: &mut AppState, towards_past: bool) -> bool {
    let direction = if towards_past {
        SwipeDirection::Reverse
    } else {
        SwipeDirection::Forward
    };
    state.picker.update(|_, pager| pager.swipe(direction, true))
}

/// Click in the day grid at a screen position. Selects the day under the
/// pointer, if any.
pub fn click_grid(state: &mut AppState, geometry: &GridGeometry, column: u16, row: u16) -> bool {
    state.focus_pane(FocusPane::Grid);
    let Some((week, weekday)) = geometry.cell_at(column, row) else {
        return false;
    };
    let date = state
        .picker
        .pager()
        .current_page()
        .and_then(|page| page.grid.weeks().get(week).and_then(|days| days[weekday]));
    match date {
        Some(date) => state.picker.update(|_, pager| pager.select_date(date)),
        None => false,
    }
}

#[cfg(test)]
#[path = "mouse_handler_tests.rs"]
mod tests;
