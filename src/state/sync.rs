//! Bidirectional binding between the month strip and the day-grid pager.
//!
//! - strip `MonthSelected(m)` → pager jumps to `m` (no reload, start-date
//!   fallback, animated)
//! - pager `ScrolledToMonth(m)` → strip scrolls to `m` (animated, not forced)
//!
//! Each receiver ignores a request for the month it already shows, which
//! stops the echo after one hop. The relay loop is capped regardless.

use super::day_grid_pager::{DayGridPager, PagerEvent};
use super::month_strip::{MonthStrip, StripEvent};
use tracing::{trace, warn};

/// Upper bound on relay rounds per call.
pub const MAX_RELAY_HOPS: usize = 4;

/// Relays notifications between a strip and a pager it borrows.
///
/// Holds no state of its own; construct one whenever a relay is needed.
#[derive(Debug)]
pub struct SyncController<'a> {
    strip: &'a mut MonthStrip,
    pager: &'a mut DayGridPager,
}

impl<'a> SyncController<'a> {
    /// Bind a strip and a pager for one relay.
    pub fn new(strip: &'a mut MonthStrip, pager: &'a mut DayGridPager) -> Self {
        Self { strip, pager }
    }

    /// Deliver pending notifications until both sides are quiet.
    ///
    /// Returns the number of rounds that delivered at least one event.
    pub fn relay(&mut self) -> usize {
        let mut hops = 0;
        loop {
            let strip_events = self.strip.drain_events();
            let pager_events = self.pager.drain_events();
            if strip_events.is_empty() && pager_events.is_empty() {
                return hops;
            }
            if hops == MAX_RELAY_HOPS {
                warn!(
                    strip_events = strip_events.len(),
                    pager_events = pager_events.len(),
                    "sync relay hop cap reached, dropping events"
                );
                return hops;
            }
            hops += 1;

            for event in strip_events {
                let StripEvent::MonthSelected(month) = event;
                trace!(month = %month, hop = hops, "strip -> pager");
                self.pager.scroll_to_date(month.first_day(), false, true, true);
            }
            for event in pager_events {
                let PagerEvent::ScrolledToMonth(month) = event;
                trace!(month = %month, hop = hops, "pager -> strip");
                self.strip.scroll_to_date(month.first_day(), true, false);
            }
        }
    }
}

/// Relay pending notifications between `strip` and `pager`.
pub fn synchronize(strip: &mut MonthStrip, pager: &mut DayGridPager) -> usize {
    SyncController::new(strip, pager).relay()
}
