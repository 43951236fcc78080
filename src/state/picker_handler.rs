//! Keyboard action handler for the picker.
//!
//! Focus-aware: movement goes to the strip or the day grid depending on
//! [`FocusPane`]. Every change is routed through
//! [`PagingDateAndMonthPicker::update`] so both panes stay in step.

use super::app_state::{AppState, FocusPane};
use super::day_grid_pager::SwipeDirection;
use crate::model::KeyAction;
use tracing::debug;

/// Apply `action` to `state`. Returns whether anything changed.
///
/// `Quit` is not handled here; the event loop owns termination.
pub fn handle_picker_action(state: &mut AppState, action: KeyAction) -> bool {
    if state.help_visible {
        // Only the toggle reaches through the overlay.
        if action == KeyAction::Help {
            state.toggle_help();
            return true;
        }
        return false;
    }

    match action {
        KeyAction::Help => {
            state.toggle_help();
            true
        }
        KeyAction::CycleFocus => {
            state.cycle_focus();
            true
        }
        KeyAction::Today => {
            let today = state.today();
            state.picker.scroll_to_date(today, true);
            true
        }
        KeyAction::PreviousPage | KeyAction::NextPage => {
            let forward = action == KeyAction::NextPage;
            if state.mode.shows_grid() {
                let direction = if forward {
                    SwipeDirection::Forward
                } else {
                    SwipeDirection::Reverse
                };
                state.picker.update(|_, pager| pager.swipe(direction, true))
            } else {
                let delta = if forward { 1 } else { -1 };
                state.picker.update(|strip, _| strip.step(delta))
            }
        }
        KeyAction::MoveLeft | KeyAction::MoveRight => {
            let delta = if action == KeyAction::MoveRight { 1 } else { -1 };
            match state.focus {
                FocusPane::Strip => state.picker.update(|strip, _| strip.step(delta)),
                FocusPane::Grid => state
                    .picker
                    .update(|_, pager| pager.move_cursor(i64::from(delta))),
            }
        }
        KeyAction::MoveUp | KeyAction::MoveDown => {
            if state.focus != FocusPane::Grid {
                return false;
            }
            let days = if action == KeyAction::MoveDown { 7 } else { -7 };
            state.picker.update(|_, pager| pager.move_cursor(days))
        }
        KeyAction::Select => {
            if state.focus != FocusPane::Grid {
                return false;
            }
            state.picker.update(|_, pager| pager.select_cursor())
        }
        KeyAction::Quit => {
            debug!("quit reached picker handler");
            false
        }
    }
}
