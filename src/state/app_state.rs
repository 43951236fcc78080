//! Application state: the picker plus focus, surface mode and overlays.

use super::mouse_handler::DragTracker;
use super::picker::PagingDateAndMonthPicker;
use crate::model::{MonthFormatter, PickerMode};
use chrono::NaiveDate;

/// Pane receiving movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    /// Month strip: left/right step the selected month.
    Strip,
    /// Day grid: arrows move the day cursor, Enter selects.
    Grid,
}

/// Complete UI state, independent of the terminal.
#[derive(Debug)]
pub struct AppState {
    /// The synchronized strip and pager.
    pub picker: PagingDateAndMonthPicker,
    /// Surfaces on screen.
    pub mode: PickerMode,
    /// Pane receiving movement keys.
    pub focus: FocusPane,
    /// Whether the help overlay is shown.
    pub help_visible: bool,
    /// Formatter for labels outside the strip (grid titles, status bar).
    pub formatter: MonthFormatter,
    /// In-progress strip drag, if any.
    pub drag: Option<DragTracker>,
}

impl AppState {
    /// Wrap a picker. Focus starts on the first visible pane.
    pub fn new(picker: PagingDateAndMonthPicker, mode: PickerMode, formatter: MonthFormatter) -> Self {
        let focus = if mode.shows_strip() {
            FocusPane::Strip
        } else {
            FocusPane::Grid
        };
        Self {
            picker,
            mode,
            focus,
            help_visible: false,
            formatter,
            drag: None,
        }
    }

    /// Toggle focus between strip and grid. A single-surface mode keeps its
    /// only pane focused.
    pub fn cycle_focus(&mut self) {
        if self.mode != PickerMode::Combined {
            return;
        }
        self.focus = match self.focus {
            FocusPane::Strip => FocusPane::Grid,
            FocusPane::Grid => FocusPane::Strip,
        };
    }

    /// Focus `pane` if it is on screen.
    pub fn focus_pane(&mut self, pane: FocusPane) {
        let visible = match pane {
            FocusPane::Strip => self.mode.shows_strip(),
            FocusPane::Grid => self.mode.shows_grid(),
        };
        if visible {
            self.focus = pane;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Date treated as today.
    pub fn today(&self) -> NaiveDate {
        self.picker.strip().today()
    }

    /// Label of the month selected in the strip.
    pub fn selected_month_label(&self) -> String {
        self.picker
            .selected_month()
            .map(|month| self.formatter.format(month))
            .unwrap_or_default()
    }

    /// Label of the month shown by the pager.
    pub fn current_month_label(&self) -> String {
        self.picker
            .current_month()
            .map(|month| self.formatter.format(month))
            .unwrap_or_default()
    }

    /// ISO label of the selected day, or a placeholder.
    pub fn selected_day_label(&self) -> String {
        self.picker
            .selected_date()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "none".to_string())
    }
}
