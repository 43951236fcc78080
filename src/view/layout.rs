//! Screen layout for the three picker surfaces.
//!
//! Layout computation is pure so the event loop can hit-test mouse events
//! against the same rectangles it draws into.

use super::constants::{STATUS_BAR_HEIGHT, TITLE_BAR_HEIGHT};
use super::help::render_help_overlay;
use super::month_strip::MonthStripView;
use super::pager::PagerView;
use super::styles::PickerStyles;
use crate::model::PickerMode;
use crate::state::{AppState, FocusPane};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Title of the strip pane border.
const STRIP_TITLE: &str = " Months ";

/// Title of the grid pane border.
const GRID_TITLE: &str = " Days ";

/// Rectangles of one frame. Panes absent in the current mode are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerLayout {
    /// Title bar.
    pub title: Rect,
    /// Strip pane including its border.
    pub strip: Option<Rect>,
    /// Strip drawing area inside the border.
    pub strip_inner: Option<Rect>,
    /// Grid pane including its border.
    pub grid: Option<Rect>,
    /// Pager drawing area inside the border.
    pub grid_inner: Option<Rect>,
    /// Label row of the single-surface modes.
    pub label: Option<Rect>,
    /// Status bar.
    pub status: Rect,
}

/// Split `area` for `mode`. The strip pane is `strip_height` rows plus its
/// border.
pub fn compute_layout(area: Rect, mode: PickerMode, strip_height: u16) -> PickerLayout {
    let strip_block = Constraint::Length(strip_height.saturating_add(2));
    let constraints = match mode {
        PickerMode::Combined => vec![
            Constraint::Length(TITLE_BAR_HEIGHT),
            strip_block,
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ],
        PickerMode::MonthOnly => vec![
            Constraint::Length(TITLE_BAR_HEIGHT),
            strip_block,
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ],
        PickerMode::PagerOnly => vec![
            Constraint::Length(TITLE_BAR_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ],
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let inner = |rect: Rect| Block::default().borders(Borders::ALL).inner(rect);
    let (strip, grid, label) = match mode {
        PickerMode::Combined => (Some(chunks[1]), Some(chunks[2]), None),
        PickerMode::MonthOnly => (Some(chunks[1]), None, Some(chunks[2])),
        PickerMode::PagerOnly => (None, Some(chunks[2]), Some(chunks[1])),
    };

    PickerLayout {
        title: chunks[0],
        strip,
        strip_inner: strip.map(inner),
        grid,
        grid_inner: grid.map(inner),
        label,
        status: chunks[chunks.len() - 1],
    }
}

/// Draw every surface of `state` into `frame`.
pub fn render_picker(
    frame: &mut Frame,
    state: &AppState,
    styles: &PickerStyles,
    layout: &PickerLayout,
) {
    render_title_bar(frame, layout.title, state, styles);

    if let (Some(area), Some(inner)) = (layout.strip, layout.strip_inner) {
        let focused = state.focus == FocusPane::Strip;
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(STRIP_TITLE)
                .border_style(styles.border(focused)),
            area,
        );
        frame.render_widget(
            MonthStripView::new(state.picker.strip(), styles).focused(focused),
            inner,
        );
    }

    if let (Some(area), Some(inner)) = (layout.grid, layout.grid_inner) {
        let focused = state.focus == FocusPane::Grid;
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(GRID_TITLE)
                .border_style(styles.border(focused)),
            area,
        );
        frame.render_widget(
            PagerView::new(state.picker.pager(), &state.formatter, styles).focused(focused),
            inner,
        );
    }

    if let Some(area) = layout.label {
        frame.render_widget(
            Paragraph::new(Line::from(label_text(state))).style(styles.heading()),
            area,
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(status_hints(state))).style(styles.muted()),
        layout.status,
    );

    if state.help_visible {
        render_help_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &PickerStyles) {
    let text = format!("monthpick | {} | {}", state.mode, state.current_month_label());
    frame.render_widget(Paragraph::new(Line::from(text)).style(styles.heading()), area);
}

/// Text of the label row in the single-surface modes.
fn label_text(state: &AppState) -> String {
    match state.mode {
        PickerMode::MonthOnly => format!(" Selected month: {}", state.selected_month_label()),
        PickerMode::PagerOnly | PickerMode::Combined => format!(
            " Month: {} | Selected day: {}",
            state.current_month_label(),
            state.selected_day_label()
        ),
    }
}

/// Keyboard hints for the focused pane.
fn status_hints(state: &AppState) -> String {
    let pane = match state.focus {
        FocusPane::Strip => "h/l: month | t: today",
        FocusPane::Grid => "hjkl: day | Enter: select | [/]: page",
    };
    if state.mode == PickerMode::Combined {
        format!("{pane} | Tab: switch pane | ?: help | q: quit")
    } else {
        format!("{pane} | ?: help | q: quit")
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
