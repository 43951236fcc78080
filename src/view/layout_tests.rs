//! Tests for picker layout and rendering.

use super::*;
use crate::model::MonthFormatter;
use crate::state::PagingDateAndMonthPicker;
use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ===== Test Helpers =====

fn create_test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).unwrap()
}

fn create_state(mode: PickerMode) -> AppState {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let mut state = AppState::new(
        PagingDateAndMonthPicker::new(today),
        mode,
        MonthFormatter::default(),
    );
    state
        .picker
        .update(|strip, _| strip.set_viewport_width(78.0));
    state
}

fn render(state: &AppState) -> String {
    let mut terminal = create_test_terminal();
    let styles = PickerStyles::default();
    terminal
        .draw(|frame| {
            let layout = compute_layout(frame.area(), state.mode, 3);
            render_picker(frame, state, &styles, &layout);
        })
        .unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===== compute_layout =====

#[test]
fn combined_layout_stacks_title_strip_grid_status() {
    let layout = compute_layout(Rect::new(0, 0, 80, 24), PickerMode::Combined, 3);

    assert_eq!(layout.title, Rect::new(0, 0, 80, 1));
    assert_eq!(layout.strip, Some(Rect::new(0, 1, 80, 5)));
    assert_eq!(layout.strip_inner, Some(Rect::new(1, 2, 78, 3)));
    assert_eq!(layout.grid, Some(Rect::new(0, 6, 80, 17)));
    assert_eq!(layout.grid_inner, Some(Rect::new(1, 7, 78, 15)));
    assert_eq!(layout.label, None);
    assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
}

#[test]
fn month_only_layout_has_label_and_no_grid() {
    let layout = compute_layout(Rect::new(0, 0, 80, 24), PickerMode::MonthOnly, 3);

    assert!(layout.strip.is_some());
    assert_eq!(layout.grid, None);
    assert_eq!(layout.label, Some(Rect::new(0, 6, 80, 1)));
}

#[test]
fn pager_only_layout_has_label_above_grid() {
    let layout = compute_layout(Rect::new(0, 0, 80, 24), PickerMode::PagerOnly, 3);

    assert_eq!(layout.strip, None);
    assert_eq!(layout.label, Some(Rect::new(0, 1, 80, 1)));
    assert_eq!(layout.grid, Some(Rect::new(0, 2, 80, 21)));
}

#[test]
fn strip_height_grows_strip_pane() {
    let layout = compute_layout(Rect::new(0, 0, 80, 24), PickerMode::Combined, 1);
    assert_eq!(layout.strip_inner.map(|r| r.height), Some(1));
}

// ===== render_picker =====

#[test]
fn combined_render_shows_both_panes() {
    // GIVEN: combined mode on June 2024
    let state = create_state(PickerMode::Combined);

    // WHEN: rendering
    let output = render(&state);

    // THEN: both pane titles, the centered month and weekday headers are shown
    assert!(output.contains("Months"), "strip title missing:\n{output}");
    assert!(output.contains("Days"), "grid title missing:\n{output}");
    assert!(output.contains("June 2024"));
    assert!(output.contains("Mo"));
    assert!(output.contains("Tab: switch pane"));
}

#[test]
fn month_only_render_shows_selected_month_label() {
    let state = create_state(PickerMode::MonthOnly);
    let output = render(&state);

    assert!(output.contains("Selected month: June 2024"), "{output}");
    assert!(!output.contains("Days"));
}

#[test]
fn pager_only_render_shows_month_and_day_labels() {
    let mut state = create_state(PickerMode::PagerOnly);
    let date = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
    state.picker.update(|_, pager| pager.select_date(date));

    let output = render(&state);

    assert!(
        output.contains("Month: June 2024 | Selected day: 2024-06-20"),
        "{output}"
    );
    assert!(!output.contains("Months"));
}

#[test]
fn help_overlay_drawn_when_visible() {
    let mut state = create_state(PickerMode::Combined);
    state.toggle_help();

    let output = render(&state);

    assert!(output.contains("Keyboard Shortcuts"));
}

#[test]
fn status_hints_follow_focus() {
    let mut state = create_state(PickerMode::Combined);
    assert!(status_hints(&state).starts_with("h/l: month"));
    state.cycle_focus();
    assert!(status_hints(&state).starts_with("hjkl: day"));
}
