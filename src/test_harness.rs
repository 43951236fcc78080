//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user interactions.
//!
//! The harness keeps its own clock: mouse events are stamped with it and
//! [`AcceptanceTestHarness::tick`] advances it, so drag velocities are
//! deterministic.

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::PickerMode;
use crate::state::AppState;
use crate::view::{build_app_state, PickerStyles, TuiApp};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::{Duration, Instant};

/// Frame step used by [`AcceptanceTestHarness::settle`].
const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames run by [`AcceptanceTestHarness::settle`].
const MAX_SETTLE_FRAMES: usize = 500;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Trailing whitespace and empty lines are removed to keep snapshots clean.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    now: Instant,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Picker on `today` in `mode` with default configuration, 80x24.
    pub fn new(today: NaiveDate, mode: PickerMode) -> Self {
        Self::with_size(today, mode, 80, 24)
    }

    /// Picker on `today` in `mode` with a custom terminal size.
    pub fn with_size(today: NaiveDate, mode: PickerMode, width: u16, height: u16) -> Self {
        let config = ResolvedConfig {
            mode,
            ..ResolvedConfig::default()
        };
        Self::with_config(&config, today, width, height)
    }

    /// Picker built from `config`.
    pub fn with_config(config: &ResolvedConfig, today: NaiveDate, width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("TestBackend terminal should initialize");
        let app_state =
            build_app_state(config, today, None).expect("test config should build a picker");
        let mut app = TuiApp::new_for_test(
            terminal,
            app_state,
            KeyBindings::default(),
            PickerStyles::default(),
        );
        // First frame sizes the strip viewport, as the event loop does.
        app.render_test()
            .expect("Rendering should succeed in test harness");

        Self {
            app,
            now: Instant::now(),
            running: true,
        }
    }

    /// Send a single key event
    ///
    /// # Returns
    /// * `true` - If app quit as a result of this key
    /// * `false` - If app is still running
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        } else {
            self.redraw();
        }
        quit
    }

    /// Send a sequence of keys
    ///
    /// Continues sending keys until the sequence is exhausted or app quits.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break; // Quit encountered
            }
        }
    }

    /// Left click (press and release) at screen coordinates.
    pub fn click_at(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row);
        self.mouse(MouseEventKind::Up(MouseButton::Left), column, row);
    }

    /// Drag from `from` to `to` on `row`, one column per `step`, then release.
    pub fn drag(&mut self, from: u16, to: u16, row: u16, step: Duration) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), from, row);
        let mut column = from;
        while column != to {
            column = if to > column { column + 1 } else { column - 1 };
            self.now += step;
            self.mouse(MouseEventKind::Drag(MouseButton::Left), column, row);
        }
        self.mouse(MouseEventKind::Up(MouseButton::Left), to, row);
    }

    /// One wheel notch at screen coordinates.
    pub fn scroll_at(&mut self, column: u16, row: u16, towards_past: bool) {
        let kind = if towards_past {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        };
        self.mouse(kind, column, row);
    }

    /// Advance the clock and animations by `dt`. Returns whether anything
    /// was animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.now += dt;
        self.app.tick_test(dt)
    }

    /// Run frames until every animation has finished.
    pub fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.tick(FRAME) {
                break;
            }
        }
        self.redraw();
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Check if app is still running (didn't quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Assert that the current render matches a snapshot
    pub fn assert_snapshot(&mut self, snapshot_name: &str) {
        let output = self.render_to_string();
        insta::assert_snapshot!(snapshot_name, output);
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        if !self.running {
            return;
        }
        let event = MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        self.app.handle_mouse_test(event, self.now);
    }

    fn redraw(&mut self) {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
    }
}
