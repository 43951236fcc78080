//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod day_grid;
mod help;
pub mod layout;
mod month_strip;
mod pager;
pub mod styles;

pub use day_grid::DayGridView;
pub use help::render_help_overlay;
pub use layout::{compute_layout, render_picker, PickerLayout};
pub use month_strip::MonthStripView;
pub use pager::PagerView;
pub use styles::{ColorConfig, DayState, PickerStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, KeyAction};
use crate::state::mouse_handler::{
    click_grid, drag_strip, press_strip, release_strip, wheel_grid, wheel_strip,
};
use crate::state::{
    handle_picker_action, AppState, DayGridPager, MonthStrip, PagingDateAndMonthPicker,
    StripConfig,
};
use crate::view_state::snap_layout::{DEFAULT_ACTIVE_DISTANCE, DEFAULT_SPACING, DEFAULT_ZOOM_FACTOR};
use crate::view_state::{GridGeometry, SnapLayout};
use chrono::NaiveDate;
use constants::{FRAME_INTERVAL, IDLE_POLL_INTERVAL};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: PickerStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(app_state: AppState, styles: PickerStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            styles,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C). Polls at the frame interval
    /// while an animation runs and sleeps longer when idle; redraws only on
    /// input or animation progress.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        let mut last_tick = Instant::now();

        loop {
            let timeout = if self.app_state.picker.is_animating() {
                FRAME_INTERVAL
            } else {
                IDLE_POLL_INTERVAL
            };

            let mut dirty = false;
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            info!("quit requested");
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse, Instant::now());
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                        dirty = true;
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            let dt = now.saturating_duration_since(last_tick);
            last_tick = now;
            if self.tick(dt) {
                dirty = true;
            }

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Escape closes the help overlay before binding dispatch
        if key.code == KeyCode::Esc && self.app_state.help_visible {
            self.app_state.help_visible = false;
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        if action == KeyAction::Quit {
            return true;
        }

        handle_picker_action(&mut self.app_state, action);
        false
    }

    /// Handle a single mouse event at time `now`
    ///
    /// Positions are hit-tested against the layout of the current frame.
    /// Drag and release go to the strip while a strip drag is in progress,
    /// wherever the pointer is.
    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.app_state.help_visible {
            return;
        }
        let layout = self.layout();
        let position = Position::new(mouse.column, mouse.row);
        let over = |rect: Option<Rect>| rect.filter(|r| r.contains(position));
        let state = &mut self.app_state;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(inner) = over(layout.strip_inner) {
                    press_strip(state, mouse.column - inner.x, now);
                } else if let Some(inner) = over(layout.grid_inner) {
                    let Some(geometry) = grid_geometry(state.picker.pager(), inner) else {
                        return;
                    };
                    click_grid(state, &geometry, mouse.column, mouse.row);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let (Some(_), Some(inner)) = (state.drag, layout.strip_inner) {
                    drag_strip(state, mouse.column.saturating_sub(inner.x), now);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let (Some(_), Some(inner)) = (state.drag, layout.strip_inner) {
                    release_strip(state, mouse.column.saturating_sub(inner.x), now);
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let towards_past = mouse.kind == MouseEventKind::ScrollUp;
                if over(layout.strip).is_some() {
                    wheel_strip(state, towards_past);
                } else if over(layout.grid).is_some() {
                    wheel_grid(state, towards_past);
                }
            }
            _ => {}
        }
    }

    /// Advance animations by `dt`. Returns whether a redraw is needed.
    fn tick(&mut self, dt: Duration) -> bool {
        self.app_state.picker.tick(dt)
    }

    /// Layout for the current terminal size.
    fn layout(&self) -> PickerLayout {
        let size = self.terminal.size().unwrap_or_default();
        compute_layout(
            Rect::new(0, 0, size.width, size.height),
            self.app_state.mode,
            self.app_state.picker.strip_height(),
        )
    }

    /// Render the current frame
    ///
    /// Propagates the strip pane width to the strip before drawing so its
    /// selection stays centered across resizes.
    fn draw(&mut self) -> Result<(), TuiError> {
        let layout = self.layout();
        if let Some(inner) = layout.strip_inner {
            self.app_state
                .picker
                .update(|strip, _| strip.set_viewport_width(f64::from(inner.width)));
        }

        let state = &self.app_state;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            render_picker(frame, state, styles, &layout);
        })?;

        Ok(())
    }
}

/// Hit-test geometry of the pager's current page drawn into `area`.
fn grid_geometry(pager: &DayGridPager, area: Rect) -> Option<GridGeometry> {
    let page = pager.current_page()?;
    Some(GridGeometry::new(
        area,
        page.grid.show_header(),
        page.grid.weeks().len(),
    ))
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing and benchmarking within the crate.
// They are gated with cfg to ensure they're not accessible from outside the crate.
//
// DO NOT use these in production code.

#[cfg(any(test, feature = "bench-internals"))]
#[allow(dead_code)] // Not all helpers used in every context (tests vs benchmarks)
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// **WARNING**: This is for testing only. Do not use in production code.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        styles: PickerStyles,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            styles,
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event at `now` (test-only accessor)
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent, now: Instant) {
        self.handle_mouse(mouse, now)
    }

    /// Advance animations (test-only accessor)
    pub(crate) fn tick_test(&mut self, dt: Duration) -> bool {
        self.tick(dt)
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

// ===== Benchmark Helpers =====
//
// Public wrappers for benchmarks when bench-internals feature is enabled.

#[cfg(feature = "bench-internals")]
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create TuiApp for benchmarking with default key bindings and styles.
    pub fn new_for_bench(terminal: Terminal<B>, app_state: AppState) -> Self {
        Self::new_for_test(
            terminal,
            app_state,
            KeyBindings::default(),
            PickerStyles::default(),
        )
    }

    /// Handle a single keyboard event (benchmark-only accessor)
    pub fn handle_key_bench(&mut self, key: KeyEvent) -> bool {
        self.handle_key_test(key)
    }

    /// Advance animations (benchmark-only accessor)
    pub fn tick_bench(&mut self, dt: Duration) -> bool {
        self.tick(dt)
    }

    /// Render a single frame (benchmark-only accessor)
    pub fn render_bench(&mut self) -> Result<(), TuiError> {
        self.render_test()
    }
}

/// CLI arguments for TUI initialization
///
/// Carries the resolved configuration plus the flags that only affect the
/// terminal session.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Fully resolved configuration (defaults, file, env and CLI merged).
    pub config: ResolvedConfig,
    /// Month to show at startup instead of today's.
    pub initial_date: Option<NaiveDate>,
    /// Disable colours regardless of `NO_COLOR`.
    pub no_color: bool,
}

/// Build the application state described by `config`.
///
/// `today` anchors the strip and the pager; `initial_date`, when given, is
/// scrolled to (clamped into the bounds) without animation.
///
/// # Errors
///
/// Returns [`AppError::Format`] if the locale or month template is invalid.
pub fn build_app_state(
    config: &ResolvedConfig,
    today: NaiveDate,
    initial_date: Option<NaiveDate>,
) -> Result<AppState, AppError> {
    let formatter = config.month_formatter()?;
    let strip_config = StripConfig {
        lookahead: config.lookahead_months,
        ..StripConfig::default()
    };
    let snap_layout = SnapLayout::new(
        f64::from(config.cell_width),
        DEFAULT_SPACING,
        DEFAULT_ACTIVE_DISTANCE,
        DEFAULT_ZOOM_FACTOR,
    );
    let strip = MonthStrip::with_config(today, strip_config, snap_layout, formatter.clone());
    let mut pager = DayGridPager::new(today);
    pager.set_week_start(config.week_start);

    let mut picker = PagingDateAndMonthPicker::from_parts(strip, pager);
    picker.set_strip_height(config.strip_height);
    picker.set_bounds(config.start_date, config.end_date);
    if let Some(date) = initial_date {
        picker.scroll_to_date(date, false);
    }

    info!(
        mode = %config.mode,
        locale = %config.locale,
        month = ?picker.selected_month(),
        "picker ready"
    );
    Ok(AppState::new(picker, config.mode, formatter))
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(args: CliArgs) -> Result<(), AppError> {
    let today = chrono::Local::now().date_naive();
    let app_state = build_app_state(&args.config, today, args.initial_date)?;
    let styles = PickerStyles::new(
        args.config.active_color,
        args.config.inactive_color,
        ColorConfig::from_env_and_args(args.no_color),
    );

    let result = TuiApp::new(app_state, styles).and_then(|mut app| app.run());

    // Always restore terminal state
    let restored = restore_terminal();
    result?;
    restored?;
    Ok(())
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
