//! Layout dimension and timing constants for TUI rendering.
//!
//! Centralized location for layout-related numeric values to enable
//! consistent tuning across the application.

use std::time::Duration;

/// Height of the title bar in lines.
pub const TITLE_BAR_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for the selection summary and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Poll timeout while an animation is running (about 60 frames per second).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Poll timeout while idle. Nothing redraws on timeout when idle.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Marker drawn above the strip's viewport center.
pub const CENTER_MARKER: &str = "▾";

/// Marker drawn after a day the data source marks.
pub const DAY_MARKER: &str = "•";

/// Cell scale from which a month label is drawn bold.
pub const EMPHASIS_SCALE: f64 = 1.1;
