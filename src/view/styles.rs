//! Picker styling.
//!
//! Month labels blend from the active colour at the strip center towards
//! the inactive colour at the edge of the active distance. Without colours
//! the same emphasis is expressed with modifiers only.

use super::constants::EMPHASIS_SCALE;
use crate::view_state::MonthCell;
use ratatui::style::{Color, Modifier, Style};

/// Dimmed text (hints, padding days).
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Help overlay section headers.
pub const SECTION_HEADER: Style = Style::new()
    .fg(Color::Magenta)
    .add_modifier(Modifier::BOLD);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on or off regardless of the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Day state =====

/// What a day cell shows, independent of how it is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayState {
    /// Inside the enabled range.
    pub enabled: bool,
    /// Today's date.
    pub today: bool,
    /// The selected date.
    pub selected: bool,
    /// Under the keyboard cursor while the grid has focus.
    pub cursor: bool,
}

// ===== PickerStyles =====

/// Styles for the strip, the day grid and the surrounding chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerStyles {
    active: Color,
    inactive: Color,
    colors: bool,
}

impl PickerStyles {
    /// Styles blending between `active` and `inactive`.
    pub fn new(active: Color, inactive: Color, config: ColorConfig) -> Self {
        Self {
            active,
            inactive,
            colors: config.colors_enabled(),
        }
    }

    /// Whether colours are in use.
    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    /// Style of a month cell title.
    pub fn month_title(&self, cell: &MonthCell) -> Style {
        let attributes = cell.attributes.as_ref();
        let emphasized = attributes.is_some_and(|a| a.scale >= EMPHASIS_SCALE);
        let mut style = Style::default();
        if self.colors {
            style = match attributes.and_then(|a| a.blend) {
                Some(blend) => style.fg(mix(self.active, self.inactive, blend)),
                None => style.fg(self.inactive),
            };
        } else if !emphasized {
            style = style.add_modifier(Modifier::DIM);
        }
        if emphasized || cell.selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    /// Style of a month cell subtitle.
    pub fn month_subtitle(&self) -> Style {
        if self.colors {
            Style::default().fg(self.inactive)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    }

    /// Style of a day number.
    pub fn day(&self, state: DayState) -> Style {
        let mut style = Style::default();
        if !state.enabled {
            return if self.colors {
                MUTED_TEXT
            } else {
                style.add_modifier(Modifier::DIM)
            };
        }
        if state.today {
            style = style.add_modifier(Modifier::UNDERLINED);
            if self.colors {
                style = style.fg(self.active);
            }
        }
        if state.selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if state.cursor {
            style = style.add_modifier(Modifier::BOLD);
            if self.colors && !state.selected {
                style = style.bg(Color::DarkGray);
            }
        }
        style
    }

    /// Style of a pane border.
    pub fn border(&self, focused: bool) -> Style {
        match (self.colors, focused) {
            (true, true) => Style::default().fg(self.active),
            (true, false) => Style::default().fg(self.inactive),
            (false, true) => Style::default().add_modifier(Modifier::BOLD),
            (false, false) => Style::default(),
        }
    }

    /// Style of weekday headers and titles.
    pub fn heading(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Style of hints and secondary text.
    pub fn muted(&self) -> Style {
        if self.colors {
            MUTED_TEXT
        } else {
            Style::default()
        }
    }
}

impl Default for PickerStyles {
    fn default() -> Self {
        Self::new(Color::Cyan, Color::DarkGray, ColorConfig::fixed(true))
    }
}

// ===== Colour mixing =====

/// Mix `from` towards `to` by `t` in `[0, 1]`.
///
/// Colours without a known RGB value switch over at the halfway point.
pub fn mix(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (rgb(from), rgb(to)) {
        (Some((r1, g1, b1)), Some((r2, g2, b2))) => {
            let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
            Color::Rgb(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

/// xterm default RGB values of the named colours.
fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    let value = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        _ => return None,
    };
    Some(value)
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::{CellAttributes, CellFrame};
    use serial_test::serial;

    fn cell(scale: f64, blend: Option<f64>) -> MonthCell {
        MonthCell {
            attributes: Some(CellAttributes {
                index: 0,
                frame: CellFrame { x: 0.0, width: 14.0 },
                scale,
                z_index: scale.round() as i32,
                blend,
            }),
            ..MonthCell::default()
        }
    }

    // ===== ColorConfig Tests =====

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(!config.colors_enabled(), "--no-color flag should disable colors");
    }

    #[test]
    #[serial(no_color)]
    fn color_config_no_color_env_any_value_disables() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(!config.colors_enabled(), "NO_COLOR with empty string should disable colors");
    }

    #[test]
    #[serial(no_color)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    // ===== Mixing =====

    #[test]
    fn mix_endpoints_and_midpoint() {
        let black = Color::Rgb(0, 0, 0);
        let white = Color::Rgb(255, 255, 255);
        assert_eq!(mix(black, white, 0.0), black);
        assert_eq!(mix(black, white, 1.0), white);
        assert_eq!(mix(black, white, 0.5), Color::Rgb(128, 128, 128));
        assert_eq!(mix(black, white, 7.0), white, "t is clamped");
    }

    #[test]
    fn mix_named_colours_through_rgb() {
        assert_eq!(mix(Color::Cyan, Color::DarkGray, 0.0), Color::Rgb(0, 205, 205));
    }

    #[test]
    fn mix_unknown_colours_switches_halfway() {
        let a = Color::Indexed(17);
        let b = Color::Reset;
        assert_eq!(mix(a, b, 0.4), a);
        assert_eq!(mix(a, b, 0.6), b);
    }

    // ===== Month titles =====

    #[test]
    fn centered_cell_is_bold_and_active() {
        let styles = PickerStyles::default();
        let style = styles.month_title(&cell(1.2, Some(0.0)));
        assert_eq!(style.fg, Some(Color::Rgb(0, 205, 205)));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn distant_cell_uses_inactive_colour() {
        let styles = PickerStyles::default();
        let style = styles.month_title(&cell(1.0, None));
        assert_eq!(style.fg, Some(Color::DarkGray));
        assert!(!style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn no_color_expresses_emphasis_with_modifiers() {
        let styles = PickerStyles::new(Color::Cyan, Color::DarkGray, ColorConfig::fixed(false));
        let centered = styles.month_title(&cell(1.2, Some(0.0)));
        let distant = styles.month_title(&cell(1.0, None));
        assert_eq!(centered.fg, None);
        assert!(centered.add_modifier.contains(Modifier::BOLD));
        assert!(distant.add_modifier.contains(Modifier::DIM));
    }

    // ===== Days =====

    #[test]
    fn day_styles_layer_modifiers() {
        let styles = PickerStyles::default();
        let today_selected = styles.day(DayState {
            enabled: true,
            today: true,
            selected: true,
            cursor: false,
        });
        assert!(today_selected.add_modifier.contains(Modifier::UNDERLINED));
        assert!(today_selected.add_modifier.contains(Modifier::REVERSED));

        let disabled = styles.day(DayState::default());
        assert_eq!(disabled, MUTED_TEXT);
    }
}
