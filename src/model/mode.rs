//! Which picker surfaces the application shows.

use serde::Deserialize;
use std::fmt;

/// Picker surface selection.
///
/// Set from the `mode` config key or the `--mode` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PickerMode {
    /// Month strip above the day-grid pager.
    #[default]
    Combined,
    /// Month strip only, with a label for the selected month.
    MonthOnly,
    /// Day-grid pager only, with month and selected-day labels.
    PagerOnly,
}

impl PickerMode {
    /// Whether the month strip is on screen.
    pub fn shows_strip(self) -> bool {
        matches!(self, PickerMode::Combined | PickerMode::MonthOnly)
    }

    /// Whether the day grid is on screen.
    pub fn shows_grid(self) -> bool {
        matches!(self, PickerMode::Combined | PickerMode::PagerOnly)
    }
}

impl fmt::Display for PickerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PickerMode::Combined => "combined",
            PickerMode::MonthOnly => "month-only",
            PickerMode::PagerOnly => "pager-only",
        };
        f.write_str(name)
    }
}
