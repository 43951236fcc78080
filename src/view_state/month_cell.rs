//! Display state of one month strip cell.

use super::cell_pool::ReusableCell;
use super::snap_layout::CellAttributes;
use crate::model::Month;
use ratatui::text::Line;

/// Reuse identifier for month cells.
pub const MONTH_CELL_IDENTIFIER: &str = "MonthCell";

/// A recyclable month cell.
///
/// Everything here is per-binding state and is cleared on reuse.
#[derive(Debug, Clone, Default)]
pub struct MonthCell {
    /// Month currently bound.
    pub month: Option<Month>,
    /// Title line (formatted label or delegate-supplied styled line).
    pub title: Line<'static>,
    /// Optional delegate-supplied subtitle.
    pub subtitle: Option<String>,
    /// Reserved margin cells are laid out but not drawn.
    pub hidden: bool,
    /// Whether the bound month is the selected month.
    pub selected: bool,
    /// Layout attributes from the last pass.
    pub attributes: Option<CellAttributes>,
}

impl ReusableCell for MonthCell {
    fn reuse_identifier(&self) -> &'static str {
        MONTH_CELL_IDENTIFIER
    }

    fn prepare_for_reuse(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_for_reuse_clears_binding() {
        let mut cell = MonthCell {
            month: Month::from_ymd(2024, 6),
            title: Line::from("June 2024"),
            subtitle: Some("3 trips".into()),
            hidden: true,
            selected: true,
            attributes: None,
        };
        cell.prepare_for_reuse();
        assert!(cell.month.is_none());
        assert!(cell.subtitle.is_none());
        assert!(!cell.hidden && !cell.selected);
        assert_eq!(cell.title.width(), 0);
    }
}
