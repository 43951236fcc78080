//! Day grid widget for one pager page.

use super::constants::DAY_MARKER;
use super::styles::{DayState, PickerStyles};
use crate::model::MonthFormatter;
use crate::state::{DayGridPager, Page};
use crate::view_state::grid_geometry::DAY_COLUMN_WIDTH;
use crate::view_state::GridGeometry;
use chrono::Datelike;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

/// Renders one [`Page`] of a [`DayGridPager`].
///
/// The pager supplies today's date and day marks; the page supplies the
/// grid, its cursor and selection.
#[derive(Debug)]
pub struct DayGridView<'a> {
    page: &'a Page,
    pager: &'a DayGridPager,
    formatter: &'a MonthFormatter,
    styles: &'a PickerStyles,
    focused: bool,
}

impl<'a> DayGridView<'a> {
    /// Widget for `page`.
    pub fn new(
        page: &'a Page,
        pager: &'a DayGridPager,
        formatter: &'a MonthFormatter,
        styles: &'a PickerStyles,
    ) -> Self {
        Self {
            page,
            pager,
            formatter,
            styles,
            focused: false,
        }
    }

    /// Show the keyboard cursor.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for DayGridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let grid = &self.page.grid;
        let weeks = grid.weeks();
        let geometry = GridGeometry::new(area, grid.show_header(), weeks.len());

        if let Some(row) = geometry.title_row() {
            let title = self.formatter.format(self.page.month);
            let width = title.width() as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            buf.set_stringn(x, row, &title, usize::from(area.width), self.styles.heading());
        }

        let header_row = geometry.weekday_row();
        if header_row < area.bottom() {
            for (column, weekday) in grid.weekday_order().into_iter().enumerate() {
                let x = geometry.left() + column as u16 * DAY_COLUMN_WIDTH + 1;
                if x >= area.right() {
                    break;
                }
                let label = self.formatter.weekday_label(weekday);
                let room = usize::from(area.right() - x);
                buf.set_stringn(x, header_row, &label, room.min(2), self.styles.heading());
            }
        }

        for (week, days) in weeks.iter().enumerate() {
            for (column, date) in days.iter().enumerate() {
                let (Some(date), Some(rect)) = (date, geometry.cell_rect(week, column)) else {
                    continue;
                };
                let state = DayState {
                    enabled: grid.contains(*date),
                    today: *date == self.pager.today(),
                    selected: grid.selected() == Some(*date),
                    cursor: self.focused && grid.cursor() == *date,
                };
                let number = format!("{:>3}", date.day());
                buf.set_stringn(
                    rect.x,
                    rect.y,
                    &number,
                    usize::from(rect.width),
                    self.styles.day(state),
                );
                if rect.width == DAY_COLUMN_WIDTH && self.pager.is_date_marked(*date) {
                    buf.set_string(rect.x + 3, rect.y, DAY_MARKER, self.styles.heading());
                }
            }
        }
    }
}
