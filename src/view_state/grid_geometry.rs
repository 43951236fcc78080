//! Screen geometry of a day grid page, shared by rendering and hit-testing.
//!
//! ```text
//!          June 2024            <- title row (optional)
//!  Mo  Tu  We  Th  Fr  Sa  Su   <- weekday row
//!                       1   2   <- first week row
//! ```
//!
//! Each day occupies [`DAY_COLUMN_WIDTH`] columns: a right-aligned day
//! number followed by a one-column marker slot.

use ratatui::layout::Rect;

/// Columns per day cell.
pub const DAY_COLUMN_WIDTH: u16 = 4;

/// Columns of a full week.
pub const WEEK_WIDTH: u16 = DAY_COLUMN_WIDTH * 7;

/// Placement of a day grid inside a screen area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    area: Rect,
    left: u16,
    has_title: bool,
    weeks: usize,
}

impl GridGeometry {
    /// Center a grid of `weeks` rows horizontally in `area`.
    pub fn new(area: Rect, has_title: bool, weeks: usize) -> Self {
        let left = area.x + area.width.saturating_sub(WEEK_WIDTH) / 2;
        Self {
            area,
            left,
            has_title,
            weeks,
        }
    }

    /// Area the grid was placed in.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Leftmost column of the week rows.
    pub fn left(&self) -> u16 {
        self.left
    }

    /// Row of the month title, if the grid has one.
    pub fn title_row(&self) -> Option<u16> {
        self.has_title.then_some(self.area.y)
    }

    /// Row of the weekday header.
    pub fn weekday_row(&self) -> u16 {
        self.area.y + u16::from(self.has_title)
    }

    /// Row of week `week`, if it fits in the area.
    pub fn week_row(&self, week: usize) -> Option<u16> {
        if week >= self.weeks {
            return None;
        }
        let row = u32::from(self.weekday_row()) + 1 + week as u32;
        let row = u16::try_from(row).ok()?;
        (row < self.area.bottom()).then_some(row)
    }

    /// Screen rectangle of the day at (`week`, `column`), clipped to the area.
    pub fn cell_rect(&self, week: usize, column: usize) -> Option<Rect> {
        if column >= 7 {
            return None;
        }
        let y = self.week_row(week)?;
        let x = self.left + column as u16 * DAY_COLUMN_WIDTH;
        if x >= self.area.right() {
            return None;
        }
        let width = DAY_COLUMN_WIDTH.min(self.area.right() - x);
        Some(Rect::new(x, y, width, 1))
    }

    /// Day cell under a screen position, as (`week`, `column`).
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        if column < self.left || column >= self.left + WEEK_WIDTH || column >= self.area.right() {
            return None;
        }
        let first = self.weekday_row() + 1;
        if row < first || row >= self.area.bottom() {
            return None;
        }
        let week = usize::from(row - first);
        if week >= self.weeks {
            return None;
        }
        Some((week, usize::from((column - self.left) / DAY_COLUMN_WIDTH)))
    }

    /// Rows the full grid needs.
    pub fn required_height(has_title: bool, weeks: usize) -> u16 {
        u16::from(has_title) + 1 + weeks as u16
    }
}
