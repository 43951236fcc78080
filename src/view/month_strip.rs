//! Month strip widget.
//!
//! Draws the cells bound by the strip's last layout pass at their scrolled
//! positions. Cells partly outside the viewport are clipped column by column.

use super::constants::CENTER_MARKER;
use super::styles::PickerStyles;
use crate::state::MonthStrip;
use crate::view_state::MonthCell;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

/// Renders a [`MonthStrip`] into an area whose width is the strip viewport.
#[derive(Debug)]
pub struct MonthStripView<'a> {
    strip: &'a MonthStrip,
    styles: &'a PickerStyles,
    focused: bool,
}

impl<'a> MonthStripView<'a> {
    /// Widget for `strip`.
    pub fn new(strip: &'a MonthStrip, styles: &'a PickerStyles) -> Self {
        Self {
            strip,
            styles,
            focused: false,
        }
    }

    /// Highlight the center marker.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Row assignment for the available height.
struct Rows {
    marker: Option<u16>,
    title: u16,
    subtitle: Option<u16>,
}

impl Rows {
    fn for_area(area: Rect) -> Self {
        match area.height {
            0 | 1 => Rows {
                marker: None,
                title: area.y,
                subtitle: None,
            },
            2 => Rows {
                marker: None,
                title: area.y,
                subtitle: Some(area.y + 1),
            },
            _ => Rows {
                marker: Some(area.y),
                title: area.y + 1,
                subtitle: Some(area.y + 2),
            },
        }
    }
}

impl Widget for MonthStripView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let rows = Rows::for_area(area);

        if let Some(row) = rows.marker {
            let style = if self.focused {
                self.styles.border(true)
            } else {
                self.styles.muted()
            };
            buf.set_string(area.x + area.width / 2, row, CENTER_MARKER, style);
        }

        let offset = self.strip.offset();
        let item_width = self.strip.layout().item_width().round() as i32;
        for cell in self.strip.visible_cells() {
            if cell.hidden {
                continue;
            }
            let Some(attributes) = cell.attributes.as_ref() else {
                continue;
            };
            let left = i32::from(area.x) + (attributes.frame.x - offset).round() as i32;
            draw_title(buf, area, rows.title, left, item_width, cell, self.styles);
            if let (Some(row), Some(subtitle)) = (rows.subtitle, cell.subtitle.as_deref()) {
                let line = Line::from(subtitle);
                let style = self.styles.month_subtitle();
                put_centered(buf, area, row, left, item_width, &line, style);
            }
        }
    }
}

fn draw_title(
    buf: &mut Buffer,
    area: Rect,
    row: u16,
    left: i32,
    width: i32,
    cell: &MonthCell,
    styles: &PickerStyles,
) {
    let style = styles.month_title(cell);
    put_centered(buf, area, row, left, width, &cell.title, style);
}

/// Write `line` centered in `[left, left + width)`, truncated to that span
/// and clipped to `area`. Span styles are patched over `base`.
fn put_centered(
    buf: &mut Buffer,
    area: Rect,
    row: u16,
    left: i32,
    width: i32,
    line: &Line<'_>,
    base: Style,
) {
    let text_width = line.width() as i32;
    let start = left + ((width - text_width) / 2).max(0);
    let end = left + width;
    let mut x = start;
    for span in &line.spans {
        let style = base.patch(span.style);
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if x + w > end {
                return;
            }
            put_char(buf, area, row, x, w, ch, style);
            x += w;
        }
    }
}

fn put_char(buf: &mut Buffer, area: Rect, row: u16, x: i32, w: i32, ch: char, style: Style) {
    let min = i32::from(area.x);
    let max = i32::from(area.right());
    if x < min || x + w > max {
        return;
    }
    let Ok(col) = u16::try_from(x) else {
        return;
    };
    if let Some(cell) = buf.cell_mut((col, row)) {
        cell.set_char(ch).set_style(style);
    }
    for extra in 1..w {
        if let Some(cell) = buf.cell_mut((col + extra as u16, row)) {
            cell.reset();
        }
    }
}
