//! Pager widget: the current page, or two pages sliding during a turn.

use super::day_grid::DayGridView;
use super::styles::PickerStyles;
use crate::model::MonthFormatter;
use crate::state::{DayGridPager, SwipeDirection, TransitionFrame};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

/// Renders a [`DayGridPager`].
#[derive(Debug)]
pub struct PagerView<'a> {
    pager: &'a DayGridPager,
    formatter: &'a MonthFormatter,
    styles: &'a PickerStyles,
    focused: bool,
}

impl<'a> PagerView<'a> {
    /// Widget for `pager`.
    pub fn new(
        pager: &'a DayGridPager,
        formatter: &'a MonthFormatter,
        styles: &'a PickerStyles,
    ) -> Self {
        Self {
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

    fn render_transition(&self, frame: &TransitionFrame<'_>, area: Rect, buf: &mut Buffer) {
        let mut outgoing = Buffer::empty(area);
        DayGridView::new(frame.outgoing, self.pager, self.formatter, self.styles)
            .render(area, &mut outgoing);
        let mut incoming = Buffer::empty(area);
        DayGridView::new(frame.incoming, self.pager, self.formatter, self.styles)
            .focused(self.focused)
            .render(area, &mut incoming);

        let width = area.width;
        let shift = ((frame.progress.clamp(0.0, 1.0) * f64::from(width)).round() as u16).min(width);
        for y in area.top()..area.bottom() {
            for column in 0..width {
                // Forward turns slide content left, reverse turns slide it right.
                let (source, source_column) = match frame.direction {
                    SwipeDirection::Forward if column + shift < width => (&outgoing, column + shift),
                    SwipeDirection::Forward => (&incoming, column + shift - width),
                    SwipeDirection::Reverse if column >= shift => (&outgoing, column - shift),
                    SwipeDirection::Reverse => (&incoming, column + width - shift),
                };
                let (Some(from), Some(to)) = (
                    source.cell((area.x + source_column, y)),
                    buf.cell_mut((area.x + column, y)),
                ) else {
                    continue;
                };
                *to = from.clone();
            }
        }
    }
}

impl Widget for PagerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if let Some(frame) = self.pager.transition_frame() {
            self.render_transition(&frame, area, buf);
            return;
        }
        if let Some(page) = self.pager.current_page() {
            DayGridView::new(page, self.pager, self.formatter, self.styles)
                .focused(self.focused)
                .render(area, buf);
        }
    }
}
