//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard and mouse controls
//! grouped by category. Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::{MUTED_TEXT, SECTION_HEADER};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content())
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        MUTED_TEXT.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Rect with the given percentage of `area`'s width and height, centered.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn section(title: &'static str, entries: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let mut lines = vec![Line::from(Span::styled(title, SECTION_HEADER))];
    lines.extend(entries.iter().map(|(keys, description)| {
        Line::from(vec![
            Span::styled(format!("  {keys:<13}"), key_style),
            Span::styled(*description, desc_style),
        ])
    }));
    lines
}

/// Help content lines grouped by category.
fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = section(
        "Months (strip focused)",
        &[
            ("h/←", "Previous month"),
            ("l/→", "Next month"),
            ("t/Home", "Today"),
        ],
    );
    lines.push(Line::default());
    lines.extend(section(
        "Days (grid focused)",
        &[
            ("h/j/k/l", "Move day cursor"),
            ("Enter/Space", "Select day"),
            ("[/PgUp", "Previous page"),
            ("]/PgDn", "Next page"),
        ],
    ));
    lines.push(Line::default());
    lines.extend(section(
        "Mouse",
        &[
            ("Click", "Select month or day"),
            ("Drag", "Scroll months, release to snap"),
            ("Wheel", "Scroll months or turn pages"),
        ],
    ));
    lines.push(Line::default());
    lines.extend(section(
        "Application",
        &[
            ("Tab", "Switch focus"),
            ("?", "Toggle this help"),
            ("q/Ctrl+C", "Quit"),
        ],
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(render_help_overlay).unwrap();
        let buffer = terminal.backend().buffer();
        let area = buffer.area();
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn overlay_lists_sections_and_close_hint() {
        let text = rendered(80, 40);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Months (strip focused)"));
        assert!(text.contains("Select day"));
        assert!(text.contains("Press Esc or ? to close"));
    }

    #[test]
    fn centered_rect_uses_percentages() {
        let rect = centered_rect(70, 80, Rect::new(0, 0, 100, 50));
        assert_eq!(rect, Rect::new(15, 5, 70, 40));
    }
}
