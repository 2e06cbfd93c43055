use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Palette;

/// Message width plus icon and borders, clamped to `max_width`
fn toast_width(message: &str, max_width: u16) -> u16 {
    u16::try_from(message.width())
        .unwrap_or(u16::MAX)
        .saturating_add(6)
        .min(max_width)
}

/// Render a toast notification (brief pop-up message) near the bottom of
/// `area`
pub fn render_toast(f: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let max_width = area.width.min(60);
    let toast_width = toast_width(message, max_width);
    let toast_height = 3.min(area.height);

    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(toast_width) / 2,
        y: area.y + area.height.saturating_sub(toast_height + 1),
        width: toast_width,
        height: toast_height,
    };

    // Clear the area first to prevent background bleed-through
    f.render_widget(Clear, toast_area);

    let toast_line = Line::from(vec![
        Span::styled(
            "✓ ",
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, Style::default().fg(palette.fg)),
    ]);

    let toast_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.success).add_modifier(Modifier::BOLD))
        .style(palette.base());

    let toast_text = Paragraph::new(vec![toast_line])
        .block(toast_block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(toast_text, toast_area);
}
