use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Palette;
use crate::model::ui::{Dialog, HitTarget, OverflowMenuState};

/// Center a `width` x `height` box inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_box(
    f: &mut Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line>,
    border: Style,
    palette: &Palette,
) {
    let longest = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let width = (longest + 4).max(title.width() as u16 + 6).clamp(24, 70);
    let height = lines.len() as u16 + 2;
    let dialog_area = centered_rect(area, width, height);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .border_style(border),
        )
        .style(palette.base())
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, dialog_area);
    f.render_widget(paragraph, dialog_area);
}

fn hint(palette: &Palette, keys: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys.to_string(), palette.hint_key()),
        Span::styled(format!(" {}", desc), palette.muted()),
    ])
    .alignment(Alignment::Right)
}

/// Render whichever modal dialog is open
pub fn render_dialog(f: &mut Frame, area: Rect, dialog: &Dialog, palette: &Palette) {
    match dialog {
        Dialog::About { title, lines } => {
            let mut body: Vec<Line> = lines
                .iter()
                .enumerate()
                .map(|(i, l)| {
                    if i == 0 {
                        Line::styled(l.clone(), palette.title())
                    } else {
                        Line::from(l.clone())
                    }
                })
                .collect();
            body.push(Line::from(""));
            body.push(hint(palette, "Enter/Esc", "close"));
            render_box(f, area, title, body, palette.border_style(true), palette);
        }
        Dialog::Message { title, message } => {
            let mut body: Vec<Line> = message.lines().map(|l| Line::from(l.to_string())).collect();
            body.push(Line::from(""));
            body.push(hint(palette, "Enter/Esc", "close"));
            render_box(f, area, title, body, palette.border_style(true), palette);
        }
        Dialog::Alert { title, message } => {
            let mut body: Vec<Line> = message
                .lines()
                .map(|l| Line::styled(l.to_string(), Style::default().fg(palette.error)))
                .collect();
            body.push(Line::from(""));
            body.push(hint(palette, "Enter/Esc", "dismiss"));
            render_box(f, area, title, body, Style::default().fg(palette.error), palette);
        }
        Dialog::KeyPrompt { request, input } => {
            let mut body = vec![
                Line::from("Enter your security key to access encrypted data."),
                Line::from(""),
            ];
            if let Some(error) = &request.error {
                body.push(Line::styled(error.clone(), Style::default().fg(palette.error)));
            }
            body.push(Line::from(vec![
                Span::styled("Key: ", palette.title()),
                Span::raw("•".repeat(input.chars().count())),
                Span::styled("▏", Style::default().fg(palette.highlight)),
            ]));
            body.push(Line::from(""));
            body.push(hint(palette, "Enter", "submit  Esc cancel"));
            render_box(
                f,
                area,
                "Security Key",
                body,
                Style::default().fg(palette.warning),
                palette,
            );
        }
    }
}

/// Render the overflow popup under its button and record one hit per entry
pub fn render_overflow_menu(
    f: &mut Frame,
    area: Rect,
    anchor: Option<Rect>,
    menu: &OverflowMenuState,
    palette: &Palette,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let labels: Vec<String> = menu
        .entries
        .iter()
        .map(|e| format!("{} {}", e.icon, e.label))
        .collect();
    let width = (labels.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 4)
        .max(16)
        .min(area.width);
    let height = (labels.len() as u16 + 2).min(area.height);

    let right = anchor.map_or(area.x + area.width, |a| (a.x + a.width + 1).min(area.x + area.width));
    let top = anchor.map_or(area.y, |a| a.y + 1);
    let popup = Rect {
        x: right.saturating_sub(width).max(area.x),
        y: top.min((area.y + area.height).saturating_sub(height)),
        width,
        height,
    };

    let items: Vec<ListItem> = labels
        .into_iter()
        .map(|l| ListItem::new(Span::styled(l, Style::default().fg(palette.fg))))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border_style(true))
                .style(palette.base()),
        )
        .highlight_style(palette.selected().add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(menu.selected));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);

    hits.push((popup, HitTarget::OverflowMenu));
    let inner_y = popup.y + 1;
    for i in 0..menu.entries.len() {
        let y = inner_y + i as u16;
        if y + 1 >= popup.y + popup.height {
            break;
        }
        hits.push((
            Rect::new(popup.x + 1, y, popup.width.saturating_sub(2), 1),
            HitTarget::OverflowEntry(i),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        assert_eq!(
            centered_rect(Rect::new(0, 0, 100, 40), 50, 10),
            Rect::new(25, 15, 50, 10)
        );
        assert_eq!(centered_rect(Rect::new(0, 0, 10, 5), 50, 10), Rect::new(0, 0, 10, 5));
    }
}
