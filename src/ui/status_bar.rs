use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Palette;
use crate::logic::status_bar::{ComposedStatusBar, StatusEntry, StatusLayout};
use crate::model::ui::HitTarget;

const SEPARATOR: &str = " │ ";

fn entry_style(entry: &StatusEntry, palette: &Palette) -> Style {
    if entry.warn {
        palette.bar().fg(palette.warning).add_modifier(Modifier::BOLD)
    } else {
        palette.bar()
    }
}

/// Lay entries out on one row starting at `x`, shifted left by `scroll`.
/// Returns the spans and records the hit region of each visible entry.
fn row_spans<'a>(
    entries: &'a [StatusEntry],
    row: Rect,
    start_x: u16,
    scroll: u16,
    palette: &Palette,
    hits: &mut Vec<(Rect, HitTarget)>,
) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    // Position in unscrolled row coordinates
    let mut pos: u16 = 0;
    let right = row.x + row.width;
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, palette.bar().fg(palette.muted)));
            pos = pos.saturating_add(SEPARATOR.width() as u16);
        }
        let w = entry.text.width() as u16;
        if pos + w > scroll {
            let x = (start_x + pos).saturating_sub(scroll).max(start_x);
            let visible = (start_x + pos + w).saturating_sub(scroll).min(right).saturating_sub(x);
            if visible > 0 {
                hits.push((
                    Rect::new(x, row.y, visible, 1),
                    HitTarget::Status(entry.key.clone()),
                ));
            }
        }
        spans.push(Span::styled(entry.text.as_str(), entry_style(entry, palette)));
        pos = pos.saturating_add(w);
    }
    spans
}

/// Total width of entries joined with separators
pub fn row_width(entries: &[StatusEntry]) -> u16 {
    let text: u16 = entries.iter().map(|e| e.text.width() as u16).sum();
    let seps = entries.len().saturating_sub(1) as u16 * SEPARATOR.width() as u16;
    text + seps
}

/// Largest useful horizontal scroll for the medium layout's second row
pub fn max_scroll(bar: &ComposedStatusBar, columns: u16) -> u16 {
    row_width(bar.trailing_entries()).saturating_sub(columns.saturating_sub(2))
}

/// Render the bottom status bar
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    bar: &ComposedStatusBar,
    scroll: u16,
    palette: &Palette,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    f.render_widget(Paragraph::new("").style(palette.bar()), area);
    if area.height == 0 || area.width < 2 {
        return;
    }
    let inner = Rect::new(area.x + 1, area.y, area.width - 2, area.height);

    match bar.layout {
        StatusLayout::Narrow => {
            for (i, entry) in bar.entries.iter().enumerate().take(inner.height as usize) {
                let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
                let spans = row_spans(std::slice::from_ref(entry), row, row.x, 0, palette, hits);
                f.render_widget(Paragraph::new(Line::from(spans)), row);
            }
        }
        StatusLayout::Medium => {
            let mut y = inner.y;
            if let Some(server) = bar.server_entry() {
                let row = Rect::new(inner.x, y, inner.width, 1);
                let spans = row_spans(std::slice::from_ref(server), row, row.x, 0, palette, hits);
                f.render_widget(Paragraph::new(Line::from(spans)), row);
                y += 1;
            }
            if y < inner.y + inner.height {
                let row = Rect::new(inner.x, y, inner.width, 1);
                let scroll = scroll.min(max_scroll(bar, area.width));
                let spans = row_spans(bar.trailing_entries(), row, row.x, scroll, palette, hits);
                f.render_widget(Paragraph::new(Line::from(spans)).scroll((0, scroll)), row);
            }
        }
        StatusLayout::Wide => {
            let row = Rect::new(inner.x, inner.y, inner.width, 1);
            if let Some(server) = bar.server_entry() {
                let spans = row_spans(std::slice::from_ref(server), row, row.x, 0, palette, hits);
                f.render_widget(Paragraph::new(Line::from(spans)), row);
            }
            let trailing = bar.trailing_entries();
            let width = row_width(trailing).min(row.width);
            let right = Rect::new(row.x + row.width - width, row.y, width, 1);
            let spans = row_spans(trailing, right, right.x, 0, palette, hits);
            f.render_widget(Paragraph::new(Line::from(spans)), right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::status_bar::compose_status_bar;
    use crate::model::events::StatusKey;
    use crate::model::{LoginStatus, ServerInfo, StatusBarConfig};
    use ratatui::{backend::TestBackend, Terminal};

    fn config() -> StatusBarConfig {
        StatusBarConfig::new()
            .server(ServerInfo::new("https://pod.example"))
            .login(LoginStatus::logged_in("https://me.example/card#me"))
    }

    fn draw(width: u16, height: u16, logical: u16) -> (Terminal<TestBackend>, Vec<(Rect, HitTarget)>) {
        let bar = compose_status_bar(&config(), logical).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut hits = Vec::new();
        terminal
            .draw(|f| render_status_bar(f, f.area(), &bar, 0, &Palette::dark(), &mut hits))
            .unwrap();
        (terminal, hits)
    }

    #[test]
    fn test_wide_puts_server_left_and_rest_right() {
        let (_, hits) = draw(120, 1, 960);
        assert_eq!(hits[0].1, HitTarget::Status(StatusKey::ServerInfo));
        assert_eq!(hits[0].0.x, 1);
        let login = &hits[1].0;
        assert_eq!(login.x + login.width, 119);
    }

    #[test]
    fn test_narrow_stacks_entries() {
        let (_, hits) = draw(70, 4, 560);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0.y, 0);
        assert_eq!(hits[1].0.y, 1);
    }

    #[test]
    fn test_medium_uses_two_rows() {
        let (_, hits) = draw(90, 2, 720);
        assert_eq!(hits[0].0.y, 0);
        assert_eq!(hits[1].0.y, 1);
        assert_eq!(hits[1].1, HitTarget::Status(StatusKey::Login));
    }
}
