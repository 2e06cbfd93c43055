//! Content views hosted by the scaffold

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::theme::Palette;

/// Something the scaffold can draw into its content area (or app bar/drawer
/// slot in compatibility mode)
pub trait View: Send + Sync {
    fn render(&self, f: &mut Frame, area: Rect, palette: &Palette);

    /// Offer a key to the view; return true when it was consumed
    fn handle_key(&self, _key: KeyEvent) -> bool {
        false
    }

    /// While true the view receives every key before the scaffold's own
    /// shortcuts (text entry)
    fn captures_input(&self) -> bool {
        false
    }
}

/// Static bordered text
#[derive(Debug, Clone)]
pub struct TextView {
    title: String,
    text: String,
}

impl TextView {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

impl View for TextView {
    fn render(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let widget = Paragraph::new(self.text.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title.as_str())
                    .border_style(Style::default().fg(palette.border)),
            )
            .style(Style::default().fg(palette.fg).bg(palette.bg))
            .wrap(Wrap { trim: false });
        f.render_widget(widget, area);
    }
}
