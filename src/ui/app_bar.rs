//! App bar rendering
//!
//! Draws a composed app bar: optional leading menu icon, title, then the
//! slots right-aligned in composition order.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Palette;
use crate::logic::app_bar::{AppBarSlot, ComposedAppBar};
use crate::model::ui::HitTarget;

/// Glyph of the overflow menu button
pub const OVERFLOW_ICON: &str = "⋮";

/// Glyph of the drawer menu button
pub const MENU_ICON: &str = "≡";

fn slot_parts(slot: &AppBarSlot, palette: &Palette) -> (String, Style, Option<HitTarget>) {
    match slot {
        AppBarSlot::Version(text) => (text.clone(), palette.muted().bg(palette.bar_bg), None),
        AppBarSlot::Action { id, icon, color, .. } => (
            icon.clone(),
            palette.bar().fg(color.unwrap_or(palette.bar_fg)),
            Some(HitTarget::Action(id.clone())),
        ),
        AppBarSlot::ThemeToggle { icon, .. } => {
            (icon.clone(), palette.bar(), Some(HitTarget::ThemeToggle))
        }
        AppBarSlot::OverflowButton(entry) => (
            entry.icon.clone(),
            palette.bar(),
            Some(HitTarget::OverflowButton(entry.id.as_str().to_string())),
        ),
        AppBarSlot::OverflowMenu(_) => (
            OVERFLOW_ICON.to_string(),
            palette.bar().add_modifier(Modifier::BOLD),
            Some(HitTarget::OverflowMenu),
        ),
        AppBarSlot::About { icon } => (icon.clone(), palette.bar(), Some(HitTarget::About)),
    }
}

/// Column where the overflow menu button was drawn, used to anchor the popup
pub fn overflow_anchor(hits: &[(Rect, HitTarget)]) -> Option<Rect> {
    hits.iter()
        .find(|(_, target)| *target == HitTarget::OverflowMenu)
        .map(|(rect, _)| *rect)
}

/// Render the app bar and record clickable regions into `hits`
pub fn render_app_bar(
    f: &mut Frame,
    area: Rect,
    bar: &ComposedAppBar,
    leading_menu: bool,
    palette: &Palette,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let base = match bar.background {
        Some(color) => palette.bar().bg(color),
        None => palette.bar(),
    };

    // Right-hand slots, laid out from the right edge
    let parts: Vec<(String, Style, Option<HitTarget>)> =
        bar.slots.iter().map(|s| slot_parts(s, palette)).collect();
    let slots_width: u16 = parts
        .iter()
        .map(|(text, _, _)| text.width() as u16 + 1)
        .sum::<u16>()
        .saturating_add(1);

    let mut spans = Vec::new();
    let mut used: u16 = 0;

    if leading_menu {
        spans.push(Span::styled(format!(" {} ", MENU_ICON), base.add_modifier(Modifier::BOLD)));
        used += 3;
    }

    let title_room = area.width.saturating_sub(used).saturating_sub(slots_width) as usize;
    let title = truncate(&format!(" {}", bar.title), title_room);
    used += title.width() as u16;
    spans.push(Span::styled(title, base.add_modifier(Modifier::BOLD)));

    let pad = area.width.saturating_sub(used).saturating_sub(slots_width);
    spans.push(Span::styled(" ".repeat(pad as usize), base));

    let mut x = area.x + used + pad;
    for (text, style, target) in parts {
        let w = text.width() as u16;
        if x + w + 1 > area.x + area.width {
            break;
        }
        spans.push(Span::styled(" ", base));
        x += 1;
        if let Some(target) = target {
            hits.push((Rect::new(x, area.y, w.max(1), 1), target));
        }
        spans.push(Span::styled(text, style));
        x += w;
    }
    spans.push(Span::styled(" ", base));

    f.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + c.to_string().width() + 1 > max {
            break;
        }
        out.push(c);
    }
    if max > 0 {
        out.push('…');
    }
    out
}
