//! Navigation rail and drawer

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use super::theme::Palette;
use crate::model::ui::HitTarget;
use crate::model::MenuItem;

fn menu_items<'a>(menu: &'a [MenuItem], palette: &Palette) -> Vec<ListItem<'a>> {
    menu.iter()
        .map(|item| {
            let icon_style = Style::default().fg(item.color.unwrap_or(palette.highlight));
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", item.icon), icon_style),
                Span::styled(item.title.as_str(), Style::default().fg(palette.fg)),
            ]))
        })
        .collect()
}

/// Record one Tab hit per visible row inside `inner`
fn record_rows(inner: Rect, count: usize, offset: usize, hits: &mut Vec<(Rect, HitTarget)>) {
    for row in 0..inner.height {
        let index = offset + row as usize;
        if index >= count {
            break;
        }
        hits.push((
            Rect::new(inner.x, inner.y + row, inner.width, 1),
            HitTarget::Tab(index),
        ));
    }
}

/// Render the wide-layout navigation rail
pub fn render_rail(
    f: &mut Frame,
    area: Rect,
    menu: &[MenuItem],
    selected: usize,
    palette: &Palette,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(palette.border_style(false))
        .style(palette.base());
    let inner = block.inner(area);

    let list = List::new(menu_items(menu, palette))
        .block(block)
        .highlight_style(palette.selected());

    let mut state = ListState::default();
    if selected < menu.len() {
        state.select(Some(selected));
    }
    f.render_stateful_widget(list, area, &mut state);
    record_rows(inner, menu.len(), state.offset(), hits);
}

/// Render the drawer overlay (narrow layout)
pub fn render_drawer(
    f: &mut Frame,
    area: Rect,
    menu: &[MenuItem],
    cursor: usize,
    selected: usize,
    palette: &Palette,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Menu ")
        .border_style(palette.border_style(true))
        .style(palette.base());
    let inner = block.inner(area);

    let items: Vec<ListItem> = menu_items(menu, palette)
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if i == selected {
                item.style(palette.title())
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.selected())
        .highlight_symbol("► ");

    let mut state = ListState::default();
    if !menu.is_empty() {
        state.select(Some(cursor.min(menu.len() - 1)));
    }

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
    record_rows(inner, menu.len(), state.offset(), hits);
}
