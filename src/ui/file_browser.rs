//! POD file browser view
//!
//! Lists the current remote directory and drives upload, download and
//! delete through a [`FileBrowser`]. Operations run as background tasks and
//! report back through the scaffold's notice channel: a toast on success, an
//! alert on failure.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crossterm::event::{KeyCode, KeyEvent};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::theme::Palette;
use super::view::View;
use crate::error::FileOpError;
use crate::logic::errors::format_error_message;
use crate::logic::filename::clean_file_name;
use crate::logic::ui::wrap_index;
use crate::model::ui::{Notice, NoticeSender};
use crate::services::files::FileBrowser;
use crate::services::storage::PodEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Parent,
    Dir(String),
    File(PodEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputPurpose {
    Upload,
    /// Download the named remote file
    Download(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PathInput {
    purpose: InputPurpose,
    text: String,
}

#[derive(Debug, Default)]
struct BrowserUi {
    cursor: usize,
    input: Option<PathInput>,
}

pub struct FileBrowserView {
    browser: FileBrowser,
    notices: NoticeSender,
    download_dir: PathBuf,
    ui: Mutex<BrowserUi>,
}

fn report<T>(notices: &NoticeSender, title: &str, result: Result<T, FileOpError>, ok: String) {
    let notice = match result {
        Ok(_) => Notice::Toast(ok),
        Err(e) => Notice::Alert {
            title: title.to_string(),
            message: format_error_message(&e),
        },
    };
    // The UI loop may already be gone at shutdown
    let _ = notices.send(notice);
}

impl FileBrowserView {
    pub fn new(browser: FileBrowser, notices: NoticeSender) -> Self {
        let download_dir = dirs::download_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            browser,
            notices,
            download_dir,
            ui: Mutex::new(BrowserUi::default()),
        }
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn browser(&self) -> &FileBrowser {
        &self.browser
    }

    fn ui(&self) -> MutexGuard<'_, BrowserUi> {
        self.ui.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task);
            }
            Err(e) => {
                warn!("file operation dropped, no runtime: {}", e);
                let _ = self.notices.send(Notice::Alert {
                    title: "File browser".to_string(),
                    message: "File operations need a running async runtime.".to_string(),
                });
            }
        }
    }

    fn rows(&self) -> Vec<Row> {
        let listing = self.browser.listing();
        let mut rows = Vec::new();
        if !self.browser.state().path.is_empty() {
            rows.push(Row::Parent);
        }
        rows.extend(listing.subdirectories.into_iter().map(Row::Dir));
        rows.extend(listing.files.into_iter().map(Row::File));
        rows
    }

    fn selected_row(&self) -> Option<Row> {
        let rows = self.rows();
        let cursor = self.ui().cursor;
        rows.get(cursor).cloned()
    }

    /// Reload the listing in the background
    pub fn refresh(&self) {
        let browser = self.browser.clone();
        let notices = self.notices.clone();
        self.spawn(async move {
            if let Err(e) = browser.refresh().await {
                report(&notices, "Could not list files", Err::<(), _>(e), String::new());
            }
        });
    }

    fn enter(&self, row: Row) {
        let browser = self.browser.clone();
        let notices = self.notices.clone();
        self.ui().cursor = 0;
        match row {
            Row::Parent => self.spawn(async move {
                if let Err(e) = browser.go_up().await {
                    report(&notices, "Could not open folder", Err::<(), _>(e), String::new());
                }
            }),
            Row::Dir(name) => self.spawn(async move {
                if let Err(e) = browser.enter_directory(&name).await {
                    report(&notices, "Could not open folder", Err::<(), _>(e), String::new());
                }
            }),
            Row::File(entry) => self.start_input(InputPurpose::Download(entry.name)),
        }
    }

    fn start_input(&self, purpose: InputPurpose) {
        let text = match &purpose {
            InputPurpose::Upload => String::new(),
            InputPurpose::Download(_) => self.download_dir.display().to_string(),
        };
        self.ui().input = Some(PathInput { purpose, text });
    }

    fn submit_input(&self, input: PathInput) {
        let browser = self.browser.clone();
        let notices = self.notices.clone();
        let path = PathBuf::from(input.text.trim());
        match input.purpose {
            InputPurpose::Upload => self.spawn(async move {
                let result = browser.upload(&path, None).await;
                let done = match &result {
                    Ok(remote) => format!("Uploaded {}", remote),
                    Err(_) => String::new(),
                };
                report(&notices, "Upload failed", result, done);
            }),
            InputPurpose::Download(name) => self.spawn(async move {
                let result = browser.download(&name, &path).await;
                let done = match &result {
                    Ok(local) => format!("Downloaded to {}", local.display()),
                    Err(_) => String::new(),
                };
                report(&notices, "Download failed", result, done);
            }),
        }
    }

    fn delete(&self, entry: PodEntry) {
        let browser = self.browser.clone();
        let notices = self.notices.clone();
        self.spawn(async move {
            let result = browser.delete(&entry.name).await;
            let done = format!("Deleted {}", clean_file_name(&entry.name));
            report(&notices, "Delete failed", result, done);
        });
    }

    fn handle_input_key(&self, key: KeyEvent) {
        let mut ui = self.ui();
        let Some(input) = ui.input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => input.text.push(c),
            KeyCode::Backspace => {
                input.text.pop();
            }
            KeyCode::Esc => ui.input = None,
            KeyCode::Enter => {
                if let Some(input) = ui.input.take() {
                    drop(ui);
                    if !input.text.trim().is_empty() {
                        self.submit_input(input);
                    }
                }
            }
            _ => {}
        }
    }

    fn render_status(&self, palette: &Palette) -> Vec<Line<'static>> {
        let state = self.browser.state();
        let mut lines = Vec::new();

        let mut flags = Vec::new();
        if state.uploading {
            flags.push(Span::styled("Uploading… ", Style::default().fg(palette.warning)));
        } else if state.upload_done {
            flags.push(Span::styled("Upload done ", Style::default().fg(palette.success)));
        }
        if state.downloading {
            flags.push(Span::styled("Downloading… ", Style::default().fg(palette.warning)));
        } else if state.download_done {
            flags.push(Span::styled("Download done ", Style::default().fg(palette.success)));
        }
        if state.deleting {
            flags.push(Span::styled("Deleting… ", Style::default().fg(palette.warning)));
        } else if state.delete_done {
            flags.push(Span::styled("Delete done ", Style::default().fg(palette.success)));
        }
        if !flags.is_empty() {
            lines.push(Line::from(flags));
        }

        if let Some(name) = &state.clean_file_name {
            lines.push(Line::from(vec![
                Span::styled("File: ", palette.title()),
                Span::raw(name.clone()),
            ]));
        }
        if let Some(url) = &state.remote_url {
            lines.push(Line::styled(url.clone(), palette.muted()));
        }
        if let Some(preview) = &state.preview {
            lines.extend(preview.lines().map(|l| Line::styled(l.to_string(), palette.muted())));
        }
        lines
    }
}

impl View for FileBrowserView {
    fn render(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let rows = self.rows();
        let (cursor, input) = {
            let mut ui = self.ui();
            if ui.cursor >= rows.len() {
                ui.cursor = rows.len().saturating_sub(1);
            }
            (ui.cursor, ui.input.clone())
        };

        let status = self.render_status(palette);
        let status_height = (status.len() as u16).min(area.height / 3);
        let input_height = if input.is_some() { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(status_height),
                Constraint::Length(input_height),
                Constraint::Length(1),
            ])
            .split(area);

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| match row {
                Row::Parent => ListItem::new(Span::styled("↩ ..", palette.muted())),
                Row::Dir(name) => ListItem::new(Span::styled(
                    format!("▸ {}/", name),
                    Style::default().fg(palette.highlight),
                )),
                Row::File(entry) => {
                    let size = entry.size.map(|s| format!("  {} B", s)).unwrap_or_default();
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("  {}", clean_file_name(&entry.name)), Style::default().fg(palette.fg)),
                        Span::styled(size, palette.muted()),
                    ]))
                }
            })
            .collect();

        let title = format!(" Files: /{} ", self.browser.current_dir());
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(palette.border_style(input.is_none())),
            )
            .style(palette.base())
            .highlight_style(palette.selected());

        let mut state = ListState::default();
        if !rows.is_empty() {
            state.select(Some(cursor));
        }
        f.render_stateful_widget(list, chunks[0], &mut state);

        if status_height > 0 {
            f.render_widget(
                Paragraph::new(status).style(palette.base()).wrap(Wrap { trim: false }),
                chunks[1],
            );
        }

        if let Some(input) = input {
            let label = match &input.purpose {
                InputPurpose::Upload => " Local file to upload ".to_string(),
                InputPurpose::Download(name) => {
                    format!(" Save {} to ", clean_file_name(name))
                }
            };
            let field = Paragraph::new(format!("{}▏", input.text))
                .style(palette.base())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(label)
                        .border_style(palette.border_style(true)),
                );
            f.render_widget(field, chunks[2]);
        }

        let hints = Line::from(vec![
            Span::styled("↑↓", palette.hint_key()),
            Span::styled(" move ", palette.muted()),
            Span::styled("Enter", palette.hint_key()),
            Span::styled(" open ", palette.muted()),
            Span::styled("u", palette.hint_key()),
            Span::styled(" upload ", palette.muted()),
            Span::styled("d", palette.hint_key()),
            Span::styled(" download ", palette.muted()),
            Span::styled("x", palette.hint_key()),
            Span::styled(" delete ", palette.muted()),
            Span::styled("r", palette.hint_key()),
            Span::styled(" refresh", palette.muted()),
        ]);
        f.render_widget(Paragraph::new(hints).style(palette.base()), chunks[3]);
    }

    fn handle_key(&self, key: KeyEvent) -> bool {
        if self.captures_input() {
            self.handle_input_key(key);
            return true;
        }

        let state = self.browser.state();
        let len = self.rows().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let mut ui = self.ui();
                ui.cursor = wrap_index(ui.cursor, -1, len);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let mut ui = self.ui();
                ui.cursor = wrap_index(ui.cursor, 1, len);
            }
            KeyCode::Enter => {
                if let Some(row) = self.selected_row() {
                    self.enter(row);
                }
            }
            KeyCode::Backspace | KeyCode::Left => {
                if !state.path.is_empty() {
                    self.enter(Row::Parent);
                }
            }
            KeyCode::Char('u') if state.can_upload() => self.start_input(InputPurpose::Upload),
            KeyCode::Char('d') if state.can_download() => match self.selected_row() {
                Some(Row::File(entry)) => self.start_input(InputPurpose::Download(entry.name)),
                _ => return false,
            },
            KeyCode::Char('x') | KeyCode::Delete if state.can_delete() => {
                match self.selected_row() {
                    Some(Row::File(entry)) => self.delete(entry),
                    _ => return false,
                }
            }
            KeyCode::Char('r') => self.refresh(),
            _ => return false,
        }
        true
    }

    fn captures_input(&self) -> bool {
        self.ui().input.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::local_pod::LocalPodStorage;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_upload_input_flow_reports_toast() {
        let pod = tempfile::tempdir().unwrap();
        let local = tempfile::tempdir().unwrap();
        let source = local.path().join("a.txt");
        std::fs::write(&source, "hi").unwrap();

        let browser = FileBrowser::new(Arc::new(LocalPodStorage::new(pod.path())), "data");
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let view = FileBrowserView::new(browser.clone(), tx);

        assert!(view.handle_key(key(KeyCode::Char('u'))));
        assert!(view.captures_input());
        for c in source.display().to_string().chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        view.handle_key(key(KeyCode::Enter));
        assert!(!view.captures_input());

        let notice = rx.recv().await.unwrap();
        assert_eq!(notice, Notice::Toast("Uploaded data/a.txt.enc.ttl".into()));
        assert_eq!(browser.listing().files.len(), 1);
    }

    #[tokio::test]
    async fn test_escape_cancels_input() {
        let pod = tempfile::tempdir().unwrap();
        let browser = FileBrowser::new(Arc::new(LocalPodStorage::new(pod.path())), "data");
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let view = FileBrowserView::new(browser, tx);

        view.handle_key(key(KeyCode::Char('u')));
        view.handle_key(key(KeyCode::Esc));
        assert!(!view.captures_input());
    }

    #[tokio::test]
    async fn test_refresh_failure_raises_alert() {
        let pod = tempfile::tempdir().unwrap();
        let browser = FileBrowser::new(Arc::new(LocalPodStorage::new(pod.path())), "missing");
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let view = FileBrowserView::new(browser, tx);

        view.refresh();
        assert!(matches!(rx.recv().await, Some(Notice::Alert { .. })));
    }
}
