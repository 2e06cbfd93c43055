//! UI Model
//!
//! Dialogs, popups, toasts and the hit regions recorded by the last frame.

use std::collections::VecDeque;
use std::time::Instant;

use ratatui::layout::Rect;

use super::events::StatusKey;
use crate::logic::app_bar::OverflowEntry;
use crate::services::security_key::KeyPromptRequest;

/// A message pushed from background work to the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Toast(String),
    Alert { title: String, message: String },
}

pub type NoticeSender = tokio::sync::mpsc::UnboundedSender<Notice>;

/// Modal dialog currently on screen
#[derive(Debug)]
pub enum Dialog {
    About { title: String, lines: Vec<String> },
    /// Informational text attached to a tab
    Message { title: String, message: String },
    /// Failure surfaced at an operation boundary
    Alert { title: String, message: String },
    /// Passphrase entry requested by the security-key gate
    KeyPrompt {
        request: KeyPromptRequest,
        input: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowMenuState {
    pub entries: Vec<OverflowEntry>,
    pub selected: usize,
}

/// Clickable region recorded while rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Tab(usize),
    Hamburger,
    Action(String),
    ThemeToggle,
    OverflowButton(String),
    OverflowMenu,
    OverflowEntry(usize),
    About,
    Status(StatusKey),
}

#[derive(Debug, Default)]
pub struct UiModel {
    pub dialog: Option<Dialog>,
    pub overflow: Option<OverflowMenuState>,
    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,
    /// Horizontal scroll of the medium status bar row
    pub status_scroll: u16,
    pub hits: Vec<(Rect, HitTarget)>,
    /// Alerts (title, message) waiting behind a key prompt or another alert
    pub pending_alerts: VecDeque<(String, String)>,
}

impl UiModel {
    pub fn has_modal(&self) -> bool {
        self.dialog.is_some() || self.overflow.is_some()
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let (title, message) = (title.into(), message.into());
        // Neither a key prompt nor an earlier alert may be hidden by a new one
        if matches!(
            self.dialog,
            Some(Dialog::KeyPrompt { .. } | Dialog::Alert { .. })
        ) {
            log::debug!("alert queued behind open dialog: {}", title);
            self.pending_alerts.push_back((title, message));
            return;
        }
        self.dialog = Some(Dialog::Alert { title, message });
    }

    pub fn apply_notice(&mut self, notice: Notice) {
        match notice {
            Notice::Toast(message) => self.show_toast(message),
            Notice::Alert { title, message } => self.show_alert(title, message),
        }
    }

    /// Close the open dialog and bring up the next queued alert. A dismissed
    /// key prompt answers its request with a cancellation.
    pub fn close_dialog(&mut self) {
        if let Some(Dialog::KeyPrompt { request, .. }) = self.dialog.take() {
            request.cancel();
        }
        self.show_next_alert();
    }

    /// Answer the open key prompt with the typed passphrase
    pub fn submit_key_prompt(&mut self) {
        match self.dialog.take() {
            Some(Dialog::KeyPrompt { request, input }) => {
                request.submit(input);
                self.show_next_alert();
            }
            other => self.dialog = other,
        }
    }

    /// Replace the open dialog with a key prompt. An open alert goes back to
    /// the front of the queue.
    pub fn open_key_prompt(&mut self, request: KeyPromptRequest) {
        self.overflow = None;
        match self.dialog.take() {
            Some(Dialog::KeyPrompt { request, .. }) => request.cancel(),
            Some(Dialog::Alert { title, message }) => {
                self.pending_alerts.push_front((title, message))
            }
            _ => {}
        }
        self.dialog = Some(Dialog::KeyPrompt {
            request,
            input: String::new(),
        });
    }

    fn show_next_alert(&mut self) {
        if self.dialog.is_none() {
            if let Some((title, message)) = self.pending_alerts.pop_front() {
                self.dialog = Some(Dialog::Alert { title, message });
            }
        }
    }

    /// Last recorded target under the given cell
    pub fn hit_at(&self, column: u16, row: u16) -> Option<&HitTarget> {
        self.hits
            .iter()
            .rev()
            .find(|(rect, _)| {
                column >= rect.x
                    && column < rect.x.saturating_add(rect.width)
                    && row >= rect.y
                    && row < rect.y.saturating_add(rect.height)
            })
            .map(|(_, target)| target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_at_prefers_topmost_region() {
        let mut ui = UiModel::default();
        ui.hits.push((Rect::new(0, 0, 10, 10), HitTarget::Tab(0)));
        ui.hits.push((Rect::new(2, 2, 3, 1), HitTarget::About));

        assert_eq!(ui.hit_at(3, 2), Some(&HitTarget::About));
        assert_eq!(ui.hit_at(0, 0), Some(&HitTarget::Tab(0)));
        assert_eq!(ui.hit_at(20, 20), None);
    }

    #[test]
    fn test_notice_alert_opens_dialog() {
        let mut ui = UiModel::default();
        ui.apply_notice(Notice::Alert {
            title: "Upload failed".into(),
            message: "not logged in".into(),
        });
        assert!(matches!(ui.dialog, Some(Dialog::Alert { .. })));
        assert!(ui.has_modal());
    }

    fn prompt_request() -> (KeyPromptRequest, tokio::sync::oneshot::Receiver<Option<String>>) {
        KeyPromptRequest::pending(None)
    }

    fn alert(title: &str) -> Notice {
        Notice::Alert {
            title: title.into(),
            message: "details".into(),
        }
    }

    fn alert_title(ui: &UiModel) -> Option<&str> {
        match &ui.dialog {
            Some(Dialog::Alert { title, .. }) => Some(title.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_alert_waits_behind_key_prompt() {
        let mut ui = UiModel::default();
        let (request, mut answer) = prompt_request();
        ui.open_key_prompt(request);
        ui.apply_notice(alert("Delete failed"));
        assert!(matches!(ui.dialog, Some(Dialog::KeyPrompt { .. })));

        ui.close_dialog();
        assert_eq!(answer.try_recv(), Ok(None), "closing cancels the prompt");
        assert_eq!(alert_title(&ui), Some("Delete failed"));
    }

    #[test]
    fn test_alert_shown_after_prompt_submit() {
        let mut ui = UiModel::default();
        let (request, mut answer) = prompt_request();
        ui.open_key_prompt(request);
        ui.apply_notice(alert("Refresh failed"));
        if let Some(Dialog::KeyPrompt { input, .. }) = ui.dialog.as_mut() {
            input.push_str("secret");
        }

        ui.submit_key_prompt();
        assert_eq!(answer.try_recv(), Ok(Some("secret".to_string())));
        assert_eq!(alert_title(&ui), Some("Refresh failed"));
    }

    #[test]
    fn test_alerts_are_shown_in_order() {
        let mut ui = UiModel::default();
        ui.apply_notice(alert("first"));
        ui.apply_notice(alert("second"));
        assert_eq!(alert_title(&ui), Some("first"));

        // A prompt arriving over an alert puts the alert back in line
        let (request, _answer) = prompt_request();
        ui.open_key_prompt(request);
        ui.close_dialog();
        assert_eq!(alert_title(&ui), Some("first"));
        ui.close_dialog();
        assert_eq!(alert_title(&ui), Some("second"));
        ui.close_dialog();
        assert!(ui.dialog.is_none());
    }

    #[test]
    fn test_notice_toast() {
        let mut ui = UiModel::default();
        ui.apply_notice(Notice::Toast("Uploaded".into()));
        assert_eq!(ui.toast_message.as_ref().map(|(m, _)| m.as_str()), Some("Uploaded"));
        assert!(!ui.has_modal());
    }
}
