//! Responsive scaffold
//!
//! Composes app bar, navigation, content and status bar for the current
//! terminal width:
//!
//! - no menu: compatibility mode (plain body, optional drawer view)
//! - menu and width above the narrow threshold: navigation rail
//! - menu and width at or below it: drawer behind a menu button
//!
//! The scaffold itself is immutable; per-frame state lives in
//! [`ScaffoldState`], which the host owns and passes to `render` and the
//! input handlers.

use std::sync::Arc;

use log::debug;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::Span,
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::app_bar::{overflow_anchor, render_app_bar, MENU_ICON};
use super::dialogs::{render_dialog, render_overflow_menu};
use super::layout::{calculate_layout, LayoutRequest, MENU_BUTTON_WIDTH};
use super::nav::{render_drawer, render_rail};
use super::status_bar::{max_scroll, render_status_bar};
use super::theme::Palette;
use super::toast::render_toast;
use super::view::View;
use crate::error::{PreferenceError, ScaffoldError};
use crate::logic::app_bar::{compose_app_bar, dispatch_overflow, ComposedAppBar, OverflowCommand};
use crate::logic::layout::{
    drawer_width, logical_width, rail_width, resolve_layout_mode, LayoutMode, DEFAULT_CELL_WIDTH,
};
use crate::logic::status_bar::{compose_status_bar, ComposedStatusBar};
use crate::logic::ui::should_dismiss_toast;
use crate::model::app_bar::DEFAULT_NARROW_THRESHOLD;
use crate::model::menu::item_at;
use crate::model::ui::{HitTarget, OverflowMenuState};
use crate::model::{
    AppBarConfig, Dialog, FrameInfo, MenuItem, ScaffoldEvent, ScaffoldState, StatusBarConfig,
    StatusKey, ThemeControl, ThemeMode,
};
use crate::services::security_key::SecurityKeyGate;
use crate::services::theme::ThemeController;

pub struct Scaffold {
    menu: Vec<MenuItem>,
    app_bar: Option<AppBarConfig>,
    plain_app_bar: Option<Arc<dyn View>>,
    body: Option<Arc<dyn View>>,
    drawer: Option<Arc<dyn View>>,
    status_bar: Option<StatusBarConfig>,
    theme: Option<ThemeController>,
    key_gate: Option<SecurityKeyGate>,
    narrow_threshold: u16,
    cell_width: u16,
}

#[derive(Default)]
pub struct ScaffoldBuilder {
    menu: Option<Vec<MenuItem>>,
    app_bar: Option<AppBarConfig>,
    scaffold_app_bar: Option<Arc<dyn View>>,
    child: Option<Arc<dyn View>>,
    body: Option<Arc<dyn View>>,
    drawer: Option<Arc<dyn View>>,
    status_bar: Option<StatusBarConfig>,
    theme: Option<ThemeController>,
    key_gate: Option<SecurityKeyGate>,
    narrow_threshold: Option<u16>,
    cell_width: Option<u16>,
}

impl ScaffoldBuilder {
    /// Navigation destinations. An empty list counts as no menu.
    pub fn menu(mut self, menu: Vec<MenuItem>) -> Self {
        self.menu = Some(menu);
        self
    }

    pub fn app_bar(mut self, config: AppBarConfig) -> Self {
        self.app_bar = Some(config);
        self
    }

    /// Plain app bar view; ignored when an [`AppBarConfig`] is also set
    pub fn scaffold_app_bar(mut self, view: Arc<dyn View>) -> Self {
        self.scaffold_app_bar = Some(view);
        self
    }

    /// Compatibility-mode content. Mutually exclusive with `body`.
    pub fn child(mut self, view: Arc<dyn View>) -> Self {
        self.child = Some(view);
        self
    }

    /// Compatibility-mode content. Mutually exclusive with `child`.
    pub fn body(mut self, view: Arc<dyn View>) -> Self {
        self.body = Some(view);
        self
    }

    /// Compatibility-mode drawer view
    pub fn drawer(mut self, view: Arc<dyn View>) -> Self {
        self.drawer = Some(view);
        self
    }

    pub fn status_bar(mut self, config: StatusBarConfig) -> Self {
        self.status_bar = Some(config);
        self
    }

    pub fn theme_controller(mut self, controller: ThemeController) -> Self {
        self.theme = Some(controller);
        self
    }

    /// Gate whose state drives the security key status entry
    pub fn security_key_gate(mut self, gate: SecurityKeyGate) -> Self {
        self.key_gate = Some(gate);
        self
    }

    /// Rail/drawer switch point in logical px; defaults to the app bar's
    /// narrow breakpoint
    pub fn narrow_threshold(mut self, width: u16) -> Self {
        self.narrow_threshold = Some(width);
        self
    }

    /// Logical pixels per terminal column
    pub fn cell_width(mut self, px: u16) -> Self {
        self.cell_width = Some(px);
        self
    }

    pub fn build(self) -> Result<Scaffold, ScaffoldError> {
        if self.child.is_some() && self.body.is_some() {
            return Err(ScaffoldError::ConflictingFields("child", "body"));
        }
        if let Some(config) = &self.app_bar {
            config.validate()?;
            if self.scaffold_app_bar.is_some() {
                debug!("app bar config supplied alongside a plain app bar; using the config");
            }
        }

        let narrow_threshold = self
            .narrow_threshold
            .or_else(|| self.app_bar.as_ref().map(|c| c.breakpoints.narrow))
            .unwrap_or(DEFAULT_NARROW_THRESHOLD);

        Ok(Scaffold {
            menu: self.menu.unwrap_or_default(),
            plain_app_bar: if self.app_bar.is_some() {
                None
            } else {
                self.scaffold_app_bar
            },
            app_bar: self.app_bar,
            body: self.child.or(self.body),
            drawer: self.drawer,
            status_bar: self.status_bar,
            theme: self.theme,
            key_gate: self.key_gate,
            narrow_threshold,
            cell_width: self.cell_width.unwrap_or(DEFAULT_CELL_WIDTH).max(1),
        })
    }
}

impl Scaffold {
    pub fn builder() -> ScaffoldBuilder {
        ScaffoldBuilder::default()
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    pub fn has_menu(&self) -> bool {
        !self.menu.is_empty()
    }

    pub fn app_bar_config(&self) -> Option<&AppBarConfig> {
        self.app_bar.as_ref()
    }

    pub fn theme_controller(&self) -> Option<&ThemeController> {
        self.theme.as_ref()
    }

    pub fn logical_width(&self, columns: u16) -> u16 {
        logical_width(columns, self.cell_width)
    }

    pub fn layout_mode(&self, columns: u16) -> LayoutMode {
        resolve_layout_mode(self.logical_width(columns), self.has_menu(), self.narrow_threshold)
    }

    /// Mode held by the managed controller (`System` without one)
    pub fn managed_theme_mode(&self) -> ThemeMode {
        self.theme.as_ref().map(ThemeController::mode).unwrap_or_default()
    }

    /// Mode the UI is drawn in, honouring external theme control
    pub fn display_theme_mode(&self) -> ThemeMode {
        let managed = self.managed_theme_mode();
        match self.app_bar.as_ref().and_then(|c| c.theme.as_ref()) {
            Some(toggle) => toggle.control.mode_or(managed),
            None => managed,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.display_theme_mode())
    }

    pub fn compose_app_bar(&self, width: u16) -> Option<ComposedAppBar> {
        self.app_bar
            .as_ref()
            .map(|config| compose_app_bar(config, width, self.managed_theme_mode()))
    }

    /// Compose the status bar with the security key entry synced from the gate
    pub fn compose_status_bar(&self, width: u16) -> Option<ComposedStatusBar> {
        let config = self.status_bar.as_ref()?;
        match (&self.key_gate, &config.security_key_status) {
            (Some(gate), Some(status)) => {
                let synced = StatusBarConfig {
                    security_key_status: Some(status.synced(gate.state())),
                    ..config.clone()
                };
                compose_status_bar(&synced, width)
            }
            _ => compose_status_bar(config, width),
        }
    }

    /// View shown in the content area; `None` for an out-of-range tab
    pub fn content_view(&self, state: &ScaffoldState) -> Option<&Arc<dyn View>> {
        if self.has_menu() {
            item_at(&self.menu, state.selected_index()).and_then(|item| item.content.as_ref())
        } else {
            self.body.as_ref()
        }
    }

    /// Whether the content view currently wants every key (text entry)
    pub fn is_capturing_input(&self, state: &ScaffoldState) -> bool {
        self.content_view(state).is_some_and(|v| v.captures_input())
    }

    fn drawer_available(&self, state: &ScaffoldState) -> bool {
        match state.frame.mode {
            Some(LayoutMode::Narrow) => true,
            Some(LayoutMode::Compatibility) => self.drawer.is_some(),
            Some(LayoutMode::Wide) | None => false,
        }
    }

    /// Draw one frame and record what input handling needs to know about it
    pub fn render(&self, f: &mut Frame, state: &mut ScaffoldState) {
        let area = f.area();
        let width = self.logical_width(area.width);
        let mode = resolve_layout_mode(width, self.has_menu(), self.narrow_threshold);
        if mode == LayoutMode::Wide && state.navigation.drawer_open {
            state.navigation.close_drawer();
        }

        let palette = self.palette();
        let app_bar = self.compose_app_bar(width);
        let status_bar = match mode {
            LayoutMode::Compatibility => None,
            _ => self.compose_status_bar(width),
        };
        if let Some(bar) = &status_bar {
            state.ui.status_scroll = state.ui.status_scroll.min(max_scroll(bar, area.width));
        }

        let labels: Vec<String> = self.menu.iter().map(MenuItem::label).collect();
        let layout = calculate_layout(
            area,
            LayoutRequest {
                mode,
                has_app_bar: app_bar.is_some() || self.plain_app_bar.is_some(),
                status_height: status_bar.as_ref().map(|s| s.height),
                rail_width: rail_width(&labels, area.width),
                drawer_width: drawer_width(area.width),
                drawer_open: state.navigation.drawer_open,
                has_drawer_view: self.drawer.is_some(),
            },
        );

        let mut hits = Vec::new();
        f.render_widget(Block::default().style(palette.base()), area);

        if let Some(bar_area) = layout.app_bar {
            let leading = layout.leading_menu_icon.is_some();
            match (&app_bar, &self.plain_app_bar) {
                (Some(bar), _) => render_app_bar(f, bar_area, bar, leading, &palette, &mut hits),
                (None, Some(view)) => {
                    let offset = if leading { MENU_BUTTON_WIDTH.min(bar_area.width) } else { 0 };
                    let view_area = Rect {
                        x: bar_area.x + offset,
                        width: bar_area.width - offset,
                        ..bar_area
                    };
                    f.render_widget(Block::default().style(palette.bar()), bar_area);
                    view.render(f, view_area, &palette);
                    if let Some(icon) = layout.leading_menu_icon {
                        render_menu_button(f, icon, &palette);
                    }
                }
                (None, None) => {}
            }
        }
        if let Some(icon) = layout.leading_menu_icon {
            hits.push((icon, HitTarget::Hamburger));
        }

        if let Some(rail) = layout.rail {
            render_rail(f, rail, &self.menu, state.selected_index(), &palette, &mut hits);
        }

        if let Some(view) = self.content_view(state) {
            view.render(f, layout.content, &palette);
        }

        if let Some(button) = layout.hamburger {
            render_menu_button(f, button, &palette);
            hits.push((button, HitTarget::Hamburger));
        }

        if let (Some(bar), Some(bar_area)) = (&status_bar, layout.status_bar) {
            render_status_bar(f, bar_area, bar, state.ui.status_scroll, &palette, &mut hits);
        }

        if let Some(drawer_area) = layout.drawer {
            match (mode, &self.drawer) {
                (LayoutMode::Compatibility, Some(view)) => {
                    f.render_widget(Clear, drawer_area);
                    view.render(f, drawer_area, &palette);
                }
                _ => render_drawer(
                    f,
                    drawer_area,
                    &self.menu,
                    state.navigation.drawer_cursor,
                    state.selected_index(),
                    &palette,
                    &mut hits,
                ),
            }
        }

        if let Some(menu) = &state.ui.overflow {
            render_overflow_menu(f, area, overflow_anchor(&hits), menu, &palette, &mut hits);
        }

        if let Some(dialog) = &state.ui.dialog {
            render_dialog(f, area, dialog, &palette);
        }

        let expired = state
            .ui
            .toast_message
            .as_ref()
            .is_some_and(|(_, shown)| should_dismiss_toast(shown.elapsed().as_millis()));
        if expired {
            state.ui.dismiss_toast();
        }
        if let Some((message, _)) = &state.ui.toast_message {
            render_toast(f, layout.content, message, &palette);
        }

        state.ui.hits = hits;
        state.frame = FrameInfo {
            mode: Some(mode),
            width,
            app_bar,
            status_bar,
        };
    }

    /// Choose a tab. Out-of-range indices are ignored.
    pub fn select_tab(&self, state: &mut ScaffoldState, index: usize) -> Option<ScaffoldEvent> {
        let item = item_at(&self.menu, index)?;
        state.navigation.selection.select(index);
        state.navigation.close_drawer();

        if let Some(message) = &item.message {
            if state.ui.dialog.is_none() {
                state.ui.dialog = Some(Dialog::Message {
                    title: item.dialog_title.clone().unwrap_or_else(|| item.title.clone()),
                    message: message.clone(),
                });
            }
        }

        debug!("tab {} ({}) selected", index, item.id);
        Some(ScaffoldEvent::TabSelected {
            index,
            action: item.on_tap.clone(),
        })
    }

    /// Select the tab `delta` positions away, wrapping around
    pub fn cycle_tab(&self, state: &mut ScaffoldState, delta: isize) -> Option<ScaffoldEvent> {
        if !self.has_menu() {
            return None;
        }
        let next = crate::logic::ui::wrap_index(state.selected_index(), delta, self.menu.len());
        self.select_tab(state, next)
    }

    pub fn toggle_drawer(&self, state: &mut ScaffoldState) -> Option<ScaffoldEvent> {
        if !self.drawer_available(state) {
            return None;
        }
        if state.navigation.drawer_open {
            state.navigation.close_drawer();
        } else {
            state.navigation.open_drawer();
        }
        Some(ScaffoldEvent::DrawerToggled(state.navigation.drawer_open))
    }

    /// Open the overflow popup if the last frame materialised one
    pub fn open_overflow(&self, state: &mut ScaffoldState) -> bool {
        let entries = state
            .frame
            .app_bar
            .as_ref()
            .and_then(|bar| bar.overflow_entries())
            .map(<[_]>::to_vec);
        match entries {
            Some(entries) if !entries.is_empty() => {
                state.ui.overflow = Some(OverflowMenuState {
                    entries,
                    selected: 0,
                });
                true
            }
            _ => false,
        }
    }

    /// Run an overflow entry (popup or inline button) by its identifier
    pub fn activate_overflow(&self, state: &mut ScaffoldState, id: &str) -> Option<ScaffoldEvent> {
        state.ui.overflow = None;
        match dispatch_overflow(id) {
            OverflowCommand::ToggleTheme => Some(self.theme_toggle_event()),
            OverflowCommand::ShowAbout => self.open_about(state),
            OverflowCommand::Host(id) => Some(ScaffoldEvent::OverflowItemSelected(id)),
        }
    }

    pub fn open_about(&self, state: &mut ScaffoldState) -> Option<ScaffoldEvent> {
        let about = self.app_bar.as_ref()?.about.as_ref().filter(|a| a.enabled)?;
        state.ui.overflow = None;
        state.ui.dialog = Some(Dialog::About {
            title: format!("About {}", about.app_name),
            lines: about.body_lines(),
        });
        Some(ScaffoldEvent::AboutOpened)
    }

    pub fn theme_toggle_event(&self) -> ScaffoldEvent {
        let external_handler = self
            .app_bar
            .as_ref()
            .and_then(|c| c.theme.as_ref())
            .and_then(|t| t.control.external_handler())
            .map(str::to_string);
        ScaffoldEvent::ThemeToggleRequested { external_handler }
    }

    /// Advance the managed theme mode. Returns `None` when the mode is owned
    /// by the host or there is no controller.
    pub async fn toggle_theme(&self) -> Result<Option<ThemeMode>, PreferenceError> {
        let external = self
            .app_bar
            .as_ref()
            .and_then(|c| c.theme.as_ref())
            .is_some_and(|t| matches!(t.control, ThemeControl::External { .. }));
        match (&self.theme, external) {
            (Some(controller), false) => controller.toggle().await.map(Some),
            _ => Ok(None),
        }
    }

    /// Event for a tapped status entry of the last frame
    pub fn status_tap(&self, state: &ScaffoldState, key: &StatusKey) -> Option<ScaffoldEvent> {
        let entry = state
            .frame
            .status_bar
            .as_ref()?
            .entries
            .iter()
            .find(|e| &e.key == key)?;
        Some(ScaffoldEvent::StatusItemTapped {
            key: key.clone(),
            handler: entry.on_tap.clone(),
        })
    }
}

fn render_menu_button(f: &mut Frame, area: Rect, palette: &Palette) {
    let button = Paragraph::new(Span::styled(
        format!(" {} ", MENU_ICON),
        palette.bar().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(button, area);
}

impl std::fmt::Debug for Scaffold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scaffold")
            .field("menu", &self.menu)
            .field("app_bar", &self.app_bar)
            .field("has_body", &self.body.is_some())
            .field("has_drawer", &self.drawer.is_some())
            .field("narrow_threshold", &self.narrow_threshold)
            .field("cell_width", &self.cell_width)
            .finish()
    }
}
