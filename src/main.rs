use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::OpenOptions, io, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::mpsc;

use solidtui::config::{get_config_path, Config};
use solidtui::handlers::{handle_key, handle_mouse};
use solidtui::model::ui::NoticeSender;
use solidtui::model::{
    AboutConfig, Action, AppBarConfig, HandlerRegistry, LoginStatus, MenuItem, Notice,
    OverflowItem, ScaffoldEvent, ScaffoldState, SecurityKeyStatus, Selection, ServerInfo,
    StatusBarConfig, StatusBarItem, ThemeToggleConfig, VersionConfig,
};
use solidtui::services::{
    ChannelKeyPrompt, FileBrowser, JsonPreferenceStore, KeyPromptRequest, LocalPodStorage,
    MemoryKeyManager, SecurityKeyGate, ThemeController,
};
use solidtui::ui::{FileBrowserView, Scaffold, TextView};

/// SolidTUI demo: responsive scaffold over a local POD store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <temp dir>/solidtui-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,
}

fn get_debug_log_path() -> PathBuf {
    std::env::temp_dir().join("solidtui-debug.log")
}

/// Log to a file only: anything on stderr would tear the TUI
fn init_logging(debug: bool) -> Result<()> {
    if !debug {
        return Ok(());
    }
    let path = get_debug_log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open debug log {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    info!("debug logging to {}", path.display());
    Ok(())
}

/// Context handed to registered handlers
struct DemoHost {
    notices: NoticeSender,
    gate: SecurityKeyGate,
    files: Arc<FileBrowserView>,
}

impl DemoHost {
    fn toast(&self, message: impl Into<String>) {
        let _ = self.notices.send(Notice::Toast(message.into()));
    }
}

fn register_handlers(registry: &mut HandlerRegistry<DemoHost>) {
    registry
        .register("sync", |host: &mut DemoHost| {
            host.files.refresh();
            host.toast("Refreshing files");
        })
        .register("files_opened", |host: &mut DemoHost| host.files.refresh())
        .register("export", |host: &mut DemoHost| {
            let listing = host.files.browser().listing();
            host.toast(format!(
                "{} files, {} folders",
                listing.files.len(),
                listing.subdirectories.len()
            ));
        })
        .register("security_key", |host: &mut DemoHost| {
            let gate = host.gate.clone();
            let notices = host.notices.clone();
            tokio::spawn(async move {
                if gate.ensure_key().await {
                    let _ = notices.send(Notice::Toast("Security key available".into()));
                }
            });
        })
        .register("forget_key", |host: &mut DemoHost| {
            let gate = host.gate.clone();
            let notices = host.notices.clone();
            tokio::spawn(async move {
                let notice = match gate.reset().await {
                    Ok(()) => Notice::Toast("Security key forgotten".into()),
                    Err(e) => Notice::Alert {
                        title: "Security key".into(),
                        message: e.to_string(),
                    },
                };
                let _ = notices.send(notice);
            });
        });
}

fn build_scaffold(
    config: &Config,
    theme: ThemeController,
    gate: SecurityKeyGate,
    files: Arc<FileBrowserView>,
) -> Result<Scaffold> {
    let welcome = TextView::new(
        "Welcome",
        "Navigate with Tab or the number keys, m opens the drawer on narrow \
         screens, t toggles the theme, ? shows About and q quits.\n\n\
         Resize the terminal to see the rail, drawer and overflow menu adapt.",
    );

    let menu = vec![
        MenuItem::new("home", "Home", "⌂")
            .with_content(Arc::new(welcome))
            .with_tooltip("Start page"),
        MenuItem::new("files", "Files", "▤")
            .with_content(files)
            .on_tap("files_opened"),
        MenuItem::new("help", "Help", "?").with_message(
            "Help",
            "Files are stored encrypted with the .enc.ttl suffix.\n\
             Press K to enter your security key.",
        ),
    ];

    let version = env!("CARGO_PKG_VERSION");
    let app_bar = AppBarConfig::new(config.title.clone())
        .breakpoints(config.breakpoints()?)
        .version(VersionConfig::new(version))
        .action(
            Action::new("sync", "⟳")
                .with_tooltip("Refresh files")
                .with_shortcut('s')
                .hide_on_very_narrow(),
        )
        .action(
            Action::new("forget_key", "⚿")
                .with_tooltip("Forget security key")
                .with_shortcut('l')
                .hide_on_narrow(),
        )
        .overflow_item(OverflowItem::new("export", "Listing summary", "⇪").with_shortcut('e'))
        .theme(ThemeToggleConfig::default())
        .about(
            AboutConfig::new(config.title.clone())
                .with_version(version)
                .with_description("Responsive terminal scaffold for POD apps.")
                .line("Keys: Tab/1-9 tabs, m drawer, . overflow, t theme, K key"),
        );

    let server = config
        .server_url
        .clone()
        .unwrap_or_else(|| format!("file://{}", config.pod_root().display()));
    let login = match &config.web_id {
        Some(web_id) => LoginStatus::logged_in(web_id.clone()),
        None => LoginStatus::logged_out(),
    };
    let mut status = StatusBarConfig::new()
        .server(ServerInfo::new(server))
        .login(login)
        .security_key(SecurityKeyStatus {
            on_tap: Some("security_key".to_string()),
            ..SecurityKeyStatus::default()
        })
        .item(StatusBarItem::new("base_dir", config.base_dir.clone(), 10).with_icon("▤"));
    status.thresholds = config.status_thresholds();
    if !config.show_status_on_narrow {
        status = status.hide_on_narrow_screens();
    }

    let scaffold = Scaffold::builder()
        .menu(menu)
        .app_bar(app_bar)
        .status_bar(status)
        .theme_controller(theme)
        .security_key_gate(gate)
        .cell_width(config.cell_width)
        .build()?;
    Ok(scaffold)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    init_logging(args.debug)?;

    // Load configuration (defaults when no file is found)
    let config = match get_config_path(args.config.as_deref())? {
        Some(path) => {
            debug!("loading config from {:?}", path);
            Config::load(&path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => {
            debug!("no config file found, using defaults");
            Config::default()
        }
    };

    // Services
    let prefs_path = config
        .preferences_path
        .clone()
        .unwrap_or_else(JsonPreferenceStore::default_path);
    let theme = ThemeController::new(Arc::new(JsonPreferenceStore::new(prefs_path)));
    if let Err(e) = theme.init().await {
        warn!("could not load theme preference: {}", e);
    }

    let (prompt, prompt_rx) = ChannelKeyPrompt::channel();
    let keys = Arc::new(MemoryKeyManager::new(config.verification_key.clone()));
    let gate = SecurityKeyGate::new(keys, Arc::new(prompt));

    let pod_root = config.pod_root();
    tokio::fs::create_dir_all(pod_root.join(&config.base_dir))
        .await
        .with_context(|| format!("failed to create POD store at {}", pod_root.display()))?;
    let mut storage = LocalPodStorage::new(&pod_root);
    if let Some(url) = &config.server_url {
        storage = storage.with_server_url(url.clone());
    }
    let browser = FileBrowser::new(Arc::new(storage), config.base_dir.clone()).with_gate(gate.clone());

    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let files = Arc::new(FileBrowserView::new(browser, notice_tx.clone()));
    files.refresh();

    let scaffold = build_scaffold(&config, theme, gate.clone(), files.clone())?;
    let mut state = ScaffoldState::new(Selection::Internal(0));
    let mut registry = HandlerRegistry::new();
    register_handlers(&mut registry);
    let mut host = DemoHost {
        notices: notice_tx,
        gate,
        files,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let mut channels = Channels {
        prompts: prompt_rx,
        notices: notice_rx,
    };
    let result = run_app(
        &mut terminal,
        &scaffold,
        &mut state,
        &mut registry,
        &mut host,
        &mut channels,
    )
    .await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    // Return result after cleanup
    result
}

struct Channels {
    prompts: mpsc::UnboundedReceiver<KeyPromptRequest>,
    notices: mpsc::UnboundedReceiver<Notice>,
}

fn is_quit(key: &KeyEvent, scaffold: &Scaffold, state: &ScaffoldState) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    key.code == KeyCode::Char('q')
        && !state.has_modal()
        && !state.navigation.drawer_open
        && !scaffold.is_capturing_input(state)
}

async fn dispatch(
    scaffold: &Scaffold,
    registry: &mut HandlerRegistry<DemoHost>,
    host: &mut DemoHost,
    event: ScaffoldEvent,
) {
    debug!("scaffold event: {:?}", event);
    if let ScaffoldEvent::ThemeToggleRequested {
        external_handler: None,
    } = &event
    {
        match scaffold.toggle_theme().await {
            Ok(Some(mode)) => host.toast(format!("Theme: {}", mode)),
            Ok(None) => {}
            Err(e) => {
                let _ = host.notices.send(Notice::Alert {
                    title: "Theme".into(),
                    message: format!("Could not save theme: {}", e),
                });
            }
        }
    }
    registry.dispatch_event(&event, host);
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    scaffold: &Scaffold,
    state: &mut ScaffoldState,
    registry: &mut HandlerRegistry<DemoHost>,
    host: &mut DemoHost,
    channels: &mut Channels,
) -> Result<()> {
    loop {
        // Always render
        terminal.draw(|f| scaffold.render(f, state))?;

        // Passphrase requests from the security key gate
        while let Ok(request) = channels.prompts.try_recv() {
            state.open_key_prompt(request);
        }

        // Toasts and alerts from background file operations
        while let Ok(notice) = channels.notices.try_recv() {
            state.ui.apply_notice(notice);
        }

        if event::poll(Duration::from_millis(100))? {
            let scaffold_event = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_quit(&key, scaffold, state) {
                        break;
                    }
                    handle_key(scaffold, state, key)
                }
                Event::Mouse(mouse) => handle_mouse(scaffold, state, mouse),
                _ => None,
            };
            if let Some(scaffold_event) = scaffold_event {
                dispatch(scaffold, registry, host, scaffold_event).await;
            }
        }
    }

    Ok(())
}
