//! TechNews TUI - newsletter subscription and article sharing in the terminal
//!
//! A Ratatui front end for the TechNews site: subscribe to the newsletter
//! and share articles to social platforms or the clipboard.

mod app;
mod config;
mod platform;
mod share;
mod site;
mod state;
mod subscription;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::{Settings, TuiConfig};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use share::{
    AnalyticsSink, JsonLinesSink, ShareController, ShareEnvironment, SharePage, SystemBrowser,
    SystemClipboard, TerminalClipboard,
};
use site::SiteClient;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The terminal belongs to the UI, so logs go to a file
fn open_log_file() -> Option<File> {
    let path = config::log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "technews_tui=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match open_log_file() {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .init(),
    }
}

fn build_share_controller(settings: &Settings) -> ShareController {
    let analytics = settings
        .analytics_log
        .clone()
        .map(|path| Box::new(JsonLinesSink::new(path)) as Box<dyn AnalyticsSink>);

    ShareController::new(
        ShareEnvironment {
            opener: Box::new(SystemBrowser),
            clipboard: Box::new(SystemClipboard::default()),
            fallback_clipboard: Box::new(TerminalClipboard::new(io::stdout())),
            use_primary_clipboard: settings.prefer_system_clipboard,
            analytics,
            screen: settings.screen_size,
        },
        SharePage::placeholder(settings.site_url.as_str()),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = TuiConfig::load()?;
    let settings = Settings::from_environment(config)?;
    tracing::info!(site = %settings.site_url, article = ?settings.article, "Starting");

    let site = SiteClient::new(settings.site_url.clone()).context("Failed to create site client")?;
    tracing::debug!(base = %site.base_url(), "Site client ready");
    let share = build_share_controller(&settings);
    let mut app = App::new(Arc::new(site), share, settings.article.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("Exiting on error: {err:?}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut animating = false;

    loop {
        let term_size = terminal.size()?;
        app.state.terminal_size = Some((term_size.height, term_size.width));

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Use faster polling while something animates (16ms = ~60fps)
        // Normal polling (100ms) otherwise
        let poll_duration = if animating {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        // Handle crossterm events
        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Event::Resize(_width, _height) => {
                    // Layout is recalculated on next draw
                }
                _ => {}
            }
        }

        // Apply background results, then advance timers
        let now = Instant::now();
        app.drain_background(now);
        animating = app.tick(now);

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
