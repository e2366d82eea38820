use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinematch_core::config_file;
use cinematch_core::{Controller, HttpMovieApi};

mod action;
mod app;
mod backend;
mod config;
mod input;
mod theme;
mod tui_event;
mod view;

use app::App;
use tui_event::BackendCommand;

/// CineMatch: browse popular movies, search, and get recommendations in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Recommendation backend base URL (serves /popular and /recommend)
    #[arg(long)]
    backend_url: Option<String>,

    /// Catalog proxy base URL (serves /search and /movie/{id})
    #[arg(long)]
    proxy_url: Option<String>,

    /// Read this config file instead of the usual locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Per-request timeout in seconds (0 = none)
    #[arg(long)]
    timeout: Option<u64>,

    /// How many recommendations to ask the backend for
    #[arg(long)]
    recommendations: Option<usize>,

    /// Log file (default: <data dir>/cinematch/cinematch.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Save the resolved settings to the platform config file and exit
    #[arg(long)]
    write_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _log_guard = init_logging(args.log_file.as_deref())?;

    let overrides = config::Overrides {
        backend_url: args.backend_url,
        proxy_url: args.proxy_url,
        config_path: args.config,
        theme: args.theme,
        timeout_secs: args.timeout,
        recommendations: args.recommendations,
    };
    let file_cfg = config::load_file(&overrides);
    let settings = config::resolve(overrides, &file_cfg, |key| std::env::var(key).ok());

    if args.write_config {
        let snapshot = config_file::from_config(&settings.config, settings.display());
        let path = config_file::save_config(&snapshot).map_err(anyhow::Error::msg)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    tracing::info!(
        backend = %settings.config.backend_url,
        proxy = %settings.config.proxy_url,
        "starting"
    );

    let controller = Controller::new(HttpMovieApi::new(&settings.config)?);
    let health_api = HttpMovieApi::new(&settings.config)?;
    let mut state_rx = controller.subscribe();

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(theme::Theme::from_name(&settings.theme));

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<BackendCommand>();
    let cancel = CancellationToken::new();

    app.backend_cmd_tx = Some(cmd_tx);

    tokio::spawn(backend::run_controller(controller, cmd_rx, cancel.clone()));
    tokio::spawn(backend::probe_health(health_api, event_tx));

    // Initial load
    app.send(BackendCommand::LoadPopular);

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    let tick_rate = settings.tick_rate();
    let mut state_open = true;

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            changed = state_rx.changed(), if state_open => {
                match changed {
                    Ok(()) => {
                        let next = state_rx.borrow_and_update().clone();
                        app.set_session(next);
                    }
                    Err(_) => state_open = false,
                }
            }
            Some(backend_event) = event_rx.recv() => {
                app.handle_backend_event(backend_event);
                while let Ok(evt) = event_rx.try_recv() {
                    app.handle_backend_event(evt);
                }
            }
            _ = cancel.cancelled() => {
                app.should_quit = true;
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    app.update(input::map_event(&evt, &app.input_mode));
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    Ok(())
}

/// Send logs to a file so they don't draw over the terminal UI. The guard
/// must live until exit or buffered lines are lost.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<WorkerGuard> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("cinematch")
            .join("cinematch.log"),
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(&dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &dir, file_name,
    ));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch=info,cinematch_core=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
