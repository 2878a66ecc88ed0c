//! CLI entrypoint and subcommand orchestration.

mod ask;
mod config;
#[cfg(test)]
mod test_support;
mod tui;

use clap::{Parser, Subcommand};

#[cfg(not(test))]
use std::sync::Arc;

#[cfg(not(test))]
use adapters::{FileHandle, HostContext, HttpAdapters, StaticHost};
#[cfg(not(test))]
use config::Config;
#[cfg(not(test))]
use conversation::{Navigator, UpdateSender};
#[cfg(not(test))]
use proto::Feature;
#[cfg(not(test))]
use tracing::{info, warn};
#[cfg(not(test))]
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Top-level command-line arguments for the wizora application.
#[derive(Parser)]
#[command(name = "wizora")]
#[command(about = "Multi-backend AI assistant", version = "0.1.0")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable debug logging to ~/.wizora/logs/
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// URL reported as the active browser tab (overrides [host] tab_url)
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// CLI subcommands available in the application.
#[derive(Subcommand)]
enum Commands {
    /// Start the full-screen TUI (default when no subcommand is given)
    Tui,

    /// Send one message (or file) to a feature backend and print the reply
    Ask {
        /// Feature to talk to: webpage, document, data, chatbot, image
        #[arg(short, long)]
        feature: String,

        /// File to upload (document) or analyze (data)
        #[arg(long)]
        file: Option<std::path::PathBuf>,

        /// Message to send
        message: Option<String>,
    },
}

#[cfg(not(test))]
#[tokio::main]
/// Program entrypoint.
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Tui);
    let is_tui = matches!(command, Commands::Tui);

    // Console output is sunk in TUI mode so it cannot corrupt the display.
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    // WorkerGuard must outlive main() so buffered file writes are flushed on exit.
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>;

    let debug_writer = if cli.debug {
        let log_dir = Config::home_dir()
            .unwrap_or_else(|| std::path::PathBuf::from(".wizora"))
            .join("logs");
        std::fs::create_dir_all(&log_dir).ok();
        let appender = tracing_appender::rolling::daily(&log_dir, "debug.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        _file_guard = Some(guard);
        Some(writer)
    } else {
        _file_guard = None;
        None
    };

    match (is_tui, debug_writer) {
        (true, Some(writer)) => {
            let console = fmt::layer()
                .with_writer(std::io::sink)
                .with_target(false)
                .with_filter(console_filter);
            let file = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug,hyper_util=info,rustls=info,reqwest=info"));
            tracing_subscriber::registry()
                .with(console)
                .with(file)
                .init();
        }
        (true, None) => {
            fmt()
                .with_env_filter(console_filter)
                .with_writer(std::io::sink)
                .with_target(false)
                .init();
        }
        (false, Some(writer)) => {
            let console = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter);
            let file = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug,hyper_util=info,rustls=info,reqwest=info"));
            tracing_subscriber::registry()
                .with(console)
                .with(file)
                .init();
        }
        (false, None) => {
            fmt()
                .with_env_filter(console_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }

    if cli.debug {
        let cmd_label = match &command {
            Commands::Tui => "tui",
            Commands::Ask { .. } => "ask",
        };
        info!(
            version = env!("CARGO_PKG_VERSION"),
            command = cmd_label,
            log_level = %cli.log_level,
            "========== wizora session start =========="
        );
    }

    let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!("Failed to load config ({e}), using defaults");
        Config::default()
    });
    let tab_url = cli.url.or_else(|| config.host.tab_url.clone());

    match command {
        Commands::Tui => cmd_tui(config, tab_url).await,
        Commands::Ask {
            feature,
            file,
            message,
        } => cmd_ask(config, tab_url, feature, file, message).await,
    }
}

#[cfg(not(test))]
/// Wires the adapter factory, host context, and navigator from config.
fn build_navigator(
    config: &Config,
    tab_url: Option<String>,
    updates: Option<UpdateSender>,
) -> anyhow::Result<Navigator> {
    let factory = Arc::new(HttpAdapters::new(
        config.endpoints.clone(),
        config.http.timeout(),
    )?);
    let host: Arc<dyn HostContext> = Arc::new(StaticHost::new(tab_url));
    let navigator = Navigator::new(factory, host).with_retention(config.session.retention);
    Ok(match updates {
        Some(tx) => navigator.with_updates(tx),
        None => navigator,
    })
}

#[cfg(not(test))]
/// Starts the full-screen TUI.
async fn cmd_tui(config: Config, tab_url: Option<String>) -> anyhow::Result<()> {
    let (tx, rx) = conversation::update::channel();
    let navigator = build_navigator(&config, tab_url, Some(tx))?;
    tui::run_tui(navigator, rx).await
}

#[cfg(not(test))]
/// Sends one message (or file) and prints the bot replies.
async fn cmd_ask(
    config: Config,
    tab_url: Option<String>,
    feature: String,
    file: Option<std::path::PathBuf>,
    message: Option<String>,
) -> anyhow::Result<()> {
    let feature: Feature = feature.parse()?;
    let file = match file {
        Some(path) => Some(FileHandle::from_path(&path).await?),
        None => None,
    };

    let mut navigator = build_navigator(&config, tab_url, None)?;
    let replies = ask::ask(&mut navigator, feature, file, message).await?;
    for reply in &replies {
        println!("{}", ask::format_reply(reply));
    }
    Ok(())
}
