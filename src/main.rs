//! scrollchat - Entry Point

use clap::Parser;
use ratatui::backend::CrosstermBackend;
use scrollchat::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    KeyBindings, ResolvedConfig,
};
use scrollchat::model::AppError;
use scrollchat::session::{self, CrosstermKeys, Termination};
use scrollchat::view::{Screen, TerminalGuard};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Exit status after Ctrl+C at a startup prompt.
const EXIT_INTERRUPTED: u8 = 130;

/// scrollchat - terminal client for a line-based chat server
#[derive(Parser, Debug)]
#[command(name = "scrollchat")]
#[command(version)]
#[command(about = "Terminal chat client with a scrollable message window")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Number of messages kept on screen (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub history_capacity: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(Termination::Exited) => ExitCode::SUCCESS,
        Ok(Termination::Interrupted) => ExitCode::from(EXIT_INTERRUPTED),
        Err(err) => {
            // The terminal guard is gone by now, so this lands on a normal screen.
            error!(error = %err, "Session failed");
            eprintln!("scrollchat: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve config: Defaults → Config File → Env Vars → CLI Args.
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);
    let capacity_override = args
        .history_capacity
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX));
    Ok(apply_cli_overrides(
        with_env,
        args.log_file.clone(),
        capacity_override,
    ))
}

fn run(args: Args) -> Result<Termination, AppError> {
    let config = resolve_config(&args)?;

    scrollchat::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let _guard = TerminalGuard::enter()?;
    let screen = Screen::new(CrosstermBackend::new(std::io::stdout()))?;
    let mut keys = CrosstermKeys::new(KeyBindings::default(), config.key_poll_interval());

    let termination = session::run(&config, screen, &mut keys)?;
    info!(?termination, "Session ended");
    Ok(termination)
}
