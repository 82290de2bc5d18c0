//! termlinks: find file links in captured terminal output, even when the
//! path and the line number are on different lines.

mod buffer;
mod commands;
mod config;
mod coords;
mod detector;
mod diagnostics;
mod error;
mod info;
mod matcher;
mod resolver;
mod types;
mod watch;
mod workspace;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Command line surface.
#[derive(Parser)]
#[command(
    name = "termlinks",
    version,
    about = "Find file links in captured terminal output"
)]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print a reference document covering usage and current state
    Info {
        /// Emit JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Resolve a single link candidate and report the outcome
    Resolve {
        /// Candidate text, e.g. `src/app.ts` or `~/notes.md:12`
        text: String,
    },
    /// Detect links in a capture file or stdin
    Scan {
        /// Viewport width override
        #[arg(long)]
        cols: Option<usize>,
        /// Capture file to scan; stdin when omitted
        file: Option<PathBuf>,
        /// Emit JSON instead of the human listing
        #[arg(long)]
        json: bool,
    },
    /// Re-scan a capture file whenever it changes
    Watch {
        /// Viewport width override
        #[arg(long)]
        cols: Option<usize>,
        /// Capture file to watch
        file: PathBuf,
    },
    /// Manage workspace roots used for folder classification
    Workspace {
        /// Action to apply
        #[command(subcommand)]
        action: WorkspaceAction,
    },
}

/// Actions under `termlinks workspace`.
#[derive(Subcommand)]
enum WorkspaceAction {
    /// Add a root to .termlinks.toml
    Add {
        /// Root path, absolute or relative to the config
        path: String,
    },
    /// List configured roots
    List,
    /// Remove a root from .termlinks.toml
    Remove {
        /// Root path exactly as configured
        path: String,
    },
}

/// Install the tracing subscriber: warnings to stderr, overridable via
/// `RUST_LOG`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_err| return tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    return;
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(code) => return code,
        Err(e) => {
            diagnostics::print_error(&e);
            return ExitCode::from(2);
        },
    }
}

/// Dispatch a parsed command.
///
/// # Errors
///
/// Returns whatever the command returns.
fn run(command: Commands) -> Result<ExitCode, error::Error> {
    match command {
        Commands::Info { json } => {
            commands::info(json);
            return Ok(ExitCode::SUCCESS);
        },
        Commands::Resolve { text } => return commands::resolve(&text),
        Commands::Scan { cols, file, json } => {
            return commands::scan(file.as_deref(), json, cols);
        },
        Commands::Watch { cols, file } => return watch::run(&file, cols),
        Commands::Workspace { action } => {
            match action {
                WorkspaceAction::Add { path } => workspace::cmd_add(&path)?,
                WorkspaceAction::List => workspace::cmd_list()?,
                WorkspaceAction::Remove { path } => workspace::cmd_remove(&path)?,
            }
            return Ok(ExitCode::SUCCESS);
        },
    }
}
