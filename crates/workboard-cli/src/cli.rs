use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "workboard",
    version,
    about = "Inspect and rearrange the client task board"
)]
pub struct GlobalCli {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less log output.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Board config file (TOML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable ANSI colors in board output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the configured stages.
    Stages,
    /// Render the board for a task file.
    Show(ShowArgs),
    /// Drag a task onto another column and render the result.
    Move(MoveArgs),
}

#[derive(Debug, Args)]
pub struct BoardSource {
    /// JSON file with a task array or a column array.
    #[arg(long)]
    pub tasks: PathBuf,

    /// Render moment (RFC 3339 or YYYY-MM-DD); defaults to now.
    #[arg(long)]
    pub now: Option<String>,

    /// Print the columns as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: BoardSource,

    /// Column id to show collapsed; may be repeated.
    #[arg(long = "collapse")]
    pub collapse: Vec<String>,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    #[command(flatten)]
    pub source: BoardSource,

    pub task_id: String,

    pub to_column: String,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
