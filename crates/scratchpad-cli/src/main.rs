use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod render;

#[derive(Parser)]
#[command(name = "scratchpad", version)]
#[command(about = "Scratchpad - a REPL and script runner over persistent virtual files", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the key/value store holding the virtual files
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Keep virtual files in memory only; nothing is loaded or saved
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive session (default)
    Repl,
    /// Run a virtual file, or a file on disk, in a fresh batch session
    Run {
        /// Virtual file name or host path
        target: String,
    },
    /// List the virtual files
    Files,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let options = app::AppOptions {
        config_path: cli.config,
        store_path: cli.store,
        ephemeral: cli.ephemeral,
    };
    let mut app = app::App::bootstrap(options).await?;

    let success = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => commands::repl::run(&mut app).await?,
        Commands::Run { target } => commands::run::run(&mut app, &target).await?,
        Commands::Files => commands::files::list(&app),
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
