//! Service content blocks CLI
//!
//! Converts service record text fields to structured blocks and back.

mod cli;
mod commands;
mod error;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use svc_content::{EditorSettings, SettingsResolver};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config.as_deref()),
        None => {
            println!("{} Service content blocks", "svc-blocks".green().bold());
            println!();
            println!("Run {} for available commands.", "svc-blocks --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config: Option<&std::path::Path>) -> Result<()> {
    match cmd {
        Commands::Parse { kind, file } => commands::run_parse(kind, file.as_deref()),
        Commands::Render { file } => commands::run_render(file.as_deref()),
        Commands::Load { file, compact } => commands::run_load(file.as_deref(), compact),
        Commands::Inspect { file, collection } => {
            let settings = load_settings(config)?;
            commands::run_inspect(file.as_deref(), collection, &settings)
        }
        Commands::Config => {
            let settings = load_settings(config)?;
            commands::run_config(&settings)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "svc-blocks", &mut io::stdout());
            Ok(())
        }
    }
}

/// Explicit `--config` file, or the layered settings for the current directory.
fn load_settings(config: Option<&std::path::Path>) -> Result<EditorSettings> {
    match config {
        Some(path) => {
            tracing::debug!(?path, "Loading editor settings from --config");
            Ok(EditorSettings::load(path)?)
        }
        None => {
            let cwd = std::env::current_dir()?;
            Ok(SettingsResolver::new(cwd).resolve()?)
        }
    }
}
