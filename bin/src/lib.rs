pub mod cli;
pub mod commands;
pub mod config;

use anyhow::{Context, Result};
use cli::{Cli, Command};
use config::Config;
use std::io::Write;

/// Run a parsed command line, writing command output to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let discovered = config::discover(&cwd);
    let config = Config::load_with_overrides(cli.config.as_deref(), discovered.as_deref())?;

    match cli.command {
        Command::Inspect(args) => commands::inspect::run(args, &config, out),
        Command::Normalize(args) => commands::normalize::run(args, &config, out),
    }
}
