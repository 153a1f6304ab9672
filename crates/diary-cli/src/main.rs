//! Diary CLI - an encrypted personal journal
//!
//! This is the command-line interface for Diary. It resolves configuration,
//! collects the passphrase, and presents entries loaded by the core library.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::entries::{handle_export, handle_list, handle_read, handle_write};
use crate::commands::maintenance::handle_check;
use crate::commands::misc::handle_completions;
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => cli_err.exit(),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);
    match &cli.command {
        Commands::Write(args) => handle_write(&ctx, args),
        Commands::Read(args) => handle_read(&ctx, args),
        Commands::List(args) => handle_list(&ctx, args),
        Commands::Export(args) => handle_export(&ctx, args),
        Commands::Check => handle_check(&ctx),
        Commands::Completions { shell } => handle_completions(*shell),
    }
}

/// Log to stderr. `--verbose` wins over `RUST_LOG`; the default shows warnings.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
