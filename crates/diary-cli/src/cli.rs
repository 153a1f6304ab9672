use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use diary_core::VERSION;

/// Diary - an encrypted personal journal
#[derive(Parser)]
#[command(name = "diary")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "DIARY_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the entry envelopes
    #[arg(short, long, global = true, env = "DIARY_DIR", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Public key used to seal new entries
    #[arg(long, global = true, env = "DIARY_PUBLIC_KEY", value_name = "PATH")]
    pub public_key: Option<PathBuf>,

    /// Passphrase-protected private key used to read entries
    #[arg(long, global = true, env = "DIARY_PRIVATE_KEY", value_name = "PATH")]
    pub private_key: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a new entry
    Write(WriteArgs),

    /// Print entries, newest first
    Read(ReadArgs),

    /// Show a table of entries
    List(ListArgs),

    /// Export entries as JSON
    Export(ExportArgs),

    /// Decrypt every entry and report problems
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `write` command
#[derive(Args)]
pub struct WriteArgs {
    /// Entry text (read from stdin or $EDITOR when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `read` command
#[derive(Args)]
pub struct ReadArgs {
    /// Show at most this many entries
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Show at most this many entries
    #[arg(long)]
    pub limit: Option<usize>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}
