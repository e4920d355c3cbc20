//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Promptflow - split documents into prompts and queue them for execution.
#[derive(Debug, Parser)]
#[command(name = "promptflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PROMPTFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract prompts from text, a file or stdin
    Extract(ExtractArgs),

    /// Rewrite a single prompt
    Optimize(OptimizeArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Text to extract prompts from
    pub text: Option<String>,

    /// Read text from a file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Read text from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Run each prompt through the optimizer
    #[arg(short, long)]
    pub optimize: bool,

    /// Submit the prompts as jobs for this tool
    #[arg(short, long)]
    pub queue: Option<String>,

    /// Priority for queued jobs
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    pub priority: i32,

    /// Override the minimum prompt length (characters)
    #[arg(long)]
    pub min_chars: Option<usize>,
}

/// Arguments for the optimize command.
#[derive(Debug, Parser)]
pub struct OptimizeArgs {
    /// Prompt text (words are joined with spaces)
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
