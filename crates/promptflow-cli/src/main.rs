//! Promptflow CLI - split documents into prompts and queue them for execution.

use clap::Parser;
use promptflow_cli::commands;
use promptflow_cli::repl;
use promptflow_cli::{Cli, Command, Config, Formatter, Session};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> promptflow_cli::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;
    debug!("Loaded configuration from {}", config_path.display());

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let mut session = Session::from_config(&config)?;

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&config, &mut session, &formatter)?;
        }
        Some(Command::Extract(args)) => {
            commands::execute_extract(args, &mut session, &formatter)?;
        }
        Some(Command::Optimize(args)) => {
            commands::execute_optimize(args, &mut session, &formatter)?;
        }
        Some(Command::Config(args)) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable; `RUST_LOG` overrides the level.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
