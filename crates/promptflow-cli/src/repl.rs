//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{Command, ExtractArgs, OptimizeArgs};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use promptflow_domain::traits::{JobFilter, JobQueue};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl(config: &Config, session: &mut Session, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Promptflow REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("promptflow> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Jobs) => match session.queue.list_jobs(&JobFilter::default()) {
                        Ok(jobs) => match formatter.format_jobs(&jobs) {
                            Ok(out) => println!("{}", out),
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        },
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Ok(ReplCommand::Clear) => {
                        let removed = session.queue.clear_finished();
                        println!("{}", formatter.success(&format!("Cleared {} finished job(s)", removed)));
                    }
                    Ok(ReplCommand::Command(cmd)) => {
                        if let Err(e) = execute_repl_command(cmd, session, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Jobs,
    Clear,
    Command(Command),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "jobs" => Ok(ReplCommand::Jobs),
        "clear" => Ok(ReplCommand::Clear),
        "extract" => parse_extract_command(rest, None),
        "queue" => {
            let (tool, text) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                CliError::InvalidInput("Usage: queue <tool> <text>".to_string())
            })?;
            parse_extract_command(text.trim(), Some(tool.to_string()))
        }
        "optimize" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: optimize <text>".to_string()));
            }
            Ok(ReplCommand::Command(Command::Optimize(OptimizeArgs {
                text: vec![rest.to_string()],
            })))
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

fn parse_extract_command(text: &str, queue: Option<String>) -> Result<ReplCommand> {
    if text.is_empty() {
        return Err(CliError::InvalidInput(
            "Usage: extract <text> (use \\n for line breaks)".to_string(),
        ));
    }

    Ok(ReplCommand::Command(Command::Extract(ExtractArgs {
        text: Some(unescape_newlines(text)),
        input: None,
        stdin: false,
        optimize: false,
        queue,
        priority: 0,
        min_chars: None,
    })))
}

/// Turn literal `\n` sequences typed on one line into line breaks
fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Execute a REPL command.
fn execute_repl_command(cmd: Command, session: &mut Session, formatter: &Formatter) -> Result<()> {
    match cmd {
        Command::Extract(args) => commands::execute_extract(args, session, formatter),
        Command::Optimize(args) => commands::execute_optimize(args, session, formatter),
        Command::Config(_) | Command::Repl => Err(CliError::InvalidInput(
            "Not available inside the REPL".to_string(),
        )),
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  extract <text>                 - Extract prompts (\\n = line break)");
    println!("  queue <tool> <text>            - Extract prompts and queue them for a tool");
    println!("  optimize <text>                - Rewrite a single prompt");
    println!("  jobs                           - List jobs queued in this session");
    println!("  clear                          - Drop finished jobs");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
