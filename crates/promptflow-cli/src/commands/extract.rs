//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use promptflow_domain::QuotaType;
use promptflow_extractor::{optimize_prompt, ExtractorConfig, PromptExtractor};
use std::fs;
use std::io::{self, Read};
use tracing::debug;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let text = read_input(&args)?;

    let extractor = match args.min_chars {
        Some(min_prompt_chars) => PromptExtractor::try_new(ExtractorConfig {
            min_prompt_chars,
            ..session.extractor.config().clone()
        })?,
        None => session.extractor.clone(),
    };

    // refuse oversized input before doing any work
    let source_chars = extractor.billable_chars(&text);
    session.ensure_within(QuotaType::BatchExtractionChars, source_chars)?;

    let prompts = extractor.extract(&text);
    let count = prompts.len() as u64;

    let mut charges = vec![(QuotaType::BatchExtractionChars, source_chars)];
    if args.optimize && count > 0 {
        charges.push((QuotaType::PromptOptimizations, count));
    }
    if args.queue.is_some() && count > 0 {
        charges.push((QuotaType::ExecutionJobs, count));
    }
    session.charge_all(&charges)?;

    let prompts = if args.optimize {
        prompts
            .into_iter()
            .map(|p| {
                let optimized = optimize_prompt(p.content());
                p.with_content(optimized)
            })
            .collect()
    } else {
        prompts
    };

    let Some(tool) = args.queue else {
        println!("{}", formatter.format_prompts(&prompts)?);
        if formatter.format() == OutputFormat::Table && !prompts.is_empty() {
            println!("{}", formatter.extraction_summary(&prompts));
        }
        return Ok(());
    };

    if prompts.is_empty() {
        println!("{}", formatter.warning("No prompts found, nothing queued"));
        return Ok(());
    }

    let (batch_id, jobs) = session.queue.enqueue_batch(&tool, &prompts, args.priority);
    debug!("Batch {} submitted to '{}'", batch_id, tool);

    println!("{}", formatter.format_jobs(&jobs)?);
    if formatter.format() == OutputFormat::Table {
        println!(
            "{}",
            formatter.success(&format!("Queued {} job(s) in batch {}", jobs.len(), batch_id))
        );
    }

    Ok(())
}

/// Read source text from the argument, a file or stdin.
fn read_input(args: &ExtractArgs) -> Result<String> {
    if args.stdin {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    } else if let Some(path) = &args.input {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    } else if let Some(text) = &args.text {
        Ok(text.clone())
    } else {
        Err(CliError::InvalidInput(
            "Provide text, --input <file> or --stdin".to_string(),
        ))
    }
}
