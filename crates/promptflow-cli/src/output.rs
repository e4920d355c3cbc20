//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use promptflow_domain::{ExecutionJob, ExtractedPrompt};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest content shown in a table cell
const PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format extracted prompts.
    pub fn format_prompts(&self, prompts: &[ExtractedPrompt]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_prompts_json(prompts),
            OutputFormat::Table => Ok(self.format_prompts_table(prompts)),
            OutputFormat::Quiet => Ok(prompts
                .iter()
                .map(|p| p.id().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format queued jobs.
    pub fn format_jobs(&self, jobs: &[ExecutionJob]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_jobs_json(jobs),
            OutputFormat::Table => Ok(self.format_jobs_table(jobs)),
            OutputFormat::Quiet => Ok(jobs
                .iter()
                .map(|j| j.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format an optimizer result.
    pub fn format_optimized(&self, original: &str, optimized: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "original": original,
                "optimized": optimized,
            }))?),
            OutputFormat::Table | OutputFormat::Quiet => Ok(optimized.to_string()),
        }
    }

    fn format_prompts_json(&self, prompts: &[ExtractedPrompt]) -> Result<String> {
        let json_prompts: Vec<serde_json::Value> = prompts
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id().to_string(),
                    "position": p.position(),
                    "content": p.content(),
                    "original_prompt": p.original_prompt(),
                    "estimated_tokens": p.estimated_tokens(),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_prompts)?)
    }

    fn format_prompts_table(&self, prompts: &[ExtractedPrompt]) -> String {
        if prompts.is_empty() {
            return self.colorize("No prompts found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "ID", "Tokens", "Content"]);

        for prompt in prompts {
            let id = prompt.id().to_string();
            builder.push_record([
                prompt.position().to_string(),
                short_id(&id).to_string(),
                prompt.estimated_tokens().to_string(),
                preview(prompt.content()),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_jobs_json(&self, jobs: &[ExecutionJob]) -> Result<String> {
        let json_jobs: Vec<serde_json::Value> = jobs
            .iter()
            .map(|j| {
                serde_json::json!({
                    "id": j.id.to_string(),
                    "tool_target": j.tool_target,
                    "execution_data": j.execution_data,
                    "batch_id": j.batch_id,
                    "priority": j.priority,
                    "status": j.status.as_str(),
                    "error_message": j.error_message,
                    "created_at": j.created_at,
                    "started_at": j.started_at,
                    "completed_at": j.completed_at,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_jobs)?)
    }

    fn format_jobs_table(&self, jobs: &[ExecutionJob]) -> String {
        if jobs.is_empty() {
            return self.colorize("No jobs queued.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Tool", "Status", "Priority", "Data"]);

        for job in jobs {
            let id = job.id.to_string();
            builder.push_record([
                short_id(&id).to_string(),
                job.tool_target.clone(),
                job.status.as_str().to_string(),
                job.priority.to_string(),
                preview(&job.execution_data),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format an extraction summary line.
    pub fn extraction_summary(&self, prompts: &[ExtractedPrompt]) -> String {
        let tokens: usize = prompts.iter().map(|p| p.estimated_tokens()).sum();
        self.success(&format!(
            "Extracted {} prompt(s), ~{} tokens",
            prompts.len(),
            tokens
        ))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// First block of a UUID string
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Single-line, length-capped view of prompt text
fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS - 1).collect();
    format!("{}…", cut)
}
