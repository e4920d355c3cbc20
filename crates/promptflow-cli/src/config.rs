//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use promptflow_domain::QuotaType;
use promptflow_extractor::ExtractorConfig;
use promptflow_queue::InMemoryUsageMeter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Usage limits applied per invocation
    #[serde(default)]
    pub quotas: Quotas,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// REPL history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Usage limits; an absent limit means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotas {
    /// Characters of source text accepted for extraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_extraction_chars: Option<u64>,

    /// Prompts passed through the optimizer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_optimizations: Option<u64>,

    /// Jobs submitted to the queue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_jobs: Option<u64>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding config and history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".promptflow"))
    }

    /// Default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or defaults when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.extractor.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Quotas {
    /// Build a fresh usage meter carrying these limits.
    pub fn meter(&self) -> InMemoryUsageMeter {
        [
            (QuotaType::BatchExtractionChars, self.batch_extraction_chars),
            (QuotaType::PromptOptimizations, self.prompt_optimizations),
            (QuotaType::ExecutionJobs, self.execution_jobs),
        ]
        .into_iter()
        .fold(InMemoryUsageMeter::new(), |meter, (quota, limit)| match limit {
            Some(limit) => meter.with_limit(quota, limit),
            None => meter,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.extractor, ExtractorConfig::default());
        assert_eq!(config.quotas, Quotas::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.settings.history_size, 1000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.extractor.min_prompt_chars = 15;
        config.quotas.batch_extraction_chars = Some(20_000);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert_eq!(loaded.extractor.min_prompt_chars, 15);
        assert_eq!(loaded.quotas.batch_extraction_chars, Some(20_000));
        assert_eq!(loaded.quotas.execution_jobs, None);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[quotas]\nexecution_jobs = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.quotas.execution_jobs, Some(5));
        assert_eq!(config.extractor.chars_per_token, 4);
    }

    #[test]
    fn test_invalid_extractor_section_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\nchars_per_token = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_quotas_build_meter() {
        let quotas = Quotas {
            execution_jobs: Some(3),
            ..Default::default()
        };
        let meter = quotas.meter();
        assert_eq!(meter.limit(QuotaType::ExecutionJobs), Some(3));
        assert_eq!(meter.limit(QuotaType::BatchExtractionChars), None);
    }
}
