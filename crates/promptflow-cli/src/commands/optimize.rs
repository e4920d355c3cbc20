//! Optimize command implementation.

use crate::cli::OptimizeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use promptflow_domain::QuotaType;
use promptflow_extractor::optimize_prompt;

/// Execute the optimize command.
pub fn execute_optimize(args: OptimizeArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let prompt = args.text.join(" ");
    if prompt.trim().is_empty() {
        return Err(CliError::InvalidInput("Prompt text is empty".to_string()));
    }

    session.charge(QuotaType::PromptOptimizations, 1)?;
    let optimized = optimize_prompt(&prompt);

    println!("{}", formatter.format_optimized(&prompt, &optimized)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, OutputFormat};

    #[test]
    fn test_empty_prompt_rejected() {
        let mut session = Session::from_config(&Config::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = OptimizeArgs {
            text: vec!["  ".to_string()],
        };

        assert!(matches!(
            execute_optimize(args, &mut session, &formatter),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_optimization_is_metered() {
        let mut session = Session::from_config(&Config::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = OptimizeArgs {
            text: vec!["write".to_string(), "a".to_string(), "haiku".to_string()],
        };

        execute_optimize(args, &mut session, &formatter).unwrap();
        assert_eq!(session.meter.usage(QuotaType::PromptOptimizations), 1);
    }
}
