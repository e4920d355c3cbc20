//! Fragment filtering: minimum length and document scaffolding

use crate::config::ExtractorConfig;
use regex::Regex;
use std::sync::LazyLock;

/// Patterns for fragments that are document scaffolding rather than prompts.
/// Matched against the whole trimmed fragment.
static BOILERPLATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^[-=]{3,}$",
        r"^\*{3,}$",
        r"(?i)^page\s*\d+",
        r"(?i)^(?:table of contents|index|references?|bibliography)$",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("invalid boilerplate pattern"))
    .collect()
});

/// Whether a trimmed fragment is scaffolding
pub(crate) fn is_boilerplate(fragment: &str) -> bool {
    BOILERPLATE.iter().any(|re| re.is_match(fragment))
}

/// Trim a fragment and return it if it should become a prompt
pub(crate) fn keep_fragment<'a>(fragment: &'a str, config: &ExtractorConfig) -> Option<&'a str> {
    let trimmed = fragment.trim();

    if trimmed.chars().count() <= config.min_prompt_chars {
        return None;
    }
    if config.filter_boilerplate && is_boilerplate(trimmed) {
        return None;
    }

    Some(trimmed)
}
