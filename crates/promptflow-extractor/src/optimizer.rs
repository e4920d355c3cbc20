//! Prompt rewriting heuristic applied before execution

use regex::Regex;
use std::sync::LazyLock;

/// Single-line prompts longer than this are split into sentences
const SPLIT_THRESHOLD_CHARS: usize = 100;

/// Words that mark a prompt as already phrased as a request.
/// Matched case-insensitively as substrings.
const ACTION_WORDS: &[&str] = &[
    "create",
    "write",
    "make",
    "build",
    "generate",
    "design",
    "develop",
    "implement",
    "explain",
    "describe",
    "analyze",
    "summarize",
    "list",
    "help",
    "please",
    "can you",
    "could you",
    "would you",
];

/// A sentence and its run of terminators
static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("invalid sentence pattern"));

/// Rewrite a single prompt.
///
/// Long single-line prompts with more than two sentences get one sentence per
/// paragraph. Prompts without an action word are then turned into a request:
/// the text is lowercased and prefixed with `"Please "`. The split runs first
/// because the prefix check must see the final layout.
///
/// ```
/// use promptflow_extractor::optimize_prompt;
///
/// assert_eq!(optimize_prompt("A haiku about rain"), "Please a haiku about rain");
/// assert_eq!(optimize_prompt("Write a haiku"), "Write a haiku");
/// ```
pub fn optimize_prompt(prompt: &str) -> String {
    let mut optimized = prompt.to_string();

    if !optimized.contains('\n') && optimized.chars().count() > SPLIT_THRESHOLD_CHARS {
        if let Some(paragraphs) = split_sentences(&optimized) {
            optimized = paragraphs;
        }
    }

    let lowered = optimized.to_lowercase();
    if !ACTION_WORDS.iter().any(|word| lowered.contains(word)) {
        optimized = format!("Please {}", lowered);
    }

    optimized
}

/// Sentences joined by blank lines, or `None` when there are two or fewer
fn split_sentences(text: &str) -> Option<String> {
    let sentences: Vec<&str> = SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect();

    (sentences.len() > 2).then(|| sentences.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three short sentences padded with a fourth to exactly `len` ASCII chars
    fn sentences_of_len(len: usize) -> String {
        let head = "Make a plan. Write it down. Ship it today. ";
        let text = format!("{}{}.", head, "z".repeat(len - head.len() - 1));
        assert_eq!(text.len(), len);
        text
    }

    #[test]
    fn test_action_word_keeps_prompt_unchanged() {
        let prompt = "make a todo app with dark mode and user accounts and offline sync";
        assert_eq!(optimize_prompt(prompt), prompt);
    }

    #[test]
    fn test_missing_action_word_adds_please_and_lowercases() {
        assert_eq!(
            optimize_prompt("A Landing Page For My Bakery"),
            "Please a landing page for my bakery"
        );
    }

    #[test]
    fn test_action_word_match_is_case_insensitive() {
        assert_eq!(optimize_prompt("CREATE a logo"), "CREATE a logo");
        assert_eq!(optimize_prompt("Could You draft this"), "Could You draft this");
    }

    #[test]
    fn test_exactly_threshold_does_not_split() {
        let text = sentences_of_len(100);
        assert_eq!(optimize_prompt(&text), text);
    }

    #[test]
    fn test_over_threshold_splits_sentences() {
        let text = sentences_of_len(101);
        let optimized = optimize_prompt(&text);
        let paragraphs: Vec<&str> = optimized.split("\n\n").collect();

        assert_eq!(paragraphs.len(), 4);
        assert_eq!(paragraphs[0], "Make a plan.");
        assert_eq!(paragraphs[1], "Write it down.");
        assert_eq!(paragraphs[2], "Ship it today.");
        assert!(paragraphs[3].ends_with("z."));
    }

    #[test]
    fn test_two_sentences_are_not_split() {
        let text = format!("Write the first part. {}", "y".repeat(120));
        assert_eq!(optimize_prompt(&text), text);
    }

    #[test]
    fn test_multiline_prompts_are_not_split() {
        let text = format!("Write one. Two.\nThree. {}", "w".repeat(120));
        assert_eq!(optimize_prompt(&text), text);
    }

    #[test]
    fn test_split_then_prefix() {
        let text = format!("The sky. The sea! The sun? {}", "q".repeat(100));
        let optimized = optimize_prompt(&text);
        assert!(optimized.starts_with("Please the sky.\n\nthe sea!\n\nthe sun?\n\n"));
    }

    #[test]
    fn test_empty_prompt_gets_prefix() {
        assert_eq!(optimize_prompt(""), "Please ");
    }
}
