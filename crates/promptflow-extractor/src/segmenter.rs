//! Input normalization and delimiter-based segmentation

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// A structural marker used as a cut point
struct Delimiter {
    name: &'static str,
    pattern: Regex,
}

/// Delimiters in application order.
///
/// Each pass splits every fragment produced by the previous pass. Matches are
/// consumed. A list, heading or label marker at the very start of a fragment
/// counts as a cut point just like one that follows a newline.
static DELIMITERS: LazyLock<Vec<Delimiter>> = LazyLock::new(|| {
    [
        // two or more blank lines between paragraphs
        ("blank_lines", r"\n(?:[ \t]*\n){2,}"),
        // horizontal rule
        ("rule", r"(?m)^[-=]{3,}[ \t]*$"),
        ("numbered", r"(?:\A|\n)\d+\.\s+"),
        ("bullet", r"(?:\A|\n)[•*-]\s+"),
        ("heading", r"(?:\A|\n)#{1,6}\s+"),
        ("prompt_label", r"(?i)(?:\A|\n)prompt(?:\s*\d+)?\s*:"),
        ("task_label", r"(?i)(?:\A|\n)task(?:\s*\d+)?\s*:"),
        ("request_label", r"(?i)(?:\A|\n)request(?:\s*\d+)?\s*:"),
    ]
    .into_iter()
    .map(|(name, pattern)| Delimiter {
        name,
        pattern: Regex::new(pattern).expect("invalid delimiter pattern"),
    })
    .collect()
});

/// Carriage returns ending a line, including stray repeats such as `\r\r\n`
static LINE_ENDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r+\n").expect("invalid line ending pattern"));

/// Trim the input and convert CRLF line endings to LF.
///
/// Normalizing an already normalized string returns it unchanged.
pub fn normalize(text: &str) -> String {
    LINE_ENDING.replace_all(text.trim(), "\n").into_owned()
}

/// Split normalized text into raw (untrimmed) fragments.
///
/// Fragments borrow from `text`; empty fragments are kept for the filter to drop.
pub(crate) fn segment(text: &str) -> Vec<&str> {
    let mut fragments = vec![text];

    for delimiter in DELIMITERS.iter() {
        fragments = fragments
            .into_iter()
            .flat_map(|fragment| delimiter.pattern.split(fragment))
            .collect();
        debug!(
            "Delimiter '{}' pass: {} fragments",
            delimiter.name,
            fragments.len()
        );
    }

    fragments
}
