//! Promptflow Extractor
//!
//! Splits freeform text (pasted documents, chat logs, batch files) into a
//! sequence of discrete candidate prompts.
//!
//! # Pipeline
//!
//! ```text
//! Text → normalize → segment (ordered delimiter passes) → filter → ExtractedPrompt[]
//! ```
//!
//! - **Normalize**: trim the input and convert CRLF line endings to LF
//! - **Segment**: cut at blank-line runs, rule lines, list/heading markers and
//!   `Prompt:`/`Task:`/`Request:` labels, one pattern at a time over every fragment
//! - **Filter**: drop short fragments and document scaffolding (page markers,
//!   tables of contents, reference headings)
//! - **Materialize**: assign ids, positions and token estimates
//!
//! Extraction never fails. Text with nothing usable yields an empty result.
//!
//! # Example Usage
//!
//! ```
//! use promptflow_extractor::extract_prompts;
//!
//! let prompts = extract_prompts(
//!     "Write a story about a dragon.\n\n\nWrite a poem about the sea.",
//! );
//!
//! assert_eq!(prompts.len(), 2);
//! assert_eq!(prompts[0].content(), "Write a story about a dragon.");
//! assert_eq!(prompts[1].position(), 1);
//! ```
//!
//! The module also carries [`optimize_prompt`], a small rewriting heuristic
//! applied to single prompts before they are submitted for execution.

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod filter;
mod optimizer;
mod segmenter;
mod types;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{estimate_tokens, extract_prompts, PromptExtractor};
pub use optimizer::optimize_prompt;
pub use segmenter::normalize;
pub use types::{ExtractionOutcome, ExtractionSummary};
