//! Prompt module - the unit produced by text extraction

use std::fmt;

/// Unique identifier for an extracted prompt, backed by a UUIDv7
///
/// Only uniqueness within one extraction batch matters; UUIDv7 gives that
/// without coordination and keeps ids sortable by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PromptId(u128);

impl PromptId {
    /// Generate a new UUIDv7-based PromptId
    ///
    /// # Examples
    ///
    /// ```
    /// use promptflow_domain::PromptId;
    ///
    /// let a = PromptId::new();
    /// let b = PromptId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a PromptId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a PromptId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid prompt id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for PromptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A prompt cut out of a larger body of text
///
/// Values are immutable once built. `original_prompt` records the text as it
/// was extracted so that a caller can revise `content` without losing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPrompt {
    id: PromptId,
    content: String,
    original_prompt: String,
    estimated_tokens: usize,
    position: usize,
}

impl ExtractedPrompt {
    /// Create a prompt whose content and original text are identical
    pub fn new(
        id: PromptId,
        content: impl Into<String>,
        estimated_tokens: usize,
        position: usize,
    ) -> Self {
        let content = content.into();
        Self {
            id,
            original_prompt: content.clone(),
            content,
            estimated_tokens,
            position,
        }
    }

    /// Return a copy with revised content.
    ///
    /// The id, position, original text and token estimate are carried over
    /// unchanged; the estimate always describes the extracted text.
    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self
        }
    }

    /// Identifier, unique within the extraction batch
    pub fn id(&self) -> PromptId {
        self.id
    }

    /// Current text of the prompt
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Text as it was extracted
    pub fn original_prompt(&self) -> &str {
        &self.original_prompt
    }

    /// Approximate token cost computed at extraction time
    pub fn estimated_tokens(&self) -> usize {
        self.estimated_tokens
    }

    /// Zero-based index in the filtered extraction result
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the content differs from the extracted text
    pub fn is_revised(&self) -> bool {
        self.content != self.original_prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_prompt_keeps_original() {
        let prompt = ExtractedPrompt::new(PromptId::new(), "Write a poem", 3, 0);
        assert_eq!(prompt.content(), "Write a poem");
        assert_eq!(prompt.original_prompt(), "Write a poem");
        assert!(!prompt.is_revised());
    }

    #[test]
    fn test_with_content_preserves_provenance() {
        let id = PromptId::new();
        let prompt = ExtractedPrompt::new(id, "Write a poem", 3, 2)
            .with_content("Please write a poem");

        assert_eq!(prompt.id(), id);
        assert_eq!(prompt.content(), "Please write a poem");
        assert_eq!(prompt.original_prompt(), "Write a poem");
        assert_eq!(prompt.estimated_tokens(), 3);
        assert_eq!(prompt.position(), 2);
        assert!(prompt.is_revised());
    }

    #[test]
    fn test_prompt_id_display_and_parse() {
        let id = PromptId::new();
        let id_str = id.to_string();
        assert_eq!(id_str.len(), 36);
        assert_eq!(PromptId::from_string(&id_str).unwrap(), id);
        assert!(PromptId::from_string("not-a-uuid").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: string round-trip preserves the id
        #[test]
        fn test_prompt_id_string_roundtrip(value: u128) {
            let id = PromptId::from_value(value);
            match PromptId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }

        /// Property: revising content never touches the original text
        #[test]
        fn test_with_content_keeps_original(original in ".{1,40}", revised in ".{0,40}") {
            let prompt = ExtractedPrompt::new(PromptId::new(), original.clone(), 1, 0)
                .with_content(revised.clone());
            prop_assert_eq!(prompt.original_prompt(), original.as_str());
            prop_assert_eq!(prompt.content(), revised.as_str());
        }
    }
}
