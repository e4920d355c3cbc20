//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
///
/// With the defaults, fragments of ten characters or fewer are dropped and
/// four characters count as one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Fragments whose trimmed length is at or below this are dropped (characters)
    pub min_prompt_chars: usize,

    /// Characters per estimated token
    pub chars_per_token: usize,

    /// Drop document scaffolding such as page markers and TOC headings
    pub filter_boilerplate: bool,

    /// Input beyond this many characters is ignored; `None` accepts any length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_chars: Option<usize>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chars_per_token == 0 {
            return Err("chars_per_token must be greater than 0".to_string());
        }
        if let Some(max_input_chars) = self.max_input_chars {
            if max_input_chars == 0 {
                return Err("max_input_chars must be greater than 0".to_string());
            }
            if self.min_prompt_chars >= max_input_chars {
                return Err("min_prompt_chars must be below max_input_chars".to_string());
            }
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_prompt_chars: 10,
            chars_per_token: 4,
            filter_boilerplate: true,
            max_input_chars: None,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: only keeps fragments long enough to be real instructions
    pub fn strict() -> Self {
        Self {
            min_prompt_chars: 20,
            ..Self::default()
        }
    }

    /// Lenient preset: keeps short fragments and document scaffolding
    pub fn lenient() -> Self {
        Self {
            min_prompt_chars: 3,
            filter_boilerplate: false,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::strict().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_zero_chars_per_token_rejected() {
        let config = ExtractorConfig {
            chars_per_token: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_chars_must_fit_input() {
        let config = ExtractorConfig {
            min_prompt_chars: 100,
            max_input_chars: Some(100),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("min_prompt_chars = 25").unwrap();
        assert_eq!(config.min_prompt_chars, 25);
        assert_eq!(config.chars_per_token, 4);
        assert!(config.filter_boilerplate);
        assert_eq!(config.max_input_chars, None);
    }

    #[test]
    fn test_input_cap_from_toml() {
        let config = ExtractorConfig::from_toml("max_input_chars = 2000").unwrap();
        assert_eq!(config.max_input_chars, Some(2000));
        assert!(config.validate().is_ok());

        let zero = ExtractorConfig::from_toml("max_input_chars = 0").unwrap();
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::lenient();
        let parsed = ExtractorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
