//! Configuration constants and run-time options for structure extraction.

use serde::{Deserialize, Serialize};

/// Half-width of the sliding window used by list features.
pub const DEFAULT_WINDOW_SIZE: usize = 25;

/// Base depth of law zones. Body units nest at `LAW_INIT_DEPTH + 1..=+10`.
pub const LAW_INIT_DEPTH: u32 = 2;

/// Base depth of TOC and body zones in TZ and diploma documents.
pub const SECTIONED_INIT_DEPTH: u32 = 1;

/// Non-empty lines per batch when guessing the law type.
pub const LAW_TYPE_BATCH_SIZE: usize = 3;

/// Number of batches inspected when guessing the law type.
pub const LAW_TYPE_BATCH_COUNT: usize = 7;

/// Window used to fill gaps between detected TOC items.
pub const TOC_WINDOW_SIZE: usize = 5;

/// A table of contents needs more merged items than this.
pub const TOC_MIN_ITEMS: usize = 6;

/// Words that are joined back when a TXT file spells them with spaces.
pub const SPACED_TITLE_WORDS: &[&str] = &[
    "приказ",
    "положение",
    "требования",
    "постановление",
    "распоряжение",
    "перечень",
    "регламент",
    "закон",
    "указ",
    "инструкция",
    "утверждаю",
    "приложение",
    "утвержден",
    "утверждено",
    "утверждена",
    "утверждены",
];

/// Environment variable overriding the list window size.
pub const ENV_WINDOW_SIZE: &str = "STRUCTURE_WINDOW_SIZE";

/// Environment variable toggling list patching (`true`/`false`).
pub const ENV_PATCH_LISTS: &str = "STRUCTURE_PATCH_LISTS";

/// Run-time options shared by the extractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Half-width of the list feature window.
    pub window_size: usize,
    /// Run [`ListPatcher`](crate::list_patcher::ListPatcher) after the default extractor.
    pub patch_lists: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            patch_lists: true,
        }
    }
}

impl ExtractorConfig {
    /// Create configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let window_size = std::env::var(ENV_WINDOW_SIZE)
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&v: &usize| v > 0)
            .unwrap_or(defaults.window_size);
        let patch_lists = std::env::var(ENV_PATCH_LISTS)
            .ok()
            .and_then(|v| match v.to_lowercase().as_str() {
                "1" | "true" | "yes" => Some(true),
                "0" | "false" | "no" => Some(false),
                _ => None,
            })
            .unwrap_or(defaults.patch_lists);

        Self {
            window_size,
            patch_lists,
        }
    }

    /// Set the list feature window.
    #[must_use]
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Enable or disable list patching.
    #[must_use]
    pub fn with_patch_lists(mut self, patch_lists: bool) -> Self {
        self.patch_lists = patch_lists;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.window_size, 25);
        assert!(config.patch_lists);
    }

    #[test]
    fn test_builder_methods() {
        let config = ExtractorConfig::default()
            .with_window_size(5)
            .with_patch_lists(false);
        assert_eq!(config.window_size, 5);
        assert!(!config.patch_lists);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ExtractorConfig = serde_json::from_str(r#"{"window_size": 3}"#).unwrap();
        assert_eq!(config.window_size, 3);
        assert!(config.patch_lists);
    }
}
