//! Pattern-driven extraction for documents without a domain grammar.

use super::StructureExtractor;
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::line::UnstructuredDocument;
use crate::list_patcher::ListPatcher;
use crate::patterns::PatternComposition;
use crate::types::DocumentKind;

/// Extractor that assigns levels with a [`PatternComposition`].
///
/// Without explicit patterns the reader's tag hints and list numbering
/// decide the levels.
#[derive(Debug, Default)]
pub struct DefaultStructureExtractor {
    patterns: Option<PatternComposition>,
    config: ExtractorConfig,
}

impl DefaultStructureExtractor {
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            patterns: None,
            config,
        }
    }

    /// Use `patterns` instead of the default composition.
    #[must_use]
    pub fn with_patterns(mut self, patterns: PatternComposition) -> Self {
        self.patterns = Some(patterns);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}

impl StructureExtractor for DefaultStructureExtractor {
    fn name(&self) -> &'static str {
        DocumentKind::Default.as_str()
    }

    fn extract(&self, mut document: UnstructuredDocument) -> Result<UnstructuredDocument> {
        let default_patterns;
        let patterns = match &self.patterns {
            Some(patterns) => patterns,
            None => {
                default_patterns = PatternComposition::default_patterns();
                &default_patterns
            }
        };
        tracing::debug!(patterns = ?patterns, lines = document.lines.len(), "Extracting default structure");

        for line in &mut document.lines {
            let level = patterns.get_hierarchy_level(line);
            line.set_hierarchy_level(level);
        }
        if self.config.patch_lists {
            document.lines = ListPatcher::new().patch(std::mem::take(&mut document.lines));
        }
        Ok(document)
    }
}
