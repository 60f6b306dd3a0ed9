//! Line patterns and their ordered composition.
//!
//! A [`Pattern`] decides whether it applies to a line and, if so, which
//! [`HierarchyLevel`] the line gets. [`PatternComposition`] tries patterns in
//! order and the first match wins, so more specific patterns must come first.
//!
//! # Available patterns
//!
//! - [`RegexpPattern`]: lowercase stripped text matches a regex
//! - [`StartWordPattern`]: text starts with a word
//! - [`TagPattern`], [`TagHeaderPattern`], [`TagListPattern`]: reader tag hints
//! - [`ListPattern`]: dotted, bracket, letter, bullet and roman numbering

pub mod config;
pub mod list;
pub mod regexp;
pub mod tag;

use crate::line::LineWithMeta;
use crate::types::{line_type, HierarchyLevel};

pub use config::{pattern_from_value, pattern_names, patterns_from_str, patterns_from_value};
pub use list::{ListKind, ListPattern};
pub use regexp::{RegexpPattern, StartWordPattern};
pub use tag::{TagHeaderPattern, TagListPattern, TagPattern};

/// Trait for line patterns.
pub trait Pattern: Send + Sync {
    /// Registered name used in pattern configuration.
    fn name(&self) -> &'static str;

    /// Check if this pattern applies to the line.
    fn matches(&self, line: &LineWithMeta) -> bool;

    /// Level of a line this pattern matched.
    fn get_hierarchy_level(&self, line: &LineWithMeta) -> HierarchyLevel;
}

/// Level a pattern assigns, with `level_2` optionally decided per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTemplate {
    pub line_type: String,
    pub level_1: u32,
    pub level_2: Option<u32>,
    pub can_be_multiline: bool,
}

impl LevelTemplate {
    #[must_use]
    pub fn new(line_type: impl Into<String>, level_1: u32, level_2: Option<u32>, can_be_multiline: bool) -> Self {
        Self {
            line_type: line_type.into(),
            level_1,
            level_2,
            can_be_multiline,
        }
    }

    /// Level with the configured `level_2`, or `fallback` when none is set.
    #[must_use]
    pub fn level(&self, fallback: Option<u32>) -> HierarchyLevel {
        HierarchyLevel::new(
            Some(self.level_1),
            self.level_2.or(fallback),
            self.can_be_multiline,
            self.line_type.as_str(),
        )
    }
}

/// Ordered patterns; the first matching one assigns the level.
#[derive(Default)]
pub struct PatternComposition {
    patterns: Vec<Box<dyn Pattern>>,
}

impl PatternComposition {
    #[must_use]
    pub fn new(patterns: Vec<Box<dyn Pattern>>) -> Self {
        Self { patterns }
    }

    /// Patterns used when a caller configures none.
    #[must_use]
    pub fn default_patterns() -> Self {
        let list = |level_1, level_2| LevelTemplate::new(line_type::LIST_ITEM, level_1, level_2, false);
        Self::new(vec![
            Box::new(TagHeaderPattern::new(LevelTemplate::new(line_type::HEADER, 1, None, false))),
            Box::new(TagListPattern::new(list(2, None))),
            Box::new(ListPattern::new(ListKind::Dotted, list(2, None))),
            Box::new(ListPattern::new(ListKind::Bracket, list(3, Some(1)))),
            Box::new(ListPattern::new(ListKind::Letter, list(4, Some(1)))),
            Box::new(ListPattern::new(ListKind::Bullet, list(5, Some(1)))),
            Box::new(TagPattern::fallback(line_type::RAW_TEXT)),
        ])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Level from the first pattern matching the line, raw text otherwise.
    #[must_use]
    pub fn get_hierarchy_level(&self, line: &LineWithMeta) -> HierarchyLevel {
        match self.patterns.iter().find(|p| p.matches(line)) {
            Some(pattern) => {
                tracing::trace!(pattern = pattern.name(), line = line.line(), "Pattern matched");
                pattern.get_hierarchy_level(line)
            }
            None => HierarchyLevel::create_raw_text(),
        }
    }
}

impl std::fmt::Debug for PatternComposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.patterns.iter().map(|p| p.name()))
            .finish()
    }
}

/// Lowercase text without surrounding whitespace, as patterns compare it.
pub(crate) fn normalized_text(line: &LineWithMeta) -> String {
    line.line().trim().to_lowercase()
}
