//! Text patterns: regular expressions and start words.

use regex::Regex;

use super::{normalized_text, LevelTemplate, Pattern};
use crate::error::Result;
use crate::line::LineWithMeta;
use crate::types::HierarchyLevel;

/// Matches when the lowercase stripped text matches `regexp` at its start.
#[derive(Debug, Clone)]
pub struct RegexpPattern {
    regexp: Regex,
    template: LevelTemplate,
}

impl RegexpPattern {
    pub const NAME: &'static str = "regexp";

    /// Compile `regexp` and build the pattern.
    pub fn new(regexp: &str, template: LevelTemplate) -> Result<Self> {
        Ok(Self::from_regex(Regex::new(regexp)?, template))
    }

    #[must_use]
    pub fn from_regex(regexp: Regex, template: LevelTemplate) -> Self {
        Self { regexp, template }
    }
}

impl Pattern for RegexpPattern {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn matches(&self, line: &LineWithMeta) -> bool {
        self.regexp
            .find(&normalized_text(line))
            .is_some_and(|m| m.start() == 0)
    }

    fn get_hierarchy_level(&self, _line: &LineWithMeta) -> HierarchyLevel {
        self.template.level(None)
    }
}

/// Matches lines whose lowercase stripped text starts with a word.
#[derive(Debug, Clone)]
pub struct StartWordPattern {
    start_word: String,
    template: LevelTemplate,
}

impl StartWordPattern {
    pub const NAME: &'static str = "start_word";

    #[must_use]
    pub fn new(start_word: &str, template: LevelTemplate) -> Self {
        Self {
            start_word: start_word.trim().to_lowercase(),
            template,
        }
    }
}

impl Pattern for StartWordPattern {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn matches(&self, line: &LineWithMeta) -> bool {
        normalized_text(line).starts_with(&self.start_word)
    }

    fn get_hierarchy_level(&self, _line: &LineWithMeta) -> HierarchyLevel {
        self.template.level(None)
    }
}
