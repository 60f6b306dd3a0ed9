//! Numbered and bulleted list patterns.

use regex::Regex;

use super::{normalized_text, LevelTemplate, Pattern};
use crate::line::LineWithMeta;
use crate::list_features::get_dotted_item_depth;
use crate::prefix::bracket::BRACKET_REGEX;
use crate::prefix::bullet::BULLET_REGEX;
use crate::prefix::dotted::DOTTED_REGEX;
use crate::prefix::letter::LETTER_REGEX;
use crate::prefix::roman::ROMAN_REGEX;
use crate::types::HierarchyLevel;

/// Numbering style recognised by a [`ListPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// `1.`, `1.2.3`
    Dotted,
    /// `1)`
    Bracket,
    /// `а)`, `b)`
    Letter,
    /// `-`, `•`
    Bullet,
    /// `iv.`
    Roman,
}

impl ListKind {
    /// Pattern name used in configuration.
    #[must_use]
    pub fn pattern_name(self) -> &'static str {
        match self {
            Self::Dotted => "dotted_list",
            Self::Bracket => "bracket_list",
            Self::Letter => "letter_list",
            Self::Bullet => "bullet_list",
            Self::Roman => "roman_list",
        }
    }

    fn regexp(self) -> &'static Regex {
        match self {
            Self::Dotted => &*DOTTED_REGEX,
            Self::Bracket => &*BRACKET_REGEX,
            Self::Letter => &*LETTER_REGEX,
            Self::Bullet => &*BULLET_REGEX,
            Self::Roman => &*ROMAN_REGEX,
        }
    }
}

/// Lines starting with a list token of one kind.
///
/// Dotted lists without a configured `level_2` use the numbering depth.
#[derive(Debug, Clone)]
pub struct ListPattern {
    kind: ListKind,
    template: LevelTemplate,
}

impl ListPattern {
    #[must_use]
    pub fn new(kind: ListKind, template: LevelTemplate) -> Self {
        Self { kind, template }
    }

    #[must_use]
    pub fn kind(&self) -> ListKind {
        self.kind
    }
}

impl Pattern for ListPattern {
    fn name(&self) -> &'static str {
        self.kind.pattern_name()
    }

    fn matches(&self, line: &LineWithMeta) -> bool {
        self.kind.regexp().is_match(&normalized_text(line))
    }

    fn get_hierarchy_level(&self, line: &LineWithMeta) -> HierarchyLevel {
        let depth = match self.kind {
            ListKind::Dotted => {
                get_dotted_item_depth(&normalized_text(line)).and_then(|d| u32::try_from(d).ok())
            }
            _ => None,
        };
        self.template.level(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(kind: ListKind) -> ListPattern {
        ListPattern::new(kind, LevelTemplate::new("list_item", 2, None, false))
    }

    fn matches(kind: ListKind, text: &str) -> bool {
        pattern(kind).matches(&LineWithMeta::from_text(text))
    }

    #[test]
    fn test_kinds_match_their_tokens() {
        assert!(matches(ListKind::Dotted, "1.2. Пункт"));
        assert!(!matches(ListKind::Dotted, "1) Пункт"));
        assert!(matches(ListKind::Bracket, "  12) пункт"));
        assert!(matches(ListKind::Letter, "Б) подпункт"));
        assert!(matches(ListKind::Bullet, "– пункт"));
        assert!(matches(ListKind::Roman, "IV. Раздел"));
        assert!(!matches(ListKind::Roman, "Введение. Раздел"));
    }

    #[test]
    fn test_dotted_depth() {
        let level = pattern(ListKind::Dotted).get_hierarchy_level(&LineWithMeta::from_text("3.1.4 Текст"));
        assert_eq!(level.level_2.value(), Some(3));
        assert!(!level.can_be_multiline);
    }

    #[test]
    fn test_configured_level_2_wins() {
        let pattern = ListPattern::new(ListKind::Dotted, LevelTemplate::new("point", 2, Some(7), false));
        let level = pattern.get_hierarchy_level(&LineWithMeta::from_text("3.1.4 Текст"));
        assert_eq!(level.level_2.value(), Some(7));
        assert_eq!(level.line_type, "point");
    }

    #[test]
    fn test_names() {
        assert_eq!(pattern(ListKind::Bracket).name(), "bracket_list");
        assert_eq!(pattern(ListKind::Roman).name(), "roman_list");
    }
}
