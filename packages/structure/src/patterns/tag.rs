//! Patterns driven by the reader's tag hint.

use super::{normalized_text, LevelTemplate, Pattern};
use crate::line::LineWithMeta;
use crate::list_features::get_dotted_item_depth;
use crate::types::{line_type, HierarchyLevel};

fn dotted_depth(line: &LineWithMeta) -> Option<u32> {
    get_dotted_item_depth(&normalized_text(line)).and_then(|d| u32::try_from(d).ok())
}

/// Copies the tag hint, overriding the parts that are configured.
///
/// Matches every line, so it belongs at the end of a composition. Lines
/// with an unknown tag get the defaults.
#[derive(Debug, Clone)]
pub struct TagPattern {
    line_type: Option<String>,
    level_1: Option<u32>,
    level_2: Option<u32>,
    can_be_multiline: Option<bool>,
    default_line_type: String,
}

impl TagPattern {
    pub const NAME: &'static str = "tag";

    #[must_use]
    pub fn new(
        line_type: Option<String>,
        level_1: Option<u32>,
        level_2: Option<u32>,
        can_be_multiline: Option<bool>,
    ) -> Self {
        Self {
            line_type,
            level_1,
            level_2,
            can_be_multiline,
            default_line_type: line_type::RAW_TEXT.to_string(),
        }
    }

    /// Pattern copying tags as-is; untagged lines get `default_line_type`.
    #[must_use]
    pub fn fallback(default_line_type: impl Into<String>) -> Self {
        Self {
            default_line_type: default_line_type.into(),
            ..Self::new(None, None, None, None)
        }
    }
}

impl Pattern for TagPattern {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn matches(&self, _line: &LineWithMeta) -> bool {
        true
    }

    fn get_hierarchy_level(&self, line: &LineWithMeta) -> HierarchyLevel {
        let tag = line.tag_hierarchy_level();
        if tag.is_unknown() {
            return HierarchyLevel::new(
                self.level_1,
                self.level_2,
                self.can_be_multiline.unwrap_or(true),
                self.line_type.as_deref().unwrap_or(&self.default_line_type),
            );
        }
        HierarchyLevel::new(
            self.level_1.or(tag.level_1.value()),
            self.level_2.or(tag.level_2.value()),
            self.can_be_multiline.unwrap_or(tag.can_be_multiline),
            self.line_type.as_deref().unwrap_or(&tag.line_type),
        )
    }
}

/// Lines the reader tagged as headers.
///
/// Without a configured `level_2` the depth comes from dotted numbering, then
/// from the tag, then defaults to 1.
#[derive(Debug, Clone)]
pub struct TagHeaderPattern {
    template: LevelTemplate,
}

impl TagHeaderPattern {
    pub const NAME: &'static str = "tag_header";

    #[must_use]
    pub fn new(template: LevelTemplate) -> Self {
        Self { template }
    }
}

impl Pattern for TagHeaderPattern {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn matches(&self, line: &LineWithMeta) -> bool {
        let kind = &line.tag_hierarchy_level().line_type;
        kind == line_type::HEADER || kind == line_type::NAMED_HEADER
    }

    fn get_hierarchy_level(&self, line: &LineWithMeta) -> HierarchyLevel {
        let depth = dotted_depth(line)
            .or(line.tag_hierarchy_level().level_2.value())
            .unwrap_or(1);
        self.template.level(Some(depth))
    }
}

/// Lines the reader tagged as list items.
#[derive(Debug, Clone)]
pub struct TagListPattern {
    template: LevelTemplate,
}

impl TagListPattern {
    pub const NAME: &'static str = "tag_list";

    #[must_use]
    pub fn new(template: LevelTemplate) -> Self {
        Self { template }
    }
}

impl Pattern for TagListPattern {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn matches(&self, line: &LineWithMeta) -> bool {
        line.tag_hierarchy_level().is_list_item()
    }

    fn get_hierarchy_level(&self, line: &LineWithMeta) -> HierarchyLevel {
        let depth = dotted_depth(line)
            .or(line.tag_hierarchy_level().level_2.value())
            .unwrap_or(1);
        self.template.level(Some(depth))
    }
}
