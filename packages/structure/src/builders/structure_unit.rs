//! Levels of named structural units inside a law body.
//!
//! Depths are offsets from the zone's initial depth. For laws:
//!
//! | unit        | offset | multiline |
//! |-------------|--------|-----------|
//! | part        | +1     | yes       |
//! | section     | +2     | yes       |
//! | subsection  | +3     | yes       |
//! | chapter     | +4     | yes       |
//! | paragraph   | +5     | yes       |
//! | article     | +6     | yes       |
//! | articlePart | +7     | no        |
//! | item        | +8     | no        |
//! | subitem     | +9     | no        |

use regex::Regex;

use super::{fresh, plain_raw_text, sticky, LevelStep};
use crate::regexps::{FOIV_ITEM, ITEM_WITH_BRACKET, ROMAN, SUBITEM};
use crate::types::{line_type, HierarchyLevel};

/// Decides the level of a line labelled `structure_unit`.
pub trait StructureUnitBuilder: Send + Sync {
    /// Level of `text` (already stripped) given the inheritable level so far.
    fn structure_unit(
        &self,
        text: &str,
        init_hl_depth: u32,
        previous_hl: Option<&HierarchyLevel>,
    ) -> LevelStep;
}

fn inherit_or_raw(previous_hl: Option<&HierarchyLevel>) -> LevelStep {
    match previous_hl {
        Some(previous) => sticky(previous.clone()),
        None => fresh(plain_raw_text()),
    }
}

/// Structural units of federal and regional laws.
#[derive(Debug, Clone, Copy, Default)]
pub struct LawStructureUnit;

impl StructureUnitBuilder for LawStructureUnit {
    fn structure_unit(
        &self,
        text: &str,
        init_hl_depth: u32,
        previous_hl: Option<&HierarchyLevel>,
    ) -> LevelStep {
        let lower = text.to_lowercase();
        let unit = |offset: u32, kind: &str| {
            sticky(HierarchyLevel::new(Some(init_hl_depth + offset), Some(0), true, kind))
        };

        if lower.starts_with("часть") {
            return unit(1, line_type::PART);
        }
        if lower.starts_with("раздел") {
            return unit(2, line_type::SECTION);
        }
        if ROMAN.is_match(text) {
            return unit(3, line_type::SUBSECTION);
        }
        if lower.starts_with("глава") {
            return unit(4, line_type::CHAPTER);
        }
        if lower.starts_with('§') {
            return unit(5, line_type::PARAGRAPH);
        }
        if lower.starts_with("статья") {
            return unit(6, line_type::ARTICLE);
        }

        // Bracketed items come first: article parts may lack the dot.
        let numbered = |offset: u32, kind: &str| {
            fresh(HierarchyLevel::new(Some(init_hl_depth + offset), Some(0), false, kind))
        };
        if ITEM_WITH_BRACKET.is_match(text) {
            return numbered(8, line_type::ITEM);
        }
        if FOIV_ITEM.is_match(text) {
            return numbered(7, line_type::ARTICLE_PART);
        }
        if SUBITEM.is_match(text) {
            return numbered(9, line_type::SUBITEM);
        }

        inherit_or_raw(previous_hl)
    }
}

/// Structural units of acts of federal executive bodies.
///
/// Items and subitems are sticky, and `level_2` counts their number groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoivStructureUnit;

impl FoivStructureUnit {
    fn node_count(regex: &Regex, text: &str) -> Option<u32> {
        let found = regex.find(text)?;
        let count = found
            .as_str()
            .split('.')
            .filter(|node| !node.trim().is_empty())
            .count();
        Some(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

impl StructureUnitBuilder for FoivStructureUnit {
    fn structure_unit(
        &self,
        text: &str,
        init_hl_depth: u32,
        previous_hl: Option<&HierarchyLevel>,
    ) -> LevelStep {
        if text.to_lowercase().starts_with("глава") || ROMAN.is_match(text) {
            return sticky(HierarchyLevel::new(
                Some(init_hl_depth + 4),
                Some(0),
                true,
                line_type::CHAPTER,
            ));
        }

        let rules: [(&Regex, u32, &str); 3] = [
            (&ITEM_WITH_BRACKET, 9, line_type::SUBITEM),
            (&SUBITEM, 10, line_type::SUBITEM),
            (&FOIV_ITEM, 8, line_type::ITEM),
        ];
        for (regex, offset, kind) in rules {
            if let Some(nodes) = Self::node_count(regex, text) {
                return sticky(HierarchyLevel::new(
                    Some(init_hl_depth + offset),
                    Some(nodes),
                    false,
                    kind,
                ));
            }
        }

        inherit_or_raw(previous_hl)
    }
}
