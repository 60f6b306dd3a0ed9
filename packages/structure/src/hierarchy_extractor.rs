//! Text-based hierarchy levels for documents without a domain grammar.
//!
//! Used by the TXT reader to fill tag hints and by the default extractor.
//! Named units (`глава`, `статья`, ...) rank first, header tags next, then
//! list items by the shape of their numbering.

use regex::Regex;
use std::sync::LazyLock;

use crate::line::LineWithMeta;
use crate::list_features::get_dotted_item_depth;
use crate::types::{line_type, HierarchyLevel, Level};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CHAPTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(статья|пункт|параграф|глава|определение)\s*([0-9]+\.)*([0-9]+\.?)")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOTTED_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+\.)+([0-9]+\.?)?(\s|$)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOTTED_WITHOUT_SPACE_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.[a-z]").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BRACKET_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(([а-я]|[a-z])\))").expect("valid regex"));

/// Numbers above this in a dotted header are dates, not items.
const MAX_ITEM_NUMBER: u32 = 1900;

/// Longer leading tokens are rarely list numbers.
const MAX_ITEM_TOKEN_LEN: usize = 9;

/// Single-pass extractor of hierarchy levels from line text and tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyLevelExtractor;

impl HierarchyLevelExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Assign a hierarchy level to every line.
    ///
    /// An existing level is only replaced by one with a defined `level_1`.
    #[must_use]
    pub fn get_hierarchy_level(&self, lines: Vec<LineWithMeta>) -> Vec<LineWithMeta> {
        let mut previous_line_text: Option<String> = None;

        lines
            .into_iter()
            .map(|mut line| {
                let extracted = self.single_line(&line, previous_line_text.as_deref());
                let level = match line.hierarchy_level() {
                    Some(existing) if !extracted.level_1.is_defined() => existing.clone(),
                    _ => extracted,
                };
                if !level.is_raw_text() {
                    previous_line_text = Some(line.line().to_string());
                }
                line.set_hierarchy_level(level);
                line
            })
            .collect()
    }

    fn single_line(&self, line: &LineWithMeta, previous_line_text: Option<&str>) -> HierarchyLevel {
        let text = line.line().to_lowercase();
        let text = text.trim();

        if CHAPTER.is_match(text) {
            return Self::get_named(text);
        }

        let tag = line.tag_hierarchy_level();
        if tag.line_type == line_type::HEADER {
            let depth = match tag.level_2 {
                Level::Defined(n) if n > 0 => Some(n as usize),
                _ => Self::dotted_header_depth(text),
            };
            return Self::default_tag_header(depth);
        }

        Self::get_list_level(text, previous_line_text)
    }

    /// Level of a named unit: `глава` ranks above `статья`, then `пункт`,
    /// `параграф` and `№`.
    #[must_use]
    pub fn get_named(text: &str) -> HierarchyLevel {
        let text = text.trim();
        let rank = [("глава", 1), ("статья", 2), ("пункт", 3), ("параграф", 4), ("№", 5)]
            .into_iter()
            .find_map(|(word, rank)| text.starts_with(word).then_some(rank));
        match rank {
            Some(rank) => HierarchyLevel::new(Some(1), Some(rank), false, line_type::NAMED_HEADER),
            None => HierarchyLevel::create_raw_text(),
        }
    }

    /// Level of a line the reader tagged as header.
    #[must_use]
    pub fn default_tag_header(depth: Option<usize>) -> HierarchyLevel {
        let depth = depth
            .and_then(|d| u32::try_from(d).ok())
            .filter(|&d| d > 0)
            .unwrap_or(1);
        HierarchyLevel::new(Some(1), Some(depth), true, line_type::NAMED_HEADER)
    }

    /// Dotted depth of a header line, ignoring dates such as `9.05.1945`.
    fn dotted_header_depth(text: &str) -> Option<usize> {
        let first = text.split_whitespace().next()?;
        let numbers: Vec<&str> = if DOTTED_NUM.is_match(text) {
            if first.chars().count() > MAX_ITEM_TOKEN_LEN {
                return None;
            }
            first.split('.').filter(|n| !n.is_empty()).collect()
        } else if DOTTED_WITHOUT_SPACE_NUM.is_match(text) {
            text.split('.').take(1).collect()
        } else {
            return None;
        };

        numbers
            .iter()
            .all(|n| n.parse::<u32>().is_ok_and(|n| n <= MAX_ITEM_NUMBER))
            .then_some(numbers.len())
    }

    /// Level of a list item judged by its numbering alone.
    ///
    /// `6)` right after an `а)` item is read as `б)`: OCR often confuses them.
    #[must_use]
    pub fn get_list_level(text: &str, previous_line_text: Option<&str>) -> HierarchyLevel {
        let list_item = |level_1: u32, level_2: u32| {
            HierarchyLevel::new(Some(level_1), Some(level_2), false, line_type::LIST_ITEM)
        };

        if let Some(depth) = get_dotted_item_depth(text) {
            return list_item(2, u32::try_from(depth).unwrap_or(u32::MAX));
        }

        if BRACKET_NUM.is_match(text) {
            let first = text.split_whitespace().next().unwrap_or_default();
            let follows_letter_a = previous_line_text
                .is_some_and(|p| p.trim().starts_with("a)") || p.trim().starts_with("а)"));
            if first == "6)" && follows_letter_a {
                return list_item(4, 1);
            }
            let depth = first.split('.').filter(|n| !n.is_empty()).count();
            return list_item(3, u32::try_from(depth).unwrap_or(u32::MAX));
        }

        if LETTER.is_match(text) {
            return list_item(4, 1);
        }

        HierarchyLevel::create_raw_text()
    }
}
