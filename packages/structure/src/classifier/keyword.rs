//! Rule-based classifiers for plain text documents.
//!
//! These follow the document models the extractors expect and use the same
//! regex vocabulary as the builders. They are heuristics: good enough for
//! clean TXT input, no substitute for a trained model on scanned documents.

use regex::Regex;
use std::sync::LazyLock;

use super::LineClassifier;
use crate::builders::diploma::NAMED_ITEM_KEYWORDS;
use crate::builders::toc::is_toc_title;
use crate::builders::tz::NAMED_ITEM;
use crate::line::LineWithMeta;
use crate::list_features::get_dotted_item_depth;
use crate::prefix::bullet::BULLET_REGEX;
use crate::regexps::{
    APPLICATION_BEGIN, CELLAR_SIGNATURE, FOIV_ITEM, ITEM, ITEM_WITH_BRACKET, NAMED_UNIT, NUMBER,
    ROMAN, SUBITEM,
};
use crate::types::line_type;

/// Page number on its own line: `12`, `- 12 -`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PAGE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-–\s]*\d{1,4}[-–\s]*$").expect("valid regex"));

/// Enacting formula that opens the operative part of an act.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENACTING_FORMULA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(приказываю|постановляю|постановляет|решил[аи]?|решение)\s*:?$").expect("valid regex")
});

/// TOC entry ending in a page number.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TOC_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[….\s]+\d{1,3}(-\d{1,3})?$").expect("valid regex"));

/// Longest line still taken for a heading.
const MAX_HEADING_CHARS: usize = 120;

/// Law and FOIV labels: `title`, `structure_unit`, `raw_text`, `cellar`,
/// `application` and `footer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LawKeywordClassifier;

impl LawKeywordClassifier {
    fn opens_body(text: &str, lower: &str) -> bool {
        NAMED_UNIT.is_match(text) || ROMAN.is_match(text) || ITEM.is_match(text) || ENACTING_FORMULA.is_match(lower)
    }

    fn continues_body(text: &str) -> bool {
        NUMBER.is_match(text) || ITEM_WITH_BRACKET.is_match(text) || SUBITEM.is_match(text) || FOIV_ITEM.is_match(text)
    }
}

impl LineClassifier for LawKeywordClassifier {
    fn predict(&self, lines: &[LineWithMeta]) -> Vec<String> {
        let mut is_body_begun = false;
        lines
            .iter()
            .map(|line| {
                let text = line.line().trim();
                let lower = text.to_lowercase();
                let label = if text.is_empty() {
                    line_type::RAW_TEXT
                } else if PAGE_NUMBER.is_match(text) {
                    line_type::FOOTER
                } else if APPLICATION_BEGIN.is_match(&lower) {
                    line_type::APPLICATION
                } else if is_body_begun && CELLAR_SIGNATURE.is_match(text) {
                    line_type::CELLAR
                } else if Self::opens_body(text, &lower) || (is_body_begun && Self::continues_body(text)) {
                    is_body_begun = true;
                    line_type::STRUCTURE_UNIT
                } else if is_body_begun {
                    line_type::RAW_TEXT
                } else {
                    line_type::TITLE
                };
                label.to_string()
            })
            .collect()
    }
}

/// TZ labels: `title`, `toc`, `part`, `named_item`, `item` and `raw_text`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzKeywordClassifier;

impl TzKeywordClassifier {
    /// A numbered line whose words are all capitalised: `1. ОБЩИЕ СВЕДЕНИЯ`.
    fn is_part(text: &str) -> bool {
        get_dotted_item_depth(text) == Some(1)
            && text.chars().any(char::is_alphabetic)
            && text.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
    }
}

impl LineClassifier for TzKeywordClassifier {
    fn predict(&self, lines: &[LineWithMeta]) -> Vec<String> {
        let mut is_toc = false;
        let mut is_body_begun = false;
        lines
            .iter()
            .map(|line| {
                let text = line.line().trim();
                let lower = text.to_lowercase();
                if is_toc_title(text) {
                    is_toc = true;
                    return line_type::TOC.to_string();
                }
                if is_toc && (text.is_empty() || TOC_ENTRY.is_match(text)) {
                    return line_type::TOC.to_string();
                }
                is_toc = false;

                let label = if NAMED_ITEM.is_match(&lower) {
                    line_type::NAMED_ITEM
                } else if Self::is_part(text) {
                    line_type::PART
                } else if NUMBER.is_match(text) || (is_body_begun && (BULLET_REGEX.is_match(text) || SUBITEM.is_match(&lower))) {
                    line_type::ITEM
                } else if is_body_begun {
                    line_type::RAW_TEXT
                } else {
                    line_type::TITLE
                };
                if label != line_type::TITLE {
                    is_body_begun = true;
                }
                label.to_string()
            })
            .collect()
    }
}

/// Diploma labels: `title`, `named_item` and `raw_text`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiplomaKeywordClassifier;

impl DiplomaKeywordClassifier {
    fn is_named_item(text: &str) -> bool {
        let lower = text.to_lowercase();
        if text.chars().count() > MAX_HEADING_CHARS || text.ends_with([',', ';', ':']) {
            return false;
        }
        NAMED_ITEM_KEYWORDS.iter().any(|k| lower.starts_with(k))
            || (get_dotted_item_depth(&lower).is_some() && !text.ends_with('.'))
    }
}

impl LineClassifier for DiplomaKeywordClassifier {
    fn predict(&self, lines: &[LineWithMeta]) -> Vec<String> {
        let mut is_body_begun = false;
        lines
            .iter()
            .map(|line| {
                let text = line.line().trim();
                let label = if !text.is_empty() && Self::is_named_item(text) {
                    is_body_begun = true;
                    line_type::NAMED_ITEM
                } else if is_body_begun {
                    line_type::RAW_TEXT
                } else {
                    line_type::TITLE
                };
                label.to_string()
            })
            .collect()
    }
}
