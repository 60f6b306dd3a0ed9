//! Core data types for structure extraction.
//!
//! [`HierarchyLevel`] is the ordinal marker every line ends up carrying. Two
//! levels compare on `(level_1, level_2)` only, where an undefined component
//! sorts after every defined one. Lower means more important: the document
//! root is `(0, 0)`, raw text is `(undefined, undefined)`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StructureError};

/// Well-known line type tags.
pub mod line_type {
    pub const ROOT: &str = "root";
    pub const RAW_TEXT: &str = "raw_text";
    pub const UNKNOWN: &str = "unknown";
    pub const HEADER: &str = "header";
    pub const NAMED_HEADER: &str = "named_header";
    pub const LIST: &str = "list";
    pub const LIST_ITEM: &str = "list_item";
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
    pub const CELLAR: &str = "cellar";
    pub const APPLICATION: &str = "application";
    pub const FOOTER: &str = "footer";
    pub const STRUCTURE_UNIT: &str = "structure_unit";
    pub const TOC: &str = "toc";
    pub const TOC_ITEM: &str = "toc_item";
    pub const PART: &str = "part";
    pub const SECTION: &str = "section";
    pub const SUBSECTION: &str = "subsection";
    pub const CHAPTER: &str = "chapter";
    pub const PARAGRAPH: &str = "paragraph";
    pub const ARTICLE: &str = "article";
    pub const ARTICLE_PART: &str = "articlePart";
    pub const ITEM: &str = "item";
    pub const SUBITEM: &str = "subitem";
    pub const NAMED_ITEM: &str = "named_item";
    pub const PAGE_ID: &str = "page_id";
    /// Catch-all label of the law classifiers.
    pub const OTHER: &str = "Other";
}

/// One component of a hierarchy level.
///
/// `Undefined` orders after every `Defined` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum Level {
    Defined(u32),
    Undefined,
}

impl Level {
    /// Return the value if defined.
    #[must_use]
    pub fn value(self) -> Option<u32> {
        match self {
            Self::Defined(n) => Some(n),
            Self::Undefined => None,
        }
    }

    #[must_use]
    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

impl From<Option<u32>> for Level {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Undefined, Self::Defined)
    }
}

impl From<Level> for Option<u32> {
    fn from(level: Level) -> Self {
        level.value()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(n) => write!(f, "{n}"),
            Self::Undefined => f.write_str("None"),
        }
    }
}

/// Importance and depth marker attached to a line.
///
/// Equality and ordering only look at `(level_1, level_2)`; `line_type` and
/// `can_be_multiline` are payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyLevel {
    pub level_1: Level,
    pub level_2: Level,
    pub can_be_multiline: bool,
    pub line_type: String,
}

impl HierarchyLevel {
    /// Create a level from optional non-negative components.
    #[must_use]
    pub fn new(
        level_1: Option<u32>,
        level_2: Option<u32>,
        can_be_multiline: bool,
        line_type: impl Into<String>,
    ) -> Self {
        Self {
            level_1: level_1.into(),
            level_2: level_2.into(),
            can_be_multiline,
            line_type: line_type.into(),
        }
    }

    /// Create a level from signed components, rejecting negative values.
    ///
    /// # Examples
    /// ```
    /// use regelrecht_structure::types::HierarchyLevel;
    ///
    /// assert!(HierarchyLevel::try_new(Some(1), Some(0), true, "chapter").is_ok());
    /// assert!(HierarchyLevel::try_new(Some(-1), None, true, "chapter").is_err());
    /// ```
    pub fn try_new(
        level_1: Option<i64>,
        level_2: Option<i64>,
        can_be_multiline: bool,
        line_type: impl Into<String>,
    ) -> Result<Self> {
        let convert = |value: Option<i64>| -> Result<Option<u32>> {
            value
                .map(|v| u32::try_from(v).map_err(|_| StructureError::InvalidLevel { level_1, level_2 }))
                .transpose()
        };
        Ok(Self::new(
            convert(level_1)?,
            convert(level_2)?,
            can_be_multiline,
            line_type,
        ))
    }

    /// Level of the document root: `(0, 0, true, "root")`.
    #[must_use]
    pub fn create_root() -> Self {
        Self::new(Some(0), Some(0), true, line_type::ROOT)
    }

    /// Level of plain text: `(None, None, true, "raw_text")`.
    #[must_use]
    pub fn create_raw_text() -> Self {
        Self::new(None, None, true, line_type::RAW_TEXT)
    }

    /// Level of a line nobody classified: `(None, None, true, "unknown")`.
    #[must_use]
    pub fn create_unknown() -> Self {
        Self::new(None, None, true, line_type::UNKNOWN)
    }

    #[must_use]
    pub fn is_raw_text(&self) -> bool {
        self.line_type == line_type::RAW_TEXT
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.line_type == line_type::UNKNOWN
    }

    #[must_use]
    pub fn is_list_item(&self) -> bool {
        self.line_type == line_type::LIST_ITEM
    }

    /// Return a copy with a different line type.
    #[must_use]
    pub fn with_line_type(mut self, line_type: impl Into<String>) -> Self {
        self.line_type = line_type.into();
        self
    }

    fn key(&self) -> (Level, Level) {
        (self.level_1, self.level_2)
    }
}

impl PartialEq for HierarchyLevel {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HierarchyLevel {}

impl PartialOrd for HierarchyLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HierarchyLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HierarchyLevel(level_1={}, level_2={}, can_be_multiline={}, line_type={})",
            self.level_1, self.level_2, self.can_be_multiline, self.line_type
        )
    }
}

/// Document kinds with their own structure grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Russian federal and regional laws.
    Law,
    /// Acts of federal executive bodies (orders, statutes, instructions).
    Foiv,
    /// Technical specifications.
    Tz,
    /// Theses and similar academic papers.
    Diploma,
    /// Anything else; structure comes from configurable patterns.
    Default,
}

impl DocumentKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Law => "law",
            Self::Foiv => "foiv",
            Self::Tz => "tz",
            Self::Diploma => "diploma",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "law" => Ok(Self::Law),
            "foiv" => Ok(Self::Foiv),
            "tz" => Ok(Self::Tz),
            "diploma" => Ok(Self::Diploma),
            "default" | "other" => Ok(Self::Default),
            _ => Err(StructureError::UnknownDocumentKind(s.to_string())),
        }
    }
}

/// Contiguous document region with its own structural grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Header,
    Toc,
    Body,
    Cellar,
    Application,
}

impl Zone {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Toc => "toc",
            Self::Body => "body",
            Self::Cellar => "cellar",
            Self::Application => "application",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(l1: Option<u32>, l2: Option<u32>) -> HierarchyLevel {
        HierarchyLevel::new(l1, l2, true, "test")
    }

    #[test]
    fn test_level_ordering_undefined_is_greatest() {
        assert!(Level::Defined(u32::MAX) < Level::Undefined);
        assert!(Level::Defined(0) < Level::Defined(1));
        assert_eq!(Level::Undefined, Level::Undefined);
    }

    #[test]
    fn test_factories() {
        let root = HierarchyLevel::create_root();
        assert_eq!(root.level_1, Level::Defined(0));
        assert_eq!(root.level_2, Level::Defined(0));
        assert_eq!(root.line_type, "root");

        assert!(HierarchyLevel::create_raw_text().is_raw_text());
        assert!(HierarchyLevel::create_unknown().is_unknown());
        assert!(HierarchyLevel::create_raw_text().can_be_multiline);
    }

    #[test]
    fn test_raw_text_equals_raw_text() {
        assert_eq!(
            HierarchyLevel::create_raw_text(),
            HierarchyLevel::create_raw_text()
        );
        assert_eq!(
            HierarchyLevel::create_raw_text(),
            HierarchyLevel::create_unknown()
        );
    }

    #[test]
    fn test_defined_less_than_raw_text() {
        let raw = HierarchyLevel::create_raw_text();
        for l in [
            level(Some(0), Some(0)),
            level(Some(1), None),
            level(Some(100), Some(100)),
            level(Some(3), Some(2)),
        ] {
            assert!(l < raw, "{l} should be less than raw text");
        }
    }

    #[test]
    fn test_lexicographic_order() {
        assert!(level(Some(1), Some(5)) < level(Some(2), Some(0)));
        assert!(level(Some(1), Some(1)) < level(Some(1), Some(2)));
        assert!(level(Some(1), Some(1)) < level(Some(1), None));
        assert!(level(Some(1), None) < level(None, Some(0)));
        assert_eq!(level(Some(2), Some(3)), level(Some(2), Some(3)));
    }

    #[test]
    fn test_total_order_laws() {
        let values = [None, Some(0), Some(1), Some(3)];
        let mut levels = Vec::new();
        for l1 in values {
            for l2 in values {
                levels.push(level(l1, l2));
            }
        }

        for a in &levels {
            for b in &levels {
                let relations = [a < b, a == b, b < a];
                assert_eq!(relations.iter().filter(|r| **r).count(), 1);
                for c in &levels {
                    if a < b && b < c {
                        assert!(a < c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_equality_ignores_line_type() {
        let a = HierarchyLevel::new(Some(1), Some(1), true, "chapter");
        let b = HierarchyLevel::new(Some(1), Some(1), false, "article");
        assert_eq!(a, b);
    }

    #[test]
    fn test_try_new_rejects_negative() {
        let err = HierarchyLevel::try_new(Some(1), Some(-2), true, "item").unwrap_err();
        assert!(matches!(err, StructureError::InvalidLevel { .. }));
        assert!(HierarchyLevel::try_new(None, None, true, "raw_text").is_ok());
    }

    #[test]
    fn test_queries() {
        let item = HierarchyLevel::new(Some(2), Some(1), false, line_type::LIST_ITEM);
        assert!(item.is_list_item());
        assert!(!item.is_raw_text());
        assert!(!item.is_unknown());
    }

    #[test]
    fn test_level_serializes_as_option() {
        let json = serde_json::to_string(&HierarchyLevel::create_raw_text()).unwrap();
        assert_eq!(
            json,
            r#"{"level_1":null,"level_2":null,"can_be_multiline":true,"line_type":"raw_text"}"#
        );
    }

    #[test]
    fn test_document_kind_from_str() {
        assert_eq!("law".parse::<DocumentKind>().unwrap(), DocumentKind::Law);
        assert_eq!("TZ".parse::<DocumentKind>().unwrap(), DocumentKind::Tz);
        assert!("contract".parse::<DocumentKind>().is_err());
    }
}
