//! Structure extractors: from labelled lines to hierarchy levels.
//!
//! Every extractor follows the same pipeline: classify lines, repair the
//! label sequence, cut the document into zones, run the zone builders and
//! finally split list tokens off their text.

pub mod classifying;
pub mod default;
pub mod diploma;
pub mod law;
pub mod toc;
pub mod tz;

use regex::Regex;

pub use classifying::ClassifyingLawExtractor;
pub use default::DefaultStructureExtractor;
pub use diploma::DiplomaStructureExtractor;
pub use law::LawStructureExtractor;
pub use toc::{TocExtractor, TocItem};
pub use tz::TzStructureExtractor;

use crate::classifier::{DiplomaKeywordClassifier, LawKeywordClassifier, TzKeywordClassifier};
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::line::{Annotation, LineOrigin, LineWithMeta, UnstructuredDocument};
use crate::patterns::PatternComposition;
use crate::types::{DocumentKind, HierarchyLevel};

/// Trait for document structure extractors.
pub trait StructureExtractor: Send + Sync {
    /// Short name used in logs and warnings.
    fn name(&self) -> &'static str;

    /// Assign a hierarchy level to every line of the document.
    fn extract(&self, document: UnstructuredDocument) -> Result<UnstructuredDocument>;
}

/// Leading token to cut off a line, with an optional tail filter.
///
/// `excluding` is searched inside the matched token and cuts it at its
/// start: `1.П` becomes `1.`, `4.7.\t` becomes `4.7.`.
#[derive(Debug, Clone)]
pub struct SplitRule {
    regexp: Regex,
    excluding: Option<Regex>,
}

impl SplitRule {
    #[must_use]
    pub fn new(regexp: &Regex, excluding: Option<&Regex>) -> Self {
        Self {
            regexp: regexp.clone(),
            excluding: excluding.cloned(),
        }
    }

    /// Byte range of the token in `text`, if the line starts with one.
    fn token(&self, text: &str) -> Option<(usize, usize)> {
        let found = self.regexp.find(text).filter(|m| m.start() == 0)?;
        let (start, mut end) = (found.start(), found.end());
        if let Some(excluding) = &self.excluding {
            if let Some(tail) = excluding.find(&text[start..end]) {
                end = start + tail.start();
            }
        }
        Some((start, end))
    }
}

/// Splits list tokens of selected line types into their own lines.
///
/// The token keeps the line's level and UID; the remaining text becomes a
/// raw text line derived from it. Empty raw text lines are dropped.
#[derive(Debug, Clone)]
pub struct TokenSplitter {
    line_types: Vec<&'static str>,
    rules: Vec<SplitRule>,
}

impl TokenSplitter {
    #[must_use]
    pub fn new(line_types: Vec<&'static str>, rules: Vec<SplitRule>) -> Self {
        Self { line_types, rules }
    }

    pub fn split(&self, lines: Vec<LineWithMeta>) -> Vec<LineWithMeta> {
        let mut result = Vec::with_capacity(lines.len());
        for line in lines {
            let level = line.level_or_raw();
            if level.is_raw_text() && line.is_empty() {
                continue;
            }
            if !self.line_types.contains(&level.line_type.as_str()) {
                result.push(line);
                continue;
            }
            match self.rules.iter().find_map(|rule| rule.token(line.line())) {
                Some((start, end)) => result.extend(split_token(&line, start, end)),
                None => result.push(line),
            }
        }
        result
    }
}

fn split_token(line: &LineWithMeta, start: usize, end: usize) -> Vec<LineWithMeta> {
    let text = line.line();
    let char_start = text[..start].chars().count();
    let char_end = char_start + text[start..end].chars().count();
    let char_len = line.len();

    let token = LineWithMeta::with_uid(
        &text[start..end],
        line.metadata.clone(),
        select_annotations(line.annotations(), char_start, char_end),
        line.uid(),
    );
    let mut pieces = vec![token];

    let rest = &text[end..];
    if !rest.is_empty() {
        let mut metadata = line.metadata.clone();
        metadata.hierarchy_level = Some(HierarchyLevel::create_raw_text());
        let mut rest_line = LineWithMeta::with_uid(
            rest,
            metadata,
            select_annotations(line.annotations(), char_end, char_len),
            line.uid(),
        );
        rest_line.set_derived_from(LineOrigin {
            uid: line.uid().to_string(),
            piece: 1,
        });
        pieces.push(rest_line);
    }
    pieces
}

/// Annotations of the character range `[start, end)`, rebased on `start`.
///
/// Table and attachment anchors only survive in a piece starting at 0.
#[must_use]
pub fn select_annotations(annotations: &[Annotation], start: usize, end: usize) -> Vec<Annotation> {
    annotations
        .iter()
        .filter_map(|annotation| {
            if annotation.is_anchor() {
                (start == 0).then(|| Annotation::new(0, end, &annotation.name, &annotation.value))
            } else if annotation.end > start && annotation.start <= end {
                Some(Annotation::new(
                    annotation.start.max(start) - start,
                    annotation.end.min(end) - start,
                    &annotation.name,
                    &annotation.value,
                ))
            } else {
                None
            }
        })
        .collect()
}

/// Name of the extractor that picks between law and FOIV by the act type.
pub const AUTO_LAW: &str = "auto-law";

/// Extractor for a document kind name, wired with the keyword classifiers.
///
/// `patterns` only applies to the default extractor.
pub fn extractor_for(
    kind: &str,
    patterns: Option<PatternComposition>,
    config: ExtractorConfig,
) -> Result<Box<dyn StructureExtractor>> {
    if kind == AUTO_LAW {
        let law = LawStructureExtractor::law(Box::new(LawKeywordClassifier));
        let foiv = LawStructureExtractor::foiv(Box::new(LawKeywordClassifier));
        return Ok(Box::new(ClassifyingLawExtractor::new(law, Some(foiv))?));
    }
    let document_kind: DocumentKind = kind.parse()?;
    if patterns.is_some() && document_kind != DocumentKind::Default {
        tracing::warn!(kind, "Patterns are ignored for this document kind");
    }
    let extractor: Box<dyn StructureExtractor> = match document_kind {
        DocumentKind::Law => Box::new(LawStructureExtractor::law(Box::new(LawKeywordClassifier))),
        DocumentKind::Foiv => Box::new(LawStructureExtractor::foiv(Box::new(LawKeywordClassifier))),
        DocumentKind::Tz => Box::new(TzStructureExtractor::new(Box::new(TzKeywordClassifier))),
        DocumentKind::Diploma => Box::new(DiplomaStructureExtractor::new(Box::new(DiplomaKeywordClassifier))),
        DocumentKind::Default => {
            let extractor = DefaultStructureExtractor::new(config);
            match patterns {
                Some(patterns) => Box::new(extractor.with_patterns(patterns)),
                None => Box::new(extractor),
            }
        }
    };
    Ok(extractor)
}

/// Every kind name accepted by [`extractor_for`].
pub const EXTRACTOR_NAMES: &[&str] = &["law", "foiv", AUTO_LAW, "tz", "diploma", "default"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::annotation::{BOLD, TABLE};
    use crate::line::LineMetadata;
    use crate::regexps::{ENDS_OF_NUMBER, NUMBER};
    use crate::types::line_type;
    use pretty_assertions::assert_eq;

    fn item(text: &str, annotations: Vec<Annotation>) -> LineWithMeta {
        let level = HierarchyLevel::new(Some(5), Some(1), false, line_type::ITEM);
        LineWithMeta::new(text, LineMetadata::new(0, Some(3)).with_hierarchy_level(level), annotations)
    }

    fn splitter() -> TokenSplitter {
        TokenSplitter::new(vec![line_type::ITEM], vec![SplitRule::new(&NUMBER, Some(&ENDS_OF_NUMBER))])
    }

    #[test]
    fn test_split_number_from_text() {
        let line = item("1.2. Пункт", vec![Annotation::new(0, 10, BOLD, "True")]);
        let pieces = splitter().split(vec![line.clone()]);
        assert_eq!(pieces.len(), 2);

        assert_eq!(pieces[0].line(), "1.2.");
        assert_eq!(pieces[0].uid(), line.uid());
        assert_eq!(pieces[0].level_or_raw().line_type, "item");
        assert_eq!(pieces[0].annotations(), &[Annotation::new(0, 4, BOLD, "True")]);

        assert_eq!(pieces[1].line(), " Пункт");
        assert!(pieces[1].level_or_raw().is_raw_text());
        assert_eq!(pieces[1].annotations(), &[Annotation::new(0, 6, BOLD, "True")]);
        assert_eq!(pieces[1].derived_from().map(|o| o.piece), Some(1));
        assert_eq!(pieces[1].metadata.line_id, Some(3));
    }

    #[test]
    fn test_excluding_regexp_trims_letter() {
        let pieces = splitter().split(vec![item("1.5.6.Закон", Vec::new())]);
        assert_eq!(pieces[0].line(), "1.5.6.");
        assert_eq!(pieces[1].line(), "Закон");
    }

    #[test]
    fn test_token_only_line_is_not_split() {
        let pieces = splitter().split(vec![item("12", Vec::new())]);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].line(), "12");
    }

    #[test]
    fn test_other_types_and_empty_raw_text() {
        let mut chapter = item("1. Глава", Vec::new());
        chapter.set_hierarchy_level(HierarchyLevel::new(Some(3), Some(0), true, line_type::CHAPTER));
        let empty = LineWithMeta::from_text("");
        let pieces = splitter().split(vec![chapter, empty]);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].line(), "1. Глава");
    }

    #[test]
    fn test_select_annotations_anchors() {
        let annotations = vec![
            Annotation::new(0, 1, TABLE, "t1"),
            Annotation::new(2, 8, BOLD, "True"),
        ];
        assert_eq!(
            select_annotations(&annotations, 0, 4),
            vec![Annotation::new(0, 4, TABLE, "t1"), Annotation::new(2, 4, BOLD, "True")]
        );
        assert_eq!(
            select_annotations(&annotations, 4, 10),
            vec![Annotation::new(0, 4, BOLD, "True")]
        );
    }

    #[test]
    fn test_extractor_for_every_name() {
        for name in EXTRACTOR_NAMES {
            let extractor = extractor_for(name, None, ExtractorConfig::default()).unwrap();
            assert_eq!(extractor.name(), *name);
        }
    }

    #[test]
    fn test_extractor_for_unknown_kind() {
        let err = extractor_for("novel", None, ExtractorConfig::default()).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Unknown document kind: 'novel'. Expected one of: law, foiv, auto-law, tz, diploma, default"
        );
    }
}
