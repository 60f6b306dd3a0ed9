//! Law and FOIV structure extraction.
//!
//! A law document is modelled as a title, then a body opened by the first
//! structure unit, an optional cellar (signatures) and applications. Footers
//! may occur anywhere. The classifier's labels are forced into this model
//! before the zones are cut.

use regex::Regex;
use std::sync::LazyLock;

use super::{SplitRule, StructureExtractor, TokenSplitter};
use crate::builders::{BuilderRegistry, LabeledLine};
use crate::classifier::{predict_checked, LineClassifier};
use crate::config::{LAW_INIT_DEPTH, SPACED_TITLE_WORDS};
use crate::error::Result;
use crate::line::{LineWithMeta, UnstructuredDocument};
use crate::regexps::{ENDS_OF_NUMBER, FOIV_ITEM, ITEM_WITH_BRACKET, NUMBER, SUBITEM};
use crate::types::{line_type, DocumentKind, Zone};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LAW_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d*\.)*\d+[)|}]").expect("valid regex"));

/// Structure extractor for laws and executive acts.
pub struct LawStructureExtractor {
    document_kind: DocumentKind,
    classifier: Box<dyn LineClassifier>,
    registry: BuilderRegistry,
    splitter: TokenSplitter,
}

impl LawStructureExtractor {
    /// Extractor for federal and regional laws.
    #[must_use]
    pub fn law(classifier: Box<dyn LineClassifier>) -> Self {
        Self {
            document_kind: DocumentKind::Law,
            classifier,
            registry: BuilderRegistry::with_defaults(),
            splitter: law_splitter(),
        }
    }

    /// Extractor for acts of federal executive bodies.
    #[must_use]
    pub fn foiv(classifier: Box<dyn LineClassifier>) -> Self {
        Self {
            document_kind: DocumentKind::Foiv,
            classifier,
            registry: BuilderRegistry::with_defaults(),
            splitter: foiv_splitter(),
        }
    }

    /// Use a custom builder registry.
    #[must_use]
    pub fn with_registry(mut self, registry: BuilderRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn document_kind(&self) -> DocumentKind {
        self.document_kind
    }

    /// Cut labelled lines into zones and build each of them.
    fn build_zones(&self, labeled: Vec<LabeledLine>) -> Result<Vec<LineWithMeta>> {
        let mut zones: [(Zone, Vec<LabeledLine>); 4] = [
            (Zone::Header, Vec::new()),
            (Zone::Body, Vec::new()),
            (Zone::Cellar, Vec::new()),
            (Zone::Application, Vec::new()),
        ];

        let mut is_body_begun = false;
        let mut is_cellar_begun = false;
        let mut is_application_begun = false;
        for (line, label) in labeled {
            match label.as_str() {
                line_type::STRUCTURE_UNIT => is_body_begun = true,
                line_type::CELLAR => is_cellar_begun = true,
                line_type::APPLICATION => is_application_begun = true,
                _ => {}
            }
            let zone = if is_cellar_begun && !is_application_begun {
                2
            } else if is_application_begun {
                3
            } else if is_body_begun {
                1
            } else {
                0
            };
            zones[zone].1.push((line, label));
        }

        let mut lines = Vec::new();
        for (zone, lines_with_labels) in zones {
            lines.extend(self.registry.build(zone, self.document_kind, lines_with_labels, LAW_INIT_DEPTH)?);
        }
        Ok(lines)
    }
}

impl StructureExtractor for LawStructureExtractor {
    fn name(&self) -> &'static str {
        self.document_kind.as_str()
    }

    fn extract(&self, mut document: UnstructuredDocument) -> Result<UnstructuredDocument> {
        if document.is_txt_like() {
            document.lines = join_spaced_words(std::mem::take(&mut document.lines));
        }
        let predictions = predict_checked(self.classifier.as_ref(), &document.lines)?;
        let labels = fix_labels(&predictions);
        tracing::debug!(kind = %self.document_kind, lines = labels.len(), "Extracting law structure");

        let labeled: Vec<LabeledLine> = std::mem::take(&mut document.lines).into_iter().zip(labels).collect();
        let lines = self.build_zones(labeled)?;
        document.lines = self.splitter.split(lines);
        Ok(document)
    }
}

/// Splitting rules for law items: `1)`, `1.2.`, `а)`.
#[must_use]
pub fn law_splitter() -> TokenSplitter {
    TokenSplitter::new(
        vec![line_type::ITEM, line_type::ARTICLE_PART, line_type::SUBITEM],
        vec![
            SplitRule::new(&LAW_ITEM, None),
            SplitRule::new(&NUMBER, Some(&ENDS_OF_NUMBER)),
            SplitRule::new(&SUBITEM, Some(&ENDS_OF_NUMBER)),
        ],
    )
}

/// Splitting rules for FOIV items: `1.2. `, `1)`, `а)`.
#[must_use]
pub fn foiv_splitter() -> TokenSplitter {
    TokenSplitter::new(
        vec![line_type::ITEM, line_type::SUBITEM],
        vec![
            SplitRule::new(&FOIV_ITEM, None),
            SplitRule::new(&ITEM_WITH_BRACKET, Some(&ENDS_OF_NUMBER)),
            SplitRule::new(&SUBITEM, None),
        ],
    )
}

/// Join title words a TXT file spells letter by letter: `П Р И К А З`.
#[must_use]
pub fn join_spaced_words(lines: Vec<LineWithMeta>) -> Vec<LineWithMeta> {
    lines
        .into_iter()
        .map(|mut line| {
            let words: Vec<&str> = line
                .line()
                .split_whitespace()
                .filter(|w| w.chars().all(char::is_alphanumeric))
                .collect();
            if !words.is_empty() && words.iter().all(|w| w.chars().count() == 1) {
                let word = words.concat();
                if SPACED_TITLE_WORDS.contains(&word.to_lowercase().as_str()) {
                    line.set_line(format!("{word}\n"));
                }
            }
            line
        })
        .collect()
}

/// Zone boundaries of a label sequence, as indices.
///
/// `title_end` is the first structure unit, cellar or application.
/// `application_start` is the first application. `last_body_unit` is the
/// last structure unit before `application_start`, or `title_end` when there
/// is none. Missing boundaries are the sequence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelBounds {
    pub title_end: usize,
    pub last_body_unit: usize,
    pub application_start: usize,
}

impl LabelBounds {
    #[must_use]
    pub fn of<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut title_end = None;
        let mut application_start = None;
        let mut last_body_unit = None;
        for (index, label) in labels.iter().enumerate() {
            let label = label.as_ref();
            if title_end.is_none()
                && matches!(label, line_type::STRUCTURE_UNIT | line_type::CELLAR | line_type::APPLICATION)
            {
                title_end = Some(index);
            }
            if application_start.is_none() {
                if label == line_type::APPLICATION {
                    application_start = Some(index);
                } else if label == line_type::STRUCTURE_UNIT {
                    last_body_unit = Some(index);
                }
            }
        }
        let title_end = title_end.unwrap_or(labels.len());
        Self {
            title_end,
            last_body_unit: last_body_unit.unwrap_or(title_end),
            application_start: application_start.unwrap_or(labels.len()),
        }
    }

    /// `title_end <= last_body_unit <= application_start`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.title_end <= self.last_body_unit && self.last_body_unit <= self.application_start
    }
}

/// Force labels into the law document model.
///
/// Everything before the first structure unit, cellar or application is
/// title. Between that point and the last structure unit preceding the
/// applications, cellar and title labels become raw text; after it only
/// title does. Inside applications cellar and title become raw text.
/// Footers are kept everywhere.
#[must_use]
pub fn fix_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let LabelBounds {
        title_end,
        last_body_unit,
        application_start,
    } = LabelBounds::of(labels);

    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let label = label.as_ref();
            let fixed = if label == line_type::FOOTER {
                label
            } else if index < title_end {
                line_type::TITLE
            } else if index < last_body_unit || index >= application_start {
                match label {
                    line_type::CELLAR | line_type::TITLE => line_type::RAW_TEXT,
                    other => other,
                }
            } else if label == line_type::TITLE {
                line_type::RAW_TEXT
            } else {
                label
            };
            fixed.to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::StaticClassifier;
    use crate::line::LineMetadata;
    use pretty_assertions::assert_eq;

    fn document(texts: &[&str]) -> UnstructuredDocument {
        let lines = texts
            .iter()
            .enumerate()
            .map(|(i, t)| LineWithMeta::new(*t, LineMetadata::new(0, Some(i)), Vec::new()))
            .collect();
        UnstructuredDocument::new(lines)
    }

    #[test]
    fn test_fix_labels_title_and_body() {
        let labels = [
            "title", "raw_text", "title", "structure_unit", "title", "cellar", "structure_unit", "cellar",
            "application",
        ];
        assert_eq!(
            fix_labels(&labels),
            vec![
                "title", "title", "title", "structure_unit", "raw_text", "raw_text", "structure_unit",
                "cellar", "application",
            ]
        );
    }

    #[test]
    fn test_fix_labels_inside_applications() {
        let labels = [
            "structure_unit", "application", "title", "cellar", "title", "application", "structure_unit",
            "structure_unit", "structure_unit", "title",
        ];
        assert_eq!(
            fix_labels(&labels),
            vec![
                "structure_unit", "application", "raw_text", "raw_text", "raw_text", "application",
                "structure_unit", "structure_unit", "structure_unit", "raw_text",
            ]
        );
    }

    #[test]
    fn test_fix_labels_keeps_footer_and_length() {
        let labels = ["footer", "title", "footer", "structure_unit", "footer"];
        let fixed = fix_labels(&labels);
        assert_eq!(fixed, vec!["footer", "title", "footer", "structure_unit", "footer"]);
        assert!(fix_labels::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_fix_labels_without_structure_units() {
        let fixed = fix_labels(&["raw_text", "title", "raw_text"]);
        assert_eq!(fixed, vec!["title", "title", "title"]);
    }

    #[test]
    fn test_fix_labels_bounds_hold_for_every_short_sequence() {
        const ALPHABET: [&str; 6] = ["title", "structure_unit", "cellar", "application", "footer", "raw_text"];
        let mut checked = 0;
        for len in 0..=5u32 {
            for code in 0..ALPHABET.len().pow(len) {
                let mut rest = code;
                let labels: Vec<&str> = (0..len)
                    .map(|_| {
                        let label = ALPHABET[rest % ALPHABET.len()];
                        rest /= ALPHABET.len();
                        label
                    })
                    .collect();

                let fixed = fix_labels(&labels);
                assert_eq!(fixed.len(), labels.len(), "{labels:?}");
                let bounds = LabelBounds::of(&labels);
                assert!(bounds.is_ordered(), "{labels:?}");
                assert!(LabelBounds::of(&fixed).is_ordered(), "{labels:?} -> {fixed:?}");
                assert!(
                    fixed[..bounds.title_end].iter().all(|l| l == "title" || l == "footer"),
                    "{labels:?} -> {fixed:?}"
                );
                checked += 1;
            }
        }
        assert_eq!(checked, 1 + 6 + 36 + 216 + 1296 + 7776);
    }

    #[test]
    fn test_label_bounds() {
        let bounds = LabelBounds::of(&["title", "cellar", "structure_unit", "raw_text", "application", "structure_unit"]);
        assert_eq!(
            bounds,
            LabelBounds {
                title_end: 1,
                last_body_unit: 2,
                application_start: 4,
            }
        );
        assert_eq!(
            LabelBounds::of::<&str>(&[]),
            LabelBounds {
                title_end: 0,
                last_body_unit: 0,
                application_start: 0,
            }
        );
    }

    #[test]
    fn test_zones_are_built_in_order() {
        let doc = document(&["ЗАКОН", "О порядке", "Статья 1.", "Текст статьи", "Президент", "Приложение"]);
        let classifier = StaticClassifier::new([
            "title", "title", "structure_unit", "raw_text", "cellar", "application",
        ]);
        let result = LawStructureExtractor::law(Box::new(classifier)).extract(doc).unwrap();
        let kinds: Vec<String> = result.lines.iter().map(|l| l.level_or_raw().line_type).collect();
        assert_eq!(
            kinds,
            vec!["root", "root", "body", "article", "raw_text", "cellar", "application"]
        );
        assert_eq!(result.lines[2].line(), "");
    }

    #[test]
    fn test_join_spaced_words() {
        let lines = vec![
            LineWithMeta::from_text("П Р И К А З\n"),
            LineWithMeta::from_text("а б в\n"),
            LineWithMeta::from_text("О порядке\n"),
        ];
        let fixed = join_spaced_words(lines);
        assert_eq!(fixed[0].line(), "ПРИКАЗ\n");
        assert_eq!(fixed[1].line(), "а б в\n");
        assert_eq!(fixed[2].line(), "О порядке\n");
    }

    #[test]
    fn test_foiv_items_are_split() {
        let doc = document(&["ПРИКАЗ", "ПРИКАЗЫВАЮ:", "1. Утвердить положение.", "а) подпункт"]);
        let classifier = StaticClassifier::new(["title", "structure_unit", "structure_unit", "structure_unit"]);
        let result = LawStructureExtractor::foiv(Box::new(classifier)).extract(doc).unwrap();
        let texts: Vec<&str> = result.lines.iter().map(LineWithMeta::line).collect();
        assert!(texts.contains(&"1. "), "{texts:?}");
        assert!(texts.contains(&"Утвердить положение."), "{texts:?}");
        assert!(texts.contains(&"а)"), "{texts:?}");
    }

    #[test]
    fn test_label_count_mismatch_is_error() {
        let doc = document(&["a", "b"]);
        let classifier = StaticClassifier::new(["title"]);
        assert!(LawStructureExtractor::law(Box::new(classifier)).extract(doc).is_err());
    }
}
