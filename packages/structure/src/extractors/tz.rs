//! Technical specification structure extraction.

use super::{SplitRule, StructureExtractor, TokenSplitter};
use crate::builders::toc::is_toc_title;
use crate::builders::{BuilderRegistry, LabeledLine};
use crate::classifier::{predict_checked, LineClassifier};
use crate::config::SECTIONED_INIT_DEPTH;
use crate::error::Result;
use crate::line::UnstructuredDocument;
use crate::prefix::bullet::BULLET_REGEX;
use crate::regexps::{ENDS_OF_NUMBER, NUMBER, SUBITEM};
use crate::types::{line_type, DocumentKind, Zone};

/// Extractor for technical specifications: header, TOC and body.
pub struct TzStructureExtractor {
    classifier: Box<dyn LineClassifier>,
    registry: BuilderRegistry,
    splitter: TokenSplitter,
}

impl TzStructureExtractor {
    #[must_use]
    pub fn new(classifier: Box<dyn LineClassifier>) -> Self {
        Self {
            classifier,
            registry: BuilderRegistry::with_defaults(),
            splitter: TokenSplitter::new(
                vec![line_type::ITEM],
                vec![
                    SplitRule::new(&BULLET_REGEX, None),
                    SplitRule::new(&NUMBER, Some(&ENDS_OF_NUMBER)),
                    SplitRule::new(&SUBITEM, Some(&ENDS_OF_NUMBER)),
                ],
            ),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: BuilderRegistry) -> Self {
        self.registry = registry;
        self
    }
}

/// Header, TOC and body zones of a labelled TZ.
///
/// The body starts at the first `part` or `item`, or after the last `toc`
/// or `title` label. A TOC starts at a `toc` label or a TOC title line.
fn split_zones(labeled: Vec<LabeledLine>) -> (Vec<LabeledLine>, Vec<LabeledLine>, Vec<LabeledLine>) {
    let last_toc_line = labeled
        .iter()
        .enumerate()
        .filter(|(_, (_, label))| label == line_type::TOC || label == line_type::TITLE)
        .map(|(index, _)| index)
        .max()
        .unwrap_or(0);

    let (mut header, mut toc, mut body) = (Vec::new(), Vec::new(), Vec::new());
    let mut is_toc_begun = false;
    let mut is_body_begun = false;
    for (index, (line, label)) in labeled.into_iter().enumerate() {
        if is_body_begun || label == line_type::PART || label == line_type::ITEM || index > last_toc_line {
            is_body_begun = true;
            body.push((line, label));
        } else if label == line_type::TOC || is_toc_begun {
            is_toc_begun = true;
            toc.push((line, label));
        } else if is_toc_title(line.line()) {
            is_toc_begun = true;
            toc.push((line, line_type::TOC.to_string()));
        } else {
            header.push((line, label));
        }
    }
    (header, toc, body)
}

impl StructureExtractor for TzStructureExtractor {
    fn name(&self) -> &'static str {
        DocumentKind::Tz.as_str()
    }

    fn extract(&self, mut document: UnstructuredDocument) -> Result<UnstructuredDocument> {
        let predictions = predict_checked(self.classifier.as_ref(), &document.lines)?;
        let labeled: Vec<LabeledLine> = std::mem::take(&mut document.lines).into_iter().zip(predictions).collect();
        let (header, toc, body) = split_zones(labeled);
        tracing::debug!(
            header = header.len(),
            toc = toc.len(),
            body = body.len(),
            "Extracting TZ structure"
        );

        let mut lines = self.registry.build(Zone::Header, DocumentKind::Tz, header, 0)?;
        lines.extend(self.registry.build(Zone::Toc, DocumentKind::Tz, toc, SECTIONED_INIT_DEPTH)?);
        lines.extend(self.registry.build(Zone::Body, DocumentKind::Tz, body, SECTIONED_INIT_DEPTH)?);
        document.lines = self.splitter.split(lines);
        Ok(document)
    }
}
