//! Diploma thesis structure extraction.

use std::collections::HashSet;

use super::toc::TocExtractor;
use super::StructureExtractor;
use crate::builders::toc::is_toc_title;
use crate::builders::{BuilderRegistry, LabeledLine};
use crate::classifier::{predict_checked, LineClassifier};
use crate::config::SECTIONED_INIT_DEPTH;
use crate::error::Result;
use crate::line::{LineWithMeta, UnstructuredDocument};
use crate::types::{line_type, DocumentKind, Zone};

/// Extractor for theses: title page, table of contents and chapters.
///
/// The table of contents is found by [`TocExtractor`] and never reaches the
/// classifier.
pub struct DiplomaStructureExtractor {
    classifier: Box<dyn LineClassifier>,
    toc_extractor: TocExtractor,
    registry: BuilderRegistry,
}

impl DiplomaStructureExtractor {
    #[must_use]
    pub fn new(classifier: Box<dyn LineClassifier>) -> Self {
        Self {
            classifier,
            toc_extractor: TocExtractor::new(),
            registry: BuilderRegistry::with_defaults(),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: BuilderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Split off the TOC: its title (if any) followed by the merged items.
    fn take_toc(&self, lines: Vec<LineWithMeta>) -> (Vec<LineWithMeta>, Vec<LineWithMeta>) {
        let toc = self.toc_extractor.get_toc(&lines);
        if toc.is_empty() {
            tracing::debug!("No table of contents found");
            return (Vec::new(), lines);
        }

        let toc_uids: HashSet<&str> = toc
            .iter()
            .flat_map(|item| item.source_uids.iter().map(String::as_str))
            .collect();
        let first_toc_line = lines
            .iter()
            .position(|line| toc_uids.contains(line.uid()))
            .unwrap_or(lines.len());
        let title_index = lines[..first_toc_line]
            .iter()
            .rposition(|line| is_toc_title(line.line()));

        let mut toc_lines = Vec::with_capacity(toc.len() + 1);
        let mut rest = Vec::with_capacity(lines.len());
        for (index, line) in lines.into_iter().enumerate() {
            if Some(index) == title_index {
                toc_lines.push(line);
            } else if !toc_uids.contains(line.uid()) {
                rest.push(line);
            }
        }
        toc_lines.extend(toc.into_iter().map(|item| item.line));
        (toc_lines, rest)
    }
}

impl StructureExtractor for DiplomaStructureExtractor {
    fn name(&self) -> &'static str {
        DocumentKind::Diploma.as_str()
    }

    fn extract(&self, mut document: UnstructuredDocument) -> Result<UnstructuredDocument> {
        let (toc_lines, lines) = self.take_toc(std::mem::take(&mut document.lines));
        let predictions = predict_checked(self.classifier.as_ref(), &lines)?;

        let (header, body): (Vec<LabeledLine>, Vec<LabeledLine>) = lines
            .into_iter()
            .zip(predictions)
            .partition(|(_, label)| label == line_type::TITLE);
        let toc: Vec<LabeledLine> = toc_lines
            .into_iter()
            .map(|line| (line, line_type::TOC.to_string()))
            .collect();
        tracing::debug!(
            header = header.len(),
            toc = toc.len(),
            body = body.len(),
            "Extracting diploma structure"
        );

        let mut lines = self.registry.build(Zone::Header, DocumentKind::Diploma, header, 0)?;
        lines.extend(self.registry.build(Zone::Toc, DocumentKind::Diploma, toc, SECTIONED_INIT_DEPTH)?);
        lines.extend(self.registry.build(Zone::Body, DocumentKind::Diploma, body, SECTIONED_INIT_DEPTH)?);
        document.lines = lines;
        Ok(document)
    }
}
