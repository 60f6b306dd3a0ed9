//! Plain text input.

use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::hierarchy_extractor::HierarchyLevelExtractor;
use crate::line::annotation::INDENTATION;
use crate::line::{Annotation, LineMetadata, LineWithMeta, UnstructuredDocument};

/// MIME type recorded for documents read from text.
pub const TXT_FILE_TYPE: &str = "text/plain";

/// Build a document from plain text.
///
/// Lines keep their `\n`. Text is normalised to NFC, so a decomposed `й`
/// reads the same as a precomposed one. The reader's tag hint of every line
/// comes from [`HierarchyLevelExtractor`].
#[must_use]
pub fn read_txt(text: &str) -> UnstructuredDocument {
    let normalized: String = text.nfc().collect();
    let lines: Vec<LineWithMeta> = normalized
        .split_inclusive('\n')
        .enumerate()
        .map(|(line_id, line)| {
            let indent = line
                .chars()
                .take_while(|c| c.is_whitespace() && *c != '\n')
                .count();
            let annotations = if indent > 0 {
                vec![Annotation::new(0, indent, INDENTATION, indent.to_string())]
            } else {
                Vec::new()
            };
            LineWithMeta::new(line, LineMetadata::new(0, Some(line_id)), annotations)
        })
        .collect();

    let lines = HierarchyLevelExtractor::new()
        .get_hierarchy_level(lines)
        .into_iter()
        .map(|mut line| {
            if let Some(tag) = line.metadata.hierarchy_level.take() {
                line.metadata.tag_hierarchy_level = tag;
            }
            line
        })
        .collect();

    tracing::debug!(bytes = text.len(), "Read plain text document");
    UnstructuredDocument::new(lines).with_file_type(TXT_FILE_TYPE)
}

/// Read a UTF-8 text file.
pub fn read_txt_file(path: &Path) -> Result<UnstructuredDocument> {
    let text = std::fs::read_to_string(path)?;
    Ok(read_txt(&text))
}
