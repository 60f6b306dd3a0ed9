//! Annotated lines and the documents made of them.
//!
//! All offsets are in characters (Unicode scalar values), not bytes.

pub mod annotation;
pub mod document;
pub mod merger;
pub mod metadata;

use std::ops::Add;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use annotation::Annotation;
pub use document::UnstructuredDocument;
pub use merger::AnnotationMerger;
pub use metadata::LineMetadata;

use crate::error::{Result, StructureError};
use crate::types::HierarchyLevel;

/// Where a derived line came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOrigin {
    /// UID of the line that was split.
    pub uid: String,
    /// Index of this piece among the split pieces.
    pub piece: usize,
}

/// A line of text with metadata and span annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineWithMeta {
    line: String,
    pub metadata: LineMetadata,
    annotations: Vec<Annotation>,
    uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    derived_from: Option<LineOrigin>,
}

/// Keep annotations that start inside a line of `len` characters, with
/// `start <= end <= len`. An empty line keeps the ones starting at 0.
fn clip_annotations(annotations: Vec<Annotation>, len: usize) -> Vec<Annotation> {
    annotations
        .into_iter()
        .filter(|a| a.start < len || a.start == 0)
        .map(|a| {
            let end = a.end.min(len).max(a.start);
            Annotation { end, ..a }
        })
        .collect()
}

impl LineWithMeta {
    /// Create a line with a fresh UID.
    ///
    /// Annotations reaching past the end of the text are clipped.
    #[must_use]
    pub fn new(line: impl Into<String>, metadata: LineMetadata, annotations: Vec<Annotation>) -> Self {
        Self::with_uid(line, metadata, annotations, uuid::Uuid::new_v4().to_string())
    }

    /// Create a line with an explicit UID.
    #[must_use]
    pub fn with_uid(
        line: impl Into<String>,
        metadata: LineMetadata,
        annotations: Vec<Annotation>,
        uid: impl Into<String>,
    ) -> Self {
        let line = line.into();
        let annotations = clip_annotations(annotations, line.chars().count());
        Self {
            line,
            metadata,
            annotations,
            uid: uid.into(),
            derived_from: None,
        }
    }

    /// Plain line without annotations.
    #[must_use]
    pub fn from_text(line: impl Into<String>) -> Self {
        Self::new(line, LineMetadata::default(), Vec::new())
    }

    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    #[must_use]
    pub fn derived_from(&self) -> Option<&LineOrigin> {
        self.derived_from.as_ref()
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.line.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    #[must_use]
    pub fn hierarchy_level(&self) -> Option<&HierarchyLevel> {
        self.metadata.hierarchy_level.as_ref()
    }

    /// Extracted level, or raw text when none was assigned yet.
    #[must_use]
    pub fn level_or_raw(&self) -> HierarchyLevel {
        self.metadata
            .hierarchy_level
            .clone()
            .unwrap_or_else(HierarchyLevel::create_raw_text)
    }

    pub fn set_hierarchy_level(&mut self, hierarchy_level: HierarchyLevel) {
        self.metadata.hierarchy_level = Some(hierarchy_level);
    }

    #[must_use]
    pub fn tag_hierarchy_level(&self) -> &HierarchyLevel {
        &self.metadata.tag_hierarchy_level
    }

    /// Replace the text, clipping annotations to the new length.
    pub fn set_line(&mut self, line: impl Into<String>) {
        self.line = line.into();
        let annotations = std::mem::take(&mut self.annotations);
        self.annotations = clip_annotations(annotations, self.len());
    }

    pub fn set_derived_from(&mut self, origin: LineOrigin) {
        self.derived_from = Some(origin);
    }

    /// Characters `[start, end)` of this line.
    ///
    /// Annotations are clipped to the slice and rebased; those outside of it
    /// are dropped. Metadata and UID are kept.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self> {
        let len = self.len();
        if start > end || end > len {
            return Err(StructureError::SliceOutOfRange { start, end, len });
        }

        let text: String = self.line.chars().skip(start).take(end - start).collect();
        let annotations = self
            .annotations
            .iter()
            .filter_map(|a| a.clip(start, end))
            .collect();

        Ok(Self {
            line: text,
            metadata: self.metadata.clone(),
            annotations,
            uid: self.uid.clone(),
            derived_from: self.derived_from.clone(),
        })
    }

    /// Split after every match of `separator`, keeping it in the piece before.
    ///
    /// A line without matches comes back as the only piece. Pieces other than
    /// a lone unsplit line record this line as their origin.
    pub fn split(&self, separator: &Regex) -> Result<Vec<Self>> {
        if separator.as_str().is_empty() {
            return Err(StructureError::EmptySeparator);
        }

        let mut borders = vec![0, self.len()];
        for m in separator.find_iter(&self.line) {
            borders.push(self.line[..m.end()].chars().count());
        }
        borders.sort_unstable();
        borders.dedup();

        if borders.len() <= 2 {
            return Ok(vec![self.clone()]);
        }

        borders
            .windows(2)
            .enumerate()
            .map(|(piece, pair)| {
                let mut line = self.slice(pair[0], pair[1])?;
                line.derived_from = Some(LineOrigin {
                    uid: self.uid.clone(),
                    piece,
                });
                Ok(line)
            })
            .collect()
    }

    /// Append `other`, shifting its annotations and merging touching ones.
    ///
    /// Metadata and UID come from `self`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let offset = self.len();
        let text = format!("{}{}", self.line, other.line);
        let annotations: Vec<Annotation> = self
            .annotations
            .iter()
            .cloned()
            .chain(other.annotations.iter().map(|a| a.shifted(offset)))
            .collect();
        let annotations = AnnotationMerger::new().merge_annotations(&annotations, &text);

        Self {
            line: text,
            metadata: self.metadata.clone(),
            annotations,
            uid: self.uid.clone(),
            derived_from: self.derived_from.clone(),
        }
    }

    /// Append plain text.
    #[must_use]
    pub fn concat_str(&self, other: &str) -> Self {
        Self {
            line: format!("{}{}", self.line, other),
            ..self.clone()
        }
    }
}

impl Add<&LineWithMeta> for &LineWithMeta {
    type Output = LineWithMeta;

    fn add(self, rhs: &LineWithMeta) -> LineWithMeta {
        self.concat(rhs)
    }
}

impl Add<&str> for &LineWithMeta {
    type Output = LineWithMeta;

    fn add(self, rhs: &str) -> LineWithMeta {
        self.concat_str(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::annotation::BOLD;
    use super::*;
    use pretty_assertions::assert_eq;

    fn line_with(text: &str, annotations: Vec<Annotation>) -> LineWithMeta {
        LineWithMeta::new(text, LineMetadata::default(), annotations)
    }

    #[test]
    fn test_slice_clips_annotations() {
        let line = line_with(
            "Привет мир",
            vec![
                Annotation::new(0, 6, BOLD, "True"),
                Annotation::new(7, 10, "italic", "True"),
            ],
        );
        let slice = line.slice(3, 8).unwrap();
        assert_eq!(slice.line(), "вет м");
        assert_eq!(
            slice.annotations(),
            &[
                Annotation::new(0, 3, BOLD, "True"),
                Annotation::new(4, 5, "italic", "True"),
            ]
        );
        assert_eq!(slice.uid(), line.uid());
    }

    #[test]
    fn test_slice_lengths() {
        let line = line_with("abcdef", vec![Annotation::new(1, 5, BOLD, "True")]);
        for a in 0..=6 {
            for b in a..=6 {
                let slice = line.slice(a, b).unwrap();
                assert_eq!(slice.len(), b - a);
                for ann in slice.annotations() {
                    assert!(ann.start <= ann.end && ann.end <= b - a);
                }
            }
        }
    }

    #[test]
    fn test_slice_out_of_range() {
        let line = line_with("abc", Vec::new());
        assert!(matches!(
            line.slice(2, 4),
            Err(StructureError::SliceOutOfRange { start: 2, end: 4, len: 3 })
        ));
        assert!(line.slice(2, 1).is_err());
    }

    #[test]
    fn test_concat_text_and_annotations() {
        let left = line_with("bold ", vec![Annotation::new(0, 4, BOLD, "True")]);
        let right = line_with("text", vec![Annotation::new(0, 4, BOLD, "True")]);
        let sum = &left + &right;
        assert_eq!(sum.line(), "bold text");
        assert_eq!(sum.annotations(), &[Annotation::new(0, 9, BOLD, "True")]);
        assert_eq!(sum.uid(), left.uid());
    }

    #[test]
    fn test_concat_str() {
        let line = line_with("abc", vec![Annotation::new(0, 3, BOLD, "True")]);
        let sum = &line + "def";
        assert_eq!(sum.line(), "abcdef");
        assert_eq!(sum.annotations(), &[Annotation::new(0, 3, BOLD, "True")]);
    }

    #[test]
    fn test_split_keeps_separator() {
        let line = line_with("a\nb\nc", vec![Annotation::new(0, 5, BOLD, "True")]);
        let pieces = line.split(&Regex::new("\n").unwrap()).unwrap();
        let texts: Vec<&str> = pieces.iter().map(LineWithMeta::line).collect();
        assert_eq!(texts, vec!["a\n", "b\n", "c"]);
        assert_eq!(pieces[1].annotations(), &[Annotation::new(0, 2, BOLD, "True")]);
        assert_eq!(
            pieces[2].derived_from(),
            Some(&LineOrigin {
                uid: line.uid().to_string(),
                piece: 2
            })
        );
    }

    #[test]
    fn test_split_without_match() {
        let line = line_with("abc", Vec::new());
        let pieces = line.split(&Regex::new(";").unwrap()).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].line(), "abc");
        assert!(pieces[0].derived_from().is_none());
    }

    #[test]
    fn test_split_empty_separator() {
        let line = line_with("abc", Vec::new());
        assert!(matches!(
            line.split(&Regex::new("").unwrap()),
            Err(StructureError::EmptySeparator)
        ));
    }

    #[test]
    fn test_new_clips_annotations() {
        let empty = line_with("", vec![Annotation::new(3, 5, BOLD, "True"), Annotation::new(0, 4, BOLD, "True")]);
        assert_eq!(empty.annotations(), &[Annotation::new(0, 0, BOLD, "True")]);

        let short = line_with("abc", vec![Annotation::new(3, 5, BOLD, "True"), Annotation::new(1, 9, BOLD, "True")]);
        assert_eq!(short.annotations(), &[Annotation::new(1, 3, BOLD, "True")]);
        for a in short.annotations() {
            assert!(a.start <= a.end && a.end <= short.len());
        }
    }

    #[test]
    fn test_set_line_clips_annotations() {
        let mut line = line_with("ТУ. text", vec![Annotation::new(0, 8, BOLD, "True")]);
        line.set_line("IV.");
        assert_eq!(line.annotations(), &[Annotation::new(0, 3, BOLD, "True")]);
    }
}
