//! Span annotations attached to a line.

use serde::{Deserialize, Serialize};

/// Bold text.
pub const BOLD: &str = "bold";
/// Leading whitespace width of the line.
pub const INDENTATION: &str = "indentation";
/// Reference to a table anchored at the start of the line.
pub const TABLE: &str = "table";
/// Reference to an attachment anchored at the start of the line.
pub const ATTACHMENT: &str = "attachment";

/// Named value over the character range `[start, end)` of a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    pub name: String,
    pub value: String,
}

impl Annotation {
    #[must_use]
    pub fn new(start: usize, end: usize, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            start,
            end,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether this annotation refers to an object anchored at offset 0.
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        self.name == TABLE || self.name == ATTACHMENT
    }

    /// Clip to `[start, end)` and rebase on `start`.
    ///
    /// Returns `None` when the annotation does not intersect the range.
    #[must_use]
    pub fn clip(&self, start: usize, end: usize) -> Option<Self> {
        if start < self.end && end > self.start {
            Some(Self {
                start: self.start.max(start) - start,
                end: self.end.min(end) - start,
                name: self.name.clone(),
                value: self.value.clone(),
            })
        } else {
            None
        }
    }

    /// Move the annotation right by `offset` characters.
    #[must_use]
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_inside() {
        let ann = Annotation::new(2, 8, BOLD, "True");
        assert_eq!(ann.clip(4, 10), Some(Annotation::new(0, 4, BOLD, "True")));
        assert_eq!(ann.clip(0, 5), Some(Annotation::new(2, 5, BOLD, "True")));
    }

    #[test]
    fn test_clip_outside() {
        let ann = Annotation::new(1, 3, BOLD, "True");
        assert_eq!(ann.clip(3, 3), None);
        assert_eq!(ann.clip(5, 9), None);
    }

    #[test]
    fn test_is_anchor() {
        assert!(Annotation::new(0, 1, TABLE, "t1").is_anchor());
        assert!(!Annotation::new(0, 1, BOLD, "True").is_anchor());
    }
}
