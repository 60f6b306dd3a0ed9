//! Per-line list features over a sliding window.
//!
//! For every line the extractor looks at up to `window_size` neighbours on
//! each side and counts how many share its indentation, how many carry a
//! prefix that directly precedes or follows its own, and how many do both.
//! Counts are normalised by the window length.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::config::DEFAULT_WINDOW_SIZE;
use crate::line::LineWithMeta;
use crate::prefix::{get_prefix, LinePrefix, PrefixKind};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOTTED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\.)+(\d+\.?)?(\s|$)").expect("valid regex"));

/// Depth of a dotted list item such as `1.2.3.`.
///
/// Counts the non-empty number groups of the leading token. Returns `None`
/// when the text does not start with a dotted number.
///
/// # Examples
/// ```
/// use regelrecht_structure::list_features::get_dotted_item_depth;
///
/// assert_eq!(get_dotted_item_depth("1.2.3. Item"), Some(3));
/// assert_eq!(get_dotted_item_depth("1.2.3"), Some(3));
/// assert_eq!(get_dotted_item_depth("not a list"), None);
/// ```
#[must_use]
pub fn get_dotted_item_depth(text: &str) -> Option<usize> {
    let token = DOTTED_ITEM.find(text)?.as_str();
    let depth = token.trim().split('.').filter(|n| !n.is_empty()).count();
    (depth > 0).then_some(depth)
}

/// List features of one line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ListFeatures {
    pub same_indent: f64,
    pub predecessor_num_same_indent: f64,
    pub predecessor_num: f64,
}

/// Sliding-window list feature extractor.
#[derive(Debug, Clone)]
pub struct ListFeaturesExtractor {
    window_size: usize,
    prefix_kinds: Vec<PrefixKind>,
}

impl Default for ListFeaturesExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl ListFeaturesExtractor {
    /// Extractor with the default prefix kinds: bullet, letter, bracket, dotted.
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            prefix_kinds: PrefixKind::DEFAULT_ORDER.to_vec(),
        }
    }

    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Column names, suffixed with the window size.
    #[must_use]
    pub fn feature_names(&self) -> [String; 3] {
        [
            format!("same_indent_{}", self.window_size),
            format!("predecessor_num_same_indent_{}", self.window_size),
            format!("predecessor_num_{}", self.window_size),
        ]
    }

    /// Prefixes and features of every line, aligned with `lines`.
    #[must_use]
    pub fn one_document(&self, lines: &[LineWithMeta]) -> (Vec<LinePrefix>, Vec<ListFeatures>) {
        let prefixes: Vec<LinePrefix> = lines
            .iter()
            .map(|line| get_prefix(&self.prefix_kinds, line))
            .collect();
        let indents: Vec<f64> = prefixes.iter().map(LinePrefix::indent).collect();

        let features = (0..prefixes.len())
            .map(|line_id| {
                let left = line_id.saturating_sub(self.window_size);
                let right = (line_id + self.window_size).min(prefixes.len());
                let std = std_dev(&indents[left..right]);
                let before = &prefixes[left..line_id];
                let after = prefixes.get(line_id + 1..right).unwrap_or_default();
                one_line_features(&prefixes[line_id], before, after, std)
            })
            .collect();

        (prefixes, features)
    }
}

fn one_line_features(prefix: &LinePrefix, before: &[LinePrefix], after: &[LinePrefix], std: f64) -> ListFeatures {
    let mut same_indent = 0usize;
    let mut predecessor_num = 0usize;
    let mut predecessor_num_same_indent = 0usize;

    for other in before.iter().chain(after) {
        let is_predecessor = prefix.predecessor(other) || prefix.successor(other);
        let is_same_indent = same_indent_within(prefix.indent(), other.indent(), std);
        predecessor_num += usize::from(is_predecessor);
        same_indent += usize::from(is_same_indent);
        predecessor_num_same_indent += usize::from(is_predecessor && is_same_indent);
    }

    let window = (before.len() + after.len() + 1) as f64;
    ListFeatures {
        same_indent: same_indent as f64 / window,
        predecessor_num_same_indent: predecessor_num_same_indent as f64 / window,
        predecessor_num: predecessor_num as f64 / window,
    }
}

fn same_indent_within(this: f64, other: f64, std: f64) -> bool {
    (this - other).abs() <= 0.1 * std + 1.0
}

/// Population standard deviation; zero for an empty slice.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<LineWithMeta> {
        texts.iter().map(|t| LineWithMeta::from_text(*t)).collect()
    }

    #[test]
    fn test_dotted_item_depth() {
        assert_eq!(get_dotted_item_depth("1.2.3."), Some(3));
        assert_eq!(get_dotted_item_depth("1.2.3"), Some(3));
        assert_eq!(get_dotted_item_depth("1. Общие положения"), Some(1));
        assert_eq!(get_dotted_item_depth("not a list"), None);
        assert_eq!(get_dotted_item_depth("1) bracket"), None);
        assert_eq!(get_dotted_item_depth("12 text"), None);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(std_dev(&[2.0, 2.0]), 0.0);
        assert!((std_dev(&[0.0, 4.0]) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_features_aligned_with_lines() {
        let doc = lines(&["1. first", "2. second", "text", "3. third"]);
        let extractor = ListFeaturesExtractor::new(2);
        let (prefixes, features) = extractor.one_document(&doc);
        assert_eq!(prefixes.len(), 4);
        assert_eq!(features.len(), 4);
        assert_eq!(prefixes[2].name(), "empty");
    }

    #[test]
    fn test_predecessor_counts() {
        let doc = lines(&["1. first", "2. second", "3. third"]);
        let (_, features) = ListFeaturesExtractor::new(25).one_document(&doc);
        // "2." sees "1." before and "3." after, both in sequence.
        assert!((features[1].predecessor_num - 2.0 / 3.0).abs() < 1e-9);
        assert!((features[1].same_indent - 2.0 / 3.0).abs() < 1e-9);
        assert!((features[0].predecessor_num - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_excludes_far_lines() {
        let doc = lines(&["1. first", "text", "text", "2. second"]);
        let (_, features) = ListFeaturesExtractor::new(1).one_document(&doc);
        assert_eq!(features[0].predecessor_num, 0.0);
        assert_eq!(features[3].predecessor_num, 0.0);
    }

    #[test]
    fn test_numbers_at_limit_do_not_overflow() {
        let max = u32::MAX;
        let texts = [format!("{max}. a"), format!("{max}. b"), format!("{max}) c")];
        let doc = lines(&texts.iter().map(String::as_str).collect::<Vec<_>>());
        let (prefixes, features) = ListFeaturesExtractor::new(25).one_document(&doc);
        assert_eq!(prefixes[0].name(), "dotted");
        assert_eq!(features[0].predecessor_num, 0.0);
        assert_eq!(features[1].predecessor_num, 0.0);
    }

    #[test]
    fn test_empty_document() {
        let (prefixes, features) = ListFeaturesExtractor::default().one_document(&[]);
        assert!(prefixes.is_empty());
        assert!(features.is_empty());
    }

    #[test]
    fn test_feature_names() {
        let names = ListFeaturesExtractor::new(3).feature_names();
        assert_eq!(names[0], "same_indent_3");
        assert_eq!(names[2], "predecessor_num_3");
    }
}
