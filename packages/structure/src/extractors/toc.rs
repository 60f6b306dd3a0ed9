//! Heuristic table of contents detection.
//!
//! A TOC is a run of lines ending with page numbers (`Введение ....... 3`),
//! optionally after a title such as `Содержание` or `Table of contents`.
//! Lines without a page number inside the run are continuations of the next
//! item and get merged into it.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{TOC_MIN_ITEMS, TOC_WINDOW_SIZE};
use crate::line::LineWithMeta;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static END_WITH_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*[^\s.…])?[….\s]+(\d{1,3})(-\d{1,3})?$").expect("valid regex"));

/// TOC titles with whitespace and colons removed, lowercase.
const TOC_TITLES: &[&str] = &[
    "tableofcontents",
    "contents",
    "tableofcontentspage",
    "содержание",
    "оглавление",
    "tabledesmatières",
    "tabledesmatieres",
    "sommaire",
    "indice",
    "índice",
    "contenidos",
    "tabladecontenido",
];

/// Page-numbered lines needed before a second title stops resetting the run.
const TITLE_RESET_LIMIT: usize = 6;

/// Item of a detected table of contents.
#[derive(Debug, Clone)]
pub struct TocItem {
    /// Item text, merged from all lines of a multiline item.
    pub line: LineWithMeta,
    /// Page number the item points to.
    pub page: u32,
    /// UIDs of the document lines this item was built from.
    pub source_uids: Vec<String>,
}

/// Candidate TOC line: an item with its page number or a continuation.
#[derive(Debug, Clone)]
enum Candidate {
    Item(LineWithMeta, u32),
    Continuation(LineWithMeta),
}

impl Candidate {
    fn line(&self) -> &LineWithMeta {
        match self {
            Self::Item(line, _) | Self::Continuation(line) => line,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TocExtractor;

impl TocExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether `text` is a TOC title in any supported language.
    #[must_use]
    pub fn is_title(text: &str) -> bool {
        let probable: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':')
            .collect::<String>()
            .to_lowercase();
        TOC_TITLES.contains(&probable.as_str())
    }

    /// Detect the table of contents of a document.
    ///
    /// Returns an empty list when no convincing TOC is found.
    #[must_use]
    pub fn get_toc(&self, lines: &[LineWithMeta]) -> Vec<TocItem> {
        let (candidates, marks) = Self::probable_toc(lines);
        if candidates.len() <= TOC_WINDOW_SIZE {
            tracing::debug!(candidates = candidates.len(), "Too few TOC candidates");
            return Vec::new();
        }

        let unmerged = Self::fill_gaps(candidates, &marks);
        let merged = Self::merge_multiline(unmerged);
        if merged.len() > TOC_MIN_ITEMS && Self::is_page_order_correct(&merged) {
            tracing::debug!(items = merged.len(), "Table of contents detected");
            merged
        } else {
            Vec::new()
        }
    }

    /// Candidate lines and whether each one carries a page number.
    ///
    /// A title seen before enough numbered lines restarts the search.
    fn probable_toc(lines: &[LineWithMeta]) -> (Vec<Candidate>, Vec<bool>) {
        let mut candidates = Vec::new();
        let mut marks: Vec<bool> = Vec::new();

        for line in lines {
            let text = line.line();
            if Self::is_title(text) && marks.iter().filter(|&&m| m).count() < TITLE_RESET_LIMIT {
                candidates.clear();
                marks.clear();
                continue;
            }

            let stripped = text.trim();
            if stripped.is_empty() || stripped.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let page = END_WITH_NUM
                .captures(stripped)
                .and_then(|captures| captures.get(2))
                .and_then(|page| page.as_str().parse::<u32>().ok());
            match page {
                Some(page) => candidates.push(Candidate::Item(line.clone(), page)),
                None => candidates.push(Candidate::Continuation(line.clone())),
            }
            marks.push(page.is_some() && text.chars().count() > 5);
        }
        (candidates, marks)
    }

    /// Keep candidates that sit between numbered lines.
    ///
    /// The run ends at the first window without a page number once more
    /// than five numbered lines were seen.
    fn fill_gaps(candidates: Vec<Candidate>, marks: &[bool]) -> Vec<Candidate> {
        let window = TOC_WINDOW_SIZE;
        let scan = candidates.len().saturating_sub(window);
        let any = |slice: &[bool]| slice.iter().any(|&m| m);

        let mut keep = vec![false; candidates.len()];
        for idx in 0..scan {
            let in_window = any(&marks[idx..idx + window]);
            if marks[..idx].iter().filter(|&&m| m).count() > 5 && !in_window {
                break;
            }
            let marked_before = in_window && any(&marks[..idx]);
            let marked_after = marks[idx] && any(&marks[idx + 1..idx + window]);
            keep[idx] = marked_before || marked_after;
        }

        candidates
            .into_iter()
            .zip(keep)
            .filter_map(|(candidate, keep)| keep.then_some(candidate))
            .collect()
    }

    /// Glue continuation lines to the numbered item that follows them.
    fn merge_multiline(candidates: Vec<Candidate>) -> Vec<TocItem> {
        let mut merged = Vec::new();
        let mut current: Option<(LineWithMeta, Vec<String>)> = None;

        for candidate in candidates {
            let uid = candidate.line().uid().to_string();
            let (line, mut uids) = match current.take() {
                Some((line, uids)) => (&line + candidate.line(), uids),
                None => (candidate.line().clone(), Vec::new()),
            };
            uids.push(uid);
            match candidate {
                Candidate::Item(_, page) => merged.push(TocItem {
                    line,
                    page,
                    source_uids: uids,
                }),
                Candidate::Continuation(_) => current = Some((line, uids)),
            }
        }
        merged
    }

    fn is_page_order_correct(items: &[TocItem]) -> bool {
        items.windows(2).all(|pair| pair[0].page <= pair[1].page)
    }
}
