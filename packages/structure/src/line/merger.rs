//! Merging of adjacent annotations with the same name and value.

use std::collections::HashMap;

use super::annotation::Annotation;

/// Merges same-name same-value annotations that overlap, touch, or are only
/// separated by whitespace in the line text.
#[derive(Debug, Default)]
pub struct AnnotationMerger;

impl AnnotationMerger {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Merge `annotations` over `text`.
    ///
    /// Groups keep the order in which their first annotation appears.
    #[must_use]
    pub fn merge_annotations(&self, annotations: &[Annotation], text: &str) -> Vec<Annotation> {
        let mut order: Vec<(&str, &str)> = Vec::new();
        let mut groups: HashMap<(&str, &str), Vec<&Annotation>> = HashMap::new();
        for annotation in annotations {
            let key = (annotation.name.as_str(), annotation.value.as_str());
            groups
                .entry(key)
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(annotation);
        }

        let spaces = whitespace_runs(text);
        let mut merged = Vec::with_capacity(annotations.len());
        for key in order {
            if let Some(group) = groups.get(&key) {
                merged.extend(merge_group(group, &spaces));
            }
        }
        merged
    }
}

/// Character ranges of whitespace runs.
fn whitespace_runs(text: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut current: Option<usize> = None;
    let mut count = 0;
    for (i, c) in text.chars().enumerate() {
        match (c.is_whitespace(), current) {
            (true, None) => current = Some(i),
            (false, Some(start)) => {
                runs.push((start, i));
                current = None;
            }
            _ => {}
        }
        count = i + 1;
    }
    if let Some(start) = current {
        runs.push((start, count));
    }
    runs
}

#[derive(Clone, Copy)]
enum Span {
    Annotation(usize, usize),
    Space(usize, usize),
}

impl Span {
    fn start(self) -> usize {
        match self {
            Self::Annotation(s, _) | Self::Space(s, _) => s,
        }
    }

    fn end(self) -> usize {
        match self {
            Self::Annotation(_, e) | Self::Space(_, e) => e,
        }
    }
}

fn merge_group(group: &[&Annotation], spaces: &[(usize, usize)]) -> Vec<Annotation> {
    let Some(first) = group.first() else {
        return Vec::new();
    };
    if group.len() == 1 {
        return vec![(*first).clone()];
    }

    let mut spans: Vec<Span> = group
        .iter()
        .map(|a| Span::Annotation(a.start, a.end))
        .chain(spaces.iter().map(|&(s, e)| Span::Space(s, e)))
        .collect();
    spans.sort_by_key(|s| s.start());

    let mut result = Vec::new();
    // (cluster end, annotation bounds inside the cluster)
    let mut cluster_end = spans[0].end();
    let mut bounds: Option<(usize, usize)> = None;
    let mut flush = |bounds: &mut Option<(usize, usize)>| {
        if let Some((start, end)) = bounds.take() {
            result.push(Annotation::new(start, end, &first.name, &first.value));
        }
    };

    for span in spans {
        if span.start() > cluster_end {
            flush(&mut bounds);
            cluster_end = span.end();
        } else {
            cluster_end = cluster_end.max(span.end());
        }
        if let Span::Annotation(s, e) = span {
            bounds = Some(match bounds {
                Some((bs, be)) => (bs.min(s), be.max(e)),
                None => (s, e),
            });
        }
    }
    flush(&mut bounds);
    result
}
