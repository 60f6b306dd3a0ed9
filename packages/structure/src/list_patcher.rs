//! Repair of numbered lists that skip intermediate items.
//!
//! A document that jumps from `1.` straight to `1.2.` gets a synthetic `1.1.`
//! line in between, so the tree has a parent for `1.2.`.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::line::{LineMetadata, LineWithMeta};
use crate::types::{line_type, HierarchyLevel, Level};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LIST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *\d+(?:\.\d+)*[ .)].*$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *\d+(?:\.\d+)*[ .)]").expect("valid regex"));

/// Numbering of a list line: `1.2.` is `[1, 2]` ending with `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub items: Vec<u32>,
    /// `.` or `)`; a number followed by a space counts as `.`.
    pub end_type: char,
}

impl ListItem {
    #[must_use]
    pub fn new(items: Vec<u32>, end_type: char) -> Self {
        let end_type = if end_type == ' ' { '.' } else { end_type };
        Self { items, end_type }
    }

    /// Parse the numbering at the start of `text`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_end_matches(['\n', '\r']);
        if !LIST_LINE.is_match(text) {
            return None;
        }
        let token = LIST_ITEM.find(text)?.as_str().trim_start();
        let end_type = token.chars().last()?;
        let numbers = &token[..token.len() - end_type.len_utf8()];
        let items = numbers
            .split('.')
            .filter(|n| !n.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()
            .ok()?;
        Some(Self::new(items, end_type))
    }

    /// First item of its level: `1.`, `2.1.`.
    #[must_use]
    pub fn is_first_item(&self) -> bool {
        self.items.last() == Some(&1)
    }

    /// Item directly before this one, or the parent for a first item.
    ///
    /// `2.3` gives `2.2`, `2.1` gives `2`, `1` gives the empty item.
    #[must_use]
    pub fn get_parent(&self) -> Self {
        let mut items = self.items.clone();
        match items.last_mut() {
            Some(last) if *last > 1 => *last -= 1,
            Some(_) => {
                items.pop();
            }
            None => {}
        }
        Self {
            items,
            end_type: self.end_type,
        }
    }

    /// Zero-padded numeric order; items with different endings are unordered.
    #[must_use]
    pub fn is_less(&self, other: &Self) -> bool {
        if self.end_type != other.end_type {
            return false;
        }
        let len = self.items.len().max(other.items.len());
        for i in 0..len {
            let a = self.items.get(i).copied().unwrap_or(0);
            let b = other.items.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Less => return true,
                Ordering::Greater => return false,
                Ordering::Equal => {}
            }
        }
        false
    }

    /// Text of a synthetic line for this item: `1.1.`.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.items.iter().map(|n| format!("{n}{}", self.end_type)).collect()
    }
}

/// Inserts missing list items and re-levels text between items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListPatcher;

impl ListPatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Patch a leveled line sequence.
    ///
    /// Lines that already form a consistent list come back unchanged.
    #[must_use]
    pub fn patch(&self, lines: Vec<LineWithMeta>) -> Vec<LineWithMeta> {
        let mut items: Vec<ListItem> = Vec::new();
        let mut levels: Vec<HierarchyLevel> = Vec::new();
        let mut patched = Vec::with_capacity(lines.len());
        let mut content: Vec<LineWithMeta> = Vec::new();

        for line in lines {
            let Some(item) = ListItem::parse(line.line()) else {
                content.push(line);
                continue;
            };

            if let Some(previous) = levels.last().filter(|_| !item.is_first_item()) {
                Self::update_line_levels(&mut content, previous);
            }
            patched.append(&mut content);

            if item.items == [1] {
                items.clear();
                levels.clear();
            }

            let parent = item.get_parent();
            if items.last().is_some_and(|top| *top != parent) {
                patched.extend(Self::patch_list(&line, &mut items, &mut levels, parent));
            }

            items.push(item);
            levels.push(line.level_or_raw());
            patched.push(line);
        }

        patched.append(&mut content);
        patched
    }

    /// Lines between two items of one list nest one level below the earlier item.
    fn update_line_levels(content: &mut [LineWithMeta], item_level: &HierarchyLevel) {
        for line in content {
            let current = line.level_or_raw();
            let level = match item_level.level_1 {
                Level::Defined(level_1) => {
                    let level_2 = item_level.level_2.value().map_or(1, |l| l + 1);
                    HierarchyLevel::new(Some(level_1), Some(level_2), current.can_be_multiline, current.line_type)
                }
                Level::Undefined => HierarchyLevel::create_raw_text(),
            };
            line.set_hierarchy_level(level);
        }
    }

    fn has_parent(items: &[ListItem], parent: &ListItem) -> bool {
        for item in items.iter().rev() {
            if parent.is_less(item) {
                return false;
            }
            if item == parent {
                return true;
            }
        }
        false
    }

    fn patch_list(
        line: &LineWithMeta,
        items: &mut Vec<ListItem>,
        levels: &mut Vec<HierarchyLevel>,
        mut parent: ListItem,
    ) -> Vec<LineWithMeta> {
        if Self::has_parent(items, &parent) {
            while items.last().is_some_and(|top| top.is_less(&parent)) {
                items.pop();
                levels.pop();
            }
        }

        let mut inserting = Vec::new();
        while let Some(top) = items.last() {
            if *top == parent || !top.is_less(&parent) || parent.items.is_empty() {
                break;
            }
            let grandparent = parent.get_parent();
            inserting.push(parent);
            parent = grandparent;
        }

        let level_1 = levels.last().and_then(|l| l.level_1.value());
        inserting
            .into_iter()
            .rev()
            .map(|missing| {
                let level = match level_1 {
                    Some(level_1) => HierarchyLevel::new(
                        Some(level_1),
                        u32::try_from(missing.items.len()).ok(),
                        false,
                        line_type::LIST_ITEM,
                    ),
                    None => HierarchyLevel::create_raw_text(),
                };
                let metadata = LineMetadata::new(line.metadata.page_id, line.metadata.line_id)
                    .with_hierarchy_level(level);
                LineWithMeta::new(missing.to_text(), metadata, Vec::new())
            })
            .collect()
    }
}
