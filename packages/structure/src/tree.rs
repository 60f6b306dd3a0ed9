//! Document tree built from leveled lines.
//!
//! Lines at level `(0, 0)` form the root. Every other line either extends the
//! current node (multiline nodes of the same level and type) or becomes a
//! child of the nearest preceding node with a lower level. Runs of list items
//! get an auxiliary `list` node above them.

use serde::{Deserialize, Serialize};

use crate::line::{Annotation, AnnotationMerger, LineWithMeta, UnstructuredDocument};
use crate::types::{line_type, HierarchyLevel, Level};

/// Node of the document tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Path from the root: `0`, `0.1`, `0.1.2`.
    pub node_id: String,
    pub text: String,
    pub annotations: Vec<Annotation>,
    pub hierarchy_level: HierarchyLevel,
    pub page_id: usize,
    pub line_id: Option<usize>,
    pub subparagraphs: Vec<TreeNode>,
}

impl TreeNode {
    fn root() -> Self {
        Self {
            node_id: "0".to_string(),
            text: String::new(),
            annotations: Vec::new(),
            hierarchy_level: HierarchyLevel::create_root(),
            page_id: 0,
            line_id: Some(0),
            subparagraphs: Vec::new(),
        }
    }

    fn child(&self, line: &LineWithMeta, hierarchy_level: HierarchyLevel) -> Self {
        Self {
            node_id: format!("{}.{}", self.node_id, self.subparagraphs.len()),
            text: line.line().to_string(),
            annotations: line.annotations().to_vec(),
            hierarchy_level,
            page_id: line.metadata.page_id,
            line_id: line.metadata.line_id,
            subparagraphs: Vec::new(),
        }
    }

    /// Append a line on a new text row, shifting its annotations.
    fn add_text(&mut self, line: &LineWithMeta) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        let offset = self.text.chars().count();
        self.annotations
            .extend(line.annotations().iter().map(|a| a.shifted(offset)));
        self.text.push_str(line.line());
    }

    fn merge_annotations(&mut self) {
        self.annotations = AnnotationMerger::new().merge_annotations(&self.annotations, &self.text);
        for child in &mut self.subparagraphs {
            child.merge_annotations();
        }
    }

    /// Number of nodes in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.subparagraphs.iter().map(Self::node_count).sum::<usize>()
    }

    /// Depth-first search by node id.
    #[must_use]
    pub fn find(&self, node_id: &str) -> Option<&Self> {
        if self.node_id == node_id {
            return Some(self);
        }
        self.subparagraphs.iter().find_map(|child| child.find(node_id))
    }
}

/// Line queued for the tree, with its resolved level.
struct TreeLine {
    line: LineWithMeta,
    level: HierarchyLevel,
    is_list: bool,
}

impl TreeLine {
    /// Auxiliary list nodes sort just above the items they hold.
    fn order(&self) -> (Level, Level, bool) {
        (self.level.level_1, self.level.level_2, !self.is_list)
    }
}

/// Node on the path from the root to the current node.
struct OpenNode {
    node: TreeNode,
    is_list: bool,
}

impl OpenNode {
    fn order(&self) -> (Level, Level, bool) {
        let level = &self.node.hierarchy_level;
        (level.level_1, level.level_2, !self.is_list)
    }
}

/// Builds a [`TreeNode`] hierarchy from a leveled document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeConstructor;

impl TreeConstructor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the tree of a document whose lines carry hierarchy levels.
    ///
    /// Lines without a level are treated as raw text.
    #[must_use]
    pub fn structure(&self, document: &UnstructuredDocument) -> TreeNode {
        let mut root = TreeNode::root();
        let mut rest = Vec::with_capacity(document.lines.len());
        for line in &document.lines {
            let level = line.level_or_raw();
            if level.level_1 == Level::Defined(0) && level.level_2 == Level::Defined(0) {
                root.add_text(line);
            } else {
                rest.push(TreeLine {
                    line: line.clone(),
                    level,
                    is_list: false,
                });
            }
        }

        let mut path = vec![OpenNode {
            node: root,
            is_list: false,
        }];
        for entry in Self::add_lists(rest) {
            if let Some(current) = path.last_mut() {
                let node_level = &current.node.hierarchy_level;
                if !current.is_list
                    && !entry.is_list
                    && entry.level.can_be_multiline
                    && entry.level == *node_level
                    && entry.level.line_type == node_level.line_type
                {
                    current.node.add_text(&entry.line);
                    continue;
                }
            }

            while path.len() > 1 && path.last().is_some_and(|open| open.order() >= entry.order()) {
                Self::close(&mut path);
            }
            if let Some(parent) = path.last() {
                let child = parent.node.child(&entry.line, entry.level);
                path.push(OpenNode {
                    node: child,
                    is_list: entry.is_list,
                });
            }
        }

        while path.len() > 1 {
            Self::close(&mut path);
        }
        let mut root = path.pop().map_or_else(TreeNode::root, |open| open.node);
        root.merge_annotations();
        tracing::debug!(nodes = root.node_count(), "Document tree built");
        root
    }

    /// Move the current node into its parent's children.
    fn close(path: &mut Vec<OpenNode>) {
        if let Some(open) = path.pop() {
            if let Some(parent) = path.last_mut() {
                parent.node.subparagraphs.push(open.node);
            }
        }
    }

    /// Insert an empty `list` line before the first item of every list level.
    fn add_lists(lines: Vec<TreeLine>) -> Vec<TreeLine> {
        let mut open_levels: Vec<HierarchyLevel> = Vec::new();
        let mut result = Vec::with_capacity(lines.len());
        for entry in lines {
            if entry.level.is_list_item() {
                while open_levels.last().is_some_and(|open| *open > entry.level) {
                    open_levels.pop();
                }
                if open_levels.last().is_none_or(|open| *open < entry.level) {
                    result.push(Self::list_line(&entry));
                    open_levels.push(entry.level.clone());
                }
            } else if !entry.level.is_raw_text() {
                open_levels.clear();
            }
            result.push(entry);
        }
        result
    }

    fn list_line(item: &TreeLine) -> TreeLine {
        let level = HierarchyLevel {
            can_be_multiline: false,
            line_type: line_type::LIST.to_string(),
            ..item.level.clone()
        };
        let mut metadata = item.line.metadata.clone();
        metadata.hierarchy_level = Some(level.clone());
        TreeLine {
            line: LineWithMeta::new("", metadata, Vec::new()),
            level,
            is_list: true,
        }
    }
}
