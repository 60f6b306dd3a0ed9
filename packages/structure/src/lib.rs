//! RegelRecht Structure - Reconstruct the logical structure of documents.
//!
//! This crate turns a flat sequence of text lines into a hierarchy. Every
//! line gets a [`HierarchyLevel`](types::HierarchyLevel); the
//! [`TreeConstructor`](tree::TreeConstructor) then nests lines into a tree.
//! Russian laws, executive acts, technical specifications and theses have
//! their own extractors; other documents go through configurable patterns.
//!
//! # Example
//!
//! ```
//! use regelrecht_structure::extractors::{extractor_for, StructureExtractor};
//! use regelrecht_structure::{read_txt, ExtractorConfig, TreeConstructor};
//!
//! let document = read_txt("1. Первый пункт\n1.1. Подпункт\n2. Второй пункт\n");
//! let extractor = extractor_for("default", None, ExtractorConfig::default()).unwrap();
//! let document = extractor.extract(document).unwrap();
//! let tree = TreeConstructor::new().structure(&document);
//! assert_eq!(tree.subparagraphs.len(), 1);
//! ```
//!
//! # Architecture
//!
//! - [`types`]: Hierarchy levels, document kinds and zones
//! - [`line`]: Annotated lines and documents
//! - [`error`]: Error types and Result alias
//! - [`config`]: Constants and run-time options
//! - [`regexps`]: Shared numbering and vocabulary regexes
//! - [`prefix`]: List prefixes and their ordering
//! - [`list_features`]: Sliding-window list features
//! - [`hierarchy_extractor`]: Text-based levels and reader tag hints
//! - [`list_patcher`]: Repair of lists with skipped items
//! - [`patterns`]: Configurable line patterns
//! - [`classifier`]: Line type oracles
//! - [`builders`]: Per-zone hierarchy level builders
//! - [`extractors`]: Structure extractors per document kind
//! - [`reader`]: Plain text input
//! - [`tree`]: Document tree construction
//! - [`cli`]: Command-line interface

pub mod builders;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractors;
pub mod hierarchy_extractor;
pub mod line;
pub mod list_features;
pub mod list_patcher;
pub mod patterns;
pub mod prefix;
pub mod reader;
pub mod regexps;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use config::ExtractorConfig;
pub use error::{Result, StructureError};
pub use extractors::{extractor_for, StructureExtractor};
pub use line::{Annotation, LineMetadata, LineWithMeta, UnstructuredDocument};
pub use reader::read_txt;
pub use tree::{TreeConstructor, TreeNode};
pub use types::{DocumentKind, HierarchyLevel, Level, Zone};
