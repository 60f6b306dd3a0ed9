//! Hierarchy level builders and the registry that wires them to zones.
//!
//! An extractor cuts a document into zones (header, TOC, body, cellar,
//! application) and hands each zone's `(line, label)` pairs to the builder
//! registered for that zone and document kind. Builders turn labels into
//! concrete [`HierarchyLevel`]s.

pub mod application;
pub mod body;
pub mod cellar;
pub mod diploma;
pub mod header;
pub mod structure_unit;
pub mod toc;
pub mod tz;

use std::collections::{HashMap, HashSet};

pub use application::ApplicationBuilder;
pub use body::BodyBuilder;
pub use cellar::CellarBuilder;
pub use diploma::DiplomaBodyBuilder;
pub use header::HeaderBuilder;
pub use structure_unit::{FoivStructureUnit, LawStructureUnit, StructureUnitBuilder};
pub use toc::TocBuilder;
pub use tz::TzBodyBuilder;

use crate::error::{Result, StructureError};
use crate::line::{LineMetadata, LineWithMeta};
use crate::regexps::ROMAN;
use crate::types::{line_type, DocumentKind, HierarchyLevel, Zone};

/// A line paired with its predicted label.
pub type LabeledLine = (LineWithMeta, String);

/// Level of one line plus the level later lines may inherit.
pub type LevelStep = (HierarchyLevel, Option<HierarchyLevel>);

/// Trait for zone builders.
///
/// A builder receives every line of one zone with its label and returns
/// the lines with `hierarchy_level` set. It may add synthetic lines.
pub trait HierarchyLevelBuilder: Send + Sync {
    /// Assign hierarchy levels; zone levels start at `init_hl_depth`.
    fn build(&self, lines_with_labels: Vec<LabeledLine>, init_hl_depth: u32) -> Vec<LineWithMeta>;
}

/// Level that following lines inherit.
pub(crate) fn sticky(level: HierarchyLevel) -> LevelStep {
    (level.clone(), Some(level))
}

/// Level that resets inheritance.
pub(crate) fn fresh(level: HierarchyLevel) -> LevelStep {
    (level, None)
}

/// `(None, None, false, "raw_text")`, the non-multiline raw text of builders.
pub(crate) fn plain_raw_text() -> HierarchyLevel {
    HierarchyLevel::new(None, None, false, line_type::RAW_TEXT)
}

/// Empty line opening the body zone.
#[must_use]
pub fn body_line(page_id: usize, line_id: Option<usize>, init_hl_depth: u32) -> LineWithMeta {
    let level = HierarchyLevel::new(Some(init_hl_depth), Some(0), false, line_type::BODY);
    let metadata = LineMetadata::new(page_id, line_id).with_hierarchy_level(level);
    let uid = format!("{}_body", uuid::Uuid::new_v4());
    LineWithMeta::with_uid("", metadata, Vec::new(), uid)
}

/// Body line positioned at the first line of a zone.
pub(crate) fn body_line_for(lines_with_labels: &[LabeledLine], init_hl_depth: u32) -> LineWithMeta {
    match lines_with_labels.first() {
        Some((line, _)) => body_line(line.metadata.page_id, line.metadata.line_id, init_hl_depth),
        None => body_line(0, Some(0), init_hl_depth),
    }
}

/// Repair OCR confusions inside the roman number of a subsection.
///
/// Only the matched number is rewritten: `ТУ. Общие` becomes `IV. Общие`.
pub fn postprocess_roman(hierarchy_level: &HierarchyLevel, line: &mut LineWithMeta) {
    if hierarchy_level.line_type != line_type::SUBSECTION {
        return;
    }
    let Some(found) = ROMAN.find(line.line()) else {
        return;
    };
    let mut prefix = found.as_str().to_string();
    for (from, to) in [("T", "I"), ("Т", "I"), ("У", "V"), ("П", "II"), ("Ш", "III"), ("Г", "I")] {
        prefix = prefix.replace(from, to);
    }
    let fixed = format!("{prefix}{}", &line.line()[found.end()..]);
    line.set_line(fixed);
}

/// Registry mapping `(zone, document kind)` to builders.
pub struct BuilderRegistry {
    builders: HashMap<(Zone, DocumentKind), Box<dyn HierarchyLevelBuilder>>,
}

impl BuilderRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registry with every builder the extractors need.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(Zone::Header, DocumentKind::Law, HeaderBuilder);
        registry.register(Zone::Body, DocumentKind::Law, BodyBuilder::new(LawStructureUnit));
        registry.register(Zone::Cellar, DocumentKind::Law, CellarBuilder);
        registry.register(
            Zone::Application,
            DocumentKind::Law,
            ApplicationBuilder::new(LawStructureUnit),
        );

        registry.register(Zone::Header, DocumentKind::Foiv, HeaderBuilder);
        registry.register(Zone::Body, DocumentKind::Foiv, BodyBuilder::new(FoivStructureUnit));
        registry.register(Zone::Cellar, DocumentKind::Foiv, CellarBuilder);
        registry.register(
            Zone::Application,
            DocumentKind::Foiv,
            ApplicationBuilder::new(FoivStructureUnit),
        );

        registry.register(Zone::Header, DocumentKind::Tz, HeaderBuilder);
        registry.register(Zone::Toc, DocumentKind::Tz, TocBuilder);
        registry.register(Zone::Body, DocumentKind::Tz, TzBodyBuilder);

        registry.register(Zone::Header, DocumentKind::Diploma, HeaderBuilder);
        registry.register(Zone::Toc, DocumentKind::Diploma, TocBuilder);
        registry.register(Zone::Body, DocumentKind::Diploma, DiplomaBodyBuilder::new());

        registry
    }

    /// Register a builder for a zone of a document kind.
    pub fn register(
        &mut self,
        zone: Zone,
        document_kind: DocumentKind,
        builder: impl HierarchyLevelBuilder + 'static,
    ) {
        self.builders.insert((zone, document_kind), Box::new(builder));
    }

    /// Get the builder for a zone.
    ///
    /// A missing builder is a wiring mistake and reported as
    /// [`StructureError::NoBuilder`].
    pub fn get(&self, zone: Zone, document_kind: DocumentKind) -> Result<&dyn HierarchyLevelBuilder> {
        self.builders
            .get(&(zone, document_kind))
            .map(|b| b.as_ref())
            .ok_or(StructureError::NoBuilder { zone, document_kind })
    }

    /// Run the builder registered for a zone.
    pub fn build(
        &self,
        zone: Zone,
        document_kind: DocumentKind,
        lines_with_labels: Vec<LabeledLine>,
        init_hl_depth: u32,
    ) -> Result<Vec<LineWithMeta>> {
        let builder = self.get(zone, document_kind)?;
        tracing::debug!(
            zone = %zone,
            document_kind = %document_kind,
            lines = lines_with_labels.len(),
            "Building hierarchy levels"
        );
        Ok(builder.build(lines_with_labels, init_hl_depth))
    }

    /// Check if a builder is registered for a zone.
    #[must_use]
    pub fn has_builder(&self, zone: Zone, document_kind: DocumentKind) -> bool {
        self.builders.contains_key(&(zone, document_kind))
    }

    /// Return set of all registered `(zone, kind)` pairs.
    #[must_use]
    pub fn registered(&self) -> HashSet<(Zone, DocumentKind)> {
        self.builders.keys().copied().collect()
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
