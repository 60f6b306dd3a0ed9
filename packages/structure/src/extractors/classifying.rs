//! Law type detection and dispatch between law and FOIV extraction.

use regex::Regex;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use super::{LawStructureExtractor, StructureExtractor, AUTO_LAW};
use crate::config::{LAW_TYPE_BATCH_COUNT, LAW_TYPE_BATCH_SIZE};
use crate::error::Result;
use crate::line::{LineWithMeta, UnstructuredDocument};

/// Kinds of legal acts recognised in the document heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LawDocType {
    Decree,
    Order,
    Bylaw,
    Definition,
    Directive,
    Code,
    Law,
    Constitution,
    Edict,
    State,
    Instruction,
    FederalLaw,
}

impl LawDocType {
    /// Detection order; earlier types win within a batch.
    pub const PRIORITY: [Self; 12] = [
        Self::Definition,
        Self::Order,
        Self::Bylaw,
        Self::Code,
        Self::FederalLaw,
        Self::Edict,
        Self::Law,
        Self::Decree,
        Self::Directive,
        Self::Constitution,
        Self::State,
        Self::Instruction,
    ];

    #[must_use]
    pub fn word(self) -> &'static str {
        match self {
            Self::Decree => "постановление",
            Self::Order => "приказ",
            Self::Bylaw => "распоряжение",
            Self::Definition => "определение",
            Self::Directive => "директива",
            Self::Code => "кодекс",
            Self::Law => "закон",
            Self::Constitution => "конституция",
            Self::Edict => "указ",
            Self::State => "положение",
            Self::Instruction => "инструкция",
            Self::FederalLaw => "федеральный закон",
        }
    }

    /// Acts handled by the FOIV extractor.
    #[must_use]
    pub fn is_foiv(self) -> bool {
        matches!(self, Self::Order | Self::State | Self::Instruction)
    }

    /// Full-line template tolerating spaces between letters.
    ///
    /// `з` also matches `3`, a common OCR confusion in `приказ`.
    fn template(self) -> std::result::Result<Regex, regex::Error> {
        let word = self
            .word()
            .chars()
            .map(|c| match c {
                'з' if self == Self::Order => "[з3]".to_string(),
                c => regex::escape(&c.to_string()),
            })
            .collect::<Vec<_>>()
            .join(r"\s*");
        Regex::new(&format!(r"(?i)^[\s\w-]*\b{word}\b[()/.№\s\w-]*$"))
    }
}

impl fmt::Display for LawDocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Detects the act type from the heading and runs the matching extractor.
///
/// Orders, statutes and instructions go to the FOIV extractor when one is
/// configured; everything else goes to the law extractor. The document
/// gets a `Use {law|foiv} classifier` warning.
pub struct ClassifyingLawExtractor {
    law: LawStructureExtractor,
    foiv: Option<LawStructureExtractor>,
    templates: Vec<(LawDocType, Regex)>,
}

impl ClassifyingLawExtractor {
    pub fn new(law: LawStructureExtractor, foiv: Option<LawStructureExtractor>) -> Result<Self> {
        let templates = LawDocType::PRIORITY
            .into_iter()
            .map(|kind| -> Result<(LawDocType, Regex)> { Ok((kind, kind.template()?)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { law, foiv, templates })
    }

    /// Act type named in the first non-empty lines.
    ///
    /// A bare `закон` only wins when no other type matches in any batch, so
    /// codes titled `ЗАКОН ... КОДЕКС` are detected as codes.
    #[must_use]
    pub fn detect_law_type(&self, lines: &[LineWithMeta]) -> Option<LawDocType> {
        let mut law_matched = false;
        for batch in line_batches(lines) {
            for (kind, template) in &self.templates {
                if batch.iter().any(|line| template.is_match(line)) {
                    if *kind == LawDocType::Law {
                        law_matched = true;
                    } else {
                        return Some(*kind);
                    }
                }
            }
        }
        law_matched.then_some(LawDocType::Law)
    }

    fn select(&self, law_type: Option<LawDocType>) -> &LawStructureExtractor {
        match (law_type, &self.foiv) {
            (None, _) => {
                tracing::info!(extractor = self.law.name(), "Law type not found, using base extractor");
                &self.law
            }
            (Some(kind), Some(foiv)) if kind.is_foiv() => {
                tracing::info!(law_type = %kind, extractor = foiv.name(), "Law type detected");
                foiv
            }
            (Some(kind), None) if kind.is_foiv() => {
                tracing::warn!(law_type = %kind, "No FOIV extractor configured, using law extractor");
                &self.law
            }
            (Some(kind), _) => {
                tracing::info!(law_type = %kind, extractor = self.law.name(), "Law type detected");
                &self.law
            }
        }
    }
}

impl StructureExtractor for ClassifyingLawExtractor {
    fn name(&self) -> &'static str {
        AUTO_LAW
    }

    fn extract(&self, document: UnstructuredDocument) -> Result<UnstructuredDocument> {
        let extractor = self.select(self.detect_law_type(&document.lines));
        let mut result = extractor.extract(document)?;
        result.warnings.push(format!("Use {} classifier", extractor.name()));
        Ok(result)
    }
}

/// First non-empty lines, NFC-normalised and trimmed, in batches.
fn line_batches(lines: &[LineWithMeta]) -> Vec<Vec<String>> {
    let texts: Vec<String> = lines
        .iter()
        .filter(|line| !line.line().trim().is_empty())
        .take(LAW_TYPE_BATCH_SIZE * LAW_TYPE_BATCH_COUNT)
        .map(|line| line.line().nfc().collect::<String>().trim().to_string())
        .collect();
    texts.chunks(LAW_TYPE_BATCH_SIZE).map(<[String]>::to_vec).collect()
}
