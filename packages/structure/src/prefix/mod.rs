//! Leading list tokens and their ordering.
//!
//! A [`LinePrefix`] is the numbering or bullet token a line starts with,
//! parsed into something comparable. [`LinePrefix::predecessor`] answers
//! whether one token may directly precede another in the same list; tokens
//! of different kinds never do.
//!
//! # Kinds
//!
//! - [`DottedPrefix`]: `1.`, `1.2.3`
//! - [`BracketPrefix`]: `1)`
//! - [`LetterPrefix`]: `а)`, `b)` (Cyrillic or Latin)
//! - [`AnyLetterPrefix`]: any alphabetic character with a bracket
//! - [`BulletPrefix`]: `-`, `•`, `*`
//! - [`RomanPrefix`] and [`BracketRomanPrefix`]: `iv.`, `iv)`
//! - [`EmptyPrefix`]: no recognisable token

pub mod bracket;
pub mod bullet;
pub mod dotted;
pub mod letter;
pub mod roman;

use regex::Regex;

pub use bracket::BracketPrefix;
pub use bullet::BulletPrefix;
pub use dotted::DottedPrefix;
pub use letter::{AnyLetterPrefix, LetterPrefix};
pub use roman::{BracketRomanPrefix, RomanPrefix};

use crate::error::Result;
use crate::line::annotation::INDENTATION;
use crate::line::LineWithMeta;

/// Line without a list token. Precedes nothing and follows nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyPrefix {
    pub prefix: String,
    pub indent: f64,
}

impl EmptyPrefix {
    pub const NAME: &'static str = "empty";

    #[must_use]
    pub fn new(indent: f64) -> Self {
        Self {
            prefix: String::new(),
            indent,
        }
    }

    /// Any token is acceptable for the empty prefix.
    #[must_use]
    pub fn is_valid(_prefix: &str) -> bool {
        true
    }
}

/// Parsed list token of a line.
#[derive(Debug, Clone, PartialEq)]
pub enum LinePrefix {
    Dotted(DottedPrefix),
    Bracket(BracketPrefix),
    Letter(LetterPrefix),
    AnyLetter(AnyLetterPrefix),
    Bullet(BulletPrefix),
    Roman(RomanPrefix),
    BracketRoman(BracketRomanPrefix),
    Empty(EmptyPrefix),
}

impl LinePrefix {
    /// Whether `other` may directly precede `self` in the same list.
    #[must_use]
    pub fn predecessor(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Dotted(a), Self::Dotted(b)) => a.predecessor(b),
            (Self::Bracket(a), Self::Bracket(b)) => a.predecessor(b),
            (Self::Letter(a), Self::Letter(b)) => a.predecessor(b),
            (Self::AnyLetter(a), Self::AnyLetter(b)) => a.predecessor(b),
            (Self::Bullet(a), Self::Bullet(b)) => a.predecessor(b),
            (Self::Roman(a), Self::Roman(b)) => a.predecessor(b),
            (Self::BracketRoman(a), Self::BracketRoman(b)) => a.predecessor(b),
            _ => false,
        }
    }

    /// Whether `other` may directly follow `self`.
    #[must_use]
    pub fn successor(&self, other: &Self) -> bool {
        other.predecessor(self)
    }

    /// The token text, empty for [`LinePrefix::Empty`].
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self {
            Self::Dotted(p) => &p.prefix,
            Self::Bracket(p) => &p.prefix,
            Self::Letter(p) => &p.prefix,
            Self::AnyLetter(p) => &p.prefix,
            Self::Bullet(p) => &p.prefix,
            Self::Roman(p) => &p.prefix,
            Self::BracketRoman(p) => &p.prefix,
            Self::Empty(p) => &p.prefix,
        }
    }

    #[must_use]
    pub fn indent(&self) -> f64 {
        match self {
            Self::Dotted(p) => p.indent,
            Self::Bracket(p) => p.indent,
            Self::Letter(p) => p.indent,
            Self::AnyLetter(p) => p.indent,
            Self::Bullet(p) => p.indent,
            Self::Roman(p) => p.indent,
            Self::BracketRoman(p) => p.indent,
            Self::Empty(p) => p.indent,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dotted(_) => DottedPrefix::NAME,
            Self::Bracket(_) => BracketPrefix::NAME,
            Self::Letter(_) => LetterPrefix::NAME,
            Self::AnyLetter(_) => AnyLetterPrefix::NAME,
            Self::Bullet(_) => BulletPrefix::NAME,
            Self::Roman(_) => RomanPrefix::NAME,
            Self::BracketRoman(_) => BracketRomanPrefix::NAME,
            Self::Empty(_) => EmptyPrefix::NAME,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

/// Prefix kind that [`get_prefix`] may try on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixKind {
    Dotted,
    Bracket,
    Letter,
    AnyLetter,
    Bullet,
    Roman,
    BracketRoman,
}

impl PrefixKind {
    /// Kinds tried by list feature extraction, in priority order.
    pub const DEFAULT_ORDER: [Self; 4] = [Self::Bullet, Self::Letter, Self::Bracket, Self::Dotted];

    /// Regex locating this kind of token at the start of lowercased text.
    #[must_use]
    pub fn regexp(self) -> &'static Regex {
        match self {
            Self::Dotted => &dotted::DOTTED_REGEX,
            Self::Bracket => &bracket::BRACKET_REGEX,
            Self::Letter => &letter::LETTER_REGEX,
            Self::AnyLetter => &letter::ANY_LETTER_REGEX,
            Self::Bullet => &bullet::BULLET_REGEX,
            Self::Roman => &roman::ROMAN_REGEX,
            Self::BracketRoman => &roman::BRACKET_ROMAN_REGEX,
        }
    }

    #[must_use]
    pub fn is_valid(self, prefix: &str) -> bool {
        match self {
            Self::Dotted => DottedPrefix::is_valid(prefix),
            Self::Bracket => BracketPrefix::is_valid(prefix),
            Self::Letter => LetterPrefix::is_valid(prefix),
            Self::AnyLetter => AnyLetterPrefix::is_valid(prefix),
            Self::Bullet => BulletPrefix::is_valid(prefix),
            Self::Roman => RomanPrefix::is_valid(prefix),
            Self::BracketRoman => BracketRomanPrefix::is_valid(prefix),
        }
    }

    /// Build a prefix of this kind from an already extracted token.
    pub fn build(self, prefix: &str, indent: f64) -> Result<LinePrefix> {
        Ok(match self {
            Self::Dotted => LinePrefix::Dotted(DottedPrefix::new(prefix, indent)?),
            Self::Bracket => LinePrefix::Bracket(BracketPrefix::new(prefix, indent)?),
            Self::Letter => LinePrefix::Letter(LetterPrefix::new(prefix, indent)?),
            Self::AnyLetter => LinePrefix::AnyLetter(AnyLetterPrefix::new(prefix, indent)?),
            Self::Bullet => LinePrefix::Bullet(BulletPrefix::new(prefix, indent)?),
            Self::Roman => LinePrefix::Roman(RomanPrefix::new(prefix, indent)?),
            Self::BracketRoman => LinePrefix::BracketRoman(BracketRomanPrefix::new(prefix, indent)?),
        })
    }
}

/// Horizontal indentation of a line.
///
/// Uses the reader's indentation annotation when present, otherwise counts
/// leading whitespace characters.
#[must_use]
pub fn line_indent(line: &LineWithMeta) -> f64 {
    line.annotations()
        .iter()
        .find(|a| a.name == INDENTATION)
        .and_then(|a| a.value.parse::<f64>().ok())
        .unwrap_or_else(|| {
            line.line()
                .chars()
                .take_while(|c| c.is_whitespace() && *c != '\n')
                .count() as f64
        })
}

/// Parse the list token of `line`, trying `kinds` in order.
///
/// The first kind whose regex matches the stripped, lowercased text and
/// accepts the token wins. Lines without a token get [`LinePrefix::Empty`].
#[must_use]
pub fn get_prefix(kinds: &[PrefixKind], line: &LineWithMeta) -> LinePrefix {
    let text = line.line().trim().to_lowercase();
    let indent = line_indent(line);
    kinds
        .iter()
        .find_map(|kind| {
            let token = kind.regexp().find(&text)?.as_str().trim();
            kind.build(token, indent).ok()
        })
        .unwrap_or_else(|| LinePrefix::Empty(EmptyPrefix::new(indent)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::{Annotation, LineMetadata};

    fn mixed() -> Vec<LinePrefix> {
        vec![
            PrefixKind::Dotted.build("1.", 0.0).unwrap(),
            PrefixKind::Bracket.build("1)", 0.0).unwrap(),
            LinePrefix::Empty(EmptyPrefix::new(0.0)),
            PrefixKind::Letter.build("a)", 0.0).unwrap(),
            PrefixKind::Bullet.build("-", 0.0).unwrap(),
            PrefixKind::Roman.build("i.", 0.0).unwrap(),
            PrefixKind::BracketRoman.build("ii)", 0.0).unwrap(),
        ]
    }

    #[test]
    fn test_mixed_kinds_never_precede() {
        let prefixes = mixed();
        for (i, first) in prefixes.iter().enumerate() {
            for (j, second) in prefixes.iter().enumerate() {
                if i != j {
                    assert!(!first.predecessor(second), "{first:?} vs {second:?}");
                    assert!(!second.predecessor(first), "{second:?} vs {first:?}");
                }
            }
        }
    }

    #[test]
    fn test_same_kind_predecessor_is_antisymmetric() {
        let grid: [(PrefixKind, &[&str]); 5] = [
            (
                PrefixKind::Dotted,
                &["1.", "2.", "3", "1.1.", "1.2", "1.1.1", "1.1.2.", "2.1.", "2.4.1", "10."],
            ),
            (PrefixKind::Bracket, &["1)", "2)", "3)", "10)", "11)"]),
            (PrefixKind::Letter, &["а)", "б)", "в)", "е)", "ж)", "a)", "b)", "c)"]),
            (PrefixKind::Roman, &["i.", "ii.", "iii.", "iv.", "v.", "ix.", "x."]),
            (PrefixKind::BracketRoman, &["i)", "ii)", "iii)", "iv)", "v)"]),
        ];
        for (kind, tokens) in grid {
            let prefixes: Vec<LinePrefix> = tokens.iter().map(|t| kind.build(t, 0.0).unwrap()).collect();
            for p in &prefixes {
                for q in &prefixes {
                    assert!(
                        !(p.predecessor(q) && q.predecessor(p)),
                        "{} and {} precede each other",
                        p.prefix(),
                        q.prefix()
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_precedes_nothing() {
        let empty = LinePrefix::Empty(EmptyPrefix::new(0.0));
        assert!(!empty.predecessor(&empty));
        assert!(EmptyPrefix::is_valid("some prefix"));
        assert!(EmptyPrefix::is_valid(""));
    }

    #[test]
    fn test_invalid_tokens_rejected_by_every_kind() {
        let kinds = [
            PrefixKind::Dotted,
            PrefixKind::Bracket,
            PrefixKind::Letter,
            PrefixKind::Bullet,
            PrefixKind::Roman,
            PrefixKind::BracketRoman,
        ];
        for token in ["\t", "", "aa", "some word", "1.a.2"] {
            for kind in kinds {
                assert!(!kind.is_valid(token), "{token:?} accepted by {kind:?}");
                assert!(kind.build(token, 0.0).is_err());
            }
        }
    }

    #[test]
    fn test_successor() {
        let one = PrefixKind::Bracket.build("1)", 0.0).unwrap();
        let two = PrefixKind::Bracket.build("2)", 0.0).unwrap();
        assert!(one.successor(&two));
        assert!(!two.successor(&one));
    }

    #[test]
    fn test_get_prefix_priority() {
        let kinds = PrefixKind::DEFAULT_ORDER;
        let cases = [
            ("1. text", "dotted", "1."),
            ("  1.2 text", "dotted", "1.2"),
            ("2) text", "bracket", "2)"),
            ("Б) пункт", "letter", "б)"),
            ("- dash", "bullet", "-"),
            ("plain text", "empty", ""),
            ("", "empty", ""),
        ];
        for (text, name, token) in cases {
            let prefix = get_prefix(&kinds, &LineWithMeta::from_text(text));
            assert_eq!(prefix.name(), name, "{text:?}");
            assert_eq!(prefix.prefix(), token, "{text:?}");
        }
    }

    #[test]
    fn test_get_prefix_kind_subset() {
        let prefix = get_prefix(&[PrefixKind::Bracket], &LineWithMeta::from_text("1. text"));
        assert!(prefix.is_empty());
        let prefix = get_prefix(&[PrefixKind::Roman], &LineWithMeta::from_text("IV. Раздел"));
        assert_eq!(prefix.name(), "roman");
    }

    #[test]
    fn test_line_indent() {
        assert_eq!(line_indent(&LineWithMeta::from_text("    1. x")), 4.0);
        let annotated = LineWithMeta::new(
            "1. x",
            LineMetadata::default(),
            vec![Annotation::new(0, 4, INDENTATION, "36.5")],
        );
        assert_eq!(line_indent(&annotated), 36.5);
        assert_eq!(
            get_prefix(&PrefixKind::DEFAULT_ORDER, &annotated).indent(),
            36.5
        );
    }
}
