//! Single letters closed by a bracket: `а)`, `b)`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, StructureError};

const CYRILLIC: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";
const LATIN: &str = "abcdefghijklmnopqrstuvwxyz";

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static LETTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[a-zа-яё]\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LETTER_VALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Zа-яёА-ЯЁ]\)?$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static ANY_LETTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\w\)").expect("valid regex"));

/// Position of `letter` in its alphabet, ignoring case.
fn alphabet_position(letter: char) -> Option<(&'static str, usize)> {
    let lower = letter.to_lowercase().next()?;
    [CYRILLIC, LATIN].into_iter().find_map(|alphabet| {
        alphabet
            .chars()
            .position(|c| c == lower)
            .map(|pos| (alphabet, pos))
    })
}

/// Cyrillic or Latin letter item.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterPrefix {
    pub prefix: String,
    pub indent: f64,
    pub letter: char,
}

impl LetterPrefix {
    pub const NAME: &'static str = "letter";

    pub fn new(prefix: &str, indent: f64) -> Result<Self> {
        let letter = prefix
            .chars()
            .next()
            .filter(|_| Self::is_valid(prefix))
            .ok_or_else(|| StructureError::InvalidPrefix {
                kind: Self::NAME,
                prefix: prefix.to_string(),
            })?;
        Ok(Self {
            prefix: prefix.to_string(),
            indent,
            letter,
        })
    }

    #[must_use]
    pub fn is_valid(prefix: &str) -> bool {
        LETTER_VALID.is_match(prefix)
    }

    /// Alphabet successor within the same alphabet. `ж` also follows `е`,
    /// since `ё` is often skipped in numbering.
    #[must_use]
    pub fn predecessor(&self, other: &Self) -> bool {
        let lower = |c: char| c.to_lowercase().next().unwrap_or(c);
        if lower(self.letter) == 'ж' && lower(other.letter) == 'е' {
            return true;
        }
        match (alphabet_position(self.letter), alphabet_position(other.letter)) {
            (Some((this_alphabet, this)), Some((that_alphabet, that))) => {
                this_alphabet == that_alphabet && this == that + 1
            }
            _ => false,
        }
    }
}

/// Item labelled by any single alphabetic character: `α)`, `ä)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyLetterPrefix {
    pub prefix: String,
    pub indent: f64,
    pub letter: char,
}

impl AnyLetterPrefix {
    pub const NAME: &'static str = "any_letter";

    pub fn new(prefix: &str, indent: f64) -> Result<Self> {
        let letter = prefix
            .chars()
            .next()
            .filter(|_| Self::is_valid(prefix))
            .ok_or_else(|| StructureError::InvalidPrefix {
                kind: Self::NAME,
                prefix: prefix.to_string(),
            })?;
        Ok(Self {
            prefix: prefix.to_string(),
            indent,
            letter,
        })
    }

    #[must_use]
    pub fn is_valid(prefix: &str) -> bool {
        let mut chars = prefix.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(c), Some(')'), None) if c.is_alphabetic()
        )
    }

    /// Next code point after `other`, ignoring case.
    #[must_use]
    pub fn predecessor(&self, other: &Self) -> bool {
        let lower = |c: char| c.to_lowercase().next().unwrap_or(c);
        u32::from(lower(self.letter)) == u32::from(lower(other.letter)) + 1
    }
}
