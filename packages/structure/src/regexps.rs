//! Shared regular expressions for numbering and legal vocabulary.
//!
//! Builders match these against stripped text; most are anchored at the start
//! and used as prefix matches.

use regex::Regex;
use std::sync::LazyLock;

/// Numbered item followed by whitespace: `1. text`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s").expect("valid regex"));

/// Number closed by a bracket: `1)`, `1.2}`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static ITEM_WITH_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d*\.)*\d+[)}]").expect("valid regex"));

/// Cyrillic subitem, optionally after dotted numbers: `а)`, `12.б.в. `.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static SUBITEM_WITH_DOTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+\.|[а-яё]\.)*[а-яё][.)]\s").expect("valid regex")
});

/// Single letter of either alphabet closed by a bracket.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static SUBITEM_EXTENDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[a-zA-Zа-яёА-ЯЁ][)}]").expect("valid regex"));

/// Lowercase Cyrillic letter closed by a bracket: `а)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static SUBITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[а-яё]\)").expect("valid regex"));

/// Dotted item of executive acts: `1. `, `1.2. `, `1.2 `.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static FOIV_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\.)+\d*\s").expect("valid regex"));

/// Item number of one or two digit groups with a proper terminator.
///
/// Dates like `03.06.2009` and bare years do not qualify.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2}\.)*\d{1,2}(\.?\s|$|[)}]|\.[a-zA-Zа-яёА-ЯЁ])").expect("valid regex")
});

/// Trailing noise after an item number: one letter or whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static ENDS_OF_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[a-zA-Zа-яёА-ЯЁ]|\s*)$").expect("valid regex"));

/// Roman numeral section number, including common OCR confusions.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static ROMAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(I|Г|T|Т|II|П|III|Ш|ТУ|TУ|IV|V|У|VI|УТ|УT|VII|УТТ|VIII|I[XХ]|[XХ]|[XХ]I|[XХ]II)\.\s+",
    )
    .expect("valid regex")
});

/// Start of an application block: `Приложение №1`, `Утверждено`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static APPLICATION_BEGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^['"]?(приложение|утвержден[оаы]?)( *([№n]? *\d{1,3})? *)(к распоряжению|к постановлению|к приказу)?\s*$"#,
    )
    .expect("valid regex")
});

/// Named legal unit with its number: `Статья 5.`, `Глава IV`, `§ 3`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static NAMED_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(Статья|[Гг]лава|ГЛАВА|ЧАСТЬ|Часть|Раздел|РАЗДЕЛ|\$|§)\s*((\d+\.*)+|[IVXХxхviУП]{1,3}\.?)\s*",
    )
    .expect("valid regex")
});

/// Cellar signature line: `Президент Российской Федерации`, `Министр`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static CELLAR_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(президент|председатель|министр|губернатор|глава администрации|руководитель)\b")
        .expect("valid regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    fn fullmatch(regex: &Regex, text: &str) -> bool {
        let anchored = Regex::new(&format!("^(?:{})$", regex.as_str())).unwrap();
        anchored.is_match(text)
    }

    #[test]
    fn test_item() {
        assert!(ITEM.is_match("     1. x"));
        assert!(ITEM.is_match("\t5. qwe"));
        assert!(!ITEM.is_match("1.1 x"));
        assert!(!ITEM.is_match("\t1.qwe"));
        assert!(!ITEM.is_match("1)"));
    }

    #[test]
    fn test_item_with_bracket() {
        assert!(ITEM_WITH_BRACKET.is_match("1)"));
        assert!(ITEM_WITH_BRACKET.is_match("  1.2.3} текст"));
        assert!(!ITEM_WITH_BRACKET.is_match("а)"));
    }

    #[test]
    fn test_subitem_with_dots() {
        assert!(SUBITEM_WITH_DOTS.is_match("а) текст на русском"));
        assert!(SUBITEM_WITH_DOTS.is_match("      123.я.  "));
        assert!(SUBITEM_WITH_DOTS.is_match("12.б.у.к.в.ы. "));
        assert!(!SUBITEM_WITH_DOTS.is_match("23.б.у.к.в.ы."));
        assert!(!SUBITEM_WITH_DOTS.is_match("    123.456"));
    }

    #[test]
    fn test_subitem_extended() {
        assert!(SUBITEM_EXTENDED.is_match("z)"));
        assert!(SUBITEM_EXTENDED.is_match("я}"));
        assert!(!SUBITEM_EXTENDED.is_match("Q|"));
    }

    #[test]
    fn test_subitem_is_cyrillic_only() {
        assert!(SUBITEM.is_match("а) текст"));
        assert!(!SUBITEM.is_match("b) text"));
    }

    #[test]
    fn test_number_matches() {
        for text in [
            "3. ",
            "   3.ф oksdfnn",
            "\t12",
            "12.34.56.78",
            "12.3.4.5.6.7.8)",
            "12.34}",
            "1.23.4.Z",
            "2. Нарушение",
            "1.2.2)",
            "1.2.4.6}",
            "1.4.5 ",
            "1.4.5\n",
            "1.5.6.Закон",
        ] {
            assert!(NUMBER.is_match(text), "expected match for {text:?}");
        }
    }

    #[test]
    fn test_number_rejects() {
        for text in [
            "3.",
            "123",
            "lorem ipsum 12",
            "1.23.005 ",
            "03.06.2009 № 17 О порядке",
        ] {
            assert!(!NUMBER.is_match(text), "expected no match for {text:?}");
        }
    }

    #[test]
    fn test_ends_of_number_fullmatch() {
        assert!(fullmatch(&ENDS_OF_NUMBER, "ё"));
        assert!(fullmatch(&ENDS_OF_NUMBER, "   "));
        assert!(fullmatch(&ENDS_OF_NUMBER, ""));
        assert!(fullmatch(&ENDS_OF_NUMBER, "z"));
        assert!(!fullmatch(&ENDS_OF_NUMBER, "abacaba"));
    }

    #[test]
    fn test_ends_of_number_trims_tail() {
        let trim = |text: &str| -> String {
            let end = ENDS_OF_NUMBER.find(text).map_or(text.len(), |m| m.start());
            text[..end].to_string()
        };
        assert_eq!(trim("1.2.2) "), "1.2.2)");
        assert_eq!(trim("1.4.5Д"), "1.4.5");
        assert_eq!(trim("1.5.6.Н"), "1.5.6.");
        assert_eq!(trim("1.2.4.6}    "), "1.2.4.6}");
    }

    #[test]
    fn test_roman() {
        assert!(fullmatch(&ROMAN, "    XI. "));
        assert!(fullmatch(&ROMAN, "\tIII. "));
        assert!(!fullmatch(&ROMAN, "    XI."));
        assert!(!fullmatch(&ROMAN, "   "));
        assert!(ROMAN.is_match("ТУ. Заключительные положения"));
    }

    #[test]
    fn test_application_begin() {
        for text in [
            "приложение",
            "Приложение",
            "утверждены",
            "Утверждены",
            "приложение к приказу",
            "приложение к постановлению",
            "утвержден",
            "УТВЕРЖДЕНО",
            "Приложение №1",
            "'Приложение N2",
        ] {
            assert!(APPLICATION_BEGIN.is_match(text), "expected match for {text:?}");
        }
        assert!(!APPLICATION_BEGIN.is_match("постановление"));
        assert!(!APPLICATION_BEGIN.is_match("к приказу"));
    }

    #[test]
    fn test_named_unit() {
        assert!(NAMED_UNIT.is_match("Статья 5. Порядок"));
        assert!(NAMED_UNIT.is_match("Глава IV. Общие положения"));
        assert!(NAMED_UNIT.is_match("§ 3"));
        assert!(!NAMED_UNIT.is_match("Главная страница"));
    }
}
