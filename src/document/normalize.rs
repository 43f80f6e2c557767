//! Normalization and id-inference rules shared by document parsers.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

/// Book id used when nothing usable can be derived from the book name.
pub const FALLBACK_BOOK_ID: &str = "BOOK";

/// Name a book id is derived from when the document gives no name at all.
pub const UNKNOWN_BOOK_NAME: &str = "Unknown";

/// Maximum length of a book id derived from a display name.
pub const DERIVED_BOOK_ID_LEN: usize = 6;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex =
        Regex::new(r"[^A-Za-z0-9]").expect("book id pattern should be valid");
}

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Translation id for a document path: the file stem up to the first
/// underscore, or the whole stem when it has none.
///
/// ```
/// use std::path::Path;
/// use scripture::document::normalize::infer_translation_id;
///
/// assert_eq!(infer_translation_id(Path::new("data/KJV_1769_strongs.xml")), "KJV");
/// assert_eq!(infer_translation_id(Path::new("data/web.xml")), "web");
/// ```
pub fn infer_translation_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.split_once('_') {
        Some((id, _)) => id.to_string(),
        None => stem,
    }
}

/// Derive a book id from a display name: ASCII alphanumerics only, at most
/// [`DERIVED_BOOK_ID_LEN`] characters, [`FALLBACK_BOOK_ID`] when nothing is
/// left.
pub fn derive_book_id(name: &str) -> String {
    let stripped = NON_ALPHANUMERIC.replace_all(name, "");
    let id: String = stripped.chars().take(DERIVED_BOOK_ID_LEN).collect();
    if id.is_empty() {
        FALLBACK_BOOK_ID.to_string()
    } else {
        id
    }
}

/// Resolve a book id from, in order, the canonical code, the short name, or
/// the display name.
pub fn infer_book_id(osis: Option<&str>, short_name: Option<&str>, name: Option<&str>) -> String {
    osis.or(short_name)
        .map(str::to_string)
        .unwrap_or_else(|| derive_book_id(name.unwrap_or(UNKNOWN_BOOK_NAME)))
}

/// Parse a numeric attribute leniently: surrounding whitespace is ignored,
/// and absent or malformed values become 0.
pub fn parse_number(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Parse a chapter or verse number, keeping it only when it is positive.
pub fn positive_number(value: Option<&str>) -> Option<u32> {
    u32::try_from(parse_number(value)).ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  In the\n\tbeginning   God  "),
            "In the beginning God"
        );
        assert_eq!(normalize_whitespace(" \n\t "), "");
        assert_eq!(normalize_whitespace("word"), "word");
    }

    #[test]
    fn test_infer_translation_id() {
        assert_eq!(infer_translation_id(Path::new("SF_2009-01-20_ENG_KJV.xml")), "SF");
        assert_eq!(infer_translation_id(Path::new("/data/elb.xml")), "elb");
        assert_eq!(infer_translation_id(Path::new("a_b_c.xml")), "a");
    }

    #[test]
    fn test_infer_book_id_precedence() {
        assert_eq!(infer_book_id(Some("Gen"), Some("Ge"), Some("Genesis")), "Gen");
        assert_eq!(infer_book_id(None, Some("Ge"), Some("Genesis")), "Ge");
        assert_eq!(infer_book_id(None, None, Some("Genesis")), "Genesi");
        assert_eq!(infer_book_id(None, None, Some("1. Mose")), "1Mose");
        assert_eq!(infer_book_id(None, None, None), "Unknow");
    }

    #[test]
    fn test_derive_book_id_fallback() {
        assert_eq!(derive_book_id("---"), "BOOK");
        assert_eq!(derive_book_id(""), "BOOK");
        assert_eq!(derive_book_id("Ésaïe"), "sae");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some("12")), 12);
        assert_eq!(parse_number(Some(" 7 ")), 7);
        assert_eq!(parse_number(Some("x1")), 0);
        assert_eq!(parse_number(Some("")), 0);
        assert_eq!(parse_number(None), 0);
        assert_eq!(parse_number(Some("-3")), -3);
    }

    #[test]
    fn test_positive_number() {
        assert_eq!(positive_number(Some("3")), Some(3));
        assert_eq!(positive_number(Some("0")), None);
        assert_eq!(positive_number(Some("-1")), None);
        assert_eq!(positive_number(Some("abc")), None);
    }
}
