//! Bounded excerpts around a query match.
//!
//! Offsets and lengths are counted in characters, so multi-byte text is never
//! cut inside a character.

use crate::search::entry::SearchEntry;

/// Default window size in characters.
pub const DEFAULT_WINDOW: usize = 120;

/// Marker added on each side where the excerpt was cut.
pub const ELLIPSIS: char = '…';

/// Excerpt of an entry's text around the first case-insensitive occurrence
/// of the raw `query` string.
///
/// See [`snippet`] for the exact windowing rules.
pub fn make_snippet(entry: &SearchEntry, query: &str, window: usize) -> String {
    snippet(&entry.text, query, window)
}

/// Excerpt of `text` around the first case-insensitive occurrence of `query`.
///
/// When `query` occurs at character `pos`, the excerpt spans
/// `[pos - window / 2, pos + len(query) + window / 2)`, clamped to the text.
/// When it does not occur, the excerpt is the first `window` characters with
/// trailing whitespace removed. An [`ELLIPSIS`] marks each side that was cut.
///
/// ```
/// use scripture::search::snippet;
///
/// assert_eq!(snippet("Jesus wept.", "WEPT", 120), "Jesus wept.");
/// assert_eq!(snippet("abcdefghij", "f", 4), "…defgh…");
/// assert_eq!(snippet("abcdefghij", "xyz", 4), "abcd…");
/// ```
pub fn snippet(text: &str, query: &str, window: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let Some(pos) = find_ignore_case(&chars, query) else {
        let head: String = chars.iter().take(window).collect();
        let mut excerpt = head.trim_end().to_string();
        if len > window {
            excerpt.push(ELLIPSIS);
        }
        return excerpt;
    };

    let half = window / 2;
    let start = pos.saturating_sub(half);
    let end = pos
        .saturating_add(query.chars().count())
        .saturating_add(half)
        .min(len);

    let mut excerpt = String::new();
    if start > 0 {
        excerpt.push(ELLIPSIS);
    }
    excerpt.extend(&chars[start..end]);
    if end < len {
        excerpt.push(ELLIPSIS);
    }
    excerpt
}

/// Character offset in `text` where `query` first occurs, ignoring case.
///
/// An empty query matches at offset 0.
fn find_ignore_case(text: &[char], query: &str) -> Option<usize> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Some(0);
    }

    // Lowercasing can expand a character, so remember which source
    // character every lowered one came from.
    let mut lowered = Vec::with_capacity(text.len());
    let mut source = Vec::with_capacity(text.len());
    for (i, c) in text.iter().enumerate() {
        for lc in c.to_lowercase() {
            lowered.push(lc);
            source.push(i);
        }
    }

    lowered
        .windows(needle.len())
        .position(|w| w == needle.as_slice())
        .map(|at| source[at])
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS_1_1: &str = "In the beginning God created the heavens and the earth.";

    #[test]
    fn test_short_text_is_returned_whole() {
        let entry = SearchEntry::new("WEB", "GEN", "Genesis", 1, 1, GENESIS_1_1);
        assert_eq!(make_snippet(&entry, "beginning", DEFAULT_WINDOW), GENESIS_1_1);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(snippet(GENESIS_1_1, "GOD CREATED", 10), "…ning God created the …");
    }

    #[test]
    fn test_match_at_start_has_no_leading_ellipsis() {
        assert_eq!(snippet(GENESIS_1_1, "in the", 10), "In the begi…");
    }

    #[test]
    fn test_match_at_end_has_no_trailing_ellipsis() {
        assert_eq!(snippet(GENESIS_1_1, "earth.", 10), "… the earth.");
    }

    #[test]
    fn test_no_match_takes_head() {
        assert_eq!(snippet(GENESIS_1_1, "serpent", 17), "In the beginning…");
        assert_eq!(snippet(GENESIS_1_1, "serpent", 200), GENESIS_1_1);
        assert_eq!(
            snippet(GENESIS_1_1, "serpent", GENESIS_1_1.chars().count()),
            GENESIS_1_1
        );
    }

    #[test]
    fn test_raw_query_is_not_tokenized() {
        // Punctuation in the query is part of the searched string.
        assert_eq!(snippet("Jesus wept.", "wept!", 4), "Jesu…");
        assert_eq!(snippet("Jesus wept.", "wept.", 4), "…s wept.");
    }

    #[test]
    fn test_empty_query_matches_at_start() {
        assert_eq!(snippet("abcdefghij", "", 4), "ab…");
        assert_eq!(snippet("", "", 4), "");
        assert_eq!(snippet("", "light", 4), "");
    }

    #[test]
    fn test_multibyte_text() {
        let text = "Im Anfang schuf Gott Himmel und Erde. Und die Erde war wüst und leer.";
        let excerpt = snippet(text, "WÜST", 6);
        assert_eq!(excerpt, "…ar wüst un…");
    }

    #[test]
    fn test_expanding_lowercase_maps_back_to_source() {
        // 'İ' lowercases to two characters.
        let text = "İİİ light";
        assert_eq!(snippet(text, "light", 2), "… light");
    }

    #[test]
    fn test_bounds() {
        let text = "And the evening and the morning were the first day. ".repeat(6);
        let text_len = text.chars().count();
        for query in ["evening", "first day", "unmatched", "morning were"] {
            for window in [0, 1, 2, 7, 30, 120, 500] {
                let excerpt = snippet(&text, query, window);
                let body: String = excerpt.chars().filter(|c| *c != ELLIPSIS).collect();
                let body_len = body.chars().count();
                assert!(body_len <= window + 2 * query.chars().count());
                assert!(body_len <= text_len);
                assert!(text.contains(&body));

                // A lone marker is the trailing one of an empty head.
                let leading = excerpt.starts_with(ELLIPSIS) && excerpt.chars().count() > 1;
                let trailing = excerpt.ends_with(ELLIPSIS);
                assert_eq!(leading, !text.starts_with(&body), "{query} {window}");
                if trailing {
                    assert!(body_len < text_len);
                }
            }
        }
    }

    #[test]
    fn test_zero_window_without_match() {
        assert_eq!(snippet(GENESIS_1_1, "serpent", 0), "…");
        assert_eq!(snippet(GENESIS_1_1, "earth", 0), "…earth…");
    }

    #[test]
    fn test_huge_window_returns_whole_text() {
        assert_eq!(snippet(GENESIS_1_1, "earth", usize::MAX), GENESIS_1_1);
        assert_eq!(snippet(GENESIS_1_1, "serpent", usize::MAX), GENESIS_1_1);
    }

    #[test]
    fn test_idempotent() {
        let entry = SearchEntry::new("KJV", "PSA", "Psalms", 23, 1, "The LORD is my shepherd; I shall not want.");
        assert_eq!(
            make_snippet(&entry, "shepherd", 12),
            make_snippet(&entry, "shepherd", 12)
        );
        assert_eq!(entry.text, "The LORD is my shepherd; I shall not want.");
    }
}
