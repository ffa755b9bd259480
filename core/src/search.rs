//! Plain substring find and replace.
//!
//! Everything here is a pure function of `(text, term, comparison)`. Offsets
//! are byte offsets into `text`; matches always start and end on char
//! boundaries. Case-insensitive matching folds one char at a time, so a match
//! spans exactly as many chars as the term does.

use crate::document::{ceil_char_boundary, Selection};
use std::ops::Range;

/// How candidate text is compared against the search term.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    #[default]
    IgnoreCase,
    Exact,
}

impl Comparison {
    pub fn from_match_case(match_case: bool) -> Self {
        if match_case {
            Self::Exact
        } else {
            Self::IgnoreCase
        }
    }

    fn chars_eq(self, a: char, b: char) -> bool {
        match self {
            Self::Exact => a == b,
            Self::IgnoreCase => a == b || a.to_lowercase().eq(b.to_lowercase()),
        }
    }
}

/// Length in bytes of the match of `term` at the very start of `haystack`.
fn match_len_at(haystack: &str, term: &str, cmp: Comparison) -> Option<usize> {
    let mut candidates = haystack.chars();
    let mut len = 0;
    for expected in term.chars() {
        let found = candidates.next()?;
        if !cmp.chars_eq(found, expected) {
            return None;
        }
        len += found.len_utf8();
    }
    Some(len)
}

/// First match of `term` starting at or after byte offset `from`.
pub fn find_from(text: &str, term: &str, from: usize, cmp: Comparison) -> Option<Range<usize>> {
    if term.is_empty() || from > text.len() {
        return None;
    }
    let from = ceil_char_boundary(text, from);
    let tail = &text[from..];

    match cmp {
        Comparison::Exact => tail
            .find(term)
            .map(|offset| from + offset..from + offset + term.len()),
        Comparison::IgnoreCase => tail.char_indices().find_map(|(offset, _)| {
            match_len_at(&tail[offset..], term, cmp)
                .map(|len| from + offset..from + offset + len)
        }),
    }
}

/// The next match after `cursor`, wrapping around to the start of the text.
///
/// Searching resumes at the end of the cursor's selection, so repeated calls
/// step through successive matches. A cursor past the end of the text starts
/// over from the beginning.
pub fn find_next(
    text: &str,
    term: &str,
    cmp: Comparison,
    cursor: Selection,
) -> Option<Range<usize>> {
    if term.is_empty() || text.is_empty() {
        return None;
    }

    let mut start = cursor.end();
    if start > text.len() {
        start = 0;
    }

    find_from(text, term, start, cmp).or_else(|| {
        if start > 0 {
            find_from(text, term, 0, cmp)
        } else {
            None
        }
    })
}

/// Whether `candidate` is exactly `term` under `cmp`.
pub fn matches_term(candidate: &str, term: &str, cmp: Comparison) -> bool {
    match cmp {
        Comparison::Exact => candidate == term,
        Comparison::IgnoreCase => match_len_at(candidate, term, cmp) == Some(candidate.len()),
    }
}

/// Non-overlapping matches, left to right.
pub struct Matches<'a> {
    text: &'a str,
    term: &'a str,
    cmp: Comparison,
    pos: usize,
}

impl Iterator for Matches<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let found = find_from(self.text, self.term, self.pos, self.cmp)?;
        self.pos = found.end;
        Some(found)
    }
}

pub fn matches<'a>(text: &'a str, term: &'a str, cmp: Comparison) -> Matches<'a> {
    Matches {
        text,
        term,
        cmp,
        pos: 0,
    }
}

/// Result of [`replace_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    pub text: String,
    pub count: usize,
}

/// Substitute every match of `term` with `replacement`, verbatim.
///
/// The scan never revisits replacement text, so a replacement that contains
/// `term` is not expanded again.
pub fn replace_all(text: &str, term: &str, replacement: &str, cmp: Comparison) -> Replaced {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;

    for found in matches(text, term, cmp) {
        out.push_str(&text[last..found.start]);
        out.push_str(replacement);
        last = found.end;
        count += 1;
    }
    out.push_str(&text[last..]);

    Replaced { text: out, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXACT: Comparison = Comparison::Exact;
    const FOLD: Comparison = Comparison::IgnoreCase;

    #[test]
    fn find_next_wraps_around() {
        let text = "abcabc";
        let first = find_next(text, "abc", EXACT, Selection::caret(3));
        assert_eq!(first, Some(3..6));

        let second = find_next(text, "abc", EXACT, Selection::from_range(3..6));
        assert_eq!(second, Some(0..3));
    }

    #[test]
    fn find_next_respects_case() {
        let text = "cat Cat";
        assert_eq!(find_next(text, "Cat", EXACT, Selection::default()), Some(4..7));
        assert_eq!(find_next(text, "Cat", FOLD, Selection::default()), Some(0..3));
    }

    #[test]
    fn find_next_cursor_past_end_starts_over() {
        assert_eq!(find_next("xyx", "x", EXACT, Selection::caret(10)), Some(0..1));
    }

    #[test]
    fn find_next_nothing_to_do() {
        assert_eq!(find_next("", "a", EXACT, Selection::default()), None);
        assert_eq!(find_next("abc", "", EXACT, Selection::default()), None);
        assert_eq!(find_next("abc", "z", FOLD, Selection::caret(2)), None);
    }

    #[test]
    fn find_next_from_start_does_not_retry() {
        // no match from 0 means no match anywhere
        assert_eq!(find_next("abc", "d", EXACT, Selection::caret(0)), None);
    }

    #[test]
    fn find_from_inside_multibyte_char() {
        // the leading 'ü' occupies 0..2
        let text = "über ü";
        assert_eq!(find_from(text, "ü", 1, EXACT), Some(6..8));
    }

    #[test]
    fn ignore_case_spans_document_bytes() {
        // 'Σ' and 'σ' are both two bytes; 'K' (Kelvin sign) is three bytes and folds to 'k'
        let text = "aΣb \u{212A}ey";
        assert_eq!(find_from(text, "σ", 0, FOLD), Some(1..3));
        assert_eq!(find_from(text, "key", 0, FOLD), Some(5..10));
    }

    #[test]
    fn matches_term_compares_whole_string() {
        assert!(matches_term("Cat", "cat", FOLD));
        assert!(!matches_term("Cat", "cat", EXACT));
        assert!(!matches_term("Cats", "cat", FOLD));
        assert!(!matches_term("Ca", "cat", FOLD));
    }

    #[test]
    fn replace_all_substitutes_each_match() {
        let replaced = replace_all("aXaXa", "X", "-", EXACT);
        assert_eq!(replaced.text, "a-a-a");
        assert_eq!(replaced.count, 2);
    }

    #[test]
    fn replace_all_does_not_rescan_replacement() {
        let replaced = replace_all("aa", "a", "aa", EXACT);
        assert_eq!(replaced.text, "aaaa");
        assert_eq!(replaced.count, 2);
    }

    #[test]
    fn replace_all_matches_do_not_overlap() {
        let replaced = replace_all("aaa", "aa", "b", EXACT);
        assert_eq!(replaced.text, "ba");
        assert_eq!(replaced.count, 1);
    }

    #[test]
    fn replace_all_ignoring_case() {
        let replaced = replace_all("Foo foo FOO", "foo", "bar", FOLD);
        assert_eq!(replaced.text, "bar bar bar");
        assert_eq!(replaced.count, 3);
    }

    #[test]
    fn replace_all_without_matches_leaves_text() {
        let replaced = replace_all("hello", "z", "y", FOLD);
        assert_eq!(replaced.text, "hello");
        assert_eq!(replaced.count, 0);
    }
}
