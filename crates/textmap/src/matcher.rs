//! Literal-query matching with optional whole-word bounding.
//!
//! Queries are always matched literally (`regex::escape`), never as
//! patterns. Whole-word mode bounds matches with an explicit
//! boundary-character set instead of `\b`: alphanumeric word-boundary
//! classes misfire on scripts without Latin word characters, while an
//! explicit whitespace-and-punctuation set stays correct there. Boundary
//! characters adjacent to a match are tested, never consumed.

use std::ops::Range;

use regex::RegexBuilder;

/// Sentence punctuation treated as word boundaries, alongside all Unicode
/// whitespace. String start/end always bound.
const BOUNDARY_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '…', '"', '\'', '(', ')', '[', ']', '{', '}', '«', '»', '‹',
    '›', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '、', '。', '，', '！', '？', '；',
    '：',
];

pub fn is_boundary(ch: char) -> bool {
    ch.is_whitespace() || BOUNDARY_PUNCTUATION.contains(&ch)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
        }
    }
}

impl MatchOptions {
    pub fn whole_word() -> Self {
        Self {
            whole_word: true,
            ..Self::default()
        }
    }
}

/// Every non-overlapping occurrence of `query` in `haystack` under the
/// active mode, as byte ranges in ascending order.
pub fn find_spans(haystack: &str, query: &str, options: MatchOptions) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }
    let pattern = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(!options.case_sensitive)
        .build()
        .expect("escaped literal query is always a valid pattern");
    pattern
        .find_iter(haystack)
        .map(|m| m.range())
        .filter(|range| !options.whole_word || is_bounded(haystack, range))
        .collect()
}

/// True when some occurrence exists under the active mode.
pub fn matches(haystack: &str, query: &str, options: MatchOptions) -> bool {
    !find_spans(haystack, query, options).is_empty()
}

fn is_bounded(haystack: &str, range: &Range<usize>) -> bool {
    let before = haystack[..range.start].chars().next_back();
    let after = haystack[range.end..].chars().next();
    before.is_none_or(is_boundary) && after.is_none_or(is_boundary)
}
