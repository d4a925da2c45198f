//! Small helpers shared by the trie implementations.

use lexicon_common::{Result, error::Error};

/// Length in bytes of the longest common prefix of `a` and `b`.
///
/// The comparison is done per `char`, so the result is always a char
/// boundary in both strings.
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|&((_, x), y)| x != y)
        .map(|((pos, _), _)| pos)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Decodes raw input bytes at the API boundary.
pub(crate) fn decode_input<'a>(context: &str, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| Error::invalid_utf8(context, e))
}

/// First character of a non-empty string slice.
#[inline]
pub(crate) fn first_char(s: &str) -> Option<char> {
    s.chars().next()
}
