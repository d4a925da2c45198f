//! Naive reference implementations.

/// Byte offsets of every occurrence of `pattern` in `text`, overlapping ones
/// included, by brute-force comparison at each char boundary.
pub fn find_all_occurrences(text: &str, pattern: &str) -> Vec<usize> {
    if pattern.is_empty() {
        return Vec::new();
    }
    text.char_indices()
        .map(|(pos, _)| pos)
        .filter(|&pos| text[pos..].starts_with(pattern))
        .collect()
}

/// Whether any of `words` starts with `prefix`.
pub fn any_has_prefix<'a>(words: impl IntoIterator<Item = &'a String>, prefix: &str) -> bool {
    words.into_iter().any(|w| w.starts_with(prefix))
}
