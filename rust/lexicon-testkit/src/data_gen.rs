//! Data generation utilities for testing.
//!
//! All generators take an explicit seed so that a failing test can be
//! reproduced exactly.

use std::ops::Range;

/// Lowercase ASCII letters.
pub const ASCII_LOWER: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// A small alphabet mixing one-, two- and three-byte UTF-8 characters.
pub const MIXED_WIDTH: &[char] = &['a', 'b', 'é', 'ß', '日', '本'];

/// Generates `count` random words over `alphabet` with lengths drawn from `len`.
///
/// Small alphabets produce many shared prefixes, which is what the trie
/// tests want to exercise. Duplicates are kept.
pub fn random_words(seed: u64, count: usize, alphabet: &[char], len: Range<usize>) -> Vec<String> {
    assert!(!alphabet.is_empty());
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count)
        .map(|_| {
            let word_len = rng.usize(len.clone());
            (0..word_len)
                .map(|_| alphabet[rng.usize(0..alphabet.len())])
                .collect()
        })
        .collect()
}

/// Generates a random text of `len` characters over `alphabet`.
pub fn random_text(seed: u64, len: usize, alphabet: &[char]) -> String {
    assert!(!alphabet.is_empty());
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len)
        .map(|_| alphabet[rng.usize(0..alphabet.len())])
        .collect()
}

/// Every distinct substring of `text` of up to `max_len` characters.
pub fn substrings(text: &str, max_len: usize) -> Vec<&str> {
    let starts: Vec<usize> = text.char_indices().map(|(pos, _)| pos).collect();
    let mut result = Vec::new();
    for (i, &start) in starts.iter().enumerate() {
        for len in 1..=max_len {
            let end = starts.get(i + len).copied().unwrap_or(text.len());
            result.push(&text[start..end]);
            if end == text.len() {
                break;
            }
        }
    }
    result.sort_unstable();
    result.dedup();
    result
}
