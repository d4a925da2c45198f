//! Character folding applied to keys before they enter a trie.
//!
//! Every trie in this crate keys its edges by single `char`s. A collation
//! decides how a character of an inserted word, a query or an indexed text is
//! mapped to the `char` used as the edge key. The same collation must be used
//! for building and for querying, which is why it is part of the trie
//! configuration rather than a per-call argument.
//!
//! # Available Collations
//!
//! - **Exact** (`"exact"`): characters are used as-is.
//! - **Unicode Case Insensitive** (`"unicode-case-insensitive"`): every
//!   character is folded to its single-character uppercase form.
//!
//! Folding is always one character to one character, so a folded string has
//! the same number of characters as its source. Suffix offsets computed on
//! the folded characters therefore stay valid positions in the indexed text.

use std::borrow::Cow;

use lexicon_common::{Result, error::Error};

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CollationKind {
    /// Characters are compared exactly as given.
    #[default]
    Exact,
    /// Unicode collation that is case insensitive.
    UnicodeCaseInsensitive,
}

/// Convert a string name to a CollationKind enum variant.
impl TryFrom<&str> for CollationKind {
    type Error = lexicon_common::error::Error;

    fn try_from(name: &str) -> Result<Self> {
        match name {
            "exact" => Ok(CollationKind::Exact),
            "unicode-case-insensitive" => Ok(CollationKind::UnicodeCaseInsensitive),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized collation: {name}"),
            )),
        }
    }
}

impl CollationKind {
    /// Get the name of the collation kind as a static string.
    pub const fn name(&self) -> &'static str {
        match self {
            CollationKind::Exact => "exact",
            CollationKind::UnicodeCaseInsensitive => "unicode-case-insensitive",
        }
    }

    /// Maps a single character to the key used for trie edges.
    #[inline]
    pub fn fold_char(self, c: char) -> char {
        match self {
            CollationKind::Exact => c,
            CollationKind::UnicodeCaseInsensitive => to_upper(c),
        }
    }

    /// Folds a whole string, borrowing the input when folding leaves it unchanged.
    pub fn fold(self, text: &str) -> Cow<'_, str> {
        match self {
            CollationKind::Exact => Cow::Borrowed(text),
            CollationKind::UnicodeCaseInsensitive => {
                if text.chars().all(|c| to_upper(c) == c) {
                    Cow::Borrowed(text)
                } else {
                    Cow::Owned(text.chars().map(to_upper).collect())
                }
            }
        }
    }
}

/// Folds `c` to exactly one uppercase char.
///
/// Chars whose uppercase form expands to several chars (e.g. 'ŉ') are kept as they
/// are, and 'ß' maps to the capital 'ẞ'. A folded string therefore has the same
/// number of chars as its source, so the n-th folded char always comes from the
/// n-th source char and its byte offset can be taken from the source text.
fn to_upper(c: char) -> char {
    if c == 'ß' {
        'ẞ'
    } else if c.is_lowercase() {
        let mut uppercase_char = c.to_uppercase();
        match (uppercase_char.next(), uppercase_char.next()) {
            (Some(ch), None) => ch,
            _ => c,
        }
    } else {
        c
    }
}
