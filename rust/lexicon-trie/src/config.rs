//! Construction parameters for the tries.

use lexicon_common::{Result, verify_arg};

use crate::collation::CollationKind;

/// Configuration for the word tries (`StandardTrie` and `CompressedTrie`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrieConfig {
    /// Character folding applied to inserted words and to queries.
    pub collation: CollationKind,
    /// When set, `CompressedTrie::remove` merges a node left with a single
    /// child and no word back into that child, so the compaction invariant
    /// holds after deletes too. Only valid for the compressed trie.
    pub compact_on_remove: bool,
}

impl TrieConfig {
    pub fn with_collation(mut self, collation: CollationKind) -> Self {
        self.collation = collation;
        self
    }

    pub fn with_compact_on_remove(mut self, compact_on_remove: bool) -> Self {
        self.compact_on_remove = compact_on_remove;
        self
    }
}

/// Configuration for `SuffixTrie` construction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SuffixTrieConfig {
    /// Character folding applied to the text and to search patterns.
    pub collation: CollationKind,
    /// Upper bound on the indexed text length in bytes. Construction is
    /// quadratic in the text length, so callers indexing untrusted input
    /// should set this. `None` means unbounded.
    pub max_text_len: Option<usize>,
}

impl SuffixTrieConfig {
    pub fn with_collation(mut self, collation: CollationKind) -> Self {
        self.collation = collation;
        self
    }

    pub fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = Some(max_text_len);
        self
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(max_text_len) = self.max_text_len {
            verify_arg!(max_text_len, max_text_len > 0);
        }
        Ok(())
    }
}
