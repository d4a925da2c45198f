//! In-memory string tries.
//!
//! This crate provides three tree structures for storing and querying strings:
//!
//! - [`StandardTrie`]: one character per edge. Insert, exact lookup, prefix
//!   test, delete and enumeration.
//! - [`CompressedTrie`]: the same operations on a radix trie, where chains of
//!   single-child nodes are collapsed into multi-character edge labels.
//! - [`SuffixTrie`]: built once over a fixed text; finds every occurrence of
//!   a pattern as a substring.
//!
//! The two word tries implement [`WordTrie`], so code that only needs the set
//! operations can be written once for both.
//!
//! # Quick Start
//!
//! ```rust
//! use lexicon_trie::{CompressedTrie, SuffixTrie, WordTrie};
//!
//! let mut words = CompressedTrie::new();
//! words.extend(["test", "team", "toast"]);
//! assert!(words.contains("team"));
//! assert!(words.starts_with("te"));
//!
//! let text = SuffixTrie::new("banana");
//! assert_eq!(text.search("ana"), &[1, 3]);
//! ```
//!
//! None of the structures synchronize internally. Mutation takes `&mut self`;
//! callers sharing a trie across threads wrap it in their own lock.

pub mod collation;
pub mod compressed;
pub mod config;
pub mod standard;
pub mod suffix;
mod util;


pub use collation::CollationKind;
pub use compressed::{CompressedNode, CompressedTrie};
pub use config::{SuffixTrieConfig, TrieConfig};
pub use lexicon_common::{Result, error::Error, error::ErrorKind};
pub use standard::{StandardTrie, TrieNode};
pub use suffix::{SuffixNode, SuffixTrie};

/// Set operations shared by the word tries.
pub trait WordTrie {
    /// Stores `word`. Inserting a stored word again has no effect.
    fn insert(&mut self, word: &str);

    /// Whether `word` is stored.
    fn contains(&self, word: &str) -> bool;

    /// Whether some stored word starts with `prefix`.
    fn starts_with(&self, prefix: &str) -> bool;

    /// Removes `word`, returning whether it was stored.
    fn remove(&mut self, word: &str) -> bool;

    /// All stored words, in unspecified order.
    fn words(&self) -> Vec<String>;

    /// All stored words starting with `prefix`, in unspecified order.
    fn words_with_prefix(&self, prefix: &str) -> Vec<String>;

    /// Number of stored words.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks the structural invariants of the trie.
    fn verify(&self) -> Result<()>;
}
