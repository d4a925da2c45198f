//! Suffix trie for substring occurrence queries over one fixed text.
//!
//! The trie holds every suffix of the text, one character per edge. Each node
//! records the start offsets of all suffixes whose path passes through it, so
//! the node reached by a pattern lists every position where the pattern
//! occurs in the text.
//!
//! Construction inserts each suffix in full, which is quadratic in the text
//! length in both time and memory. Use [`SuffixTrieConfig::max_text_len`] to
//! bound it for untrusted input.

use ahash::AHashMap;
use lexicon_common::{Result, error::Error, verify_data};
use log::debug;

use crate::{collation::CollationKind, config::SuffixTrieConfig, util::decode_input};

/// A node of the [`SuffixTrie`].
#[derive(Debug, Clone, Default)]
pub struct SuffixNode {
    children: AHashMap<char, SuffixNode>,
    indexes: Vec<usize>,
}

impl SuffixNode {
    /// Start offsets (ascending) of the suffixes passing through this node.
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    pub fn child(&self, ch: char) -> Option<&SuffixNode> {
        self.children.get(&ch)
    }

    pub fn children(&self) -> impl Iterator<Item = (char, &SuffixNode)> {
        self.children.iter().map(|(&ch, node)| (ch, node))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    fn verify(&self, path: &mut String) -> Result<()> {
        for (&ch, child) in &self.children {
            path.push(ch);
            let element = format!("node '{path}'");
            verify_data!(element, !child.indexes.is_empty());
            verify_data!(element, child.indexes.windows(2).all(|w| w[0] < w[1]));
            let occurrences: usize = child.children.values().map(|c| c.indexes.len()).sum();
            verify_data!(element, occurrences <= child.indexes.len());
            child.verify(path)?;
            path.pop();
        }
        Ok(())
    }
}

/// Index of all suffixes of a text.
///
/// Offsets are byte offsets into the indexed text and always fall on a
/// char boundary.
///
/// ```
/// use lexicon_trie::SuffixTrie;
///
/// let trie = SuffixTrie::new("banana");
/// assert_eq!(trie.search("ana"), &[1, 3]);
/// assert_eq!(trie.search("na"), &[2, 4]);
/// assert!(trie.search("xyz").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SuffixTrie {
    root: SuffixNode,
    text: String,
    collation: CollationKind,
    node_count: usize,
}

impl SuffixTrie {
    /// Builds the trie over `text` with the default configuration.
    pub fn new(text: &str) -> SuffixTrie {
        Self::build(text, CollationKind::default())
    }

    /// Builds the trie over `text` with the given configuration.
    ///
    /// # Errors
    /// Returns [`Error::invalid_arg`] if the configuration is invalid or the
    /// text exceeds `max_text_len`.
    pub fn with_config(text: &str, config: &SuffixTrieConfig) -> Result<SuffixTrie> {
        config.validate()?;
        if let Some(max_text_len) = config.max_text_len {
            if text.len() > max_text_len {
                return Err(Error::invalid_arg(
                    "text",
                    format!(
                        "text length {} exceeds the configured limit of {max_text_len} bytes",
                        text.len()
                    ),
                ));
            }
        }
        Ok(Self::build(text, config.collation))
    }

    /// Builds the trie over a text given as raw bytes, rejecting input that is
    /// not UTF-8.
    pub fn from_bytes(text: &[u8], config: &SuffixTrieConfig) -> Result<SuffixTrie> {
        let text = decode_input("text", text)?;
        Self::with_config(text, config)
    }

    fn build(text: &str, collation: CollationKind) -> SuffixTrie {
        let mut root = SuffixNode::default();
        let mut node_count = 1;
        for (start, _) in text.char_indices() {
            let mut node = &mut root;
            for ch in text[start..].chars() {
                node = node
                    .children
                    .entry(collation.fold_char(ch))
                    .or_insert_with(|| {
                        node_count += 1;
                        SuffixNode::default()
                    });
                node.indexes.push(start);
            }
        }
        debug!(
            "built suffix trie over {} bytes: {node_count} nodes",
            text.len()
        );
        SuffixTrie {
            root,
            text: text.to_string(),
            collation,
            node_count,
        }
    }

    /// The indexed text, as given at construction.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn collation(&self) -> CollationKind {
        self.collation
    }

    pub fn root(&self) -> &SuffixNode {
        &self.root
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of indexed suffixes, one per character of the text.
    pub fn suffix_count(&self) -> usize {
        self.root.children.values().map(|c| c.indexes.len()).sum()
    }

    /// Start offsets (ascending) of every occurrence of `pattern` in the text.
    ///
    /// Returns an empty slice when the pattern does not occur. The empty
    /// pattern resolves to the root, which holds no offsets.
    pub fn search(&self, pattern: &str) -> &[usize] {
        let collation = self.collation;
        pattern
            .chars()
            .try_fold(&self.root, |node, ch| {
                node.children.get(&collation.fold_char(ch))
            })
            .map(|node| node.indexes.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `pattern` occurs in the text.
    pub fn contains(&self, pattern: &str) -> bool {
        !self.search(pattern).is_empty()
    }

    /// Number of occurrences of `pattern`, overlapping ones included.
    pub fn count(&self, pattern: &str) -> usize {
        self.search(pattern).len()
    }

    /// Checks the structural invariants: the root holds no offsets, every
    /// other node holds a strictly ascending non-empty list, a node's children
    /// never account for more suffixes than the node itself, and every
    /// character of the text starts exactly one suffix.
    pub fn verify(&self) -> Result<()> {
        verify_data!("root", self.root.indexes.is_empty());
        verify_data!(
            "suffix count",
            self.suffix_count() == self.text.chars().count()
        );
        self.root.verify(&mut String::new())
    }
}
