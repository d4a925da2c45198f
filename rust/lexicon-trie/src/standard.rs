//! Uncompressed character trie.
//!
//! Every edge of a [`StandardTrie`] carries exactly one character, so a word
//! of `n` characters occupies a path of `n` nodes below the root. Shared
//! prefixes share nodes. Deleting a word prunes every node that no longer
//! leads to a stored word.

use ahash::AHashMap;
use lexicon_common::{Result, error::Error, verify_data};
use log::trace;

use crate::{
    WordTrie, collation::CollationKind, config::TrieConfig, util::decode_input,
};

/// A node of the [`StandardTrie`].
///
/// The character leading to a node is the key under which its parent stores
/// it, so nodes carry no label of their own.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    children: AHashMap<char, TrieNode>,
    end_of_word: bool,
}

impl TrieNode {
    /// Whether a stored word ends exactly at this node.
    pub fn is_end_of_word(&self) -> bool {
        self.end_of_word
    }

    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    /// Child nodes keyed by their edge character, in unspecified order.
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(&ch, node)| (ch, node))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    fn find(&self, key: &str) -> Option<&TrieNode> {
        key.chars().try_fold(self, |node, ch| node.children.get(&ch))
    }

    fn node_count(&self) -> usize {
        1 + self.children.values().map(TrieNode::node_count).sum::<usize>()
    }

    fn collect_words(&self, prefix: &mut String, words: &mut Vec<String>) {
        if self.end_of_word {
            words.push(prefix.clone());
        }
        for (&ch, child) in &self.children {
            prefix.push(ch);
            child.collect_words(prefix, words);
            prefix.pop();
        }
    }

    /// Clears the word marker at the end of `rest`.
    ///
    /// Returns `None` when the word is not stored, otherwise whether this node
    /// became useless (no word and no children) and should be dropped by its
    /// parent.
    fn remove_word(&mut self, rest: &str) -> Option<bool> {
        let mut chars = rest.chars();
        match chars.next() {
            None => {
                if !self.end_of_word {
                    return None;
                }
                self.end_of_word = false;
            }
            Some(ch) => {
                let child = self.children.get_mut(&ch)?;
                if child.remove_word(chars.as_str())? {
                    trace!("pruning trie node for '{ch}'");
                    self.children.remove(&ch);
                }
            }
        }
        Some(!self.end_of_word && self.children.is_empty())
    }

    fn verify(&self, path: &mut String, is_root: bool) -> Result<usize> {
        if !is_root {
            verify_data!(
                format!("node '{path}'"),
                self.end_of_word || !self.children.is_empty()
            );
        }
        let mut words = usize::from(self.end_of_word);
        for (&ch, child) in &self.children {
            path.push(ch);
            words += child.verify(path, false)?;
            path.pop();
        }
        Ok(words)
    }
}

/// Character-by-character trie over a set of words.
///
/// ```
/// use lexicon_trie::StandardTrie;
///
/// let mut trie = StandardTrie::new();
/// trie.insert("car");
/// trie.insert("cart");
///
/// assert!(trie.contains("car"));
/// assert!(!trie.contains("ca"));
/// assert!(trie.starts_with("ca"));
/// assert!(trie.remove("car"));
/// assert_eq!(trie.words(), vec!["cart".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StandardTrie {
    root: TrieNode,
    collation: CollationKind,
    len: usize,
}

impl StandardTrie {
    pub fn new() -> StandardTrie {
        StandardTrie::default()
    }

    /// Creates an empty trie using the given configuration.
    ///
    /// # Errors
    /// Returns [`Error::invalid_arg`] if `compact_on_remove` is set, since a
    /// standard trie has no edge labels to merge.
    pub fn with_config(config: TrieConfig) -> Result<StandardTrie> {
        if config.compact_on_remove {
            return Err(Error::invalid_arg(
                "compact_on_remove",
                "not supported by the standard trie",
            ));
        }
        Ok(StandardTrie {
            collation: config.collation,
            ..Default::default()
        })
    }

    pub fn collation(&self) -> CollationKind {
        self.collation
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Removes all words.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.len = 0;
    }

    /// Stores `word`. The empty word marks the root.
    pub fn insert(&mut self, word: &str) {
        let word = self.collation.fold(word);
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.end_of_word {
            node.end_of_word = true;
            self.len += 1;
        }
    }

    /// Stores a word given as raw bytes, rejecting input that is not UTF-8.
    pub fn insert_bytes(&mut self, word: &[u8]) -> Result<()> {
        let word = decode_input("word", word)?;
        self.insert(word);
        Ok(())
    }

    /// Exact-match lookup.
    pub fn contains(&self, word: &str) -> bool {
        self.root
            .find(&self.collation.fold(word))
            .is_some_and(TrieNode::is_end_of_word)
    }

    /// Exact-match lookup of a word given as raw bytes.
    pub fn contains_bytes(&self, word: &[u8]) -> Result<bool> {
        decode_input("word", word).map(|word| self.contains(word))
    }

    /// Whether any stored word starts with `prefix`.
    ///
    /// Every node below the root leads to a stored word, so finding the
    /// prefix path is enough once the trie holds at least one word.
    pub fn starts_with(&self, prefix: &str) -> bool {
        !self.is_empty() && self.root.find(&self.collation.fold(prefix)).is_some()
    }

    /// Removes `word`, returning whether it was stored.
    pub fn remove(&mut self, word: &str) -> bool {
        let word = self.collation.fold(word);
        let removed = self.root.remove_word(&word).is_some();
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// All stored words, in unspecified order.
    pub fn words(&self) -> Vec<String> {
        self.words_with_prefix("")
    }

    /// All stored words starting with `prefix`, in unspecified order.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix = self.collation.fold(prefix);
        let mut words = Vec::new();
        if let Some(node) = self.root.find(&prefix) {
            let mut buf = prefix.into_owned();
            node.collect_words(&mut buf, &mut words);
        }
        words
    }

    /// Checks the structural invariants: every non-root node leads to a word,
    /// and the word count matches the number of word markers.
    pub fn verify(&self) -> Result<()> {
        let words = self.root.verify(&mut String::new(), true)?;
        verify_data!("word count", words == self.len);
        Ok(())
    }
}

impl WordTrie for StandardTrie {
    fn insert(&mut self, word: &str) {
        StandardTrie::insert(self, word)
    }

    fn contains(&self, word: &str) -> bool {
        StandardTrie::contains(self, word)
    }

    fn starts_with(&self, prefix: &str) -> bool {
        StandardTrie::starts_with(self, prefix)
    }

    fn remove(&mut self, word: &str) -> bool {
        StandardTrie::remove(self, word)
    }

    fn words(&self) -> Vec<String> {
        StandardTrie::words(self)
    }

    fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        StandardTrie::words_with_prefix(self, prefix)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn verify(&self) -> Result<()> {
        StandardTrie::verify(self)
    }
}

impl<S: AsRef<str>> Extend<S> for StandardTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for StandardTrie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = StandardTrie::new();
        trie.extend(iter);
        trie
    }
}
