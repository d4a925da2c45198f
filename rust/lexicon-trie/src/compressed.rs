//! Path-compressed (radix) trie.
//!
//! A [`CompressedTrie`] stores the same word set as a
//! [`StandardTrie`](crate::StandardTrie), but chains of single-child nodes
//! are collapsed into one node whose `label` holds the whole chain. Children
//! are keyed by the first character of their label, which means no two
//! siblings share a non-empty label prefix.
//!
//! Insertion keeps the tree minimal: when a new word diverges in the middle
//! of an edge, the edge is split into the shared part and the two tails.
//!
//! Deletion prunes nodes that no longer lead to a word. By default a node
//! left with a single child and no word of its own is *not* merged back with
//! that child, so the tree may hold a few more nodes than necessary after
//! deletes. Set [`TrieConfig::compact_on_remove`] to merge such nodes as
//! well and keep the compaction invariant after every operation.

use std::mem;

use ahash::AHashMap;
use lexicon_common::{Result, verify_data};
use log::trace;

use crate::{
    WordTrie,
    collation::CollationKind,
    config::TrieConfig,
    util::{common_prefix_len, decode_input, first_char},
};

/// A node of the [`CompressedTrie`].
#[derive(Debug, Clone, Default)]
pub struct CompressedNode {
    children: AHashMap<char, CompressedNode>,
    label: String,
    end_of_word: bool,
}

impl CompressedNode {
    fn leaf(label: &str) -> CompressedNode {
        CompressedNode {
            children: AHashMap::new(),
            label: label.to_string(),
            end_of_word: true,
        }
    }

    /// The characters consumed along the edge from the parent to this node.
    /// Empty only for the root.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_end_of_word(&self) -> bool {
        self.end_of_word
    }

    /// The child whose label starts with `ch`.
    pub fn child(&self, ch: char) -> Option<&CompressedNode> {
        self.children.get(&ch)
    }

    pub fn children(&self) -> impl Iterator<Item = &CompressedNode> {
        self.children.values()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    fn node_count(&self) -> usize {
        1 + self
            .children
            .values()
            .map(CompressedNode::node_count)
            .sum::<usize>()
    }

    /// Splits this node's label at byte offset `at`.
    ///
    /// The node keeps `label[..at]`; a new child takes `label[at..]` together
    /// with the node's children and word marker.
    fn split_at(&mut self, at: usize) {
        debug_assert!(at > 0 && at < self.label.len());
        let tail = CompressedNode {
            label: self.label.split_off(at),
            children: mem::take(&mut self.children),
            end_of_word: mem::replace(&mut self.end_of_word, false),
        };
        trace!("split edge '{}' + '{}'", self.label, tail.label);
        if let Some(key) = first_char(&tail.label) {
            self.children.insert(key, tail);
        }
    }

    /// Merges the only child into this node if this node holds no word.
    fn absorb_only_child(&mut self) {
        if self.end_of_word || self.children.len() != 1 {
            return;
        }
        if let Some(child) = mem::take(&mut self.children).into_values().next() {
            trace!("merge edge '{}' + '{}'", self.label, child.label);
            self.label.push_str(&child.label);
            self.children = child.children;
            self.end_of_word = child.end_of_word;
        }
    }

    /// Inserts the unconsumed part `rest` of a word below this node.
    /// Returns `true` if the word was not stored before.
    fn insert_word(&mut self, rest: &str) -> bool {
        let Some(key) = first_char(rest) else {
            return !mem::replace(&mut self.end_of_word, true);
        };
        let Some(child) = self.children.get_mut(&key) else {
            self.children.insert(key, CompressedNode::leaf(rest));
            return true;
        };

        let common = common_prefix_len(rest, &child.label);
        if common == child.label.len() {
            return child.insert_word(&rest[common..]);
        }

        child.split_at(common);
        let tail = &rest[common..];
        match first_char(tail) {
            None => child.end_of_word = true,
            Some(tail_key) => {
                child.children.insert(tail_key, CompressedNode::leaf(tail));
            }
        }
        true
    }

    /// Follows `word` through whole labels. The node reached is returned only
    /// if the word ends exactly on a node boundary.
    fn find_word(&self, word: &str) -> Option<&CompressedNode> {
        let mut node = self;
        let mut rest = word;
        while let Some(key) = first_char(rest) {
            let child = node.children.get(&key)?;
            rest = rest.strip_prefix(child.label.as_str())?;
            node = child;
        }
        Some(node)
    }

    /// Follows `prefix`, allowing it to end inside a label.
    ///
    /// Returns the node whose subtree holds every word starting with `prefix`,
    /// and the byte offset in `prefix` at which that node's label begins.
    fn find_prefix(&self, prefix: &str) -> Option<(&CompressedNode, usize)> {
        let mut node = self;
        let mut entered_at = 0;
        let mut rest = prefix;
        while let Some(key) = first_char(rest) {
            let child = node.children.get(&key)?;
            let start = prefix.len() - rest.len();
            match rest.strip_prefix(child.label.as_str()) {
                Some(tail) => {
                    node = child;
                    entered_at = start;
                    rest = tail;
                }
                None if child.label.starts_with(rest) => return Some((child, start)),
                None => return None,
            }
        }
        Some((node, entered_at))
    }

    fn collect_words(&self, prefix: &mut String, words: &mut Vec<String>) {
        prefix.push_str(&self.label);
        if self.end_of_word {
            words.push(prefix.clone());
        }
        for child in self.children.values() {
            child.collect_words(prefix, words);
        }
        prefix.truncate(prefix.len() - self.label.len());
    }

    /// Clears the word marker at the end of `rest`.
    ///
    /// Returns `None` when the word is not stored, otherwise whether this node
    /// became useless and should be dropped by its parent.
    fn remove_word(&mut self, rest: &str, compact: bool) -> Option<bool> {
        match first_char(rest) {
            None => {
                if !self.end_of_word {
                    return None;
                }
                self.end_of_word = false;
            }
            Some(key) => {
                let child = self.children.get_mut(&key)?;
                let tail = rest.strip_prefix(child.label.as_str())?;
                if child.remove_word(tail, compact)? {
                    trace!("pruning edge starting with '{key}'");
                    self.children.remove(&key);
                } else if compact {
                    if let Some(child) = self.children.get_mut(&key) {
                        child.absorb_only_child();
                    }
                }
            }
        }
        Some(!self.end_of_word && self.children.is_empty())
    }

    /// Whether every node below this one has two or more children or holds a word.
    fn is_compact(&self) -> bool {
        self.children
            .values()
            .all(|child| (child.end_of_word || child.children.len() >= 2) && child.is_compact())
    }

    fn verify(&self, path: &mut String, is_root: bool) -> Result<usize> {
        let element = format!("node '{path}{}'", self.label);
        if is_root {
            verify_data!(element, self.label.is_empty());
        } else {
            verify_data!(element, !self.label.is_empty());
            verify_data!(element, self.end_of_word || !self.children.is_empty());
        }

        let mut words = usize::from(self.end_of_word);
        path.push_str(&self.label);
        for (&key, child) in &self.children {
            verify_data!(element, first_char(&child.label) == Some(key));
            words += child.verify(path, false)?;
        }
        path.truncate(path.len() - self.label.len());
        Ok(words)
    }
}

/// Radix trie over a set of words.
///
/// ```
/// use lexicon_trie::CompressedTrie;
///
/// let mut trie = CompressedTrie::new();
/// trie.insert("test");
/// trie.insert("team");
///
/// let te = trie.root().child('t').unwrap();
/// assert_eq!(te.label(), "te");
/// assert!(!trie.contains("te"));
/// assert!(trie.starts_with("te"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompressedTrie {
    root: CompressedNode,
    config: TrieConfig,
    len: usize,
}

impl CompressedTrie {
    pub fn new() -> CompressedTrie {
        CompressedTrie::default()
    }

    pub fn with_config(config: TrieConfig) -> CompressedTrie {
        CompressedTrie {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    pub fn collation(&self) -> CollationKind {
        self.config.collation
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

    pub fn root(&self) -> &CompressedNode {
        &self.root
    }

    /// Removes all words.
    pub fn clear(&mut self) {
        self.root = CompressedNode::default();
        self.len = 0;
    }

    /// Stores `word`, splitting an existing edge if the word diverges inside it.
    pub fn insert(&mut self, word: &str) {
        let word = self.config.collation.fold(word);
        if self.root.insert_word(&word) {
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
            .find_word(&self.config.collation.fold(word))
            .is_some_and(CompressedNode::is_end_of_word)
    }

    /// Exact-match lookup of a word given as raw bytes.
    pub fn contains_bytes(&self, word: &[u8]) -> Result<bool> {
        decode_input("word", word).map(|word| self.contains(word))
    }

    /// Whether any stored word starts with `prefix`. The prefix may end in
    /// the middle of an edge label.
    pub fn starts_with(&self, prefix: &str) -> bool {
        !self.is_empty()
            && self
                .root
                .find_prefix(&self.config.collation.fold(prefix))
                .is_some()
    }

    /// Removes `word`, returning whether it was stored.
    pub fn remove(&mut self, word: &str) -> bool {
        let word = self.config.collation.fold(word);
        let removed = self
            .root
            .remove_word(&word, self.config.compact_on_remove)
            .is_some();
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
        let prefix = self.config.collation.fold(prefix);
        let mut words = Vec::new();
        if let Some((node, entered_at)) = self.root.find_prefix(&prefix) {
            let mut buf = prefix[..entered_at].to_string();
            node.collect_words(&mut buf, &mut words);
        }
        words
    }

    /// Whether no node below the root could be merged with its only child.
    ///
    /// Always true after inserts alone. Removing a word may leave a node with a
    /// single child and no word (e.g. removing "go" from {"go", "gone"}) unless
    /// [`TrieConfig::compact_on_remove`] is set.
    pub fn is_compact(&self) -> bool {
        self.root.is_compact()
    }

    /// Checks the structural invariants: non-root labels are non-empty and
    /// start with their key, every non-root node leads to a word, the word
    /// count matches, and, with `compact_on_remove`, the tree is compact.
    pub fn verify(&self) -> Result<()> {
        let words = self.root.verify(&mut String::new(), true)?;
        verify_data!("word count", words == self.len);
        if self.config.compact_on_remove {
            verify_data!("compaction", self.is_compact());
        }
        Ok(())
    }
}

impl WordTrie for CompressedTrie {
    fn insert(&mut self, word: &str) {
        CompressedTrie::insert(self, word)
    }

    fn contains(&self, word: &str) -> bool {
        CompressedTrie::contains(self, word)
    }

    fn starts_with(&self, prefix: &str) -> bool {
        CompressedTrie::starts_with(self, prefix)
    }

    fn remove(&mut self, word: &str) -> bool {
        CompressedTrie::remove(self, word)
    }

    fn words(&self) -> Vec<String> {
        CompressedTrie::words(self)
    }

    fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        CompressedTrie::words_with_prefix(self, prefix)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn verify(&self) -> Result<()> {
        CompressedTrie::verify(self)
    }
}

impl<S: AsRef<str>> Extend<S> for CompressedTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for CompressedTrie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = CompressedTrie::new();
        trie.extend(iter);
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut words: Vec<String>) -> Vec<String> {
        words.sort();
        words
    }

    fn labels(node: &CompressedNode) -> Vec<String> {
        sorted(node.children().map(|c| c.label().to_string()).collect())
    }

    fn compacting() -> CompressedTrie {
        CompressedTrie::with_config(TrieConfig::default().with_compact_on_remove(true))
    }

    #[test]
    fn test_split_on_divergence() {
        let mut trie = CompressedTrie::new();
        trie.insert("test");
        assert_eq!(labels(trie.root()), vec!["test"]);

        trie.insert("team");
        let te = trie.root().child('t').unwrap();
        assert_eq!(te.label(), "te");
        assert!(!te.is_end_of_word());
        assert_eq!(labels(te), vec!["am", "st"]);
        assert!(te.child('s').unwrap().is_end_of_word());
        assert!(te.child('a').unwrap().is_end_of_word());

        assert!(!trie.contains("te"));
        assert!(trie.contains("test"));
        assert!(trie.contains("team"));
        assert!(trie.starts_with("te"));
        assert!(trie.starts_with("tea"));
        assert!(!trie.starts_with("tex"));
        assert_eq!(trie.node_count(), 4);
        trie.verify().unwrap();
    }

    #[test]
    fn test_split_where_word_ends() {
        let mut trie = CompressedTrie::new();
        trie.insert("gone");
        trie.insert("go");

        let go = trie.root().child('g').unwrap();
        assert_eq!(go.label(), "go");
        assert!(go.is_end_of_word());
        assert_eq!(labels(go), vec!["ne"]);
        assert!(trie.contains("go"));
        assert!(trie.contains("gone"));
        assert!(!trie.contains("gon"));
        trie.verify().unwrap();
    }

    #[test]
    fn test_extend_through_full_label() {
        let mut trie = CompressedTrie::new();
        trie.insert("go");
        trie.insert("gone");
        trie.insert("going");

        let go = trie.root().child('g').unwrap();
        assert_eq!(go.label(), "go");
        assert_eq!(labels(go), vec!["ing", "ne"]);
        assert_eq!(trie.len(), 3);
        assert!(trie.is_compact());
        trie.verify().unwrap();
    }

    #[test]
    fn test_negative_search() {
        let trie: CompressedTrie = ["car"].into_iter().collect();
        assert!(trie.contains("car"));
        assert!(!trie.contains("ca"));
        assert!(!trie.contains("cars"));
        assert!(!trie.contains(""));
        assert!(trie.starts_with("ca"));
        assert!(trie.starts_with("car"));
        assert!(!trie.starts_with("cars"));
        assert!(!trie.starts_with("cb"));
    }

    #[test]
    fn test_remove_keeps_single_child_by_default() {
        let mut trie = CompressedTrie::new();
        trie.insert("go");
        trie.insert("gone");

        assert!(trie.remove("go"));
        assert!(!trie.contains("go"));
        assert!(trie.contains("gone"));
        assert!(trie.starts_with("go"));

        let go = trie.root().child('g').unwrap();
        assert_eq!(go.label(), "go");
        assert!(!go.is_end_of_word());
        assert_eq!(labels(go), vec!["ne"]);

        // The leftover chain is the one deviation from full compaction.
        assert!(!trie.is_compact());
        trie.verify().unwrap();
        assert_eq!(trie.words(), vec!["gone".to_string()]);
    }

    #[test]
    fn test_remove_with_compaction_merges_chain() {
        let mut trie = compacting();
        trie.insert("go");
        trie.insert("gone");

        assert!(trie.remove("go"));
        let gone = trie.root().child('g').unwrap();
        assert_eq!(gone.label(), "gone");
        assert!(gone.is_end_of_word());
        assert_eq!(gone.child_count(), 0);
        assert!(trie.is_compact());
        trie.verify().unwrap();
    }

    #[test]
    fn test_remove_sibling_with_compaction() {
        let mut trie = compacting();
        trie.extend(["test", "team", "toast"]);

        assert!(trie.remove("team"));
        let t = trie.root().child('t').unwrap();
        assert_eq!(t.label(), "t");
        assert_eq!(labels(t), vec!["est", "oast"]);

        assert!(trie.remove("toast"));
        let test = trie.root().child('t').unwrap();
        assert_eq!(test.label(), "test");
        assert_eq!(trie.node_count(), 2);
        trie.verify().unwrap();
    }

    #[test]
    fn test_remove_sibling_without_compaction() {
        let mut trie = CompressedTrie::new();
        trie.extend(["test", "team"]);

        assert!(trie.remove("team"));
        let te = trie.root().child('t').unwrap();
        assert_eq!(te.label(), "te");
        assert_eq!(labels(te), vec!["st"]);
        assert!(!trie.is_compact());
        assert!(trie.contains("test"));
        trie.verify().unwrap();

        // Inserting below the uncompacted node still works.
        trie.insert("tex");
        assert!(trie.contains("tex"));
        assert!(trie.contains("test"));
        assert!(trie.is_compact());
        trie.verify().unwrap();
    }

    #[test]
    fn test_remove_prunes_to_root() {
        let mut trie = CompressedTrie::new();
        trie.insert("alpha");
        assert!(trie.remove("alpha"));
        assert_eq!(trie.node_count(), 1);
        assert!(trie.is_empty());
        assert!(!trie.starts_with("a"));
        trie.verify().unwrap();
    }

    #[test]
    fn test_remove_requires_matching_label() {
        let mut trie = CompressedTrie::new();
        trie.insert("go");

        // Same length as the stored label but a different word.
        assert!(!trie.remove("gx"));
        assert!(!trie.remove("g"));
        assert!(!trie.remove("goo"));
        assert!(trie.contains("go"));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_empty_word_marks_root() {
        let mut trie = CompressedTrie::new();
        trie.insert("");
        trie.insert("a");
        assert!(trie.contains(""));
        assert!(trie.root().is_end_of_word());
        assert_eq!(sorted(trie.words()), vec!["", "a"]);
        assert!(trie.remove(""));
        assert!(!trie.contains(""));
        assert!(trie.contains("a"));
        trie.verify().unwrap();
    }

    #[test]
    fn test_words_with_prefix_inside_label() {
        let trie: CompressedTrie = ["romane", "romanus", "romulus", "rubens", "ruber"]
            .into_iter()
            .collect();

        assert_eq!(
            sorted(trie.words_with_prefix("roma")),
            vec!["romane", "romanus"]
        );
        assert_eq!(
            sorted(trie.words_with_prefix("rub")),
            vec!["rubens", "ruber"]
        );
        assert_eq!(sorted(trie.words_with_prefix("romu")), vec!["romulus"]);
        assert_eq!(trie.words_with_prefix("r").len(), 5);
        assert!(trie.words_with_prefix("rx").is_empty());
        assert!(trie.words_with_prefix("romulusx").is_empty());
        trie.verify().unwrap();
    }

    #[test]
    fn test_multibyte_labels() {
        let mut trie = CompressedTrie::new();
        trie.insert("日本語");
        trie.insert("日本人");
        trie.insert("café");
        trie.insert("cafés");

        let nihon = trie.root().child('日').unwrap();
        assert_eq!(nihon.label(), "日本");
        assert!(trie.contains("日本人"));
        assert!(!trie.contains("日本"));
        assert!(trie.starts_with("日"));
        assert_eq!(sorted(trie.words_with_prefix("caf")), vec!["café", "cafés"]);
        trie.verify().unwrap();
    }

    #[test]
    fn test_case_insensitive() {
        let mut trie = CompressedTrie::with_config(
            TrieConfig::default().with_collation(CollationKind::UnicodeCaseInsensitive),
        );
        trie.insert("Team");
        trie.insert("TEST");
        assert!(trie.contains("team"));
        assert!(trie.contains("test"));
        assert!(trie.starts_with("Te"));
        assert_eq!(trie.root().child('T').unwrap().label(), "TE");
        assert!(trie.remove("tEaM"));
        assert_eq!(trie.words(), vec!["TEST".to_string()]);
    }

    #[test]
    fn test_byte_input() {
        let mut trie = CompressedTrie::new();
        trie.insert_bytes("naïve".as_bytes()).unwrap();
        assert!(trie.contains_bytes("naïve".as_bytes()).unwrap());
        assert!(trie.insert_bytes(&[0xe2, 0x82]).is_err());
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_merge_adopts_grandchildren() {
        let mut trie = compacting();
        trie.extend(["ab", "abcd", "abce"]);
        let ab = trie.root().child('a').unwrap();
        assert_eq!(labels(ab), vec!["c"]);

        assert!(trie.remove("ab"));
        let abc = trie.root().child('a').unwrap();
        assert_eq!(abc.label(), "abc");
        assert!(!abc.is_end_of_word());
        assert_eq!(labels(abc), vec!["d", "e"]);
        assert!(trie.contains("abcd"));
        assert!(trie.contains("abce"));
        assert!(trie.starts_with("abc"));
        assert_eq!(trie.node_count(), 4);
        trie.verify().unwrap();
    }

    #[test]
    fn test_compacting_random_operations() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let mut trie = compacting();
        let mut reference = std::collections::BTreeSet::new();
        for _ in 0..5000 {
            let len = rng.usize(0..6);
            let word: String = (0..len).map(|_| rng.choice(['p', 'q', 'r']).unwrap()).collect();
            if rng.bool() {
                assert_eq!(trie.remove(&word), reference.remove(&word), "remove '{word}'");
            } else {
                trie.insert(&word);
                reference.insert(word);
            }
            assert!(trie.is_compact());
            trie.verify().unwrap();
        }
        let expected: Vec<String> = reference.into_iter().collect();
        assert_eq!(sorted(trie.words()), expected);
    }
}
