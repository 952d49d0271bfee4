//! Exact-membership word lexicon, used both as the commit-time validation
//! oracle and as the source word list for building the GADDAG ([`crate::util::gaddag`]).

use crate::game::tile::Letter;

/// Newtype containing an index for a node, so that the node
/// can be retrieved in `O(1)`.
#[derive(Clone, Copy, Debug)]
pub struct NodeIndex(usize);

/// A node in the tree, representing a letter in a word.
#[derive(Default, Debug)]
pub struct Node {
    is_terminal: bool,
    children: [Option<NodeIndex>; 26],
}
impl Node {
    /// Sets a child by key (letter)
    pub fn set_child(&mut self, letter: Letter, idx: NodeIndex) {
        self.children[usize::from(letter)] = Some(idx);
    }
    /// Gets an optional child by key (letter)
    pub fn get_child(&self, letter: Letter) -> Option<NodeIndex> {
        self.children[usize::from(letter)]
    }
    /// Checks whether the node is terminal, meaning that a word ends
    /// at this point.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }
    /// Sets the `is_terminal` property
    pub fn set_terminal(&mut self, is_terminal: bool) {
        self.is_terminal = is_terminal;
    }
    /// Creates a new node with no `children`, and `is_terminal` set to
    /// the provided value.
    pub fn new(is_terminal: bool) -> Self {
        Self {
            is_terminal,
            children: Default::default(),
        }
    }
}

/// A data structure designed to store words in a compact format, so that
/// words can be validated in `O(n)` where `n` is the length of the word.
/// The tree structure means that many words with a common prefix share
/// storage.
///
/// The data structure uses an arena storage method, so all nodes are stored
/// in a single dimensional vector, with each node containing the indices of
/// its children, pointing back to the `nodes` vector.
///
/// This is the exact-membership oracle used at move-commit time (§4.6); it
/// is distinct from the GADDAG ([`crate::util::gaddag`]), which exists only
/// to drive move *generation*.
#[derive(Debug)]
pub struct Lexicon {
    root: NodeIndex,
    nodes: Vec<Node>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            root: NodeIndex(0),
            nodes: vec![Node::new(false)],
        }
    }
}
impl Lexicon {
    /// Builds a lexicon from an iterator of words.
    pub fn from_words<'a>(words: impl Iterator<Item = &'a str>) -> Self {
        let mut lexicon = Self::default();
        for word in words {
            lexicon.insert(word);
        }
        lexicon
    }
    /// Gets the [`NodeIndex`] for the root node.
    pub fn root_idx(&self) -> NodeIndex {
        self.root
    }
    /// Borrows a [`Node`] from a [`NodeIndex`].
    pub fn node(&self, NodeIndex(idx): NodeIndex) -> &Node {
        &self.nodes[idx]
    }
    /// Mutably borrows a [`Node`] from a [`NodeIndex`].
    pub fn node_mut(&mut self, NodeIndex(idx): NodeIndex) -> &mut Node {
        &mut self.nodes[idx]
    }
    /// Traces a path of letters described by `iter`, starting from `root`.
    /// If the path exists, the final node is returned, otherwise [`None`].
    pub fn trace_word<I>(&self, root: NodeIndex, iter: I) -> Option<NodeIndex>
    where
        I: Iterator<Item = Letter>,
    {
        let mut curr_idx = root;

        for letter in iter {
            curr_idx = self.node(curr_idx).get_child(letter)?;
        }

        Some(curr_idx)
    }
    /// Inserts a `word` into the lexicon.
    pub fn insert(&mut self, word: &str) {
        let mut curr_idx = self.root_idx();

        for letter in word.chars().filter_map(Letter::new) {
            let idx = match self.node(curr_idx).get_child(letter) {
                Some(idx) => idx,
                None => {
                    self.nodes.push(Node::default());
                    NodeIndex(self.nodes.len() - 1)
                }
            };

            self.node_mut(curr_idx).set_child(letter, idx);
            curr_idx = idx;
        }

        self.node_mut(curr_idx).set_terminal(true);
    }
    /// Checks whether a full word is contained within the lexicon.
    pub fn contains(&self, word: &str) -> bool {
        self.contains_letters(word.chars().filter_map(Letter::new))
    }
    /// Checks whether a sequence of [`Letter`]s is a valid word.
    pub fn contains_letters<I>(&self, letters: I) -> bool
    where
        I: Iterator<Item = Letter>,
    {
        match self.trace_word(self.root_idx(), letters) {
            Some(idx) => self.node(idx).is_terminal(),
            None => false,
        }
    }
    /// Returns an iterator over every word stored in the lexicon, as a
    /// sequence of [`Letter`]s. Needed so the GADDAG builder can enumerate
    /// the whole word list without keeping a separate copy of it.
    pub fn iter(&self) -> impl Iterator<Item = Vec<Letter>> + '_ {
        let mut words = Vec::new();
        self.collect_words(self.root, Vec::new(), &mut words);
        words.into_iter()
    }
    fn collect_words(&self, idx: NodeIndex, prefix: Vec<Letter>, out: &mut Vec<Vec<Letter>>) {
        let node = self.node(idx);
        if node.is_terminal() {
            out.push(prefix.clone());
        }
        for letter in Letter::iter() {
            if let Some(child) = node.get_child(letter) {
                let mut next = prefix.clone();
                next.push(letter);
                self.collect_words(child, next, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contains() {
        let mut lexicon = Lexicon::default();

        lexicon.insert("abade");
        lexicon.insert("abide");
        lexicon.insert("a");
        lexicon.insert("collection");
        lexicon.insert("collect");

        assert!(!lexicon.contains("death"));
        assert!(!lexicon.contains("collecti"));
        assert!(lexicon.contains("collection"));
        assert!(lexicon.contains("abide"));
        assert!(lexicon.contains("abade"));
        assert!(!lexicon.contains("abadf"));
    }

    #[test]
    fn iter_round_trips() {
        let words = ["cat", "cats", "at", "car"];
        let lexicon = Lexicon::from_words(words.iter().copied());

        let mut collected: Vec<String> = lexicon
            .iter()
            .map(|letters| letters.into_iter().map(char::from).collect())
            .collect();
        collected.sort();

        let mut expected: Vec<String> = words.iter().map(|s| s.to_uppercase()).collect();
        expected.sort();

        assert_eq!(collected, expected);
    }
}
