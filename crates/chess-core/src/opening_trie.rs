//! Frequency-counting opening trie.
//!
//! Every inserted game walks down from the root and bumps the count of each
//! node it passes through, so a prefix shared by many games collapses into a
//! single counter. Asking "how often was this line played" is then a walk of
//! the line's length instead of a scan over the corpus.

use std::collections::HashMap;

/// An opening line as a sequence of SAN labels.
pub type OpeningLine = Vec<String>;

/// A node in the opening trie.
///
/// `count` is the number of inserted lines whose path passes through this
/// node. The root stands for "no moves played" and is never counted.
#[derive(Debug, Default)]
pub struct TrieNode {
    count: u64,
    children: HashMap<String, TrieNode>,
}

impl TrieNode {
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn child(&self, mv: &str) -> Option<&TrieNode> {
        self.children.get(mv)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &TrieNode)> + '_ {
        self.children.iter().map(|(mv, child)| (mv.as_str(), child))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Child reached by `mv`, created with a zero count on first visit.
    fn child_or_insert(&mut self, mv: &str) -> &mut TrieNode {
        self.children.entry(mv.to_string()).or_default()
    }

    fn frequent_children(&self, min_frequency: u64) -> impl Iterator<Item = (&str, &TrieNode)> + '_ {
        self.children()
            .filter(move |(_, child)| child.count >= min_frequency)
    }
}

/// Prefix tree over the move sequences of a game corpus.
#[derive(Debug, Default)]
pub struct OpeningTrie {
    root: TrieNode,
    sequences: u64,
}

impl OpeningTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one game's moves, incrementing every node along its path.
    /// An empty line leaves the tree untouched.
    pub fn insert<S: AsRef<str>>(&mut self, moves: &[S]) {
        self.sequences += 1;

        let mut current = &mut self.root;
        for mv in moves {
            current = current.child_or_insert(mv.as_ref());
            current.count += 1;
        }
    }

    /// Number of lines inserted so far.
    pub fn sequences(&self) -> u64 {
        self.sequences
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Node at the end of `path`, or `None` if no inserted line starts with it.
    pub fn node<S: AsRef<str>>(&self, path: &[S]) -> Option<&TrieNode> {
        path.iter()
            .try_fold(&self.root, |node, mv| node.child(mv.as_ref()))
    }

    /// Count of the node at the end of `path`. The empty path names the root,
    /// which carries no count.
    pub fn count<S: AsRef<str>>(&self, path: &[S]) -> Option<u64> {
        if path.is_empty() {
            return None;
        }
        self.node(path).map(TrieNode::count)
    }

    /// Number of nodes below the root.
    pub fn node_count(&self) -> usize {
        let mut stack = vec![&self.root];
        let mut total = 0;
        while let Some(node) = stack.pop() {
            total += node.children.len();
            stack.extend(node.children.values());
        }
        total
    }

    /// Longest prefix of `moves` whose every node has `count >= min_frequency`.
    ///
    /// The walk stops at the first move that is missing from the tree or
    /// falls below the threshold.
    pub fn frequent_prefix<'a, S: AsRef<str>>(&self, moves: &'a [S], min_frequency: u64) -> &'a [S] {
        let mut node = &self.root;
        let mut depth = 0;

        for mv in moves {
            match node.child(mv.as_ref()) {
                Some(child) if child.count >= min_frequency => {
                    node = child;
                    depth += 1;
                }
                _ => break,
            }
        }

        &moves[..depth]
    }

    /// Collect every maximal frequent line.
    ///
    /// A line qualifies when each node on it has `count >= min_frequency` and
    /// its last node has no child that also reaches the threshold. The root is
    /// never reported on its own. Siblings are visited in map order, so the
    /// order of the result is unspecified but its contents are not.
    pub fn maximal_lines(&self, min_frequency: u64) -> Vec<OpeningLine> {
        let mut lines = Vec::new();
        let mut path: Vec<&str> = Vec::new();
        // (index of the move in `path`, move, node reached by it)
        let mut stack: Vec<(usize, &str, &TrieNode)> = Vec::new();

        push_frequent_children(&mut stack, &self.root, 0, min_frequency);

        while let Some((depth, mv, node)) = stack.pop() {
            path.truncate(depth);
            path.push(mv);

            let pending = stack.len();
            push_frequent_children(&mut stack, node, depth + 1, min_frequency);
            if stack.len() == pending {
                lines.push(path.iter().map(|mv| mv.to_string()).collect());
            }
        }

        lines
    }
}

impl Drop for OpeningTrie {
    // Unlinks nodes iteratively so very long unique lines cannot overflow the
    // stack through nested drops.
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> = self.root.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

/// Push the qualifying children of `node` so the first one in map order is
/// popped first.
fn push_frequent_children<'t>(
    stack: &mut Vec<(usize, &'t str, &'t TrieNode)>,
    node: &'t TrieNode,
    depth: usize,
    min_frequency: u64,
) {
    let start = stack.len();
    stack.extend(
        node.frequent_children(min_frequency)
            .map(|(mv, child)| (depth, mv, child)),
    );
    stack[start..].reverse();
}
