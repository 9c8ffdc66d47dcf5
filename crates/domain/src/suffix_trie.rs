use rustc_hash::FxBuildHasher;
use std::collections::HashMap;

#[derive(Default)]
struct TrieNode {
    children: HashMap<Box<str>, TrieNode, FxBuildHasher>,
    terminal: bool,
}

/// Label-reversed trie over suffix rules.
///
/// A lookup only reports a hit when the name has at least one more label
/// below the rule's domain, which is the same boundary `ends_with(".rule")`
/// enforces.
#[derive(Default)]
pub(crate) struct SuffixTrie {
    root: TrieNode,
    len: usize,
}

impl SuffixTrie {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts the domain of a suffix rule (no leading dot).
    pub(crate) fn insert(&mut self, domain: &str) -> bool {
        let mut node = &mut self.root;
        for label in domain.split('.').rev() {
            node = node.children.entry(Box::from(label)).or_default();
        }
        let inserted = !node.terminal;
        node.terminal = true;
        if inserted {
            self.len += 1;
        }
        inserted
    }

    #[inline]
    pub(crate) fn lookup(&self, name: &str) -> bool {
        let mut labels = name.split('.').rev().peekable();
        let mut node = &self.root;

        while let Some(label) = labels.next() {
            match node.children.get(label) {
                Some(child) => {
                    if child.terminal && labels.peek().is_some() {
                        return true;
                    }
                    node = child;
                }
                None => return false,
            }
        }
        false
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}
