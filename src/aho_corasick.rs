//! A trie over a set of patterns with Aho-Corasick suffix and output
//! links, for matching all patterns against a text in one pass.

use std::collections::VecDeque;

const ROOT: usize = 0;

struct TrieNode {
    children: [Option<u32>; 256],
    parent: Option<u32>,
    // The deepest proper suffix of this node's label that is also in
    // the trie; the root for all depth-one nodes. None only at the
    // root.
    suffix_link: Option<u32>,
    // The nearest node on the suffix link chain that ends a pattern.
    output: Option<u32>,
    // The index of the pattern ending here, if any.
    label: Option<usize>,
}

impl TrieNode {
    fn new(parent: Option<u32>) -> TrieNode {
        TrieNode {
            children: [None; 256],
            parent,
            suffix_link: None,
            output: None,
            label: None,
        }
    }
}

/// A trie of a pattern set, with the suffix and output links that turn
/// it into an Aho-Corasick automaton. Immutable once built.
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Trie {
    /// Builds the trie of `patterns` and its links. A pattern's index
    /// in the slice is the label reported for its matches; patterns
    /// should be distinct, since a node holds a single label.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Trie {
        let mut trie = Trie {
            nodes: vec![TrieNode::new(None)],
        };
        for (label, p) in patterns.iter().enumerate() {
            trie.insert(label, p.as_ref());
        }
        trie.build_links();
        trie
    }

    fn insert(&mut self, label: usize, p: &str) {
        let mut v = ROOT;
        for &b in p.as_bytes() {
            v = match self.nodes[v].children[b as usize] {
                Some(c) => c as usize,
                None => {
                    self.nodes.push(TrieNode::new(Some(v as u32)));
                    let c = (self.nodes.len() - 1) as u32;
                    self.nodes[v].children[b as usize] = Some(c);
                    c as usize
                }
            };
        }
        self.nodes[v].label = Some(label);
    }

    // Breadth-first over the trie, so every node's suffix link is
    // known before any deeper node needs it.
    fn build_links(&mut self) {
        let mut queue = VecDeque::new();
        queue.push_back(ROOT);

        while let Some(v) = queue.pop_front() {
            for b in 0..256 {
                let Some(c) = self.nodes[v].children[b] else {
                    continue;
                };
                let c = c as usize;

                let link = if v == ROOT {
                    ROOT
                } else {
                    // Follow the suffix chain until a node extends by b.
                    let mut s = self.nodes[v].suffix_link.expect("set by the BFS") as usize;
                    loop {
                        if let Some(w) = self.nodes[s].children[b] {
                            break w as usize;
                        }
                        if s == ROOT {
                            break ROOT;
                        }
                        s = self.nodes[s].suffix_link.expect("set by the BFS") as usize;
                    }
                };

                self.nodes[c].suffix_link = Some(link as u32);
                self.nodes[c].output = if self.nodes[link].label.is_some() {
                    Some(link as u32)
                } else {
                    self.nodes[link].output
                };

                queue.push_back(c);
            }
        }
    }

    // The length of the label a node spells, recovered by walking the
    // parent chain.
    fn depth(&self, v: usize) -> usize {
        let mut depth = 0;
        let mut v = v;
        while let Some(p) = self.nodes[v].parent {
            depth += 1;
            v = p as usize;
        }
        depth
    }

    /// Checks whether `p` is one of the patterns the trie was built
    /// from.
    pub fn contains(&self, p: &str) -> bool {
        let mut v = ROOT;
        for &b in p.as_bytes() {
            match self.nodes[v].children[b as usize] {
                Some(c) => v = c as usize,
                None => return false,
            }
        }
        self.nodes[v].label.is_some()
    }

    /// Runs the automaton over `x`, reporting `(position, pattern)` for
    /// every occurrence of every pattern: the byte position where the
    /// occurrence starts and the pattern's index in the build slice.
    pub fn search(&self, x: &str, mut visitor: impl FnMut(usize, usize)) {
        let mut v = ROOT;

        for (i, &b) in x.as_bytes().iter().enumerate() {
            // On mismatch, retreat along suffix links before giving up
            // on this text letter.
            loop {
                if let Some(c) = self.nodes[v].children[b as usize] {
                    v = c as usize;
                    break;
                }
                if v == ROOT {
                    break;
                }
                v = self.nodes[v].suffix_link.expect("set for non-root nodes") as usize;
            }

            // The current node and its whole output chain end at i.
            let mut hit = if self.nodes[v].label.is_some() {
                Some(v as u32)
            } else {
                self.nodes[v].output
            };
            while let Some(w) = hit {
                let node = &self.nodes[w as usize];
                let label = node.label.expect("output chains link pattern nodes");
                visitor(i + 1 - self.depth(w as usize), label);
                hit = node.output;
            }
        }
    }
}
