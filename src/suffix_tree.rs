//! Suffix trees over alphabet-mapped strings.
//!
//! A tree owns its text (mapped, sentinel-terminated) and an arena of
//! nodes whose edge labels are ranges into that text. Leaves carry the
//! index of the suffix they spell; inner nodes carry a dense, σ-wide
//! child table and a suffix link. Reading the leaves left to right in
//! child-slot order enumerates the suffix array, which is how
//! [`SuffixTree::sa_and_lcp`] extracts both classic arrays.

use crate::alphabet::Alphabet;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct NodeId(usize);

// A half-open interval into the mapped text, labelling the edge into a
// node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Range {
    start: usize,
    end: usize,
}

impl Range {
    fn len(&self) -> usize {
        self.end - self.start
    }

    // Drop the first k letters of the interval.
    fn chump(&self, k: usize) -> Range {
        Range {
            start: self.start + k,
            end: self.end,
        }
    }

    fn prefix(&self, k: usize) -> Range {
        Range {
            start: self.start,
            end: self.start + k,
        }
    }
}

struct Node {
    range: Range,
    parent: Option<NodeId>,
    kind: NodeKind,
}

enum NodeKind {
    Leaf {
        suffix: usize,
    },
    Inner {
        suffix_link: Option<NodeId>,
        children: Vec<Option<NodeId>>,
    },
}

/// A suffix tree, built either naively or with McCreight's linear-time
/// algorithm. Immutable once built; queries never modify it.
pub struct SuffixTree {
    alpha: Alphabet,
    text: Vec<u8>,
    nodes: Vec<Node>,
    root: NodeId,
}

impl SuffixTree {
    /// Builds the suffix tree of `x` by inserting one suffix at a time,
    /// scanning from the root for each. Quadratic time; the baseline
    /// the linear construction is checked against.
    pub fn naive(x: &str) -> SuffixTree {
        let mut st = SuffixTree::prepare(x);
        let n = st.text.len();

        for i in 0..n {
            let (v, depth, rest) = st.sscan(st.root, Range { start: i, end: n }, None);
            if depth == 0 {
                // A mismatch while leaving a node, which must be inner.
                let leaf = st.new_leaf(i, rest);
                st.add_child(v, leaf);
            } else {
                st.break_edge(v, depth, i, rest.chump(depth));
            }
        }

        st
    }

    /// Builds the suffix tree of `x` with McCreight's algorithm.
    ///
    /// Each suffix is inserted starting from the suffix link of the
    /// previous leaf's parent. When that link is not known yet, the
    /// search starts from the grandparent's link instead, crossing the
    /// gap with a fast scan that does edge-length arithmetic only; the
    /// inner node it discovers is recorded as the missing link. The
    /// scanning work telescopes over all iterations, which makes the
    /// construction linear.
    pub fn mccreight(x: &str) -> SuffixTree {
        let mut st = SuffixTree::prepare(x);
        let n = st.text.len();

        st.set_suffix_link(st.root, st.root);
        let mut curr_leaf = st.new_leaf(0, Range { start: 0, end: n });
        st.add_child(st.root, curr_leaf);

        for i in 1..n {
            let p = st.parent(curr_leaf);

            // The suffix to insert is y·z, where y is the part already
            // known to be in the tree (the path to p, shifted by one
            // suffix) and z the remainder.
            let ynode;
            let z;
            if let Some(link) = st.suffix_link(p) {
                ynode = link;
                z = st.suffix_range(curr_leaf);
            } else {
                let pp = st.parent(p);
                let y = st.suffix_range(p);
                let pp_link = st
                    .suffix_link(pp)
                    .expect("all earlier inner nodes carry suffix links");

                let (w, depth, _) = st.fscan(pp_link, y);
                if depth < st.range_of(w).len() {
                    // The fast scan ended inside an edge. Breaking it
                    // creates the node that is both the insertion point
                    // for the new leaf and p's suffix link target.
                    curr_leaf = st.break_edge(w, depth, i, st.range_of(curr_leaf));
                    let link = st.parent(curr_leaf);
                    st.set_suffix_link(p, link);
                    continue;
                }

                st.set_suffix_link(p, w);
                ynode = w;
                z = st.range_of(curr_leaf);
            }

            let (v, depth, rest) = st.sscan(ynode, z, None);
            if depth == 0 {
                let leaf = st.new_leaf(i, rest);
                st.add_child(v, leaf);
                curr_leaf = leaf;
            } else {
                curr_leaf = st.break_edge(v, depth, i, rest.chump(depth));
            }
        }

        st
    }

    /// The alphabet the tree's text was mapped through.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alpha
    }

    /// The length of the indexed text, terminal sentinel included.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Reports the start position of every occurrence of `p`, in
    /// lexicographic order of the suffixes below the match point.
    ///
    /// A pattern with bytes outside the tree's alphabet occurs nowhere
    /// and reports nothing. The empty pattern matches at every
    /// position, including one past the end.
    pub fn search(&self, p: &str, mut visitor: impl FnMut(usize)) {
        let p = match self.alpha.map_to_bytes(p) {
            Ok(p) => p,
            Err(_) => return,
        };

        let (v, depth, rest) = self.sscan(self.root, Range { start: 0, end: p.len() }, Some(&p));
        if depth == rest.len() {
            self.leaf_indices(v, &mut visitor);
        }
    }

    /// Extracts the suffix array and the LCP array by a left-to-right
    /// depth-first traversal.
    ///
    /// Each leaf contributes its suffix index to the suffix array. Its
    /// LCP entry is the string depth of the deepest branch point
    /// between it and the previous leaf: the depth of its parent for a
    /// later sibling, or an inherited branch depth for the leftmost
    /// leaf of a subtree.
    pub fn sa_and_lcp(&self) -> (Vec<i32>, Vec<i32>) {
        let mut sa = Vec::with_capacity(self.text.len());
        let mut lcp = Vec::with_capacity(self.text.len());
        self.sa_lcp_visit(self.root, 0, 0, &mut sa, &mut lcp);
        (sa, lcp)
    }

    fn sa_lcp_visit(
        &self,
        v: NodeId,
        branch: usize,
        depth: usize,
        sa: &mut Vec<i32>,
        lcp: &mut Vec<i32>,
    ) {
        match &self.node(v).kind {
            NodeKind::Leaf { suffix } => {
                sa.push(*suffix as i32);
                lcp.push(branch as i32);
            }
            NodeKind::Inner { children, .. } => {
                let mut first = true;
                for &c in children.iter().flatten() {
                    let below = depth + self.range_of(c).len();
                    self.sa_lcp_visit(c, if first { branch } else { depth }, below, sa, lcp);
                    first = false;
                }
            }
        }
    }

    // -- Arena plumbing ------------------------------------------------

    fn prepare(x: &str) -> SuffixTree {
        let alpha = Alphabet::new(x);
        let text = alpha
            .map_to_bytes_with_sentinel(x)
            .expect("an alphabet built from the string maps it");

        let mut st = SuffixTree {
            alpha,
            text,
            nodes: Vec::new(),
            root: NodeId(0),
        };
        st.root = st.new_inner(Range { start: 0, end: 0 });
        st
    }

    fn node(&self, v: NodeId) -> &Node {
        &self.nodes[v.0]
    }

    fn range_of(&self, v: NodeId) -> Range {
        self.node(v).range
    }

    fn parent(&self, v: NodeId) -> NodeId {
        self.node(v).parent.expect("the root has no parent")
    }

    fn child(&self, v: NodeId, code: u8) -> Option<NodeId> {
        match &self.node(v).kind {
            NodeKind::Inner { children, .. } => children[code as usize],
            NodeKind::Leaf { .. } => panic!("leaves have no children"),
        }
    }

    fn suffix_link(&self, v: NodeId) -> Option<NodeId> {
        match &self.node(v).kind {
            NodeKind::Inner { suffix_link, .. } => *suffix_link,
            NodeKind::Leaf { .. } => panic!("leaves carry no suffix links"),
        }
    }

    fn set_suffix_link(&mut self, v: NodeId, target: NodeId) {
        match &mut self.nodes[v.0].kind {
            NodeKind::Inner { suffix_link, .. } => *suffix_link = Some(target),
            NodeKind::Leaf { .. } => panic!("leaves carry no suffix links"),
        }
    }

    fn new_leaf(&mut self, suffix: usize, range: Range) -> NodeId {
        self.nodes.push(Node {
            range,
            parent: None,
            kind: NodeKind::Leaf { suffix },
        });
        NodeId(self.nodes.len() - 1)
    }

    fn new_inner(&mut self, range: Range) -> NodeId {
        let children = vec![None; self.alpha.len()];
        self.nodes.push(Node {
            range,
            parent: None,
            kind: NodeKind::Inner {
                suffix_link: None,
                children,
            },
        });
        NodeId(self.nodes.len() - 1)
    }

    // Hang `child` below `v`, in the slot of its edge's first letter.
    fn add_child(&mut self, v: NodeId, child: NodeId) {
        let code = self.text[self.range_of(child).start];
        match &mut self.nodes[v.0].kind {
            NodeKind::Inner { children, .. } => children[code as usize] = Some(child),
            NodeKind::Leaf { .. } => panic!("leaves have no children"),
        }
        self.nodes[child.0].parent = Some(v);
    }

    // Split the edge into `v` at `depth`, making a new inner node with
    // the old node and a fresh leaf labelled `rest` as its children.
    fn break_edge(&mut self, v: NodeId, depth: usize, suffix: usize, rest: Range) -> NodeId {
        debug_assert!(rest.len() > 0, "a broken edge always leaves a remainder");

        let inner = self.new_inner(self.range_of(v).prefix(depth));
        let parent = self.parent(v);
        self.add_child(parent, inner);

        let leaf = self.new_leaf(suffix, rest);
        self.nodes[v.0].range.start += depth;
        self.add_child(inner, leaf);
        self.add_child(inner, v);

        leaf
    }

    // The label to search for when the previous leaf hangs off the
    // root: its own edge minus the letter the suffix link accounts for.
    fn suffix_range(&self, v: NodeId) -> Range {
        let p = self.parent(v);
        if self.node(p).parent.is_none() {
            self.range_of(v).chump(1)
        } else {
            self.range_of(v)
        }
    }

    // Slow scan: follow `scan` from `v` comparing letter by letter,
    // against the tree's own text or against `pattern` if given.
    // Returns the last node reached, the depth into its edge, and the
    // range that still had to be matched there.
    fn sscan(&self, v: NodeId, scan: Range, pattern: Option<&[u8]>) -> (NodeId, usize, Range) {
        let y = pattern.unwrap_or(&self.text);
        let mut v = v;
        let mut scan = scan;

        loop {
            if scan.len() == 0 {
                return (v, 0, scan);
            }
            let child = match self.child(v, y[scan.start]) {
                Some(c) => c,
                None => return (v, 0, scan),
            };
            let shared = self.shared_prefix(self.range_of(child), scan, y);
            if shared == scan.len() || shared < self.range_of(child).len() {
                return (child, shared, scan);
            }
            v = child;
            scan = scan.chump(shared);
        }
    }

    // Fast scan: follow `scan` from `v` using edge lengths only. The
    // scanned string is known to be present, so no letters need
    // comparing beyond the branching ones.
    fn fscan(&self, v: NodeId, scan: Range) -> (NodeId, usize, Range) {
        let mut v = v;
        let mut scan = scan;

        loop {
            if scan.len() == 0 {
                return (v, 0, scan);
            }
            let child = self
                .child(v, self.text[scan.start])
                .expect("a fast scan always has an out-edge to follow");
            let step = self.range_of(child).len().min(scan.len());
            if step == scan.len() {
                return (child, step, scan);
            }
            v = child;
            scan = scan.chump(step);
        }
    }

    fn shared_prefix(&self, edge: Range, scan: Range, y: &[u8]) -> usize {
        let n = edge.len().min(scan.len());
        let mut i = 0;
        while i < n && self.text[edge.start + i] == y[scan.start + i] {
            i += 1;
        }
        i
    }

    // Visit the suffix indices below `v` in child-slot order.
    fn leaf_indices(&self, v: NodeId, visitor: &mut impl FnMut(usize)) {
        match &self.node(v).kind {
            NodeKind::Leaf { suffix } => visitor(*suffix),
            NodeKind::Inner { children, .. } => {
                for &c in children.iter().flatten() {
                    self.leaf_indices(c, visitor);
                }
            }
        }
    }

    #[cfg(test)]
    fn path_label(&self, v: NodeId) -> String {
        let mut ranges = vec![self.range_of(v)];
        let mut v = v;
        while let Some(p) = self.node(v).parent {
            ranges.push(self.range_of(p));
            v = p;
        }

        let mut label = Vec::new();
        for r in ranges.into_iter().rev() {
            label.extend_from_slice(&self.text[r.start..r.end]);
        }
        self.alpha.revmap_bytes(&label)
    }
}
