//! The FM-index: suffix array, C-table and O-table bundled for
//! backward search, plus the reverse-text O-table needed to prune
//! approximate search.

use serde::{Deserialize, Serialize};

use crate::alphabet::{Alphabet, SENTINEL};
use crate::approx::{ops_to_cigar, Edit};
use crate::bwt::{bwt, CTable, OTable};
use crate::suffix_array::sais_from_ints;

/// A self-contained set of FM-index tables over one text.
///
/// Built once, immutable afterwards; any number of threads may search a
/// shared index concurrently. All tables are flat arrays, so the serde
/// implementations derive directly from the fields.
#[derive(Clone, Serialize, Deserialize)]
pub struct FmIndex {
    alpha: Alphabet,
    sa: Vec<i32>,
    ctab: CTable,
    otab: OTable,
    rotab: Option<OTable>,
}

impl FmIndex {
    /// Builds the tables for exact searching: alphabet, suffix array,
    /// C-table and O-table.
    pub fn new(x: &str) -> FmIndex {
        FmIndex::build(x, false)
    }

    /// Builds the exact tables plus the O-table of the reversed text,
    /// which [`FmIndex::approx_search`] needs for its D-table.
    pub fn with_approx(x: &str) -> FmIndex {
        FmIndex::build(x, true)
    }

    fn build(x: &str, approx: bool) -> FmIndex {
        let alpha = Alphabet::new(x);
        let xs = alpha
            .map_to_bytes_with_sentinel(x)
            .expect("an alphabet built from the string maps it");
        let xi: Vec<i32> = xs.iter().map(|&a| i32::from(a)).collect();

        let sa = sais_from_ints(&xi, alpha.len());
        let ctab = CTable::new(&xs, alpha.len());
        let otab = OTable::new(&bwt(&xs, &sa), alpha.len());

        let rotab = if approx {
            let mut rev = xs[..xs.len() - 1].to_vec();
            rev.reverse();
            rev.push(SENTINEL);
            let ri: Vec<i32> = rev.iter().map(|&a| i32::from(a)).collect();
            let rsa = sais_from_ints(&ri, alpha.len());
            Some(OTable::new(&bwt(&rev, &rsa), alpha.len()))
        } else {
            None
        };

        FmIndex {
            alpha,
            sa,
            ctab,
            otab,
            rotab,
        }
    }

    /// The alphabet of the indexed text.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alpha
    }

    /// The length of the indexed text, terminal sentinel included.
    pub fn text_len(&self) -> usize {
        self.sa.len()
    }

    /// Reports every position where `p` occurs in the indexed text, in
    /// suffix array order.
    ///
    /// A pattern with bytes outside the alphabet occurs nowhere. The
    /// empty pattern narrows nothing and therefore reports every
    /// position, including one past the end.
    pub fn exact_search(&self, p: &str, mut visitor: impl FnMut(usize)) {
        let p = match self.alpha.map_to_bytes(p) {
            Ok(p) => p,
            Err(_) => return,
        };
        let (left, right) = self.interval(&p);
        for k in left..right {
            visitor(self.sa[k] as usize);
        }
    }

    // Backward search: narrow the suffix array interval of suffixes
    // prefixed by p[i..] one pattern letter at a time, right to left.
    fn interval(&self, p: &[u8]) -> (usize, usize) {
        let (mut left, mut right) = (0, self.sa.len());

        for &a in p.iter().rev() {
            if a == SENTINEL {
                // Only the terminal sentinel matches a NUL byte.
                return (0, 0);
            }
            left = self.ctab.less(a) + self.otab.rank(a, left);
            right = self.ctab.less(a) + self.otab.rank(a, right);
            if left >= right {
                return (0, 0);
            }
        }

        (left, right)
    }

    /// Reports every position where `p` occurs in the indexed text with
    /// at most `edits` edit operations, together with the CIGAR of the
    /// alignment. The same position may be reported once per distinct
    /// alignment.
    ///
    /// The index must have been built with [`FmIndex::with_approx`].
    /// Empty and unmappable patterns report nothing.
    pub fn approx_search(&self, p: &str, edits: i32, mut visitor: impl FnMut(usize, &str)) {
        let rotab = self
            .rotab
            .as_ref()
            .expect("approximate search needs the reverse tables; build with with_approx");

        let p = match self.alpha.map_to_bytes(p) {
            Ok(p) => p,
            Err(_) => return,
        };
        if p.is_empty() || p.contains(&SENTINEL) {
            return;
        }

        // The D-table is a lower bound on the edits needed to match
        // p[..=i] anywhere: scanning the prefix forward through the
        // reverse index, every time the interval dies at least one more
        // edit is unavoidable.
        let mut dtab = vec![0; p.len()];
        let mut min_edits = 0;
        let (mut left, mut right) = (0, self.sa.len());
        for (i, &a) in p.iter().enumerate() {
            left = self.ctab.less(a) + rotab.rank(a, left);
            right = self.ctab.less(a) + rotab.rank(a, right);
            if left >= right {
                min_edits += 1;
                left = 0;
                right = self.sa.len();
            }
            dtab[i] = min_edits;
        }

        let mut search = ApproxSearch {
            index: self,
            p: &p,
            dtab,
            ops: Vec::with_capacity(p.len() + edits.unsigned_abs() as usize),
            visitor: &mut visitor,
        };
        search.run(p.len() as i32 - 1, 0, self.sa.len(), edits);
    }
}

// The state threaded through the recursive enumeration of alignments.
struct ApproxSearch<'a, V: FnMut(usize, &str)> {
    index: &'a FmIndex,
    p: &'a [u8],
    dtab: Vec<i32>,
    ops: Vec<Edit>,
    visitor: &'a mut V,
}

impl<V: FnMut(usize, &str)> ApproxSearch<'_, V> {
    // Walk the pattern right to left. `i` is the pattern position still
    // to be matched, `(left, right)` the interval of suffixes matching
    // everything to its right, `budget` the edits still allowed.
    fn run(&mut self, i: i32, left: usize, right: usize, budget: i32) {
        if i < 0 {
            self.emit(left, right);
            return;
        }
        if budget < self.dtab[i as usize] {
            return;
        }

        for a in 1..self.index.alpha.len() as u8 {
            let next_left = self.index.ctab.less(a) + self.index.otab.rank(a, left);
            let next_right = self.index.ctab.less(a) + self.index.otab.rank(a, right);
            if next_left >= next_right {
                continue;
            }

            // Match or mismatch on this letter.
            let cost = i32::from(a != self.p[i as usize]);
            if budget >= cost {
                self.ops.push(Edit::M);
                self.run(i - 1, next_left, next_right, budget - cost);
                self.ops.pop();
            }

            // Deletion: the text consumes this letter, the pattern does
            // not move. Never the outermost operation of an alignment.
            if budget > 0 && !self.ops.is_empty() {
                self.ops.push(Edit::D);
                self.run(i, next_left, next_right, budget - 1);
                self.ops.pop();
            }
        }

        // Insertion: skip the pattern letter, the text does not move.
        if budget > 0 {
            self.ops.push(Edit::I);
            self.run(i - 1, left, right, budget - 1);
            self.ops.pop();
        }
    }

    // The operations were recorded right to left; reverse them into
    // alignment order before encoding.
    fn emit(&mut self, left: usize, right: usize) {
        let mut ops = self.ops.clone();
        ops.reverse();
        let cigar = ops_to_cigar(&ops);
        for k in left..right {
            (self.visitor)(self.index.sa[k] as usize, &cigar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx::count_edits;
    use crate::testutil;

    fn exact(index: &FmIndex, p: &str) -> Vec<usize> {
        let mut hits = Vec::new();
        index.exact_search(p, |i| hits.push(i));
        hits.sort_unstable();
        hits
    }

    fn approx(index: &FmIndex, p: &str, edits: i32) -> Vec<(usize, String)> {
        let mut hits = Vec::new();
        index.approx_search(p, edits, |i, cigar| hits.push((i, cigar.to_string())));
        hits.sort();
        hits
    }

    #[test]
    fn test_exact_search_mississippi() {
        let index = FmIndex::new("mississippi");
        assert_eq!(exact(&index, "ssi"), vec![2, 5]);
        assert_eq!(exact(&index, "ppi"), vec![8]);
        assert_eq!(exact(&index, "i"), vec![1, 4, 7, 10]);
        assert_eq!(exact(&index, "mississippi"), vec![0]);
        assert_eq!(exact(&index, "psi"), Vec::<usize>::new());
        assert_eq!(exact(&index, "xyz"), Vec::<usize>::new());
    }

    #[test]
    fn test_exact_search_empty_pattern_reports_every_position() {
        let index = FmIndex::new("aaa");
        assert_eq!(exact(&index, ""), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_exact_search_matches_naive() {
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(11);
        for x in testutil::corpus() {
            let index = FmIndex::new(&x);
            for _ in 0..10 {
                let p = testutil::random_substring(&mut rng, &x);
                assert_eq!(
                    exact(&index, &p),
                    testutil::naive_occurrences(&x, &p),
                    "x = {:?}, p = {:?}",
                    x,
                    p
                );
            }
        }
    }

    #[test]
    fn test_approx_budget_zero_is_exact() {
        let index = FmIndex::with_approx("mississippi");
        for p in ["ssi", "iss", "mississippi", "i", "q"] {
            let hits = approx(&index, p, 0);
            let positions: Vec<usize> = hits.iter().map(|(i, _)| *i).collect();
            assert_eq!(positions, exact(&index, p), "p = {:?}", p);
            let all_m = format!("{}M", p.len());
            for (_, cigar) in &hits {
                assert_eq!(cigar, &all_m);
            }
        }
    }

    #[test]
    fn test_approx_search_is_with_one_edit() {
        let index = FmIndex::with_approx("mississippi");
        let hits = approx(&index, "is", 1);

        let positions: Vec<usize> = hits.iter().map(|(i, _)| *i).collect();
        assert!(positions.contains(&1));
        assert!(positions.contains(&4));

        for (pos, cigar) in &hits {
            let edits = count_edits("mississippi", "is", *pos, cigar).unwrap();
            assert!(edits <= 1, "pos = {}, cigar = {}", pos, cigar);
        }
    }

    #[test]
    fn test_approx_contains_exact() {
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(13);
        for x in ["mississippi", "acgtacgtacgt", "aabbaabb"] {
            let index = FmIndex::with_approx(x);
            for _ in 0..5 {
                let p = testutil::random_substring(&mut rng, x);
                if p.is_empty() {
                    continue;
                }
                for edits in 0..3 {
                    let positions: Vec<usize> =
                        approx(&index, &p, edits).iter().map(|(i, _)| *i).collect();
                    for hit in exact(&index, &p) {
                        assert!(
                            positions.contains(&hit),
                            "x = {:?}, p = {:?}, edits = {}",
                            x,
                            p,
                            edits
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_approx_alignments_respect_budget() {
        let x = "gacgtacgtacgtgca";
        let index = FmIndex::with_approx(x);
        for p in ["acgt", "cgtacg", "gac"] {
            for edits in 0..3 {
                index.approx_search(p, edits, |pos, cigar| {
                    let counted = count_edits(x, p, pos, cigar).unwrap();
                    assert!(
                        counted as i32 <= edits,
                        "p = {:?}, pos = {}, cigar = {}",
                        p,
                        pos,
                        cigar
                    );
                });
            }
        }
    }

    #[test]
    fn test_approx_empty_pattern_reports_nothing() {
        let index = FmIndex::with_approx("mississippi");
        index.approx_search("", 2, |_, _| panic!("the empty pattern must not match"));
    }

    #[test]
    #[should_panic]
    fn test_approx_without_reverse_tables_panics() {
        let index = FmIndex::new("mississippi");
        index.approx_search("ssi", 1, |_, _| {});
    }
}
