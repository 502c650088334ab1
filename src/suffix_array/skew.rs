//! The skew (DC3) suffix array construction algorithm:
//!    Juha Kärkkäinen, Peter Sanders, & Stefan Burkhardt. (2006). Linear Work Suffix Array Construction.
//!    Journal of the ACM, 53(6), 918–936. <https://doi.org/10.1145/1217856.1217858>

use std::collections::HashMap;

use crate::alphabet::Alphabet;
use crate::error::Result;

/// Builds the suffix array of `x` with the skew algorithm, using the
/// alphabet of `x` itself.
pub fn skew(x: &str) -> Vec<i32> {
    skew_with_alphabet(x, &Alphabet::new(x)).expect("an alphabet built from the string maps it")
}

/// Builds the suffix array of `x` with the skew algorithm. Fails if `x`
/// contains a byte outside `alpha`.
pub fn skew_with_alphabet(x: &str, alpha: &Alphabet) -> Result<Vec<i32>> {
    let xs = alpha.map_to_ints_with_sentinel(x)?;
    Ok(skew_from_ints(&xs, alpha.len()))
}

/// Builds the suffix array of a mapped integer sequence over the
/// alphabet `0..asize`. The sequence must end with a single sentinel
/// (zero), and the sentinel must not occur anywhere else.
pub fn skew_from_ints(xs: &[i32], asize: usize) -> Vec<i32> {
    debug_assert_eq!(
        xs.iter().rposition(|&a| a != 0),
        xs.len().checked_sub(2),
        "the sequence must end with a single sentinel",
    );

    rec_skew(xs, asize).into_iter().map(|i| i as i32).collect()
}

// Positions past the end read as sentinels. The recursion pads its
// reduced strings this way instead of materializing terminators.
fn at(x: &[i32], i: usize) -> i32 {
    if i >= x.len() {
        0
    } else {
        x[i]
    }
}

// One stable counting-sort pass over `idx`, keyed by the letter at
// `offset` positions in.
fn bucket_sort(x: &[i32], asize: usize, idx: &[usize], offset: usize) -> Vec<usize> {
    let mut counts = vec![0usize; asize];
    for &i in idx {
        counts[at(x, i + offset) as usize] += 1;
    }

    let mut buckets = vec![0usize; asize];
    let mut sum = 0;
    for (b, &c) in buckets.iter_mut().zip(&counts) {
        *b = sum;
        sum += c;
    }

    let mut out = vec![0usize; idx.len()];
    for &i in idx {
        let b = at(x, i + offset) as usize;
        out[buckets[b]] = i;
        buckets[b] += 1;
    }
    out
}

// Radix sort of the triples starting at the given positions.
fn radix3(x: &[i32], asize: usize, idx: Vec<usize>) -> Vec<usize> {
    let idx = bucket_sort(x, asize, &idx, 2);
    let idx = bucket_sort(x, asize, &idx, 1);
    bucket_sort(x, asize, &idx, 0)
}

fn get_sa12(x: &[i32]) -> Vec<usize> {
    (0..x.len()).filter(|i| i % 3 != 0).collect()
}

// The mod-0 positions, pre-ordered by the rank of the suffix one to the
// right (which is a mod-1 suffix, so its rank is known from sa12).
fn get_sa3(x: &[i32], sa12: &[usize]) -> Vec<usize> {
    let mut sa3 = Vec::with_capacity((x.len() + 2) / 3);
    if x.len() % 3 == 1 {
        sa3.push(x.len() - 1);
    }
    for &i in sa12 {
        if i % 3 == 1 {
            sa3.push(i - 1);
        }
    }
    sa3
}

type Triplet = [i32; 3];

fn triplet(x: &[i32], i: usize) -> Triplet {
    [at(x, i), at(x, i + 1), at(x, i + 2)]
}

// Name the distinct triples in sorted order. Names start at two: zero
// is the padding sentinel and one the central separator of the reduced
// string.
fn collect_alphabet(x: &[i32], idx: &[usize]) -> HashMap<Triplet, i32> {
    let mut alpha = HashMap::new();
    for &i in idx {
        let t = triplet(x, i);
        let next = (alpha.len() + 2) as i32;
        alpha.entry(t).or_insert(next);
    }
    alpha
}

// The reduced string: names of the mod-1 positions, the separator, then
// names of the mod-2 positions.
fn build_u(x: &[i32], alpha: &HashMap<Triplet, i32>) -> Vec<i32> {
    let mut u = Vec::with_capacity(x.len() - x.len() / 3);
    for i in (1..x.len()).step_by(3) {
        u.push(alpha[&triplet(x, i)]);
    }
    u.push(1);
    for i in (2..x.len()).step_by(3) {
        u.push(alpha[&triplet(x, i)]);
    }
    u
}

// Map an index of the reduced string back to an index of x. The first
// half (before the separator at m) covers the mod-1 positions, the
// second half the mod-2 positions.
fn u_idx(i: usize, m: usize) -> usize {
    if i < m {
        1 + 3 * i
    } else {
        2 + 3 * (i - m - 1)
    }
}

fn less(x: &[i32], i: usize, j: usize, isa: &[usize]) -> bool {
    let (a, b) = (at(x, i), at(x, j));
    if a < b {
        return true;
    }
    if a > b {
        return false;
    }
    if i % 3 != 0 && j % 3 != 0 {
        return isa[i] < isa[j];
    }
    less(x, i + 1, j + 1, isa)
}

fn merge(x: &[i32], sa12: Vec<usize>, sa3: Vec<usize>) -> Vec<usize> {
    let mut isa = vec![0usize; x.len()];
    for (rank, &i) in sa12.iter().enumerate() {
        isa[i] = rank;
    }

    let mut sa = Vec::with_capacity(sa12.len() + sa3.len());
    let (mut i, mut j) = (0, 0);
    while i < sa12.len() && j < sa3.len() {
        if less(x, sa12[i], sa3[j], &isa) {
            sa.push(sa12[i]);
            i += 1;
        } else {
            sa.push(sa3[j]);
            j += 1;
        }
    }
    sa.extend_from_slice(&sa12[i..]);
    sa.extend_from_slice(&sa3[j..]);
    sa
}

fn rec_skew(x: &[i32], asize: usize) -> Vec<usize> {
    if x.is_empty() {
        return vec![];
    }

    let mut sa12 = radix3(x, asize, get_sa12(x));
    let alpha = collect_alphabet(x, &sa12);
    if alpha.len() < sa12.len() {
        // Duplicate triples: sort the reduced string recursively and
        // pull the order of the mod-1/mod-2 suffixes out of its suffix
        // array, skipping the separator.
        let u = build_u(x, &alpha);
        let usa = rec_skew(&u, alpha.len() + 2);
        let m = usa.len() / 2;
        let mut k = 0;
        for &i in &usa {
            if i != m {
                sa12[k] = u_idx(i, m);
                k += 1;
            }
        }
    }

    let sa3 = bucket_sort(x, asize, &get_sa3(x, &sa12), 0);
    merge(x, sa12, sa3)
}
