//! SA-IS implementation based on
//!    Ge Nong, Sen Zhang, & Wai Hong Chan. (2010). Two Efficient Algorithms for Linear Time Suffix Array Construction.
//!    IEEE Transactions on Computers, 60(10), 1471–1484. <https://doi.org/10.1109/tc.2010.188>

use vers_vecs::BitVec;

use crate::alphabet::Alphabet;
use crate::error::Result;

const UNDEFINED: i32 = -1;

/// Builds the suffix array of `x` with the SA-IS algorithm, using the
/// alphabet of `x` itself.
pub fn sais(x: &str) -> Vec<i32> {
    sais_with_alphabet(x, &Alphabet::new(x)).expect("an alphabet built from the string maps it")
}

/// Builds the suffix array of `x` with the SA-IS algorithm. Fails if
/// `x` contains a byte outside `alpha`.
pub fn sais_with_alphabet(x: &str, alpha: &Alphabet) -> Result<Vec<i32>> {
    let xs = alpha.map_to_ints_with_sentinel(x)?;
    Ok(sais_from_ints(&xs, alpha.len()))
}

/// Builds the suffix array of a mapped integer sequence over the
/// alphabet `0..asize`. The sequence must end with a single sentinel
/// (zero), and the sentinel must not occur anywhere else.
pub fn sais_from_ints(xs: &[i32], asize: usize) -> Vec<i32> {
    debug_assert_eq!(
        xs.iter().rposition(|&a| a != 0),
        xs.len().checked_sub(2),
        "the sequence must end with a single sentinel",
    );

    let mut sa = vec![UNDEFINED; xs.len()];
    let mut types = BitVec::from_zeros(xs.len());
    rec_sais(xs, &mut sa, asize, &mut types);
    sa
}

// 1 => S-type, 0 => L-type. The bit array is shared across recursion
// levels; each level classifies the prefix covering its own text.
fn classify(types: &mut BitVec, x: &[i32]) {
    let n = x.len();
    // The last position is the sentinel and S by definition.
    types.set(n - 1, 1).unwrap();
    for i in (0..n - 1).rev() {
        let s = x[i] < x[i + 1] || (x[i] == x[i + 1] && types.is_bit_set(i + 1).unwrap());
        types.set(i, u64::from(s)).unwrap();
    }
}

fn is_lms(types: &BitVec, i: usize) -> bool {
    i > 0 && types.is_bit_set(i).unwrap() && !types.is_bit_set(i - 1).unwrap()
}

// Two LMS substrings are equal if they match letter for letter and
// type for type until both reach their terminating LMS position.
fn equal_lms(x: &[i32], types: &BitVec, i: usize, j: usize) -> bool {
    if i == j {
        return true;
    }

    let mut k = 0;
    loop {
        let i_lms = is_lms(types, i + k);
        let j_lms = is_lms(types, j + k);
        if k > 0 && i_lms && j_lms {
            return true;
        }
        if i_lms != j_lms || x[i + k] != x[j + k] {
            return false;
        }
        k += 1;
    }
}

fn count_buckets(x: &[i32], asize: usize) -> Vec<i32> {
    let mut buckets = vec![0; asize];
    for &a in x {
        buckets[a as usize] += 1;
    }
    buckets
}

fn buckets_front(fronts: &mut [i32], buckets: &[i32]) {
    let mut sum = 0;
    for (f, &b) in fronts.iter_mut().zip(buckets) {
        *f = sum;
        sum += b;
    }
}

fn buckets_end(ends: &mut [i32], buckets: &[i32]) {
    let mut sum = 0;
    for (e, &b) in ends.iter_mut().zip(buckets) {
        sum += b;
        *e = sum;
    }
}

fn insert_bucket_front(sa: &mut [i32], fronts: &mut [i32], bucket: usize, val: i32) {
    sa[fronts[bucket] as usize] = val;
    fronts[bucket] += 1;
}

fn insert_bucket_end(sa: &mut [i32], ends: &mut [i32], bucket: usize, val: i32) {
    ends[bucket] -= 1;
    sa[ends[bucket] as usize] = val;
}

// Induce the L-sort left to right, then the S-sort right to left. The
// `work` buffer holds the moving bucket fronts and ends.
fn induce(x: &[i32], sa: &mut [i32], types: &BitVec, buckets: &[i32], work: &mut [i32]) {
    let n = x.len();

    buckets_front(work, buckets);
    for i in 0..n {
        let j = sa[i];
        if j <= 0 {
            continue;
        }
        let j = (j - 1) as usize;
        if !types.is_bit_set(j).unwrap() {
            insert_bucket_front(sa, work, x[j] as usize, j as i32);
        }
    }

    buckets_end(work, buckets);
    for i in (0..n).rev() {
        let j = sa[i];
        if j <= 0 {
            continue;
        }
        let j = (j - 1) as usize;
        if types.is_bit_set(j).unwrap() {
            insert_bucket_end(sa, work, x[j] as usize, j as i32);
        }
    }
}

// Move the now-sorted LMS indices to the front of `sa` and return how
// many there are.
fn compact_lms(sa: &mut [i32], types: &BitVec) -> usize {
    let mut k = 0;
    for i in 0..sa.len() {
        let j = sa[i];
        if j > 0 && is_lms(types, j as usize) {
            sa[k] = j;
            k += 1;
        }
    }
    k
}

// Name the sorted LMS substrings in sa[..lms_count] and build the
// reduced string in sa[lms_count..2 * lms_count]. The names are written
// into the back half of `sa` at index j / 2 first (no two LMS positions
// are adjacent, so the slots are distinct) and then compacted into text
// order. Returns the reduced alphabet size.
fn reduce_lms(x: &[i32], sa: &mut [i32], types: &BitVec, lms_count: usize) -> usize {
    let n = sa.len();
    for v in &mut sa[lms_count..] {
        *v = UNDEFINED;
    }

    let mut letter: i32 = 0;
    let mut prev = sa[0] as usize;
    sa[lms_count + prev / 2] = 0;
    for i in 1..lms_count {
        let j = sa[i] as usize;
        if !equal_lms(x, types, prev, j) {
            letter += 1;
        }
        sa[lms_count + j / 2] = letter;
        prev = j;
    }

    let mut w = lms_count;
    for r in lms_count..n {
        if sa[r] != UNDEFINED {
            let name = sa[r];
            sa[w] = name;
            w += 1;
        }
    }
    debug_assert_eq!(w, 2 * lms_count);

    (letter + 1) as usize
}

fn rec_sais(x: &[i32], sa: &mut [i32], asize: usize, types: &mut BitVec) {
    let n = x.len();
    if n == 1 {
        sa[0] = 0;
        return;
    }

    classify(types, x);
    let buckets = count_buckets(x, asize);
    let mut work = vec![0i32; asize];

    // First pass: seed the LMS suffixes at their bucket ends in reverse
    // text order, then induce.
    for v in sa.iter_mut() {
        *v = UNDEFINED;
    }
    buckets_end(&mut work, &buckets);
    for i in (0..n).rev() {
        if is_lms(types, i) {
            insert_bucket_end(sa, &mut work, x[i] as usize, i as i32);
        }
    }
    induce(x, sa, types, &buckets, &mut work);

    // Reduce: the LMS substrings, named in sorted order, form a string
    // at most half as long as the input.
    let lms_count = compact_lms(sa, types);
    let red_size = reduce_lms(x, sa, types, lms_count);

    if red_size != lms_count {
        // Names are not unique, so sort the reduced string recursively.
        let (front, back) = sa.split_at_mut(lms_count);
        let reduced = &back[..lms_count];
        rec_sais(reduced, front, red_size, types);
    } else {
        // Names are unique; the suffix array of the reduced string is
        // its inverse permutation.
        let (front, back) = sa.split_at_mut(lms_count);
        for (i, &name) in back[..lms_count].iter().enumerate() {
            front[name as usize] = i as i32;
        }
    }
    classify(types, x);

    // Translate reduced indices back to LMS positions in the text. The
    // offsets overwrite the reduced string, which is no longer needed.
    let mut k = 0;
    for i in 1..n {
        if is_lms(types, i) {
            sa[lms_count + k] = i as i32;
            k += 1;
        }
    }
    for i in 0..lms_count {
        sa[i] = sa[lms_count + sa[i] as usize];
    }
    for v in &mut sa[lms_count..] {
        *v = UNDEFINED;
    }

    // Second pass: re-seed the LMS suffixes, now in their final
    // relative order, and induce the rest.
    buckets_end(&mut work, &buckets);
    for i in (0..lms_count).rev() {
        let j = sa[i];
        sa[i] = UNDEFINED;
        insert_bucket_end(sa, &mut work, x[j as usize] as usize, j);
    }
    induce(x, sa, types, &buckets, &mut work);
}
