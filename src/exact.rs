//! Exact search over raw text: the classic linear-time and
//! sublinear-expected-time algorithms, plus the quadratic baseline.
//!
//! Every function shares one contract: `visitor` is called once per
//! position where `p` occurs in `x`, and the empty pattern occurs at
//! every position, including one past the end. Matches are reported in
//! ascending position order.

use std::collections::HashMap;

use crate::alphabet::map_str;
use crate::border_array::strict_border_array;

// The algorithms that drive their loops with the pattern cannot handle
// an empty one; every position matches.
fn report_empty_matches(n: usize, visitor: &mut impl FnMut(usize)) {
    for i in 0..=n {
        visitor(i);
    }
}

/// The naive O(nm) search: try every window.
pub fn naive(x: &str, p: &str, mut visitor: impl FnMut(usize)) {
    let (x, p) = (x.as_bytes(), p.as_bytes());
    if p.len() > x.len() {
        return;
    }

    for i in 0..=x.len() - p.len() {
        if &x[i..i + p.len()] == p {
            visitor(i);
        }
    }
}

/// Border search: sweep the text once, tracking the longest border of
/// the pattern prefix matched so far; a border as long as the pattern
/// is an occurrence. O(n + m).
pub fn border_search(x: &str, p: &str, mut visitor: impl FnMut(usize)) {
    let (x, p) = (x.as_bytes(), p.as_bytes());
    if p.is_empty() {
        report_empty_matches(x.len(), &mut visitor);
        return;
    }

    let ba = strict_border_array(p);
    let mut b = 0;

    for (i, &c) in x.iter().enumerate() {
        loop {
            if p[b] == c {
                b += 1;
                break;
            }
            if b == 0 {
                break;
            }
            b = ba[b - 1];
        }

        if b == p.len() {
            visitor(i + 1 - p.len());
            // Fall back to the longest border so overlapping
            // occurrences are found too.
            b = ba[b - 1];
        }
    }
}

/// Knuth-Morris-Pratt, phrased as alternating match-extension and
/// shift-by-border phases. O(n + m).
pub fn kmp(x: &str, p: &str, mut visitor: impl FnMut(usize)) {
    let (x, p) = (x.as_bytes(), p.as_bytes());
    if p.is_empty() {
        report_empty_matches(x.len(), &mut visitor);
        return;
    }

    let ba = strict_border_array(p);
    let (mut i, mut j) = (0, 0);

    while i < x.len() {
        // Match as far as possible...
        while i < x.len() && j < p.len() && x[i] == p[j] {
            i += 1;
            j += 1;
        }
        // ...report...
        if j == p.len() {
            visitor(i - p.len());
        }
        // ...then shift the pattern.
        if j == 0 {
            i += 1;
        } else {
            j = ba[j - 1];
        }
    }
}

/// Boyer-Moore-Horspool with a 256-entry jump table indexed directly by
/// byte value. O(nm) worst case, sublinear on average.
pub fn bmh(x: &str, p: &str, mut visitor: impl FnMut(usize)) {
    let (x, p) = (x.as_bytes(), p.as_bytes());
    if p.is_empty() {
        report_empty_matches(x.len(), &mut visitor);
        return;
    }
    if p.len() > x.len() {
        return;
    }

    let m = p.len();
    let mut jump = [m; 256];
    for j in 0..m - 1 {
        jump[p[j] as usize] = m - j - 1;
    }

    let mut i = 0;
    while i <= x.len() - m {
        let mut j = m - 1;
        loop {
            if x[i + j] != p[j] {
                break;
            }
            if j == 0 {
                visitor(i);
                break;
            }
            j -= 1;
        }
        i += jump[x[i + m - 1] as usize];
    }
}

/// Boyer-Moore-Horspool with the jump table in a hash map. Functionally
/// identical to [`bmh`]; exists to compare the cost of hashed lookups
/// against plain array indexing.
pub fn bmh_with_map(x: &str, p: &str, mut visitor: impl FnMut(usize)) {
    let (x, p) = (x.as_bytes(), p.as_bytes());
    if p.is_empty() {
        report_empty_matches(x.len(), &mut visitor);
        return;
    }
    if p.len() > x.len() {
        return;
    }

    let m = p.len();
    let mut jump = HashMap::new();
    for j in 0..m - 1 {
        jump.insert(p[j], m - j - 1);
    }

    let mut i = 0;
    while i <= x.len() - m {
        let mut j = m - 1;
        loop {
            if x[i + j] != p[j] {
                break;
            }
            if j == 0 {
                visitor(i);
                break;
            }
            j -= 1;
        }
        i += jump.get(&x[i + m - 1]).copied().unwrap_or(m);
    }
}

/// Boyer-Moore-Horspool over the alphabet-mapped text, with a jump
/// table sized to the text's alphabet. A pattern with bytes outside
/// that alphabet cannot occur and reports nothing.
pub fn bmh_with_alphabet(x: &str, p: &str, mut visitor: impl FnMut(usize)) {
    if p.is_empty() {
        report_empty_matches(x.len(), &mut visitor);
        return;
    }

    let (xs, alpha) = map_str(x);
    let ps = match alpha.map_to_bytes(p) {
        Ok(ps) => ps,
        Err(_) => return,
    };
    if ps.len() > xs.len() {
        return;
    }

    let m = ps.len();
    let mut jump = vec![m; alpha.len()];
    for j in 0..m - 1 {
        jump[ps[j] as usize] = m - j - 1;
    }

    let mut i = 0;
    while i <= xs.len() - m {
        let mut j = m - 1;
        loop {
            if xs[i + j] != ps[j] {
                break;
            }
            if j == 0 {
                visitor(i);
                break;
            }
            j -= 1;
        }
        i += jump[xs[i + m - 1] as usize];
    }
}
