//! String generators and reference implementations shared by the unit
//! tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::alphabet::map_str_with_sentinel;

/// A random string of length `len` over the letters of `alphabet`.
pub fn random_string(rng: &mut StdRng, alphabet: &str, len: usize) -> String {
    let letters: Vec<char> = alphabet.chars().collect();
    (0..len)
        .map(|_| letters[rng.gen_range(0..letters.len())])
        .collect()
}

/// The Fibonacci string: `fib(0) = "a"`, `fib(1) = "b"`,
/// `fib(n + 1) = fib(n - 1) + fib(n)`.
pub fn fibonacci_string(n: usize) -> String {
    let (mut prev, mut cur) = ("a".to_string(), "b".to_string());
    for _ in 0..n {
        let next = format!("{}{}", prev, cur);
        prev = cur;
        cur = next;
    }
    prev
}

/// A mixed corpus of the string families the invariants are checked
/// against: random strings over small alphabets, singleton runs and
/// Fibonacci strings.
pub fn corpus() -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0);
    let mut corpus = vec![String::new()];

    for len in [1, 2, 10, 50, 200] {
        corpus.push(random_string(&mut rng, "acgt", len));
        corpus.push(random_string(&mut rng, "abcdefg", len));
        corpus.push("a".repeat(len));
    }
    for n in [0, 1, 5, 10] {
        corpus.push(fibonacci_string(n));
    }

    corpus
}

/// A random substring of `x` (possibly empty).
pub fn random_substring(rng: &mut StdRng, x: &str) -> String {
    let i = rng.gen_range(0..=x.len());
    let j = rng.gen_range(i..=x.len());
    x[i..j].to_string()
}

/// The suffix array of `x`, computed by sorting the suffixes of the
/// sentinel-terminated mapped string.
pub fn naive_suffix_array(x: &str) -> Vec<i32> {
    let (xs, _) = map_str_with_sentinel(x);
    let mut sa: Vec<i32> = (0..xs.len() as i32).collect();
    sa.sort_by(|&i, &j| xs[i as usize..].cmp(&xs[j as usize..]));
    sa
}

/// All positions where `p` occurs in `x`, by direct comparison. The
/// empty pattern occurs at every position, including one past the end.
pub fn naive_occurrences(x: &str, p: &str) -> Vec<usize> {
    let (x, p) = (x.as_bytes(), p.as_bytes());
    if p.len() > x.len() {
        return vec![];
    }
    (0..=x.len() - p.len())
        .filter(|&i| &x[i..i + p.len()] == p)
        .collect()
}
